//! Papertrail - turn folders of documents into structured records.

use clap::Parser;
use papertrail_cli::{list_documents, next_output_path, run_batch, write_report, Cli, CliError};
use papertrail_extractor::{Pipeline, PipelineConfig};
use papertrail_llm::OpenAiBackend;
use std::fs;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Load pipeline config, or fall back to the 4k-context defaults
    let config = match &cli.config {
        Some(path) => {
            let contents = fs::read_to_string(path)?;
            PipelineConfig::from_toml(&contents).map_err(CliError::Config)?
        }
        None => PipelineConfig::default(),
    };

    let api_key = fs::read_to_string(&cli.key_file)?;
    let backend = OpenAiBackend::new(&cli.endpoint, api_key.trim(), &cli.model);
    let pipeline = Pipeline::new(backend, config)?;

    let files = list_documents(&cli.input, &cli.extension)?;
    if files.is_empty() {
        return Err(CliError::InvalidInput(format!(
            "no .{} files found in {}",
            cli.extension,
            cli.input.display()
        ))
        .into());
    }
    info!(count = files.len(), folder = %cli.input.display(), "starting run");

    let report = run_batch(
        &pipeline,
        &papertrail_cli::FileTextSource,
        &files,
        cli.save_text,
    );

    fs::create_dir_all(&cli.output)?;
    let report_path = next_output_path(&cli.output);
    write_report(&report_path, &report)?;

    let (structured, degraded, failed) = report.tally();
    println!(
        "Processed {} documents: {} structured, {} degraded, {} failed",
        report.responses.len(),
        structured,
        degraded,
        failed
    );
    println!("Report written to {}", report_path.display());

    Ok(())
}
