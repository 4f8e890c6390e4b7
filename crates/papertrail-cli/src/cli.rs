//! CLI argument definitions and parsing.

use clap::Parser;
use std::path::PathBuf;

/// Papertrail - turn folders of documents into structured records.
#[derive(Debug, Parser)]
#[command(name = "papertrail")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Folder containing the documents to process
    #[arg(short, long, default_value = "samples")]
    pub input: PathBuf,

    /// Folder where numbered run reports are written
    #[arg(short, long, default_value = "output")]
    pub output: PathBuf,

    /// File extension to process; everything else in the folder is skipped
    #[arg(short, long, default_value = "txt")]
    pub extension: String,

    /// Pipeline configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// File containing the API key
    #[arg(short, long, env = "PAPERTRAIL_API_KEY_FILE")]
    pub key_file: PathBuf,

    /// Completions API base URL
    #[arg(long, default_value = papertrail_llm::openai::DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Model to use for completion calls
    #[arg(long, default_value = papertrail_llm::openai::DEFAULT_MODEL)]
    pub model: String,

    /// Write each document's acquired text next to the source as a .txt file
    #[arg(long)]
    pub save_text: bool,
}
