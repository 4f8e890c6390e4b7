//! Papertrail CLI - batch document-to-record extraction.
//!
//! Peripheral glue around `papertrail-extractor`: folder enumeration, text
//! acquisition, sequential batch execution, and numbered run reports.

pub mod cli;
pub mod error;
pub mod run;
pub mod source;

pub use cli::Cli;
pub use error::{CliError, Result};
pub use run::{list_documents, next_output_path, run_batch, write_report, RunReport};
pub use source::FileTextSource;
