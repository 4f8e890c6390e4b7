//! Papertrail Extractor
//!
//! Converts raw document text into normalized structured records using an
//! LLM completion backend, under a fixed context budget.
//!
//! # Overview
//!
//! Extracted document text is arbitrarily long; a completion model's context
//! is not. This crate turns one document's text into a bounded sequence of
//! model calls that never exceed the model's input+output budget,
//! progressively summarize oversized input while preserving extractable
//! detail, and recover a well-formed record from model output that is not
//! guaranteed to be clean JSON.
//!
//! # Architecture
//!
//! ```text
//! Text → SummarizationReducer → PromptBuilder → CompletionBackend → parse_response → DocumentOutcome
//! ```
//!
//! # Key Features
//!
//! - **Line-boundary chunking**: lossless, order-preserving splits with a
//!   hard-cut fallback so splitting always advances
//! - **Bounded convergence**: summarize-until-fits as a capped fixed-point
//!   loop with explicit no-progress detection
//! - **Lenient JSON recovery**: greedy object-span match plus strict decode,
//!   degrading to raw text rather than losing the document
//! - **Per-document containment**: every document yields a tagged outcome;
//!   one failure never aborts a batch
//!
//! # Example Usage
//!
//! ```
//! use papertrail_extractor::{Pipeline, PipelineConfig};
//! use papertrail_llm::MockBackend;
//!
//! let backend = MockBackend::new(
//!     r#"{"date": "2023-01-15", "client_name": "Acme", "location": null, "confidence": 0.8}"#,
//! );
//! let pipeline = Pipeline::new(backend, PipelineConfig::default()).unwrap();
//!
//! let outcome = pipeline.process("invoice_0142.pdf", "Invoice from Acme, Jan 15 2023");
//! assert!(outcome.is_structured());
//! ```

#![warn(missing_docs)]

mod chunking;
mod config;
mod error;
mod parser;
mod pipeline;
mod prompt;
mod reducer;

#[cfg(test)]
mod tests;

pub use chunking::{LineChunker, TextChunk};
pub use config::PipelineConfig;
pub use error::ExtractError;
pub use parser::parse_response;
pub use pipeline::Pipeline;
pub use prompt::{summarization_prompt, PromptBuilder};
pub use reducer::{ReducedText, SummarizationReducer};
