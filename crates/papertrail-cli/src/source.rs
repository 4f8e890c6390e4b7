//! Plain-file text source.
//!
//! Text acquisition is an external collaborator: swapping in an OCR or PDF
//! extraction backend means implementing `TextSource` somewhere else. The
//! CLI ships only the plain-file read.

use papertrail_domain::TextSource;
use std::fs;
use std::path::Path;

/// Reads document text straight from a UTF-8 file.
#[derive(Debug, Default, Clone, Copy)]
pub struct FileTextSource;

impl TextSource for FileTextSource {
    type Error = std::io::Error;

    fn get_text(&self, path: &Path) -> Result<String, Self::Error> {
        fs::read_to_string(path)
    }
}
