//! Input handling module

pub mod file_reader;

pub use file_reader::FileReader;

use crate::error::CliError;
use pagecast_core::{Extractor, Sentence};
use std::path::Path;

/// Read the book and split it into sentences
///
/// A missing or unreadable file, as well as a book without a single usable
/// sentence, is a corpus error.
pub fn load_corpus(path: &Path, extractor: &Extractor) -> Result<Vec<Sentence>, CliError> {
    let text = FileReader::read_text(path).map_err(|e| CliError::Corpus(format!("{e:#}")))?;
    let sentences = extractor.extract(&text);

    if sentences.is_empty() {
        return Err(CliError::Corpus(format!(
            "no sentences longer than {} characters in {}",
            extractor.config().min_length,
            path.display()
        )));
    }

    log::debug!(
        "Extracted {} sentences from {} ({} bytes)",
        sentences.len(),
        path.display(),
        text.len()
    );
    Ok(sentences)
}
