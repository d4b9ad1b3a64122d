//! Preview command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::load_corpus;
use anyhow::Result;
use clap::Args;
use pagecast_core::{Extractor, ExtractorConfig, Sentence};
use serde::Serialize;
use std::io::Write;

/// Arguments for the preview command
#[derive(Debug, Clone, Default, Args)]
pub struct PreviewArgs {
    /// Emit a JSON array instead of numbered lines
    #[arg(long)]
    pub json: bool,

    /// Show at most this many sentences
    #[arg(short = 'n', long, value_name = "N")]
    pub limit: Option<usize>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize)]
pub struct SentenceData<'a> {
    /// Corpus index used in the state file
    pub index: usize,
    /// The sentence text
    pub text: &'a str,
    /// Length in characters
    pub chars: usize,
}

impl PreviewArgs {
    /// Execute the preview command
    pub fn execute(&self, config: &CliConfig, writer: &mut impl Write) -> Result<()> {
        let extractor = Extractor::new(ExtractorConfig {
            min_length: config.corpus.min_length,
            ..ExtractorConfig::default()
        })
        .map_err(|e| CliError::Configuration(e.to_string()))?;
        let corpus = load_corpus(&config.corpus.book_file, &extractor)?;
        self.write(&corpus, writer)
    }

    fn write(&self, corpus: &[Sentence], writer: &mut impl Write) -> Result<()> {
        let shown = self.limit.unwrap_or(corpus.len()).min(corpus.len());

        if self.json {
            let data: Vec<SentenceData<'_>> = corpus[..shown]
                .iter()
                .enumerate()
                .map(|(index, sentence)| SentenceData {
                    index,
                    text: sentence.as_str(),
                    chars: sentence.char_count(),
                })
                .collect();
            serde_json::to_writer_pretty(&mut *writer, &data)?;
            writeln!(writer)?;
        } else {
            for (index, sentence) in corpus[..shown].iter().enumerate() {
                writeln!(writer, "{index:>5}. {sentence}")?;
            }
            writeln!(writer)?;
            writeln!(writer, "Total sentences: {}", corpus.len())?;
        }

        writer.flush()?;
        Ok(())
    }
}
