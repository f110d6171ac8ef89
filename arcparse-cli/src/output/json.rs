//! JSON output formatter

use super::{OutputFormatter, SentenceSource};
use anyhow::Result;
use arcparse_core::{DependencyTree, DependencyWord};
use serde::{Deserialize, Serialize};
use std::io::Write;

/// JSON formatter - outputs parsed sentences as a JSON array
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    sentences: Vec<SentenceData>,
}

/// Data structure for JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct SentenceData {
    /// Input file the sentence was read from
    pub file: String,
    /// Line of the sentence in that file
    pub line: usize,
    /// Parsed words in sentence order
    pub words: Vec<DependencyWord>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            sentences: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for JsonFormatter<W> {
    fn format_tree(&mut self, tree: &DependencyTree, source: SentenceSource<'_>) -> Result<()> {
        self.sentences.push(SentenceData {
            file: source.file.to_string(),
            line: source.line,
            words: tree.words().to_vec(),
        });
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &self.sentences)?;
        } else {
            serde_json::to_writer(&mut self.writer, &self.sentences)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}
