//! CoNLL-X output formatter

use super::{OutputFormatter, SentenceSource};
use anyhow::Result;
use arcparse_core::DependencyTree;
use std::io::Write;

const UNUSED: &str = "_";

/// CoNLL-X formatter
///
/// Ten tab-separated columns per word: ID FORM LEMMA CPOSTAG POSTAG FEATS
/// HEAD DEPREL PHEAD PDEPREL. Sentences are separated by a blank line.
pub struct ConllFormatter<W: Write> {
    writer: W,
}

impl<W: Write> ConllFormatter<W> {
    /// Create a new CoNLL formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for ConllFormatter<W> {
    fn format_tree(&mut self, tree: &DependencyTree, _source: SentenceSource<'_>) -> Result<()> {
        for word in tree {
            writeln!(
                self.writer,
                "{}\t{}\t{UNUSED}\t{}\t{}\t{UNUSED}\t{}\t{}\t{UNUSED}\t{UNUSED}",
                word.index, word.word, word.cpostag, word.postag, word.head, word.deprel
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
