//! Indented tree output formatter

use super::{OutputFormatter, SentenceSource};
use anyhow::Result;
use arcparse_core::{DependencyTree, ROOT};
use std::io::Write;

/// Tree formatter - prints each word under its head
///
/// ```text
/// # corpus.txt:1
/// saw/VBD [root]
///   I/PRP [nsubj]
///   it/PRP [dobj]
/// ```
pub struct TreeFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TreeFormatter<W> {
    /// Create a new tree formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl<W: Write + Send + Sync> OutputFormatter for TreeFormatter<W> {
    fn format_tree(&mut self, tree: &DependencyTree, source: SentenceSource<'_>) -> Result<()> {
        writeln!(self.writer, "# {}:{}", source.file, source.line)?;

        // Depth-first, children in sentence order
        let mut pending: Vec<(usize, usize)> = tree.children(ROOT).map(|w| (w.index, 0)).collect();
        pending.reverse();
        while let Some((index, depth)) = pending.pop() {
            if let Some(word) = tree.word(index) {
                writeln!(
                    self.writer,
                    "{:indent$}{}/{} [{}]",
                    "",
                    word.word,
                    word.postag,
                    word.deprel,
                    indent = depth * 2
                )?;
                let mut children: Vec<(usize, usize)> =
                    tree.children(index).map(|w| (w.index, depth + 1)).collect();
                children.reverse();
                pending.extend(children);
            }
        }

        writeln!(self.writer)?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
