//! Output formatting module

use anyhow::Result;
use arcparse_core::DependencyTree;
use std::io::Write;

/// Where a parsed sentence came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceSource<'a> {
    /// Input file as given on the command line
    pub file: &'a str,
    /// 1-based line number
    pub line: usize,
}

/// Trait for output formatters
pub trait OutputFormatter: Send + Sync {
    /// Format and output a single parsed sentence
    fn format_tree(&mut self, tree: &DependencyTree, source: SentenceSource<'_>) -> Result<()>;

    /// Finalize output (e.g., write the JSON array)
    fn finish(&mut self) -> Result<()>;
}

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// CoNLL-X, one word per line, blank line between sentences
    Conll,
    /// JSON array of sentences with their words
    Json,
    /// Indented head/dependent tree
    Tree,
}

impl OutputFormat {
    /// Parse a format name as written in a configuration file
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as clap::ValueEnum>::from_str(name, true).ok()
    }
}

/// Build the formatter for `format` writing to `writer`
pub fn create_formatter(
    format: OutputFormat,
    writer: Box<dyn Write + Send + Sync>,
    pretty_json: bool,
) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Conll => Box::new(ConllFormatter::new(writer)),
        OutputFormat::Json => Box::new(JsonFormatter::new(writer, pretty_json)),
        OutputFormat::Tree => Box::new(TreeFormatter::new(writer)),
    }
}

pub mod conll;
pub mod json;
pub mod tree;

pub use conll::ConllFormatter;
pub use json::JsonFormatter;
pub use tree::TreeFormatter;
