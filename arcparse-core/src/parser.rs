//! Parser entry point
//!
//! [`DependencyParser`] wires the token adapter, decoder and tree assembler
//! together around an injected oracle and an explicit configuration.

use std::sync::Arc;

use crate::config::ParserConfig;
use crate::decoder::{DecodeStats, Decoder};
use crate::error::Result;
use crate::oracle::DecisionOracle;
use crate::state::ParserState;
use crate::token::{self, Token};
use crate::tree::{DependencyTree, TreeAssembler};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Greedy arc-standard dependency parser
///
/// Holds no per-sentence state, so one parser can be shared across threads
/// and used for any number of sentences.
#[derive(Clone)]
pub struct DependencyParser {
    config: ParserConfig,
    oracle: Arc<dyn DecisionOracle>,
}

impl std::fmt::Debug for DependencyParser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DependencyParser")
            .field("config", &self.config)
            .field("oracle", &self.oracle.name())
            .finish()
    }
}

impl DependencyParser {
    /// Create a parser with default configuration
    pub fn new(oracle: impl DecisionOracle + 'static) -> Self {
        Self {
            config: ParserConfig::default(),
            oracle: Arc::new(oracle),
        }
    }

    /// Create a parser with custom configuration
    pub fn with_config(config: ParserConfig, oracle: impl DecisionOracle + 'static) -> Result<Self> {
        Self::with_shared_oracle(config, Arc::new(oracle))
    }

    /// Create a parser around an oracle that is shared with other parsers
    pub fn with_shared_oracle(
        config: ParserConfig,
        oracle: Arc<dyn DecisionOracle>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, oracle })
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    pub fn oracle_name(&self) -> &str {
        self.oracle.name()
    }

    /// Parse one sentence of `(word, tag)` pairs
    pub fn parse<I, W, T>(&self, pairs: I) -> Result<DependencyTree>
    where
        I: IntoIterator<Item = (W, T)>,
        W: Into<String>,
        T: Into<String>,
    {
        self.parse_with_stats(pairs).map(|(tree, _)| tree)
    }

    /// Parse one sentence and report decoding counters
    pub fn parse_with_stats<I, W, T>(&self, pairs: I) -> Result<(DependencyTree, DecodeStats)>
    where
        I: IntoIterator<Item = (W, T)>,
        W: Into<String>,
        T: Into<String>,
    {
        let tokens = token::adapt(pairs, &self.config)?;
        self.parse_tokens(tokens)
    }

    /// Parse a `word/TAG word/TAG ...` line
    pub fn parse_tagged(&self, line: &str) -> Result<DependencyTree> {
        self.parse(token::parse_tagged(line)?)
    }

    fn parse_tokens(&self, tokens: Vec<Token>) -> Result<(DependencyTree, DecodeStats)> {
        let mut state = ParserState::new(tokens);
        let stats = Decoder::new(self.oracle.as_ref()).decode(&mut state)?;
        let tree = TreeAssembler::new(&self.config).assemble(state)?;
        Ok((tree, stats))
    }

    /// Parse independent sentences, keeping input order
    ///
    /// Each failure is wrapped in [`crate::ParseError::Sentence`] with the
    /// sentence's position. With the `parallel` feature the sentences are
    /// spread over the rayon thread pool.
    pub fn parse_batch<S, W, T>(&self, sentences: &[S]) -> Vec<Result<DependencyTree>>
    where
        S: AsRef<[(W, T)]> + Sync,
        W: AsRef<str> + Sync,
        T: AsRef<str> + Sync,
    {
        let parse_one = |(index, sentence): (usize, &S)| {
            let pairs = sentence
                .as_ref()
                .iter()
                .map(|(word, tag)| -> (&str, &str) { (word.as_ref(), tag.as_ref()) });
            self.parse(pairs).map_err(|e| e.in_sentence(index))
        };

        #[cfg(feature = "parallel")]
        {
            sentences.par_iter().enumerate().map(parse_one).collect()
        }

        #[cfg(not(feature = "parallel"))]
        {
            sentences.iter().enumerate().map(parse_one).collect()
        }
    }
}
