//! Token sequence adapter
//!
//! Turns externally tagged `(word, tag)` pairs into the indexed tokens the
//! parser state works on. Index 0 is always the synthetic ROOT token.

use crate::config::ParserConfig;
use crate::error::{ParseError, Result};
use serde::{Deserialize, Serialize};

/// Index of the synthetic ROOT token
pub const ROOT: usize = 0;

/// One token of the sentence being parsed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    /// Position in the sentence, 1-based; 0 for ROOT
    pub index: usize,
    /// Surface form
    pub word: String,
    /// Coarse tag, after the configured tag mapping
    pub cpostag: String,
    /// Tag as supplied by the tagger
    pub postag: String,
}

impl Token {
    /// Create a token whose coarse and fine tags are the same
    pub fn new(index: usize, word: impl Into<String>, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        Self {
            index,
            word: word.into(),
            cpostag: tag.clone(),
            postag: tag,
        }
    }

    /// Whether this is the ROOT sentinel
    pub fn is_root(&self) -> bool {
        self.index == ROOT
    }
}

/// Build the token array for one sentence
///
/// Returns `N + 1` tokens, ROOT first. Fails with
/// [`ParseError::InvalidInput`] when the sentence is empty, longer than
/// `config.max_sentence_length`, or contains an empty word or tag.
pub fn adapt<I, W, T>(pairs: I, config: &ParserConfig) -> Result<Vec<Token>>
where
    I: IntoIterator<Item = (W, T)>,
    W: Into<String>,
    T: Into<String>,
{
    let mut tokens = vec![Token::new(ROOT, &*config.root_word, &*config.root_tag)];

    for (position, (word, tag)) in pairs.into_iter().enumerate() {
        let index = position + 1;
        if index > config.max_sentence_length {
            return Err(ParseError::invalid_input(format!(
                "sentence exceeds the maximum length of {} tokens",
                config.max_sentence_length
            )));
        }

        let word = word.into();
        let tag = tag.into();
        if word.is_empty() {
            return Err(ParseError::invalid_input(format!(
                "token {index} has an empty word"
            )));
        }
        if tag.is_empty() {
            return Err(ParseError::invalid_input(format!(
                "token {index} ('{word}') has an empty tag"
            )));
        }

        tokens.push(Token {
            index,
            cpostag: config.coarse_tag(&tag).to_string(),
            postag: tag,
            word,
        });
    }

    if tokens.len() == 1 {
        return Err(ParseError::invalid_input("sentence has no tokens"));
    }

    Ok(tokens)
}

/// Split a `word/TAG word/TAG ...` line into pairs
///
/// Each item is split on its last `/`, so words that contain a slash
/// (`1/2/CD`) keep it.
pub fn parse_tagged(line: &str) -> Result<Vec<(String, String)>> {
    line.split_whitespace()
        .map(|item| match item.rsplit_once('/') {
            Some((word, tag)) if !word.is_empty() && !tag.is_empty() => {
                Ok((word.to_string(), tag.to_string()))
            }
            _ => Err(ParseError::invalid_input(format!(
                "'{item}' is not a word/TAG item"
            ))),
        })
        .collect()
}
