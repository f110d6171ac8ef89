//! Parser configuration
//!
//! A [`ParserConfig`] is built once (in code, through [`ConfigBuilder`], or
//! from a TOML document) and handed to [`crate::DependencyParser`]. Nothing in
//! the parsing core reads configuration from anywhere else.

use crate::error::{ParseError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Default configuration constants
pub mod defaults {
    /// Longest sentence accepted by the token adapter
    pub const MAX_SENTENCE_LENGTH: usize = 256;

    /// Label given to tokens attached directly to ROOT by the assembler
    pub const ROOT_LABEL: &str = "root";

    /// Surface form of the synthetic ROOT token
    pub const ROOT_WORD: &str = "<ROOT>";

    /// Tag of the synthetic ROOT token
    pub const ROOT_TAG: &str = "ROOT";
}

/// Parsing configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Maximum number of tokens per sentence
    pub max_sentence_length: usize,
    /// Relation label for tokens the assembler attaches to ROOT
    pub root_label: String,
    /// Word used for the ROOT sentinel
    pub root_word: String,
    /// Tag used for the ROOT sentinel
    pub root_tag: String,
    /// Accept trees with more than one token directly under ROOT
    pub allow_multiple_roots: bool,
    /// Fine tag to coarse tag mapping applied by the token adapter
    pub tag_map: BTreeMap<String, String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_sentence_length: defaults::MAX_SENTENCE_LENGTH,
            root_label: defaults::ROOT_LABEL.to_string(),
            root_word: defaults::ROOT_WORD.to_string(),
            root_tag: defaults::ROOT_TAG.to_string(),
            allow_multiple_roots: false,
            tag_map: BTreeMap::new(),
        }
    }
}

impl ParserConfig {
    /// Create a configuration builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ParserConfig = toml::from_str(text)
            .map_err(|e| ParseError::Configuration(format!("failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ParseError::Configuration(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&text)
    }

    /// Check the configuration for values the parser cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.max_sentence_length == 0 {
            return Err(ParseError::Configuration(
                "max_sentence_length must be greater than 0".into(),
            ));
        }

        for (name, value) in [
            ("root_label", &self.root_label),
            ("root_word", &self.root_word),
            ("root_tag", &self.root_tag),
        ] {
            if value.trim().is_empty() {
                return Err(ParseError::Configuration(format!(
                    "{name} must not be empty"
                )));
            }
        }

        if let Some((fine, _)) = self.tag_map.iter().find(|(_, coarse)| coarse.is_empty()) {
            return Err(ParseError::Configuration(format!(
                "tag_map entry for '{fine}' maps to an empty tag"
            )));
        }

        Ok(())
    }

    /// Coarse tag for a fine tag, falling back to the tag itself
    pub fn coarse_tag<'a>(&'a self, tag: &'a str) -> &'a str {
        self.tag_map.get(tag).map(String::as_str).unwrap_or(tag)
    }
}

/// Fluent builder for [`ParserConfig`]
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    max_sentence_length: Option<usize>,
    root_label: Option<String>,
    root_word: Option<String>,
    root_tag: Option<String>,
    allow_multiple_roots: Option<bool>,
    tag_map: BTreeMap<String, String>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum sentence length in tokens
    pub fn max_sentence_length(mut self, tokens: usize) -> Self {
        self.max_sentence_length = Some(tokens);
        self
    }

    /// Set the label used for tokens attached to ROOT by the assembler
    pub fn root_label(mut self, label: impl Into<String>) -> Self {
        self.root_label = Some(label.into());
        self
    }

    /// Set the word and tag of the ROOT sentinel
    pub fn root_sentinel(mut self, word: impl Into<String>, tag: impl Into<String>) -> Self {
        self.root_word = Some(word.into());
        self.root_tag = Some(tag.into());
        self
    }

    /// Allow more than one token directly under ROOT
    pub fn allow_multiple_roots(mut self, allow: bool) -> Self {
        self.allow_multiple_roots = Some(allow);
        self
    }

    /// Map a fine tag to a coarse tag
    pub fn map_tag(mut self, fine: impl Into<String>, coarse: impl Into<String>) -> Self {
        self.tag_map.insert(fine.into(), coarse.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ParserConfig> {
        let mut config = ParserConfig::default();

        if let Some(length) = self.max_sentence_length {
            config.max_sentence_length = length;
        }
        if let Some(label) = self.root_label {
            config.root_label = label;
        }
        if let Some(word) = self.root_word {
            config.root_word = word;
        }
        if let Some(tag) = self.root_tag {
            config.root_tag = tag;
        }
        if let Some(allow) = self.allow_multiple_roots {
            config.allow_multiple_roots = allow;
        }
        config.tag_map.extend(self.tag_map);

        config.validate()?;
        Ok(config)
    }
}
