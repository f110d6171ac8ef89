//! Configuration module

use anyhow::{Context, Result};
use arcparse_core::ParserConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration structure
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct CliConfig {
    /// Parser configuration, passed to the core library as-is
    #[serde(default)]
    pub parser: ParserConfig,

    /// Oracle configuration
    #[serde(default)]
    pub oracle: OracleConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

impl CliConfig {
    /// Load a configuration file
    ///
    /// A relative rule table path is taken relative to the directory of the
    /// configuration file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let mut config: CliConfig = toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        if let (Some(rules), Some(dir)) = (config.oracle.rules.as_mut(), path.parent()) {
            if rules.is_relative() {
                *rules = dir.join(&*rules);
            }
        }

        Ok(config)
    }
}

/// Oracle-related configuration
#[derive(Debug, Deserialize, Serialize, Default)]
pub struct OracleConfig {
    /// Rule table file; the built-in Penn table is used when unset
    pub rules: Option<PathBuf>,
}

/// Output-related configuration
#[derive(Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format
    pub default_format: String,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: "conll".to_string(),
            pretty_json: true,
        }
    }
}
