//! Validate command implementation

use anyhow::Result;
use arcparse_core::RuleTable;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the validate command
#[derive(Debug, Args)]
pub struct ValidateArgs {
    /// Path to the rule table to validate
    #[arg(short, long, value_name = "FILE", required = true)]
    pub rules: PathBuf,
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> Result<()> {
        println!("Validating rule table: {}", self.rules.display());

        match RuleTable::from_file(&self.rules) {
            Ok(table) => {
                println!("✓ Rule table is valid!");
                println!("  Rules: {}", table.rules.len());
                println!("  Default label: {}", table.default_label);
                println!("  Root label: {}", table.root_label);
                Ok(())
            }
            Err(e) => {
                println!("✗ Rule table is invalid!");
                println!("  Error: {e}");
                Err(anyhow::anyhow!("Validation failed: {}", e))
            }
        }
    }
}
