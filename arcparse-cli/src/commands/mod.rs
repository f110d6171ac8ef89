//! CLI command implementations

use clap::Subcommand;

pub mod parse;
pub mod validate;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Parse word/TAG files into dependency trees
    Parse(parse::ParseArgs),

    /// Validate a rule table file
    Validate(validate::ValidateArgs),

    /// List available components
    List {
        #[command(subcommand)]
        subcommand: ListCommands,
    },
}

/// List subcommands
#[derive(Debug, Subcommand)]
pub enum ListCommands {
    /// List available output formats
    Formats,

    /// List relation labels of the built-in rule table
    Labels,
}
