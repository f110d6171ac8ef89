//! arcparse command-line entry point

use anyhow::Result;
use arcparse_cli::commands::{Commands, ListCommands};
use clap::Parser;

/// Greedy arc-standard dependency parsing for tagged text
#[derive(Debug, Parser)]
#[command(name = "arcparse", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Parse(args) => args.execute(),
        Commands::Validate(args) => args.execute(),
        Commands::List { subcommand } => {
            match subcommand {
                ListCommands::Formats => {
                    println!("Available output formats:");
                    println!("  conll - CoNLL-X columns, one word per line");
                    println!("  json  - JSON array of parsed sentences");
                    println!("  tree  - Indented head/dependent tree");
                }
                ListCommands::Labels => {
                    let table = arcparse_core::RuleTable::penn()?;
                    let mut labels: Vec<&str> =
                        table.rules.iter().map(|rule| rule.label.as_str()).collect();
                    labels.push(table.default_label.as_str());
                    labels.push(table.root_label.as_str());
                    labels.sort_unstable();
                    labels.dedup();

                    println!("Relation labels of the built-in Penn rule table:");
                    for label in labels {
                        println!("  {label}");
                    }
                }
            }
            Ok(())
        }
    }
}
