//! Parse command implementation

use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{resolve_patterns, sentence_lines, FileReader, SentenceLine};
use crate::output::{create_formatter, OutputFormat, SentenceSource};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use arcparse_core::{DependencyParser, DependencyTree, ParseError, RuleTable, RuleTableOracle};
use clap::Args;
use rayon::prelude::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

/// Arguments for the parse command
#[derive(Debug, Args)]
pub struct ParseArgs {
    /// Input files or patterns (supports glob)
    #[arg(short, long, value_name = "FILE/PATTERN", required = true)]
    pub input: Vec<String>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output format (default: from config, else conll)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Rule table for the oracle (default: built-in Penn Treebank rules)
    #[arg(short, long, value_name = "FILE", env = "ARCPARSE_RULES")]
    pub rules: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE", env = "ARCPARSE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Maximum tokens per sentence
    #[arg(long, value_name = "N")]
    pub max_length: Option<usize>,

    /// Accept trees with more than one word under ROOT
    #[arg(long)]
    pub allow_multiple_roots: bool,

    /// Number of worker threads (default: number of CPUs)
    #[arg(short, long, value_name = "N")]
    pub threads: Option<usize>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl ParseArgs {
    /// Execute the parse command
    pub fn execute(&self) -> Result<()> {
        self.init_logging()?;

        log::info!("Starting dependency parsing");
        log::debug!("Arguments: {:?}", self);

        let config = self.load_config()?;
        let format = self.resolve_format(&config)?;
        let parser = self.build_parser(&config)?;
        log::info!("Using oracle '{}'", parser.oracle_name());

        let files = resolve_patterns(&self.input)?;
        log::info!("Found {} file(s) to parse", files.len());

        let pool = self.thread_pool()?;

        let writer: Box<dyn Write + Send + Sync> = match &self.output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create output file: {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
            None => Box::new(io::stdout()),
        };
        let mut formatter = create_formatter(format, writer, config.output.pretty_json);

        let mut progress = ProgressReporter::new(self.quiet);
        progress.init_files(files.len() as u64);

        for path in &files {
            let file = path.display().to_string();
            let text = match FileReader::read_text(path) {
                Ok(text) => text,
                Err(e) => {
                    progress.report(&format!("error: {e:#}"));
                    progress.file_failed(&file);
                    continue;
                }
            };
            let lines = sentence_lines(&text);
            log::debug!("{}: {} sentence(s)", file, lines.len());

            let results = pool.install(|| parse_lines(&parser, &lines));

            let mut failures = 0;
            for (sentence, result) in lines.iter().zip(results) {
                match result {
                    Ok(tree) => {
                        let source = SentenceSource {
                            file: &file,
                            line: sentence.line,
                        };
                        formatter.format_tree(&tree, source)?;
                    }
                    Err(e) => {
                        failures += 1;
                        progress.report(&format!("error: {}:{}: {}", file, sentence.line, e));
                    }
                }
            }

            progress.file_completed(&file, lines.len(), failures);
        }

        formatter.finish()?;
        progress.finish();

        log::info!(
            "Parsed {} sentence(s), {} failed, {} unreadable file(s)",
            progress.sentences(),
            progress.failures(),
            progress.unreadable_files()
        );

        if progress.unreadable_files() > 0 {
            return Err(CliError::UnreadableFiles(progress.unreadable_files()).into());
        }
        if progress.failures() > 0 {
            return Err(CliError::ParseFailures(progress.failures()).into());
        }
        Ok(())
    }

    /// Load the configuration file and apply command-line overrides
    fn load_config(&self) -> Result<CliConfig> {
        let mut config = match &self.config {
            Some(path) => CliConfig::from_file(path)?,
            None => CliConfig::default(),
        };

        if let Some(max_length) = self.max_length {
            config.parser.max_sentence_length = max_length;
        }
        if self.allow_multiple_roots {
            config.parser.allow_multiple_roots = true;
        }
        if let Some(rules) = &self.rules {
            config.oracle.rules = Some(rules.clone());
        }

        Ok(config)
    }

    fn resolve_format(&self, config: &CliConfig) -> Result<OutputFormat> {
        if let Some(format) = self.format {
            return Ok(format);
        }

        let name = &config.output.default_format;
        OutputFormat::from_name(name)
            .ok_or_else(|| CliError::ConfigError(format!("unknown output format '{name}'")).into())
    }

    fn build_parser(&self, config: &CliConfig) -> Result<DependencyParser> {
        let oracle = match &config.oracle.rules {
            Some(path) => {
                let table = RuleTable::from_file(path)
                    .with_context(|| format!("Failed to load rule table: {}", path.display()))?;
                log::info!("Loaded {} rule(s) from {}", table.rules.len(), path.display());
                RuleTableOracle::new(table)
            }
            None => RuleTableOracle::penn()?,
        };

        DependencyParser::with_config(config.parser.clone(), oracle)
            .map_err(|e| CliError::ConfigError(e.to_string()).into())
    }

    fn thread_pool(&self) -> Result<rayon::ThreadPool> {
        let threads = match self.threads {
            Some(0) => {
                return Err(
                    CliError::ConfigError("thread count must be at least 1".to_string()).into(),
                )
            }
            Some(n) => n,
            None => num_cpus::get(),
        };
        log::debug!("Using {} worker thread(s)", threads);

        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .context("Failed to build thread pool")
    }

    /// Initialize logging based on verbosity level
    fn init_logging(&self) -> Result<()> {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            // A logger may already be installed when running in-process
            if let Err(e) = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init()
            {
                log::debug!("Keeping the existing logger: {e}");
            }
        }

        Ok(())
    }
}

/// Parse every sentence line, keeping line order
fn parse_lines(
    parser: &DependencyParser,
    lines: &[SentenceLine<'_>],
) -> Vec<std::result::Result<DependencyTree, ParseError>> {
    lines
        .par_iter()
        .map(|sentence| parser.parse_tagged(sentence.text))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(input: &TempDir, output: PathBuf) -> ParseArgs {
        ParseArgs {
            input: vec![input.path().join("*.txt").to_string_lossy().into_owned()],
            output: Some(output),
            format: Some(OutputFormat::Conll),
            rules: None,
            config: None,
            max_length: None,
            allow_multiple_roots: false,
            threads: Some(2),
            quiet: true,
            verbose: 0,
        }
    }

    #[test]
    fn test_execute_writes_conll() {
        let input = TempDir::new().unwrap();
        fs::write(
            input.path().join("corpus.txt"),
            "# header\nI/PRP saw/VBD it/PRP\n\nHello/UH\n",
        )
        .unwrap();
        let output = input.path().join("out.conll");

        args(&input, output.clone()).execute().unwrap();

        let text = fs::read_to_string(output).unwrap();
        assert!(text.contains("2\tsaw\t_\tVBD\tVBD\t_\t0\troot\t_\t_"));
        assert!(text.contains("1\tHello\t_\tUH\tUH\t_\t0\troot\t_\t_"));
        assert_eq!(text.matches("\n\n").count(), 2);
    }

    #[test]
    fn test_failures_are_counted_after_writing_good_trees() {
        let input = TempDir::new().unwrap();
        fs::write(
            input.path().join("corpus.txt"),
            "I/PRP saw/VBD it/PRP\nbroken line\nHello/UH\n",
        )
        .unwrap();
        let output = input.path().join("out.conll");

        let err = args(&input, output.clone()).execute().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::ParseFailures(1))
        ));

        let text = fs::read_to_string(output).unwrap();
        assert!(text.contains("saw"));
        assert!(text.contains("Hello"));
    }

    #[test]
    fn test_unreadable_file_keeps_json_of_other_files() {
        let input = TempDir::new().unwrap();
        fs::write(input.path().join("a.txt"), "I/PRP saw/VBD it/PRP\n").unwrap();
        fs::write(input.path().join("b.txt"), [0x63, 0xe9, 0x2f, 0x4e]).unwrap();
        let output = input.path().join("out.json");

        let mut parse = args(&input, output.clone());
        parse.format = Some(OutputFormat::Json);
        let err = parse.execute().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::UnreadableFiles(1))
        ));

        let text = fs::read_to_string(output).unwrap();
        let sentences: serde_json::Value = serde_json::from_str(&text).unwrap();
        let sentences = sentences.as_array().unwrap();
        assert_eq!(sentences.len(), 1);
        assert_eq!(sentences[0]["words"][1]["word"], "saw");
    }

    #[test]
    fn test_max_length_override() {
        let input = TempDir::new().unwrap();
        fs::write(input.path().join("corpus.txt"), "a/DT dog/NN barked/VBD\n").unwrap();
        let output = input.path().join("out.conll");

        let mut parse = args(&input, output);
        parse.max_length = Some(2);
        let err = parse.execute().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::ParseFailures(1))
        ));
    }

    #[test]
    fn test_config_file_and_flag_precedence() {
        let input = TempDir::new().unwrap();
        let config_path = input.path().join("arcparse.toml");
        fs::write(
            &config_path,
            "[parser]\nmax_sentence_length = 1\n\n[output]\ndefault_format = \"json\"\n",
        )
        .unwrap();

        let mut parse = args(&input, input.path().join("out.json"));
        parse.config = Some(config_path);
        parse.format = None;
        parse.max_length = Some(8);

        let config = parse.load_config().unwrap();
        assert_eq!(config.parser.max_sentence_length, 8);
        assert_eq!(parse.resolve_format(&config).unwrap(), OutputFormat::Json);
    }

    #[test]
    fn test_unknown_format_in_config() {
        let input = TempDir::new().unwrap();
        let mut parse = args(&input, input.path().join("out"));
        parse.format = None;

        let mut config = CliConfig::default();
        config.output.default_format = "xml".to_string();

        let err = parse.resolve_format(&config).unwrap_err();
        assert!(err.to_string().contains("unknown output format 'xml'"));
    }

    #[test]
    fn test_logging_initializes_twice() {
        let input = TempDir::new().unwrap();
        let mut parse = args(&input, input.path().join("out"));
        parse.quiet = false;
        parse.verbose = 2;

        assert!(parse.init_logging().is_ok());
        assert!(parse.init_logging().is_ok());
    }

    #[test]
    fn test_zero_threads_rejected() {
        let input = TempDir::new().unwrap();
        let mut parse = args(&input, input.path().join("out"));
        parse.threads = Some(0);
        assert!(parse.thread_pool().is_err());
    }

    #[test]
    fn test_invalid_parser_config_rejected() {
        let input = TempDir::new().unwrap();
        let mut parse = args(&input, input.path().join("out"));
        parse.max_length = Some(0);

        let config = parse.load_config().unwrap();
        let err = parse.build_parser(&config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::ConfigError(_))
        ));
    }

    #[test]
    fn test_parse_lines_keeps_order() {
        let parser = DependencyParser::new(RuleTableOracle::penn().unwrap());
        let lines = sentence_lines("Hello/UH\nnope\nI/PRP saw/VBD it/PRP\n");
        let results = parse_lines(&parser, &lines);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].as_ref().unwrap().len(), 1);
        assert!(matches!(results[1], Err(ParseError::InvalidInput { .. })));
        assert_eq!(results[2].as_ref().unwrap().len(), 3);
    }
}
