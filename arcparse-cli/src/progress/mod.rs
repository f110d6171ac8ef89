//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TEMPLATE: &str = "[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} files {msg}";

/// Progress reporter for file parsing
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
    quiet: bool,
    sentences: usize,
    failures: usize,
    unreadable_files: usize,
}

impl ProgressReporter {
    /// Create a new progress reporter
    pub fn new(quiet: bool) -> Self {
        Self {
            progress_bar: None,
            quiet,
            sentences: 0,
            failures: 0,
            unreadable_files: 0,
        }
    }

    /// Initialize progress bar for file parsing
    pub fn init_files(&mut self, total_files: u64) {
        if self.quiet {
            return;
        }

        let style = ProgressStyle::with_template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");
        let pb = ProgressBar::new(total_files);
        pb.set_style(style);
        pb.enable_steady_tick(Duration::from_millis(100));

        self.progress_bar = Some(pb);
    }

    /// Update progress for a completed file
    pub fn file_completed(&mut self, filename: &str, sentences: usize, failures: usize) {
        self.sentences += sentences;
        self.failures += failures;

        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("Parsed: {filename}"));
            pb.inc(1);
        }
    }

    /// Count a file that could not be read
    pub fn file_failed(&mut self, filename: &str) {
        self.unreadable_files += 1;

        if let Some(pb) = &self.progress_bar {
            pb.set_message(format!("Skipped: {filename}"));
            pb.inc(1);
        }
    }

    /// Print a line without tearing the progress bar
    pub fn report(&self, message: &str) {
        match &self.progress_bar {
            Some(pb) => pb.suspend(|| eprintln!("{message}")),
            None => eprintln!("{message}"),
        }
    }

    /// Sentences seen so far
    pub fn sentences(&self) -> usize {
        self.sentences
    }

    /// Sentences that failed so far
    pub fn failures(&self) -> usize {
        self.failures
    }

    /// Files skipped because they could not be read
    pub fn unreadable_files(&self) -> usize {
        self.unreadable_files
    }

    /// Finish progress reporting
    pub fn finish(&self) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(format!(
                "Complete: {} sentences, {} failed",
                self.sentences, self.failures
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_reporter_has_no_bar() {
        let mut reporter = ProgressReporter::new(true);
        reporter.init_files(3);
        assert!(reporter.progress_bar.is_none());

        reporter.file_completed("a.txt", 10, 1);
        reporter.file_completed("b.txt", 5, 0);
        reporter.file_failed("c.txt");
        reporter.finish();

        assert_eq!(reporter.sentences(), 15);
        assert_eq!(reporter.failures(), 1);
        assert_eq!(reporter.unreadable_files(), 1);
    }

    #[test]
    fn test_bar_tracks_files() {
        let mut reporter = ProgressReporter::new(false);
        reporter.init_files(2);
        reporter.file_completed("a.txt", 4, 0);

        let pb = reporter.progress_bar.as_ref().unwrap();
        assert_eq!(pb.position(), 1);
        assert_eq!(pb.length(), Some(2));
        reporter.finish();
    }
}
