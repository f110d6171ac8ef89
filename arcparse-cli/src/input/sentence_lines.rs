//! Sentence extraction from tagged text
//!
//! Input files hold one sentence per line as `word/TAG` items. Blank lines
//! and lines starting with `#` are skipped.

/// One sentence line of an input file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SentenceLine<'a> {
    /// 1-based line number in the file
    pub line: usize,
    pub text: &'a str,
}

/// Collect the sentence lines of `text`
pub fn sentence_lines(text: &str) -> Vec<SentenceLine<'_>> {
    text.lines()
        .enumerate()
        .filter_map(|(i, raw)| {
            let trimmed = raw.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                None
            } else {
                Some(SentenceLine {
                    line: i + 1,
                    text: trimmed,
                })
            }
        })
        .collect()
}
