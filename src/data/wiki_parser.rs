// ============================================================
// Layer 4 — Wiki Dump Parser
// ============================================================
// Splits a plain-text wiki dump into titled documents.
//
// The dump looks like this:
//
//   [[Paris]]
//   CATEGORIES: Capitals in Europe, Cities in France
//   Paris is the capital and most populous city of France.
//   ==History==
//   The city was founded by the Parisii ...
//   #REDIRECT somewhere
//   [[Lyon]]
//   ...
//
// Rules, applied to each line in order:
//   1. `CATEGORIES:` lines are dropped at the GOOD tier only
//   2. lines containing `==` (section headings) or starting
//      with `#` (redirects, lists) are dropped
//   3. a line containing `[[X]]` closes the current document
//      and opens a new one titled X
//   4. anything else is content for the open document
//      (lemmatized first when a Lemmatizer is attached)
//
// Content that appears before the first title has no owner
// and is dropped.
//
// Reference: regex crate documentation
//            Rust Book §8 (Strings), §9 (Error Handling)

use anyhow::{Context, Result};
use regex::Regex;
use std::{io::BufRead, sync::LazyLock};

use crate::domain::{config::Tier, document::WikiDocument, traits::Lemmatizer};

static TITLE_MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\[\[(.+?)\]\]").expect("title marker pattern is valid")
});

/// How a single dump line is treated
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'l> {
    Skipped,
    Title(&'l str),
    Content,
}

/// Classify one line of the dump for the given tier.
pub fn classify(line: &str, tier: Tier) -> LineKind<'_> {
    if tier.skips_category_lines() && line.contains("CATEGORIES:") {
        return LineKind::Skipped;
    }
    if line.contains("==") || line.starts_with('#') {
        return LineKind::Skipped;
    }
    match extract_title(line) {
        Some(title) => LineKind::Title(title),
        None        => LineKind::Content,
    }
}

/// Text of the first `[[...]]` marker on the line, if any
pub fn extract_title(line: &str) -> Option<&str> {
    TITLE_MARKER
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

// ─── WikiDumpParser ───────────────────────────────────────────────────────────
/// Line-at-a-time segmenter. Feed lines, then call `finish()`.
pub struct WikiDumpParser<'a> {
    tier:       Tier,
    lemmatizer: Option<&'a dyn Lemmatizer>,
    current:    Option<WikiDocument>,
    documents:  Vec<WikiDocument>,
    orphaned:   usize,
}

impl<'a> WikiDumpParser<'a> {
    pub fn new(tier: Tier) -> Self {
        Self {
            tier,
            lemmatizer: None,
            current:    None,
            documents:  Vec::new(),
            orphaned:   0,
        }
    }

    /// Lemmatize content lines before they are stored
    pub fn with_lemmatizer(mut self, lemmatizer: &'a dyn Lemmatizer) -> Self {
        self.lemmatizer = Some(lemmatizer);
        self
    }

    pub fn feed_line(&mut self, line: &str) {
        match classify(line, self.tier) {
            LineKind::Skipped => {}
            LineKind::Title(title) => {
                self.close_current();
                self.current = Some(WikiDocument::new(title, String::new()));
            }
            LineKind::Content => {
                let Some(doc) = self.current.as_mut() else {
                    if !line.trim().is_empty() {
                        self.orphaned += 1;
                    }
                    return;
                };
                match self.lemmatizer {
                    Some(lemmatizer) => doc.contents.push_str(&lemmatizer.lemmatize_to_string(line)),
                    None             => doc.contents.push_str(line),
                }
                doc.contents.push(' ');
            }
        }
    }

    /// Close the open document and return everything parsed so far
    pub fn finish(mut self) -> Vec<WikiDocument> {
        self.close_current();
        if self.orphaned > 0 && self.documents.is_empty() {
            tracing::warn!(
                "No [[Title]] marker found; dropped {} content lines",
                self.orphaned
            );
        } else if self.orphaned > 0 {
            tracing::debug!("Dropped {} content lines before the first title", self.orphaned);
        }
        self.documents
    }

    /// Drive the parser over a whole reader. Invalid UTF-8 is
    /// replaced rather than rejected.
    pub fn parse<R: BufRead>(mut self, mut reader: R) -> Result<Vec<WikiDocument>> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let n = reader
                .read_until(b'\n', &mut buf)
                .context("Cannot read wiki dump line")?;
            if n == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            self.feed_line(line.trim_end_matches(['\n', '\r']));
        }
        Ok(self.finish())
    }

    fn close_current(&mut self) {
        if let Some(mut doc) = self.current.take() {
            let trimmed = doc.contents.trim_end().len();
            doc.contents.truncate(trimmed);
            self.documents.push(doc);
        }
    }
}
