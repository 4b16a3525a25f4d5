// ============================================================
// Layer 4 — Questions File Reader
// ============================================================
// The questions file is a flat sequence of 4-line records:
//
//   line 0: category        NEWSPAPERS
//   line 1: question        The dominant paper in our nation's capital...
//   line 2: expected answer The Washington Post
//   line 3: separator       (blank)
//
// Alignment is purely positional. A non-blank separator is
// reported but not corrected, and a record cut off before its
// answer line at the end of the file is dropped.
//
// Reference: Rust Book §8 (Vectors), §12 (Reading a File)

use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::domain::question::Question;

/// Number of lines one record occupies
pub const RECORD_LINES: usize = 4;

pub struct QuestionReader;

impl QuestionReader {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Vec<Question>> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Cannot open questions file '{}'", path.display()))?;
        Self::parse(BufReader::new(file))
            .with_context(|| format!("Cannot read questions file '{}'", path.display()))
    }

    pub fn parse<R: BufRead>(reader: R) -> Result<Vec<Question>> {
        let mut questions = Vec::new();
        let mut record: Vec<String> = Vec::with_capacity(RECORD_LINES);

        for (line_no, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');

            match line_no % RECORD_LINES {
                3 => {
                    if !line.trim().is_empty() {
                        tracing::warn!(
                            "Line {}: expected a blank separator, found '{}'",
                            line_no + 1,
                            line
                        );
                    }
                }
                _ => {
                    record.push(line.to_string());
                    if record.len() == 3 {
                        let answer   = record.pop().unwrap_or_default();
                        let text     = record.pop().unwrap_or_default();
                        let category = record.pop().unwrap_or_default();
                        questions.push(Question::new(category, text, answer));
                    }
                }
            }
        }

        if !record.is_empty() {
            tracing::warn!(
                "Dropping incomplete record at end of file ({} of 3 lines)",
                record.len()
            );
        }

        tracing::debug!("Read {} questions", questions.len());
        Ok(questions)
    }
}
