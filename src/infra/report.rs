// ============================================================
// Layer 6 — Evaluation Report
// ============================================================
// Per-question results of an evaluation run, written as CSV
// so runs with different settings can be compared side by side.
//
// Output columns:
//   index,category,question,expected,result,correct,rank
//
// Example:
//   index,category,question,expected,result,correct,rank
//   1,NEWSPAPERS,"The dominant paper, in our capital",The Washington Post,The Washington Post,true,1
//   2,CITIES,City of light,Paris,Lyon,false,3
//
// `rank` is empty when the expected answer was not found
// within the ranking depth.
//
// Reference: Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::PathBuf,
};

/// One evaluated question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionOutcome {
    pub index:    usize,
    pub category: String,
    pub question: String,
    pub expected: String,
    pub result:   String,
    pub correct:  bool,
    /// 1-based rank of the first hit matching the expected answer
    pub rank:     Option<usize>,
}

/// Totals for a whole run
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub total:    usize,
    pub correct:  usize,
    /// Fraction of questions answered correctly at rank 1
    pub accuracy: f64,
    /// Mean reciprocal rank (0 for questions whose answer was not ranked)
    pub mrr:      f64,
}

impl EvaluationSummary {
    pub fn from_outcomes(outcomes: &[QuestionOutcome]) -> Self {
        let total   = outcomes.len();
        let correct = outcomes.iter().filter(|o| o.correct).count();
        let rr_sum: f64 = outcomes
            .iter()
            .filter_map(|o| o.rank)
            .map(|r| 1.0 / r as f64)
            .sum();
        if total == 0 {
            return Self::default();
        }
        Self {
            total,
            correct,
            accuracy: correct as f64 / total as f64,
            mrr:      rr_sum / total as f64,
        }
    }
}

/// Streams QuestionOutcomes into a CSV file.
pub struct EvaluationReport {
    path: PathBuf,
    out:  BufWriter<File>,
}

impl EvaluationReport {
    /// Create (truncate) the CSV and write the header row.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let file = File::create(&path)
            .with_context(|| format!("Cannot create report '{}'", path.display()))?;

        let mut out = BufWriter::new(file);
        writeln!(out, "index,category,question,expected,result,correct,rank")?;
        tracing::debug!("Created report CSV: '{}'", path.display());
        Ok(Self { path, out })
    }

    pub fn log(&mut self, o: &QuestionOutcome) -> Result<()> {
        writeln!(
            self.out,
            "{},{},{},{},{},{},{}",
            o.index,
            csv_field(&o.category),
            csv_field(&o.question),
            csv_field(&o.expected),
            csv_field(&o.result),
            o.correct,
            o.rank.map(|r| r.to_string()).unwrap_or_default(),
        )?;
        Ok(())
    }

    pub fn finish(mut self) -> Result<PathBuf> {
        self.out
            .flush()
            .with_context(|| format!("Cannot flush report '{}'", self.path.display()))?;
        Ok(self.path)
    }
}

/// Quote a field if it contains a comma, quote or line break.
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn outcome(index: usize, correct: bool, rank: Option<usize>) -> QuestionOutcome {
        QuestionOutcome {
            index,
            category: "CITIES".to_string(),
            question: "City of light, on the Seine".to_string(),
            expected: "Paris".to_string(),
            result:   if correct { "Paris" } else { "Lyon" }.to_string(),
            correct,
            rank,
        }
    }

    #[test]
    fn test_summary() {
        let outcomes = vec![
            outcome(1, true, Some(1)),
            outcome(2, false, Some(4)),
            outcome(3, false, None),
            outcome(4, false, Some(2)),
        ];
        let s = EvaluationSummary::from_outcomes(&outcomes);
        assert_eq!(s.total, 4);
        assert_eq!(s.correct, 1);
        assert!((s.accuracy - 0.25).abs() < 1e-9);
        // (1 + 0.25 + 0 + 0.5) / 4
        assert!((s.mrr - 0.4375).abs() < 1e-9);
    }

    #[test]
    fn test_empty_summary() {
        let s = EvaluationSummary::from_outcomes(&[]);
        assert_eq!(s.total, 0);
        assert_eq!(s.accuracy, 0.0);
        assert_eq!(s.mrr, 0.0);
    }

    #[test]
    fn test_csv_field_quoting() {
        assert_eq!(csv_field("plain"), "plain");
        assert_eq!(csv_field("a, b"), "\"a, b\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
    }

    #[test]
    fn test_writes_header_and_rows() {
        let tmp  = TempDir::new().unwrap();
        let path = tmp.path().join("out").join("report.csv");

        let mut w = EvaluationReport::create(&path).unwrap();
        w.log(&outcome(1, true, Some(1))).unwrap();
        w.log(&outcome(2, false, None)).unwrap();
        w.finish().unwrap();

        let text  = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "index,category,question,expected,result,correct,rank");
        assert_eq!(lines[1], "1,CITIES,\"City of light, on the Seine\",Paris,Paris,true,1");
        assert_eq!(lines[2], "2,CITIES,\"City of light, on the Seine\",Paris,Lyon,false,");
    }
}
