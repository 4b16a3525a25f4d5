// ============================================================
// Layer 2 — EvaluateUseCase
// ============================================================
// Runs every question of the questions file against a built
// index and counts how often the top title is the answer:
//
//   Step 1: Open the index for this configuration  (Layer 5 - search)
//   Step 2: Read the 4-line question records       (Layer 4 - data)
//   Step 3: Per question: query → top hit → check  (Layer 3 - domain)
//   Step 4: Optional CSV report + summary          (Layer 6 - infra)
//
// Transcript written per question:
//
//   Expected answer: The Washington Post
//   Result answer: The Washington Post
//   CORRECT ANSWER
//
// and once at the end:
//
//   Total number of Hits: 61 out of 100
//
// Reference: Rust Book §12 (I/O), §13 (Iterators)

use anyhow::Result;
use std::{
    io::{self, Write},
    path::PathBuf,
};

use crate::application::ask_use_case::AskUseCase;
use crate::data::questions::QuestionReader;
use crate::domain::{config::HarnessConfig, matching::is_correct};
use crate::infra::report::{EvaluationReport, EvaluationSummary, QuestionOutcome};

/// How far down the ranking to look for the answer when computing MRR
pub const RANK_DEPTH: usize = 100;

pub struct EvaluateUseCase {
    config:      HarnessConfig,
    report_path: Option<PathBuf>,
}

impl EvaluateUseCase {
    pub fn new(config: HarnessConfig) -> Self {
        Self { config, report_path: None }
    }

    /// Also write one CSV row per question to `path`.
    pub fn with_report(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_path = Some(path.into());
        self
    }

    /// Evaluate, printing the transcript to stdout.
    pub fn execute(&self) -> Result<EvaluationSummary> {
        let stdout = io::stdout();
        self.execute_with(&mut stdout.lock())
    }

    pub fn execute_with<W: Write>(&self, out: &mut W) -> Result<EvaluationSummary> {
        // ── Step 1: Open the index ────────────────────────────────────────
        let ask  = AskUseCase::open(self.config.clone())?;
        let tier = ask.config().tier;

        // ── Step 2: Questions ─────────────────────────────────────────────
        let questions = QuestionReader::from_path(&self.config.questions_path)?;
        tracing::info!(
            "Evaluating {} questions from '{}'",
            questions.len(),
            self.config.questions_path
        );

        let mut report = match &self.report_path {
            Some(path) => Some(EvaluationReport::create(path)?),
            None       => None,
        };

        // ── Step 3: Ask each question ─────────────────────────────────────
        let mut outcomes = Vec::with_capacity(questions.len());
        for (i, question) in questions.iter().enumerate() {
            let (query, ranked) = ask.rank(question)?;
            let hit     = ranked.top_hit(&query, tier, ask.lemmatizer())?;
            let correct = is_correct(&question.answer, &hit);
            let rank    = ranked.answer_rank(
                &question.answer,
                &query,
                tier,
                ask.lemmatizer(),
                RANK_DEPTH,
            )?;

            writeln!(out, "Expected answer: {}", question.answer)?;
            writeln!(out, "Result answer: {}", hit)?;
            if correct {
                writeln!(out, "CORRECT ANSWER")?;
            }
            tracing::debug!("Q{} '{}' → {:?} (rank {:?})", i + 1, query, hit, rank);

            let outcome = QuestionOutcome {
                index:    i + 1,
                category: question.category.clone(),
                question: question.text.clone(),
                expected: question.answer.clone(),
                result:   hit.to_string(),
                correct,
                rank,
            };
            if let Some(report) = report.as_mut() {
                report.log(&outcome)?;
            }
            outcomes.push(outcome);
        }

        // ── Step 4: Summary ───────────────────────────────────────────────
        let summary = EvaluationSummary::from_outcomes(&outcomes);
        writeln!(out, "Total number of Hits: {} out of {}", summary.correct, summary.total)?;

        if let Some(report) = report {
            let path = report.finish()?;
            tracing::info!("Wrote report to '{}'", path.display());
        }
        tracing::info!(
            "accuracy {:.3}, MRR@{} {:.3}",
            summary.accuracy,
            RANK_DEPTH,
            summary.mrr
        );
        Ok(summary)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::index_use_case::IndexUseCase;
    use std::fs;
    use tempfile::TempDir;

    const DUMP: &str = "\
[[Paris]]
Paris is the capital of France and sits on the Seine river.
[[Lyon]]
Lyon is known for its festival of lights.
";

    const QUESTIONS: &str = "\
CAPITALS
This city on the Seine is the capital of France
Paris

FESTIVALS
Famous for its festival of lights
Lyon

VOLCANOES
Sicilian volcano
Etna
";

    fn setup(tmp: &TempDir) -> HarnessConfig {
        let data = tmp.path().join("data");
        fs::create_dir_all(&data).unwrap();
        fs::write(data.join("dump.txt"), DUMP).unwrap();
        let questions = tmp.path().join("questions.txt");
        fs::write(&questions, QUESTIONS).unwrap();

        let cfg = HarnessConfig {
            data_dir:       data.to_string_lossy().into_owned(),
            questions_path: questions.to_string_lossy().into_owned(),
            index_root:     tmp.path().to_string_lossy().into_owned(),
            ..HarnessConfig::default()
        };
        IndexUseCase::new(cfg.clone()).execute().unwrap();
        cfg
    }

    #[test]
    fn test_summary_and_transcript() {
        let tmp = TempDir::new().unwrap();
        let cfg = setup(&tmp);

        let mut out = Vec::new();
        let summary = EvaluateUseCase::new(cfg).execute_with(&mut out).unwrap();
        let text    = String::from_utf8(out).unwrap();

        assert_eq!(summary.total, 3);
        assert_eq!(summary.correct, 2);
        assert!((summary.mrr - 2.0 / 3.0).abs() < 1e-9);

        assert!(text.contains("Expected answer: Paris\nResult answer: Paris\nCORRECT ANSWER\n"));
        assert!(text.contains("Expected answer: Etna\nResult answer: NO HITS\n"));
        assert!(text.ends_with("Total number of Hits: 2 out of 3\n"));
    }

    #[test]
    fn test_writes_report() {
        let tmp    = TempDir::new().unwrap();
        let cfg    = setup(&tmp);
        let report = tmp.path().join("report.csv");

        EvaluateUseCase::new(cfg)
            .with_report(&report)
            .execute_with(&mut io::sink())
            .unwrap();

        let csv = fs::read_to_string(&report).unwrap();
        assert_eq!(csv.lines().count(), 4);
        assert!(csv.contains("3,VOLCANOES,Sicilian volcano,Etna,NO HITS,false,"));
    }

    #[test]
    fn test_missing_questions_file() {
        let tmp = TempDir::new().unwrap();
        let cfg = HarnessConfig {
            questions_path: tmp.path().join("none.txt").to_string_lossy().into_owned(),
            ..setup(&tmp)
        };
        let err = EvaluateUseCase::new(cfg).execute_with(&mut io::sink()).err().unwrap();
        assert!(format!("{:#}", err).contains("questions file"));
    }
}
