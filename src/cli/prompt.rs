// ============================================================
// Layer 1 — Interactive Prompts
// ============================================================
// The question-and-answer way of choosing a configuration:
//
//   Enter configuration (1 for good, 2 for better, 3 for best): 3
//   Configuration: BEST
//   Enter scoring function (1 for tfidf, 2 for bm25): 2
//   Scoring function: BM25
//   Analyzer type: ENGLISH            ← not asked at BEST
//   Should lemmatize terms? (1 for yes, 2 for no): 1
//   isLemmatized: true
//   Should provide adjusting for BM25? (1 for yes, 2 for no): 2
//   isTuned: false
//
// Any number other than the alternative keeps the default
// (entering 7 for the tier still means GOOD). Anything that is
// not a number is asked again.
//
// Generic over the reader/writer so tests can script a session.

use anyhow::{bail, Result};
use std::io::{BufRead, Write};

use crate::domain::config::{AnalyzerKind, HarnessConfig, ScoringFunction, Tier};

pub struct Prompter<R, W> {
    input:  R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask until the answer parses as a whole number.
    fn ask_number(&mut self, prompt: &str) -> Result<i64> {
        loop {
            write!(self.output, "{prompt}: ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                bail!("Input ended while waiting for: {prompt}");
            }
            match line.trim().parse::<i64>() {
                Ok(n)  => return Ok(n),
                Err(_) => writeln!(self.output, "Please enter a number.")?,
            }
        }
    }

    /// `1` means yes, anything else no
    pub fn confirm(&mut self, prompt: &str) -> Result<bool> {
        Ok(self.ask_number(&format!("{prompt} (1 for yes, 2 for no)"))? == 1)
    }

    /// Walk through the configuration prompts. Paths and top-N
    /// are taken from `base` unchanged.
    pub fn configure(&mut self, base: HarnessConfig) -> Result<HarnessConfig> {
        let mut cfg = base;

        cfg.tier = match self.ask_number("Enter configuration (1 for good, 2 for better, 3 for best)")? {
            2 => Tier::Better,
            3 => Tier::Best,
            _ => Tier::Good,
        };
        writeln!(self.output, "Configuration: {}", cfg.tier)?;

        cfg.scoring = match self.ask_number("Enter scoring function (1 for tfidf, 2 for bm25)")? {
            2 => ScoringFunction::Bm25,
            _ => ScoringFunction::TfIdf,
        };
        writeln!(self.output, "Scoring function: {}", cfg.scoring)?;

        cfg.analyzer = if cfg.tier == Tier::Best {
            AnalyzerKind::English
        } else {
            match self.ask_number("Enter analyzer type (1 for standard, 2 for whitespace)")? {
                2 => AnalyzerKind::Whitespace,
                _ => AnalyzerKind::Standard,
            }
        };
        writeln!(self.output, "Analyzer type: {}", cfg.analyzer)?;

        cfg.lemmatize = self.ask_number("Should lemmatize terms? (1 for yes, 2 for no)")? != 2;
        writeln!(self.output, "isLemmatized: {}", cfg.lemmatize)?;

        cfg.bm25_tuned = false;
        if cfg.scoring == ScoringFunction::Bm25 {
            cfg.bm25_tuned = self.confirm("Should provide adjusting for BM25?")?;
            writeln!(self.output, "isTuned: {}", cfg.bm25_tuned)?;
        }

        Ok(cfg.resolved())
    }

    /// Blank line between phases of the session
    pub fn newline(&mut self) -> Result<()> {
        writeln!(self.output)?;
        Ok(())
    }
}
