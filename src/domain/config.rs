// ============================================================
// Layer 3 — Run Configuration
// ============================================================
// Every knob a harness run can turn:
//
//   Tier             GOOD / BETTER / BEST
//                    GOOD   → question text only, CATEGORIES lines dropped
//                    BETTER → question + category, CATEGORIES lines indexed
//                    BEST   → BETTER + English analyzer + echo filtering
//   ScoringFunction  TFIDF / BM25 (optionally tuned)
//   AnalyzerKind     ENGLISH / STANDARD / WHITESPACE
//   lemmatize        run text through the lemmatizer before indexing
//
// The enums print in upper case because those names end up in
// the index directory, e.g. `index_STANDARD_GOOD_LEMMA`.
//
// Reference: Rust Book §6 (Enums), §10 (Traits: Display, FromStr)

use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf, str::FromStr};

// ─── Tier ─────────────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    #[default]
    Good,
    Better,
    Best,
}

impl Tier {
    /// BETTER and BEST append the category to the query text
    pub fn uses_category(self) -> bool {
        matches!(self, Tier::Better | Tier::Best)
    }

    /// Only GOOD throws away `CATEGORIES:` lines from the dump
    pub fn skips_category_lines(self) -> bool {
        self == Tier::Good
    }

    /// Only BEST skips hits whose title is echoed by the question
    pub fn filters_echoed_titles(self) -> bool {
        self == Tier::Best
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tier::Good   => "GOOD",
            Tier::Better => "BETTER",
            Tier::Best   => "BEST",
        })
    }
}

impl FromStr for Tier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "good" | "1"   => Ok(Tier::Good),
            "better" | "2" => Ok(Tier::Better),
            "best" | "3"   => Ok(Tier::Best),
            other => Err(format!("unknown tier '{other}' (expected good, better or best)")),
        }
    }
}

// ─── ScoringFunction ──────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoringFunction {
    #[default]
    TfIdf,
    Bm25,
}

impl fmt::Display for ScoringFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ScoringFunction::TfIdf => "TFIDF",
            ScoringFunction::Bm25  => "BM25",
        })
    }
}

impl FromStr for ScoringFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tfidf" | "tf-idf" | "1" => Ok(ScoringFunction::TfIdf),
            "bm25" | "2"             => Ok(ScoringFunction::Bm25),
            other => Err(format!("unknown scoring function '{other}' (expected tfidf or bm25)")),
        }
    }
}

// ─── AnalyzerKind ─────────────────────────────────────────────────────────────
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerKind {
    English,
    #[default]
    Standard,
    Whitespace,
}

impl AnalyzerKind {
    pub const ALL: [AnalyzerKind; 3] = [
        AnalyzerKind::English,
        AnalyzerKind::Standard,
        AnalyzerKind::Whitespace,
    ];
}

impl fmt::Display for AnalyzerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AnalyzerKind::English    => "ENGLISH",
            AnalyzerKind::Standard   => "STANDARD",
            AnalyzerKind::Whitespace => "WHITESPACE",
        })
    }
}

impl FromStr for AnalyzerKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english"    => Ok(AnalyzerKind::English),
            "standard"   => Ok(AnalyzerKind::Standard),
            "whitespace" => Ok(AnalyzerKind::Whitespace),
            other => Err(format!(
                "unknown analyzer '{other}' (expected english, standard or whitespace)"
            )),
        }
    }
}

// ─── HarnessConfig ────────────────────────────────────────────────────────────
// Everything a run needs. Built either from CLI flags or from
// the interactive prompts, then passed down to the use cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarnessConfig {
    pub tier:           Tier,
    pub scoring:        ScoringFunction,
    pub analyzer:       AnalyzerKind,
    pub lemmatize:      bool,
    pub bm25_tuned:     bool,
    pub data_dir:       String,
    pub questions_path: String,
    pub index_root:     String,
    pub top_n:          usize,
}

/// Hits requested per question before clamping to the corpus size
pub const DEFAULT_TOP_N: usize = 200_000;

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            tier:           Tier::Good,
            scoring:        ScoringFunction::TfIdf,
            analyzer:       AnalyzerKind::Standard,
            lemmatize:      true,
            bm25_tuned:     false,
            data_dir:       "data".to_string(),
            questions_path: "questions.txt".to_string(),
            index_root:     ".".to_string(),
            top_n:          DEFAULT_TOP_N,
        }
    }
}

impl HarnessConfig {
    /// Apply the cross-field rules:
    ///   - BEST always uses the English analyzer
    ///   - tuning only exists for BM25
    pub fn resolved(mut self) -> Self {
        if self.tier == Tier::Best {
            self.analyzer = AnalyzerKind::English;
        }
        if self.scoring != ScoringFunction::Bm25 {
            self.bm25_tuned = false;
        }
        self
    }

    /// `index_<ANALYZER>_<TIER>_<LEMMA|NOLEMMA>`
    pub fn index_dir_name(&self) -> String {
        let lemma = if self.lemmatize { "LEMMA" } else { "NOLEMMA" };
        format!("index_{}_{}_{}", self.analyzer, self.tier, lemma)
    }

    pub fn index_path(&self) -> PathBuf {
        PathBuf::from(&self.index_root).join(self.index_dir_name())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_dir_name() {
        let cfg = HarnessConfig::default();
        assert_eq!(cfg.index_dir_name(), "index_STANDARD_GOOD_LEMMA");

        let cfg = HarnessConfig {
            analyzer:  AnalyzerKind::Whitespace,
            tier:      Tier::Better,
            lemmatize: false,
            ..HarnessConfig::default()
        };
        assert_eq!(cfg.index_dir_name(), "index_WHITESPACE_BETTER_NOLEMMA");
    }

    #[test]
    fn test_best_forces_english() {
        let cfg = HarnessConfig {
            tier:     Tier::Best,
            analyzer: AnalyzerKind::Whitespace,
            ..HarnessConfig::default()
        }
        .resolved();
        assert_eq!(cfg.analyzer, AnalyzerKind::English);
        assert_eq!(cfg.index_dir_name(), "index_ENGLISH_BEST_LEMMA");
    }

    #[test]
    fn test_tuning_dropped_for_tfidf() {
        let cfg = HarnessConfig {
            scoring:    ScoringFunction::TfIdf,
            bm25_tuned: true,
            ..HarnessConfig::default()
        }
        .resolved();
        assert!(!cfg.bm25_tuned);
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("BEST".parse::<Tier>(), Ok(Tier::Best));
        assert_eq!("2".parse::<ScoringFunction>(), Ok(ScoringFunction::Bm25));
        assert_eq!("english".parse::<AnalyzerKind>(), Ok(AnalyzerKind::English));
        assert!("fancy".parse::<AnalyzerKind>().is_err());
    }

    #[test]
    fn test_index_path_joins_root() {
        let cfg = HarnessConfig {
            index_root: "indexes".to_string(),
            ..HarnessConfig::default()
        };
        assert_eq!(cfg.index_path(), PathBuf::from("indexes/index_STANDARD_GOOD_LEMMA"));
    }
}
