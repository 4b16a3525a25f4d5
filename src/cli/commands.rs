// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Subcommands:
//   interactive — prompt for every setting (also the default
//                 when no subcommand is given)
//   index       — build the index for a configuration
//   evaluate    — run questions.txt against a built index
//   ask         — answer one question from the command line
//
// index / evaluate / ask share the same configuration flags
// through ConfigArgs, flattened into each command.
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::domain::config::{
    AnalyzerKind, HarnessConfig, ScoringFunction, Tier, DEFAULT_TOP_N,
};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Choose the configuration through prompts, then index and/or evaluate
    Interactive(PathArgs),

    /// Build the index for a configuration
    Index(IndexArgs),

    /// Score the questions file against a built index
    Evaluate(EvaluateArgs),

    /// Ask a single question against a built index
    Ask(AskArgs),
}

/// Where data, questions and indexes live
#[derive(Args, Debug, Clone)]
pub struct PathArgs {
    /// Directory holding the wiki dump files
    #[arg(long, default_value = "data")]
    pub data_dir: String,

    /// Questions file (4-line records)
    #[arg(long, default_value = "questions.txt")]
    pub questions: String,

    /// Directory the index_<ANALYZER>_<TIER>_<LEMMA|NOLEMMA> folders go in
    #[arg(long, default_value = ".")]
    pub index_root: String,

    /// Hits requested per question (clamped to the corpus size)
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    pub top_n: usize,
}

impl Default for PathArgs {
    fn default() -> Self {
        let cfg = HarnessConfig::default();
        Self {
            data_dir:   cfg.data_dir,
            questions:  cfg.questions_path,
            index_root: cfg.index_root,
            top_n:      cfg.top_n,
        }
    }
}

/// The full configuration as flags
#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    /// good, better or best
    #[arg(long, default_value = "good")]
    pub tier: Tier,

    /// tfidf or bm25
    #[arg(long, default_value = "tfidf")]
    pub scoring: ScoringFunction,

    /// standard, whitespace or english (best always uses english)
    #[arg(long, default_value = "standard")]
    pub analyzer: AnalyzerKind,

    /// Index and query the raw text instead of lemmas
    #[arg(long)]
    pub no_lemmatize: bool,

    /// Use the adjusted BM25 parameters (k1 = 1.5, b = 0.1)
    #[arg(long)]
    pub tuned: bool,

    #[command(flatten)]
    pub paths: PathArgs,
}

impl From<ConfigArgs> for HarnessConfig {
    fn from(a: ConfigArgs) -> Self {
        HarnessConfig {
            tier:           a.tier,
            scoring:        a.scoring,
            analyzer:       a.analyzer,
            lemmatize:      !a.no_lemmatize,
            bm25_tuned:     a.tuned,
            ..HarnessConfig::from(a.paths)
        }
        .resolved()
    }
}

impl From<PathArgs> for HarnessConfig {
    fn from(a: PathArgs) -> Self {
        HarnessConfig {
            data_dir:       a.data_dir,
            questions_path: a.questions,
            index_root:     a.index_root,
            top_n:          a.top_n,
            ..HarnessConfig::default()
        }
    }
}

#[derive(Args, Debug)]
pub struct IndexArgs {
    #[command(flatten)]
    pub config: ConfigArgs,
}

#[derive(Args, Debug)]
pub struct EvaluateArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Write per-question results to this CSV file
    #[arg(long)]
    pub report: Option<String>,
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// The clue text
    #[arg(long)]
    pub question: String,

    /// Category line (used at the better and best tiers)
    #[arg(long, default_value = "")]
    pub category: String,

    /// Also list this many ranked titles with their scores
    #[arg(long, default_value_t = 0)]
    pub show: usize,

    #[command(flatten)]
    pub config: ConfigArgs,
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    fn parse(args: &[&str]) -> Commands {
        Cli::try_parse_from(args.iter().copied()).unwrap().command.unwrap()
    }

    #[test]
    fn test_index_flags() {
        let cmd = parse(&[
            "wiki-trivia-qa", "index", "--tier", "better", "--analyzer", "whitespace",
            "--no-lemmatize", "--data-dir", "dump",
        ]);
        let Commands::Index(args) = cmd else { panic!("expected index") };
        let cfg = HarnessConfig::from(args.config);
        assert_eq!(cfg.tier, Tier::Better);
        assert_eq!(cfg.analyzer, AnalyzerKind::Whitespace);
        assert!(!cfg.lemmatize);
        assert_eq!(cfg.data_dir, "dump");
        assert_eq!(cfg.index_dir_name(), "index_WHITESPACE_BETTER_NOLEMMA");
    }

    #[test]
    fn test_best_overrides_analyzer_flag() {
        let Commands::Evaluate(args) = parse(&["wiki-trivia-qa", "evaluate", "--tier", "best"]) else {
            panic!("expected evaluate")
        };
        let cfg = HarnessConfig::from(args.config);
        assert_eq!(cfg.analyzer, AnalyzerKind::English);
        assert_eq!(args.report, None);
    }

    #[test]
    fn test_tuned_needs_bm25() {
        let Commands::Evaluate(args) = parse(&["wiki-trivia-qa", "evaluate", "--tuned"]) else {
            panic!("expected evaluate")
        };
        assert!(!HarnessConfig::from(args.config).bm25_tuned);

        let Commands::Evaluate(args) =
            parse(&["wiki-trivia-qa", "evaluate", "--tuned", "--scoring", "bm25"])
        else {
            panic!("expected evaluate")
        };
        assert!(HarnessConfig::from(args.config).bm25_tuned);
    }

    #[test]
    fn test_unknown_tier_rejected() {
        assert!(Cli::try_parse_from(["wiki-trivia-qa", "index", "--tier", "great"]).is_err());
    }

    #[test]
    fn test_no_subcommand() {
        let cli = Cli::try_parse_from(["wiki-trivia-qa"]).unwrap();
        assert!(cli.command.is_none());
    }
}
