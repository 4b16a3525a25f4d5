// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction. Parses arguments with
// clap, prints results, and hands the work to Layer 2.
//
//   wiki-trivia-qa                     interactive prompts
//   wiki-trivia-qa interactive         same, with custom paths
//   wiki-trivia-qa index    [flags]    build one index
//   wiki-trivia-qa evaluate [flags]    score questions.txt
//   wiki-trivia-qa ask --question ...  answer one clue
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;
pub mod prompt;

use anyhow::Result;
use clap::Parser;
use std::io;

use crate::application::{
    ask_use_case::AskUseCase,
    evaluate_use_case::EvaluateUseCase,
    index_use_case::IndexUseCase,
};
use crate::domain::config::HarnessConfig;
use commands::{AskArgs, Commands, EvaluateArgs, IndexArgs, PathArgs};
use prompt::Prompter;

#[derive(Parser, Debug)]
#[command(
    name = "wiki-trivia-qa",
    version = "0.1.0",
    about = "Index a wiki dump and check how often the top-ranked title answers a trivia clue."
)]
pub struct Cli {
    /// Without a subcommand the interactive prompts run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            None                              => run_interactive(PathArgs::default()),
            Some(Commands::Interactive(args)) => run_interactive(args),
            Some(Commands::Index(args))       => run_index(args),
            Some(Commands::Evaluate(args))    => run_evaluate(args),
            Some(Commands::Ask(args))         => run_ask(args),
        }
    }
}

fn run_interactive(paths: PathArgs) -> Result<()> {
    let stdin  = io::stdin();
    let stdout = io::stdout();
    let mut prompter = Prompter::new(stdin.lock(), stdout.lock());

    let config = prompter.configure(HarnessConfig::from(paths))?;

    if prompter.confirm("Should index data?")? {
        index(config.clone())?;
    }
    prompter.newline()?;

    if prompter.confirm("Begin search using questions.txt?")? {
        EvaluateUseCase::new(config).execute()?;
    }
    prompter.newline()
}

fn run_index(args: IndexArgs) -> Result<()> {
    index(args.config.into())
}

fn index(config: HarnessConfig) -> Result<()> {
    let use_case = IndexUseCase::new(config);
    println!("Indexing to: {}/", use_case.index_path().display());

    let stats = use_case.execute()?;
    tracing::info!("{} documents written to '{}'", stats.documents, stats.path.display());
    println!("{} milliseconds.", stats.millis);
    Ok(())
}

fn run_evaluate(args: EvaluateArgs) -> Result<()> {
    let mut use_case = EvaluateUseCase::new(args.config.into());
    if let Some(path) = args.report {
        use_case = use_case.with_report(path);
    }

    let summary = use_case.execute()?;
    println!(
        "Accuracy: {:.1}%  MRR: {:.3}",
        summary.accuracy * 100.0,
        summary.mrr
    );
    Ok(())
}

fn run_ask(args: AskArgs) -> Result<()> {
    let use_case = AskUseCase::open(args.config.into())?;

    let hit = use_case.answer(&args.category, &args.question)?;
    println!("Answer: {}", hit);

    if args.show > 0 {
        for (i, c) in use_case
            .candidates(&args.category, &args.question, args.show)?
            .iter()
            .enumerate()
        {
            println!("{:>3}. {:<40} {:.4}", i + 1, c.title, c.score);
        }
    }
    Ok(())
}
