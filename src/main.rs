mod application;
mod cli;
mod data;
mod domain;
mod infra;
mod search;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("wiki_trivia_qa=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    cli.run()
}
