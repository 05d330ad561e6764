//! Interplayer CLI — interpreter for interplay documents.
//!
//! Walks a chain of interplay documents from an entry point, accumulates a
//! knowledge base of entries, and renders the final report when the
//! sentinel document is reached.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
