//! mlindex CLI
//!
//! Multilingual full-text index computation for metadata resources.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;
use mlindex_cli::{Cli, logging};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    tracing::debug!(command = ?cli.command, "Starting mlindex");
    mlindex_cli::run(cli).await
}
