//! # mlindex-cli
//!
//! Command-line front end for mlindex:
//! - inspect the active languages and localized field names
//! - compute the index plan of a resource (dry run)
//! - apply it to a JSON record store and list stored records
//! - manage the configuration file

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod logging;

use anyhow::{Context, Result};

pub use cli::{Cli, Command, ConfigAction, ResourceInput};
pub use config::{MlindexConfig, StoreConfig};

/// Run a parsed command line.
pub async fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();

    let output = match cli.command {
        Command::Config { action } => {
            config_handlers::handle_config_command(config_path, action)?;
            return Ok(());
        }
        Command::Languages { field } => {
            let config = load_config(config_path)?;
            commands::cmd_languages(&config, field.as_deref())?
        }
        Command::Plan { input, json } => {
            let config = load_config(config_path)?;
            commands::cmd_plan(&config, &input, json)?
        }
        Command::Update { input, store } => {
            let config = load_config(config_path)?;
            commands::cmd_update(&config, &input, store.as_deref()).await?
        }
        Command::Records {
            resource,
            store,
            json,
        } => {
            let config = load_config(config_path)?;
            commands::cmd_records(&config, &resource, store.as_deref(), json).await?
        }
    };

    print!("{output}");
    Ok(())
}

fn load_config(config_path: Option<&std::path::Path>) -> Result<MlindexConfig> {
    MlindexConfig::load(config_path).context("Failed to load configuration")
}
