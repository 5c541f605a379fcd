//! Command-line argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// mlindex - multilingual full-text index computation
#[derive(Parser, Debug)]
#[command(name = "mlindex")]
#[command(author, version, about = "Compute and apply multilingual search-index records", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "MLINDEX_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// List the active languages
    Languages {
        /// Also show the localized field name of this field per language
        #[arg(long)]
        field: Option<String>,
    },

    /// Compute the index writes for a resource without applying them
    Plan {
        #[command(flatten)]
        input: ResourceInput,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Recompute the index records of a resource and write them to the store
    Update {
        #[command(flatten)]
        input: ResourceInput,

        /// Record store file (overrides `store.path`)
        #[arg(long)]
        store: Option<PathBuf>,
    },

    /// List the stored index records of a resource
    Records {
        /// Resource identifier
        #[arg(short, long)]
        resource: String,

        /// Record store file (overrides `store.path`)
        #[arg(long)]
        store: Option<PathBuf>,

        /// Print the records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Configuration file management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// The metadata of one resource.
#[derive(Args, Debug, Clone)]
pub struct ResourceInput {
    /// Resource identifier
    #[arg(short, long)]
    pub resource: String,

    /// Metadata schema (JSON)
    #[arg(short, long)]
    pub schema: PathBuf,

    /// Metadata instance (JSON)
    #[arg(short, long)]
    pub instance: PathBuf,
}

/// `config` subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show the resolved config file path
    Path,

    /// Print the effective configuration as TOML
    Show,

    /// Write a default configuration file
    Init {
        /// Target file (defaults to the platform config directory)
        #[arg(long)]
        file: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
