//! Handler functions for config CLI commands (`path`, `show`, `init`).

use std::path::{Path, PathBuf};

use mlindex_core::{Error, Result};

use crate::cli::ConfigAction;
use crate::config::{MlindexConfig, PROJECT_NAME};

// ============================================================================
// Command dispatch
// ============================================================================

/// Handle a config subcommand.
pub fn handle_config_command(config_path: Option<&Path>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Show => cmd_config_show(config_path),
        ConfigAction::Init { file, force } => cmd_config_init(file.as_deref(), force).map(|_| ()),
    }
}

// ============================================================================
// Command handlers
// ============================================================================

/// Show the resolved config file path.
pub fn cmd_config_path(config_path: Option<&Path>) -> Result<()> {
    match MlindexConfig::resolve_config_path(config_path) {
        Some(path) => {
            println!("{}", path.display());
            if !path.exists() {
                eprintln!("(file does not exist, run `{PROJECT_NAME} config init` to create it)");
            }
            Ok(())
        }
        None => Err(Error::config(
            "Could not determine config directory for this platform",
        )),
    }
}

/// Print the effective configuration.
pub fn cmd_config_show(config_path: Option<&Path>) -> Result<()> {
    let config = MlindexConfig::load(config_path)?;
    print!("{}", config.to_toml_string()?);
    println!("# store file: {}", config.store_path().display());
    Ok(())
}

/// Write the default configuration, returning the file written.
pub fn cmd_config_init(file: Option<&Path>, force: bool) -> Result<PathBuf> {
    let path = match file {
        Some(p) => p.to_path_buf(),
        None => MlindexConfig::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }

    let toml_str = MlindexConfig::default().to_toml_string()?;
    std::fs::write(&path, &toml_str).map_err(|e| Error::io_with_path(e, &path))?;

    println!("Config file created at {}", path.display());
    Ok(path)
}

// ============================================================================
// Tests
// ============================================================================
