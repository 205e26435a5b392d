use std::{env, fs, path::Path};

use anyhow::{Context, Result};
use colored::Colorize;

use super::super::{exit_status::ExitStatus, report::SUCCESS_MARK};
use crate::config::{CONFIG_FILE_NAME, default_config_json, find_config_file};

/// Write the default `.mdlocrc.json` into the current directory.
pub fn init() -> Result<ExitStatus> {
    let config_path = Path::new(CONFIG_FILE_NAME);

    if config_path.exists() {
        eprintln!("Error: {} already exists", CONFIG_FILE_NAME);
        return Ok(ExitStatus::Failure);
    }

    let cwd = env::current_dir().context("Failed to read current directory")?;
    let shadowed = if cwd.join(".git").exists() {
        None
    } else {
        cwd.parent().and_then(find_config_file)
    };

    fs::write(config_path, default_config_json()?)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;
    println!(
        "{} {}",
        SUCCESS_MARK.green(),
        format!("Created {}", CONFIG_FILE_NAME).green()
    );
    if let Some(parent_config) = shadowed {
        println!(
            "{} {} is no longer used from this directory",
            "note:".bold(),
            parent_config.display()
        );
    }

    Ok(ExitStatus::Success)
}
