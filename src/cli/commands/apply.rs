use std::{
    fs,
    io::{self, Write},
};

use anyhow::{Context, Result};
use colored::Colorize;
use log::debug;

use super::super::{args::ApplyCommand, exit_status::ExitStatus, report::SUCCESS_MARK};
use crate::core::{Transform, TranslationPayload, apply_changes};

pub fn apply(cmd: ApplyCommand) -> Result<ExitStatus> {
    let source = fs::read_to_string(&cmd.document)
        .with_context(|| format!("Failed to read document: {}", cmd.document.display()))?;
    let json = fs::read_to_string(&cmd.payload)
        .with_context(|| format!("Failed to read payload: {}", cmd.payload.display()))?;
    let changes = TranslationPayload::from_json(&json)
        .with_context(|| format!("Invalid payload: {}", cmd.payload.display()))?
        .into_changes();

    let transform = if cmd.emphasize {
        Transform::Emphasize
    } else {
        Transform::Identity
    };
    debug!("applying {} change(s) with {:?}", changes.len(), transform);

    let patched = apply_changes(&source, &changes, transform).with_context(|| {
        format!(
            "Failed to apply {} to {}",
            cmd.payload.display(),
            cmd.document.display()
        )
    })?;

    match &cmd.output {
        Some(path) => {
            fs::write(path, &patched)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!(
                "{} {}",
                SUCCESS_MARK.green(),
                format!("Applied {} change(s) to {}", changes.len(), path.display()).green()
            );
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(patched.as_bytes())
                .context("Failed to write to stdout")?;
            stdout.flush()?;
        }
    }

    Ok(ExitStatus::Success)
}
