use std::{
    env, fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use log::debug;

use super::super::{
    args::ExtractCommand,
    exit_status::ExitStatus,
    report::{ExtractSummary, print_extract_summary, print_failure, print_written},
};
use crate::{
    config::{Config, load_config},
    core::{TranslationPayload, extract_documents, file_scanner::scan_files},
};

/// A document to extract and the name its payload is stored under.
struct Target {
    path: PathBuf,
    relative: PathBuf,
}

pub fn extract(cmd: ExtractCommand) -> Result<ExitStatus> {
    let cwd = env::current_dir().context("Failed to read current directory")?;
    let loaded = load_config(&cwd)?;
    let config = loaded.config;
    debug!("config loaded from file: {}", loaded.from_file);

    let source_root = cmd
        .source_root
        .clone()
        .unwrap_or_else(|| PathBuf::from(&config.source_root));
    let source_root = cwd.join(source_root);

    let explicit: Vec<PathBuf> = cmd.paths.iter().map(|p| cwd.join(p)).collect();
    let targets = collect_targets(&explicit, &source_root, &config);
    let single_file = explicit.len() == 1 && !explicit[0].is_dir();
    if cmd.output_dir.is_none() && !single_file {
        bail!(
            "--output-dir is required when extracting {} document(s); \
             only a single document path prints to stdout",
            targets.len()
        );
    }

    let mut options = config.extract_options();
    if let Some(locale) = cmd.default_locale {
        options.default_locale = locale;
    }

    let paths: Vec<PathBuf> = targets.iter().map(|t| t.path.clone()).collect();
    let results = extract_documents(&paths, &options);

    let mut summary = ExtractSummary {
        documents: targets.len(),
        ..Default::default()
    };

    for (target, (_, result)) in targets.iter().zip(results) {
        let extraction = match result {
            Ok(extraction) => extraction,
            Err(err) => {
                summary.failed += 1;
                print_failure(&target.relative, &err);
                continue;
            }
        };

        let strings = extraction.changes.len();
        summary.strings += strings;
        let json = TranslationPayload::new(extraction.changes)
            .to_json()
            .context("Failed to serialize payload")?;

        match &cmd.output_dir {
            Some(dir) => {
                let out = payload_path(dir, &target.relative);
                write_payload(&out, &json)?;
                print_written(&target.relative, &out, strings);
            }
            None => println!("{}", json),
        }
    }

    if cmd.output_dir.is_some() || summary.failed > 0 {
        print_extract_summary(&summary);
    }

    if summary.failed > 0 {
        Ok(ExitStatus::Failure)
    } else {
        Ok(ExitStatus::Success)
    }
}

/// Resolve explicit paths (files or directories) or scan the source root.
fn collect_targets(paths: &[PathBuf], source_root: &Path, config: &Config) -> Vec<Target> {
    let scan = |dir: &Path, includes: &[String]| {
        let result = scan_files(dir, includes, &config.ignores, &config.extensions);
        if result.skipped_count > 0 {
            debug!("{} path(s) could not be accessed", result.skipped_count);
        }
        result
            .files
            .into_iter()
            .map(|path| Target {
                relative: relative_to(&path, dir),
                path,
            })
            .collect::<Vec<_>>()
    };

    if paths.is_empty() {
        return scan(source_root, &config.includes);
    }

    let mut targets = Vec::new();
    for path in paths {
        if path.is_dir() {
            targets.extend(scan(path, &[]));
        } else {
            targets.push(Target {
                relative: relative_to(path, source_root),
                path: path.clone(),
            });
        }
    }
    targets
}

fn relative_to(path: &Path, base: &Path) -> PathBuf {
    path.strip_prefix(base)
        .map(Path::to_path_buf)
        .ok()
        .or_else(|| path.file_name().map(PathBuf::from))
        .unwrap_or_else(|| path.to_path_buf())
}

/// `<dir>/<relative>.json`, keeping the document extension so that
/// `a.md` and `a.mdx` do not collide.
fn payload_path(dir: &Path, relative: &Path) -> PathBuf {
    let mut name = relative.as_os_str().to_owned();
    name.push(".json");
    dir.join(name)
}

fn write_payload(path: &Path, json: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", json))
        .with_context(|| format!("Failed to write payload: {}", path.display()))
}
