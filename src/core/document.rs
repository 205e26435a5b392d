//! Per-document extraction pipeline.
//!
//! `parse → {frontmatter, references, content} → collect → validate`.
//! Documents share no state, so [`extract_documents`] runs them in parallel.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use log::debug;
use rayon::prelude::*;

use super::{
    collector::{collect_changes, validate_changes},
    error::ExtractError,
    extract::{ExtractOptions, extract_content, extract_references, extract_title},
    parsers::mdx::parse_document,
    position::Change,
    tree::Node,
};

/// Extract the ordered change list of one document.
pub fn extract_document(source: &str, options: &ExtractOptions) -> Result<Vec<Change>, ExtractError> {
    let mut root = parse_document(source)?;
    extract_from_tree(&mut root, source, options)
}

/// Extract from an already-built tree of `source`.
///
/// The content walk mutates `root` in place; drop it afterwards.
pub fn extract_from_tree(
    root: &mut Node,
    source: &str,
    options: &ExtractOptions,
) -> Result<Vec<Change>, ExtractError> {
    let titles = extract_title(root, source);
    let references = extract_references(root, options);
    let content = extract_content(root, options)?;

    debug!(
        "Extracted {} title, {} reference and {} content change(s)",
        titles.len(),
        references.len(),
        content.len()
    );

    let changes = collect_changes(titles, references, content);
    validate_changes(&changes, source)?;
    Ok(changes)
}

/// A document read from disk together with its extraction result.
pub struct DocumentExtraction {
    pub source: String,
    pub changes: Vec<Change>,
}

/// Read and extract every file, in parallel.
///
/// Results come back in the order of `paths`; a failure in one document
/// does not affect the others.
pub fn extract_documents(
    paths: &[PathBuf],
    options: &ExtractOptions,
) -> Vec<(PathBuf, Result<DocumentExtraction>)> {
    paths
        .par_iter()
        .map(|path| (path.clone(), extract_file(path, options)))
        .collect()
}

fn extract_file(path: &Path, options: &ExtractOptions) -> Result<DocumentExtraction> {
    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    let changes = extract_document(&source, options)
        .with_context(|| format!("Failed to extract {}", path.display()))?;
    debug!("{}: {} change(s)", path.display(), changes.len());

    Ok(DocumentExtraction {
        source,
        changes,
    })
}
