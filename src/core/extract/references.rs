//! Locale-bearing module references in top-level ESM blocks.

use log::warn;

use super::ExtractOptions;
use crate::core::{
    locale::localize_path,
    parsers::esm::parse_module_sources,
    position::{Change, ChangeKind, Span},
    tree::{Node, NodeKind},
};

/// Rewrite module source paths that contain the default locale segment.
///
/// Each emitted change spans the path between the literal's quotes and
/// carries the rewritten path (e.g. `/snippets/%%locale%%/intro.mdx`).
/// Sources without the locale segment produce nothing.
pub fn extract_references(root: &Node, options: &ExtractOptions) -> Vec<Change> {
    let token = options.token();
    let mut changes = Vec::new();

    for node in root.children.iter().filter(|n| n.kind == NodeKind::Esm) {
        let Some(block_span) = node.span else {
            warn!("Skipping ESM block without a source span");
            continue;
        };
        let code = node.value_or_empty();
        // Offsets inside the block map 1:1 onto the document only if the
        // value is the verbatim slice.
        if code.len() != block_span.len() {
            warn!(
                "Skipping ESM block at {}: value does not match its span",
                block_span
            );
            continue;
        }

        let sources = match parse_module_sources(code) {
            Ok(sources) => sources,
            Err(e) => {
                warn!("Skipping ESM block at {}: {}", block_span, e);
                continue;
            }
        };

        for source in sources {
            let rewritten = localize_path(&source.value, &options.default_locale, &token);
            if rewritten == source.value {
                continue;
            }
            let span = Span::new(
                block_span.start + source.span.start,
                block_span.start + source.span.end,
            );
            changes.push(
                Change::new(ChangeKind::Reference, rewritten, span)
                    .with_notes(source.statement.describe()),
            );
        }
    }

    changes
}
