//! Frontmatter title extraction.

use std::sync::LazyLock;

use regex::Regex;

use crate::core::{
    position::{Change, ChangeKind, Span},
    tree::{Node, NodeKind},
};

/// Opening fence line, either `---\n` or `---\r\n`.
static OPENING_FENCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^---[ \t]*\r?\n").unwrap());

/// A top-level `title:` line. A bare value stops before a ` #` comment.
static TITLE_FIELD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?m)^title:[ \t]*(?:"([^"\r\n]*)"|'([^'\r\n]*)'|([^ \t\r\n#][^\r\n]*?))?[ \t]*(?:[ \t]#[^\r\n]*)?\r?$"#,
    )
    .unwrap()
});

/// Extract the `title` field of the leading metadata block.
///
/// Returns an empty list when there is no metadata block, no `title`
/// field, or the title is empty.
pub fn extract_title(root: &Node, source: &str) -> Vec<Change> {
    let Some(block) = root
        .children
        .iter()
        .find(|child| child.kind == NodeKind::Frontmatter)
    else {
        return Vec::new();
    };
    let Some(block_span) = block.span else {
        return Vec::new();
    };

    let Some(block_source) = block_span.slice(source) else {
        return Vec::new();
    };
    let Some(fence) = OPENING_FENCE.find(block_source) else {
        return Vec::new();
    };
    let Some(captures) = TITLE_FIELD.captures(&block_source[fence.end()..]) else {
        return Vec::new();
    };
    let Some(value) = captures
        .get(1)
        .or_else(|| captures.get(2))
        .or_else(|| captures.get(3))
    else {
        return Vec::new();
    };
    if value.as_str().is_empty() {
        return Vec::new();
    }

    let offset = block_span.start + fence.end();
    let span = Span::new(offset + value.start(), offset + value.end());

    vec![Change::new(ChangeKind::Title, value.as_str(), span).with_notes("frontmatter title")]
}
