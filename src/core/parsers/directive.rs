//! Container directive scanner.
//!
//! The mdast parser has no directive construct, so `:::name[label]{attrs}`
//! … `:::` containers are located here before parsing. Only fences starting
//! at column 0 are recognized; fences inside fenced code are ignored. A
//! closing fence needs at least as many colons as its opener, and nested
//! openers are balanced by depth.

use std::{ops::Range, sync::LazyLock};

use regex::Regex;

use crate::core::{error::ExtractError, position::Span};

static OPENING_FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(:{3,})([A-Za-z][\w-]*)(\[[^\]\r\n]*\])?(?:\{[^}\r\n]*\})?[ \t]*\r?\n?$").unwrap()
});

static CLOSING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(:{3,})[ \t]*\r?\n?$").unwrap());

/// A fenced container directive located in the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveRegion {
    pub name: String,
    /// Opening fence through closing fence, line ending excluded.
    pub span: Span,
    /// `[label]`, brackets included.
    pub label: Option<Span>,
    /// The lines between the fences.
    pub body: Range<usize>,
}

/// List the outermost directive containers whose fences lie in `range`.
pub fn scan_directives(source: &str, range: Range<usize>) -> Vec<DirectiveRegion> {
    let lines = lines(source, range);
    let mut regions = Vec::new();
    let mut code_fence = None;
    let mut i = 0;

    while i < lines.len() {
        let (start, line) = lines[i];
        i += 1;
        if toggle_code_fence(&mut code_fence, line) || code_fence.is_some() {
            continue;
        }
        let Some(caps) = OPENING_FENCE.captures(line) else {
            continue;
        };
        let Some(close) = find_closing_fence(&lines[i..], caps[1].len()) else {
            continue;
        };

        let (close_start, close_line) = lines[i + close];
        let close_end = close_start + close_line.trim_end_matches(['\r', '\n']).len();
        regions.push(DirectiveRegion {
            name: caps[2].to_string(),
            span: Span::new(start, close_end),
            label: caps
                .get(3)
                .map(|m| Span::new(start + m.start(), start + m.end())),
            body: start + line.len()..close_start,
        });
        i += close + 1;
    }

    regions
}

/// Copy of `source` where every byte outside `keep`, or inside one of
/// `holes`, is blanked to a space. Line feeds are kept, so the copy has the
/// same byte offsets and line structure as `source`.
pub fn blank_outside(
    source: &str,
    keep: Range<usize>,
    holes: &[Span],
) -> Result<String, ExtractError> {
    let bytes = source
        .bytes()
        .enumerate()
        .map(|(i, byte)| {
            let kept = keep.contains(&i) && !holes.iter().any(|h| h.start <= i && i < h.end);
            if kept || byte == b'\n' { byte } else { b' ' }
        })
        .collect();
    String::from_utf8(bytes).map_err(|e| ExtractError::Parse(e.to_string()))
}

fn lines(source: &str, range: Range<usize>) -> Vec<(usize, &str)> {
    let mut offset = range.start;
    source
        .get(range)
        .unwrap_or_default()
        .split_inclusive('\n')
        .map(|line| {
            let start = offset;
            offset += line.len();
            (start, line)
        })
        .collect()
}

fn find_closing_fence(lines: &[(usize, &str)], colons: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut code_fence = None;

    for (index, (_, line)) in lines.iter().enumerate() {
        if toggle_code_fence(&mut code_fence, line) || code_fence.is_some() {
            continue;
        }
        if OPENING_FENCE.is_match(line) {
            depth += 1;
        } else if let Some(caps) = CLOSING_FENCE.captures(line) {
            if depth > 0 {
                depth -= 1;
            } else if caps[1].len() >= colons {
                return Some(index);
            }
        }
    }
    None
}

/// Track fenced code blocks. Returns true if `line` opens or closes one.
fn toggle_code_fence(fence: &mut Option<char>, line: &str) -> bool {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > 3 {
        return false;
    }
    let marker = if trimmed.starts_with("```") {
        '`'
    } else if trimmed.starts_with("~~~") {
        '~'
    } else {
        return false;
    };

    match *fence {
        None => *fence = Some(marker),
        Some(open) if open == marker => *fence = None,
        Some(_) => return false,
    }
    true
}
