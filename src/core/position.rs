//! Offset primitives and the extracted change record.
//!
//! All offsets are UTF-8 byte offsets into the original document source,
//! matching both the tree adapter's positions and Rust `str` slicing.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::PatchError;

/// Half-open byte range `[start, end)` into a source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawSpan")]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// True if the two ranges share at least one byte.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Whether this span can address a slice of `text`.
    pub fn fits(&self, text: &str) -> bool {
        self.start < self.end
            && self.end <= text.len()
            && text.is_char_boundary(self.start)
            && text.is_char_boundary(self.end)
    }

    /// Borrow the addressed slice, or `None` if the span does not fit.
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        if self.fits(text) {
            Some(&text[self.start..self.end])
        } else {
            None
        }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.start, self.end)
    }
}

/// Wire form of a span. Payloads come back from outside tools, so offsets
/// are read signed and checked before they become a [`Span`].
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct RawSpan {
    pub start: i64,
    pub end: i64,
}

impl TryFrom<RawSpan> for Span {
    type Error = PatchError;

    fn try_from(raw: RawSpan) -> Result<Self, Self::Error> {
        if raw.start < 0 || raw.start >= raw.end {
            return Err(PatchError::InvalidRange {
                start: raw.start,
                end: raw.end,
            });
        }
        Ok(Span::new(raw.start as usize, raw.end as usize))
    }
}

/// What an extracted change addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// A title value: the frontmatter `title` field or a `title` attribute.
    /// `text` is the literal source slice.
    Title,
    /// A module source path rewritten with the locale placeholder.
    Reference,
    /// The inline label of a directive container (reconstructed).
    DirectiveLabel,
    /// A block of prose (reconstructed).
    ContentBlock,
}

impl ChangeKind {
    /// Kinds whose span covers a single source literal, so writing the
    /// slice back over it leaves the document unchanged.
    pub fn is_literal(&self) -> bool {
        matches!(self, ChangeKind::Title | ChangeKind::Reference)
    }
}

impl fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChangeKind::Title => write!(f, "title"),
            ChangeKind::Reference => write!(f, "reference"),
            ChangeKind::DirectiveLabel => write!(f, "directive-label"),
            ChangeKind::ContentBlock => write!(f, "content-block"),
        }
    }
}

/// One localizable unit of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub kind: ChangeKind,
    pub text: String,
    pub span: Span,
    #[serde(default)]
    pub notes: String,
}

impl Change {
    pub fn new(kind: ChangeKind, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            text: text.into(),
            span,
            notes: String::new(),
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}
