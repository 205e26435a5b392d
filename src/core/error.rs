//! Error types for extraction and patching.

use thiserror::Error;

use super::{position::Span, tree::NodeKind};

/// Errors that abort extraction for a whole document.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    /// The document could not be turned into a positioned tree.
    #[error("failed to parse document: {0}")]
    Parse(String),

    /// A content-bearing node has no position, so its offsets are unrecoverable.
    #[error("{kind} node has no source span")]
    MissingSpan { kind: NodeKind },

    /// Two extracted changes address overlapping bytes.
    #[error("extracted changes overlap: {first} and {second}")]
    OverlappingChanges { first: Span, second: Span },

    /// An extracted change lies outside the source text.
    #[error("extracted span {span} is outside a source of {len} bytes")]
    SpanOutOfBounds { span: Span, len: usize },
}

/// Errors from replaying a change list onto a text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// The span is empty, reversed, negative, past the end, or splits a character.
    #[error("invalid range ({start}, {end})")]
    InvalidRange { start: i64, end: i64 },

    /// Two changes address overlapping bytes.
    #[error("changes overlap: {first} and {second}")]
    Overlapping { first: Span, second: Span },
}

impl PatchError {
    pub(crate) fn invalid(span: Span) -> Self {
        PatchError::InvalidRange {
            start: span.start as i64,
            end: span.end as i64,
        }
    }
}
