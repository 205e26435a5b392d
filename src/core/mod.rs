//! Core localization engine.
//!
//! Extraction runs in three steps over a positioned document tree:
//!
//! 1. **Parse**: `parsers::mdx` builds a [`tree::Node`] tree with byte spans
//! 2. **Extract**: `extract::{frontmatter, references, content}` emit changes
//! 3. **Collect**: `collector` orders and validates them and builds the payload
//!
//! `patch` replays a (translated) change list onto the original text.

pub mod collector;
pub mod document;
pub mod error;
pub mod extract;
pub mod file_scanner;
pub mod locale;
pub mod parsers;
pub mod patch;
pub mod position;
pub mod tree;

pub use collector::TranslationPayload;
pub use document::{DocumentExtraction, extract_document, extract_documents};
pub use error::{ExtractError, PatchError};
pub use extract::ExtractOptions;
pub use patch::{Transform, apply_changes};
pub use position::{Change, ChangeKind, Span};
pub use tree::{Node, NodeKind};
