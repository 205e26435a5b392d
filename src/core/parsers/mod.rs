//! Parsers that build the positioned tree from source text.
//!
//! This module provides:
//! - `mdx`: MDX/Markdown document parser (uses the `markdown` crate)
//! - `directive`: `:::name[label]` container scanner feeding `mdx`
//! - `esm`: ESM import/export block parser (uses swc for AST generation)
//! - `jsx_tag`: opening-tag scanner that recovers JSX attribute value spans

pub mod directive;
pub mod esm;
pub mod jsx_tag;
pub mod mdx;
