//! mdloc - offset-exact localization for Markdown and MDX documents
//!
//! mdloc extracts the translatable text of a document as a list of changes
//! addressed by byte offsets, hands them to a translation service as a
//! payload, and patches the translated strings back into the original text.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (`extract`, `apply`, `init`)
//! - `config`: Configuration file loading and parsing
//! - `core`: Parsing, extraction, payload collection and patching

pub mod cli;
pub mod config;
pub mod core;
