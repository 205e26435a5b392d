//! Extractors that turn a positioned tree into changes.
//!
//! - `frontmatter`: the metadata block's `title` field
//! - `references`: locale-bearing module sources in ESM blocks
//! - `content`: block-level prose (the tree walker)
//! - `serialize`: markdown reconstruction used by the walker

pub mod content;
pub mod frontmatter;
pub mod references;
pub mod serialize;

pub use content::extract_content;
pub use frontmatter::extract_title;
pub use references::extract_references;

use super::{locale::placeholder_token, tree::Node};

/// How a custom flow element is extracted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementVariant {
    /// Only the `title` attribute is extracted.
    CrossReference,
    /// The `title` attribute is extracted and each child is extracted on its own.
    Collapsible,
}

/// Settings shared by the extractors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Path segment replaced by the placeholder (e.g. `en`).
    pub default_locale: String,
    /// Placeholder variable name; rendered as `%%name%%`.
    pub placeholder: String,
    pub cross_reference_elements: Vec<String>,
    pub collapsible_elements: Vec<String>,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            default_locale: "en".to_string(),
            placeholder: "locale".to_string(),
            cross_reference_elements: vec!["Card".to_string()],
            collapsible_elements: vec!["Accordion".to_string(), "Expandable".to_string()],
        }
    }
}

impl ExtractOptions {
    pub fn token(&self) -> String {
        placeholder_token(&self.placeholder)
    }

    /// Variant of a JSX flow element, or `None` if it is not extracted.
    pub fn element_variant(&self, node: &Node) -> Option<ElementVariant> {
        let name = node.name.as_deref()?;
        if self.cross_reference_elements.iter().any(|e| e == name) {
            Some(ElementVariant::CrossReference)
        } else if self.collapsible_elements.iter().any(|e| e == name) {
            Some(ElementVariant::Collapsible)
        } else {
            None
        }
    }
}
