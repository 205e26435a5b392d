//! Change collection and the translation payload envelope.
//!
//! The collector concatenates extractor outputs (frontmatter, references,
//! content, each in document order), checks that no two spans overlap, and
//! wraps the list for the translation service. The payload deserializes
//! back into changes so a translated copy can be patched in.

use serde::{Deserialize, Serialize};

use super::{
    error::ExtractError,
    position::{Change, Span},
};

/// Concatenate extractor results in their fixed order.
pub fn collect_changes(
    titles: Vec<Change>,
    references: Vec<Change>,
    content: Vec<Change>,
) -> Vec<Change> {
    let mut changes = Vec::with_capacity(titles.len() + references.len() + content.len());
    changes.extend(titles);
    changes.extend(references);
    changes.extend(content);
    changes
}

/// Check that every span addresses `source` and that no two spans overlap.
pub fn validate_changes(changes: &[Change], source: &str) -> Result<(), ExtractError> {
    for change in changes {
        if !change.span.fits(source) {
            return Err(ExtractError::SpanOutOfBounds {
                span: change.span,
                len: source.len(),
            });
        }
    }

    let mut spans: Vec<Span> = changes.iter().map(|c| c.span).collect();
    spans.sort();
    for pair in spans.windows(2) {
        if pair[0].overlaps(&pair[1]) {
            return Err(ExtractError::OverlappingChanges {
                first: pair[0],
                second: pair[1],
            });
        }
    }

    Ok(())
}

/// Where the service finds each field of a string entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatePath {
    pub path: String,
    pub key: String,
    pub instruction: String,
}

impl Default for TranslatePath {
    fn default() -> Self {
        Self {
            path: "/strings/*/text".to_string(),
            key: "/strings/*/key".to_string(),
            instruction: "/strings/*/notes".to_string(),
        }
    }
}

/// How lookup keys are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyGeneration {
    /// `"{start}-{end}"` of the extraction-time span.
    #[default]
    Offset,
}

impl KeyGeneration {
    pub fn key_for(&self, change: &Change) -> String {
        match self {
            KeyGeneration::Offset => format!("{}-{}", change.span.start, change.span.end),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayloadString {
    pub key: String,
    #[serde(flatten)]
    pub change: Change,
}

/// The document sent to (and returned by) the translation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationPayload {
    pub translate_paths: Vec<TranslatePath>,
    #[serde(default)]
    pub key_generation: KeyGeneration,
    #[serde(default = "default_variants_enabled")]
    pub variants_enabled: bool,
    pub strings: Vec<PayloadString>,
}

fn default_variants_enabled() -> bool {
    true
}

impl TranslationPayload {
    pub fn new(changes: Vec<Change>) -> Self {
        let key_generation = KeyGeneration::default();
        let strings = changes
            .into_iter()
            .map(|change| PayloadString {
                key: key_generation.key_for(&change),
                change,
            })
            .collect();
        Self {
            translate_paths: vec![TranslatePath::default()],
            key_generation,
            variants_enabled: default_variants_enabled(),
            strings,
        }
    }

    pub fn into_changes(self) -> Vec<Change> {
        self.strings.into_iter().map(|s| s.change).collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
