//! Patch applier: replays changes onto the original text.
//!
//! Changes are applied from the highest `start` to the lowest. Every
//! replacement only touches bytes at or after its own `start`, so the
//! prefix `[0, start)` of the working text is still pristine when the next
//! (lower) change is applied, and that change's extraction-time offsets
//! remain valid even when earlier replacements changed length.

use std::borrow::Cow;

use super::{error::PatchError, position::Change};

/// Text transform applied to each replacement before substitution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Transform {
    #[default]
    Identity,
    /// Uppercase and mark replacements so they stand out when reviewing output.
    Emphasize,
}

impl Transform {
    pub fn apply<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self {
            Transform::Identity => Cow::Borrowed(text),
            Transform::Emphasize => Cow::Owned(format!("«{}»", text.to_uppercase())),
        }
    }
}

/// Apply `changes` to `source` with one of the built-in transforms.
pub fn apply_changes(
    source: &str,
    changes: &[Change],
    transform: Transform,
) -> Result<String, PatchError> {
    apply_changes_with(source, changes, |text| transform.apply(text))
}

/// Apply `changes` to `source`, passing each replacement through `transform`.
///
/// Every span is validated before anything is substituted; on error the
/// source is left as-is and no output is produced.
pub fn apply_changes_with<'c, F>(
    source: &str,
    changes: &'c [Change],
    transform: F,
) -> Result<String, PatchError>
where
    F: Fn(&'c str) -> Cow<'c, str>,
{
    for change in changes {
        if !change.span.fits(source) {
            return Err(PatchError::invalid(change.span));
        }
    }

    let mut ordered: Vec<&Change> = changes.iter().collect();
    ordered.sort_by(|a, b| b.span.start.cmp(&a.span.start));

    for pair in ordered.windows(2) {
        let (higher, lower) = (pair[0].span, pair[1].span);
        if lower.overlaps(&higher) {
            return Err(PatchError::Overlapping {
                first: lower,
                second: higher,
            });
        }
    }

    let mut result = source.to_string();
    for change in ordered {
        let replacement = transform(&change.text);
        result.replace_range(change.span.start..change.span.end, &replacement);
    }

    Ok(result)
}
