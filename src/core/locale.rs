//! Locale placeholder substitution for paths and URLs.

/// Format a placeholder token: `%%name%%`.
pub fn placeholder_token(name: &str) -> String {
    format!("%%{}%%", name)
}

/// Replace every path segment equal to `locale` with `token`.
///
/// Only the path part is considered; anything from the first `?` or `#`
/// onwards is kept as-is. Returns the input unchanged when no segment
/// matches.
pub fn localize_path(target: &str, locale: &str, token: &str) -> String {
    if locale.is_empty() {
        return target.to_string();
    }

    let path_end = target.find(['?', '#']).unwrap_or(target.len());
    let (path, suffix) = target.split_at(path_end);

    let segments: Vec<&str> = path
        .split('/')
        .map(|segment| if segment == locale { token } else { segment })
        .collect();

    let mut localized = segments.join("/");
    localized.push_str(suffix);
    localized
}
