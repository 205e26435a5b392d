//! Scanner for JSX opening tags.
//!
//! The MDX tree does not record where attribute values sit in the source,
//! so the opening tag is re-read from the raw text to recover the span of
//! each literal value.

use crate::core::{position::Span, tree::Attribute};

/// Read the attributes of the opening tag starting at `start` (the `<`).
///
/// Literal values (`name="x"` / `name='x'`) get a span covering the text
/// between the quotes. Expression values (`name={x}`) have no value and no
/// span. Boolean attributes (`open`) get an empty literal without a span.
/// Spread attributes (`{...props}`) are skipped.
pub fn scan_attributes(source: &str, start: usize) -> Vec<Attribute> {
    let bytes = source.as_bytes();
    let mut attributes = Vec::new();

    if bytes.get(start) != Some(&b'<') {
        return attributes;
    }

    let mut pos = skip_name(bytes, start + 1);

    loop {
        pos = skip_whitespace(bytes, pos);
        match bytes.get(pos) {
            None | Some(b'>') => break,
            Some(b'/') if bytes.get(pos + 1) == Some(&b'>') => break,
            Some(b'{') => {
                pos = skip_braces(bytes, pos);
                continue;
            }
            _ => {}
        }

        let name_start = pos;
        pos = skip_name(bytes, pos);
        if pos == name_start {
            // Unexpected byte; stop rather than loop forever.
            break;
        }
        let name = &source[name_start..pos];

        pos = skip_whitespace(bytes, pos);
        if bytes.get(pos) != Some(&b'=') {
            attributes.push(Attribute {
                name: name.to_string(),
                value: Some(String::new()),
                span: None,
            });
            continue;
        }

        pos = skip_whitespace(bytes, pos + 1);
        match bytes.get(pos) {
            Some(&quote) if quote == b'"' || quote == b'\'' => {
                let value_start = pos + 1;
                let Some(offset) = bytes[value_start..].iter().position(|b| *b == quote) else {
                    break;
                };
                let value_end = value_start + offset;
                attributes.push(Attribute {
                    name: name.to_string(),
                    value: Some(source[value_start..value_end].to_string()),
                    span: Some(Span::new(value_start, value_end)),
                });
                pos = value_end + 1;
            }
            Some(b'{') => {
                attributes.push(Attribute {
                    name: name.to_string(),
                    value: None,
                    span: None,
                });
                pos = skip_braces(bytes, pos);
            }
            _ => break,
        }
    }

    attributes
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b':' | b'$') || b >= 0x80
}

fn skip_name(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && is_name_byte(bytes[pos]) {
        pos += 1;
    }
    pos
}

fn skip_whitespace(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && bytes[pos].is_ascii_whitespace() {
        pos += 1;
    }
    pos
}

/// Skip a balanced `{...}` group, honoring string literals inside it.
fn skip_braces(bytes: &[u8], mut pos: usize) -> usize {
    let mut depth = 0usize;
    let mut quote: Option<u8> = None;

    while pos < bytes.len() {
        let b = bytes[pos];
        match quote {
            Some(q) => {
                if b == b'\\' {
                    pos += 1;
                } else if b == q {
                    quote = None;
                }
            }
            None => match b {
                b'"' | b'\'' | b'`' => quote = Some(b),
                b'{' => depth += 1,
                b'}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return pos + 1;
                    }
                }
                _ => {}
            },
        }
        pos += 1;
    }
    pos
}
