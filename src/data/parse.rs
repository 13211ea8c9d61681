use std::collections::BTreeSet;

use super::model::GenreSet;

// ---------------------------------------------------------------------------
// Multi-valued cells
// ---------------------------------------------------------------------------

/// A cell that logically holds a list of values.
///
/// Raw text may use either encoding found in the movie data:
/// * a list literal: `['Action', 'Science Fiction']`
/// * a comma-separated string: `Action, Science Fiction`
/// * a semicolon-separated string: `US; UK; FR`
///
/// Values that are already structured (a list or a set) are only trimmed, so
/// parsing a parsed value again is a no-op.
pub trait MultiValued {
    fn values(&self) -> Vec<String>;
}

impl MultiValued for str {
    fn values(&self) -> Vec<String> {
        parse_multi_valued(self)
    }
}

impl MultiValued for String {
    fn values(&self) -> Vec<String> {
        parse_multi_valued(self)
    }
}

impl MultiValued for [String] {
    fn values(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.len());
        for v in self {
            push_trimmed(&mut out, v);
        }
        out
    }
}

impl MultiValued for Vec<String> {
    fn values(&self) -> Vec<String> {
        self.as_slice().values()
    }
}

impl MultiValued for BTreeSet<String> {
    fn values(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.len());
        for v in self {
            push_trimmed(&mut out, v);
        }
        out
    }
}

/// Normalize any multi-valued representation into a genre set.
pub fn parse_genres<T: MultiValued + ?Sized>(value: &T) -> GenreSet {
    value.values().into_iter().collect()
}

/// Split a raw cell into trimmed, non-empty values, keeping their order.
pub fn parse_multi_valued(raw: &str) -> Vec<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    if trimmed.starts_with('[') {
        return parse_list_literal(trimmed);
    }
    let mut out = Vec::new();
    for token in trimmed.split([',', ';']) {
        push_trimmed(&mut out, token);
    }
    out
}

/// Parse a list literal such as `['Drama', "Children's"]`.
///
/// Quoted items honour backslash escapes; unquoted items run to the next
/// comma. A missing closing bracket is tolerated.
fn parse_list_literal(raw: &str) -> Vec<String> {
    let inner = raw.trim();
    let inner = inner.strip_prefix('[').unwrap_or(inner);
    let inner = inner.strip_suffix(']').unwrap_or(inner);

    let mut items = Vec::new();
    let mut chars = inner.chars().peekable();

    loop {
        while matches!(chars.peek(), Some(c) if c.is_whitespace()) {
            chars.next();
        }
        let Some(&first) = chars.peek() else {
            break;
        };

        let mut item = String::new();
        if first == '\'' || first == '"' {
            chars.next();
            while let Some(c) = chars.next() {
                match c {
                    '\\' => {
                        if let Some(escaped) = chars.next() {
                            item.push(escaped);
                        }
                    }
                    c if c == first => break,
                    c => item.push(c),
                }
            }
            // Skip whatever trails the closing quote up to the separator.
            for c in chars.by_ref() {
                if c == ',' {
                    break;
                }
            }
        } else {
            for c in chars.by_ref() {
                if c == ',' {
                    break;
                }
                item.push(c);
            }
        }
        push_trimmed(&mut items, &item);
    }

    items
}

fn push_trimmed(out: &mut Vec<String>, value: &str) {
    let v = value.trim();
    if !v.is_empty() {
        out.push(v.to_string());
    }
}

/// Encode values in the canonical comma-separated form.
///
/// Falls back to a list literal when a value itself contains a separator, so
/// the cell still parses back to the same values.
pub fn encode_multi_valued<'a, I>(values: I) -> String
where
    I: IntoIterator<Item = &'a str>,
{
    let values: Vec<&str> = values.into_iter().collect();
    if !values.iter().any(|v| v.contains([',', ';'])) {
        return values.join(", ");
    }
    let quoted: Vec<String> = values
        .iter()
        .map(|v| format!("'{}'", v.replace('\\', "\\\\").replace('\'', "\\'")))
        .collect();
    format!("[{}]", quoted.join(", "))
}
