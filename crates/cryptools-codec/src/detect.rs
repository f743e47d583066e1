//! Heuristic encoding detection
//!
//! [`guess_encoding`] classifies a string through an ordered cascade of
//! pattern tests. Order matters: the character classes overlap (every hex
//! string is also made of valid Base64-crypt characters), so the more
//! restrictive, more information-bearing patterns run first. Downstream
//! consumers pre-select encodings from this result, so the ordering is part
//! of the contract and must not be rearranged.

use crate::encoding::Encoding;

/// Guess the encoding of a string
///
/// Pure and total: identical input always yields an identical result, and
/// every string produces either a confident guess or `None`. The empty
/// string matches none of the patterns and returns `None`.
pub fn guess_encoding(text: &str) -> Option<Encoding> {
    if is_boolean(text) {
        Some(Encoding::Boolean)
    } else if is_uuid_v4(text) {
        Some(Encoding::Uuid)
    } else if is_grouped(text, 8, |c| matches!(c, '0' | '1')) {
        Some(Encoding::Binary)
    } else if is_grouped(text, 3, |c| matches!(c, '0'..='7')) {
        Some(Encoding::Octal)
    } else if is_hexadecimal(text) {
        Some(Encoding::Hexadecimal)
    } else if is_base64(text) {
        Some(Encoding::Base64)
    } else if is_base64_crypt(text) {
        Some(Encoding::Base64Crypt)
    } else if is_json(text) {
        Some(Encoding::Json)
    } else if is_phc_string(text) {
        Some(Encoding::PhcString)
    } else if is_modular_crypt(text) {
        Some(Encoding::ModularCrypt)
    } else {
        None
    }
}

fn is_boolean(text: &str) -> bool {
    text.eq_ignore_ascii_case("true") || text.eq_ignore_ascii_case("false")
}

/// RFC 4122 UUID v4: 8-4-4-4-12 hex groups with version nibble 4 and
/// variant nibble in 8/9/a/b
fn is_uuid_v4(text: &str) -> bool {
    let bytes = text.as_bytes();
    if bytes.len() != 36 {
        return false;
    }
    for (i, b) in bytes.iter().enumerate() {
        match i {
            8 | 13 | 18 | 23 => {
                if *b != b'-' {
                    return false;
                }
            }
            14 => {
                if *b != b'4' {
                    return false;
                }
            }
            19 => {
                if !matches!(*b, b'8' | b'9' | b'a' | b'b' | b'A' | b'B') {
                    return false;
                }
            }
            _ => {
                if !b.is_ascii_hexdigit() {
                    return false;
                }
            }
        }
    }
    true
}

/// Non-empty string of fixed-width groups drawn from one character class
fn is_grouped(text: &str, width: usize, class: impl Fn(char) -> bool) -> bool {
    !text.is_empty() && text.len() % width == 0 && text.chars().all(class)
}

/// Pairs of hex digits in a consistent case; mixed upper/lower is rejected
/// so that Base64-looking strings don't misclassify
fn is_hexadecimal(text: &str) -> bool {
    if text.is_empty() || text.len() % 2 != 0 || !text.chars().all(|c| c.is_ascii_hexdigit()) {
        return false;
    }
    let has_upper = text.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = text.chars().any(|c| c.is_ascii_lowercase());
    !(has_upper && has_lower)
}

/// Standard Base64: groups of four, `=` padding only at the end
///
/// An unpadded, four-aligned string made only of alphanumerics also fits the
/// crypt alphabet; it falls through to the crypt test. A `+` or `/` (or the
/// padding itself) settles the ambiguity in favor of standard Base64.
fn is_base64(text: &str) -> bool {
    if text.is_empty() || text.len() % 4 != 0 {
        return false;
    }
    let trimmed = text.trim_end_matches('=');
    let padding = text.len() - trimmed.len();
    if padding > 2 {
        return false;
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '+' || c == '/')
    {
        return false;
    }
    padding > 0 || trimmed.contains(['+', '/'])
}

/// bcrypt Base64 character class: no `+`, no padding
fn is_base64_crypt(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '/')
}

/// Strict JSON parse, only attempted when an object brace is present
fn is_json(text: &str) -> bool {
    text.contains('{') && serde_json::from_str::<serde_json::Value>(text).is_ok()
}

fn is_phc_identifier(segment: &str) -> bool {
    (4..=32).contains(&segment.len())
        && segment
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

fn is_phc_b64(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '='))
}

fn is_phc_params(segment: &str) -> bool {
    segment.split(',').all(|pair| {
        pair.split_once('=').is_some_and(|(k, v)| {
            !k.is_empty()
                && k.chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
                && v.chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '/' | '.' | '-'))
        })
    })
}

/// PHC string format: `$id[$v=N][$params][$salt[$hash]]`
fn is_phc_string(text: &str) -> bool {
    let Some(rest) = text.strip_prefix('$') else {
        return false;
    };
    let mut segments = rest.split('$').peekable();

    let Some(id) = segments.next() else {
        return false;
    };
    if !is_phc_identifier(id) {
        return false;
    }

    // Optional version
    if let Some(seg) = segments.peek() {
        if let Some(v) = seg.strip_prefix("v=") {
            if v.is_empty() || !v.chars().all(|c| c.is_ascii_digit()) {
                return false;
            }
            segments.next();
        }
    }

    // Optional comma-separated parameters
    if let Some(seg) = segments.peek() {
        if seg.contains('=') {
            if !is_phc_params(seg) {
                return false;
            }
            segments.next();
        }
    }

    // Optional salt and hash
    for _ in 0..2 {
        if let Some(seg) = segments.peek() {
            if !is_phc_b64(seg) {
                return false;
            }
            segments.next();
        }
    }

    segments.next().is_none()
}

/// Modular Crypt Format: `$id$...` with at least one segment after the id
fn is_modular_crypt(text: &str) -> bool {
    let Some(rest) = text.strip_prefix('$') else {
        return false;
    };
    let mut segments = rest.split('$');
    let Some(id) = segments.next() else {
        return false;
    };
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return false;
    }
    let mut any = false;
    for seg in segments {
        if seg.is_empty() {
            return false;
        }
        any = true;
    }
    any
}
