//! Literal decoding for numbers and strings.
//!
//! Operates on raw source text as tree-sitter hands it over; the grammar
//! has already checked the overall shape, so these helpers only interpret it.

use crate::ast::Constant;

// ============================================================================
// NUMBERS
// ============================================================================

/// Decodes an `integer` token. `None` if it does not fit in an `i64`.
pub fn integer(text: &str) -> Option<Constant> {
    if is_imaginary(text) {
        return Some(Constant::Complex(text.to_string()));
    }
    let digits: String = text
        .chars()
        .filter(|c| *c != '_' && !matches!(c, 'l' | 'L'))
        .collect();
    let lower = digits.to_ascii_lowercase();
    let value = if let Some(hex) = lower.strip_prefix("0x") {
        i64::from_str_radix(hex, 16)
    } else if let Some(oct) = lower.strip_prefix("0o") {
        i64::from_str_radix(oct, 8)
    } else if let Some(bin) = lower.strip_prefix("0b") {
        i64::from_str_radix(bin, 2)
    } else {
        lower.parse::<i64>()
    };
    value.ok().map(Constant::Int)
}

/// Decodes a `float` token.
pub fn float(text: &str) -> Option<Constant> {
    if is_imaginary(text) {
        return Some(Constant::Complex(text.to_string()));
    }
    let digits: String = text.chars().filter(|c| *c != '_').collect();
    digits.parse::<f64>().ok().map(Constant::Float)
}

fn is_imaginary(text: &str) -> bool {
    text.ends_with('j') || text.ends_with('J')
}

// ============================================================================
// STRINGS
// ============================================================================

/// Flags carried by a string prefix such as `rb` or `f`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringPrefix {
    pub raw: bool,
    pub bytes: bool,
    pub format: bool,
}

impl StringPrefix {
    /// Reads the prefix from a `string_start` token like `f"` or `Rb'''`.
    pub fn parse(start: &str) -> Self {
        let mut prefix = Self::default();
        for c in start.chars().take_while(|c| c.is_ascii_alphabetic()) {
            match c.to_ascii_lowercase() {
                'r' => prefix.raw = true,
                'b' => prefix.bytes = true,
                'f' => prefix.format = true,
                _ => {}
            }
        }
        prefix
    }
}

/// Decodes the escape sequences of a non-raw string body.
///
/// Unknown escapes keep their backslash, as the source language does.
pub fn unescape(body: &str) -> String {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let Some(next) = chars.next() else {
            out.push('\\');
            break;
        };
        match next {
            '\n' => {}
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
            }
            '\\' => out.push('\\'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'a' => out.push('\u{07}'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            'v' => out.push('\u{0B}'),
            '0'..='7' => {
                let mut code = next.to_digit(8).unwrap_or(0);
                for _ in 0..2 {
                    match chars.peek().and_then(|d| d.to_digit(8)) {
                        Some(digit) => {
                            code = code * 8 + digit;
                            chars.next();
                        }
                        None => break,
                    }
                }
                push_code_point(&mut out, code, next);
            }
            'x' => push_hex(&mut out, &mut chars, 2, 'x'),
            'u' => push_hex(&mut out, &mut chars, 4, 'u'),
            'U' => push_hex(&mut out, &mut chars, 8, 'U'),
            other => {
                out.push('\\');
                out.push(other);
            }
        }
    }
    out
}

/// `{{` and `}}` in the literal parts of an interpolated string.
pub fn unescape_braces(text: &str) -> String {
    text.replace("{{", "{").replace("}}", "}")
}

fn push_hex(
    out: &mut String,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    width: usize,
    marker: char,
) {
    let mut digits = String::with_capacity(width);
    while digits.len() < width {
        match chars.peek() {
            Some(c) if c.is_ascii_hexdigit() => {
                digits.push(*c);
                chars.next();
            }
            _ => break,
        }
    }
    match u32::from_str_radix(&digits, 16) {
        Ok(code) if digits.len() == width => push_code_point(out, code, marker),
        _ => {
            out.push('\\');
            out.push(marker);
            out.push_str(&digits);
        }
    }
}

fn push_code_point(out: &mut String, code: u32, marker: char) {
    match char::from_u32(code) {
        Some(c) => out.push(c),
        None => {
            out.push('\\');
            out.push(marker);
        }
    }
}
