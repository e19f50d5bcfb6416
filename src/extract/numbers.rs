//! Numeric literal helpers shared by every recognizer.
//!
//! AI responses write numbers the way people do: `1,200`, `$2.5M`, `45%`.
//! These helpers normalize those spellings to `f64` and reject anything that
//! would not survive as a finite chart value.

/// Regex fragment for a numeric literal with optional sign, thousands
/// separators and a decimal part. Commas are stripped by [`parse_number`].
pub const NUMBER: &str = r"-?\d[\d,]*(?:\.\d+)?";

/// Parse a literal matched by [`NUMBER`]. Returns `None` for NaN, infinities,
/// and anything `f64::from_str` rejects after comma removal.
pub fn parse_number(literal: &str) -> Option<f64> {
    let cleaned: String = literal.chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Multiplier for a `K`/`M`/`B` magnitude suffix (case-insensitive).
pub fn suffix_multiplier(suffix: Option<&str>) -> f64 {
    match suffix.map(|s| s.to_ascii_uppercase()).as_deref() {
        Some("K") => 1_000.0,
        Some("M") => 1_000_000.0,
        Some("B") => 1_000_000_000.0,
        _ => 1.0,
    }
}

/// Parse a literal and apply its magnitude suffix.
pub fn parse_scaled(literal: &str, suffix: Option<&str>) -> Option<f64> {
    parse_number(literal)
        .map(|v| v * suffix_multiplier(suffix))
        .filter(|v| v.is_finite())
}

/// Parse a whole table cell as a number.
///
/// Accepts an optional leading `$`, a trailing `%`, a trailing `K`/`M`/`B`
/// suffix and thousands separators. The entire cell must be consumed, so
/// `"2024-01-15"` or `"Q1 2024"` stay textual.
pub fn parse_cell(cell: &str) -> Option<f64> {
    let mut s = cell.trim();
    let negative = s.starts_with('-');
    if negative {
        s = &s[1..];
    }
    s = s.strip_prefix('$').unwrap_or(s).trim_start();
    s = s.strip_suffix('%').unwrap_or(s).trim_end();

    let (digits, suffix) = match s.char_indices().last() {
        Some((idx, c)) if matches!(c.to_ascii_uppercase(), 'K' | 'M' | 'B') => {
            (&s[..idx], Some(&s[idx..]))
        }
        _ => (s, None),
    };

    if digits.is_empty() || !digits.starts_with(|c: char| c.is_ascii_digit() || c == '.') {
        return None;
    }

    let value = parse_scaled(digits, suffix)?;
    Some(if negative { -value } else { value })
}
