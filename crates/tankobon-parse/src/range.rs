//! Volume/chapter range strings: formatting raw captures and reading the
//! numeric bounds back out.

use std::sync::LazyLock;

use regex::Regex;

use crate::normalize::remove_leading_zeroes;

static RE_RANGE_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\d\-.]+$").unwrap());

static RE_IS_RANGE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d-{1}\d").unwrap());

/// Turns a raw captured number or range into its canonical form.
///
/// Leading zeros are dropped on each side, a stray `c` prefix on the upper
/// bound (`c01-c02`) is removed, and `has_part` appends `.5` to values
/// without a decimal point (`153b` → `153.5`). Anything with more than two
/// dash-separated parts keeps only its lower bound.
pub fn format_value(value: &str, has_part: bool) -> String {
    let with_part = |v: &str| {
        if has_part && !v.contains('.') {
            format!("{v}.5")
        } else {
            v.to_string()
        }
    };

    if !value.contains('-') {
        return remove_leading_zeroes(&with_part(value));
    }

    let tokens: Vec<&str> = value.split('-').collect();
    let from = remove_leading_zeroes(tokens[0]);
    if tokens.len() != 2 {
        return from;
    }

    let upper = if tokens[1].starts_with(['c', 'C']) {
        tokens[1].replace(['c', 'C'], "")
    } else {
        tokens[1].to_string()
    };
    let to = remove_leading_zeroes(&with_part(&upper));
    format!("{from}-{to}")
}

/// Lower bound of a range string; `0.0` for anything unparseable.
pub fn min_number_from_range(range: &str) -> f32 {
    bounds(range).map_or(0.0, |(min, _)| min)
}

/// Upper bound of a range string; `0.0` for anything unparseable.
pub fn max_number_from_range(range: &str) -> f32 {
    bounds(range).map_or(0.0, |(_, max)| max)
}

fn bounds(range: &str) -> Option<(f32, f32)> {
    if range.is_empty() || !RE_RANGE_CHARS.is_match(range) {
        return None;
    }

    if !RE_IS_RANGE.is_match(range) {
        let n = range.parse::<f32>().ok()?;
        return Some((n, n));
    }

    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for token in range.split('-').filter(|t| !t.is_empty()) {
        let n = token.parse::<f32>().ok()?;
        min = min.min(n);
        max = max.max(n);
    }
    Some((min, max))
}
