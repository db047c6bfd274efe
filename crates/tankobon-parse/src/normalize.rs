//! String normalization: title cleanup, leading zeros, dedup keys.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::rules::{COMIC_SPECIAL, EDITION, EUROPEAN_COMIC, MANGA_SPECIAL, SPECIAL_MARKER};

static RE_NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}0-9\+!＊！＋]").unwrap());

static RE_MULTI_SPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s{2,}").unwrap());

// Case-sensitive on purpose: `.CBZ` stays in the title.
static RE_SUPPORTED_EXTENSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"\.cbz|\.zip|\.rar|\.cbr|\.tar.gz|\.7zip|\.7z|\.cb7|\.cbt",
        r"|^(\.png|\.jpeg|\.jpg|\.webp|\.gif|\.avif)",
        r"|\.epub|\.pdf",
    ))
    .unwrap()
});

const TRIM_CHARS: &[char] = &['\0', '\t', '\r', ' ', '-', ','];

pub fn replace_underscores(name: &str) -> String {
    name.replace('_', " ")
}

/// Cleans a raw series title.
///
/// Underscores become spaces, release-group tags and edition keywords are
/// stripped, and (when `replace_specials` is set) special keywords for the
/// genre are removed. Surrounding separators are trimmed and whitespace
/// runs collapse to a single space.
///
/// `Hippos_the_Great [Digital],` → `Hippos the Great`
pub fn clean_title(title: &str, is_comic: bool, replace_specials: bool) -> String {
    let title = replace_underscores(title);
    let title = remove_tag_holders(&title);
    let mut title = EDITION.remove_all(&title);

    if replace_specials {
        title = if is_comic {
            EUROPEAN_COMIC.remove_all(&COMIC_SPECIAL.remove_all(&title))
        } else {
            MANGA_SPECIAL.remove_all(&title)
        };
    }

    let trimmed = title.trim_matches(TRIM_CHARS);
    RE_MULTI_SPACE.replace_all(trimmed, " ").into_owned()
}

/// Removes balanced `(...)` groups, bracketed tags such as `[kmts]` and the
/// `{}` / `{Complete}` markers. `[ Complete ]` is left alone: a bracket tag
/// may not start or end with whitespace.
pub fn remove_tag_holders(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut i = 0;
    while i < title.len() {
        let rest = &title[i..];
        let skip = match rest.as_bytes()[0] {
            b'(' => balanced_paren_len(rest),
            b'[' => bracket_tag_len(rest),
            b'{' => brace_marker_len(rest),
            _ => None,
        };
        match skip {
            Some(len) => i += len,
            None => {
                let ch = rest.chars().next().unwrap_or_default();
                out.push(ch);
                i += ch.len_utf8().max(1);
            }
        }
    }
    out
}

/// Byte length of the shortest balanced `(...)` prefix.
fn balanced_paren_len(s: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (ix, ch) in s.char_indices().skip(1) {
        match ch {
            '(' => depth += 1,
            ')' if depth == 0 => return Some(ix + 1),
            ')' => depth -= 1,
            _ => {}
        }
    }
    None
}

/// Byte length of a `[tag]` prefix with balanced inner brackets and no
/// whitespace right inside either bracket.
fn bracket_tag_len(s: &str) -> Option<usize> {
    let mut chars = s.char_indices().skip(1).peekable();
    if chars.peek().is_some_and(|(_, c)| c.is_whitespace()) {
        return None;
    }
    let mut depth = 0usize;
    let mut prev = '[';
    for (ix, ch) in chars {
        match ch {
            '[' => depth += 1,
            ']' if depth == 0 => {
                return (!prev.is_whitespace()).then_some(ix + 1);
            }
            ']' => depth -= 1,
            _ => {}
        }
        prev = ch;
    }
    None
}

fn brace_marker_len(s: &str) -> Option<usize> {
    const COMPLETE: &str = "{Complete}";
    if s.starts_with("{}") {
        Some(2)
    } else if s
        .get(..COMPLETE.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(COMPLETE))
    {
        Some(COMPLETE.len())
    } else {
        None
    }
}

/// Dedup key: letters and digits only (plus a few full-width symbols),
/// lowercased.
pub fn normalize(name: &str) -> String {
    RE_NORMALIZE.replace_all(name, "").trim().to_lowercase()
}

/// `"0001"` → `"1"`, `"000"` → `"0"`.
pub fn remove_leading_zeroes(value: &str) -> String {
    let trimmed = value.trim_start_matches('0');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Pads a number to three digits so lexical order matches numeric order.
/// Ranges are padded per side: `4-8` → `004-008`. Input that isn't a
/// number comes back unchanged.
pub fn pad_zeros(number: &str) -> String {
    match number.split_once('-') {
        None => pad_number(number),
        Some((from, to)) => format!("{}-{}", pad_number(from), pad_number(to)),
    }
}

fn pad_number(number: &str) -> String {
    match number.parse::<i64>() {
        Ok(n @ 0..=9) => format!("00{n}"),
        Ok(n @ 10..=99) => format!("0{n}"),
        _ => number.to_string(),
    }
}

/// Forward slashes only, no doubled separators.
pub fn normalize_path(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }
    path.replace('\\', "/").replace("//", "/")
}

pub fn remove_extension_if_supported(file_name: &str) -> Cow<'_, str> {
    RE_SUPPORTED_EXTENSION.replace_all(file_name, "")
}

/// Display title for a special: underscores become spaces, `SPnn` markers
/// and a trailing extension are dropped.
pub fn clean_special_title(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    let replaced = replace_underscores(name);
    let stripped = SPECIAL_MARKER.remove_all(&replaced);
    let mut cleaned = stripped.trim();
    if let Some(ix) = cleaned.rfind('.').filter(|&ix| ix > 0) {
        cleaned = cleaned[..ix].trim();
    }
    if cleaned.is_empty() {
        name.to_string()
    } else {
        cleaned.to_string()
    }
}
