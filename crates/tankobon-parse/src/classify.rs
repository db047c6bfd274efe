//! Format and special classifiers. Pure predicates over paths and names.

use std::sync::LazyLock;

use phf::phf_set;
use regex::Regex;

use crate::library::LibraryType;
use crate::normalize::replace_underscores;
use crate::path;
use crate::rules::{
    Rule, COMIC_SPECIAL, COVER_IMAGE, EDITION, MANGA_SPECIAL, SPECIAL_MARKER,
};

// ── Extension patterns (compiled once) ──────────────────────────

static RE_IMAGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\.png|\.jpeg|\.jpg|\.webp|\.gif|\.avif)").unwrap()
});

static RE_ARCHIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\.cbz|\.zip|\.rar|\.cbr|\.tar.gz|\.7zip|\.7z|\.cb7|\.cbt").unwrap()
});

static RE_COMIC_INFO_ARCHIVE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\.cbz|\.cbr|\.cb7|\.cbt").unwrap());

static RE_BOOK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\.epub|\.pdf").unwrap());

static RE_XML: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\.xml").unwrap());

static RE_SERIES_AND_YEAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\D+\s\((?P<Year>\d+)\)$").unwrap());

/// `Format` values from embedded metadata that mark a file as a special.
static SPECIAL_FORMATS: phf::Set<&'static str> = phf_set! {
    "Special",
    "Reference",
    "Director's Cut",
    "Box Set",
    "Box-Set",
    "Annual",
    "Anthology",
    "Epilogue",
    "One Shot",
    "One-Shot",
    "Prologue",
    "TPB",
    "Trade Paper Back",
    "Omnibus",
    "Compendium",
    "Absolute",
    "Graphic Novel",
    "GN",
    "FCBD",
    "Giant Size",
};

// ── Formats ─────────────────────────────────────────────────────

pub fn is_archive(file_path: &str) -> bool {
    RE_ARCHIVE.is_match(path::extension(file_path))
}

/// Archive kinds that may carry a `ComicInfo.xml`. Used by metadata
/// readers outside the parser.
pub fn is_comic_info_extension(file_path: &str) -> bool {
    RE_COMIC_INFO_ARCHIVE.is_match(path::extension(file_path))
}

pub fn is_book(file_path: &str) -> bool {
    RE_BOOK.is_match(path::extension(file_path))
}

/// Dot-files are never images, whatever their extension.
pub fn is_image(file_path: &str) -> bool {
    !file_path.starts_with('.') && RE_IMAGE.is_match(path::extension(file_path))
}

/// Sidecar metadata files; for callers, the parser never reads them.
pub fn is_xml(file_path: &str) -> bool {
    RE_XML.is_match(path::extension(file_path))
}

pub fn is_epub(file_path: &str) -> bool {
    path::extension(file_path).eq_ignore_ascii_case(".epub")
}

pub fn is_pdf(file_path: &str) -> bool {
    path::extension(file_path).eq_ignore_ascii_case(".pdf")
}

/// An image named like a cover (`cover.jpg`, `folder.png`). Back covers
/// don't count.
pub fn is_cover_image(file_name: &str) -> bool {
    is_image(file_name) && COVER_IMAGE.is_match(file_name)
}

/// Paths inside NAS recycle bins, macOS resource forks and reader
/// application caches.
pub fn has_blacklisted_folder_in_path(file_path: &str) -> bool {
    file_path.contains("__MACOSX")
        || file_path.starts_with("@Recently-Snapshot")
        || file_path.starts_with("@recycle")
        || file_path.starts_with("._")
        || path::file_name(file_path).starts_with("._")
        || file_path.contains(".qpkg")
        || file_path.starts_with("#recycle")
        || file_path.contains(".yacreaderlibrary")
        || file_path.contains(".caltrash")
}

// ── Specials ────────────────────────────────────────────────────

fn matches_keyword(rule: &Rule, name: &str) -> bool {
    !name.is_empty() && rule.is_match(&replace_underscores(name))
}

pub fn is_manga_special(name: &str) -> bool {
    matches_keyword(&MANGA_SPECIAL, name)
}

pub fn is_comic_special(name: &str) -> bool {
    matches_keyword(&COMIC_SPECIAL, name)
}

/// Keyword special check with the list that fits the library type.
pub fn is_special(name: &str, library_type: LibraryType) -> bool {
    if library_type.is_comic() {
        is_comic_special(name)
    } else {
        is_manga_special(name)
    }
}

/// Explicit `SPnn` marker. Always wins over other special signals.
pub fn has_special_marker(name: &str) -> bool {
    !name.is_empty() && SPECIAL_MARKER.is_match(name)
}

/// Ordinal of the first `SPnn` marker, or 0.
pub fn parse_special_index(name: &str) -> u32 {
    SPECIAL_MARKER
        .find(name)
        .and_then(|m| m.get(2..))
        .and_then(|digits| digits.parse().ok())
        .unwrap_or(0)
}

pub fn has_embedded_special_format(format: &str) -> bool {
    SPECIAL_FORMATS.contains(format)
}

/// Edition keyword found in the name, or `""`.
pub fn parse_edition(name: &str) -> String {
    EDITION
        .find(&replace_underscores(name))
        .map(str::to_string)
        .unwrap_or_default()
}

// ── Series and year ─────────────────────────────────────────────

/// Exactly `Series (digits)`, e.g. `Batman (2020)`.
pub fn is_series_and_year(name: &str) -> bool {
    !name.is_empty() && RE_SERIES_AND_YEAR.is_match(name)
}

pub fn parse_year(name: &str) -> String {
    RE_SERIES_AND_YEAR
        .captures(name)
        .and_then(|caps| caps.name("Year"))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_extensions() {
        for p in ["a.cbz", "a.ZIP", "a.rar", "a.cbr", "a.7z", "a.cb7", "a.cbt", "a.7zip"] {
            assert!(is_archive(p), "{p}");
        }
        assert!(!is_archive("a.epub"));
        assert!(!is_archive("a.cbz.txt"));
    }

    #[test]
    fn comic_info_extensions() {
        assert!(is_comic_info_extension("Saga 001.cbz"));
        assert!(is_comic_info_extension("Saga 001.CBR"));
        assert!(!is_comic_info_extension("Saga 001.zip"));
    }

    #[test]
    fn image_extensions() {
        assert!(is_image("C:/Manga/page 01.webp"));
        assert!(is_image("test.avif"));
        assert!(is_image("Page.JPEG"));
        assert!(!is_image(".DS_Store.png"));
        assert!(!is_image("test.txt"));
    }

    #[test]
    fn book_and_xml() {
        assert!(is_book("Dune.epub"));
        assert!(is_book("Dune.PDF"));
        assert!(is_epub("Dune.EPUB"));
        assert!(!is_epub("Dune.pdf"));
        assert!(is_pdf("Dune.pdf"));
        assert!(is_xml("ComicInfo.xml"));
    }

    #[test]
    fn cover_images() {
        assert!(is_cover_image("cover.jpg"));
        assert!(!is_cover_image("backcover.jpg"));
        assert!(is_cover_image("Cover.png"));
        assert!(is_cover_image("folder.webp"));
        assert!(!is_cover_image("back_cover.png"));
        assert!(!is_cover_image("cover.cbz"));
        assert!(!is_cover_image("page 01.png"));
    }

    #[test]
    fn blacklisted_paths() {
        assert!(has_blacklisted_folder_in_path("C:/Manga/__MACOSX/Series/file.cbz"));
        assert!(has_blacklisted_folder_in_path("@Recently-Snapshot/Series/file.cbz"));
        assert!(has_blacklisted_folder_in_path("@recycle/file.cbz"));
        assert!(has_blacklisted_folder_in_path("#recycle/file.cbz"));
        assert!(has_blacklisted_folder_in_path("C:/Manga/Series/._file.cbz"));
        assert!(has_blacklisted_folder_in_path("C:/Manga/.yacreaderlibrary/cache.cbz"));
        assert!(has_blacklisted_folder_in_path("C:/Books/.caltrash/book.epub"));
        assert!(has_blacklisted_folder_in_path("C:/Apps/foo.qpkg/file.cbz"));
        assert!(!has_blacklisted_folder_in_path("C:/Manga/Series/file.cbz"));
    }

    #[test]
    fn manga_special_keywords() {
        assert!(is_manga_special("Gintama Specials"));
        assert!(is_manga_special("Boku no Hero Academia - One-Shot"));
        assert!(is_manga_special("Ani-Hina Art Collection"));
        assert!(is_manga_special("Vol 1 Omake"));
        assert!(is_manga_special("Mushoku_Tensei_Side_Stories"));
        assert!(!is_manga_special("Ani-Hina v1"));
        assert!(!is_manga_special(""));
    }

    #[test]
    fn comic_special_keywords() {
        assert!(is_comic_special("Batman Annual 2016"));
        assert!(is_comic_special("Asterix Hors-Série"));
        assert!(is_comic_special("Spider-Man FCBD 2019"));
        assert!(is_comic_special("Saga TPB"));
        assert!(!is_comic_special("Batman 001"));
    }

    #[test]
    fn special_dispatch_by_library_type() {
        assert!(is_special("Batman Annual 2016", LibraryType::Comic));
        assert!(!is_special("Batman Annual 2016", LibraryType::Manga));
        assert!(is_special("Gintama Omake", LibraryType::Manga));
    }

    #[test]
    fn special_marker_and_index() {
        assert!(has_special_marker("Summer Time Rendering SP11"));
        assert!(has_special_marker("Summer Time Rendering sp02"));
        assert!(!has_special_marker("Summer Time Rendering v01"));
        assert!(!has_special_marker(""));
        assert_eq!(parse_special_index("Summer Time Rendering SP11"), 11);
        assert_eq!(parse_special_index("Foo sp03 c171-180"), 3);
        assert_eq!(parse_special_index("Foo"), 0);
    }

    #[test]
    fn embedded_special_formats() {
        assert!(has_embedded_special_format("Annual"));
        assert!(has_embedded_special_format("Director's Cut"));
        assert!(!has_embedded_special_format("annual"));
        assert!(!has_embedded_special_format("Series"));
    }

    #[test]
    fn editions() {
        assert_eq!(parse_edition("Air Gear Omnibus v01"), "Omnibus");
        assert_eq!(parse_edition("To_Love_Ru_v01_Uncensored"), "Uncensored");
        assert_eq!(parse_edition("Tenjo Tenge Omnibus Edition v01"), "Omnibus Edition");
        assert_eq!(parse_edition("Beelzebub_01"), "");
    }

    #[test]
    fn series_and_year() {
        assert!(is_series_and_year("Batman (2020)"));
        assert!(is_series_and_year("Batman (2)"));
        assert!(!is_series_and_year("Batman 2020"));
        assert!(!is_series_and_year(""));
        assert_eq!(parse_year("Batman (2020)"), "2020");
        assert_eq!(parse_year("Batman"), "");
    }
}
