//! Series, volume and chapter extractors over the rule tables.
//!
//! Each extractor walks its table in order and stops at the first rule
//! whose group participated in a match. Nothing found means `""` for a
//! series and the matching sentinel for a volume or chapter.

use crate::info::{DEFAULT_CHAPTER, LOOSE_LEAF_VOLUME};
use crate::library::LibraryType;
use crate::normalize::clean_title;
use crate::range::format_value;
use crate::rules::{
    Hit, Rule, COMIC_CHAPTER, COMIC_SERIES, COMIC_VOLUME, MANGA_CHAPTER, MANGA_SERIES,
    MANGA_VOLUME,
};

fn first_hit<'t>(table: &[Rule], text: &'t str, group: &str) -> Option<Hit<'t>> {
    table.iter().find_map(|rule| rule.first_group(text, group))
}

fn series(table: &[Rule], file_name: &str, is_comic: bool) -> String {
    first_hit(table, file_name, "Series")
        .map(|hit| clean_title(hit.value, is_comic, true))
        .unwrap_or_default()
}

fn number(table: &[Rule], file_name: &str, group: &str, sentinel: &str) -> String {
    match first_hit(table, file_name, group) {
        Some(hit) => format_value(hit.value, hit.has_part),
        None => sentinel.to_string(),
    }
}

// ── Manga ───────────────────────────────────────────────────────

pub fn parse_manga_series(file_name: &str) -> String {
    series(&MANGA_SERIES, file_name, false)
}

pub fn parse_manga_volume(file_name: &str) -> String {
    number(&MANGA_VOLUME, file_name, "Volume", LOOSE_LEAF_VOLUME)
}

pub fn parse_manga_chapter(file_name: &str) -> String {
    number(&MANGA_CHAPTER, file_name, "Chapter", DEFAULT_CHAPTER)
}

// ── Comic ───────────────────────────────────────────────────────

pub fn parse_comic_series(file_name: &str) -> String {
    series(&COMIC_SERIES, file_name, true)
}

pub fn parse_comic_volume(file_name: &str) -> String {
    number(&COMIC_VOLUME, file_name, "Volume", LOOSE_LEAF_VOLUME)
}

pub fn parse_comic_chapter(file_name: &str) -> String {
    number(&COMIC_CHAPTER, file_name, "Chapter", DEFAULT_CHAPTER)
}

// ── By library type ─────────────────────────────────────────────

/// Generic libraries have no built-in grammar and always get `""`.
pub fn parse_series(file_name: &str, library_type: LibraryType) -> String {
    match library_type {
        LibraryType::Manga | LibraryType::Book | LibraryType::Image | LibraryType::LightNovel => {
            parse_manga_series(file_name)
        }
        LibraryType::Comic | LibraryType::ComicVine => parse_comic_series(file_name),
        LibraryType::Generic => String::new(),
    }
}

pub fn parse_volume(file_name: &str, library_type: LibraryType) -> String {
    match library_type {
        LibraryType::Manga | LibraryType::Book | LibraryType::Image | LibraryType::LightNovel => {
            parse_manga_volume(file_name)
        }
        LibraryType::Comic | LibraryType::ComicVine => parse_comic_volume(file_name),
        LibraryType::Generic => LOOSE_LEAF_VOLUME.to_string(),
    }
}

pub fn parse_chapter(file_name: &str, library_type: LibraryType) -> String {
    match library_type {
        LibraryType::Manga | LibraryType::Book | LibraryType::Image | LibraryType::LightNovel => {
            parse_manga_chapter(file_name)
        }
        LibraryType::Comic | LibraryType::ComicVine => parse_comic_chapter(file_name),
        LibraryType::Generic => DEFAULT_CHAPTER.to_string(),
    }
}
