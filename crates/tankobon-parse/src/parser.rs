//! Parser selection and the shared steps of the per-library parsers.
//!
//! A file is handled by exactly one [`ParserKind`]: the first, in priority
//! order, whose applicability test passes. Every variant returns `None`
//! when it cannot settle on a series name.

mod basic;
mod book;
mod comic_vine;
mod fallback;
mod generic;
mod image;
mod pdf;

use tracing::trace;

use crate::classify;
use crate::info::{EmbeddedMetadata, ParsedFileInfo, DEFAULT_CHAPTER, SPECIAL_VOLUME};
use crate::library::{Format, LibraryType};
use crate::normalize::{clean_title, normalize_path, remove_extension_if_supported};
use crate::path;
use crate::rules::PatternSet;

/// Source of metadata read from inside an EPUB (OPF title, series, volume).
pub trait BookMetadataSource {
    fn parse_info(&self, file_path: &str) -> Option<ParsedFileInfo>;
}

/// Inputs for one parse.
///
/// `root_path` is the folder the scanner is currently walking (often the
/// series folder); `library_root` is the top of the library. Both default to
/// the same value.
#[derive(Clone, Copy)]
pub struct ParseRequest<'a> {
    pub file_path: &'a str,
    pub root_path: &'a str,
    pub library_root: &'a str,
    pub library_type: LibraryType,
    pub metadata: Option<&'a EmbeddedMetadata>,
    pub patterns: Option<&'a PatternSet>,
    pub books: Option<&'a dyn BookMetadataSource>,
}

impl<'a> ParseRequest<'a> {
    pub fn new(file_path: &'a str, root_path: &'a str, library_type: LibraryType) -> Self {
        Self {
            file_path,
            root_path,
            library_root: root_path,
            library_type,
            metadata: None,
            patterns: None,
            books: None,
        }
    }

    pub fn with_library_root(mut self, library_root: &'a str) -> Self {
        self.library_root = library_root;
        self
    }

    pub fn with_metadata(mut self, metadata: &'a EmbeddedMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn with_patterns(mut self, patterns: &'a PatternSet) -> Self {
        self.patterns = Some(patterns);
        self
    }

    pub fn with_book_source(mut self, books: &'a dyn BookMetadataSource) -> Self {
        self.books = Some(books);
        self
    }

    fn with_library_type(mut self, library_type: LibraryType) -> Self {
        self.library_type = library_type;
        self
    }

    fn file_name(&self) -> &'a str {
        path::file_name(self.file_path)
    }

    fn stem(&self) -> &'a str {
        path::file_stem(self.file_path)
    }
}

impl std::fmt::Debug for ParseRequest<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParseRequest")
            .field("file_path", &self.file_path)
            .field("root_path", &self.root_path)
            .field("library_root", &self.library_root)
            .field("library_type", &self.library_type)
            .field("metadata", &self.metadata)
            .field("patterns", &self.patterns.map(PatternSet::len))
            .field("books", &self.books.is_some())
            .finish()
    }
}

// ── Variants ────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParserKind {
    Generic,
    ComicVine,
    Image,
    Book,
    Pdf,
    Basic,
}

impl ParserKind {
    /// Selection priority, highest first.
    pub const ALL: &[ParserKind] = &[
        ParserKind::Generic,
        ParserKind::ComicVine,
        ParserKind::Image,
        ParserKind::Book,
        ParserKind::Pdf,
        ParserKind::Basic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Generic => "generic",
            Self::ComicVine => "comic_vine",
            Self::Image => "image",
            Self::Book => "book",
            Self::Pdf => "pdf",
            Self::Basic => "basic",
        }
    }

    pub fn is_applicable(&self, file_path: &str, library_type: LibraryType) -> bool {
        match self {
            Self::Generic => library_type == LibraryType::Generic,
            Self::ComicVine => library_type == LibraryType::ComicVine,
            Self::Image => library_type == LibraryType::Image && classify::is_image(file_path),
            Self::Book => classify::is_epub(file_path),
            Self::Pdf => classify::is_pdf(file_path),
            Self::Basic => {
                library_type != LibraryType::ComicVine && library_type != LibraryType::Image
            }
        }
    }

    /// First applicable variant. The book parser needs a metadata source
    /// and is skipped without one.
    pub fn select(req: &ParseRequest<'_>) -> Option<ParserKind> {
        Self::ALL.iter().copied().find(|kind| {
            kind.is_applicable(req.file_path, req.library_type)
                && (*kind != Self::Book || req.books.is_some())
        })
    }

    pub fn parse(&self, req: &ParseRequest<'_>) -> Option<ParsedFileInfo> {
        match self {
            Self::Generic => generic::parse(req),
            Self::ComicVine => comic_vine::parse(req),
            Self::Image => image::parse(req),
            Self::Book => book::parse(req),
            Self::Pdf => pdf::parse(req),
            Self::Basic => basic::parse(req),
        }
    }
}

impl std::fmt::Display for ParserKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parses one file with the first applicable variant.
///
/// A returned record always has a non-empty series, and a special always
/// sits in [`SPECIAL_VOLUME`].
pub fn parse(req: &ParseRequest<'_>) -> Option<ParsedFileInfo> {
    let Some(kind) = ParserKind::select(req) else {
        trace!(path = %req.file_path, library_type = %req.library_type, "no applicable parser");
        return None;
    };
    trace!(path = %req.file_path, parser = %kind, "selected parser");

    let mut info = kind.parse(req)?;
    if info.is_special {
        info.volumes = SPECIAL_VOLUME.to_string();
    }
    Some(info)
}

// ── Shared steps ────────────────────────────────────────────────

/// Record with the file-level fields filled and nothing parsed yet.
fn seed(req: &ParseRequest<'_>) -> ParsedFileInfo {
    ParsedFileInfo {
        filename: req.file_name().to_string(),
        format: Format::from_path(req.file_path),
        title: remove_extension_if_supported(req.stem()).into_owned(),
        full_file_path: normalize_path(req.file_path),
        metadata: req.metadata.cloned(),
        ..Default::default()
    }
}

/// Moves an edition keyword found in the file name out of the series.
fn split_edition(mut info: ParsedFileInfo, stem: &str, is_comic: bool) -> ParsedFileInfo {
    let edition = classify::parse_edition(stem);
    if !edition.is_empty() {
        info.series = clean_title(&info.series.replace(&edition, ""), is_comic, true);
        info.edition = edition;
    }
    info
}

/// An `SPnn` marker makes the file a special regardless of anything parsed
/// so far.
fn mark_special(mut info: ParsedFileInfo, stem: &str) -> ParsedFileInfo {
    info.is_special = true;
    info.special_index = classify::parse_special_index(stem);
    info.chapters = DEFAULT_CHAPTER.to_string();
    info.volumes = SPECIAL_VOLUME.to_string();
    info
}

/// Last-resort series from the file name, minus a leaked `.pdf` suffix.
fn finish_series(mut info: ParsedFileInfo, req: &ParseRequest<'_>, is_comic: bool) -> ParsedFileInfo {
    if info.series.is_empty() {
        info.series = clean_title(req.stem(), is_comic, true);
    }
    if classify::is_pdf(req.file_path) && info.series.to_lowercase().ends_with(".pdf") {
        info.series.truncate(info.series.len() - ".pdf".len());
    }
    info
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::LOOSE_LEAF_VOLUME;

    struct NoBooks;

    impl BookMetadataSource for NoBooks {
        fn parse_info(&self, _file_path: &str) -> Option<ParsedFileInfo> {
            None
        }
    }

    #[test]
    fn selection_priority() {
        let select = |path: &'static str, ty| ParserKind::select(&ParseRequest::new(path, "C:/Lib/", ty));

        assert_eq!(select("C:/Lib/a.cbz", LibraryType::Generic), Some(ParserKind::Generic));
        assert_eq!(select("C:/Lib/a.pdf", LibraryType::ComicVine), Some(ParserKind::ComicVine));
        assert_eq!(select("C:/Lib/a.png", LibraryType::Image), Some(ParserKind::Image));
        assert_eq!(select("C:/Lib/a.pdf", LibraryType::Book), Some(ParserKind::Pdf));
        assert_eq!(select("C:/Lib/a.cbz", LibraryType::Manga), Some(ParserKind::Basic));
        assert_eq!(select("C:/Lib/a.png", LibraryType::Manga), Some(ParserKind::Basic));
        assert_eq!(select("C:/Lib/a.cbz", LibraryType::Image), None);
    }

    #[test]
    fn book_parser_needs_a_source() {
        let without = ParseRequest::new("C:/Lib/a.epub", "C:/Lib/", LibraryType::Book);
        assert_eq!(ParserKind::select(&without), Some(ParserKind::Basic));

        let books = NoBooks;
        let with = without.with_book_source(&books);
        assert_eq!(ParserKind::select(&with), Some(ParserKind::Book));
        assert_eq!(parse(&with), None);
    }

    #[test]
    fn applicability() {
        assert!(!ParserKind::Image.is_applicable("something.cbz", LibraryType::Manga));
        assert!(!ParserKind::Image.is_applicable("something.cbz", LibraryType::Image));
        assert!(!ParserKind::Image.is_applicable("something.epub", LibraryType::Image));
        assert!(ParserKind::Image.is_applicable("something.png", LibraryType::Image));
        assert!(ParserKind::Pdf.is_applicable("Dune.PDF", LibraryType::Manga));
        assert!(!ParserKind::Basic.is_applicable("a.cbz", LibraryType::ComicVine));
    }

    #[test]
    fn special_volume_holds_for_every_variant() {
        let req = ParseRequest::new(
            "C:/Comics/Batman (2016)/Batman Annual 2016.cbz",
            "C:/Comics/",
            LibraryType::ComicVine,
        );
        let info = parse(&req).unwrap();
        assert!(info.is_special);
        assert_eq!(info.volumes, SPECIAL_VOLUME);
    }

    #[test]
    fn unresolvable_file_is_none() {
        let req = ParseRequest::new("C:/Lib/cover.jpg", "C:/Lib/", LibraryType::Manga);
        assert_eq!(parse(&req), None);
    }

    #[test]
    fn deterministic() {
        let req = ParseRequest::new(
            "C:/Manga/Beelzebub/Beelzebub_01_[Noodles].zip",
            "C:/Manga/Beelzebub/",
            LibraryType::Manga,
        );
        assert_eq!(parse(&req), parse(&req));
    }

    #[test]
    fn seed_fields() {
        let req = ParseRequest::new(r"C:\Manga\Vagabond\Vagabond_v03.cbz", r"C:\Manga\", LibraryType::Manga);
        let info = seed(&req);
        assert_eq!(info.filename, "Vagabond_v03.cbz");
        assert_eq!(info.title, "Vagabond_v03");
        assert_eq!(info.full_file_path, "C:/Manga/Vagabond/Vagabond_v03.cbz");
        assert_eq!(info.format, Format::Archive);
        assert_eq!(info.volumes, LOOSE_LEAF_VOLUME);
        assert_eq!(info.chapters, DEFAULT_CHAPTER);
    }
}
