use super::{fallback, finish_series, mark_special, seed, split_edition, ParseRequest};
use crate::classify;
use crate::extract;
use crate::info::{ParsedFileInfo, DEFAULT_CHAPTER, LOOSE_LEAF_VOLUME, SPECIAL_VOLUME};
use crate::library::LibraryType;

pub(super) fn parse(req: &ParseRequest<'_>) -> Option<ParsedFileInfo> {
    let library_type = req.library_type;
    let stem = req.stem();
    let is_comic = library_type == LibraryType::Comic;

    let mut info = seed(req);
    info.chapters = if library_type == LibraryType::Book {
        DEFAULT_CHAPTER.to_string()
    } else {
        extract::parse_chapter(stem, library_type)
    };
    info.series = extract::parse_series(stem, library_type);
    info.volumes = extract::parse_volume(stem, library_type);

    if info.series.is_empty() {
        info = fallback::walk(info, req.file_path, req.root_path, library_type);
    }

    info = split_edition(info, stem, is_comic);

    if info.chapters == DEFAULT_CHAPTER
        && info.volumes == LOOSE_LEAF_VOLUME
        && classify::is_special(stem, library_type)
    {
        info.is_special = true;
        info = fallback::walk(info, req.file_path, req.root_path, library_type);
    }

    if classify::has_special_marker(stem) {
        info = mark_special(info, stem);
        let root = strip_specials_folder(req.root_path);
        info = fallback::walk(info, req.file_path, &root, library_type);
    }

    info = info.apply_embedded_metadata();

    // A book without any number is a standalone.
    if info.chapters == DEFAULT_CHAPTER
        && info.volumes == LOOSE_LEAF_VOLUME
        && library_type == LibraryType::Book
    {
        info.is_special = true;
        info.volumes = SPECIAL_VOLUME.to_string();
        info = fallback::walk(info, req.file_path, req.root_path, library_type);
    }

    info = finish_series(info, req, is_comic);

    if info.is_special {
        info.volumes = SPECIAL_VOLUME.to_string();
    }

    (!info.series.is_empty()).then_some(info)
}

/// A root ending in `Specials` would name the series after that folder.
fn strip_specials_folder(root_path: &str) -> String {
    if root_path.ends_with("Specials") || root_path.ends_with("Specials/") {
        root_path.replace("Specials", "").trim_end_matches('/').to_string()
    } else {
        root_path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_without_numbers_is_special() {
        let req = ParseRequest::new("C:/Books/Accel World/Accel World.pdf", "C:/Books/", LibraryType::Book);
        let info = parse(&req).unwrap();
        assert_eq!(info.series, "Accel World");
        assert!(info.is_special);
        assert_eq!(info.volumes, SPECIAL_VOLUME);
        assert_eq!(info.chapters, DEFAULT_CHAPTER);
    }

    #[test]
    fn book_ignores_chapter_numbers() {
        let req = ParseRequest::new(
            "C:/Books/Mujaki no Rakuen/Mujaki no Rakuen Vol12 ch76.pdf",
            "C:/Books/Mujaki no Rakuen/",
            LibraryType::Book,
        );
        let info = parse(&req).unwrap();
        assert_eq!(info.series, "Mujaki no Rakuen");
        assert_eq!(info.volumes, "12");
        assert_eq!(info.chapters, DEFAULT_CHAPTER);
        assert!(!info.is_special);
    }

    #[test]
    fn manga_pdf_keeps_chapter() {
        let req = ParseRequest::new(
            "C:/Manga/Mujaki no Rakuen/Mujaki no Rakuen Vol12 ch76.pdf",
            "C:/Manga/Mujaki no Rakuen/",
            LibraryType::Manga,
        );
        let info = parse(&req).unwrap();
        assert_eq!(info.volumes, "12");
        assert_eq!(info.chapters, "76");
    }

    #[test]
    fn specials_root_is_stripped() {
        assert_eq!(strip_specials_folder("C:/Books/Foo/Specials/"), "C:/Books/Foo");
        assert_eq!(strip_specials_folder("C:/Books/Foo/Specials"), "C:/Books/Foo");
        assert_eq!(strip_specials_folder("C:/Books/Foo/"), "C:/Books/Foo/");
    }

    #[test]
    fn special_marker_in_specials_root() {
        let req = ParseRequest::new(
            "C:/Books/Accel World/Specials/Accel World SP02.pdf",
            "C:/Books/Accel World/Specials/",
            LibraryType::Manga,
        );
        let info = parse(&req).unwrap();
        assert!(info.is_special);
        assert_eq!(info.special_index, 2);
        assert_eq!(info.series, "Accel World");
        assert_eq!(info.volumes, SPECIAL_VOLUME);
    }
}
