use super::{fallback, finish_series, image, mark_special, seed, split_edition, ParseRequest};
use crate::classify;
use crate::extract;
use crate::info::{ParsedFileInfo, DEFAULT_CHAPTER, LOOSE_LEAF_VOLUME, SPECIAL_VOLUME};
use crate::library::LibraryType;

/// Manga and comic archives, and EPUBs when no book metadata is available.
pub(super) fn parse(req: &ParseRequest<'_>) -> Option<ParsedFileInfo> {
    let library_type = req.library_type;
    if library_type != LibraryType::Image && classify::is_cover_image(req.file_name()) {
        return None;
    }
    if classify::is_image(req.file_path) {
        return image::parse(&req.with_library_type(LibraryType::Image));
    }

    let stem = req.stem();
    let is_comic = library_type == LibraryType::Comic;
    let mut info = seed(req);

    // EPUB names never follow comic conventions.
    if is_comic && !classify::is_epub(req.file_path) {
        info.chapters = extract::parse_comic_chapter(stem);
        info.series = extract::parse_comic_series(stem);
        info.volumes = extract::parse_comic_volume(stem);
    } else {
        info.chapters = extract::parse_manga_chapter(stem);
        info.series = extract::parse_manga_series(stem);
        info.volumes = extract::parse_manga_volume(stem);
    }

    if info.series.is_empty() {
        info = fallback::walk(info, req.file_path, req.root_path, library_type);
    }

    info = split_edition(info, stem, is_comic);

    // `v20 c171-180+Omake` has real numbers and is not a special.
    if info.chapters == DEFAULT_CHAPTER
        && info.volumes == LOOSE_LEAF_VOLUME
        && classify::is_special(stem, library_type)
    {
        info.is_special = true;
        info = fallback::walk(info, req.file_path, req.root_path, library_type);
    }

    if classify::has_special_marker(stem) {
        info = mark_special(info, stem);
        info = fallback::walk(info, req.file_path, req.root_path, library_type);
    }

    info = finish_series(info, req, is_comic).apply_embedded_metadata();

    if info.is_special {
        info.volumes = SPECIAL_VOLUME.to_string();
    }

    (!info.series.is_empty()).then_some(info)
}
