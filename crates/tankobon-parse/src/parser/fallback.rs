//! Fills gaps in a record from the names of the folders above the file.
//!
//! Folder hints rank below file name hints: a volume or chapter is only
//! taken from a folder while the record still holds the sentinel.

use crate::classify::is_manga_special;
use crate::extract::{
    parse_comic_chapter, parse_comic_volume, parse_manga_chapter, parse_manga_series,
    parse_manga_volume,
};
use crate::info::{is_default_chapter, is_default_volume, ParsedFileInfo, DEFAULT_CHAPTER, LOOSE_LEAF_VOLUME};
use crate::library::LibraryType;
use crate::normalize::clean_title;
use crate::path;

pub(super) fn walk(
    mut info: ParsedFileInfo,
    file_path: &str,
    root_path: &str,
    library_type: LibraryType,
) -> ParsedFileInfo {
    let is_comic = library_type == LibraryType::Comic;
    let folders: Vec<String> = path::folders_till_root(root_path, file_path)
        .into_iter()
        .filter(|folder| !is_manga_special(folder))
        .collect();

    if folders.is_empty() {
        let root_name = path::directory_name(root_path);
        if let Some(series) = series_from_folder(root_name, &info.series, is_comic) {
            info.series = series;
        }
        return info;
    }

    let last = folders.len() - 1;
    for (ix, folder) in folders.iter().enumerate() {
        let (volume, chapter) = if library_type == LibraryType::Manga {
            (parse_manga_volume(folder), parse_manga_chapter(folder))
        } else {
            (parse_comic_volume(folder), parse_comic_chapter(folder))
        };

        if is_default_volume(&info.volumes) && !volume.is_empty() && volume != LOOSE_LEAF_VOLUME {
            info.volumes = volume;
        }
        if is_default_chapter(&info.chapters) && !chapter.is_empty() && chapter != DEFAULT_CHAPTER {
            info.chapters = chapter;
        }

        // The outermost folder is usually the series folder.
        if ix == last && *folder != info.series {
            if let Some(series) = series_from_folder(folder, &info.series, is_comic) {
                info.series = series;
            }
        }
    }

    info
}

/// Series candidate from a folder name, or `None` to keep `current`.
fn series_from_folder(folder: &str, current: &str, is_comic: bool) -> Option<String> {
    let series = parse_manga_series(folder);
    if series.is_empty() {
        return Some(clean_title(folder, is_comic, true));
    }
    (current.is_empty() || !folder.contains(current)).then_some(series)
}
