use super::{fallback, ParseRequest};
use crate::extract;
use crate::info::{is_default_chapter, is_default_volume, ParsedFileInfo, DEFAULT_CHAPTER, LOOSE_LEAF_VOLUME};
use crate::library::{Format, LibraryType};
use crate::normalize::{clean_title, normalize_path, remove_extension_if_supported};
use crate::path;

/// Loose images. The folder layout carries the series and numbering; the
/// file name is only a secondary source.
pub(super) fn parse(req: &ParseRequest<'_>) -> Option<ParsedFileInfo> {
    let directory_name = path::directory_name(req.root_path);
    let mut info = ParsedFileInfo {
        series: directory_name.to_string(),
        filename: req.file_name().to_string(),
        full_file_path: normalize_path(req.file_path),
        format: Format::Image,
        title: remove_extension_if_supported(req.stem()).into_owned(),
        metadata: req.metadata.cloned(),
        ..Default::default()
    };

    info = fallback::walk(info, req.file_path, req.library_root, LibraryType::Image);

    if info.is_empty_or_default() {
        info.is_special = true;
    } else {
        let volume = extract::parse_volume(&info.filename, LibraryType::Image);
        let chapter = extract::parse_chapter(&info.filename, LibraryType::Image);
        if is_default_volume(&info.volumes) && volume != LOOSE_LEAF_VOLUME {
            info.volumes = volume;
        }
        if is_default_chapter(&info.chapters) && chapter != DEFAULT_CHAPTER {
            info.chapters = chapter;
        }
    }

    // The walker needed the raw folder name; tidy it now.
    if info.series.is_empty() || info.series == directory_name {
        info.series = clean_title(directory_name, false, false);
    }

    (!info.series.is_empty()).then_some(info)
}
