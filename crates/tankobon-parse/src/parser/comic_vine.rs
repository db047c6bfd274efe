//! ComicVine-style libraries: series are named `Series (Year)` after the
//! volume's start year, as written by Mylar and similar tools.

use super::{seed, ParseRequest};
use crate::classify;
use crate::extract;
use crate::info::ParsedFileInfo;
use crate::library::LibraryType;
use crate::normalize::clean_title;
use crate::path;

pub(super) fn parse(req: &ParseRequest<'_>) -> Option<ParsedFileInfo> {
    if req.library_type != LibraryType::ComicVine {
        return None;
    }
    let stem = req.stem();
    if stem.is_empty() || classify::is_cover_image(req.file_name()) {
        return None;
    }

    let directory_name = path::directory_name(req.root_path);
    let mut info = seed(req);
    info.chapters = extract::parse_comic_chapter(stem);
    info.volumes = extract::parse_comic_volume(stem);

    if let Some(meta) = req
        .metadata
        .filter(|meta| !meta.series.is_empty() && !meta.volume.is_empty())
    {
        info.series = format!("{} ({})", meta.series, meta.volume);
    }

    if info.series.is_empty() {
        let folders = path::folders_till_root(req.root_path, req.file_path);
        if let Some(nearest) = folders.first() {
            match folders.iter().find(|folder| classify::is_series_and_year(folder)) {
                Some(folder) => {
                    info.series = folder.clone();
                    info.volumes = classify::parse_year(folder);
                }
                None => info.series = clean_title(nearest, true, true),
            }
        } else if classify::is_series_and_year(directory_name) {
            info.series = directory_name.to_string();
            info.volumes = classify::parse_year(directory_name);
        }
    }

    info.is_special = classify::is_comic_special(&info.filename)
        || req
            .metadata
            .is_some_and(|meta| classify::is_comic_special(&meta.format));

    info = info.apply_embedded_metadata();

    if info.series.is_empty() {
        info.series = clean_title(directory_name, true, true);
    }

    (!info.series.is_empty()).then_some(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::{EmbeddedMetadata, LOOSE_LEAF_VOLUME};

    fn comic_vine(file_path: &str, root_path: &str) -> Option<ParsedFileInfo> {
        parse(&ParseRequest::new(file_path, root_path, LibraryType::ComicVine))
    }

    #[test]
    fn series_and_year_folder() {
        let info = comic_vine("C:/Comics/Batman (2016)/Batman 001.cbz", "C:/Comics/").unwrap();
        assert_eq!(info.series, "Batman (2016)");
        assert_eq!(info.volumes, "2016");
        assert_eq!(info.chapters, "1");
        assert!(!info.is_special);
    }

    #[test]
    fn series_and_year_root() {
        let info = comic_vine("C:/Comics/Saga (2012)/Saga 001.cbz", "C:/Comics/Saga (2012)/").unwrap();
        assert_eq!(info.series, "Saga (2012)");
        assert_eq!(info.volumes, "2012");
    }

    #[test]
    fn plain_folder_is_cleaned() {
        let info = comic_vine("C:/Comics/Saga [Digital]/Saga 001.cbz", "C:/Comics/").unwrap();
        assert_eq!(info.series, "Saga");
        assert_eq!(info.volumes, LOOSE_LEAF_VOLUME);
    }

    #[test]
    fn series_from_embedded_metadata() {
        let meta = EmbeddedMetadata {
            series: "Batman".to_string(),
            volume: "2016".to_string(),
            ..Default::default()
        };
        let req = ParseRequest::new("C:/Comics/Whatever/Batman 001.cbz", "C:/Comics/", LibraryType::ComicVine)
            .with_metadata(&meta);
        let info = parse(&req).unwrap();
        assert_eq!(info.series, "Batman (2016)");
        assert_eq!(info.volumes, "2016");
    }

    #[test]
    fn annual_is_special() {
        let info = comic_vine("C:/Comics/Batman (2016)/Batman Annual 2016.cbz", "C:/Comics/").unwrap();
        assert!(info.is_special);
        assert_eq!(info.series, "Batman (2016)");
    }

    #[test]
    fn special_format_in_metadata() {
        let meta = EmbeddedMetadata {
            format: "TPB".to_string(),
            ..Default::default()
        };
        let req = ParseRequest::new("C:/Comics/Saga (2012)/Saga 001.cbz", "C:/Comics/", LibraryType::ComicVine)
            .with_metadata(&meta);
        assert!(parse(&req).unwrap().is_special);
    }

    #[test]
    fn only_for_comic_vine_libraries() {
        let req = ParseRequest::new("C:/Comics/Saga (2012)/Saga 001.cbz", "C:/Comics/", LibraryType::Comic);
        assert_eq!(parse(&req), None);
        assert_eq!(comic_vine("C:/Comics/Saga (2012)/cover.jpg", "C:/Comics/"), None);
    }
}
