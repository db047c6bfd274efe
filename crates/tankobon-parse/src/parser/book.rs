use super::{basic, ParseRequest};
use crate::extract;
use crate::info::{ParsedFileInfo, LOOSE_LEAF_VOLUME};
use crate::library::LibraryType;

/// EPUBs with metadata read from the package itself. Light novels often
/// put the volume in the series title; that case is re-split here.
pub(super) fn parse(req: &ParseRequest<'_>) -> Option<ParsedFileInfo> {
    let books = req.books?;
    let library_type = req.library_type;
    let mut info = books.parse_info(req.file_path)?;
    info.metadata = req.metadata.cloned();

    let has_volume_in_series = extract::parse_volume(&info.series, library_type) != LOOSE_LEAF_VOLUME;
    let has_volume_in_title = extract::parse_volume(&info.title, library_type) != LOOSE_LEAF_VOLUME;
    let no_embedded_volume = req.metadata.map_or(true, |meta| meta.volume.is_empty());

    if has_volume_in_series && has_volume_in_title && no_embedded_volume {
        info.series = extract::parse_series(&info.title, library_type);
        info.volumes = extract::parse_volume(&info.title, library_type);
    } else {
        let from_name = basic::parse(&req.with_library_type(LibraryType::Book));
        info = info.merge(from_name.as_ref());
        if let Some(from_name) = from_name.filter(|_| has_volume_in_series) {
            if extract::parse_volume(&from_name.series, library_type) == LOOSE_LEAF_VOLUME {
                info.series = from_name.series;
            }
        }
    }

    (!info.series.is_empty()).then_some(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::info::DEFAULT_CHAPTER;
    use crate::parser::BookMetadataSource;

    struct Opf(ParsedFileInfo);

    impl BookMetadataSource for Opf {
        fn parse_info(&self, _file_path: &str) -> Option<ParsedFileInfo> {
            Some(self.0.clone())
        }
    }

    fn opf(series: &str, title: &str, volumes: &str) -> Opf {
        Opf(ParsedFileInfo {
            series: series.to_string(),
            title: title.to_string(),
            volumes: volumes.to_string(),
            ..Default::default()
        })
    }

    fn book(file_path: &str, source: &Opf) -> Option<ParsedFileInfo> {
        parse(
            &ParseRequest::new(file_path, "C:/Books/Accel World/", LibraryType::Manga)
                .with_book_source(source),
        )
    }

    #[test]
    fn volume_in_series_is_resplit_from_title() {
        let source = opf("Hollows Vol 2.5", "Hollows Vol 2.5", LOOSE_LEAF_VOLUME);
        let info = book("C:/Books/Accel World/whatever.epub", &source).unwrap();
        assert_eq!(info.series, "Hollows");
        assert_eq!(info.volumes, "2.5");
    }

    #[test]
    fn book_metadata_wins_over_file_name() {
        let source = opf("Accel World", "Accel World", "3");
        let info = book("C:/Books/Accel World/Accel World v05.epub", &source).unwrap();
        assert_eq!(info.series, "Accel World");
        assert_eq!(info.volumes, "3");
    }

    #[test]
    fn gaps_filled_from_file_name() {
        let source = opf("Accel World", "Accel World", LOOSE_LEAF_VOLUME);
        let info = book("C:/Books/Accel World/Accel World v03.epub", &source).unwrap();
        assert_eq!(info.series, "Accel World");
        assert_eq!(info.volumes, "3");
        assert_eq!(info.chapters, DEFAULT_CHAPTER);
    }
}
