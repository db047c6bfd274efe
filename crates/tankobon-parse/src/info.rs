use serde::{Deserialize, Serialize};

use crate::classify::has_embedded_special_format;
use crate::library::Format;

/// Chapter value meaning "no chapter found".
pub const DEFAULT_CHAPTER: &str = "-100000";
/// Volume value meaning "no volume found" (a loose-leaf chapter).
pub const LOOSE_LEAF_VOLUME: &str = "-100000";
/// Reserved volume that holds every special of a series.
pub const SPECIAL_VOLUME: &str = "100000";

pub const DEFAULT_CHAPTER_NUMBER: i32 = -100_000;
pub const LOOSE_LEAF_VOLUME_NUMBER: i32 = -100_000;
pub const SPECIAL_VOLUME_NUMBER: i32 = 100_000;

/// Metadata read from inside the file (ComicInfo.xml, EPUB OPF, PDF XMP).
/// Empty strings mean "absent".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EmbeddedMetadata {
    pub series: String,
    pub volume: String,
    pub number: String,
    pub format: String,
    pub title_sort: String,
    pub series_sort: String,
    pub localized_series: String,
}

/// Everything the parser could infer about a single file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParsedFileInfo {
    pub series: String,
    pub series_sort: String,
    pub localized_series: String,
    /// Volume number or range, or [`LOOSE_LEAF_VOLUME`].
    pub volumes: String,
    /// Chapter number or range, or [`DEFAULT_CHAPTER`].
    pub chapters: String,
    pub filename: String,
    pub full_file_path: String,
    pub format: Format,
    pub edition: String,
    pub is_special: bool,
    pub special_index: u32,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<EmbeddedMetadata>,
}

impl Default for ParsedFileInfo {
    fn default() -> Self {
        Self {
            series: String::new(),
            series_sort: String::new(),
            localized_series: String::new(),
            volumes: LOOSE_LEAF_VOLUME.to_string(),
            chapters: DEFAULT_CHAPTER.to_string(),
            filename: String::new(),
            full_file_path: String::new(),
            format: Format::Unknown,
            edition: String::new(),
            is_special: false,
            special_index: 0,
            title: String::new(),
            metadata: None,
        }
    }
}

pub(crate) fn is_default_volume(volumes: &str) -> bool {
    volumes.is_empty() || volumes == LOOSE_LEAF_VOLUME
}

pub(crate) fn is_default_chapter(chapters: &str) -> bool {
    chapters.is_empty() || chapters == DEFAULT_CHAPTER
}

impl ParsedFileInfo {
    /// Special flag set, or neither a volume nor a chapter was found. For
    /// callers grouping files; the parsers check the fields directly.
    pub fn is_special_info(&self) -> bool {
        self.is_special
            || (self.volumes == LOOSE_LEAF_VOLUME && self.chapters == DEFAULT_CHAPTER)
    }

    /// Neither volume nor chapter carries a value.
    pub fn is_empty_or_default(&self) -> bool {
        is_default_volume(&self.volumes) && is_default_chapter(&self.chapters)
    }

    /// Fills gaps from `other`. Fields already resolved here are kept;
    /// `is_special` is sticky.
    pub fn merge(mut self, other: Option<&ParsedFileInfo>) -> Self {
        let Some(other) = other else {
            return self;
        };
        if is_default_chapter(&self.chapters) {
            self.chapters = other.chapters.clone();
        }
        if is_default_volume(&self.volumes) {
            self.volumes = other.volumes.clone();
        }
        if self.edition.is_empty() {
            self.edition = other.edition.clone();
        }
        if self.title.is_empty() {
            self.title = other.title.clone();
        }
        if self.series.is_empty() {
            self.series = other.series.clone();
        }
        self.is_special |= other.is_special;
        self
    }

    /// Patches fields from the attached embedded metadata, if any.
    pub fn apply_embedded_metadata(mut self) -> Self {
        let Some(meta) = self.metadata.take() else {
            return self;
        };

        if !meta.volume.is_empty() {
            self.volumes = meta.volume.clone();
        }
        if !meta.number.is_empty() {
            self.chapters = meta.number.clone();
        }
        if !meta.title_sort.trim().is_empty() {
            self.series_sort = meta.title_sort.trim().to_string();
        }
        if !meta.series_sort.trim().is_empty() {
            self.series_sort = meta.series_sort.trim().to_string();
        }
        if !meta.localized_series.trim().is_empty() {
            self.localized_series = meta.localized_series.trim().to_string();
        }
        if has_embedded_special_format(&meta.format) {
            self.is_special = true;
            self.chapters = DEFAULT_CHAPTER.to_string();
            self.volumes = SPECIAL_VOLUME.to_string();
        }

        self.metadata = Some(meta);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(series: &str, volumes: &str, chapters: &str) -> ParsedFileInfo {
        ParsedFileInfo {
            series: series.to_string(),
            volumes: volumes.to_string(),
            chapters: chapters.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn defaults_are_sentinels() {
        let info = ParsedFileInfo::default();
        assert_eq!(info.volumes, LOOSE_LEAF_VOLUME);
        assert_eq!(info.chapters, DEFAULT_CHAPTER);
        assert!(info.is_special_info());
        assert_eq!(SPECIAL_VOLUME.parse::<i32>().unwrap(), SPECIAL_VOLUME_NUMBER);
        assert_eq!(DEFAULT_CHAPTER.parse::<i32>().unwrap(), DEFAULT_CHAPTER_NUMBER);
        assert_eq!(LOOSE_LEAF_VOLUME.parse::<i32>().unwrap(), LOOSE_LEAF_VOLUME_NUMBER);
    }

    #[test]
    fn special_info() {
        assert!(!info("A", "1", DEFAULT_CHAPTER).is_special_info());
        assert!(!info("A", LOOSE_LEAF_VOLUME, "3").is_special_info());
        let mut special = info("A", "1", "3");
        special.is_special = true;
        assert!(special.is_special_info());
    }

    #[test]
    fn merge_fills_only_gaps() {
        let base = info("", LOOSE_LEAF_VOLUME, "12");
        let mut other = info("Hollows", "2.5", "99");
        other.edition = "Omnibus".to_string();
        other.is_special = true;

        let merged = base.merge(Some(&other));
        assert_eq!(merged.series, "Hollows");
        assert_eq!(merged.volumes, "2.5");
        assert_eq!(merged.chapters, "12");
        assert_eq!(merged.edition, "Omnibus");
        assert!(merged.is_special);
    }

    #[test]
    fn merge_never_clears_special() {
        let mut base = info("A", "1", "1");
        base.is_special = true;
        let merged = base.merge(Some(&info("B", "2", "2")));
        assert!(merged.is_special);
        assert_eq!(merged.series, "A");
        assert_eq!(merged.clone().merge(None), merged);
    }

    #[test]
    fn embedded_metadata_overrides() {
        let mut parsed = info("Saga", "1", "5");
        parsed.metadata = Some(EmbeddedMetadata {
            volume: "2".to_string(),
            number: "7".to_string(),
            title_sort: "Saga, The".to_string(),
            series_sort: " Saga ".to_string(),
            localized_series: "サーガ".to_string(),
            ..Default::default()
        });

        let parsed = parsed.apply_embedded_metadata();
        assert_eq!(parsed.volumes, "2");
        assert_eq!(parsed.chapters, "7");
        assert_eq!(parsed.series_sort, "Saga");
        assert_eq!(parsed.localized_series, "サーガ");
        assert!(!parsed.is_special);
        assert!(parsed.metadata.is_some());
    }

    #[test]
    fn embedded_special_format() {
        let mut parsed = info("Batman", "1", "5");
        parsed.metadata = Some(EmbeddedMetadata {
            format: "Annual".to_string(),
            ..Default::default()
        });
        let parsed = parsed.apply_embedded_metadata();
        assert!(parsed.is_special);
        assert_eq!(parsed.chapters, DEFAULT_CHAPTER);
        assert_eq!(parsed.volumes, SPECIAL_VOLUME);
    }

    #[test]
    fn json_shape() {
        let parsed = info("Beelzebub", LOOSE_LEAF_VOLUME, "1");
        let json = serde_json::to_value(&parsed).unwrap();
        assert_eq!(json["series"], "Beelzebub");
        assert_eq!(json["fullFilePath"], "");
        assert_eq!(json["isSpecial"], false);
        assert!(json.get("metadata").is_none());

        let back: ParsedFileInfo = serde_json::from_value(json).unwrap();
        assert_eq!(back, parsed);
    }
}
