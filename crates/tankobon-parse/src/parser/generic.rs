use super::{seed, ParseRequest};
use crate::extract;
use crate::info::{ParsedFileInfo, DEFAULT_CHAPTER, LOOSE_LEAF_VOLUME, SPECIAL_VOLUME};

/// Generic libraries: only the user's patterns name the series.
pub(super) fn parse(req: &ParseRequest<'_>) -> Option<ParsedFileInfo> {
    let patterns = req.patterns?;
    let stem = req.stem();

    let mut info = seed(req);
    info.chapters = extract::parse_comic_chapter(stem);
    info.volumes = extract::parse_comic_volume(stem);

    for rule in patterns.iter() {
        for caps in rule.captures(stem) {
            let group = |name| caps.name(name).map_or("", |m| m.as_str());
            info.series = keep_resolved(group("Series"), info.series, "");
            info.chapters = keep_resolved(group("Chapter"), info.chapters, DEFAULT_CHAPTER);
        }
    }

    info = info.apply_embedded_metadata();

    if info.is_special {
        info.volumes = SPECIAL_VOLUME.to_string();
    }
    if info.chapters.is_empty() {
        info.chapters = DEFAULT_CHAPTER.to_string();
    }
    if !info.is_special && info.volumes.is_empty() {
        info.volumes = LOOSE_LEAF_VOLUME.to_string();
    }

    (!info.series.is_empty()).then_some(info)
}

/// First non-empty value wins; `unset` counts as no value yet.
fn keep_resolved(value: &str, current: String, unset: &str) -> String {
    if value.is_empty() {
        current
    } else if current.is_empty() || current == unset {
        value.to_string()
    } else {
        current
    }
}
