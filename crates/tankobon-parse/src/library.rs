use std::fmt;
use std::str::FromStr;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::classify;
use crate::error::ParseError;

/// The kind of library a file belongs to. Drives which rule tables and
/// parser variant apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LibraryType {
    Manga,
    Comic,
    Book,
    Image,
    LightNovel,
    ComicVine,
    Generic,
}

impl LibraryType {
    pub const ALL: &[LibraryType] = &[
        Self::Manga,
        Self::Comic,
        Self::Book,
        Self::Image,
        Self::LightNovel,
        Self::ComicVine,
        Self::Generic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manga => "manga",
            Self::Comic => "comic",
            Self::Book => "book",
            Self::Image => "image",
            Self::LightNovel => "light_novel",
            Self::ComicVine => "comic_vine",
            Self::Generic => "generic",
        }
    }

    /// Stable integer code, as stored by external collaborators.
    pub fn code(&self) -> i32 {
        match self {
            Self::Manga => 0,
            Self::Comic => 1,
            Self::Book => 2,
            Self::Image => 3,
            Self::LightNovel => 4,
            Self::ComicVine => 5,
            Self::Generic => 6,
        }
    }

    /// Comic-flavoured libraries share the comic rule tables and title cleanup.
    pub fn is_comic(&self) -> bool {
        matches!(self, Self::Comic | Self::ComicVine)
    }

    /// File type groups a library of this type accepts.
    pub fn file_type_groups(&self) -> FileTypeGroups {
        match self {
            Self::Manga | Self::Comic | Self::ComicVine | Self::Generic => {
                FileTypeGroups::ARCHIVE
                    | FileTypeGroups::EPUB
                    | FileTypeGroups::PDF
                    | FileTypeGroups::IMAGES
            }
            Self::Book | Self::LightNovel => FileTypeGroups::EPUB | FileTypeGroups::PDF,
            Self::Image => FileTypeGroups::IMAGES,
        }
    }
}

impl fmt::Display for LibraryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<i32> for LibraryType {
    type Error = ParseError;

    fn try_from(code: i32) -> Result<Self, Self::Error> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.code() == code)
            .ok_or_else(|| ParseError::UnknownLibraryType(code.to_string()))
    }
}

impl FromStr for LibraryType {
    type Err = ParseError;

    /// Accepts a name (`manga`, `light-novel`, `ComicVine`, ...) or an integer code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<i32>() {
            return Self::try_from(code);
        }
        let key: String = trimmed
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "manga" => Ok(Self::Manga),
            "comic" => Ok(Self::Comic),
            "book" => Ok(Self::Book),
            "image" | "images" => Ok(Self::Image),
            "lightnovel" => Ok(Self::LightNovel),
            "comicvine" => Ok(Self::ComicVine),
            "generic" => Ok(Self::Generic),
            _ => Err(ParseError::UnknownLibraryType(s.to_string())),
        }
    }
}

bitflags! {
    /// Groups of file extensions a library may contain.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FileTypeGroups: u8 {
        const ARCHIVE = 0b0000_0001;
        const EPUB = 0b0000_0010;
        const PDF = 0b0000_0100;
        const IMAGES = 0b0000_1000;
    }
}

impl FileTypeGroups {
    /// Whether a file path falls into one of these groups.
    pub fn accepts(&self, path: &str) -> bool {
        match Format::from_path(path) {
            Format::Archive => self.contains(Self::ARCHIVE),
            Format::Image => self.contains(Self::IMAGES),
            Format::Epub => self.contains(Self::EPUB),
            Format::Pdf => self.contains(Self::PDF),
            Format::Unknown => false,
        }
    }
}

/// Physical format of a file, derived purely from its extension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Format {
    Archive,
    Image,
    Epub,
    Pdf,
    #[default]
    Unknown,
}

impl Format {
    pub fn from_path(path: &str) -> Self {
        if classify::is_archive(path) {
            Self::Archive
        } else if classify::is_image(path) {
            Self::Image
        } else if classify::is_epub(path) {
            Self::Epub
        } else if classify::is_pdf(path) {
            Self::Pdf
        } else {
            Self::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_type_from_name() {
        assert_eq!("manga".parse::<LibraryType>().unwrap(), LibraryType::Manga);
        assert_eq!("Light Novel".parse::<LibraryType>().unwrap(), LibraryType::LightNovel);
        assert_eq!("comic-vine".parse::<LibraryType>().unwrap(), LibraryType::ComicVine);
        assert_eq!("COMIC".parse::<LibraryType>().unwrap(), LibraryType::Comic);
    }

    #[test]
    fn library_type_from_code() {
        assert_eq!("3".parse::<LibraryType>().unwrap(), LibraryType::Image);
        assert_eq!(LibraryType::try_from(6).unwrap(), LibraryType::Generic);
    }

    #[test]
    fn unknown_library_type_is_an_error() {
        assert!(matches!(
            "podcast".parse::<LibraryType>(),
            Err(ParseError::UnknownLibraryType(_))
        ));
        assert!(LibraryType::try_from(42).is_err());
    }

    #[test]
    fn codes_roundtrip() {
        for t in LibraryType::ALL {
            assert_eq!(LibraryType::try_from(t.code()).unwrap(), *t);
            assert_eq!(t.as_str().parse::<LibraryType>().unwrap(), *t);
        }
    }

    #[test]
    fn file_type_groups_per_library() {
        let book = LibraryType::Book.file_type_groups();
        assert!(book.accepts("C:/Books/Dune.epub"));
        assert!(book.accepts("C:/Books/Dune.pdf"));
        assert!(!book.accepts("C:/Books/Dune.cbz"));

        let image = LibraryType::Image.file_type_groups();
        assert!(image.accepts("C:/Art/page 01.png"));
        assert!(!image.accepts("C:/Art/page 01.zip"));

        assert!(LibraryType::Manga.file_type_groups().accepts("Beelzebub_01.zip"));
        assert!(!LibraryType::Manga.file_type_groups().accepts("notes.txt"));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path("Saga 001.cbr"), Format::Archive);
        assert_eq!(Format::from_path("cover.JPG"), Format::Image);
        assert_eq!(Format::from_path("Hollows Vol 2.5.epub"), Format::Epub);
        assert_eq!(Format::from_path("Manual.PDF"), Format::Pdf);
        assert_eq!(Format::from_path("ComicInfo.xml"), Format::Unknown);
    }

    #[test]
    fn serde_names() {
        let json = serde_json::to_string(&LibraryType::LightNovel).unwrap();
        assert_eq!(json, "\"light_novel\"");
    }
}
