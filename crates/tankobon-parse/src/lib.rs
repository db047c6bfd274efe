//! Filename and folder metadata parser for comic, manga and book libraries.
//!
//! Given a file path, its library root and a [`LibraryType`], infers the
//! series name, volume, chapter, edition and special status of the file.

pub mod classify;
pub mod error;
pub mod extract;
pub mod info;
pub mod library;
pub mod normalize;
pub mod parser;
pub mod path;
pub mod range;
pub mod rules;

pub use error::ParseError;
pub use info::{EmbeddedMetadata, ParsedFileInfo, DEFAULT_CHAPTER, LOOSE_LEAF_VOLUME, SPECIAL_VOLUME};
pub use library::{FileTypeGroups, Format, LibraryType};
pub use parser::{parse, BookMetadataSource, ParseRequest, ParserKind};
pub use rules::PatternSet;
