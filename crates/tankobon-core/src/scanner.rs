//! Library folder scanner.
//!
//! Walks the configured library roots, drops blacklisted and unsupported
//! files, and parses everything else through the parser dispatcher.

use std::path::Path;

use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use tankobon_parse::classify::has_blacklisted_folder_in_path;
use tankobon_parse::normalize::normalize_path;
use tankobon_parse::{parse, LibraryType, ParseRequest, ParsedFileInfo, PatternSet};

use crate::config::{AppConfig, ScannerConfig};
use crate::error::TankobonError;

/// One parsed file.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanEntry {
    pub root: String,
    pub info: ParsedFileInfo,
}

/// Result of a library scan.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub files_scanned: u32,
    pub files_parsed: u32,
    pub files_skipped: u32,
    pub entries: Vec<ScanEntry>,
}

/// Scan the roots named in the config with its library type and patterns.
pub fn scan_configured(config: &AppConfig) -> Result<ScanResult, TankobonError> {
    if config.library.roots.is_empty() {
        return Err(TankobonError::Config("no library roots configured".to_string()));
    }
    let library_type = config.library_type()?;
    let patterns = config.patterns()?;
    Ok(scan_library(&config.library.roots, library_type, &patterns, &config.scanner))
}

/// Scan every root and parse each file a `library_type` library accepts.
///
/// Missing roots and unreadable entries are logged and skipped.
pub fn scan_library(
    roots: &[String],
    library_type: LibraryType,
    patterns: &PatternSet,
    options: &ScannerConfig,
) -> ScanResult {
    let mut result = ScanResult::default();
    let groups = library_type.file_type_groups();

    for root in roots {
        let root_path = Path::new(root);
        if !root_path.is_dir() {
            warn!(path = %root, "Library root does not exist, skipping");
            continue;
        }

        info!(path = %root, library_type = %library_type, "Scanning library root");
        let root_str = normalize_path(&root_path.to_string_lossy());

        for entry in WalkDir::new(root_path)
            .follow_links(options.follow_links)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!(error = %e, "Failed to read directory entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            result.files_scanned += 1;
            let file_path = normalize_path(&entry.path().to_string_lossy());

            let relative = entry.path().strip_prefix(root_path).unwrap_or(entry.path());
            if options.skip_blacklisted
                && has_blacklisted_folder_in_path(&normalize_path(&relative.to_string_lossy()))
            {
                debug!(path = %file_path, "Skipping blacklisted path");
                result.files_skipped += 1;
                continue;
            }

            if !groups.accepts(&file_path) {
                debug!(path = %file_path, "Skipping unsupported file");
                result.files_skipped += 1;
                continue;
            }

            let request =
                ParseRequest::new(&file_path, &root_str, library_type).with_patterns(patterns);
            match parse(&request) {
                Some(info) => {
                    result.files_parsed += 1;
                    result.entries.push(ScanEntry {
                        root: root_str.clone(),
                        info,
                    });
                }
                None => {
                    debug!(path = %file_path, "No series found, skipping");
                    result.files_skipped += 1;
                }
            }
        }
    }

    info!(
        scanned = result.files_scanned,
        parsed = result.files_parsed,
        skipped = result.files_skipped,
        "Scan finished"
    );
    result
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use tankobon_parse::DEFAULT_CHAPTER;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"").unwrap();
    }

    fn roots(dir: &Path) -> Vec<String> {
        vec![dir.to_string_lossy().to_string()]
    }

    #[test]
    fn test_scan_manga_library() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Beelzebub/Beelzebub_01_[Noodles].zip");
        touch(dir.path(), "Beelzebub/cover.png");
        touch(dir.path(), "Beelzebub/notes.txt");
        touch(dir.path(), "__MACOSX/Beelzebub/Beelzebub_02.zip");

        let result = scan_library(
            &roots(dir.path()),
            LibraryType::Manga,
            &PatternSet::default(),
            &ScannerConfig::default(),
        );

        assert_eq!(result.files_scanned, 4);
        assert_eq!(result.files_parsed, 1);
        assert_eq!(result.files_skipped, 3);

        let info = &result.entries[0].info;
        assert_eq!(info.series, "Beelzebub");
        assert_eq!(info.chapters, "1");
        assert_eq!(info.filename, "Beelzebub_01_[Noodles].zip");
    }

    #[test]
    fn test_blacklist_can_be_disabled() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "__MACOSX/Beelzebub_02.zip");

        let options = ScannerConfig {
            skip_blacklisted: false,
            ..ScannerConfig::default()
        };
        let result = scan_library(&roots(dir.path()), LibraryType::Manga, &PatternSet::default(), &options);
        assert_eq!(result.files_parsed, 1);
    }

    #[test]
    fn test_book_library_ignores_archives() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Accel World/Accel World.pdf");
        touch(dir.path(), "Accel World/Accel World v01.cbz");

        let result = scan_library(
            &roots(dir.path()),
            LibraryType::Book,
            &PatternSet::default(),
            &ScannerConfig::default(),
        );
        assert_eq!(result.files_scanned, 2);
        assert_eq!(result.files_parsed, 1);

        let info = &result.entries[0].info;
        assert_eq!(info.series, "Accel World");
        assert!(info.is_special);
        assert_eq!(info.chapters, DEFAULT_CHAPTER);
    }

    #[test]
    fn test_generic_library_uses_patterns() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "Foo - 12.cbz");
        touch(dir.path(), "unmatched.cbz");

        let patterns = PatternSet::compile(&[r"^(?P<Series>.+?) - (?P<Chapter>\d+)"]).unwrap();
        let result = scan_library(&roots(dir.path()), LibraryType::Generic, &patterns, &ScannerConfig::default());
        assert_eq!(result.files_parsed, 1);
        assert_eq!(result.entries[0].info.series, "Foo");
    }

    #[test]
    fn test_missing_root_is_skipped() {
        let result = scan_library(
            &["/definitely/not/here".to_string()],
            LibraryType::Manga,
            &PatternSet::default(),
            &ScannerConfig::default(),
        );
        assert_eq!(result.files_scanned, 0);
    }

    #[test]
    fn test_scan_configured_needs_roots() {
        let config = AppConfig::default();
        assert!(matches!(scan_configured(&config), Err(TankobonError::Config(_))));
    }
}
