use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tankobon_parse::rules::BACKTRACK_LIMIT;
use tankobon_parse::{LibraryType, PatternSet};

use crate::error::TankobonError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level application configuration. Missing keys in a user file fall
/// back to the built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub library: LibraryConfig,
    pub scanner: ScannerConfig,
    pub parser: ParserConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryConfig {
    /// Library type name, e.g. `manga`, `comic`, `comic_vine`.
    pub kind: String,
    pub roots: Vec<String>,
    /// User regexes for `generic` libraries.
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    pub follow_links: bool,
    pub skip_blacklisted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Backtracking budget for each user pattern evaluation.
    pub backtrack_limit: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            kind: LibraryType::Manga.as_str().to_string(),
            roots: Vec::new(),
            patterns: Vec::new(),
        }
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            follow_links: true,
            skip_blacklisted: true,
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            backtrack_limit: BACKTRACK_LIMIT,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Built-in defaults shipped with the binary.
    pub fn defaults() -> Result<Self, TankobonError> {
        toml::from_str(DEFAULT_CONFIG).map_err(|e| TankobonError::Config(e.to_string()))
    }

    /// Load config: user file (if exists) merged over built-in defaults.
    pub fn load() -> Result<Self, TankobonError> {
        let user_path = Self::config_path();
        if user_path.exists() {
            Self::load_from(&user_path)
        } else {
            Self::defaults()
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, TankobonError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| TankobonError::Config(format!("{}: {e}", path.display())))?;
        toml::from_str(&content).map_err(|e| TankobonError::Config(e.to_string()))
    }

    /// Save current config to the user config file.
    pub fn save(&self) -> Result<(), TankobonError> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), TankobonError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, TankobonError> {
        toml::to_string_pretty(self).map_err(|e| TankobonError::Config(e.to_string()))
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "tankobon")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    pub fn library_type(&self) -> Result<LibraryType, TankobonError> {
        Ok(self.library.kind.parse()?)
    }

    /// Compiles the configured Generic patterns under the configured limit.
    pub fn patterns(&self) -> Result<PatternSet, TankobonError> {
        Ok(PatternSet::compile_with_limit(
            self.library.patterns.as_slice(),
            self.parser.backtrack_limit,
        )?)
    }
}
