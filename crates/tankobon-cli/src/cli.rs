use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tankobon")]
#[command(author, version, about = "Series, volume and chapter metadata from comic and book file names")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a single file path and print the result as JSON
    Parse {
        /// File to parse (does not need to exist)
        #[arg(required = true)]
        file: String,

        /// Folder being scanned; defaults to the file's parent folder
        #[arg(long)]
        root: Option<String>,

        /// Top of the library; defaults to the root
        #[arg(long)]
        library_root: Option<String>,

        /// Library type (manga, comic, comic_vine, book, light_novel, image, generic)
        #[arg(short = 't', long = "type")]
        library_type: Option<String>,

        /// User pattern for generic libraries (repeatable)
        #[arg(short, long = "pattern")]
        patterns: Vec<String>,

        /// Embedded metadata as a JSON object
        #[arg(long)]
        metadata: Option<String>,

        /// Book package metadata as a JSON object (enables the EPUB parser)
        #[arg(long)]
        book_info: Option<String>,
    },

    /// Scan library folders and print every parsed file as JSON
    Scan {
        /// Roots to scan; defaults to the configured roots
        roots: Vec<String>,

        /// Library type; defaults to the configured type
        #[arg(short = 't', long = "type")]
        library_type: Option<String>,

        /// Only print the counters
        #[arg(long)]
        summary: bool,
    },

    /// Run one of the name normalization helpers
    Normalize {
        #[arg(value_enum)]
        mode: NormalizeMode,

        value: String,

        /// Treat the value as a comic title
        #[arg(long)]
        comic: bool,
    },

    /// Show or manage the configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum NormalizeMode {
    /// Display-ready series title
    Clean,
    /// Lowercase comparison key
    Key,
    /// Display title for a special
    SpecialTitle,
    /// Forward-slash path without duplicate separators
    Path,
    /// Zero-padded number or range
    Pad,
    /// Numeric bounds of a range
    Range,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,
    /// Print the user config file location
    Path,
    /// Write the default configuration to the user config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
