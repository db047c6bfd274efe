mod cli;

use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, ConfigAction, NormalizeMode};
use tankobon_core::{scan_library, AppConfig, TankobonError};
use tankobon_parse::normalize::{clean_special_title, clean_title, normalize, normalize_path, pad_zeros};
use tankobon_parse::range::{max_number_from_range, min_number_from_range};
use tankobon_parse::{
    parse, BookMetadataSource, EmbeddedMetadata, LibraryType, ParseRequest, ParsedFileInfo, PatternSet,
};

/// Book metadata handed in on the command line instead of read from the
/// package.
struct StaticBookInfo(ParsedFileInfo);

impl BookMetadataSource for StaticBookInfo {
    fn parse_info(&self, _file_path: &str) -> Option<ParsedFileInfo> {
        Some(self.0.clone())
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig, TankobonError> {
    match &cli.config {
        Some(path) => AppConfig::load_from(path),
        None => AppConfig::load(),
    }
}

fn init_logging(cli: &Cli, config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("tankobon=debug,tankobon_core=debug,tankobon_parse=trace")
        } else {
            EnvFilter::try_new(&config.logging.filter).unwrap_or_else(|_| EnvFilter::new("info"))
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_json<T: Serialize>(value: &T) -> Result<(), TankobonError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn library_type(arg: Option<&str>, config: &AppConfig) -> Result<LibraryType, TankobonError> {
    match arg {
        Some(raw) => Ok(raw.parse()?),
        None => config.library_type(),
    }
}

/// Command-line patterns replace the configured ones.
fn patterns(args: &[String], config: &AppConfig) -> Result<PatternSet, TankobonError> {
    if args.is_empty() {
        config.patterns()
    } else {
        Ok(PatternSet::compile_with_limit(args, config.parser.backtrack_limit)?)
    }
}

#[allow(clippy::too_many_arguments)]
fn run_parse(
    config: &AppConfig,
    file: &str,
    root: Option<&str>,
    library_root: Option<&str>,
    type_arg: Option<&str>,
    pattern_args: &[String],
    metadata: Option<&str>,
    book_info: Option<&str>,
) -> Result<(), TankobonError> {
    let library_type = library_type(type_arg, config)?;
    let patterns = patterns(pattern_args, config)?;

    let file = normalize_path(file);
    let parent = match file.rfind('/') {
        Some(ix) => file[..=ix].to_string(),
        None => String::new(),
    };
    let root = root.map(normalize_path).unwrap_or(parent);
    let library_root = library_root.map(normalize_path).unwrap_or_else(|| root.clone());

    let metadata: Option<EmbeddedMetadata> = metadata.map(serde_json::from_str).transpose()?;
    let books = book_info
        .map(serde_json::from_str::<ParsedFileInfo>)
        .transpose()?
        .map(StaticBookInfo);

    let mut request = ParseRequest::new(&file, &root, library_type)
        .with_library_root(&library_root)
        .with_patterns(&patterns);
    if let Some(metadata) = &metadata {
        request = request.with_metadata(metadata);
    }
    if let Some(books) = &books {
        request = request.with_book_source(books);
    }

    tracing::debug!(path = %file, root = %root, library_type = %library_type, "Parsing file");
    match parse(&request) {
        Some(info) => print_json(&info),
        None => {
            tracing::info!(path = %file, "No series could be determined");
            print_json(&serde_json::Value::Null)
        }
    }
}

fn run_scan(
    config: &AppConfig,
    roots: Vec<String>,
    type_arg: Option<&str>,
    summary: bool,
) -> Result<(), TankobonError> {
    let roots = if roots.is_empty() {
        config.library.roots.clone()
    } else {
        roots
    };
    if roots.is_empty() {
        return Err(TankobonError::Config(
            "no library roots given or configured".to_string(),
        ));
    }

    let library_type = library_type(type_arg, config)?;
    let patterns = config.patterns()?;
    let result = scan_library(&roots, library_type, &patterns, &config.scanner);

    if summary {
        print_json(&serde_json::json!({
            "filesScanned": result.files_scanned,
            "filesParsed": result.files_parsed,
            "filesSkipped": result.files_skipped,
        }))
    } else {
        print_json(&result)
    }
}

fn run_normalize(mode: NormalizeMode, value: &str, comic: bool) -> Result<(), TankobonError> {
    let output = match mode {
        NormalizeMode::Clean => serde_json::json!(clean_title(value, comic, true)),
        NormalizeMode::Key => serde_json::json!(normalize(value)),
        NormalizeMode::SpecialTitle => serde_json::json!(clean_special_title(value)),
        NormalizeMode::Path => serde_json::json!(normalize_path(value)),
        NormalizeMode::Pad => serde_json::json!(pad_zeros(value)),
        NormalizeMode::Range => serde_json::json!({
            "min": min_number_from_range(value),
            "max": max_number_from_range(value),
        }),
    };
    print_json(&output)
}

fn run_config(config: &AppConfig, action: ConfigAction) -> Result<(), TankobonError> {
    match action {
        ConfigAction::Show => {
            print!("{}", config.to_toml()?);
        }
        ConfigAction::Path => println!("{}", AppConfig::config_path().display()),
        ConfigAction::Init { force } => {
            let path = AppConfig::config_path();
            if path.exists() && !force {
                return Err(TankobonError::Config(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            AppConfig::defaults()?.save()?;
            tracing::info!(path = %path.display(), "Wrote default config");
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), TankobonError> {
    let config = load_config(&cli)?;
    init_logging(&cli, &config);

    match cli.command {
        Commands::Parse {
            file,
            root,
            library_root,
            library_type,
            patterns,
            metadata,
            book_info,
        } => run_parse(
            &config,
            &file,
            root.as_deref(),
            library_root.as_deref(),
            library_type.as_deref(),
            &patterns,
            metadata.as_deref(),
            book_info.as_deref(),
        ),
        Commands::Scan {
            roots,
            library_type,
            summary,
        } => run_scan(&config, roots, library_type.as_deref(), summary),
        Commands::Normalize { mode, value, comic } => run_normalize(mode, &value, comic),
        Commands::Config { action } => run_config(&config, action),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
