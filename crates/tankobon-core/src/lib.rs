pub mod config;
pub mod error;
pub mod scanner;

pub use config::AppConfig;
pub use error::TankobonError;
pub use scanner::{scan_configured, scan_library, ScanEntry, ScanResult};
