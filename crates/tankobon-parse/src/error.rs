use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("unknown library type: {0}")]
    UnknownLibraryType(String),

    #[error("invalid pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },
}
