use thiserror::Error;

/// Errors returned by normalization and table construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Email should be a string, got {0}")]
    TypeValidation(String),

    #[error("Email validation error: {0}")]
    EmailFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::Config(format!("invalid cut pattern: {err}"))
    }
}

/// Result type alias using the crate error
pub type Result<T> = std::result::Result<T, Error>;
