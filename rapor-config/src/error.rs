//! Configuration errors

use thiserror::Error;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Why a configuration could not be loaded
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    FileReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// A `RAPOR_*` override could not be parsed
    #[error("Environment variable error: {0}")]
    EnvError(String),

    /// A domain rejected one of its values during validation
    #[error("Domain configuration error in {domain}: {message}")]
    DomainError { domain: String, message: String },
}
