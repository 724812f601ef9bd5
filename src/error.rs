//! Error types for settings loading and locale resolution.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Fatal errors raised while loading or validating configuration.
///
/// Any of these at startup must stop the process from initializing.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The base source could not be found or read.
    #[error("unable to locate application configuration file {}: {source}", path.display())]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The base source is not a valid properties document.
    #[error("error reading application configuration {}: line {line}: {message}", path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A properties document failed to parse (no file attached).
    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },

    /// Loaded settings failed startup validation.
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Errors from locale resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocaleError {
    /// No request locale and no configured fallback locale.
    #[error("no request locale available and `application.locale` is not configured")]
    MissingFallback,

    /// The locale string has no usable language code.
    #[error("invalid locale tag: {0:?}")]
    InvalidTag(String),
}
