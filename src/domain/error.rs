//! Error types for the highlight-selected plugin.
//!
//! This module defines the centralized error type [`HighlightError`] and a type alias
//! [`Result`] for convenient error handling throughout the plugin. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Only the settings loaders and pattern compilation can fail. The controller and
//! registry never surface errors to the host: a failure degrades to "no highlight".

use thiserror::Error;

/// The main error type for highlight-selected operations.
///
/// # Examples
///
/// ```
/// use highlight_selected::HighlightError;
///
/// fn validate() -> Result<(), HighlightError> {
///     Err(HighlightError::Settings("highlightColor must not be empty".to_string()))
/// }
/// assert!(validate().is_err());
/// ```
#[derive(Debug, Error)]
pub enum HighlightError {
    /// Settings were well-formed but carried an invalid value.
    #[error("Settings error: {0}")]
    Settings(String),

    /// Reading a settings file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The host's JSON settings payload could not be parsed.
    #[error("JSON settings error: {0}")]
    Json(#[from] serde_json::Error),

    /// A TOML settings file could not be parsed.
    #[error("TOML settings error: {0}")]
    Toml(#[from] toml::de::Error),

    /// A selection could not be compiled into a search pattern.
    ///
    /// Only reachable for selections large enough to exceed the regex size limit.
    #[error("Pattern error: {0}")]
    Pattern(String),
}

/// A specialized `Result` type for highlight-selected operations.
pub type Result<T> = std::result::Result<T, HighlightError>;
