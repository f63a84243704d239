//! Error types for panelpop

use thiserror::Error;

/// The main error type for panelpop operations
#[derive(Debug, Error)]
pub enum PanelPopError {
    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),

    #[error("Platform error: {0}")]
    PlatformError(String),

    #[error("Display error: {0}")]
    DisplayError(String),

    #[error("Font error: {0}")]
    FontError(String),
}

/// Result type alias for panelpop operations
pub type Result<T> = std::result::Result<T, PanelPopError>;

impl From<toml::de::Error> for PanelPopError {
    fn from(err: toml::de::Error) -> Self {
        PanelPopError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for PanelPopError {
    fn from(err: toml::ser::Error) -> Self {
        PanelPopError::TomlSerError(err.to_string())
    }
}
