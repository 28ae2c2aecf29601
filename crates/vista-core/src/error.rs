//! Error types for Vista

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for Vista operations
#[derive(Debug, Error)]
pub enum VistaError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Cannot read directory {}: {source}", path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("File not selected")]
    NothingSelected,

    #[error("Unrecognized model file extension:[{0}]")]
    UnsupportedFormat(String),

    #[error("Load error: {0}")]
    LoadError(String),

    #[error("Watch error: {0}")]
    WatchError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("TOML parse error: {0}")]
    TomlParseError(String),

    #[error("TOML serialization error: {0}")]
    TomlSerError(String),
}

impl VistaError {
    /// Wrap an IO failure on a directory listing with the path that failed
    pub fn unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        VistaError::DirectoryUnreadable {
            path: path.into(),
            source,
        }
    }

    /// True for every error that originated from the filesystem
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            VistaError::IoError(_) | VistaError::DirectoryUnreadable { .. }
        )
    }
}

/// Result type alias for Vista operations
pub type Result<T> = std::result::Result<T, VistaError>;

impl From<toml::de::Error> for VistaError {
    fn from(err: toml::de::Error) -> Self {
        VistaError::TomlParseError(err.to_string())
    }
}

impl From<toml::ser::Error> for VistaError {
    fn from(err: toml::ser::Error) -> Self {
        VistaError::TomlSerError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_match_alert_text() {
        assert_eq!(VistaError::NothingSelected.to_string(), "File not selected");
        assert_eq!(
            VistaError::UnsupportedFormat(".txt".into()).to_string(),
            "Unrecognized model file extension:[.txt]"
        );
    }

    #[test]
    fn test_unreadable_is_io() {
        let err = VistaError::unreadable(
            "/nope",
            std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        );
        assert!(err.is_io());
        assert!(err.to_string().contains("/nope"));
        assert!(!VistaError::NothingSelected.is_io());
    }
}
