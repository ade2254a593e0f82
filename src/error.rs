//! Error types for catalog loading, installation, and the command layer.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or parsing the agent catalog.
///
/// Every variant names the document it concerns so a failed load can be
/// attributed to a single file.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid agent file format in {document}: {reason}")]
    InvalidFormat { document: String, reason: String },

    #[error("Missing required field '{field}' in agent file {document}")]
    MissingRequiredField { document: String, field: String },

    #[error("Agent file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Duplicate agent identifier '{identifier}' in {second} (first defined in {first})")]
    DuplicateIdentifier {
        identifier: String,
        first: String,
        second: String,
    },

    #[error("Failed to read catalog source {}: {source}", .path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    pub(crate) fn invalid_format(document: &str, reason: impl Into<String>) -> Self {
        ParseError::InvalidFormat {
            document: document.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn missing_field(document: &str, field: &str) -> Self {
        ParseError::MissingRequiredField {
            document: document.to_string(),
            field: field.to_string(),
        }
    }
}

/// Errors raised while writing agents into a target directory.
#[derive(Debug, Error)]
pub enum InstallError {
    #[error("Permission denied: Cannot write to {}", .0.display())]
    PermissionDenied(PathBuf),

    #[error("Agent '{name}' already exists at {}", .path.display())]
    AlreadyExists { name: String, path: PathBuf },

    #[error("Failed to create directory at {}: {reason}", .path.display())]
    DirectoryCreationFailed { path: PathBuf, reason: String },

    #[error("Failed to copy agent '{name}': {source}")]
    CopyFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Target directory not found: {}", .0.display())]
    TargetNotFound(PathBuf),
}

impl InstallError {
    /// Map an I/O failure on `path` for agent `name` onto the install taxonomy.
    pub(crate) fn from_io(name: &str, path: &std::path::Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::PermissionDenied => InstallError::PermissionDenied(path.to_path_buf()),
            std::io::ErrorKind::AlreadyExists => InstallError::AlreadyExists {
                name: name.to_string(),
                path: path.to_path_buf(),
            },
            _ => InstallError::CopyFailed {
                name: name.to_string(),
                source: err,
            },
        }
    }
}

/// Top-level error returned by the command layer.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Catalog(#[from] ParseError),

    #[error(transparent)]
    Install(#[from] InstallError),

    #[error("Agent not found: {0}")]
    AgentNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Configuration error: {0}")]
    ConfigSource(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
