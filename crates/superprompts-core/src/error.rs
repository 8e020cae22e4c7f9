//! Error taxonomy for configuration operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by construction, parsing, generation and document I/O.
///
/// Validation of a whole document does not use this type; it reports
/// [`ValidationIssue`](crate::config::validator::ValidationIssue)s instead.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A server definition field constraint was violated.
    #[error("validation error: {field}: {message}")]
    Validation { field: String, message: String },

    /// One or more requested templates are not in the registry.
    #[error("unknown template(s): {}", names.join(", "))]
    UnknownTemplates { names: Vec<String> },

    /// A document does not have the shape its format requires.
    #[error("format error at '{path}': {message}")]
    Format { path: String, message: String },

    /// The format could not be detected and none was given.
    #[error(
        "ambiguous format: document matches none of cursor, vscode, generic; pass the format explicitly"
    )]
    AmbiguousFormat,

    /// A project file could not be turned into a server definition.
    #[error("import failed: {0}")]
    Import(String),

    /// Reading or writing a document failed.
    #[error("i/o error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document could not be parsed or serialized.
    #[error("invalid document {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

impl ConfigError {
    pub(crate) fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub(crate) fn format(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Format {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T, E = ConfigError> = std::result::Result<T, E>;
