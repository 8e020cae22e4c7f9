//! Superprompts Core Library
//!
//! Generates, validates, converts and merges MCP server configuration
//! documents for Cursor, VS Code and a generic JSON layout.

pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod import;
pub mod mcp;
pub mod tools;

pub use error::{ConfigError, Result};

/// Re-exports of commonly used types
pub mod prelude {
    // Model
    pub use crate::mcp::{ServerDefinition, ServerSet, TemplateRegistry};

    // Formats
    pub use crate::format::{DetectedFormat, FormatAdapter, FormatChoice, McpFormat, detect};

    // Document operations
    pub use crate::config::{
        ConfigGenerator, MergeResult, Severity, ValidationIssue, convert, merge, validate,
    };

    // Errors
    pub use crate::error::{ConfigError, Result};
}
