//! High-level commands for superprompts operations.
//!
//! Each command wraps the document operations with file I/O and error
//! context, and is what the CLI calls.

pub mod config;
pub mod import;

pub use config::{
    ConfigCommand, ConvertOptions, ConvertReport, CreateOptions, DEFAULT_TEMPLATE, ValidateReport,
    WriteReport,
};
pub use import::{ImportCommand, ImportOptions};
