//! Import command implementation.
//!
//! Turns a project file into a server entry and writes it to a
//! configuration document.

use std::path::PathBuf;

use anyhow::Context;

use crate::commands::config::{WriteReport, write_servers};
use crate::format::McpFormat;
use crate::import::{ImportSource, import_server};
use crate::mcp::ServerSet;

/// Options for importing a server
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// File to import from
    pub file: PathBuf,
    /// What to read from the file
    pub source: ImportSource,
    /// Output format
    pub format: McpFormat,
    /// Output path (None = the format's default path in the project)
    pub output: Option<PathBuf>,
    /// Merge into an existing document instead of replacing it
    pub merge: bool,
    /// Build the document without writing it
    pub dry_run: bool,
}

impl ImportOptions {
    pub fn new(file: impl Into<PathBuf>, source: ImportSource) -> Self {
        Self {
            file: file.into(),
            source,
            format: McpFormat::Cursor,
            output: None,
            merge: false,
            dry_run: false,
        }
    }

    pub fn with_format(mut self, format: McpFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }

    pub fn with_merge(mut self, merge: bool) -> Self {
        self.merge = merge;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }
}

/// Import command orchestrator
#[derive(Debug)]
pub struct ImportCommand {
    project_dir: PathBuf,
}

impl ImportCommand {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
        }
    }

    /// Import one server and write it out.
    pub fn execute(&self, options: &ImportOptions) -> anyhow::Result<WriteReport> {
        let server = import_server(&options.file, &options.source)
            .with_context(|| format!("Failed to import from {}", options.file.display()))?;

        let mut servers = ServerSet::new();
        servers.insert(server.name.clone(), server);

        let path = options.output.clone().unwrap_or_else(|| {
            self.project_dir
                .join(options.format.default_relative_path())
        });

        write_servers(&servers, options.format, &path, options.merge, options.dry_run)
    }
}
