//! Config command implementation.
//!
//! Creates, validates and converts MCP configuration documents on disk.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde_json::Value;

use crate::config::{
    ConfigGenerator, ValidationIssue, convert, has_errors, load_document, load_existing,
    merge_servers, save_document, validate,
};
use crate::format::{DocumentMeta, FormatChoice, McpFormat, adapter_for};
use crate::mcp::{ServerDefinition, ServerSet, TemplateRegistry};

/// Template used when a create request names nothing
pub const DEFAULT_TEMPLATE: &str = "superprompts";

/// Options for creating a configuration document
#[derive(Debug, Clone)]
pub struct CreateOptions {
    /// Template names to include
    pub templates: Vec<String>,
    /// Custom servers added on top of the templates
    pub servers: ServerSet,
    /// Output format
    pub format: McpFormat,
    /// Output path (None = the format's default path in the project)
    pub output: Option<PathBuf>,
    /// Merge into an existing document instead of replacing it
    pub merge: bool,
    /// Build the document without writing it
    pub dry_run: bool,
}

impl Default for CreateOptions {
    fn default() -> Self {
        Self::new(McpFormat::Cursor)
    }
}

impl CreateOptions {
    pub fn new(format: McpFormat) -> Self {
        Self {
            templates: Vec::new(),
            servers: ServerSet::new(),
            format,
            output: None,
            merge: false,
            dry_run: false,
        }
    }

    pub fn with_template(mut self, name: impl Into<String>) -> Self {
        self.templates.push(name.into());
        self
    }

    pub fn with_templates<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.templates.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn with_server(mut self, server: ServerDefinition) -> Self {
        self.servers.insert(server.name.clone(), server);
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

    /// Template names to resolve, falling back to the default template.
    fn effective_templates(&self) -> Vec<String> {
        if self.templates.is_empty() && self.servers.is_empty() {
            vec![DEFAULT_TEMPLATE.to_string()]
        } else {
            self.templates.clone()
        }
    }
}

/// Result of writing servers to a configuration document
#[derive(Debug, Clone)]
pub struct WriteReport {
    /// Target path
    pub path: PathBuf,
    /// Format of the document
    pub format: McpFormat,
    /// The final document
    pub document: Value,
    /// Servers not present before
    pub added: Vec<String>,
    /// Servers that replaced an existing entry
    pub replaced: Vec<String>,
    /// Whether the document was written to disk
    pub written: bool,
}

/// Options for converting a document
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Source format (Auto = detect)
    pub source: FormatChoice,
    /// Target format
    pub target: McpFormat,
    /// Where to write the result (None = only return it)
    pub output: Option<PathBuf>,
}

impl ConvertOptions {
    pub fn new(target: McpFormat) -> Self {
        Self {
            source: FormatChoice::Auto,
            target,
            output: None,
        }
    }

    pub fn with_source(mut self, source: FormatChoice) -> Self {
        self.source = source;
        self
    }

    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = Some(output.into());
        self
    }
}

/// Result of a conversion
#[derive(Debug, Clone)]
pub struct ConvertReport {
    pub source: McpFormat,
    pub target: McpFormat,
    pub document: Value,
    /// Path written, if any
    pub output: Option<PathBuf>,
}

/// Result of validating a document on disk
#[derive(Debug, Clone)]
pub struct ValidateReport {
    pub path: PathBuf,
    /// Format checked against (None when detection failed)
    pub format: Option<McpFormat>,
    pub issues: Vec<ValidationIssue>,
}

impl ValidateReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        has_errors(&self.issues)
    }
}

/// Config command orchestrator
#[derive(Debug)]
pub struct ConfigCommand {
    registry: TemplateRegistry,
    project_dir: PathBuf,
}

impl ConfigCommand {
    /// Create a config command with an explicit registry and project directory
    pub fn new(registry: TemplateRegistry, project_dir: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            project_dir: project_dir.into(),
        }
    }

    /// Create a config command with the built-in templates, optionally
    /// extended from a templates file
    pub fn with_templates_file(
        templates_file: Option<&Path>,
        project_dir: impl Into<PathBuf>,
    ) -> anyhow::Result<Self> {
        let registry = match templates_file {
            Some(path) => TemplateRegistry::builtin_with_file(path)
                .with_context(|| format!("Failed to load templates from {}", path.display()))?,
            None => TemplateRegistry::builtin()?,
        };
        Ok(Self::new(registry, project_dir))
    }

    pub fn registry(&self) -> &TemplateRegistry {
        &self.registry
    }

    /// Where a document of `format` goes when no output path is given.
    pub fn default_output(&self, format: McpFormat) -> PathBuf {
        self.project_dir.join(format.default_relative_path())
    }

    /// Generate a document from templates and custom servers and write it.
    ///
    /// Nothing is written if any template is unknown.
    pub fn create(&self, options: &CreateOptions) -> anyhow::Result<WriteReport> {
        let templates = options.effective_templates();
        let servers = ConfigGenerator::new(&self.registry)
            .resolve(&templates, &options.servers)
            .context("Failed to resolve servers")?;

        let path = options
            .output
            .clone()
            .unwrap_or_else(|| self.default_output(options.format));

        write_servers(
            &servers,
            options.format,
            &path,
            options.merge,
            options.dry_run,
        )
    }

    /// Validate the document at `path`.
    pub fn validate(&self, path: &Path, format: FormatChoice) -> anyhow::Result<ValidateReport> {
        let doc = load_document(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let issues = validate(&doc, format);
        tracing::debug!(path = %path.display(), issues = issues.len(), "validated document");

        Ok(ValidateReport {
            path: path.to_path_buf(),
            format: format.resolve(&doc).ok(),
            issues,
        })
    }

    /// Convert the document at `path`, writing it when an output is given.
    pub fn convert(&self, path: &Path, options: &ConvertOptions) -> anyhow::Result<ConvertReport> {
        let doc = load_document(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let source = options.source.resolve(&doc)?;
        let document = convert(&doc, FormatChoice::Explicit(source), options.target)
            .with_context(|| format!("Failed to convert {}", path.display()))?;

        if let Some(output) = &options.output {
            save_document(output, &document)
                .with_context(|| format!("Failed to write {}", output.display()))?;
        }

        Ok(ConvertReport {
            source,
            target: options.target,
            document,
            output: options.output.clone(),
        })
    }
}

/// Render `servers` into the document at `path`, merging when asked.
///
/// A missing file with `merge` set is treated as an empty document.
pub(crate) fn write_servers(
    servers: &ServerSet,
    format: McpFormat,
    path: &Path,
    merge: bool,
    dry_run: bool,
) -> anyhow::Result<WriteReport> {
    let existing = if merge {
        load_existing(path).with_context(|| format!("Failed to read {}", path.display()))?
    } else {
        None
    };

    let (document, added, replaced) = match existing {
        Some(existing) => {
            let merged = merge_servers(&existing, servers, format)
                .with_context(|| format!("Failed to merge into {}", path.display()))?;
            (merged.document, merged.added, merged.replaced)
        }
        None => (
            adapter_for(format).to_document(servers, &DocumentMeta::default()),
            servers.keys().cloned().collect(),
            Vec::new(),
        ),
    };

    if !dry_run {
        save_document(path, &document)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    tracing::debug!(
        path = %path.display(),
        %format,
        dry_run,
        "created configuration"
    );

    Ok(WriteReport {
        path: path.to_path_buf(),
        format,
        document,
        added,
        replaced,
        written: !dry_run,
    })
}
