//! Template registry for named server presets.
//!
//! The registry is built once at startup (built-ins, optionally extended
//! from a user templates file) and only read afterwards. Callers hold it and
//! pass it by reference to the generator.

use std::path::Path;

use crate::config::io::load_document;
use crate::error::{ConfigError, Result};
use crate::format::{FormatChoice, adapter_for};

use super::{ServerDefinition, ServerSet};

/// Registry of available server templates.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: ServerSet,
}

impl TemplateRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with the built-in templates.
    pub fn builtin() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(superprompts_template()?);
        registry.register(github_template()?);
        registry.register(filesystem_template()?);
        Ok(registry)
    }

    /// Built-ins extended by the servers of a configuration document on disk.
    ///
    /// Entries from the file replace built-ins of the same name.
    pub fn builtin_with_file(path: &Path) -> Result<Self> {
        let mut registry = Self::builtin()?;
        registry.extend_from_file(path)?;
        Ok(registry)
    }

    /// Register a template, replacing any with the same name.
    pub fn register(&mut self, template: ServerDefinition) {
        self.templates.insert(template.name.clone(), template);
    }

    fn extend_from_file(&mut self, path: &Path) -> Result<()> {
        let doc = load_document(path)?;
        let format = FormatChoice::Auto.resolve(&doc)?;
        let servers = adapter_for(format).from_document(&doc)?;
        tracing::debug!(
            path = %path.display(),
            count = servers.len(),
            "loaded user templates"
        );
        for server in servers.into_values() {
            self.register(server);
        }
        Ok(())
    }

    /// Get a template by name.
    pub fn get(&self, name: &str) -> Option<&ServerDefinition> {
        self.templates.get(name)
    }

    /// All templates in name order.
    pub fn all(&self) -> impl Iterator<Item = &ServerDefinition> {
        self.templates.values()
    }

    /// List all template names.
    pub fn names(&self) -> Vec<&str> {
        self.templates.keys().map(String::as_str).collect()
    }

    /// Resolve every requested name.
    ///
    /// Fails with all missing names at once rather than stopping at the
    /// first one.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<ServerSet> {
        let mut resolved = ServerSet::new();
        let mut missing = Vec::new();

        for name in names {
            let name = name.as_ref();
            match self.templates.get(name) {
                Some(template) => {
                    resolved.insert(name.to_string(), template.clone());
                }
                None => {
                    if !missing.iter().any(|m| m == name) {
                        missing.push(name.to_string());
                    }
                }
            }
        }

        if !missing.is_empty() {
            return Err(ConfigError::UnknownTemplates { names: missing });
        }
        Ok(resolved)
    }
}

fn superprompts_template() -> Result<ServerDefinition> {
    Ok(ServerDefinition::new("superprompts", "poetry")?
        .with_args(["run", "python", "-m", "superprompts.mcp.server"])
        .with_description("SuperPrompts MCP Server - Access to AI prompt collection")
        .with_version("1.0.0"))
}

fn github_template() -> Result<ServerDefinition> {
    Ok(ServerDefinition::new("github", "npx")?
        .with_args(["-y", "github-mcp-server"])
        .with_description("GitHub MCP Server - Repository operations")
        .with_version("1.0.0"))
}

fn filesystem_template() -> Result<ServerDefinition> {
    Ok(ServerDefinition::new("filesystem", "npx")?
        .with_args([
            "-y",
            "@modelcontextprotocol/server-filesystem",
            "/path/to/your/project",
        ])
        .with_description("Filesystem MCP Server - File operations")
        .with_version("1.0.0"))
}
