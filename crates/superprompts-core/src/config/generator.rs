//! Configuration document generation from templates.

use serde_json::Value;

use crate::error::Result;
use crate::format::{DocumentMeta, McpFormat, adapter_for};
use crate::mcp::{ServerSet, TemplateRegistry};

/// Builds configuration documents from a template registry.
#[derive(Debug, Clone, Copy)]
pub struct ConfigGenerator<'a> {
    registry: &'a TemplateRegistry,
}

impl<'a> ConfigGenerator<'a> {
    pub fn new(registry: &'a TemplateRegistry) -> Self {
        Self { registry }
    }

    /// Resolve the named templates and add `extra_servers` on top.
    ///
    /// Extra servers replace templates of the same name. Fails listing every
    /// unknown template name.
    pub fn resolve<S: AsRef<str>>(
        &self,
        template_names: &[S],
        extra_servers: &ServerSet,
    ) -> Result<ServerSet> {
        let mut servers = self.registry.resolve(template_names)?;
        for (name, server) in extra_servers {
            servers.insert(name.clone(), server.clone());
        }
        tracing::debug!(
            templates = template_names.len(),
            extra = extra_servers.len(),
            total = servers.len(),
            "resolved servers"
        );
        Ok(servers)
    }

    /// Generate a complete document in `format`.
    pub fn generate<S: AsRef<str>>(
        &self,
        template_names: &[S],
        format: McpFormat,
        extra_servers: &ServerSet,
    ) -> Result<Value> {
        let servers = self.resolve(template_names, extra_servers)?;
        Ok(adapter_for(format).to_document(&servers, &DocumentMeta::default()))
    }
}
