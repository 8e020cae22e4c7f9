//! Generic MCP format.
//!
//! Same nesting as VS Code plus a document version, and every server carries
//! its own name, description and version inline.

use serde_json::{Map, Value};

use super::{
    DEFAULT_DOCUMENT_VERSION, DocumentMeta, FormatAdapter, optional_string,
    parse_base_server, render_base_server,
};
use crate::error::Result;
use crate::mcp::ServerDefinition;

#[derive(Debug, Default, Clone, Copy)]
pub struct GenericAdapter;

impl FormatAdapter for GenericAdapter {
    fn servers_path(&self) -> &'static [&'static str] {
        &["mcp", "servers"]
    }

    fn render_server(&self, server: &ServerDefinition) -> Value {
        let mut obj = Map::new();
        obj.insert("name".to_string(), Value::String(server.name.clone()));
        obj.extend(render_base_server(server));
        if let Some(description) = &server.description {
            obj.insert(
                "description".to_string(),
                Value::String(description.clone()),
            );
        }
        obj.insert(
            "version".to_string(),
            Value::String(
                server
                    .version
                    .clone()
                    .unwrap_or_else(|| DEFAULT_DOCUMENT_VERSION.to_string()),
            ),
        );
        Value::Object(obj)
    }

    fn parse_server(&self, name: &str, value: &Value) -> Result<ServerDefinition> {
        let path = self.server_path(name);
        let mut server = parse_base_server(name, value, &path)?;
        if let Some(obj) = value.as_object() {
            server.description = optional_string(obj, "description", &path)?;
            server.version = optional_string(obj, "version", &path)?;
        }
        Ok(server)
    }

    fn read_meta(&self, doc: &Value) -> DocumentMeta {
        DocumentMeta {
            version: doc
                .pointer("/mcp/version")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }

    fn wrap_servers(&self, servers: Map<String, Value>, meta: &DocumentMeta) -> Value {
        let version = meta
            .version
            .clone()
            .unwrap_or_else(|| DEFAULT_DOCUMENT_VERSION.to_string());

        let mut mcp = Map::new();
        mcp.insert("version".to_string(), Value::String(version));
        mcp.insert("servers".to_string(), Value::Object(servers));

        let mut root = Map::new();
        root.insert("mcp".to_string(), Value::Object(mcp));
        Value::Object(root)
    }
}
