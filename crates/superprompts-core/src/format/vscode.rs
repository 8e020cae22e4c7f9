//! VS Code MCP format.

use serde_json::Value;

use super::{FormatAdapter, render_base_server};
use crate::mcp::ServerDefinition;

#[derive(Debug, Default, Clone, Copy)]
pub struct VsCodeAdapter;

impl FormatAdapter for VsCodeAdapter {
    fn servers_path(&self) -> &'static [&'static str] {
        // Nested under "mcp" rather than the top-level "mcpServers"
        &["mcp", "servers"]
    }

    fn render_server(&self, server: &ServerDefinition) -> Value {
        Value::Object(render_base_server(server))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::DocumentMeta;
    use crate::mcp::ServerSet;
    use serde_json::json;

    #[test]
    fn renders_nested_servers_without_version() {
        let mut servers = ServerSet::new();
        servers.insert(
            "test".to_string(),
            ServerDefinition::new("test", "python")
                .unwrap()
                .with_args(["-m", "test.server"])
                .with_version("2.0.0"),
        );

        let doc = VsCodeAdapter.to_document(&servers, &DocumentMeta::default());

        assert_eq!(
            doc,
            json!({"mcp": {"servers": {"test": {"command": "python", "args": ["-m", "test.server"]}}}})
        );
    }

    #[test]
    fn from_document_names_missing_container() {
        let err = VsCodeAdapter.from_document(&json!({"mcp": {}})).unwrap_err();
        assert!(err.to_string().contains("mcp.servers"));
    }

    #[test]
    fn parses_env_and_cwd() {
        let doc = json!({"mcp": {"servers": {"fs": {
            "command": "npx",
            "env": {"ROOT": "/tmp"},
            "cwd": "/work"
        }}}});

        let servers = VsCodeAdapter.from_document(&doc).unwrap();
        let fs = &servers["fs"];

        assert_eq!(fs.name, "fs");
        assert_eq!(fs.env.get("ROOT").map(String::as_str), Some("/tmp"));
        assert_eq!(fs.cwd.as_deref(), Some("/work"));
    }
}
