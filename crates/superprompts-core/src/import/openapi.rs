//! Server definitions from OpenAPI specifications.

use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::format::DEFAULT_DOCUMENT_VERSION;
use crate::mcp::ServerDefinition;

/// Build a server that exposes an OpenAPI spec through `openapi-mcp-server`.
///
/// `spec_ref` is the path handed to the server process. The spec must list at
/// least one entry under `servers`.
pub fn server_from_openapi(spec: &Value, spec_ref: &str, name: &str) -> Result<ServerDefinition> {
    let has_servers = spec
        .get("servers")
        .and_then(Value::as_array)
        .is_some_and(|servers| !servers.is_empty());
    if !has_servers {
        return Err(ConfigError::Import(
            "no servers found in OpenAPI spec".to_string(),
        ));
    }

    let info = spec.get("info");
    let title = info
        .and_then(|info| info.get("title"))
        .and_then(Value::as_str)
        .unwrap_or(name);
    let version = info
        .and_then(|info| info.get("version"))
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_DOCUMENT_VERSION);

    Ok(ServerDefinition::new(name, "npx")?
        .with_args(["-y", "openapi-mcp-server", spec_ref])
        .with_description(format!("MCP server for {title}"))
        .with_version(version))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn uses_info_title_and_version() {
        let spec = json!({
            "info": {"title": "Pet Store", "version": "2.4.0"},
            "servers": [{"url": "https://petstore.example.com"}]
        });

        let server = server_from_openapi(&spec, "openapi.json", "pets").unwrap();

        assert_eq!(server.command, "npx");
        assert_eq!(server.args, vec!["-y", "openapi-mcp-server", "openapi.json"]);
        assert_eq!(server.description.as_deref(), Some("MCP server for Pet Store"));
        assert_eq!(server.version.as_deref(), Some("2.4.0"));
    }

    #[test]
    fn falls_back_to_server_name() {
        let spec = json!({"servers": [{"url": "http://localhost"}]});

        let server = server_from_openapi(&spec, "api.yaml", "local").unwrap();

        assert_eq!(server.description.as_deref(), Some("MCP server for local"));
        assert_eq!(server.version.as_deref(), Some("1.0.0"));
    }

    #[test]
    fn requires_servers() {
        assert!(server_from_openapi(&json!({"servers": []}), "x.json", "x").is_err());
        assert!(server_from_openapi(&json!({}), "x.json", "x").is_err());
    }
}
