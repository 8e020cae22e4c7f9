//! Server definitions from Docker Compose services.

use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::format::DEFAULT_DOCUMENT_VERSION;
use crate::mcp::ServerDefinition;

/// Build a server that runs `docker compose exec <service>`.
///
/// When the service `command` is a list, everything after its first element
/// is passed through; a string command adds nothing.
pub fn server_from_compose(compose: &Value, service: &str) -> Result<ServerDefinition> {
    let definition = compose
        .get("services")
        .and_then(|services| services.get(service))
        .ok_or_else(|| {
            ConfigError::Import(format!("service '{service}' not found in Docker Compose file"))
        })?;

    let mut args = vec![
        "compose".to_string(),
        "exec".to_string(),
        service.to_string(),
    ];
    if let Some(Value::Array(command)) = definition.get("command") {
        for (idx, part) in command.iter().enumerate().skip(1) {
            let part = part.as_str().ok_or_else(|| {
                ConfigError::Import(format!(
                    "service '{service}' command[{idx}] is not a string"
                ))
            })?;
            args.push(part.to_string());
        }
    }

    Ok(ServerDefinition::new(service, "docker")?
        .with_args(args)
        .with_description(format!("MCP server for Docker service: {service}"))
        .with_version(DEFAULT_DOCUMENT_VERSION))
}
