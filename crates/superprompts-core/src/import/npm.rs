//! Server definitions from `package.json` scripts.

use serde_json::Value;

use crate::error::{ConfigError, Result};
use crate::format::DEFAULT_DOCUMENT_VERSION;
use crate::mcp::ServerDefinition;

/// Build a server that runs the npm script `script`.
///
/// `node …` and `npm …` scripts are invoked directly with their arguments;
/// anything else goes through `npm run <script>`.
pub fn server_from_package_json(package: &Value, script: &str) -> Result<ServerDefinition> {
    let command_line = package
        .get("scripts")
        .and_then(|scripts| scripts.get(script))
        .ok_or_else(|| ConfigError::Import(format!("script '{script}' not found in package.json")))?
        .as_str()
        .ok_or_else(|| ConfigError::Import(format!("script '{script}' is not a string")))?;

    let (command, args): (&str, Vec<String>) =
        if let Some(rest) = command_line.strip_prefix("node ") {
            ("node", split_args(rest))
        } else if let Some(rest) = command_line.strip_prefix("npm ") {
            ("npm", split_args(rest))
        } else {
            ("npm", vec!["run".to_string(), script.to_string()])
        };

    let version = package
        .get("version")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_DOCUMENT_VERSION);

    Ok(ServerDefinition::new(script, command)?
        .with_args(args)
        .with_description(format!("MCP server for npm script: {script}"))
        .with_version(version))
}

fn split_args(rest: &str) -> Vec<String> {
    rest.split_whitespace().map(str::to_string).collect()
}
