//! Canonical MCP server definition
//!
//! Every client format is parsed into and rendered from this model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Servers keyed by name, iterated in name order.
pub type ServerSet = BTreeMap<String, ServerDefinition>;

/// One MCP server invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerDefinition {
    /// Identifier, equal to the map key in a document
    pub name: String,

    /// Executable name or path
    pub command: String,

    /// Command arguments
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<String>,

    /// Environment variables
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,

    /// Working directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,

    /// Human-readable summary
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Server version (semver)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

impl ServerDefinition {
    /// Create a definition with no args, env or metadata.
    ///
    /// Fails if `name` or `command` is empty (or whitespace only).
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let command = command.into();

        if name.trim().is_empty() {
            return Err(ConfigError::validation("name", "must be a non-empty string"));
        }
        if command.trim().is_empty() {
            return Err(ConfigError::validation(
                format!("{name}.command"),
                "must be a non-empty string",
            ));
        }

        Ok(Self {
            name,
            command,
            args: Vec::new(),
            env: BTreeMap::new(),
            cwd: None,
            description: None,
            version: None,
        })
    }

    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.insert(key.into(), value.into());
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<String>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

}

/// Parse a `KEY=VALUE` pair as used by `--env`.
pub fn parse_env_pair(pair: &str) -> Result<(String, String)> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(ConfigError::validation(
            "env",
            format!("expected KEY=VALUE, got '{pair}'"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_rejects_empty_command() {
        let err = ServerDefinition::new("test", "").unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));
    }

    #[test]
    fn new_rejects_blank_name() {
        let err = ServerDefinition::new("  ", "echo").unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "name"));
    }

    #[test]
    fn minimal_definition_has_no_extras() {
        let server = ServerDefinition::new("minimal", "echo").unwrap();

        assert_eq!(server.name, "minimal");
        assert_eq!(server.command, "echo");
        assert!(server.args.is_empty());
        assert!(server.env.is_empty());
        assert_eq!(server.cwd, None);
        assert_eq!(server.description, None);
        assert_eq!(server.version, None);
    }

    #[test]
    fn builder_sets_every_field() {
        let server = ServerDefinition::new("test-server", "python")
            .unwrap()
            .with_args(["-m", "test.server"])
            .with_env("TOKEN", "x")
            .with_cwd("/srv")
            .with_description("Test server")
            .with_version("1.0.0");

        assert_eq!(server.args, vec!["-m", "test.server"]);
        assert_eq!(server.env.get("TOKEN").map(String::as_str), Some("x"));
        assert_eq!(server.cwd.as_deref(), Some("/srv"));
        assert_eq!(server.description.as_deref(), Some("Test server"));
        assert_eq!(server.version.as_deref(), Some("1.0.0"));
    }

    #[test]
    fn equality_is_structural() {
        let a = ServerDefinition::new("a", "npx").unwrap().with_args(["-y"]);
        let b = ServerDefinition::new("a", "npx").unwrap().with_args(["-y"]);
        let c = ServerDefinition::new("a", "npx").unwrap();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn parse_env_pair_splits_on_first_equals() {
        assert_eq!(
            parse_env_pair("URL=a=b").unwrap(),
            ("URL".to_string(), "a=b".to_string())
        );
        assert!(parse_env_pair("NOVALUE").is_err());
        assert!(parse_env_pair("=x").is_err());
    }
}
