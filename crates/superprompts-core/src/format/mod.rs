//! Client-specific MCP configuration formats.
//!
//! Each supported client stores its server definitions under a different
//! JSON nesting. A [`FormatAdapter`] translates between that shape and the
//! canonical [`ServerSet`]; [`detect`] picks the format of an unknown document.
//!
//! | Format  | Servers live under  | Extras                               |
//! |---------|---------------------|--------------------------------------|
//! | Cursor  | `mcpServers`        | none                                 |
//! | VS Code | `mcp.servers`       | none                                 |
//! | Generic | `mcp.servers`       | `mcp.version`, inline name/version   |

mod cursor;
mod generic;
mod vscode;

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};
use crate::mcp::{ServerDefinition, ServerSet};

pub use cursor::CursorAdapter;
pub use generic::GenericAdapter;
pub use vscode::VsCodeAdapter;

/// Version written to Generic documents and servers when none is known.
pub const DEFAULT_DOCUMENT_VERSION: &str = "1.0.0";

/// A concrete configuration format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum McpFormat {
    Cursor,
    #[serde(rename = "vscode")]
    VsCode,
    Generic,
}

impl McpFormat {
    pub const ALL: [McpFormat; 3] = [McpFormat::Cursor, McpFormat::VsCode, McpFormat::Generic];

    pub fn id(&self) -> &'static str {
        match self {
            McpFormat::Cursor => "cursor",
            McpFormat::VsCode => "vscode",
            McpFormat::Generic => "generic",
        }
    }

    /// Where the format's file goes, relative to a project directory.
    pub fn default_relative_path(&self) -> PathBuf {
        match self {
            McpFormat::Cursor => PathBuf::from("mcp.json"),
            McpFormat::VsCode => PathBuf::from(".vscode").join("mcp.json"),
            McpFormat::Generic => PathBuf::from("mcp_config.json"),
        }
    }
}

impl fmt::Display for McpFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl TryFrom<&str> for McpFormat {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "cursor" => Ok(McpFormat::Cursor),
            "vscode" | "vs-code" => Ok(McpFormat::VsCode),
            "generic" => Ok(McpFormat::Generic),
            _ => {
                let valid: Vec<_> = McpFormat::ALL.iter().map(McpFormat::id).collect();
                anyhow::bail!(
                    "Invalid format: '{}'. Valid values: {}",
                    value,
                    valid.join(", ")
                )
            }
        }
    }
}

/// A format requested by the caller: explicit, or detected from the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormatChoice {
    #[default]
    Auto,
    Explicit(McpFormat),
}

impl FormatChoice {
    /// Resolve to a concrete format, detecting from `doc` when `Auto`.
    pub fn resolve(self, doc: &Value) -> Result<McpFormat> {
        match self {
            FormatChoice::Explicit(format) => Ok(format),
            FormatChoice::Auto => detect(doc).format().ok_or(ConfigError::AmbiguousFormat),
        }
    }
}

impl From<McpFormat> for FormatChoice {
    fn from(format: McpFormat) -> Self {
        FormatChoice::Explicit(format)
    }
}

impl TryFrom<&str> for FormatChoice {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        if value.eq_ignore_ascii_case("auto") {
            return Ok(FormatChoice::Auto);
        }
        McpFormat::try_from(value).map(FormatChoice::Explicit)
    }
}

/// Outcome of format detection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectedFormat {
    Cursor,
    VsCode,
    Generic,
    Unknown,
}

impl DetectedFormat {
    pub fn format(self) -> Option<McpFormat> {
        match self {
            DetectedFormat::Cursor => Some(McpFormat::Cursor),
            DetectedFormat::VsCode => Some(McpFormat::VsCode),
            DetectedFormat::Generic => Some(McpFormat::Generic),
            DetectedFormat::Unknown => None,
        }
    }
}

/// Detect the format of a document from its distinguishing keys.
///
/// `mcpServers` means Cursor. Under `mcp.servers`, the presence of
/// `mcp.version` means Generic and its absence VS Code; the version key is
/// checked first.
pub fn detect(doc: &Value) -> DetectedFormat {
    let detected = match doc.as_object() {
        None => DetectedFormat::Unknown,
        Some(root) if root.contains_key("mcpServers") => DetectedFormat::Cursor,
        Some(root) => match root.get("mcp").and_then(Value::as_object) {
            Some(mcp) if mcp.contains_key("servers") => {
                if mcp.contains_key("version") {
                    DetectedFormat::Generic
                } else {
                    DetectedFormat::VsCode
                }
            }
            _ => DetectedFormat::Unknown,
        },
    };
    tracing::debug!(?detected, "detected configuration format");
    detected
}

/// Format-level metadata that is not attached to any one server
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentMeta {
    /// Generic `mcp.version`
    pub version: Option<String>,
}

/// Translates between the canonical model and one client's JSON shape.
pub trait FormatAdapter: Send + Sync {
    /// Key path from the document root to the servers object.
    fn servers_path(&self) -> &'static [&'static str];

    /// Render one server object.
    fn render_server(&self, server: &ServerDefinition) -> Value;

    /// Parse one server object stored under `name`.
    fn parse_server(&self, name: &str, value: &Value) -> Result<ServerDefinition> {
        parse_base_server(name, value, &self.server_path(name))
    }

    /// Read format-level metadata from an existing document.
    fn read_meta(&self, _doc: &Value) -> DocumentMeta {
        DocumentMeta::default()
    }

    /// Wrap an already rendered servers object in the document shape.
    fn wrap_servers(&self, servers: Map<String, Value>, _meta: &DocumentMeta) -> Value {
        let mut root = Map::new();
        set_map_at_path(&mut root, self.servers_path(), servers);
        Value::Object(root)
    }

    /// Render a complete document.
    fn to_document(&self, servers: &ServerSet, meta: &DocumentMeta) -> Value {
        let rendered = servers
            .iter()
            .map(|(name, server)| (name.clone(), self.render_server(server)))
            .collect();
        self.wrap_servers(rendered, meta)
    }

    /// Parse a complete document into the canonical model.
    fn from_document(&self, doc: &Value) -> Result<ServerSet> {
        let servers = servers_at_path(doc, self.servers_path())?;
        servers
            .iter()
            .map(|(name, value)| Ok((name.clone(), self.parse_server(name, value)?)))
            .collect()
    }

    /// Dotted path of a server entry, for error messages.
    fn server_path(&self, name: &str) -> String {
        format!("{}.{}", self.servers_path().join("."), name)
    }
}

/// Adapter for the given format.
pub fn adapter_for(format: McpFormat) -> Box<dyn FormatAdapter> {
    match format {
        McpFormat::Cursor => Box::new(CursorAdapter),
        McpFormat::VsCode => Box::new(VsCodeAdapter),
        McpFormat::Generic => Box::new(GenericAdapter),
    }
}

/// Servers object at `path`, required to exist.
pub(crate) fn servers_at_path<'a>(doc: &'a Value, path: &[&str]) -> Result<&'a Map<String, Value>> {
    let mut current = doc
        .as_object()
        .ok_or_else(|| ConfigError::format("$", "document root must be a JSON object"))?;
    for (idx, segment) in path.iter().enumerate() {
        let here = path[..=idx].join(".");
        let value = current
            .get(*segment)
            .ok_or_else(|| ConfigError::format(&here, "missing required key"))?;
        current = value
            .as_object()
            .ok_or_else(|| ConfigError::format(&here, "expected a JSON object"))?;
    }
    Ok(current)
}

/// Insert `map` at `path`, creating intermediate objects.
///
/// Non-object intermediates are replaced.
pub(crate) fn set_map_at_path(root: &mut Map<String, Value>, path: &[&str], map: Map<String, Value>) {
    let Some((last, parents)) = path.split_last() else {
        return;
    };
    let mut current = root;
    for segment in parents {
        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        if !entry.is_object() {
            *entry = Value::Object(Map::new());
        }
        let Value::Object(next) = entry else {
            return;
        };
        current = next;
    }
    current.insert(last.to_string(), Value::Object(map));
}

/// Fields shared by every format: command, args, env, cwd.
fn render_base_server(server: &ServerDefinition) -> Map<String, Value> {
    let mut obj = Map::new();
    obj.insert("command".to_string(), Value::String(server.command.clone()));
    if !server.args.is_empty() {
        obj.insert(
            "args".to_string(),
            Value::Array(server.args.iter().cloned().map(Value::String).collect()),
        );
    }
    if !server.env.is_empty() {
        obj.insert(
            "env".to_string(),
            Value::Object(
                server
                    .env
                    .iter()
                    .map(|(k, v)| (k.clone(), Value::String(v.clone())))
                    .collect(),
            ),
        );
    }
    if let Some(cwd) = &server.cwd {
        obj.insert("cwd".to_string(), Value::String(cwd.clone()));
    }
    obj
}

fn parse_base_server(name: &str, value: &Value, path: &str) -> Result<ServerDefinition> {
    let obj = value
        .as_object()
        .ok_or_else(|| ConfigError::format(path, "server entry must be a JSON object"))?;

    let command = match obj.get("command") {
        Some(Value::String(command)) => command.clone(),
        Some(_) => return Err(ConfigError::format(format!("{path}.command"), "must be a string")),
        None => {
            return Err(ConfigError::format(
                format!("{path}.command"),
                "missing required field",
            ));
        }
    };

    let mut server = ServerDefinition::new(name, command)?;

    if let Some(args) = obj.get("args") {
        server.args = string_list(args, &format!("{path}.args"))?;
    }
    if let Some(env) = obj.get("env") {
        server.env = string_map(env, &format!("{path}.env"))?;
    }
    server.cwd = optional_string(obj, "cwd", path)?;

    Ok(server)
}

fn string_list(value: &Value, path: &str) -> Result<Vec<String>> {
    let items = value
        .as_array()
        .ok_or_else(|| ConfigError::format(path, "must be an array of strings"))?;
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| ConfigError::format(format!("{path}[{idx}]"), "must be a string"))
        })
        .collect()
}

fn string_map(value: &Value, path: &str) -> Result<std::collections::BTreeMap<String, String>> {
    let map = value
        .as_object()
        .ok_or_else(|| ConfigError::format(path, "must be an object of strings"))?;
    map.iter()
        .map(|(key, item)| {
            item.as_str()
                .map(|s| (key.clone(), s.to_string()))
                .ok_or_else(|| ConfigError::format(format!("{path}.{key}"), "must be a string"))
        })
        .collect()
}

/// A string field that may be absent or null.
fn optional_string(obj: &Map<String, Value>, key: &str, path: &str) -> Result<Option<String>> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(ConfigError::format(format!("{path}.{key}"), "must be a string")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detect_cursor() {
        let doc = json!({"mcpServers": {}});
        assert_eq!(detect(&doc), DetectedFormat::Cursor);
    }

    #[test]
    fn detect_vscode_without_version() {
        let doc = json!({"mcp": {"servers": {}}});
        assert_eq!(detect(&doc), DetectedFormat::VsCode);
    }

    #[test]
    fn detect_generic_when_version_present() {
        let doc = json!({"mcp": {"servers": {"x": {"command": "echo"}}, "version": "1.0.0"}});
        assert_eq!(detect(&doc), DetectedFormat::Generic);
    }

    #[test]
    fn detect_unknown_shapes() {
        assert_eq!(detect(&json!({})), DetectedFormat::Unknown);
        assert_eq!(detect(&json!({"mcp": {}})), DetectedFormat::Unknown);
        assert_eq!(detect(&json!({"mcp": "x"})), DetectedFormat::Unknown);
        assert_eq!(detect(&json!([1, 2])), DetectedFormat::Unknown);
    }

    #[test]
    fn auto_choice_fails_on_unknown_document() {
        let err = FormatChoice::Auto.resolve(&json!({"servers": {}})).unwrap_err();
        assert!(matches!(err, ConfigError::AmbiguousFormat));
    }

    #[test]
    fn explicit_choice_skips_detection() {
        let format = FormatChoice::Explicit(McpFormat::VsCode)
            .resolve(&json!({"mcpServers": {}}))
            .unwrap();
        assert_eq!(format, McpFormat::VsCode);
    }

    #[test]
    fn format_parses_from_str() {
        assert_eq!(McpFormat::try_from("Cursor").unwrap(), McpFormat::Cursor);
        assert_eq!(McpFormat::try_from("vscode").unwrap(), McpFormat::VsCode);
        assert_eq!(FormatChoice::try_from("auto").unwrap(), FormatChoice::Auto);
    }

    #[test]
    fn invalid_format_lists_every_choice() {
        let err = McpFormat::try_from("zed").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid format: 'zed'. Valid values: cursor, vscode, generic"
        );
    }

    #[test]
    fn default_paths_per_format() {
        assert_eq!(McpFormat::Cursor.default_relative_path(), PathBuf::from("mcp.json"));
        assert_eq!(
            McpFormat::VsCode.default_relative_path(),
            PathBuf::from(".vscode/mcp.json")
        );
        assert_eq!(
            McpFormat::Generic.default_relative_path(),
            PathBuf::from("mcp_config.json")
        );
    }

    #[test]
    fn servers_at_path_reports_missing_key() {
        let err = servers_at_path(&json!({"mcp": {}}), &["mcp", "servers"]).unwrap_err();
        assert!(matches!(err, ConfigError::Format { ref path, .. } if path == "mcp.servers"));
    }

    #[test]
    fn set_map_at_path_creates_parents() {
        let mut root = Map::new();
        let mut servers = Map::new();
        servers.insert("a".to_string(), json!({"command": "echo"}));

        set_map_at_path(&mut root, &["mcp", "servers"], servers);

        assert_eq!(
            Value::Object(root),
            json!({"mcp": {"servers": {"a": {"command": "echo"}}}})
        );
    }

    #[test]
    fn parse_base_server_rejects_non_string_args() {
        let err = parse_base_server("x", &json!({"command": "echo", "args": [1]}), "mcpServers.x")
            .unwrap_err();
        assert!(matches!(err, ConfigError::Format { ref path, .. } if path == "mcpServers.x.args[0]"));
    }
}
