//! Merging new servers into an existing document.
//!
//! Only the named servers are touched. Other servers, other top-level keys
//! and Generic's document version are carried over as they are.

use serde_json::{Map, Value};

use crate::error::{ConfigError, Result};
use crate::format::{DEFAULT_DOCUMENT_VERSION, McpFormat, adapter_for, set_map_at_path};
use crate::mcp::ServerSet;

/// Result of merging servers into a document.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeResult {
    /// The merged document
    pub document: Value,
    /// Servers that were not present before
    pub added: Vec<String>,
    /// Servers that replaced an existing entry of the same name
    pub replaced: Vec<String>,
}

/// Merge `new_servers` into `existing`, returning the new document.
pub fn merge(existing: &Value, new_servers: &ServerSet, format: McpFormat) -> Result<Value> {
    merge_servers(existing, new_servers, format).map(|result| result.document)
}

/// Merge `new_servers` into `existing` and report what changed.
///
/// Same-named entries are replaced (last writer wins). A document without
/// the servers container gets one; a malformed container or server entry is
/// a format error, as is a VS Code merge into a document carrying
/// `mcp.version`.
pub fn merge_servers(
    existing: &Value,
    new_servers: &ServerSet,
    format: McpFormat,
) -> Result<MergeResult> {
    let adapter = adapter_for(format);
    let path = adapter.servers_path();

    let mut root = existing
        .as_object()
        .cloned()
        .ok_or_else(|| ConfigError::format("$", "document root must be a JSON object"))?;

    // mcp.version would make the result detect as generic
    if format == McpFormat::VsCode && existing.pointer("/mcp/version").is_some() {
        return Err(ConfigError::format(
            "mcp.version",
            "document has a generic version key; merge as generic or remove it",
        ));
    }

    let mut servers = match existing_container(&root, path)? {
        Some(container) => {
            // Parse to reject malformed entries before writing anything back
            adapter.from_document(existing)?;
            container.clone()
        }
        None => Map::new(),
    };

    let mut added = Vec::new();
    let mut replaced = Vec::new();
    for (name, server) in new_servers {
        if servers.insert(name.clone(), adapter.render_server(server)).is_some() {
            replaced.push(name.clone());
        } else {
            added.push(name.clone());
        }
    }

    set_map_at_path(&mut root, path, servers);

    match format {
        McpFormat::Generic => {
            if let Some(Value::Object(mcp)) = root.get_mut("mcp") {
                mcp.entry("version")
                    .or_insert_with(|| Value::String(DEFAULT_DOCUMENT_VERSION.to_string()));
            }
        }
        McpFormat::Cursor | McpFormat::VsCode => {}
    }

    tracing::debug!(
        %format,
        added = added.len(),
        replaced = replaced.len(),
        "merged servers into document"
    );

    Ok(MergeResult {
        document: Value::Object(root),
        added,
        replaced,
    })
}

/// The servers object at `path`, `None` if any segment is absent.
fn existing_container<'a>(
    root: &'a Map<String, Value>,
    path: &[&str],
) -> Result<Option<&'a Map<String, Value>>> {
    let mut current = root;
    for (idx, segment) in path.iter().enumerate() {
        match current.get(*segment) {
            None => return Ok(None),
            Some(Value::Object(next)) => current = next,
            Some(_) => {
                return Err(ConfigError::format(
                    path[..=idx].join("."),
                    "expected a JSON object",
                ));
            }
        }
    }
    Ok(Some(current))
}
