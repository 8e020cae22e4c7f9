use serde_json::json;
use tempfile::TempDir;

use superprompts_core::config::{load_document, merge, merge_servers, save_document};
use superprompts_core::format::McpFormat;
use superprompts_core::mcp::{ServerDefinition, ServerSet};

fn set(servers: &[(&str, &str)]) -> ServerSet {
    servers
        .iter()
        .map(|(name, command)| {
            (
                name.to_string(),
                ServerDefinition::new(*name, *command).unwrap(),
            )
        })
        .collect()
}

#[test]
fn merge_adds_without_touching_existing_entries() {
    let existing = json!({"mcpServers": {
        "a": {"command": "a-cmd", "args": ["1"], "custom": true},
        "b": {"command": "b-cmd"}
    }});

    let merged = merge(&existing, &set(&[("x", "x-cmd")]), McpFormat::Cursor).unwrap();

    let servers = merged["mcpServers"].as_object().unwrap();
    let names: Vec<_> = servers.keys().map(String::as_str).collect();
    assert_eq!(names, vec!["a", "b", "x"]);
    assert_eq!(servers["a"], existing["mcpServers"]["a"]);
    assert_eq!(servers["b"], existing["mcpServers"]["b"]);
}

#[test]
fn merge_replaces_same_named_entry() {
    let existing = json!({"mcp": {"servers": {"a": {"command": "old"}}}});

    let result = merge_servers(&existing, &set(&[("a", "new")]), McpFormat::VsCode).unwrap();

    assert_eq!(
        result.document,
        json!({"mcp": {"servers": {"a": {"command": "new"}}}})
    );
    assert_eq!(result.replaced, vec!["a"]);
    assert!(result.added.is_empty());
}

#[test]
fn merge_keeps_other_top_level_keys_on_disk() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join(".vscode").join("mcp.json");
    save_document(
        &path,
        &json!({"editor.tabSize": 2, "mcp": {"servers": {"a": {"command": "a"}}}}),
    )
    .unwrap();

    let existing = load_document(&path).unwrap();
    let merged = merge(&existing, &set(&[("b", "b")]), McpFormat::VsCode).unwrap();
    save_document(&path, &merged).unwrap();

    let reloaded = load_document(&path).unwrap();
    assert_eq!(reloaded["editor.tabSize"], json!(2));
    assert_eq!(
        reloaded["mcp"]["servers"].as_object().unwrap().len(),
        2
    );
}

#[test]
fn merge_into_generic_keeps_document_version() {
    let existing = json!({"mcp": {"version": "2.0.0", "servers": {}}});

    let merged = merge(&existing, &set(&[("x", "echo")]), McpFormat::Generic).unwrap();

    assert_eq!(merged["mcp"]["version"], json!("2.0.0"));
    assert_eq!(merged["mcp"]["servers"]["x"]["name"], json!("x"));
}

#[test]
fn malformed_existing_entry_is_rejected() {
    let existing = json!({"mcpServers": {"a": {"command": 42}}});

    let err = merge(&existing, &set(&[("x", "echo")]), McpFormat::Cursor).unwrap_err();

    assert!(err.to_string().contains("mcpServers.a"));
}

#[test]
fn vscode_merge_never_produces_a_generic_looking_document() {
    let existing = json!({"mcp": {"version": "1.0.0", "servers": {}}});

    assert!(merge(&existing, &set(&[("x", "echo")]), McpFormat::VsCode).is_err());
    let as_generic = merge(&existing, &set(&[("x", "echo")]), McpFormat::Generic).unwrap();
    assert_eq!(
        superprompts_core::format::detect(&as_generic),
        superprompts_core::format::DetectedFormat::Generic
    );
}
