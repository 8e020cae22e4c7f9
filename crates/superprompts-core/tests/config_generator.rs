use serde_json::json;

use superprompts_core::ConfigError;
use superprompts_core::config::ConfigGenerator;
use superprompts_core::format::McpFormat;
use superprompts_core::mcp::{ServerDefinition, ServerSet, TemplateRegistry};

#[test]
fn missing_templates_are_all_reported() {
    let registry = TemplateRegistry::builtin().unwrap();

    let err = ConfigGenerator::new(&registry)
        .generate(
            &["superprompts", "nope1", "nope2"],
            McpFormat::Cursor,
            &ServerSet::new(),
        )
        .unwrap_err();

    match err {
        ConfigError::UnknownTemplates { names } => assert_eq!(names, vec!["nope1", "nope2"]),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn custom_registry_renders_exact_cursor_document() {
    let mut registry = TemplateRegistry::new();
    registry.register(
        ServerDefinition::new("github", "npx")
            .unwrap()
            .with_args(["-y", "github-mcp-server"])
            .with_env("GITHUB_TOKEN", "x"),
    );

    let doc = ConfigGenerator::new(&registry)
        .generate(&["github"], McpFormat::Cursor, &ServerSet::new())
        .unwrap();

    assert_eq!(
        serde_json::to_string(&doc).unwrap(),
        r#"{"mcpServers":{"github":{"command":"npx","args":["-y","github-mcp-server"],"env":{"GITHUB_TOKEN":"x"}}}}"#
    );
}

#[test]
fn builtin_templates_render_in_every_format() {
    let registry = TemplateRegistry::builtin().unwrap();
    let generator = ConfigGenerator::new(&registry);
    let names = registry.names();

    let cursor = generator
        .generate(&names, McpFormat::Cursor, &ServerSet::new())
        .unwrap();
    let vscode = generator
        .generate(&names, McpFormat::VsCode, &ServerSet::new())
        .unwrap();
    let generic = generator
        .generate(&names, McpFormat::Generic, &ServerSet::new())
        .unwrap();

    assert_eq!(cursor["mcpServers"].as_object().unwrap().len(), 3);
    assert_eq!(vscode["mcp"]["servers"].as_object().unwrap().len(), 3);
    assert_eq!(
        generic["mcp"]["servers"]["superprompts"]["description"],
        json!("SuperPrompts MCP Server - Access to AI prompt collection")
    );
    assert!(cursor["mcpServers"]["github"].get("description").is_none());
}
