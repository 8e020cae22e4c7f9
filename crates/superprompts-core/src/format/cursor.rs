//! Cursor `mcp.json` format.

use serde_json::Value;

use super::{FormatAdapter, render_base_server};
use crate::mcp::ServerDefinition;

#[derive(Debug, Default, Clone, Copy)]
pub struct CursorAdapter;

impl FormatAdapter for CursorAdapter {
    fn servers_path(&self) -> &'static [&'static str] {
        &["mcpServers"]
    }

    fn render_server(&self, server: &ServerDefinition) -> Value {
        // { "command": "...", "args": [...], "env": {...}, "cwd": "..." }
        Value::Object(render_base_server(server))
    }
}
