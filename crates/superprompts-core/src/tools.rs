//! Detection of MCP helper tools installed on this machine.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use serde::Serialize;

/// A helper tool worth knowing about when writing configurations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownTool {
    /// Display name
    pub name: &'static str,
    /// Executable looked up on `PATH`
    pub program: &'static str,
    pub description: &'static str,
}

pub const KNOWN_TOOLS: [KnownTool; 4] = [
    KnownTool {
        name: "fastmcp",
        program: "fastmcp",
        description: "FastMCP CLI - Fast MCP server generation and management",
    },
    KnownTool {
        name: "mcp-cli",
        program: "mcp",
        description: "MCP-CLI - MCP server installation and management",
    },
    KnownTool {
        name: "mcp-tools-cli",
        program: "mcp-tools-cli",
        description: "Python MCP tools CLI - MCP server interaction",
    },
    KnownTool {
        name: "npm",
        program: "npm",
        description: "Node Package Manager - For npx-based MCP servers",
    },
];

/// Whether a tool was found and answered `--version`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolStatus {
    pub name: String,
    pub description: String,
    /// Resolved executable, if found on `PATH`
    pub path: Option<PathBuf>,
    /// Found and `--version` exited successfully
    pub available: bool,
    /// First line of the `--version` output
    pub version: Option<String>,
}

/// Check every known tool against the current `PATH`.
pub fn detect_tools() -> Vec<ToolStatus> {
    let path_var = std::env::var_os("PATH");
    detect_tools_in(path_var.as_deref())
}

/// Check every known tool against an explicit `PATH` value.
pub fn detect_tools_in(path_var: Option<&OsStr>) -> Vec<ToolStatus> {
    KNOWN_TOOLS
        .iter()
        .map(|tool| check_tool(tool, path_var))
        .collect()
}

fn check_tool(tool: &KnownTool, path_var: Option<&OsStr>) -> ToolStatus {
    let path = path_var.and_then(|paths| find_in_path(tool.program, paths));
    let version = path.as_deref().and_then(query_version);
    tracing::debug!(
        tool = tool.name,
        found = path.is_some(),
        available = version.is_some(),
        "checked tool"
    );

    ToolStatus {
        name: tool.name.to_string(),
        description: tool.description.to_string(),
        available: version.is_some(),
        path,
        version,
    }
}

/// First file named `program` in the directories of `path_var`.
pub fn find_in_path(program: &str, path_var: &OsStr) -> Option<PathBuf> {
    std::env::split_paths(path_var)
        .map(|dir| dir.join(program))
        .find(|candidate| candidate.is_file())
}

/// Run `<exe> --version`; `None` when it cannot run or exits non-zero.
fn query_version(exe: &Path) -> Option<String> {
    let output = Command::new(exe).arg("--version").output().ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    Some(stdout.lines().next().unwrap_or_default().trim().to_string())
}
