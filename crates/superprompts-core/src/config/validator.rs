//! Document validation.
//!
//! Validation reports every defect it finds as a [`ValidationIssue`]; an
//! invalid document is a normal result, not an error.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::format::{FormatChoice, McpFormat, adapter_for, detect};

/// Severity level for validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Schema violation; clients will reject or misread the entry
    Error,
    /// Accepted by the schema but likely a mistake
    Warning,
}

impl Severity {
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        }
    }
}

/// A single defect found in a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    /// Dotted path of the offending value (`$` for the document root)
    pub path: String,
    pub message: String,
    pub severity: Severity,
}

impl ValidationIssue {
    pub fn error(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            severity: Severity::Error,
        }
    }

    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
            severity: Severity::Warning,
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.severity.name(), self.path, self.message)
    }
}

/// Validate `doc` against `format`, detecting it when `Auto`.
///
/// Returns an empty list for a valid document. When detection fails a single
/// root-level issue is returned and nothing else is checked.
pub fn validate(doc: &Value, format: FormatChoice) -> Vec<ValidationIssue> {
    let format = match format {
        FormatChoice::Explicit(format) => format,
        FormatChoice::Auto => match detect(doc).format() {
            Some(format) => format,
            None => {
                return vec![ValidationIssue::error(
                    "$",
                    "cannot detect format: expected 'mcpServers' (cursor) or 'mcp.servers' \
                     (vscode, generic); specify the format explicitly",
                )];
            }
        },
    };

    let mut issues = Vec::new();
    validate_as(doc, format, &mut issues);
    tracing::debug!(%format, issues = issues.len(), "validated document");
    issues
}

fn validate_as(doc: &Value, format: McpFormat, issues: &mut Vec<ValidationIssue>) {
    let Some(root) = doc.as_object() else {
        issues.push(ValidationIssue::error("$", "document root must be a JSON object"));
        return;
    };

    if format == McpFormat::Generic {
        check_document_version(root, issues);
    }

    let adapter = adapter_for(format);
    let container = adapter.servers_path();
    let Some(servers) = walk_container(root, container, issues) else {
        return;
    };

    let base = container.join(".");
    for (name, entry) in servers {
        let path = format!("{base}.{name}");
        if name.trim().is_empty() {
            issues.push(ValidationIssue::error(
                &path,
                "server name must be a non-empty string",
            ));
        }
        let Some(server) = entry.as_object() else {
            issues.push(ValidationIssue::error(&path, "server entry must be a JSON object"));
            continue;
        };
        check_base_fields(server, &path, issues);
        if format == McpFormat::Generic {
            check_generic_fields(name, server, &path, issues);
        }
    }
}

/// Follow `path` to the servers object, reporting the first missing or
/// mistyped segment.
fn walk_container<'a>(
    root: &'a Map<String, Value>,
    path: &[&str],
    issues: &mut Vec<ValidationIssue>,
) -> Option<&'a Map<String, Value>> {
    let mut current = root;
    for (idx, segment) in path.iter().enumerate() {
        let here = path[..=idx].join(".");
        match current.get(*segment) {
            None => {
                issues.push(ValidationIssue::error(
                    here,
                    format!("missing required key '{segment}'"),
                ));
                return None;
            }
            Some(Value::Object(next)) => current = next,
            Some(_) => {
                issues.push(ValidationIssue::error(here, "expected a JSON object"));
                return None;
            }
        }
    }
    Some(current)
}

/// Checks `mcp.version` when `mcp` is an object; a missing or mistyped `mcp`
/// is left to the container walk.
fn check_document_version(root: &Map<String, Value>, issues: &mut Vec<ValidationIssue>) {
    let Some(Value::Object(mcp)) = root.get("mcp") else {
        return;
    };
    match mcp.get("version") {
        None => issues.push(ValidationIssue::error(
            "mcp.version",
            "missing required key 'version' in generic configuration",
        )),
        Some(Value::String(_)) => {}
        Some(_) => issues.push(ValidationIssue::error("mcp.version", "must be a string")),
    }
}

fn check_base_fields(server: &Map<String, Value>, path: &str, issues: &mut Vec<ValidationIssue>) {
    match server.get("command") {
        None => issues.push(ValidationIssue::error(
            format!("{path}.command"),
            "missing required field 'command'",
        )),
        Some(Value::String(command)) if command.trim().is_empty() => issues.push(
            ValidationIssue::error(format!("{path}.command"), "must not be empty"),
        ),
        Some(Value::String(_)) => {}
        Some(_) => issues.push(ValidationIssue::error(
            format!("{path}.command"),
            "must be a string",
        )),
    }

    match server.get("args") {
        None => {}
        Some(Value::Array(items)) => {
            let bad: Vec<String> = items
                .iter()
                .enumerate()
                .filter(|(_, item)| !item.is_string())
                .map(|(idx, _)| idx.to_string())
                .collect();
            if !bad.is_empty() {
                issues.push(ValidationIssue::error(
                    format!("{path}.args"),
                    format!("elements at index {} must be strings", bad.join(", ")),
                ));
            }
        }
        Some(_) => issues.push(ValidationIssue::error(
            format!("{path}.args"),
            "must be an array of strings",
        )),
    }

    match server.get("env") {
        None => {}
        Some(Value::Object(env)) => {
            for (key, value) in env {
                if !value.is_string() {
                    issues.push(ValidationIssue::error(
                        format!("{path}.env.{key}"),
                        "must be a string",
                    ));
                }
            }
        }
        Some(_) => issues.push(ValidationIssue::error(
            format!("{path}.env"),
            "must be an object mapping names to strings",
        )),
    }

    // null is how unset optional fields were historically written
    match server.get("cwd") {
        None | Some(Value::Null) | Some(Value::String(_)) => {}
        Some(_) => issues.push(ValidationIssue::error(
            format!("{path}.cwd"),
            "must be a string",
        )),
    }
}

fn check_generic_fields(
    name: &str,
    server: &Map<String, Value>,
    path: &str,
    issues: &mut Vec<ValidationIssue>,
) {
    match server.get("name") {
        None => issues.push(ValidationIssue::error(
            format!("{path}.name"),
            "missing required field 'name' in generic configuration",
        )),
        Some(Value::String(inline)) if inline == name => {}
        Some(Value::String(inline)) => issues.push(ValidationIssue::error(
            format!("{path}.name"),
            format!("'{inline}' does not match the server key '{name}'"),
        )),
        Some(_) => issues.push(ValidationIssue::error(
            format!("{path}.name"),
            "must be a string",
        )),
    }

    match server.get("version") {
        None => issues.push(ValidationIssue::error(
            format!("{path}.version"),
            "missing required field 'version' in generic configuration",
        )),
        Some(Value::String(version)) => {
            if semver::Version::parse(version).is_err() {
                issues.push(ValidationIssue::warning(
                    format!("{path}.version"),
                    format!("'{version}' is not a semantic version"),
                ));
            }
        }
        Some(_) => issues.push(ValidationIssue::error(
            format!("{path}.version"),
            "must be a string",
        )),
    }

    match server.get("description") {
        None | Some(Value::Null) | Some(Value::String(_)) => {}
        Some(_) => issues.push(ValidationIssue::error(
            format!("{path}.description"),
            "must be a string",
        )),
    }
}

/// Whether any issue is an error rather than a warning.
pub fn has_errors(issues: &[ValidationIssue]) -> bool {
    issues.iter().any(|issue| issue.severity == Severity::Error)
}
