//! Reading and writing configuration documents.

use std::path::Path;

use serde_json::Value;

use crate::error::{ConfigError, Result};

/// Load a JSON document.
pub fn load_document(path: &Path) -> Result<Value> {
    let bytes = std::fs::read(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value = serde_json::from_slice(&bytes).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    tracing::debug!(path = %path.display(), "loaded configuration document");
    Ok(value)
}

/// Load a JSON document if the file exists.
pub fn load_existing(path: &Path) -> Result<Option<Value>> {
    if !path.exists() {
        return Ok(None);
    }
    load_document(path).map(Some)
}

/// Load a JSON or YAML file, chosen by extension.
///
/// `.yml` and `.yaml` are read as YAML; everything else as JSON.
pub fn load_structured(path: &Path) -> Result<Value> {
    let is_yaml = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"));
    if !is_yaml {
        return load_document(path);
    }

    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_yaml::from_str(&text).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

/// Pretty-printed document text with a trailing newline.
pub fn render_document(doc: &Value) -> String {
    // Serializing a Value cannot fail: keys are always strings.
    let mut text = serde_json::to_string_pretty(doc).unwrap_or_default();
    text.push('\n');
    text
}

/// Write a document, creating parent directories.
pub fn save_document(path: &Path, doc: &Value) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    std::fs::write(path, render_document(doc)).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), "wrote configuration document");
    Ok(())
}
