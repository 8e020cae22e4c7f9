//! Conversion between configuration formats.
//!
//! Conversion goes through the canonical model, so fields the target format
//! has no slot for (description and version outside Generic) are dropped.
//! It is one-way; converting back does not restore them.

use serde_json::Value;

use crate::error::Result;
use crate::format::{DocumentMeta, FormatChoice, McpFormat, adapter_for};

/// Re-emit `doc` in `target` format.
///
/// The source format is detected when `source` is `Auto`; an undetectable
/// document fails with [`ConfigError::AmbiguousFormat`](crate::ConfigError).
pub fn convert(doc: &Value, source: FormatChoice, target: McpFormat) -> Result<Value> {
    let source = source.resolve(doc)?;
    let source_adapter = adapter_for(source);
    let servers = source_adapter.from_document(doc)?;

    let meta = match (source, target) {
        (McpFormat::Generic, McpFormat::Generic) => source_adapter.read_meta(doc),
        _ => DocumentMeta::default(),
    };

    tracing::debug!(%source, %target, servers = servers.len(), "converting document");
    Ok(adapter_for(target).to_document(&servers, &meta))
}
