//! Importers that derive a server definition from an existing project file.

pub mod docker;
pub mod npm;
pub mod openapi;

use std::path::Path;

use crate::config::io::load_structured;
use crate::error::Result;
use crate::mcp::ServerDefinition;

pub use docker::server_from_compose;
pub use npm::server_from_package_json;
pub use openapi::server_from_openapi;

/// Where an imported server comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportSource {
    /// A script in `package.json`
    Npm { script: String },
    /// A Docker Compose service (JSON or YAML)
    Docker { service: String },
    /// An OpenAPI spec (JSON or YAML), exposed under `name`
    OpenApi { name: String },
}

/// Read `path` and build a server definition from it.
pub fn import_server(path: &Path, source: &ImportSource) -> Result<ServerDefinition> {
    let doc = load_structured(path)?;
    let server = match source {
        ImportSource::Npm { script } => server_from_package_json(&doc, script)?,
        ImportSource::Docker { service } => server_from_compose(&doc, service)?,
        ImportSource::OpenApi { name } => {
            server_from_openapi(&doc, &path.to_string_lossy(), name)?
        }
    };
    tracing::debug!(path = %path.display(), server = %server.name, "imported server");
    Ok(server)
}
