//! MCP server definitions and named templates

pub mod server;
pub mod templates;

pub use server::{ServerDefinition, ServerSet, parse_env_pair};
pub use templates::TemplateRegistry;
