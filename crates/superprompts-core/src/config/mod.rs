//! Operations over whole configuration documents
//!
//! - `generator`: render templates into a new document
//! - `validator`: report every problem in a document
//! - `converter`: re-emit a document in another format
//! - `merge`: add servers to an existing document
//! - `io`: load and save documents

pub mod converter;
pub mod generator;
pub mod io;
pub mod merge;
pub mod validator;

pub use converter::convert;
pub use generator::ConfigGenerator;
pub use io::{load_document, load_existing, load_structured, render_document, save_document};
pub use merge::{MergeResult, merge, merge_servers};
pub use validator::{Severity, ValidationIssue, has_errors, validate};
