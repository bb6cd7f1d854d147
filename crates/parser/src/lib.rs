//! OpenAPI parsing for api-forge
//!
//! This crate loads OpenAPI documents and flattens them into the
//! [`ApiDocument`] model shared with the reconciler and generators.
//!
//! ## Parsing Strategy
//!
//! The document is assumed to be validated elsewhere, so it is read as a
//! loosely-typed YAML tree rather than a full OpenAPI model. Only these
//! fields are consulted:
//! - `openapi`, `info.title`, `info.description`, `info.version`
//! - `paths.*.*.operationId`, `summary`, `description`, `parameters`
//! - `paths.*.*.requestBody.description`
//! - `paths.*.*.responses.*.description`
//!
//! Anything missing degrades to an empty string or zero.

pub mod openapi;

pub use openapi::{Node, OpenApiParser};

use api_forge_common::{ApiDocument, Result};
use std::path::Path;

/// Load an OpenAPI document from disk and extract its operations
///
/// # Arguments
/// * `path` - Path to a YAML or JSON OpenAPI document
///
/// # Returns
/// * `ApiDocument` - Header fields and operations in document order
pub fn load_document(path: &Path) -> Result<ApiDocument> {
    let parser = OpenApiParser::from_file(path)?;
    Ok(parser.parse())
}
