//! OpenAPI document loader

use super::node::Node;
use api_forge_common::{ApiDocument, ForgeError, Result};
use serde_yaml::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// OpenAPI document parser
///
/// Holds the raw YAML tree of one document. JSON documents are accepted as
/// well since JSON is valid YAML.
pub struct OpenApiParser {
    /// Loaded document tree
    root: Value,

    /// Where the document came from, for error messages
    source: PathBuf,
}

impl OpenApiParser {
    /// Load an OpenAPI document from a file path
    ///
    /// # Example
    /// ```rust,ignore
    /// let parser = OpenApiParser::from_file("specs/orders.yaml")?;
    /// ```
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|e| ForgeError::file_access(path, e))?;
        let content = String::from_utf8(bytes).map_err(|e| ForgeError::parse(path, e))?;
        Self::from_str_with_source(&content, path)
    }

    /// Parse an OpenAPI document from YAML (or JSON) text
    pub fn from_yaml(content: &str) -> Result<Self> {
        Self::from_str_with_source(content, Path::new("<inline>"))
    }

    fn from_str_with_source(content: &str, source: &Path) -> Result<Self> {
        let root: Value =
            serde_yaml::from_str(content).map_err(|e| ForgeError::parse(source, e))?;

        Ok(Self {
            root,
            source: source.to_path_buf(),
        })
    }

    /// Flatten the document into an [`ApiDocument`]
    pub fn parse(&self) -> ApiDocument {
        let document = super::converter::convert_document(Node::new(&self.root));
        tracing::debug!(
            source = %self.source.display(),
            operations = document.operations.len(),
            "extracted operations"
        );
        document
    }

    /// Get a reference to the underlying YAML tree
    pub fn root(&self) -> &Value {
        &self.root
    }
}
