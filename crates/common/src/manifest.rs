//! Persisted manifest of known services and operations
//!
//! The manifest is the single source of truth for identifier stability. It is
//! loaded once, mutated in place by reconciliation, and written back whole.

use crate::{output, ForgeError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root record of the manifest YAML file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    /// Workspace identifier written into every gateway row
    #[serde(default)]
    pub work_space_id: String,
    /// Newly discovered operations start as mocks when set
    #[serde(default)]
    pub init_is_mock: bool,
    #[serde(default)]
    pub services: Vec<Service>,
}

/// One API surface backed by one OpenAPI document
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Used verbatim in resource ids, route paths and fixture directories
    pub service_name: String,
    pub openapi_path: PathBuf,
    #[serde(default)]
    pub prod_server: Server,
    #[serde(default)]
    pub mock_server: Server,
    #[serde(default)]
    pub apis: Vec<ApiKey>,
}

/// A deployment target for a service
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Server {
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub port: u16,
    /// Assigned once, never rewritten
    #[serde(default)]
    pub service_id: String,
}

/// Persisted identifiers of one operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiKey {
    #[serde(default)]
    pub title: String,
    pub operation_id: String,
    #[serde(default)]
    pub kong_id: String,
    #[serde(default)]
    pub resource_id: String,
    #[serde(default)]
    pub implemented: bool,
}

impl Manifest {
    /// Load the manifest from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).map_err(|e| ForgeError::file_access(path, e))?;
        let content = String::from_utf8(bytes).map_err(|e| ForgeError::parse(path, e))?;
        let manifest = Self::from_yaml(&content).map_err(|e| match e {
            ForgeError::Parse { message, .. } => ForgeError::parse(path, message),
            other => other,
        })?;

        tracing::debug!(
            path = %path.display(),
            services = manifest.services.len(),
            "loaded manifest"
        );
        Ok(manifest)
    }

    /// Parse a manifest from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let manifest: Manifest = serde_yaml::from_str(content)
            .map_err(|e| ForgeError::parse("<manifest>", e))?;

        if let Some(pos) = manifest
            .services
            .iter()
            .position(|s| s.service_name.trim().is_empty())
        {
            return Err(ForgeError::parse(
                "<manifest>",
                format!("services[{}] has an empty serviceName", pos),
            ));
        }

        Ok(manifest)
    }

    /// Serialize the manifest to YAML text
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Overwrite the manifest file; the previous file survives a failed write
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = self.to_yaml()?;
        output::write_atomic(path, content.as_bytes())?;
        tracing::debug!(path = %path.display(), "saved manifest");
        Ok(())
    }
}

impl Service {
    /// Whether an ApiKey with this operation id already exists
    pub fn registered(&self, operation_id: &str) -> bool {
        self.api_key(operation_id).is_some()
    }

    pub fn api_key(&self, operation_id: &str) -> Option<&ApiKey> {
        self.apis.iter().find(|api| api.operation_id == operation_id)
    }
}

impl Server {
    /// Assign a service id if none is present. Returns true when one was assigned.
    pub fn ensure_service_id<F>(&mut self, generate: F) -> bool
    where
        F: FnOnce() -> String,
    {
        if self.service_id.is_empty() {
            self.service_id = generate();
            true
        } else {
            false
        }
    }
}
