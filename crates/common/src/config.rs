//! Runtime configuration passed explicitly to the reconciler and renderers

use crate::{ForgeError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_MANIFEST_PATH: &str = "./api-setup.yaml";
pub const DEFAULT_OUTPUT_DIR: &str = "./dist";

/// Where the manifest lives and where artifacts go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForgeConfig {
    pub manifest_path: PathBuf,
    pub output_dir: PathBuf,
}

/// Optional config file; every key may be omitted
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigFile {
    #[serde(default, rename = "in")]
    manifest_path: Option<PathBuf>,
    #[serde(default, rename = "out")]
    output_dir: Option<PathBuf>,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            manifest_path: PathBuf::from(DEFAULT_MANIFEST_PATH),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

impl ForgeConfig {
    /// Build the configuration with precedence: explicit value > config file > default
    pub fn resolve(
        config_file: Option<&Path>,
        manifest_path: Option<PathBuf>,
        output_dir: Option<PathBuf>,
    ) -> Result<Self> {
        let file = match config_file {
            Some(path) => {
                let content =
                    fs::read_to_string(path).map_err(|e| ForgeError::file_access(path, e))?;
                if content.trim().is_empty() {
                    ConfigFile::default()
                } else {
                    serde_yaml::from_str(&content).map_err(|e| ForgeError::parse(path, e))?
                }
            }
            None => ConfigFile::default(),
        };

        let defaults = Self::default();
        Ok(Self {
            manifest_path: manifest_path
                .or(file.manifest_path)
                .unwrap_or(defaults.manifest_path),
            output_dir: output_dir.or(file.output_dir).unwrap_or(defaults.output_dir),
        })
    }

    /// Path of an artifact inside the output directory
    pub fn output_file(&self, name: &str) -> PathBuf {
        self.output_dir.join(name)
    }
}
