use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading, reconciling, or rendering
#[derive(Error, Debug)]
pub enum ForgeError {
    #[error("Cannot access file {}: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// An operation reached a renderer without a registered ApiKey
    #[error("No ApiKey registered for operation '{operation_id}' in service '{service}'")]
    Lookup {
        service: String,
        operation_id: String,
    },

    #[error("Service '{service}': {source}")]
    Service {
        service: String,
        #[source]
        source: Box<ForgeError>,
    },

    #[error("Generation error: {0}")]
    Generation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ForgeError {
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// Attach the name of the service whose processing failed
    pub fn in_service(self, service: &str) -> Self {
        Self::Service {
            service: service.to_string(),
            source: Box::new(self),
        }
    }
}

/// Result type for api-forge operations
pub type Result<T> = std::result::Result<T, ForgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_names_file() {
        let err = ForgeError::parse("specs/orders.yaml", "bad indentation");
        let msg = err.to_string();
        assert!(msg.contains("specs/orders.yaml"));
        assert!(msg.contains("bad indentation"));
    }

    #[test]
    fn test_service_error_wraps_source() {
        let err = ForgeError::parse("orders.yaml", "oops").in_service("orders");
        assert!(err.to_string().starts_with("Service 'orders'"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
