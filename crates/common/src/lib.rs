//! Common types and utilities for api-forge
//!
//! This crate contains the persisted manifest model, the operation model
//! extracted from OpenAPI documents, error types, and the file helpers shared
//! by the parser, reconciler, generator, and CLI components.

mod catalog;
mod config;
mod document;
mod error;
pub mod manifest;
pub mod output;

pub use catalog::{Catalog, ServiceEntry};
pub use config::{ForgeConfig, DEFAULT_MANIFEST_PATH, DEFAULT_OUTPUT_DIR};
pub use document::{ApiDocument, Operation, Request, Response, DEFAULT_STATUS};
pub use error::{ForgeError, Result};
pub use manifest::{ApiKey, Manifest, Server, Service};
