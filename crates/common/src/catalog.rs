//! Reconciled manifest joined with the documents it was reconciled against

use crate::{ApiDocument, ApiKey, ForgeError, Manifest, Operation, Result, Service};

/// Read-only input of every renderer
///
/// `documents[i]` is the document extracted for `manifest.services[i]`.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    manifest: Manifest,
    documents: Vec<ApiDocument>,
}

/// A service paired with its extracted document
#[derive(Debug, Clone, Copy)]
pub struct ServiceEntry<'a> {
    pub service: &'a Service,
    pub document: &'a ApiDocument,
}

impl Catalog {
    pub fn new(manifest: Manifest, documents: Vec<ApiDocument>) -> Result<Self> {
        if manifest.services.len() != documents.len() {
            return Err(ForgeError::Generation(format!(
                "{} services but {} documents",
                manifest.services.len(),
                documents.len()
            )));
        }
        Ok(Self {
            manifest,
            documents,
        })
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn into_manifest(self) -> Manifest {
        self.manifest
    }

    /// Services in manifest order
    pub fn services(&self) -> impl Iterator<Item = ServiceEntry<'_>> {
        self.manifest
            .services
            .iter()
            .zip(&self.documents)
            .map(|(service, document)| ServiceEntry { service, document })
    }
}

impl<'a> ServiceEntry<'a> {
    pub fn name(&self) -> &'a str {
        &self.service.service_name
    }

    /// `info.description` of the service's document
    pub fn description(&self) -> &'a str {
        &self.document.description
    }

    /// ApiKey for an extracted operation; a miss means reconciliation did not run
    pub fn api_key(&self, operation: &Operation) -> Result<&'a ApiKey> {
        self.service
            .api_key(&operation.operation_id)
            .ok_or_else(|| ForgeError::Lookup {
                service: self.service.service_name.clone(),
                operation_id: operation.operation_id.clone(),
            })
    }

    /// Every operation of the document with its ApiKey, in document order
    pub fn keyed_operations(&self) -> Result<Vec<(&'a Operation, &'a ApiKey)>> {
        self.document
            .operations
            .iter()
            .map(|op| self.api_key(op).map(|key| (op, key)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog(keys: Vec<ApiKey>) -> Catalog {
        let manifest = Manifest {
            services: vec![Service {
                service_name: "orders".to_string(),
                apis: keys,
                ..Default::default()
            }],
            ..Default::default()
        };
        let document = ApiDocument {
            description: "Order service".to_string(),
            operations: vec![Operation {
                operation_id: "listOrders".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        Catalog::new(manifest, vec![document]).unwrap()
    }

    #[test]
    fn test_keyed_operations() {
        let catalog = catalog(vec![ApiKey {
            operation_id: "listOrders".to_string(),
            resource_id: "API-orders-000001".to_string(),
            ..Default::default()
        }]);
        let entry = catalog.services().next().unwrap();
        assert_eq!(entry.description(), "Order service");

        let rows = entry.keyed_operations().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].1.resource_id, "API-orders-000001");
    }

    #[test]
    fn test_missing_api_key_is_lookup_error() {
        let catalog = catalog(vec![]);
        let entry = catalog.services().next().unwrap();
        let err = entry.keyed_operations().unwrap_err();
        assert!(matches!(err, ForgeError::Lookup { ref operation_id, .. } if operation_id == "listOrders"));
    }

    #[test]
    fn test_mismatched_lengths_rejected() {
        let result = Catalog::new(Manifest::default(), vec![ApiDocument::default()]);
        assert!(result.is_err());
    }
}
