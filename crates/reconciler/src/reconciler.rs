//! Load, merge, persist

use crate::ids::{next_sequence, resource_id, IdGenerator, UuidGenerator};
use api_forge_common::{
    ApiDocument, ApiKey, Catalog, ForgeConfig, Manifest, Result, Service,
};
use api_forge_parser::load_document;
use std::collections::HashSet;

/// Counts of what a reconciliation run changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub services: usize,
    pub operations: usize,
    /// ApiKeys appended in this run
    pub added: usize,
    /// Server service ids filled in this run
    pub server_ids_assigned: usize,
}

/// Result of a run: the renderer input plus what changed
#[derive(Debug, Clone)]
pub struct Reconciled {
    pub catalog: Catalog,
    pub summary: ReconcileSummary,
}

/// Merges extracted operations into the manifest
pub struct Reconciler<G: IdGenerator = UuidGenerator> {
    ids: G,
}

impl Reconciler<UuidGenerator> {
    pub fn new() -> Self {
        Self::with_ids(UuidGenerator)
    }
}

impl Default for Reconciler<UuidGenerator> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: IdGenerator> Reconciler<G> {
    pub fn with_ids(ids: G) -> Self {
        Self { ids }
    }

    /// Load the manifest, reconcile every service, and write the manifest back
    ///
    /// Nothing is written when any service fails to load.
    pub fn run(&mut self, config: &ForgeConfig) -> Result<Reconciled> {
        let manifest = Manifest::load(&config.manifest_path)?;
        let reconciled = self.reconcile(manifest)?;
        reconciled.catalog.manifest().save(&config.manifest_path)?;

        tracing::info!(
            path = %config.manifest_path.display(),
            added = reconciled.summary.added,
            "manifest updated"
        );
        Ok(reconciled)
    }

    /// Reconcile each service against the document at its `openapiPath`
    pub fn reconcile(&mut self, manifest: Manifest) -> Result<Reconciled> {
        self.reconcile_with(manifest, |service| load_document(&service.openapi_path))
    }

    /// Reconcile with a caller-supplied document loader
    pub fn reconcile_with<F>(&mut self, mut manifest: Manifest, mut load: F) -> Result<Reconciled>
    where
        F: FnMut(&Service) -> Result<ApiDocument>,
    {
        let mut summary = ReconcileSummary::default();
        let mut documents = Vec::with_capacity(manifest.services.len());
        let implemented = !manifest.init_is_mock;

        for service in manifest.services.iter_mut() {
            for server in [&mut service.prod_server, &mut service.mock_server] {
                if server.ensure_service_id(|| self.ids.new_id()) {
                    summary.server_ids_assigned += 1;
                }
            }

            tracing::info!(
                service = %service.service_name,
                path = %service.openapi_path.display(),
                "parsing openapi document"
            );
            let document = load(service).map_err(|e| e.in_service(&service.service_name))?;

            summary.services += 1;
            summary.operations += document.operations.len();
            summary.added += merge_service(service, &document, implemented, &mut self.ids);
            documents.push(document);
        }

        Ok(Reconciled {
            catalog: Catalog::new(manifest, documents)?,
            summary,
        })
    }
}

/// Append an ApiKey for every operation of `document` not yet registered
///
/// Existing ApiKeys are never modified. Returns the number appended.
pub fn merge_service<G: IdGenerator + ?Sized>(
    service: &mut Service,
    document: &ApiDocument,
    implemented: bool,
    ids: &mut G,
) -> usize {
    let mut seen = HashSet::new();
    let mut added = 0;

    for op in &document.operations {
        if !seen.insert(op.operation_id.as_str()) {
            tracing::warn!(
                service = %service.service_name,
                operation_id = %op.operation_id,
                "operationId appears more than once in the document"
            );
            continue;
        }
        if op.operation_id.is_empty() {
            tracing::warn!(
                service = %service.service_name,
                path = %op.path,
                method = %op.method,
                "operation has no operationId"
            );
        }
        if service.registered(&op.operation_id) {
            continue;
        }

        let seq = next_sequence(
            &service.service_name,
            service.apis.iter().map(|key| key.resource_id.as_str()),
        );
        let api_key = ApiKey {
            title: op.summary.clone(),
            operation_id: op.operation_id.clone(),
            kong_id: ids.new_id(),
            resource_id: resource_id(&service.service_name, seq),
            implemented,
        };
        tracing::debug!(
            service = %service.service_name,
            operation_id = %api_key.operation_id,
            resource_id = %api_key.resource_id,
            "registered new operation"
        );
        service.apis.push(api_key);
        added += 1;
    }

    added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::MockIdGenerator;
    use api_forge_common::{ForgeError, Operation, Server};

    fn counting_ids() -> MockIdGenerator {
        let mut ids = MockIdGenerator::new();
        let mut seq = 0;
        ids.expect_new_id().returning(move || {
            seq += 1;
            format!("id-{}", seq)
        });
        ids
    }

    fn document(ids: &[&str]) -> ApiDocument {
        ApiDocument {
            operations: ids
                .iter()
                .map(|id| Operation {
                    operation_id: id.to_string(),
                    summary: format!("{} summary", id),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    fn service(name: &str, apis: Vec<ApiKey>) -> Service {
        Service {
            service_name: name.to_string(),
            apis,
            ..Default::default()
        }
    }

    #[test]
    fn test_merge_appends_only_new_operations() {
        let existing = ApiKey {
            title: "Hand edited".to_string(),
            operation_id: "A".to_string(),
            kong_id: "kong-a".to_string(),
            resource_id: "API-orders-000001".to_string(),
            implemented: true,
        };
        let mut svc = service("orders", vec![existing.clone()]);
        let mut ids = counting_ids();

        let added = merge_service(&mut svc, &document(&["A", "B"]), false, &mut ids);

        assert_eq!(added, 1);
        assert_eq!(svc.apis[0], existing);
        assert_eq!(svc.apis[1].operation_id, "B");
        assert_eq!(svc.apis[1].title, "B summary");
        assert_eq!(svc.apis[1].kong_id, "id-1");
        assert_eq!(svc.apis[1].resource_id, "API-orders-000002");
        assert!(!svc.apis[1].implemented);
    }

    #[test]
    fn test_sequence_continues_after_manual_entries() {
        let manual = ApiKey {
            operation_id: "legacy".to_string(),
            resource_id: "API-stock_-000007".to_string(),
            ..Default::default()
        };
        let mut svc = service("stock", vec![manual.clone(), manual.clone()]);
        svc.apis[1].operation_id = "other".to_string();
        let mut ids = counting_ids();

        merge_service(&mut svc, &document(&["fresh"]), true, &mut ids);
        assert_eq!(svc.apis[2].resource_id, "API-stock_-000008");
        assert_eq!(svc.apis[0].resource_id, "API-stock_-000007");
    }

    #[test]
    fn test_sequence_not_reused_after_removal() {
        let key = |op: &str, rid: &str| ApiKey {
            operation_id: op.to_string(),
            resource_id: rid.to_string(),
            ..Default::default()
        };
        let mut svc = service(
            "orders",
            vec![key("A", "API-orders-000001"), key("C", "API-orders-000003")],
        );
        let mut ids = counting_ids();

        let added = merge_service(&mut svc, &document(&["A", "C", "D"]), true, &mut ids);

        assert_eq!(added, 1);
        assert_eq!(svc.apis[2].resource_id, "API-orders-000004");
        let unique: HashSet<&str> = svc.apis.iter().map(|k| k.resource_id.as_str()).collect();
        assert_eq!(unique.len(), svc.apis.len());
    }

    #[test]
    fn test_duplicate_operation_ids_register_once() {
        let mut svc = service("orders", vec![]);
        let mut ids = MockIdGenerator::new();
        ids.expect_new_id().times(2).returning(|| "kong".to_string());

        let added = merge_service(&mut svc, &document(&["A", "A", "B"]), true, &mut ids);
        assert_eq!(added, 2);
        assert_eq!(svc.apis.len(), 2);
    }

    #[test]
    fn test_server_ids_assigned_only_when_empty() {
        let mut svc = service("orders", vec![]);
        svc.prod_server = Server {
            host: "orders".to_string(),
            port: 8080,
            service_id: "prod-fixed".to_string(),
        };
        let manifest = Manifest {
            services: vec![svc],
            ..Default::default()
        };

        let mut reconciler = Reconciler::with_ids(counting_ids());
        let reconciled = reconciler
            .reconcile_with(manifest, |_| Ok(document(&[])))
            .unwrap();

        let svc = &reconciled.catalog.manifest().services[0];
        assert_eq!(svc.prod_server.service_id, "prod-fixed");
        assert_eq!(svc.mock_server.service_id, "id-1");
        assert_eq!(reconciled.summary.server_ids_assigned, 1);
    }

    #[test]
    fn test_implemented_follows_init_is_mock() {
        let manifest = Manifest {
            init_is_mock: true,
            services: vec![service("orders", vec![])],
            ..Default::default()
        };
        let mut reconciler = Reconciler::with_ids(counting_ids());
        let reconciled = reconciler
            .reconcile_with(manifest, |_| Ok(document(&["A"])))
            .unwrap();
        assert!(!reconciled.catalog.manifest().services[0].apis[0].implemented);
    }

    #[test]
    fn test_load_failure_names_service() {
        let manifest = Manifest {
            services: vec![service("orders", vec![]), service("stock", vec![])],
            ..Default::default()
        };
        let mut reconciler = Reconciler::with_ids(counting_ids());
        let err = reconciler
            .reconcile_with(manifest, |svc| {
                if svc.service_name == "stock" {
                    Err(ForgeError::parse("stock.yaml", "bad yaml"))
                } else {
                    Ok(document(&["A"]))
                }
            })
            .unwrap_err();

        assert!(matches!(err, ForgeError::Service { ref service, .. } if service == "stock"));
    }

    #[test]
    fn test_second_pass_is_noop() {
        let manifest = Manifest {
            services: vec![service("orders", vec![])],
            ..Default::default()
        };
        let mut reconciler = Reconciler::with_ids(counting_ids());
        let first = reconciler
            .reconcile_with(manifest, |_| Ok(document(&["A", "B"])))
            .unwrap();
        let after_first = first.catalog.into_manifest();

        let mut never = MockIdGenerator::new();
        never.expect_new_id().never();
        let second = Reconciler::with_ids(never)
            .reconcile_with(after_first.clone(), |_| Ok(document(&["B", "A"])))
            .unwrap();

        assert_eq!(second.summary.added, 0);
        assert_eq!(second.summary.server_ids_assigned, 0);
        assert_eq!(second.catalog.manifest(), &after_first);
    }
}
