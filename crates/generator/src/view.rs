//! Serializable rows handed to the templates

use api_forge_common::{ApiKey, Catalog, Operation, Result, Server, ServiceEntry};
use serde::Serialize;

pub const PRODUCTION_MARKER: &str = "🟢 production";
pub const MOCK_MARKER: &str = "🟡 mock";

/// Display marker for an ApiKey's implementation status
pub fn status_marker(implemented: bool) -> &'static str {
    if implemented {
        PRODUCTION_MARKER
    } else {
        MOCK_MARKER
    }
}

#[derive(Debug, Serialize)]
pub struct ServiceView<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub prod: ServerView<'a>,
    pub mock: ServerView<'a>,
    pub operations: Vec<OperationView<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ServerView<'a> {
    pub host: &'a str,
    pub port: u16,
    pub service_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct OperationView<'a> {
    pub resource_id: &'a str,
    pub kong_id: &'a str,
    pub path: &'a str,
    pub method: &'a str,
    pub method_upper: String,
    pub operation_id: &'a str,
    pub summary: &'a str,
    pub display_name: String,
    pub param_count: usize,
    pub has_body: bool,
    pub request_body: &'a str,
    pub responses: String,
    pub implemented: bool,
    pub status: &'static str,
    pub normal_status: &'a str,
    /// Whether a 2xx response exists
    pub success: bool,
}

impl<'a> ServiceView<'a> {
    pub fn build(entry: ServiceEntry<'a>) -> Result<Self> {
        let operations = entry
            .keyed_operations()?
            .into_iter()
            .map(|(op, key)| OperationView::build(op, key))
            .collect();

        Ok(Self {
            name: entry.name(),
            description: entry.description(),
            prod: ServerView::from(&entry.service.prod_server),
            mock: ServerView::from(&entry.service.mock_server),
            operations,
        })
    }
}

impl<'a> From<&'a Server> for ServerView<'a> {
    fn from(server: &'a Server) -> Self {
        Self {
            host: &server.host,
            port: server.port,
            service_id: &server.service_id,
        }
    }
}

impl<'a> OperationView<'a> {
    pub fn build(op: &'a Operation, key: &'a ApiKey) -> Self {
        Self {
            resource_id: &key.resource_id,
            kong_id: &key.kong_id,
            path: &op.path,
            method: &op.method,
            method_upper: op.method_upper(),
            operation_id: &op.operation_id,
            summary: &op.summary,
            display_name: op.display_name(),
            param_count: op.request.param_count,
            has_body: op.request.has_body,
            request_body: op.request.body_name(),
            responses: op.response_names(),
            implemented: key.implemented,
            status: status_marker(key.implemented),
            normal_status: op.normal_status(),
            success: op.responses.iter().any(|res| res.is_success()),
        }
    }
}

/// Views for every service in manifest order
pub fn service_views(catalog: &Catalog) -> Result<Vec<ServiceView<'_>>> {
    catalog.services().map(ServiceView::build).collect()
}

pub const TSV_HEADER: [&str; 11] = [
    "Service",
    "Name",
    "ResourceId",
    "Path",
    "Method",
    "OperationId",
    "Summary",
    "ParamNum",
    "RequestBody",
    "Responses",
    "Status",
];

/// Header row plus one row per operation
pub fn tsv_rows(services: &[ServiceView<'_>]) -> Vec<Vec<String>> {
    let mut rows = vec![TSV_HEADER.iter().map(|h| h.to_string()).collect()];

    for service in services {
        for op in &service.operations {
            rows.push(vec![
                service.name.to_string(),
                service.description.to_string(),
                op.resource_id.to_string(),
                op.path.to_string(),
                op.method.to_string(),
                op.operation_id.to_string(),
                op.summary.to_string(),
                op.param_count.to_string(),
                op.request_body.to_string(),
                op.responses.clone(),
                op.status.to_string(),
            ]);
        }
    }

    rows
}
