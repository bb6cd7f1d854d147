//! Flattens an OpenAPI tree into ApiDocument

use super::node::Node;
use api_forge_common::{ApiDocument, Operation, Request, Response};

/// Path item keys that hold operations
pub const HTTP_METHODS: &[&str] = &[
    "get", "put", "post", "delete", "options", "head", "patch", "trace",
];

/// Convert a document tree into header fields and operations
///
/// Paths, methods and responses keep their source order.
pub fn convert_document(root: Node<'_>) -> ApiDocument {
    let info = root.get("info");

    ApiDocument {
        format_version: root.get("openapi").string_or_default(),
        title: info.get("title").string_or_default(),
        description: info.get("description").string_or_default(),
        version: info.get("version").string_or_default(),
        operations: extract_operations(root.get("paths")),
    }
}

fn extract_operations(paths: Node<'_>) -> Vec<Operation> {
    let mut operations = Vec::new();

    for (path, path_item) in paths.entries() {
        for (method, item) in path_item.entries() {
            // Path-level keys such as `parameters` or `servers` are not operations
            if !HTTP_METHODS.contains(&method.to_ascii_lowercase().as_str()) {
                continue;
            }
            operations.push(convert_operation(&path, &method, item));
        }
    }

    operations
}

fn convert_operation(path: &str, method: &str, item: Node<'_>) -> Operation {
    Operation {
        path: path.to_string(),
        method: method.to_string(),
        operation_id: item.get("operationId").string_or_default(),
        summary: item.get("summary").string_or_default(),
        description: item.get("description").string_or_default(),
        request: convert_request(item),
        responses: convert_responses(item.get("responses")),
    }
}

/// A request has a body only when `requestBody.description` is present
fn convert_request(item: Node<'_>) -> Request {
    let body_description = item.get("requestBody").get("description").as_string();

    Request {
        param_count: item.get("parameters").seq_len(),
        has_body: body_description.is_some(),
        body_description: body_description.unwrap_or_default(),
    }
}

fn convert_responses(responses: Node<'_>) -> Vec<Response> {
    responses
        .entries()
        .into_iter()
        .map(|(status, res)| Response {
            status,
            description: res.get("description").string_or_default(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_yaml::Value;

    fn convert(yaml: &str) -> ApiDocument {
        let root: Value = serde_yaml::from_str(yaml).unwrap();
        convert_document(Node::new(&root))
    }

    #[test]
    fn test_operation_fields() {
        let document = convert(
            r#"
paths:
  /orders/{orderId}:
    parameters:
      - name: orderId
        in: path
    put:
      operationId: updateOrder
      summary: Update order
      description: Replace an order
      parameters:
        - name: orderId
          in: path
        - name: dryRun
          in: query
      requestBody:
        description: Order body
        content: {}
      responses:
        "200":
          description: Updated
        default:
          description: Error
"#,
        );

        assert_eq!(document.operations.len(), 1);
        let op = &document.operations[0];
        assert_eq!(op.path, "/orders/{orderId}");
        assert_eq!(op.method, "put");
        assert_eq!(op.operation_id, "updateOrder");
        assert_eq!(op.summary, "Update order");
        assert_eq!(op.description, "Replace an order");
        assert_eq!(op.request.param_count, 2);
        assert!(op.request.has_body);
        assert_eq!(op.request.body_description, "Order body");
        assert_eq!(op.responses.len(), 2);
        assert_eq!(op.responses[1].status, "default");
        assert_eq!(op.responses[1].description, "Error");
    }

    #[test]
    fn test_missing_fields_default() {
        let document = convert("paths:\n  /ping:\n    get: {}\n");
        let op = &document.operations[0];
        assert_eq!(op.operation_id, "");
        assert_eq!(op.request.param_count, 0);
        assert!(!op.request.has_body);
        assert!(op.responses.is_empty());
    }

    #[test]
    fn test_request_body_without_description() {
        let document = convert(
            "paths:\n  /orders:\n    post:\n      operationId: createOrder\n      requestBody:\n        content: {}\n",
        );
        assert!(!document.operations[0].request.has_body);
    }

    #[test]
    fn test_document_order_is_kept() {
        let document = convert(
            r#"
paths:
  /b:
    post: {operationId: second}
    get: {operationId: first}
  /a:
    delete: {operationId: third}
"#,
        );
        let ids: Vec<&str> = document
            .operations
            .iter()
            .map(|op| op.operation_id.as_str())
            .collect();
        assert_eq!(ids, vec!["second", "first", "third"]);
    }
}
