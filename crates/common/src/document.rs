//! Operation model extracted from an OpenAPI document
//!
//! These values are rebuilt from the document on every run and never
//! persisted. They are joined against [`crate::ApiKey`] by operation id.

use serde::Serialize;

/// Status key used by OpenAPI for the catch-all response
pub const DEFAULT_STATUS: &str = "default";

/// The parts of an OpenAPI document that api-forge reads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApiDocument {
    /// `openapi` format version
    pub format_version: String,
    pub title: String,
    /// `info.description`, used as the service's display name
    pub description: String,
    pub version: String,
    /// Operations in document order
    pub operations: Vec<Operation>,
}

/// One method + path entry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Operation {
    pub path: String,
    /// HTTP method as written in the document (usually lowercase)
    pub method: String,
    pub operation_id: String,
    pub summary: String,
    pub description: String,
    pub request: Request,
    pub responses: Vec<Response>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Request {
    pub param_count: usize,
    pub has_body: bool,
    pub body_description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Response {
    /// Status code, or `default`
    pub status: String,
    pub description: String,
}

impl Request {
    /// Display name of the request body, `N/A` when there is none
    pub fn body_name(&self) -> &str {
        if self.has_body {
            &self.body_description
        } else {
            "N/A"
        }
    }
}

impl Response {
    pub fn body_name(&self) -> String {
        if self.status == DEFAULT_STATUS {
            self.status.clone()
        } else {
            format!("{}({})", self.status, self.description)
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.starts_with('2')
    }
}

impl Operation {
    /// `summary(operationId)`, the name used in lists and SQL rows
    pub fn display_name(&self) -> String {
        format!("{}({})", self.summary, self.operation_id)
    }

    /// All response display names joined with `, `
    pub fn response_names(&self) -> String {
        self.responses
            .iter()
            .map(Response::body_name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// First 2xx status in document order, falling back to `default`
    pub fn normal_status(&self) -> &str {
        self.responses
            .iter()
            .find(|res| res.is_success())
            .map(|res| res.status.as_str())
            .unwrap_or(DEFAULT_STATUS)
    }

    pub fn method_upper(&self) -> String {
        self.method.to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: &str, description: &str) -> Response {
        Response {
            status: status.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_response_names() {
        let op = Operation {
            responses: vec![
                response("200", "Order"),
                response("404", "Not Found"),
                response("default", "Unexpected error"),
            ],
            ..Default::default()
        };
        assert_eq!(op.response_names(), "200(Order), 404(Not Found), default");
    }

    #[test]
    fn test_normal_status() {
        let failing = Operation {
            responses: vec![response("404", "Not Found"), response("default", "Error")],
            ..Default::default()
        };
        assert_eq!(failing.normal_status(), "default");

        let created = Operation {
            responses: vec![response("400", "Bad"), response("201", "Created")],
            ..Default::default()
        };
        assert_eq!(created.normal_status(), "201");
    }

    #[test]
    fn test_body_name() {
        let none = Request::default();
        assert_eq!(none.body_name(), "N/A");

        let body = Request {
            param_count: 0,
            has_body: true,
            body_description: "New order".to_string(),
        };
        assert_eq!(body.body_name(), "New order");
    }
}
