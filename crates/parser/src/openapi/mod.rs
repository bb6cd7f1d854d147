//! OpenAPI 3.x document reader
//!
//! ## Usage
//! ```rust,ignore
//! use api_forge_parser::openapi::OpenApiParser;
//!
//! let parser = OpenApiParser::from_file("specs/orders.yaml")?;
//! let document = parser.parse();
//! for op in &document.operations {
//!     println!("{} {} {}", op.method, op.path, op.operation_id);
//! }
//! ```

mod converter;
mod node;
mod parser;

pub use converter::{convert_document, HTTP_METHODS};
pub use node::Node;
pub use parser::OpenApiParser;
