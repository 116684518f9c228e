#![deny(missing_docs)]

//! # OpenAPI Parsing Module
//!
//! - **shims**: serde view of the parts of an OpenAPI 3.x document we read.
//! - **document**: loading and version checks.
//! - **models**: intermediate representation of operations.
//! - **params**: parameter resolution and path template reconciliation.
//! - **operations**: flattening paths into `ParsedOperation`s.

pub mod document;
pub mod models;
pub mod operations;
pub mod params;
pub mod shims;

pub use document::{load_openapi_document, read_openapi_file, OpenApiDocument};
pub use models::{
    HttpMethod, OperationParam, ParamKind, ParamLocation, ParsedOperation, RequestBodyInfo,
    TagInfo,
};
pub use operations::{parse_openapi_operations, parse_operations};
