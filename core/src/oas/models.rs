#![deny(missing_docs)]

//! # OpenAPI Models
//!
//! Intermediate Representation (IR) for parsed OpenAPI operations.
//!
//! These structs carry data from the YAML document into grouping and rendering.

use std::fmt;

/// HTTP methods an OpenAPI path item can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// PATCH
    Patch,
    /// DELETE
    Delete,
    /// HEAD
    Head,
    /// OPTIONS
    Options,
    /// TRACE
    Trace,
}

impl HttpMethod {
    /// Upper-case wire name (e.g. `GET`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Trace => "TRACE",
        }
    }

    /// Name of the matching `okta_sdk::Method` variant.
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Get => "Get",
            Self::Post => "Post",
            Self::Put => "Put",
            Self::Patch => "Patch",
            Self::Delete => "Delete",
            Self::Head => "Head",
            Self::Options => "Options",
            Self::Trace => "Trace",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The source location of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamLocation {
    /// URL path segment (`/users/{id}`).
    Path,
    /// Query string (`?limit=20`).
    Query,
    /// Request header.
    Header,
    /// Cookie.
    Cookie,
}

impl ParamLocation {
    /// Parses the `in` field of a parameter object.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "path" => Some(Self::Path),
            "query" => Some(Self::Query),
            "header" => Some(Self::Header),
            "cookie" => Some(Self::Cookie),
            _ => None,
        }
    }
}

/// Value shape of a parameter, used to pick the argument type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamKind {
    /// Free-form string (also used for refs and unknown types).
    String,
    /// Integer.
    Integer,
    /// Floating point number.
    Number,
    /// Boolean.
    Boolean,
    /// Repeated values of the inner kind.
    Array(Box<ParamKind>),
}

/// A parameter attached to an operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationParam {
    /// Parameter name as written in the document (e.g. `userId`).
    pub name: String,
    /// Where the value is sent.
    pub location: ParamLocation,
    /// Whether the value must be supplied. Path parameters are always required.
    pub required: bool,
    /// Description from the document.
    pub description: Option<String>,
    /// Value shape.
    pub kind: ParamKind,
    /// Allowed values for string enums.
    pub enum_values: Vec<String>,
    /// Whether the parameter is deprecated.
    pub deprecated: bool,
}

/// JSON request body information.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBodyInfo {
    /// Whether the body must be supplied.
    pub required: bool,
    /// Schema component name when the body schema is a `$ref`.
    pub schema_name: Option<String>,
    /// Description from the document.
    pub description: Option<String>,
}

/// A single method + path combination.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedOperation {
    /// The URL path template (e.g. `/api/v1/users/{id}`).
    pub path: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// `operationId`, or a name derived from method and path.
    pub operation_id: String,
    /// Tags in document order.
    pub tags: Vec<String>,
    /// Short summary (falls back to the path item summary).
    pub summary: Option<String>,
    /// Long description.
    pub description: Option<String>,
    /// Merged path-level and operation-level parameters.
    pub params: Vec<OperationParam>,
    /// JSON request body, if the operation accepts one.
    pub request_body: Option<RequestBodyInfo>,
    /// Whether the operation is deprecated.
    pub deprecated: bool,
}

impl ParsedOperation {
    /// Path parameters in declaration order.
    pub fn path_params(&self) -> impl Iterator<Item = &OperationParam> {
        self.params
            .iter()
            .filter(|p| p.location == ParamLocation::Path)
    }

    /// Parameters of the given location.
    pub fn params_in(&self, location: ParamLocation) -> impl Iterator<Item = &OperationParam> {
        self.params.iter().filter(move |p| p.location == location)
    }
}

/// Tag metadata from the top-level `tags` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInfo {
    /// Tag name.
    pub name: String,
    /// Tag description.
    pub description: Option<String>,
}
