#![deny(missing_docs)]

//! # OpenAPI Shims
//!
//! Intermediate deserialization layer mapping directly to OpenAPI YAML objects.
//! Only the parts of the document the command generator reads are modelled;
//! everything else is ignored during deserialization.
//!
//! Note: shims holding `utoipa::openapi::RefOr` do not derive `Debug` because
//! `RefOr` only implements it behind a utoipa feature flag.

use serde::de::Error as DeError;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;
use utoipa::openapi::RefOr;

/// Root document.
#[derive(Deserialize, Clone, Default)]
pub struct ShimOpenApi {
    /// OpenAPI version (e.g. "3.0.3"). Unquoted YAML numbers are accepted.
    #[serde(default, deserialize_with = "version_string")]
    pub openapi: Option<String>,
    /// Swagger version, only read to produce a helpful error.
    #[serde(default, deserialize_with = "version_string")]
    pub swagger: Option<String>,
    /// Metadata about the API.
    pub info: Option<ShimInfo>,
    /// Server configuration.
    #[serde(default)]
    pub servers: Vec<ShimServer>,
    /// Path items.
    #[serde(default)]
    pub paths: ShimPaths,
    /// Reusable components.
    pub components: Option<ShimComponents>,
    /// Tag metadata declared at the top level.
    #[serde(default)]
    pub tags: Vec<ShimTag>,
}

/// Info object.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct ShimInfo {
    /// API title.
    #[serde(default)]
    pub title: String,
    /// API description.
    pub description: Option<String>,
    /// Document version; kept raw because YAML may read `1.0` as a float.
    pub version: Option<Value>,
}

/// Server object.
#[derive(Deserialize, Clone, Debug)]
pub struct ShimServer {
    /// Server URL, possibly templated (e.g. `https://{yourOktaDomain}`).
    pub url: String,
    /// Server description.
    pub description: Option<String>,
}

/// Tag object.
#[derive(Deserialize, Clone, Debug)]
pub struct ShimTag {
    /// Tag name.
    pub name: String,
    /// Tag description.
    pub description: Option<String>,
}

/// Paths object. Keys starting with `x-` are specification extensions.
#[derive(Clone, Default)]
pub struct ShimPaths {
    /// Path items keyed by path template.
    pub items: BTreeMap<String, ShimPathItem>,
    /// Specification extensions attached to the Paths object.
    pub extensions: BTreeMap<String, Value>,
}

impl<'de> Deserialize<'de> for ShimPaths {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        let mut items = BTreeMap::new();
        let mut extensions = BTreeMap::new();

        for (key, value) in raw {
            if key.starts_with("x-") {
                extensions.insert(key, value);
                continue;
            }
            let path_item = serde_json::from_value::<ShimPathItem>(value).map_err(|e| {
                DeError::custom(format!("Failed to parse path item '{}': {}", key, e))
            })?;
            items.insert(key, path_item);
        }

        Ok(Self { items, extensions })
    }
}

/// Path item object.
#[derive(Deserialize, Clone, Default)]
pub struct ShimPathItem {
    /// Summary applying to all operations of the path.
    pub summary: Option<String>,
    /// Parameters common to all operations of the path.
    #[serde(default)]
    pub parameters: Vec<RefOr<ShimParameter>>,
    /// GET operation.
    pub get: Option<ShimOperation>,
    /// POST operation.
    pub post: Option<ShimOperation>,
    /// PUT operation.
    pub put: Option<ShimOperation>,
    /// PATCH operation.
    pub patch: Option<ShimOperation>,
    /// DELETE operation.
    pub delete: Option<ShimOperation>,
    /// HEAD operation.
    pub head: Option<ShimOperation>,
    /// OPTIONS operation.
    pub options: Option<ShimOperation>,
    /// TRACE operation.
    pub trace: Option<ShimOperation>,
}

/// Operation object.
#[derive(Deserialize, Clone, Default)]
pub struct ShimOperation {
    /// Unique identifier for the operation.
    #[serde(rename = "operationId")]
    pub operation_id: Option<String>,
    /// Short summary.
    pub summary: Option<String>,
    /// Verbose description.
    pub description: Option<String>,
    /// Grouping tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Operation-specific parameters.
    #[serde(default)]
    pub parameters: Vec<RefOr<ShimParameter>>,
    /// Request body.
    #[serde(rename = "requestBody")]
    pub request_body: Option<RefOr<ShimRequestBody>>,
    /// Whether the operation is deprecated.
    #[serde(default)]
    pub deprecated: bool,
}

/// Parameter object.
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ShimParameter {
    /// Parameter name.
    pub name: String,
    /// Location: `path`, `query`, `header` or `cookie`.
    #[serde(rename = "in")]
    pub location: String,
    /// Description.
    pub description: Option<String>,
    /// Whether the parameter is required.
    #[serde(default)]
    pub required: bool,
    /// Whether the parameter is deprecated.
    #[serde(default)]
    pub deprecated: bool,
    /// Schema of the parameter value.
    pub schema: Option<ShimSchema>,
}

/// The subset of a Schema object needed to type command arguments.
#[derive(Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ShimSchema {
    /// Reference to a schema component.
    #[serde(rename = "$ref")]
    pub ref_path: Option<String>,
    /// `type`: a string in OAS 3.0, a string or list in OAS 3.1.
    #[serde(rename = "type")]
    pub schema_type: Option<Value>,
    /// Format modifier (e.g. `int32`).
    pub format: Option<String>,
    /// Array item schema.
    pub items: Option<Box<ShimSchema>>,
    /// Allowed values.
    #[serde(rename = "enum")]
    pub enum_values: Option<Vec<Value>>,
}

impl ShimSchema {
    /// Returns the first non-null `type` entry.
    pub fn primary_type(&self) -> Option<&str> {
        match self.schema_type.as_ref()? {
            Value::String(s) => Some(s.as_str()),
            Value::Array(list) => list
                .iter()
                .filter_map(Value::as_str)
                .find(|t| *t != "null"),
            _ => None,
        }
    }
}

/// Request body object.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct ShimRequestBody {
    /// Description.
    pub description: Option<String>,
    /// Whether the body is required.
    #[serde(default)]
    pub required: bool,
    /// Media types keyed by content type.
    #[serde(default)]
    pub content: BTreeMap<String, ShimMediaType>,
}

/// Media type object.
#[derive(Deserialize, Clone, Debug, Default)]
pub struct ShimMediaType {
    /// Body schema.
    pub schema: Option<ShimSchema>,
}

/// Components object. Only the sections referenced by operations are read.
#[derive(Deserialize, Clone, Default)]
pub struct ShimComponents {
    /// Reusable parameters.
    #[serde(default)]
    pub parameters: BTreeMap<String, ShimParameter>,
    /// Reusable request bodies.
    #[serde(rename = "requestBodies", default)]
    pub request_bodies: BTreeMap<String, ShimRequestBody>,
}

fn version_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    match raw {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(DeError::custom(format!(
            "version must be a string, found {}",
            other
        ))),
    }
}
