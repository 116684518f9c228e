#![deny(missing_docs)]

//! # Document Loading
//!
//! Reads an OpenAPI 3.x document (YAML or JSON) and validates its version.

use crate::error::{AppError, AppResult};
use crate::oas::models::TagInfo;
use crate::oas::shims::ShimOpenApi;
use std::fs;
use std::path::Path;

/// A validated OpenAPI 3.x document.
#[derive(Clone)]
pub struct OpenApiDocument {
    /// Raw deserialized document.
    pub raw: ShimOpenApi,
}

impl OpenApiDocument {
    /// The declared `openapi` version.
    pub fn version(&self) -> &str {
        self.raw.openapi.as_deref().unwrap_or_default()
    }

    /// The API title from `info`.
    pub fn title(&self) -> &str {
        self.raw
            .info
            .as_ref()
            .map(|i| i.title.as_str())
            .unwrap_or_default()
    }

    /// Top-level tag metadata in document order.
    pub fn tags(&self) -> Vec<TagInfo> {
        self.raw
            .tags
            .iter()
            .map(|t| TagInfo {
                name: t.name.clone(),
                description: t.description.clone(),
            })
            .collect()
    }
}

/// Parses the document text. JSON input is accepted since it is valid YAML.
///
/// # Errors
///
/// Fails when the text is not a mapping, or when the `openapi` field is missing
/// or names a version other than 3.x.
pub fn load_openapi_document(content: &str) -> AppResult<OpenApiDocument> {
    let raw: ShimOpenApi = serde_yaml::from_str(content)
        .map_err(|e| AppError::OpenApi(format!("Failed to parse OpenAPI document: {}", e)))?;

    match (&raw.openapi, &raw.swagger) {
        (Some(version), _) if version.starts_with("3.") => {}
        (Some(version), _) => {
            return Err(AppError::OpenApi(format!(
                "Unsupported OpenAPI version: {}. Only 3.x documents are supported.",
                version
            )))
        }
        (None, Some(version)) => {
            return Err(AppError::OpenApi(format!(
                "Swagger {} documents are not supported. Convert to OpenAPI 3.x first.",
                version
            )))
        }
        (None, None) => {
            return Err(AppError::OpenApi(
                "Invalid OpenAPI document: missing 'openapi' version field.".into(),
            ))
        }
    }

    tracing::debug!(
        title = raw.info.as_ref().map(|i| i.title.as_str()).unwrap_or_default(),
        paths = raw.paths.items.len(),
        "loaded OpenAPI document"
    );

    Ok(OpenApiDocument { raw })
}

/// Reads and parses a document from disk.
pub fn read_openapi_file(path: &Path) -> AppResult<OpenApiDocument> {
    if !path.exists() {
        return Err(AppError::OpenApi(format!(
            "OpenAPI file not found: {:?}",
            path
        )));
    }
    let content = fs::read_to_string(path)
        .map_err(|e| AppError::OpenApi(format!("Failed to read {:?}: {}", path, e)))?;
    load_openapi_document(&content)
}
