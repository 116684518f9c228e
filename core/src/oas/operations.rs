#![deny(missing_docs)]

//! # Operation Builder
//!
//! Walks the `paths` of a document and flattens every method of every path
//! item into a `ParsedOperation`.

use crate::error::{AppError, AppResult};
use crate::naming::derive_operation_id;
use crate::oas::document::{load_openapi_document, OpenApiDocument};
use crate::oas::models::{HttpMethod, OperationParam, ParsedOperation, RequestBodyInfo};
use crate::oas::params::{merge_parameters, reconcile_path_params, resolve_parameters};
use crate::oas::shims::{ShimComponents, ShimOperation, ShimPathItem, ShimRequestBody};
use std::collections::HashSet;
use utoipa::openapi::RefOr;

const REQUEST_BODY_REF_PREFIX: &str = "#/components/requestBodies/";
const JSON_MEDIA_TYPE: &str = "application/json";

/// Parses a raw document and returns its operations.
pub fn parse_openapi_operations(content: &str) -> AppResult<Vec<ParsedOperation>> {
    let doc = load_openapi_document(content)?;
    parse_operations(&doc)
}

/// Flattens the document's paths into operations, in path order then method order.
///
/// # Errors
///
/// Fails on duplicate operation ids, unresolvable references and path
/// parameters that do not appear in their template.
pub fn parse_operations(doc: &OpenApiDocument) -> AppResult<Vec<ParsedOperation>> {
    let components = doc.raw.components.as_ref();
    let mut operations = Vec::new();
    let mut operation_ids = HashSet::new();

    for (path, item) in &doc.raw.paths.items {
        parse_path_item(&mut operations, &mut operation_ids, path, item, components)?;
    }

    tracing::debug!(count = operations.len(), "parsed operations");
    Ok(operations)
}

fn parse_path_item(
    operations: &mut Vec<ParsedOperation>,
    operation_ids: &mut HashSet<String>,
    path: &str,
    item: &ShimPathItem,
    components: Option<&ShimComponents>,
) -> AppResult<()> {
    let common_params = resolve_parameters(&item.parameters, components)?;

    let methods = [
        (HttpMethod::Get, &item.get),
        (HttpMethod::Post, &item.post),
        (HttpMethod::Put, &item.put),
        (HttpMethod::Patch, &item.patch),
        (HttpMethod::Delete, &item.delete),
        (HttpMethod::Head, &item.head),
        (HttpMethod::Options, &item.options),
        (HttpMethod::Trace, &item.trace),
    ];

    for (method, op) in methods {
        let Some(op) = op else { continue };
        let parsed = build_operation(path, method, op, item, &common_params, components)?;

        if !operation_ids.insert(parsed.operation_id.clone()) {
            return Err(AppError::OpenApi(format!(
                "Duplicate operationId '{}' detected",
                parsed.operation_id
            )));
        }
        operations.push(parsed);
    }
    Ok(())
}

fn build_operation(
    path: &str,
    method: HttpMethod,
    op: &ShimOperation,
    item: &ShimPathItem,
    common_params: &[OperationParam],
    components: Option<&ShimComponents>,
) -> AppResult<ParsedOperation> {
    // 1. Identity
    let operation_id = match op.operation_id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => id.to_string(),
        _ => derive_operation_id(method.as_str(), path),
    };

    // 2. Parameters
    let op_params = resolve_parameters(&op.parameters, components)?;
    let merged = merge_parameters(op_params, common_params);
    let params = reconcile_path_params(&operation_id, path, merged)?;

    // 3. Request Body
    let request_body = match &op.request_body {
        Some(body) => extract_request_body(&operation_id, body, components)?,
        None => None,
    };

    Ok(ParsedOperation {
        path: path.to_string(),
        method,
        operation_id,
        tags: op.tags.clone(),
        summary: op.summary.clone().or_else(|| item.summary.clone()),
        description: op.description.clone(),
        params,
        request_body,
        deprecated: op.deprecated,
    })
}

fn extract_request_body(
    operation_id: &str,
    body: &RefOr<ShimRequestBody>,
    components: Option<&ShimComponents>,
) -> AppResult<Option<RequestBodyInfo>> {
    let body = match body {
        RefOr::T(b) => b,
        RefOr::Ref(r) => {
            let name = r
                .ref_location
                .strip_prefix(REQUEST_BODY_REF_PREFIX)
                .ok_or_else(|| {
                    AppError::OpenApi(format!(
                        "Operation '{}' uses unsupported request body reference '{}'",
                        operation_id, r.ref_location
                    ))
                })?;
            components
                .and_then(|c| c.request_bodies.get(name))
                .ok_or_else(|| {
                    AppError::OpenApi(format!(
                        "Request body reference '{}' does not resolve to a component",
                        r.ref_location
                    ))
                })?
        }
    };

    // Only JSON bodies can be passed through `--data`.
    let Some(media) = body
        .content
        .iter()
        .find(|(ct, _)| ct.split(';').next().map(str::trim) == Some(JSON_MEDIA_TYPE))
        .map(|(_, m)| m)
    else {
        return Ok(None);
    };

    let schema_name = media
        .schema
        .as_ref()
        .and_then(|s| s.ref_path.as_deref())
        .and_then(|r| r.rsplit('/').next())
        .map(str::to_string);

    Ok(Some(RequestBodyInfo {
        required: body.required,
        schema_name,
        description: body.description.clone(),
    }))
}
