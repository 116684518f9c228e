#![deny(missing_docs)]

//! # Parameter Resolution
//!
//! Resolves inline and `$ref` parameters into `OperationParam`s, merges
//! path-level with operation-level parameters, and reconciles declared path
//! parameters with the placeholders in the path template.

use crate::error::{AppError, AppResult};
use crate::oas::models::{OperationParam, ParamKind, ParamLocation};
use crate::oas::shims::{ShimComponents, ShimParameter, ShimSchema};
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use utoipa::openapi::RefOr;

const PARAMETER_REF_PREFIX: &str = "#/components/parameters/";

/// Extracts placeholder names from a path template, in template order.
///
/// e.g. `/api/v1/groups/{groupId}/users/{userId}` -> `["groupId", "userId"]`
pub fn extract_path_params(path: &str) -> Vec<String> {
    static PATH_PARAM_RE: OnceLock<Regex> = OnceLock::new();
    let re =
        PATH_PARAM_RE.get_or_init(|| Regex::new(r"\{([^}/]+)\}").expect("Invalid regex constant"));
    re.captures_iter(path).map(|c| c[1].to_string()).collect()
}

/// Resolves a list of parameters, following local component references.
pub fn resolve_parameters(
    params: &[RefOr<ShimParameter>],
    components: Option<&ShimComponents>,
) -> AppResult<Vec<OperationParam>> {
    params
        .iter()
        .map(|p| match p {
            RefOr::T(inline) => convert_parameter(inline),
            RefOr::Ref(r) => convert_parameter(lookup_parameter(&r.ref_location, components)?),
        })
        .collect()
}

fn lookup_parameter<'a>(
    ref_location: &str,
    components: Option<&'a ShimComponents>,
) -> AppResult<&'a ShimParameter> {
    let name = ref_location
        .strip_prefix(PARAMETER_REF_PREFIX)
        .ok_or_else(|| {
            AppError::OpenApi(format!(
                "Unsupported parameter reference '{}': only '{}*' is resolved",
                ref_location, PARAMETER_REF_PREFIX
            ))
        })?;

    components
        .and_then(|c| c.parameters.get(name))
        .ok_or_else(|| {
            AppError::OpenApi(format!(
                "Parameter reference '{}' does not resolve to a component",
                ref_location
            ))
        })
}

fn convert_parameter(param: &ShimParameter) -> AppResult<OperationParam> {
    let location = ParamLocation::parse(&param.location).ok_or_else(|| {
        AppError::OpenApi(format!(
            "Parameter '{}' has unknown location '{}'",
            param.name, param.location
        ))
    })?;

    let (kind, enum_values) = match &param.schema {
        Some(schema) => (schema_kind(schema), enum_strings(schema)),
        None => (ParamKind::String, Vec::new()),
    };

    Ok(OperationParam {
        name: param.name.clone(),
        location,
        required: param.required || location == ParamLocation::Path,
        description: param.description.clone(),
        kind,
        enum_values,
        deprecated: param.deprecated,
    })
}

/// Maps a schema onto the argument value shape. References and objects are strings.
pub fn schema_kind(schema: &ShimSchema) -> ParamKind {
    if schema.ref_path.is_some() {
        return ParamKind::String;
    }
    match schema.primary_type() {
        Some("integer") => ParamKind::Integer,
        Some("number") => ParamKind::Number,
        Some("boolean") => ParamKind::Boolean,
        Some("array") => {
            let inner = schema
                .items
                .as_deref()
                .map(schema_kind)
                .unwrap_or(ParamKind::String);
            match inner {
                // Nested arrays cannot be expressed as repeated flags.
                ParamKind::Array(_) => ParamKind::Array(Box::new(ParamKind::String)),
                other => ParamKind::Array(Box::new(other)),
            }
        }
        _ => ParamKind::String,
    }
}

fn enum_strings(schema: &ShimSchema) -> Vec<String> {
    schema
        .enum_values
        .as_deref()
        .unwrap_or_default()
        .iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect()
}

/// Merges operation parameters over path-level ones.
///
/// Operation parameters win on `(name, location)` collisions.
pub fn merge_parameters(
    operation: Vec<OperationParam>,
    common: &[OperationParam],
) -> Vec<OperationParam> {
    let mut seen: HashSet<(String, ParamLocation)> = HashSet::new();
    let mut merged = Vec::with_capacity(operation.len() + common.len());

    for p in operation {
        seen.insert((p.name.clone(), p.location));
        merged.push(p);
    }
    for p in common {
        if !seen.contains(&(p.name.clone(), p.location)) {
            merged.push(p.clone());
        }
    }
    merged
}

/// Checks declared path parameters against the template.
///
/// Placeholders without a declaration become required string parameters;
/// declarations without a placeholder are an error. Path parameters are
/// reordered to follow the template.
pub fn reconcile_path_params(
    operation_id: &str,
    path: &str,
    params: Vec<OperationParam>,
) -> AppResult<Vec<OperationParam>> {
    let template_names = extract_path_params(path);

    for p in params.iter().filter(|p| p.location == ParamLocation::Path) {
        if !template_names.contains(&p.name) {
            return Err(AppError::OpenApi(format!(
                "Operation '{}' declares path parameter '{}' that is not in '{}'",
                operation_id, p.name, path
            )));
        }
    }

    let (mut path_params, others): (Vec<_>, Vec<_>) = params
        .into_iter()
        .partition(|p| p.location == ParamLocation::Path);

    let mut ordered = Vec::with_capacity(template_names.len() + others.len());
    for name in &template_names {
        match path_params.iter().position(|p| &p.name == name) {
            Some(idx) => ordered.push(path_params.swap_remove(idx)),
            None => {
                tracing::debug!(operation_id, param = %name, "synthesising undeclared path parameter");
                ordered.push(OperationParam {
                    name: name.clone(),
                    location: ParamLocation::Path,
                    required: true,
                    description: None,
                    kind: ParamKind::String,
                    enum_values: Vec::new(),
                    deprecated: false,
                });
            }
        }
    }
    ordered.extend(others);
    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn query(name: &str) -> OperationParam {
        OperationParam {
            name: name.into(),
            location: ParamLocation::Query,
            required: false,
            description: None,
            kind: ParamKind::String,
            enum_values: vec![],
            deprecated: false,
        }
    }

    #[test]
    fn test_extract_path_params() {
        assert_eq!(
            extract_path_params("/api/v1/groups/{groupId}/users/{userId}"),
            vec!["groupId", "userId"]
        );
        assert!(extract_path_params("/api/v1/users").is_empty());
    }

    #[test]
    fn test_resolve_component_reference() {
        let mut parameters = BTreeMap::new();
        parameters.insert(
            "pathUserId".to_string(),
            ShimParameter {
                name: "userId".into(),
                location: "path".into(),
                description: Some("ID of an existing Okta user".into()),
                required: true,
                deprecated: false,
                schema: Some(ShimSchema {
                    schema_type: Some(serde_json::json!("string")),
                    ..Default::default()
                }),
            },
        );
        let components = ShimComponents {
            parameters,
            ..Default::default()
        };
        let params: Vec<RefOr<ShimParameter>> =
            serde_yaml::from_str("- $ref: '#/components/parameters/pathUserId'").unwrap();

        let resolved = resolve_parameters(&params, Some(&components)).unwrap();
        assert_eq!(resolved[0].name, "userId");
        assert_eq!(resolved[0].location, ParamLocation::Path);
        assert!(resolved[0].required);
    }

    #[test]
    fn test_dangling_reference_fails() {
        let params: Vec<RefOr<ShimParameter>> =
            serde_yaml::from_str("- $ref: '#/components/parameters/missing'").unwrap();
        let err = resolve_parameters(&params, None).err().unwrap();
        assert!(format!("{}", err).contains("does not resolve"));
    }

    #[test]
    fn test_schema_kinds_and_enums() {
        let params: Vec<RefOr<ShimParameter>> = serde_yaml::from_str(
            r#"
- {name: limit, in: query, schema: {type: integer, format: int32}}
- {name: expand, in: query, schema: {type: array, items: {type: string}}}
- {name: sortOrder, in: query, schema: {type: string, enum: [asc, desc]}}
- {name: activate, in: query, schema: {type: boolean}}
"#,
        )
        .unwrap();
        let resolved = resolve_parameters(&params, None).unwrap();
        assert_eq!(resolved[0].kind, ParamKind::Integer);
        assert_eq!(resolved[1].kind, ParamKind::Array(Box::new(ParamKind::String)));
        assert_eq!(resolved[2].enum_values, vec!["asc", "desc"]);
        assert_eq!(resolved[3].kind, ParamKind::Boolean);
    }

    #[test]
    fn test_merge_prefers_operation_params() {
        let mut op_limit = query("limit");
        op_limit.required = true;
        let merged = merge_parameters(vec![op_limit], &[query("limit"), query("after")]);
        assert_eq!(merged.len(), 2);
        assert!(merged[0].required);
        assert_eq!(merged[1].name, "after");
    }

    #[test]
    fn test_reconcile_synthesises_and_orders() {
        let mut user = query("userId");
        user.location = ParamLocation::Path;
        let params = vec![query("limit"), user];

        let out = reconcile_path_params("op", "/groups/{groupId}/users/{userId}", params).unwrap();
        let names: Vec<&str> = out.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["groupId", "userId", "limit"]);
        assert!(out[0].required);
    }

    #[test]
    fn test_reconcile_rejects_unknown_path_param() {
        let mut stray = query("appId");
        stray.location = ParamLocation::Path;
        let err = reconcile_path_params("op", "/users/{userId}", vec![stray])
            .err()
            .unwrap();
        assert!(format!("{}", err).contains("'appId'"));
    }
}
