//! Renders one tag group into a clap sub-command module.

use crate::error::{AppError, AppResult};
use crate::grouping::ResourceGroup;
use crate::naming::{sanitize_ident, sanitize_type_name, to_kebab_case, to_snake_case};
use crate::oas::models::{OperationParam, ParamKind, ParamLocation, ParsedOperation};
use crate::render::{RenderOptions, GENERATED_HEADER};
use crate::template::{doc_comment, inner_doc_comment, render_template, rust_string_literal};
use std::collections::{BTreeMap, HashSet};

const GROUP_TEMPLATE: &str = r#"{{header}}

{{module_docs}}
use clap::{Args, Subcommand};
use {{sdk_crate}}::{ApiClient, Method, RawCall, SdkResult};
use serde_json::Value;

{{enum_docs}}#[derive(Subcommand, Debug, Clone)]
pub enum {{enum_name}} {
{{variants}}}
{{args_structs}}
impl {{enum_name}} {
    /// Runs the selected operation and returns the decoded response body.
    pub fn run(&self, client: &ApiClient) -> SdkResult<Value> {
        match self {
{{match_arms}}        }
    }
}
"#;

/// Flag names clap reserves on every sub-command.
const RESERVED_LONGS: &[&str] = &["help"];

/// Name of the enum a group renders to (e.g. `UserCommand`).
pub fn command_enum_name(group: &ResourceGroup) -> String {
    format!("{}Command", sanitize_type_name(&group.tag))
}

/// One rendered command-line argument.
#[derive(Debug, Clone, PartialEq)]
struct ArgField {
    ident: String,
    long: String,
    ty: String,
    attrs: Vec<String>,
    docs: Option<String>,
    call: String,
}

/// Renders the module for one tag group.
///
/// # Errors
///
/// Fails when the group has no operations.
pub fn render_group_module(group: &ResourceGroup, options: &RenderOptions) -> AppResult<String> {
    if group.operations.is_empty() {
        return Err(AppError::Render(format!(
            "No operations found for tag '{}'",
            group.tag
        )));
    }

    let enum_name = command_enum_name(group);
    let names = group.subcommand_names();
    let variant_names = unique_variant_names(&names);

    let mut variants = String::new();
    let mut args_structs = String::new();
    let mut match_arms = String::new();

    for ((op, sub), variant) in group.operations.iter().zip(&names).zip(variant_names) {
        let args_name = format!("{}Args", variant);
        let fields = build_fields(op);

        variants.push_str(&render_variant(op, sub, &variant, &args_name));
        args_structs.push('\n');
        args_structs.push_str(&render_args_struct(op, &args_name, &fields));
        match_arms.push_str(&render_match_arm(op, &variant, &fields));
    }

    let mut module_docs = format!("Commands for operations tagged `{}`.", group.tag);
    if let Some(desc) = &group.description {
        module_docs.push_str("\n\n");
        module_docs.push_str(desc);
    }

    let mut values = BTreeMap::new();
    values.insert("header", GENERATED_HEADER.to_string());
    values.insert("module_docs", inner_doc_comment(&module_docs));
    values.insert("sdk_crate", options.sdk_crate.clone());
    values.insert(
        "enum_docs",
        doc_comment(&format!("Sub-commands of the `{}` resource.", group.tag), 0),
    );
    values.insert("enum_name", enum_name);
    values.insert("variants", variants);
    values.insert("args_structs", args_structs);
    values.insert("match_arms", match_arms);

    render_template(GROUP_TEMPLATE, &values)
}

/// Enum variant names for `subcommands`. Distinct names such as `list2` and
/// `list-2` share a Pascal form, so later ones get a numeric suffix.
fn unique_variant_names(subcommands: &[String]) -> Vec<String> {
    let mut taken: Vec<String> = Vec::with_capacity(subcommands.len());
    for sub in subcommands {
        let base = sanitize_type_name(sub);
        let mut unique = base.clone();
        let mut n = 2;
        while taken.contains(&unique) {
            unique = format!("{}{}", base, n);
            n += 1;
        }
        taken.push(unique);
    }
    taken
}

fn render_variant(op: &ParsedOperation, sub: &str, variant: &str, args_name: &str) -> String {
    let mut docs = op
        .summary
        .clone()
        .unwrap_or_else(|| format!("Calls `{}`.", op.operation_id));
    if op.deprecated {
        docs.push_str("\n\nDeprecated.");
    }
    docs.push_str(&format!("\n\n`{} {}`", op.method, op.path));

    let mut out = doc_comment(&docs, 4);
    out.push_str(&format!(
        "    #[command(name = {})]\n",
        rust_string_literal(sub)
    ));
    out.push_str(&format!("    {}({}),\n", variant, args_name));
    out
}

fn render_args_struct(op: &ParsedOperation, args_name: &str, fields: &[ArgField]) -> String {
    let mut out = doc_comment(
        &format!(
            "Arguments for `{}` (`{} {}`).",
            op.operation_id, op.method, op.path
        ),
        0,
    );
    out.push_str("#[derive(Args, Debug, Clone)]\n");

    if fields.is_empty() {
        out.push_str(&format!("pub struct {} {{}}\n", args_name));
        return out;
    }

    out.push_str(&format!("pub struct {} {{\n", args_name));
    for field in fields {
        if let Some(docs) = &field.docs {
            out.push_str(&doc_comment(docs, 4));
        }
        let mut attrs = vec![format!("long = {}", rust_string_literal(&field.long))];
        attrs.extend(field.attrs.iter().cloned());
        out.push_str(&format!("    #[arg({})]\n", attrs.join(", ")));
        out.push_str(&format!("    pub {}: {},\n", field.ident, field.ty));
    }
    out.push_str("}\n");
    out
}

fn render_match_arm(op: &ParsedOperation, variant: &str, fields: &[ArgField]) -> String {
    let binding = if fields.is_empty() { "_args" } else { "args" };
    let mut call = format!(
        "RawCall::new(Method::{}, {})",
        op.method.variant_name(),
        rust_string_literal(&op.path)
    );
    for field in fields {
        call.push_str("\n                    ");
        call.push_str(&field.call);
    }

    format!(
        "            Self::{}({}) => {{\n                let call = {};\n                client.call_raw(call)\n            }}\n",
        variant, binding, call
    )
}

/// Builds the argument list: path params, query params, headers, then the body.
fn build_fields(op: &ParsedOperation) -> Vec<ArgField> {
    let mut idents: HashSet<String> = HashSet::new();
    let mut longs: HashSet<String> = RESERVED_LONGS.iter().map(|s| s.to_string()).collect();
    let mut fields = Vec::new();

    let ordered = op
        .params_in(ParamLocation::Path)
        .chain(op.params_in(ParamLocation::Query))
        .chain(op.params_in(ParamLocation::Header));

    for param in ordered {
        let (ident, long) = unique_names(
            &param.name,
            location_suffix(param.location),
            &mut idents,
            &mut longs,
        );
        fields.push(param_field(param, ident, long));
    }

    if let Some(body) = &op.request_body {
        let (ident, long) = unique_names("data", "body", &mut idents, &mut longs);
        let mut docs = match &body.schema_name {
            Some(schema) => format!("JSON request body (`{}`).", schema),
            None => "JSON request body.".to_string(),
        };
        if let Some(desc) = &body.description {
            docs.push_str("\n\n");
            docs.push_str(desc);
        }
        let (ty, call) = if body.required {
            ("String".to_string(), format!(".json_body(&args.{})?", ident))
        } else {
            (
                "Option<String>".to_string(),
                format!(".json_body_opt(args.{}.as_deref())?", ident),
            )
        };
        fields.push(ArgField {
            ident,
            long,
            ty,
            attrs: Vec::new(),
            docs: Some(docs),
            call,
        });
    }

    fields
}

fn location_suffix(location: ParamLocation) -> &'static str {
    match location {
        ParamLocation::Path => "path",
        ParamLocation::Query => "query",
        ParamLocation::Header => "header",
        ParamLocation::Cookie => "cookie",
    }
}

/// Picks a field name and flag unique within one args struct.
///
/// Clashes get `suffix` appended, then a counter.
fn unique_names(
    name: &str,
    suffix: &str,
    idents: &mut HashSet<String>,
    longs: &mut HashSet<String>,
) -> (String, String) {
    let mut ident = sanitize_ident(&to_snake_case(name));
    let mut long = to_kebab_case(name);
    if long.is_empty() {
        long = ident.trim_matches('_').replace('_', "-");
    }

    if idents.contains(&ident) {
        ident = format!("{}_{}", ident.trim_end_matches('_'), suffix);
    }
    if longs.contains(&long) {
        long = format!("{}-{}", long, suffix);
    }
    let (mut n, base_ident, base_long) = (2, ident.clone(), long.clone());
    while idents.contains(&ident) || longs.contains(&long) {
        ident = format!("{}_{}", base_ident, n);
        long = format!("{}-{}", base_long, n);
        n += 1;
    }

    idents.insert(ident.clone());
    longs.insert(long.clone());
    (ident, long)
}

fn scalar_type(kind: &ParamKind) -> &'static str {
    match kind {
        ParamKind::Integer => "i64",
        ParamKind::Number => "f64",
        ParamKind::Boolean => "bool",
        ParamKind::String | ParamKind::Array(_) => "String",
    }
}

fn param_field(param: &OperationParam, ident: String, long: String) -> ArgField {
    let mut attrs = Vec::new();
    let wire = rust_string_literal(&param.name);

    let (ty, call) = match &param.kind {
        ParamKind::Array(inner) => {
            if param.required {
                attrs.push("required = true".to_string());
            }
            attrs.push("value_delimiter = ','".to_string());
            let method = if param.location == ParamLocation::Header {
                "header_all"
            } else {
                "query_all"
            };
            (
                format!("Vec<{}>", scalar_type(inner)),
                format!(".{}({}, &args.{})", method, wire, ident),
            )
        }
        kind => {
            let scalar = scalar_type(kind);
            if *kind == ParamKind::String && !param.enum_values.is_empty() {
                let values: Vec<String> =
                    param.enum_values.iter().map(|v| rust_string_literal(v)).collect();
                attrs.push(format!("value_parser = [{}]", values.join(", ")));
            }
            let ty = match (param.required, kind) {
                (true, ParamKind::Boolean) => {
                    attrs.push("action = clap::ArgAction::Set".to_string());
                    attrs.push("required = true".to_string());
                    scalar.to_string()
                }
                (true, _) => scalar.to_string(),
                (false, _) => format!("Option<{}>", scalar),
            };
            let value = if param.required {
                format!("Some(&args.{})", ident)
            } else {
                format!("args.{}.as_ref()", ident)
            };
            let call = match param.location {
                ParamLocation::Path => format!(".path_param({}, &args.{})", wire, ident),
                ParamLocation::Header => format!(".header({}, {})", wire, value),
                ParamLocation::Query | ParamLocation::Cookie => {
                    format!(".query({}, {})", wire, value)
                }
            };
            (ty, call)
        }
    };

    let mut docs = param.description.clone();
    if param.deprecated {
        docs = Some(match docs {
            Some(d) => format!("{}\n\nDeprecated.", d),
            None => "Deprecated.".to_string(),
        });
    }

    ArgField {
        ident,
        long,
        ty,
        attrs,
        docs,
        call,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::group_operations_by_tag;
    use crate::oas::operations::parse_openapi_operations;
    use crate::render::verify_rust_syntax;

    const DOC: &str = r#"
openapi: 3.0.3
info: {title: Okta, version: 5.1.0}
tags:
  - name: User
    description: Manage users in the org.
paths:
  /api/v1/users:
    get:
      operationId: listUsers
      summary: List all Users
      tags: [User]
      parameters:
        - {name: q, in: query, description: Finds users by name or email, schema: {type: string}}
        - {name: limit, in: query, schema: {type: integer}}
        - {name: sortOrder, in: query, schema: {type: string, enum: [asc, desc]}}
        - {name: expand, in: query, schema: {type: array, items: {type: string}}}
    post:
      operationId: createUser
      tags: [User]
      parameters:
        - {name: activate, in: query, schema: {type: boolean}}
      requestBody:
        required: true
        content:
          application/json:
            schema: {$ref: '#/components/schemas/CreateUserRequest'}
  /api/v1/users/{userId}/lifecycle/deactivate:
    post:
      operationId: deactivateUser
      deprecated: true
      tags: [User]
      parameters:
        - {name: userId, in: path, required: true, schema: {type: string}}
        - {name: type, in: query, required: true, schema: {type: string}}
        - {name: Prefer, in: header, schema: {type: string}}
"#;

    fn user_group() -> ResourceGroup {
        let ops = parse_openapi_operations(DOC).unwrap();
        let tags = vec![crate::oas::models::TagInfo {
            name: "User".into(),
            description: Some("Manage users in the org.".into()),
        }];
        group_operations_by_tag(ops, &tags).remove("User").unwrap()
    }

    #[test]
    fn test_render_group_module_structure() {
        let code = render_group_module(&user_group(), &RenderOptions::default()).unwrap();

        assert!(code.starts_with(GENERATED_HEADER));
        assert!(code.contains("//! Manage users in the org."));
        assert!(code.contains("use okta_sdk::{ApiClient, Method, RawCall, SdkResult};"));
        assert!(code.contains("pub enum UserCommand {"));
        assert!(code.contains("    #[command(name = \"list\")]\n    List(ListArgs),"));
        assert!(code.contains("    #[command(name = \"create\")]\n    Create(CreateArgs),"));
        assert!(code.contains("    Deactivate(DeactivateArgs),"));
        assert!(code.contains("    /// Deprecated."));
    }

    #[test]
    fn test_render_args_types() {
        let code = render_group_module(&user_group(), &RenderOptions::default()).unwrap();

        assert!(code.contains("    /// Finds users by name or email\n    #[arg(long = \"q\")]\n    pub q: Option<String>,"));
        assert!(code.contains("    pub limit: Option<i64>,"));
        assert!(code.contains("#[arg(long = \"sort-order\", value_parser = [\"asc\", \"desc\"])]"));
        assert!(code.contains("#[arg(long = \"expand\", value_delimiter = ',')]\n    pub expand: Vec<String>,"));
        assert!(code.contains("    pub activate: Option<bool>,"));
        assert!(code.contains("    pub data: String,"));
        assert!(code.contains("    pub type_: String,"));
        assert!(code.contains("#[arg(long = \"prefer\")]"));
    }

    #[test]
    fn test_render_match_arms() {
        let code = render_group_module(&user_group(), &RenderOptions::default()).unwrap();

        assert!(code.contains("RawCall::new(Method::Get, \"/api/v1/users\")"));
        assert!(code.contains(".query(\"limit\", args.limit.as_ref())"));
        assert!(code.contains(".query_all(\"expand\", &args.expand)"));
        assert!(code.contains(".json_body(&args.data)?"));
        assert!(code.contains(".path_param(\"userId\", &args.user_id)"));
        assert!(code.contains(".query(\"type\", Some(&args.type_))"));
        assert!(code.contains(".header(\"Prefer\", args.prefer.as_ref())"));
    }

    #[test]
    fn test_rendered_group_is_valid_rust() {
        let code = render_group_module(&user_group(), &RenderOptions::default()).unwrap();
        verify_rust_syntax("user.rs", &code).unwrap();
    }

    #[test]
    fn test_empty_args_struct_and_custom_crate() {
        let yaml = r#"
openapi: 3.0.0
paths:
  /ping:
    get: {operationId: ping}
"#;
        let ops = parse_openapi_operations(yaml).unwrap();
        let group = group_operations_by_tag(ops, &[]).remove("default").unwrap();
        let options = RenderOptions {
            sdk_crate: "crate::sdk".into(),
        };
        let code = render_group_module(&group, &options).unwrap();

        assert!(code.contains("use crate::sdk::{ApiClient, Method, RawCall, SdkResult};"));
        assert!(code.contains("pub struct PingArgs {}"));
        assert!(code.contains("Self::Ping(_args) => {"));
        verify_rust_syntax("default.rs", &code).unwrap();
    }

    #[test]
    fn test_body_field_name_collision() {
        let yaml = r#"
openapi: 3.0.0
paths:
  /things:
    post:
      operationId: createThing
      parameters:
        - {name: data, in: query, schema: {type: string}}
      requestBody:
        content:
          application/json:
            schema: {type: object}
"#;
        let ops = parse_openapi_operations(yaml).unwrap();
        let group = group_operations_by_tag(ops, &[]).remove("default").unwrap();
        let code = render_group_module(&group, &RenderOptions::default()).unwrap();

        assert!(code.contains("#[arg(long = \"data\")]\n    pub data: Option<String>,"));
        assert!(code.contains("#[arg(long = \"data-body\")]\n    pub data_body: Option<String>,"));
        assert!(code.contains(".query(\"data\", args.data.as_ref())"));
        assert!(code.contains(".json_body_opt(args.data_body.as_deref())?"));
    }

    #[test]
    fn test_unique_variant_names() {
        let subs: Vec<String> = ["list2", "list-2", "get"].iter().map(|s| s.to_string()).collect();
        assert_eq!(unique_variant_names(&subs), vec!["List2", "List22", "Get"]);
    }

    #[test]
    fn test_pascal_clash_renders_distinct_variants() {
        let doc = r#"
openapi: 3.0.3
paths:
  /api/v1/users:
    get: {operationId: list2Users, tags: [User]}
  /{a}:
    get:
      operationId: listUsers
      tags: [User]
      parameters:
        - {name: a, in: path, required: true, schema: {type: string}}
  /{b}:
    get:
      operationId: listUser
      tags: [User]
      parameters:
        - {name: b, in: path, required: true, schema: {type: string}}
"#;
        let groups = group_operations_by_tag(parse_openapi_operations(doc).unwrap(), &[]);
        let group = &groups["User"];
        assert_eq!(group.subcommand_names(), vec!["list2", "list", "list-2"]);

        let code = render_group_module(group, &RenderOptions::default()).unwrap();
        assert!(code.contains("    List2(List2Args),"));
        assert!(code.contains("    List22(List22Args),"));
        assert!(code.contains("#[command(name = \"list-2\")]"));
        verify_rust_syntax("user.rs", &code).unwrap();
    }

    #[test]
    fn test_empty_group_fails() {
        let group = ResourceGroup {
            tag: "Empty".into(),
            description: None,
            operations: vec![],
        };
        let err = render_group_module(&group, &RenderOptions::default()).err().unwrap();
        assert!(format!("{}", err).contains("No operations found for tag 'Empty'"));
    }
}
