//! Renders the `mod.rs` that ties the generated group modules together.

use crate::error::{AppError, AppResult};
use crate::grouping::ResourceGroup;
use crate::naming::{sanitize_type_name, to_kebab_case};
use crate::render::group::command_enum_name;
use crate::render::{RenderOptions, GENERATED_HEADER};
use crate::template::{doc_comment, render_template, rust_string_literal};
use std::collections::BTreeMap;

const INDEX_TEMPLATE: &str = r#"{{header}}

//! Resource commands generated from {{source}}.

{{mods}}
use clap::Subcommand;
use {{sdk_crate}}::{ApiClient, SdkResult};
use serde_json::Value;

/// One sub-command per resource tag.
#[derive(Subcommand, Debug, Clone)]
pub enum ResourceCommand {
{{variants}}}

impl ResourceCommand {
    /// Dispatches to the selected resource command.
    pub fn run(&self, client: &ApiClient) -> SdkResult<Value> {
        match self {
{{match_arms}}        }
    }
}
"#;

/// Renders the index module for `groups`.
///
/// # Errors
///
/// Fails when `groups` is empty.
pub fn render_module_index(
    groups: &BTreeMap<String, ResourceGroup>,
    source_title: &str,
    options: &RenderOptions,
) -> AppResult<String> {
    if groups.is_empty() {
        return Err(AppError::Render("No resource groups to index".into()));
    }

    let mut mods = String::new();
    let mut variants = String::new();
    let mut match_arms = String::new();

    // Sorted by module name so the output is stable across tag spellings.
    let mut ordered: Vec<&ResourceGroup> = groups.values().collect();
    ordered.sort_by_key(|g| g.module_name());

    for group in ordered {
        let module = group.module_name();
        let variant = sanitize_type_name(&group.tag);

        mods.push_str(&format!("pub mod {};\n", module));

        let docs = group
            .description
            .clone()
            .unwrap_or_else(|| format!("Operations tagged `{}`.", group.tag));
        variants.push_str(&doc_comment(&docs, 4));
        variants.push_str(&format!(
            "    #[command(name = {}, subcommand)]\n    {}({}::{}),\n",
            rust_string_literal(&to_kebab_case(&group.tag)),
            variant,
            module,
            command_enum_name(group)
        ));

        match_arms.push_str(&format!(
            "            Self::{}(cmd) => cmd.run(client),\n",
            variant
        ));
    }

    let mut values = BTreeMap::new();
    values.insert("header", GENERATED_HEADER.to_string());
    values.insert("source", format!("`{}`", source_title.replace('`', "'")));
    values.insert("mods", mods);
    values.insert("sdk_crate", options.sdk_crate.clone());
    values.insert("variants", variants);
    values.insert("match_arms", match_arms);

    render_template(INDEX_TEMPLATE, &values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::group_operations_by_tag;
    use crate::oas::operations::parse_openapi_operations;
    use crate::render::verify_rust_syntax;
    use pretty_assertions::assert_eq;

    const DOC: &str = r#"
openapi: 3.0.3
paths:
  /api/v1/users:
    get: {operationId: listUsers, tags: [User]}
  /api/v1/groups:
    get: {operationId: listGroups, tags: [Group]}
  /api/v1/users/{userId}/factors:
    get:
      operationId: listFactors
      tags: [UserFactor]
      parameters:
        - {name: userId, in: path, required: true, schema: {type: string}}
"#;

    #[test]
    fn test_render_index() {
        let groups = group_operations_by_tag(parse_openapi_operations(DOC).unwrap(), &[]);
        let code = render_module_index(&groups, "Okta Admin Management", &RenderOptions::default())
            .unwrap();

        let mods: Vec<&str> = code.lines().filter(|l| l.starts_with("pub mod ")).collect();
        assert_eq!(mods, vec!["pub mod group;", "pub mod user;", "pub mod user_factor;"]);

        assert!(code.starts_with(GENERATED_HEADER));
        assert!(code.contains("//! Resource commands generated from `Okta Admin Management`."));
        assert!(code.contains(
            "    #[command(name = \"user-factor\", subcommand)]\n    UserFactor(user_factor::UserFactorCommand),"
        ));
        assert!(code.contains("            Self::Group(cmd) => cmd.run(client),"));
        verify_rust_syntax("mod.rs", &code).unwrap();
    }

    #[test]
    fn test_render_index_empty() {
        let err = render_module_index(&BTreeMap::new(), "x", &RenderOptions::default())
            .err()
            .unwrap();
        assert!(format!("{}", err).contains("No resource groups"));
    }
}
