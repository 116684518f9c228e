#![deny(missing_docs)]

//! # Tag Grouping
//!
//! Buckets operations by their first tag. Each bucket becomes one generated
//! command module.

use crate::error::{AppError, AppResult};
use crate::naming::{assign_subcommand_names, to_snake_case};
use crate::oas::models::{ParsedOperation, TagInfo};
use std::collections::BTreeMap;

/// Tag used for operations that declare no tags.
pub const DEFAULT_TAG: &str = "default";

/// Operations sharing a tag.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceGroup {
    /// Tag name as written in the document.
    pub tag: String,
    /// Tag description from the top-level `tags` list.
    pub description: Option<String>,
    /// Operations in document order.
    pub operations: Vec<ParsedOperation>,
}

impl ResourceGroup {
    /// Rust module name for the group (e.g. `user_factor`).
    pub fn module_name(&self) -> String {
        crate::naming::sanitize_ident(&to_snake_case(&self.tag))
    }

    /// Unique sub-command names, parallel to `operations`.
    pub fn subcommand_names(&self) -> Vec<String> {
        assign_subcommand_names(&self.operations, &self.tag)
    }
}

/// Groups operations by first tag. Untagged operations land in `default`.
///
/// The map is ordered by tag name; operations keep document order.
pub fn group_operations_by_tag(
    operations: Vec<ParsedOperation>,
    tags: &[TagInfo],
) -> BTreeMap<String, ResourceGroup> {
    let mut map: BTreeMap<String, ResourceGroup> = BTreeMap::new();

    for op in operations {
        let tag = op
            .tags
            .first()
            .cloned()
            .unwrap_or_else(|| DEFAULT_TAG.to_string());

        map.entry(tag.clone())
            .or_insert_with(|| ResourceGroup {
                description: tags
                    .iter()
                    .find(|t| t.name == tag)
                    .and_then(|t| t.description.clone()),
                tag,
                operations: Vec::new(),
            })
            .operations
            .push(op);
    }

    map
}

/// Keeps only the groups named in `wanted` (case-insensitive). An empty filter keeps all.
///
/// # Errors
///
/// Fails when a requested tag matches no group.
pub fn filter_groups(
    groups: BTreeMap<String, ResourceGroup>,
    wanted: &[String],
) -> AppResult<BTreeMap<String, ResourceGroup>> {
    if wanted.is_empty() {
        return Ok(groups);
    }

    for w in wanted {
        if !groups.keys().any(|k| k.eq_ignore_ascii_case(w)) {
            return Err(AppError::General(format!(
                "Tag '{}' not found. Available tags: {}",
                w,
                groups.keys().cloned().collect::<Vec<_>>().join(", ")
            )));
        }
    }

    Ok(groups
        .into_iter()
        .filter(|(k, _)| wanted.iter().any(|w| k.eq_ignore_ascii_case(w)))
        .collect())
}

/// Checks that no two groups map onto the same module name.
pub fn check_module_names(groups: &BTreeMap<String, ResourceGroup>) -> AppResult<()> {
    let mut seen: BTreeMap<String, &str> = BTreeMap::new();
    for group in groups.values() {
        if let Some(previous) = seen.insert(group.module_name(), &group.tag) {
            return Err(AppError::General(format!(
                "Tags '{}' and '{}' both map to module '{}'",
                previous,
                group.tag,
                group.module_name()
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::models::HttpMethod;

    fn op(id: &str, tags: &[&str]) -> ParsedOperation {
        ParsedOperation {
            path: format!("/{}", id),
            method: HttpMethod::Get,
            operation_id: id.into(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            summary: None,
            description: None,
            params: vec![],
            request_body: None,
            deprecated: false,
        }
    }

    #[test]
    fn test_groups_by_first_tag() {
        let ops = vec![
            op("listUsers", &["User"]),
            op("listGroups", &["Group"]),
            op("getUser", &["User", "Admin"]),
            op("ping", &[]),
        ];
        let tags = vec![TagInfo {
            name: "User".into(),
            description: Some("Users in the org".into()),
        }];
        let groups = group_operations_by_tag(ops, &tags);

        let keys: Vec<&str> = groups.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Group", "User", "default"]);

        let user = &groups["User"];
        assert_eq!(user.description.as_deref(), Some("Users in the org"));
        let ids: Vec<&str> = user.operations.iter().map(|o| o.operation_id.as_str()).collect();
        assert_eq!(ids, vec!["listUsers", "getUser"]);
        assert_eq!(user.subcommand_names(), vec!["list", "get"]);
    }

    #[test]
    fn test_filter_groups_case_insensitive() {
        let groups = group_operations_by_tag(
            vec![op("listUsers", &["User"]), op("listGroups", &["Group"])],
            &[],
        );
        let filtered = filter_groups(groups, &["user".to_string()]).unwrap();
        assert_eq!(filtered.len(), 1);
        assert!(filtered.contains_key("User"));
    }

    #[test]
    fn test_filter_unknown_tag_fails() {
        let groups = group_operations_by_tag(vec![op("listUsers", &["User"])], &[]);
        let err = filter_groups(groups, &["Policy".to_string()]).err().unwrap();
        assert!(format!("{}", err).contains("Tag 'Policy' not found"));
    }

    #[test]
    fn test_module_name_collision() {
        let groups = group_operations_by_tag(
            vec![op("a", &["UserFactor"]), op("b", &["User Factor"])],
            &[],
        );
        assert!(check_module_names(&groups).is_err());
    }
}
