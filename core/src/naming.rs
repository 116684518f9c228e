#![deny(missing_docs)]

//! # Naming Utilities
//!
//! Case conversions and the rules that turn operation ids and tags into
//! command names and Rust identifiers.

use crate::oas::models::ParsedOperation;
use heck::{ToKebabCase, ToSnakeCase, ToUpperCamelCase};
use std::collections::HashMap;

const RUST_KEYWORDS: &[&str] = &[
    "as", "async", "await", "break", "const", "continue", "crate", "dyn", "else", "enum", "extern",
    "false", "fn", "for", "if", "impl", "in", "let", "loop", "match", "mod", "move", "mut", "pub",
    "ref", "return", "self", "Self", "static", "struct", "super", "trait", "true", "type",
    "unsafe", "use", "where", "while", "abstract", "become", "box", "do", "final", "macro",
    "override", "priv", "typeof", "unsized", "virtual", "yield", "try", "gen",
];

/// `listAppLinks` -> `list_app_links`
pub fn to_snake_case(s: &str) -> String {
    s.to_snake_case()
}

/// `listAppLinks` -> `list-app-links`
pub fn to_kebab_case(s: &str) -> String {
    s.to_kebab_case()
}

/// `user factor` -> `UserFactor`
pub fn to_pascal_case(s: &str) -> String {
    s.to_upper_camel_case()
}

/// Derives an operation id when `operationId` is missing.
///
/// e.g. `GET /api/v1/users/{id}` -> `get_api_v1_users_id`
pub fn derive_operation_id(method: &str, path: &str) -> String {
    let clean_path = path.replace(['{', '}'], "").replace(['/', '-', '.'], "_");
    format!(
        "{}_{}",
        method.to_lowercase(),
        clean_path.trim_start_matches('_')
    )
}

/// Makes `name` usable as a Rust identifier.
///
/// Keywords get a trailing underscore, a leading digit gets a leading underscore.
pub fn sanitize_ident(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if ident.is_empty() {
        ident.push('_');
    }
    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    if RUST_KEYWORDS.contains(&ident.as_str()) {
        ident.push('_');
    }
    ident
}

/// Makes `name` usable as a Rust type or variant name.
pub fn sanitize_type_name(name: &str) -> String {
    let pascal = to_pascal_case(name);
    if pascal.is_empty() || pascal.starts_with(|c: char| c.is_ascii_digit()) {
        format!("Op{}", pascal)
    } else if pascal == "Self" {
        "SelfOp".to_string()
    } else {
        pascal
    }
}

/// Plural form of a tag used when subtracting it from an operation id.
fn pluralize(word: &str) -> String {
    if let Some(stem) = word.strip_suffix('y') {
        let before = stem.chars().last();
        if before.is_some_and(|c| !"aeiouAEIOU".contains(c)) {
            return format!("{}ies", stem);
        }
    }
    if word.ends_with('s') || word.ends_with('x') || word.ends_with("ch") || word.ends_with("sh") {
        return format!("{}es", word);
    }
    format!("{}s", word)
}

/// Removes the first case-insensitive occurrence of `needle` from `haystack`.
fn subtract_once(haystack: &str, needle: &str) -> Option<String> {
    if needle.is_empty() {
        return None;
    }
    let idx = haystack
        .to_ascii_lowercase()
        .find(&needle.to_ascii_lowercase())?;
    let mut out = String::with_capacity(haystack.len() - needle.len());
    out.push_str(&haystack[..idx]);
    out.push_str(&haystack[idx + needle.len()..]);
    Some(out)
}

/// Derives a sub-command name by subtracting the tag from the operation id.
///
/// The plural tag is tried before the singular one. Falls back to the
/// lower-cased HTTP method when nothing is left.
///
/// e.g. (`listUsers`, `User`) -> `list`, (`listAppLinks`, `User`) -> `list-app-links`
pub fn derive_subcommand_name(operation_id: &str, tag: &str, method: &str) -> String {
    let compact_tag: String = tag.chars().filter(|c| !c.is_whitespace()).collect();

    let remainder = subtract_once(operation_id, &pluralize(&compact_tag))
        .or_else(|| subtract_once(operation_id, &compact_tag))
        .unwrap_or_else(|| operation_id.to_string());

    let name = to_kebab_case(&remainder);
    if name.is_empty() {
        method.to_lowercase()
    } else {
        name
    }
}

/// Assigns unique sub-command names to the operations of one tag group.
///
/// A collision is resolved by appending the last literal path segment, and
/// if that still collides, a numeric suffix.
pub fn assign_subcommand_names(operations: &[ParsedOperation], tag: &str) -> Vec<String> {
    let base: Vec<String> = operations
        .iter()
        .map(|op| derive_subcommand_name(&op.operation_id, tag, op.method.as_str()))
        .collect();

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for name in &base {
        *counts.entry(name.as_str()).or_default() += 1;
    }

    let mut taken: Vec<String> = Vec::with_capacity(base.len());
    for (op, name) in operations.iter().zip(&base) {
        let mut candidate = name.clone();
        if counts.get(name.as_str()).copied().unwrap_or_default() > 1 {
            if let Some(segment) = last_literal_segment(&op.path) {
                let suffix = to_kebab_case(segment);
                if !candidate.ends_with(&suffix) {
                    candidate = format!("{}-{}", candidate, suffix);
                }
            }
        }
        let mut unique = candidate.clone();
        let mut n = 2;
        while taken.contains(&unique) {
            unique = format!("{}-{}", candidate, n);
            n += 1;
        }
        taken.push(unique);
    }
    taken
}

fn last_literal_segment(path: &str) -> Option<&str> {
    path.split('/')
        .rev()
        .find(|s| !s.is_empty() && !s.starts_with('{'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::models::HttpMethod;

    fn op(id: &str, path: &str) -> ParsedOperation {
        ParsedOperation {
            path: path.into(),
            method: HttpMethod::Get,
            operation_id: id.into(),
            tags: vec![],
            summary: None,
            description: None,
            params: vec![],
            request_body: None,
            deprecated: false,
        }
    }

    #[test]
    fn test_case_conversions() {
        assert_eq!(to_snake_case("userId"), "user_id");
        assert_eq!(to_kebab_case("listAppLinks"), "list-app-links");
        assert_eq!(to_pascal_case("user factor"), "UserFactor");
    }

    #[test]
    fn test_derive_operation_id() {
        assert_eq!(
            derive_operation_id("GET", "/api/v1/users/{id}"),
            "get_api_v1_users_id"
        );
    }

    #[test]
    fn test_subcommand_subtraction() {
        assert_eq!(derive_subcommand_name("listUsers", "User", "GET"), "list");
        assert_eq!(derive_subcommand_name("getUser", "User", "GET"), "get");
        assert_eq!(
            derive_subcommand_name("listAppLinks", "User", "GET"),
            "list-app-links"
        );
        assert_eq!(
            derive_subcommand_name("deactivateOrDeleteUser", "User", "DELETE"),
            "deactivate-or-delete"
        );
        assert_eq!(
            derive_subcommand_name("listPolicies", "Policy", "GET"),
            "list"
        );
        assert_eq!(
            derive_subcommand_name("listFactors", "User Factor", "GET"),
            "list-factors"
        );
    }

    #[test]
    fn test_subcommand_falls_back_to_method() {
        assert_eq!(derive_subcommand_name("User", "User", "GET"), "get");
    }

    #[test]
    fn test_collisions_use_path_then_counter() {
        let ops = vec![
            op("listUsers", "/api/v1/users"),
            op("listUser", "/api/v1/groups/{groupId}/members"),
            op("userList", "/api/v1/users"),
        ];
        let names = assign_subcommand_names(&ops, "User");
        assert_eq!(names, vec!["list-users", "list-members", "list-users-2"]);
    }

    #[test]
    fn test_sanitize_ident() {
        assert_eq!(sanitize_ident("type"), "type_");
        assert_eq!(sanitize_ident("2fa"), "_2fa");
        assert_eq!(sanitize_ident("user_id"), "user_id");
        assert_eq!(sanitize_type_name("self"), "SelfOp");
        assert_eq!(sanitize_type_name("2fa"), "Op2fa");
    }
}
