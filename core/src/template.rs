#![deny(missing_docs)]

//! # Template Helpers
//!
//! Minimal `{{placeholder}}` substitution plus the text helpers the renderers share.

use crate::error::{AppError, AppResult};
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

fn placeholder_re() -> &'static Regex {
    static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER_RE.get_or_init(|| {
        Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").expect("Invalid regex constant")
    })
}

/// Replaces every `{{key}}` in `template` with its value.
///
/// Substituted values are not scanned again, so they may contain braces.
///
/// # Errors
///
/// Fails when the template names a key that `values` does not provide.
pub fn render_template(template: &str, values: &BTreeMap<&str, String>) -> AppResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut last = 0;

    for caps in placeholder_re().captures_iter(template) {
        let whole = caps.get(0).ok_or_else(|| {
            AppError::Render("Internal template error: empty capture".into())
        })?;
        let key = &caps[1];
        let value = values.get(key).ok_or_else(|| {
            AppError::Render(format!("Template placeholder '{{{{{}}}}}' has no value", key))
        })?;

        out.push_str(&template[last..whole.start()]);
        out.push_str(value);
        last = whole.end();
    }
    out.push_str(&template[last..]);
    Ok(out)
}

/// Prefixes every non-empty line with `spaces` spaces.
pub fn indent(text: &str, spaces: usize) -> String {
    let pad = " ".repeat(spaces);
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        if !line.trim().is_empty() {
            out.push_str(&pad);
            out.push_str(line);
        }
        out.push('\n');
    }
    out
}

/// Renders text as `///` doc lines at the given indentation.
///
/// Blank leading and trailing lines are dropped; `\r` is removed.
pub fn doc_comment(text: &str, indent: usize) -> String {
    doc_lines(text, indent, "///")
}

/// Renders text as `//!` inner doc lines.
pub fn inner_doc_comment(text: &str) -> String {
    doc_lines(text, 0, "//!")
}

fn doc_lines(text: &str, indent: usize, marker: &str) -> String {
    let pad = " ".repeat(indent);
    let cleaned = text.replace('\r', "");
    let lines: Vec<&str> = cleaned.lines().map(str::trim_end).collect();
    let start = lines.iter().position(|l| !l.trim().is_empty());
    let end = lines.iter().rposition(|l| !l.trim().is_empty());

    let (Some(start), Some(end)) = (start, end) else {
        return String::new();
    };

    let mut out = String::new();
    for line in &lines[start..=end] {
        if line.is_empty() {
            out.push_str(&format!("{}{}\n", pad, marker));
        } else {
            out.push_str(&format!("{}{} {}\n", pad, marker, line));
        }
    }
    out
}

/// Escapes a value for use inside a Rust string literal.
pub fn rust_string_literal(value: &str) -> String {
    format!("{:?}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_template() {
        let mut values = BTreeMap::new();
        values.insert("name", "UserCommand".to_string());
        values.insert("body", "{ {{not_a_key}} }".to_string());

        let out = render_template("enum {{name}} {{ body }}", &values).unwrap();
        assert_eq!(out, "enum UserCommand { {{not_a_key}} }");
    }

    #[test]
    fn test_render_template_missing_key() {
        let err = render_template("{{missing}}", &BTreeMap::new()).err().unwrap();
        assert!(format!("{}", err).contains("'{{missing}}'"));
    }

    #[test]
    fn test_indent_skips_blank_lines() {
        assert_eq!(indent("a\n\nb", 4), "    a\n\n    b\n");
    }

    #[test]
    fn test_doc_comment_trims_and_keeps_paragraphs() {
        let text = "\r\nList all users.\r\n\r\nSupports paging.  \n\n";
        assert_eq!(
            doc_comment(text, 4),
            "    /// List all users.\n    ///\n    /// Supports paging.\n"
        );
        assert_eq!(doc_comment("   \n", 0), "");
    }

    #[test]
    fn test_rust_string_literal_escapes() {
        assert_eq!(rust_string_literal("a\"b\\c"), r#""a\"b\\c""#);
    }
}
