//! Syntax verification of rendered source using the rust-analyzer parser.

use crate::error::{AppError, AppResult};
use ra_ap_edition::Edition;
use ra_ap_syntax::SourceFile;

/// Parses `code` and fails with the first few syntax errors and their line numbers.
pub fn verify_rust_syntax(file_label: &str, code: &str) -> AppResult<()> {
    let parse = SourceFile::parse(code, Edition::Edition2021);
    let errors = parse.errors();
    if errors.is_empty() {
        return Ok(());
    }

    let details: Vec<String> = errors
        .iter()
        .take(5)
        .map(|e| {
            let offset = usize::from(e.range().start()).min(code.len());
            let line = code[..offset].matches('\n').count() + 1;
            format!("line {}: {}", line, e)
        })
        .collect();

    Err(AppError::Render(format!(
        "Generated code for {} is not valid Rust ({} errors): {}",
        file_label,
        errors.len(),
        details.join("; ")
    )))
}
