#![deny(missing_docs)]

//! # Scaffold Writer
//!
//! Renders every resource group plus the index module and writes them to disk.
//!
//! 1. Each group is rendered and parse-checked before anything is written.
//! 2. Files whose content did not change are left untouched.
//! 3. Existing files without the generated header are user-owned and are
//!    skipped unless `force` is set.

use crate::error::{AppError, AppResult};
use crate::grouping::{check_module_names, ResourceGroup};
use crate::render::{
    is_generated, render_group_module, render_module_index, verify_rust_syntax, RenderOptions,
};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// File name of the generated index module.
pub const INDEX_FILE: &str = "mod.rs";

/// Options for [`write_scaffold`].
#[derive(Debug, Clone, Default)]
pub struct ScaffoldOptions {
    /// Overwrite files that lack the generated header.
    pub force: bool,
    /// Options passed to the renderers.
    pub render: RenderOptions,
}

/// What happened to each file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldReport {
    /// Files created or rewritten.
    pub written: Vec<PathBuf>,
    /// Files whose content was already current.
    pub unchanged: Vec<PathBuf>,
    /// User-owned files left alone.
    pub skipped: Vec<PathBuf>,
}

impl ScaffoldReport {
    /// Total number of files considered.
    pub fn total(&self) -> usize {
        self.written.len() + self.unchanged.len() + self.skipped.len()
    }
}

enum WriteOutcome {
    Written,
    Unchanged,
    Skipped,
}

/// Renders `groups` into `output_dir`.
///
/// # Errors
///
/// Fails when `groups` is empty, two tags share a module name, rendered
/// code does not parse, or the filesystem refuses a read or write.
pub fn write_scaffold(
    groups: &BTreeMap<String, ResourceGroup>,
    output_dir: &Path,
    source_title: &str,
    options: &ScaffoldOptions,
) -> AppResult<ScaffoldReport> {
    if groups.is_empty() {
        return Err(AppError::General("No operations found to scaffold".into()));
    }
    check_module_names(groups)?;

    // 1. Render everything up front
    let mut files: Vec<(String, String)> = Vec::with_capacity(groups.len() + 1);
    for group in groups.values() {
        let filename = format!("{}.rs", group.module_name());
        let code = render_group_module(group, &options.render)?;
        verify_rust_syntax(&filename, &code)?;
        files.push((filename, code));
    }
    let index = render_module_index(groups, source_title, &options.render)?;
    verify_rust_syntax(INDEX_FILE, &index)?;
    files.push((INDEX_FILE.to_string(), index));

    // 2. Ensure output directory
    if !output_dir.exists() {
        fs::create_dir_all(output_dir).map_err(|e| {
            AppError::General(format!(
                "Failed to create output directory {:?}: {}",
                output_dir, e
            ))
        })?;
    }

    // 3. Write
    let mut report = ScaffoldReport::default();
    for (filename, code) in files {
        let path = output_dir.join(&filename);
        match write_if_changed(&path, &code, options.force)? {
            WriteOutcome::Written => {
                tracing::info!(file = %path.display(), "wrote generated module");
                report.written.push(path);
            }
            WriteOutcome::Unchanged => {
                tracing::debug!(file = %path.display(), "generated module unchanged");
                report.unchanged.push(path);
            }
            WriteOutcome::Skipped => {
                tracing::warn!(
                    file = %path.display(),
                    "skipping file without generated header; pass --force to overwrite"
                );
                report.skipped.push(path);
            }
        }
    }

    Ok(report)
}

fn write_if_changed(path: &Path, code: &str, force: bool) -> AppResult<WriteOutcome> {
    if path.exists() {
        let existing = fs::read_to_string(path)
            .map_err(|e| AppError::General(format!("Failed to read {:?}: {}", path, e)))?;
        if existing == code {
            return Ok(WriteOutcome::Unchanged);
        }
        if !force && !is_generated(&existing) {
            return Ok(WriteOutcome::Skipped);
        }
    }

    fs::write(path, code)
        .map_err(|e| AppError::General(format!("Failed to write file {:?}: {}", path, e)))?;
    Ok(WriteOutcome::Written)
}
