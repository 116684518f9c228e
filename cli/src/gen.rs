#![deny(missing_docs)]

//! # Gen Command
//!
//! Generates clap sub-command modules from an OpenAPI document.
//!
//! This command:
//! 1. Loads the OpenAPI 3.x document and flattens its operations.
//! 2. Groups operations by their first tag (or "default" if missing).
//! 3. Optionally keeps only the requested tags.
//! 4. Renders one module per tag plus `mod.rs`, checks they parse, and writes them.

use crate::error::CliResult;
use crate::iostreams::IoStreams;
use okta_gen_core::grouping::{filter_groups, group_operations_by_tag};
use okta_gen_core::oas::{parse_operations, read_openapi_file};
use okta_gen_core::render::RenderOptions;
use okta_gen_core::scaffold::{write_scaffold, ScaffoldOptions};
use std::path::PathBuf;

/// Arguments for the gen command.
#[derive(clap::Args, Debug, Clone)]
pub struct GenArgs {
    /// Path to the OpenAPI document (YAML or JSON).
    #[clap(long, default_value = "openapi/management.yaml")]
    pub openapi_path: PathBuf,

    /// Output directory for the generated modules.
    #[clap(long, default_value = "src/commands/generated")]
    pub output_dir: PathBuf,

    /// Overwrite files that were not produced by the generator.
    #[clap(long)]
    pub force: bool,

    /// Only generate these tags (repeatable, case-insensitive).
    #[clap(long = "tag")]
    pub tags: Vec<String>,

    /// Crate path the generated code imports the SDK from.
    #[clap(long, default_value = "okta_sdk")]
    pub sdk_crate: String,
}

/// Executes the generation process.
pub fn execute(args: &GenArgs, io: &mut IoStreams) -> CliResult<()> {
    io.eprintln(&format!("Generating commands from {:?}...", args.openapi_path))?;

    // 1. Parse
    let doc = read_openapi_file(&args.openapi_path)?;
    let operations = parse_operations(&doc)?;
    if operations.is_empty() {
        io.eprintln("No operations found in OpenAPI document.")?;
        return Ok(());
    }

    // 2. Group
    let groups = group_operations_by_tag(operations, &doc.tags());
    let groups = filter_groups(groups, &args.tags)?;
    tracing::info!(groups = groups.len(), "grouped operations by tag");

    // 3. Render and write
    let options = ScaffoldOptions {
        force: args.force,
        render: RenderOptions {
            sdk_crate: args.sdk_crate.clone(),
        },
    };
    let title = match doc.title() {
        "" => args.openapi_path.display().to_string(),
        title => title.to_string(),
    };
    let report = write_scaffold(&groups, &args.output_dir, &title, &options)?;

    // 4. Summary
    for group in groups.values() {
        io.eprintln(&format!(
            "  -> {}.rs ({} operations)",
            group.module_name(),
            group.operations.len()
        ))?;
    }
    for path in &report.skipped {
        io.eprintln(&format!(
            "  !! skipped {:?}: not generated by okta gen (use --force to overwrite)",
            path
        ))?;
    }
    io.println(&format!(
        "{} written, {} unchanged, {} skipped",
        report.written.len(),
        report.unchanged.len(),
        report.skipped.len()
    ))?;

    Ok(())
}
