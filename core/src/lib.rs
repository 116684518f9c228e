#![deny(missing_docs)]

//! # Okta Gen Core
//!
//! Turns an OpenAPI 3.x description into clap sub-command modules that call
//! the Okta SDK's raw request API.

/// Shared error types.
pub mod error;

/// OpenAPI (OAS) parsing utilities.
pub mod oas;

/// Case conversion and command naming rules.
pub mod naming;

/// Grouping of operations by tag.
pub mod grouping;

/// Placeholder templates and doc comment helpers.
pub mod template;

/// Rendering of command modules.
pub mod render;

/// Writing rendered modules to disk.
pub mod scaffold;

pub use error::{AppError, AppResult};
pub use grouping::{filter_groups, group_operations_by_tag, ResourceGroup, DEFAULT_TAG};
pub use oas::{load_openapi_document, parse_operations, read_openapi_file, ParsedOperation};
pub use render::{render_group_module, render_module_index, RenderOptions, GENERATED_HEADER};
pub use scaffold::{write_scaffold, ScaffoldOptions, ScaffoldReport};
