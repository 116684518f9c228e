//! # API Groups
//!
//! One service per resource. Each operation returns a request builder with
//! chained setters for its optional parameters and an `execute` method.

mod application_api;
mod group_api;
mod user_api;

pub use application_api::*;
pub use group_api::*;
pub use user_api::*;

/// Error statuses of reads on a single resource.
pub(crate) const READ_ERRORS: &[u16] = &[403, 404, 429];
/// Error statuses of list operations.
pub(crate) const LIST_ERRORS: &[u16] = &[403, 429];
/// Error statuses of operations that take a body.
pub(crate) const WRITE_ERRORS: &[u16] = &[400, 403, 404, 429];
