#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use derive_more::{Display, From};
use okta_gen_core::AppError;
use okta_sdk::SdkError;

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// IO Error wrapper.
    #[display("IO Error: {}", _0)]
    Io(std::io::Error),

    /// Generator failure.
    #[display("{}", _0)]
    Gen(AppError),

    /// API or transport failure.
    #[display("{}", _0)]
    Sdk(SdkError),

    /// Output encoding failure.
    #[display("JSON Error: {}", _0)]
    Json(serde_json::Error),

    /// Missing or invalid connection settings.
    #[from(ignore)]
    #[display("Configuration Error: {}", _0)]
    Config(String),

    /// A prompt could not be shown or was refused.
    #[from(ignore)]
    #[display("Prompt Error: {}", _0)]
    Prompt(String),

    /// General failure message.
    #[display("Operation failed: {}", _0)]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for CliError {}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;
