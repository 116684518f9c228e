//! # Error Handling
//!
//! Provides the unified `AppError` enum used by the generator.

use derive_more::{Display, From};

/// The generator error enum.
///
/// `String` converts to `General`; the other string variants are built explicitly.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// Reading or writing generated files failed.
    #[display("IO Error: {_0}")]
    Io(std::io::Error),

    /// The OpenAPI document could not be read or is structurally invalid.
    #[from(ignore)]
    #[display("OpenAPI Error: {_0}")]
    OpenApi(String),

    /// A template or rendered source file is malformed.
    #[from(ignore)]
    #[display("Render Error: {_0}")]
    Render(String),

    /// Anything else, e.g. an unknown `--tag`.
    #[display("General Error: {_0}")]
    General(String),
}

impl std::error::Error for AppError {}

/// Result alias for generator operations.
pub type AppResult<T> = Result<T, AppError>;
