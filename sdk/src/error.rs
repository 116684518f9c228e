//! # Error Handling
//!
//! Provides the `SdkError` enum returned by every client call.

use crate::models::ModelError;
use derive_more::{Display, From};
use std::fmt;

/// A non-success HTTP response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: String,
    /// Decoded error body, present when the status is one the operation declares.
    pub model: Option<ModelError>,
}

impl ApiError {
    /// Okta's `errorCode`, when the body was decoded.
    pub fn error_code(&self) -> Option<&str> {
        self.model.as_ref().and_then(|m| m.error_code.as_deref())
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.model.as_ref().and_then(|m| m.error_summary.as_deref()) {
            Some(summary) => {
                write!(f, "Okta API error {}: {}", self.status, summary)?;
                if let Some(code) = self.error_code() {
                    write!(f, " ({})", code)?;
                }
                Ok(())
            }
            None if self.body.trim().is_empty() => write!(f, "Okta API error {}", self.status),
            None => write!(f, "Okta API error {}: {}", self.status, self.body.trim()),
        }
    }
}

/// The SDK error enum.
#[derive(Debug, Display, From)]
pub enum SdkError {
    /// Invalid client configuration (URL, token, headers).
    #[from(ignore)]
    #[display("Configuration Error: {_0}")]
    Config(String),

    /// The request could not be built (missing path parameter, bad JSON body).
    #[from(ignore)]
    #[display("Request Error: {_0}")]
    Request(String),

    /// The request never produced an HTTP response.
    #[from(ignore)]
    #[display("Transport Error: {_0}")]
    Transport(String),

    /// A body could not be encoded or decoded.
    #[display("JSON Error: {_0}")]
    Json(serde_json::Error),

    /// The server answered with a non-success status.
    #[display("{_0}")]
    Api(ApiError),
}

impl std::error::Error for SdkError {}

/// Helper type alias for Result using SdkError.
pub type SdkResult<T> = Result<T, SdkError>;

impl SdkError {
    /// HTTP status when the error came from the server.
    pub fn status(&self) -> Option<u16> {
        match self {
            SdkError::Api(e) => Some(e.status),
            _ => None,
        }
    }
}
