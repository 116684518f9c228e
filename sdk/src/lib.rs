//! # Okta SDK
//!
//! Blocking client for the Okta Admin Management API.
//!
//! ```no_run
//! use okta_sdk::{ApiClient, Configuration};
//!
//! # fn main() -> okta_sdk::SdkResult<()> {
//! let config = Configuration::new("https://dev-123456.okta.com")?.with_api_token("00abc");
//! let client = ApiClient::new(config);
//! let users = client.user_api().list_users().limit(10).execute()?;
//! for user in &users.data {
//!     println!("{:?}", user.login());
//! }
//! # Ok(())
//! # }
//! ```

/// API groups and their request builders.
pub mod apis;

/// Client and request assembly.
pub mod client;

/// Org URL, credentials and timeout.
pub mod configuration;

/// Shared error types.
pub mod error;

/// `Link` header parsing.
pub mod link;

/// Data-transfer types.
pub mod models;

/// HTTP transport seam.
pub mod transport;

pub use apis::{ApplicationApi, GroupApi, UserApi};
pub use client::{ApiClient, ApiResponse, RawCall};
pub use configuration::{AuthMode, Configuration};
pub use error::{ApiError, SdkError, SdkResult};
pub use transport::{HttpResponse, HttpTransport, Method, RecordingTransport, UreqTransport};
