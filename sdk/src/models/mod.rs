//! # Models
//!
//! Data-transfer types for the Admin Management API.
//!
//! Every struct keeps fields it does not declare in `additional_properties`,
//! and every enum keeps unrecognised values in `Unknown`, so a value read
//! from the API serializes back without loss.

/// Declares a string enum that round-trips unknown wire values.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $wire:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
            /// A value this client does not know.
            Unknown(String),
        }

        impl $name {
            /// Wire representation.
            pub fn as_str(&self) -> &str {
                match self {
                    $( $name::$variant => $wire, )+
                    $name::Unknown(other) => other.as_str(),
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $( $wire => $name::$variant, )+
                    _ => $name::Unknown(value),
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::Unknown(other) => other,
                    known => known.as_str().to_string(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

mod application;
mod error;
mod group;
mod user;

pub use application::{Application, ApplicationLifecycleStatus, ApplicationSignOnMode};
pub use error::{ErrorCause, ModelError};
pub use group::{Group, GroupProfile, GroupType};
pub use user::{
    AuthenticationProvider, CreateUserRequest, PasswordCredential, RecoveryQuestionCredential,
    UpdateUserRequest, User, UserCredentials, UserProfile, UserStatus,
};

/// Open map of fields a model does not declare.
pub type AdditionalProperties = std::collections::BTreeMap<String, serde_json::Value>;
