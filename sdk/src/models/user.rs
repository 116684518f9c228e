use super::AdditionalProperties;
use serde::{Deserialize, Serialize};
use serde_json::Value;

string_enum! {
    /// Lifecycle state of a user.
    pub enum UserStatus {
        /// Active user.
        Active => "ACTIVE",
        /// Deactivated user.
        Deprovisioned => "DEPROVISIONED",
        /// Locked after too many failed sign-ins.
        LockedOut => "LOCKED_OUT",
        /// Password expired.
        PasswordExpired => "PASSWORD_EXPIRED",
        /// Activated without credentials.
        Provisioned => "PROVISIONED",
        /// Password reset in progress.
        Recovery => "RECOVERY",
        /// Created, not yet activated.
        Staged => "STAGED",
        /// Suspended by an admin.
        Suspended => "SUSPENDED",
    }
}

/// Profile attributes of a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Unique sign-in name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
    /// Primary email.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Given name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mobile_phone: Option<String>,
    /// Custom and undeclared profile attributes.
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// A password set on create or replace.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PasswordCredential {
    /// Cleartext password; never returned by the API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Undeclared fields (`hash`, `hook`).
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Self-service recovery question.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecoveryQuestionCredential {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,
    /// Undeclared fields.
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Where the user's credentials are mastered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthenticationProvider {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// `OKTA`, `ACTIVE_DIRECTORY`, `LDAP`, `FEDERATION`, `SOCIAL` or `IMPORT`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub provider_type: Option<String>,
    /// Undeclared fields.
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Credentials of a user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserCredentials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<PasswordCredential>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_question: Option<RecoveryQuestionCredential>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider: Option<AuthenticationProvider>,
    /// Undeclared fields.
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// A user as returned by the Users API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    /// Target state of a pending transition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transitioning_to_status: Option<UserStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_changed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password_changed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<UserCredentials>,
    /// HAL links.
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Value>,
    /// HAL embedded resources.
    #[serde(rename = "_embedded", default, skip_serializing_if = "Option::is_none")]
    pub embedded: Option<Value>,
    /// Undeclared fields.
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

impl User {
    /// The user's login, if the profile carries one.
    pub fn login(&self) -> Option<&str> {
        self.profile.as_ref().and_then(|p| p.login.as_deref())
    }
}

/// Body of `POST /api/v1/users`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub profile: UserProfile,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<UserCredentials>,
    /// Groups to add the user to on creation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub group_ids: Vec<String>,
    /// Undeclared fields.
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// Body of a partial (`POST`) or full (`PUT`) user update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<UserProfile>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<UserCredentials>,
    /// Undeclared fields.
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}
