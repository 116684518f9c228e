use super::AdditionalProperties;
use serde::{Deserialize, Serialize};
use serde_json::Value;

string_enum! {
    /// Authentication mode of an app.
    pub enum ApplicationSignOnMode {
        AutoLogin => "AUTO_LOGIN",
        BasicAuth => "BASIC_AUTH",
        Bookmark => "BOOKMARK",
        BrowserPlugin => "BROWSER_PLUGIN",
        OpenidConnect => "OPENID_CONNECT",
        Saml11 => "SAML_1_1",
        Saml20 => "SAML_2_0",
        SecurePasswordStore => "SECURE_PASSWORD_STORE",
        WsFederation => "WS_FEDERATION",
    }
}

string_enum! {
    /// Lifecycle state of an app.
    pub enum ApplicationLifecycleStatus {
        Active => "ACTIVE",
        Inactive => "INACTIVE",
        Deleted => "DELETED",
    }
}

/// An app integration.
///
/// Settings and credentials differ per sign-on mode and are kept as raw JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Catalog key, e.g. `oidc_client`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ApplicationLifecycleStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sign_on_mode: Option<ApplicationSignOnMode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials: Option<Value>,
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

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_application_decode() {
        let app: Application = serde_json::from_value(json!({
            "id": "0oa1gjh63g214q0Hq0g4",
            "name": "oidc_client",
            "label": "Portal",
            "status": "ACTIVE",
            "signOnMode": "OPENID_CONNECT",
            "visibility": {"autoSubmitToolbar": false}
        }))
        .unwrap();
        assert_eq!(app.sign_on_mode, Some(ApplicationSignOnMode::OpenidConnect));
        assert_eq!(app.status, Some(ApplicationLifecycleStatus::Active));
        assert!(app.additional_properties.contains_key("visibility"));
    }

    #[test]
    fn test_unknown_sign_on_mode() {
        let mode: ApplicationSignOnMode = serde_json::from_value(json!("SAML_3_0")).unwrap();
        assert_eq!(mode.as_str(), "SAML_3_0");
    }
}
