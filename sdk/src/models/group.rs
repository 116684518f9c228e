use super::AdditionalProperties;
use serde::{Deserialize, Serialize};
use serde_json::Value;

string_enum! {
    /// How a group is mastered.
    pub enum GroupType {
        /// Created in Okta.
        OktaGroup => "OKTA_GROUP",
        /// Imported from an app.
        AppGroup => "APP_GROUP",
        /// The built-in `Everyone` group.
        BuiltIn => "BUILT_IN",
    }
}

/// Profile of a group.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Custom and undeclared profile attributes.
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// A group as returned by the Groups API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_membership_updated: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub object_class: Vec<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub group_type: Option<GroupType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<GroupProfile>,
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

impl Group {
    /// A new group body with just a name and optional description.
    pub fn named(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            profile: Some(GroupProfile {
                name: Some(name.into()),
                description,
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}
