use super::AdditionalProperties;
use serde::{Deserialize, Serialize};

/// Error body Okta returns with 4xx and 5xx responses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelError {
    /// Okta error code, e.g. `E0000007`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
    /// Human readable summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_summary: Option<String>,
    /// Link to the error code documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_link: Option<String>,
    /// Request id to quote to Okta support.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_id: Option<String>,
    /// Per-field details.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub error_causes: Vec<ErrorCause>,
    /// Undeclared fields.
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

/// One entry of `errorCauses`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorCause {
    /// Summary of the cause.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_summary: Option<String>,
    /// Undeclared fields.
    #[serde(flatten)]
    pub additional_properties: AdditionalProperties,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_error_body() {
        let body = json!({
            "errorCode": "E0000001",
            "errorSummary": "Api validation failed: login",
            "errorLink": "E0000001",
            "errorId": "oaeHfmOAx1iRLa0H10DeMz5fQ",
            "errorCauses": [{"errorSummary": "login: An object with this field already exists"}]
        });
        let err: ModelError = serde_json::from_value(body).unwrap();
        assert_eq!(err.error_code.as_deref(), Some("E0000001"));
        assert_eq!(err.error_causes.len(), 1);
        assert!(err.additional_properties.is_empty());
    }
}
