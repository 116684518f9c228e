//! # API Client
//!
//! Request assembly, the status switch and response decoding shared by every
//! API group and by generated commands.
//!
//! 1. A [`RawCall`] names the method, path template, parameters and body.
//! 2. [`ApiClient`] expands it into an [`HttpRequest`] against the org URL.
//! 3. The transport sends it; the status decides between decoding the body,
//!    decoding a `ModelError`, or returning the raw body in an [`ApiError`].

use crate::apis::{ApplicationApi, GroupApi, UserApi};
use crate::configuration::Configuration;
use crate::error::{ApiError, SdkError, SdkResult};
use crate::link::next_link;
use crate::models::ModelError;
use crate::transport::{find_header, HttpRequest, HttpResponse, HttpTransport, Method, UreqTransport};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use url::Url;

/// Characters left as-is in a path segment (RFC 3986 unreserved).
const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Description of one API call, before it is bound to an org.
#[derive(Debug, Clone, PartialEq)]
pub struct RawCall {
    method: Method,
    path: String,
    path_params: Vec<(String, String)>,
    query: Vec<(String, String)>,
    headers: Vec<(String, String)>,
    body: Option<String>,
    error_statuses: Vec<u16>,
    decode_any_error: bool,
}

impl RawCall {
    /// A call to `path`, a template such as `/api/v1/users/{userId}`.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            path_params: Vec::new(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            error_statuses: Vec::new(),
            decode_any_error: false,
        }
    }

    /// Binds `{name}` in the path template.
    pub fn path_param<V: ToString + ?Sized>(mut self, name: &str, value: &V) -> Self {
        self.path_params.push((name.to_string(), value.to_string()));
        self
    }

    /// Appends a query pair when `value` is present.
    pub fn query<V: ToString + ?Sized>(mut self, name: &str, value: Option<&V>) -> Self {
        if let Some(value) = value {
            self.query.push((name.to_string(), value.to_string()));
        }
        self
    }

    /// Appends a comma-joined query pair when `values` is not empty.
    pub fn query_all<V: ToString>(mut self, name: &str, values: &[V]) -> Self {
        if !values.is_empty() {
            self.query.push((name.to_string(), join(values)));
        }
        self
    }

    /// Adds a header when `value` is present.
    pub fn header<V: ToString + ?Sized>(mut self, name: &str, value: Option<&V>) -> Self {
        if let Some(value) = value {
            self.headers.push((name.to_string(), value.to_string()));
        }
        self
    }

    /// Adds a comma-joined header when `values` is not empty.
    pub fn header_all<V: ToString>(mut self, name: &str, values: &[V]) -> Self {
        if !values.is_empty() {
            self.headers.push((name.to_string(), join(values)));
        }
        self
    }

    /// Sets a JSON body given as text. The text must parse as JSON.
    pub fn json_body(mut self, raw: &str) -> SdkResult<Self> {
        serde_json::from_str::<Value>(raw)
            .map_err(|e| SdkError::Request(format!("Request body is not valid JSON: {}", e)))?;
        self.body = Some(raw.to_string());
        Ok(self)
    }

    /// Like [`RawCall::json_body`], skipping `None`.
    pub fn json_body_opt(self, raw: Option<&str>) -> SdkResult<Self> {
        match raw {
            Some(raw) => self.json_body(raw),
            None => Ok(self),
        }
    }

    /// Serializes `body` as the JSON body.
    pub fn body<T: Serialize + ?Sized>(mut self, body: &T) -> SdkResult<Self> {
        self.body = Some(serde_json::to_string(body)?);
        Ok(self)
    }

    /// Statuses whose body is decoded as a [`ModelError`].
    pub fn errors(mut self, statuses: &[u16]) -> Self {
        self.error_statuses = statuses.to_vec();
        self
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    fn decodes_error(&self, status: u16) -> bool {
        self.error_statuses.contains(&status) || (self.decode_any_error && status >= 400)
    }
}

fn join<V: ToString>(values: &[V]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// A decoded response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse<T> {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub data: T,
    request_url: Url,
}

impl<T> ApiResponse<T> {
    /// First header named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// The `rel="next"` target of the `Link` headers.
    pub fn next_page_url(&self) -> Option<Url> {
        let links = self
            .headers
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case("link"))
            .map(|(_, v)| v.as_str());
        next_link(links, &self.request_url)
    }

    /// The `after` cursor of the next page, to pass back as `after(..)`.
    pub fn next_cursor(&self) -> Option<String> {
        self.next_page_url().and_then(|url| {
            url.query_pairs()
                .find(|(k, _)| k == "after")
                .map(|(_, v)| v.into_owned())
        })
    }

    /// Replaces the payload, keeping status and headers.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            status: self.status,
            headers: self.headers,
            data: f(self.data),
            request_url: self.request_url,
        }
    }
}

/// Client for one Okta org.
#[derive(Clone)]
pub struct ApiClient {
    config: Configuration,
    transport: Arc<dyn HttpTransport>,
}

impl ApiClient {
    /// A client sending over `ureq` with the configured timeout.
    pub fn new(config: Configuration) -> Self {
        let transport = UreqTransport::new(config.timeout);
        Self::with_transport(config, Arc::new(transport))
    }

    /// A client over a caller-supplied transport.
    pub fn with_transport(config: Configuration, transport: Arc<dyn HttpTransport>) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Users API.
    pub fn user_api(&self) -> UserApi<'_> {
        UserApi::new(self)
    }

    /// Groups API.
    pub fn group_api(&self) -> GroupApi<'_> {
        GroupApi::new(self)
    }

    /// Applications API.
    pub fn application_api(&self) -> ApplicationApi<'_> {
        ApplicationApi::new(self)
    }

    /// Binds `call` to the org and adds the standard headers.
    pub fn build_request(&self, call: &RawCall) -> SdkResult<HttpRequest> {
        // 1. Path
        let path = expand_path(&call.path, &call.path_params)?;
        let mut url = Url::parse(&format!("{}{}", self.config.base_url(), path))
            .map_err(|e| SdkError::Request(format!("Invalid request URL for {}: {}", path, e)))?;

        // 2. Query
        if !call.query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (name, value) in &call.query {
                pairs.append_pair(name, value);
            }
        }

        // 3. Headers
        let mut headers: Vec<(String, String)> = Vec::new();
        set_header(&mut headers, "Accept", "application/json");
        if call.body.is_some() {
            set_header(&mut headers, "Content-Type", "application/json");
        }
        set_header(&mut headers, "User-Agent", &self.config.user_agent);
        if let Some(auth) = self.config.auth.header_value() {
            set_header(&mut headers, "Authorization", &auth);
        }
        for (name, value) in &self.config.default_headers {
            set_header(&mut headers, name, value);
        }
        for (name, value) in &call.headers {
            set_header(&mut headers, name, value);
        }

        Ok(HttpRequest {
            method: call.method,
            url,
            headers,
            body: call.body.clone(),
        })
    }

    fn send(&self, call: &RawCall) -> SdkResult<(HttpResponse, Url)> {
        let request = self.build_request(call)?;
        tracing::debug!(method = %request.method, url = %request.url, "sending request");

        let response = self.transport.send(&request)?;
        tracing::debug!(
            method = %request.method,
            url = %request.url,
            status = response.status,
            "received response"
        );

        if response.is_success() {
            return Ok((response, request.url));
        }

        let model = if call.decodes_error(response.status) {
            serde_json::from_str::<ModelError>(&response.body).ok()
        } else {
            None
        };
        Err(SdkError::Api(ApiError {
            status: response.status,
            body: response.body,
            model,
        }))
    }

    /// Sends `call` and decodes a 2xx body as `T`. An empty body decodes as `null`.
    pub fn execute<T: DeserializeOwned>(&self, call: RawCall) -> SdkResult<ApiResponse<T>> {
        let (response, request_url) = self.send(&call)?;
        let text = if response.body.trim().is_empty() {
            "null"
        } else {
            response.body.as_str()
        };
        let data = serde_json::from_str(text)?;
        Ok(ApiResponse {
            status: response.status,
            headers: response.headers,
            data,
            request_url,
        })
    }

    /// Sends `call` and ignores any 2xx body.
    pub fn execute_empty(&self, call: RawCall) -> SdkResult<ApiResponse<()>> {
        let (response, request_url) = self.send(&call)?;
        Ok(ApiResponse {
            status: response.status,
            headers: response.headers,
            data: (),
            request_url,
        })
    }

    /// Sends a call built by generated commands and returns the body.
    ///
    /// A 2xx body that is not JSON (SAML metadata, PEM downloads) comes back
    /// as a JSON string. Any 4xx or 5xx body is decoded as a [`ModelError`]
    /// when it parses.
    pub fn call_raw(&self, mut call: RawCall) -> SdkResult<Value> {
        call.decode_any_error = true;
        let (response, _) = self.send(&call)?;
        let body = response.body.trim();
        if body.is_empty() {
            return Ok(Value::Null);
        }
        match serde_json::from_str(body) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::debug!(
                    status = response.status,
                    content_type = response.header("Content-Type").unwrap_or_default(),
                    error = %e,
                    "returning non-JSON body as text"
                );
                Ok(Value::String(response.body))
            }
        }
    }
}

fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
        Some(slot) => slot.1 = value.to_string(),
        None => headers.push((name.to_string(), value.to_string())),
    }
}

/// Substitutes `{name}` segments with percent-encoded values.
fn expand_path(template: &str, params: &[(String, String)]) -> SdkResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let Some(len) = rest[open..].find('}') else {
            return Err(SdkError::Request(format!(
                "Unterminated path parameter in '{}'",
                template
            )));
        };
        let name = &rest[open + 1..open + len];
        let value = params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v)
            .ok_or_else(|| {
                SdkError::Request(format!(
                    "Missing path parameter '{}' for '{}'",
                    name, template
                ))
            })?;
        if value.is_empty() {
            return Err(SdkError::Request(format!(
                "Path parameter '{}' must not be empty",
                name
            )));
        }

        out.push_str(&rest[..open]);
        out.extend(utf8_percent_encode(value, PATH_SEGMENT));
        rest = &rest[open + len + 1..];
    }
    out.push_str(rest);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::RecordingTransport;
    use pretty_assertions::assert_eq;

    fn client(transport: Arc<RecordingTransport>) -> ApiClient {
        let config = Configuration::new("https://dev-1.okta.com/")
            .unwrap()
            .with_api_token("tok")
            .with_default_header("X-Trace", "t1");
        ApiClient::with_transport(config, transport)
    }

    #[test]
    fn test_expand_path_encodes_values() {
        let params = vec![("userId".to_string(), "a b/c@d".to_string())];
        assert_eq!(
            expand_path("/api/v1/users/{userId}/groups", &params).unwrap(),
            "/api/v1/users/a%20b%2Fc%40d/groups"
        );
        let err = expand_path("/api/v1/users/{userId}", &[]).err().unwrap();
        assert!(err.to_string().contains("Missing path parameter 'userId'"));
    }

    #[test]
    fn test_build_request() {
        let client = client(Arc::new(RecordingTransport::new()));
        let call = RawCall::new(Method::Post, "/api/v1/users")
            .query("activate", Some(&false))
            .query::<String>("provider", None)
            .query_all("expand", &["a", "b"])
            .header("X-Trace", Some("t2"))
            .json_body(r#"{"profile":{}}"#)
            .unwrap();

        let request = client.build_request(&call).unwrap();
        assert_eq!(
            request.url.as_str(),
            "https://dev-1.okta.com/api/v1/users?activate=false&expand=a%2Cb"
        );
        assert_eq!(request.header("authorization"), Some("SSWS tok"));
        assert_eq!(request.header("content-type"), Some("application/json"));
        assert_eq!(request.header("accept"), Some("application/json"));
        assert_eq!(request.header("x-trace"), Some("t2"));
        assert_eq!(request.body.as_deref(), Some(r#"{"profile":{}}"#));
    }

    #[test]
    fn test_json_body_rejects_invalid_json() {
        let err = RawCall::new(Method::Post, "/x").json_body("{nope").err().unwrap();
        assert!(matches!(err, SdkError::Request(_)));
    }

    #[test]
    fn test_declared_error_status_decodes_model() {
        let transport = Arc::new(RecordingTransport::new());
        transport.push_response(HttpResponse::new(
            404,
            r#"{"errorCode":"E0000007","errorSummary":"Not found"}"#,
        ));
        let call = RawCall::new(Method::Get, "/api/v1/users/{userId}")
            .path_param("userId", "x")
            .errors(&[403, 404, 429]);

        let err = client(transport).execute::<Value>(call).err().unwrap();
        match err {
            SdkError::Api(api) => {
                assert_eq!(api.status, 404);
                assert_eq!(api.error_code(), Some("E0000007"));
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_undeclared_error_status_keeps_raw_body() {
        let transport = Arc::new(RecordingTransport::new());
        transport.push_response(HttpResponse::new(500, r#"{"errorCode":"E0000009"}"#));
        let call = RawCall::new(Method::Get, "/api/v1/users").errors(&[403]);

        match client(transport).execute::<Value>(call).err().unwrap() {
            SdkError::Api(api) => {
                assert!(api.model.is_none());
                assert_eq!(api.body, r#"{"errorCode":"E0000009"}"#);
            }
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_call_raw_decodes_any_error_and_empty_body() {
        let transport = Arc::new(RecordingTransport::new());
        transport.push_response(HttpResponse::new(204, ""));
        transport.push_response(HttpResponse::new(400, r#"{"errorSummary":"bad"}"#));
        let client = client(transport);

        let value = client
            .call_raw(RawCall::new(Method::Delete, "/api/v1/groups/{groupId}").path_param("groupId", "g1"))
            .unwrap();
        assert_eq!(value, Value::Null);

        let err = client.call_raw(RawCall::new(Method::Get, "/api/v1/groups")).err().unwrap();
        assert_eq!(err.to_string(), "Okta API error 400: bad");
    }

    #[test]
    fn test_call_raw_returns_xml_body_as_text() {
        let transport = Arc::new(RecordingTransport::new());
        let metadata = r#"<?xml version="1.0"?><md:EntityDescriptor/>"#;
        transport.push_response(
            HttpResponse::new(200, metadata).with_header("Content-Type", "application/xml"),
        );

        let value = client(transport)
            .call_raw(
                RawCall::new(Method::Get, "/api/v1/apps/{appId}/sso/saml/metadata")
                    .path_param("appId", "0oa1"),
            )
            .unwrap();
        assert_eq!(value, Value::String(metadata.to_string()));
    }

    #[test]
    fn test_pagination_cursor() {
        let transport = Arc::new(RecordingTransport::new());
        transport.push_response(
            HttpResponse::new(200, "[]")
                .with_header("link", r#"<https://dev-1.okta.com/api/v1/users?limit=1>; rel="self""#)
                .with_header(
                    "link",
                    r#"<https://dev-1.okta.com/api/v1/users?after=00u5&limit=1>; rel="next""#,
                ),
        );
        let response = client(transport)
            .execute::<Vec<Value>>(RawCall::new(Method::Get, "/api/v1/users").query("limit", Some(&1)))
            .unwrap();
        assert_eq!(response.next_cursor().as_deref(), Some("00u5"));
    }
}
