//! # Transport
//!
//! The seam between request assembly and the network. [`UreqTransport`]
//! talks HTTP; [`RecordingTransport`] replays queued responses and records
//! requests, for tests and offline runs.

use crate::error::{SdkError, SdkResult};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Mutex;
use std::time::Duration;
use ureq::typestate::{WithBody, WithoutBody};
use ureq::RequestBuilder;
use url::Url;

/// HTTP methods the API uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Head,
    Options,
    Trace,
}

impl Method {
    /// Upper-case method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
            Method::Head => "HEAD",
            Method::Options => "OPTIONS",
            Method::Trace => "TRACE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully assembled request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    /// Header pairs in send order.
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// First header named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }
}

/// A response as the client sees it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HttpResponse {
    pub status: u16,
    /// Header pairs. Repeated headers (`Link`) appear once per value.
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// First header named `name` (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        find_header(&self.headers, name)
    }

    /// True for 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub(crate) fn find_header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

/// Sends one request and returns the response, whatever its status.
pub trait HttpTransport: Send + Sync {
    /// Performs the request. Only failures to get a response are errors.
    fn send(&self, request: &HttpRequest) -> SdkResult<HttpResponse>;
}

/// Blocking transport over a `ureq` agent.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Builds an agent with an optional whole-request timeout.
    pub fn new(timeout: Option<Duration>) -> Self {
        let config = ureq::Agent::config_builder()
            .timeout_global(timeout)
            .http_status_as_error(false)
            .build();
        Self {
            agent: ureq::Agent::new_with_config(config),
        }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send_with_body(
    builder: RequestBuilder<WithBody>,
    body: Option<&str>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(body) => builder.send(body),
        None => builder.send_empty(),
    }
}

fn send_without_body(
    builder: RequestBuilder<WithoutBody>,
    body: Option<&str>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(body) => builder.force_send_body().send(body),
        None => builder.call(),
    }
}

impl HttpTransport for UreqTransport {
    fn send(&self, request: &HttpRequest) -> SdkResult<HttpResponse> {
        let url = request.url.as_str();
        let headers = &request.headers;
        let body = request.body.as_deref();

        let result = match request.method {
            Method::Get => send_without_body(with_headers(self.agent.get(url), headers), body),
            Method::Delete => send_without_body(with_headers(self.agent.delete(url), headers), body),
            Method::Head => send_without_body(with_headers(self.agent.head(url), headers), body),
            Method::Options => {
                send_without_body(with_headers(self.agent.options(url), headers), body)
            }
            Method::Trace => send_without_body(with_headers(self.agent.trace(url), headers), body),
            Method::Post => send_with_body(with_headers(self.agent.post(url), headers), body),
            Method::Put => send_with_body(with_headers(self.agent.put(url), headers), body),
            Method::Patch => send_with_body(with_headers(self.agent.patch(url), headers), body),
        };

        let mut response = result.map_err(|e| {
            SdkError::Transport(format!("{} {} failed: {}", request.method, url, e))
        })?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response.body_mut().read_to_string().map_err(|e| {
            SdkError::Transport(format!("Failed to read response body from {}: {}", url, e))
        })?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Replays queued responses in order and records every request.
#[derive(Default)]
pub struct RecordingTransport {
    requests: Mutex<Vec<HttpRequest>>,
    responses: Mutex<VecDeque<HttpResponse>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response for the next request.
    pub fn push_response(&self, response: HttpResponse) {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(response);
        }
    }

    /// Requests seen so far.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .map(|r| r.clone())
            .unwrap_or_default()
    }
}

impl HttpTransport for RecordingTransport {
    fn send(&self, request: &HttpRequest) -> SdkResult<HttpResponse> {
        self.requests
            .lock()
            .map_err(|_| SdkError::Transport("request log poisoned".into()))?
            .push(request.clone());

        self.responses
            .lock()
            .map_err(|_| SdkError::Transport("response queue poisoned".into()))?
            .pop_front()
            .ok_or_else(|| {
                SdkError::Transport(format!(
                    "No response queued for {} {}",
                    request.method, request.url
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> HttpRequest {
        HttpRequest {
            method: Method::Get,
            url: Url::parse("https://a.okta.com/api/v1/users").unwrap(),
            headers: vec![("Accept".into(), "application/json".into())],
            body: None,
        }
    }

    #[test]
    fn test_recording_transport_replays_in_order() {
        let transport = RecordingTransport::new();
        transport.push_response(HttpResponse::new(200, "[]"));
        transport.push_response(HttpResponse::new(404, ""));

        assert_eq!(transport.send(&request()).unwrap().status, 200);
        assert_eq!(transport.send(&request()).unwrap().status, 404);
        assert!(matches!(
            transport.send(&request()),
            Err(SdkError::Transport(_))
        ));
        assert_eq!(transport.requests().len(), 3);
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let response = HttpResponse::new(200, "").with_header("Content-Type", "application/json");
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert!(response.is_success());
        assert_eq!(request().header("ACCEPT"), Some("application/json"));
    }

    #[test]
    fn test_method_names() {
        assert_eq!(Method::Patch.to_string(), "PATCH");
        assert_eq!(Method::Delete.as_str(), "DELETE");
    }
}
