use super::{LIST_ERRORS, READ_ERRORS};
use crate::client::{ApiClient, ApiResponse, RawCall};
use crate::error::SdkResult;
use crate::models::Application;
use crate::transport::Method;

/// Applications API (`/api/v1/apps`).
pub struct ApplicationApi<'a> {
    client: &'a ApiClient,
}

impl<'a> ApplicationApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn list_applications(&self) -> ApiListApplicationsRequest<'a> {
        ApiListApplicationsRequest {
            client: self.client,
            q: None,
            after: None,
            limit: None,
            filter: None,
            include_non_deleted: None,
        }
    }

    pub fn get_application(&self, app_id: &str) -> ApiGetApplicationRequest<'a> {
        ApiGetApplicationRequest {
            client: self.client,
            app_id: app_id.to_string(),
        }
    }

    pub fn activate_application(&self, app_id: &str) -> ApiApplicationActionRequest<'a> {
        ApiApplicationActionRequest::new(self.client, Method::Post, app_id, Some("activate"))
    }

    pub fn deactivate_application(&self, app_id: &str) -> ApiApplicationActionRequest<'a> {
        ApiApplicationActionRequest::new(self.client, Method::Post, app_id, Some("deactivate"))
    }

    /// Deletes an inactive app.
    pub fn delete_application(&self, app_id: &str) -> ApiApplicationActionRequest<'a> {
        ApiApplicationActionRequest::new(self.client, Method::Delete, app_id, None)
    }
}

/// Builder for [`ApplicationApi::list_applications`].
pub struct ApiListApplicationsRequest<'a> {
    client: &'a ApiClient,
    q: Option<String>,
    after: Option<String>,
    limit: Option<i32>,
    filter: Option<String>,
    include_non_deleted: Option<bool>,
}

impl<'a> ApiListApplicationsRequest<'a> {
    /// Matches `name` or `label`.
    pub fn q(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    pub fn after(mut self, after: impl Into<String>) -> Self {
        self.after = Some(after.into());
        self
    }

    pub fn limit(mut self, limit: i32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// e.g. `status eq "ACTIVE"`.
    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn include_non_deleted(mut self, include: bool) -> Self {
        self.include_non_deleted = Some(include);
        self
    }

    pub fn execute(self) -> SdkResult<ApiResponse<Vec<Application>>> {
        let call = RawCall::new(Method::Get, "/api/v1/apps")
            .query("q", self.q.as_ref())
            .query("after", self.after.as_ref())
            .query("limit", self.limit.as_ref())
            .query("filter", self.filter.as_ref())
            .query("includeNonDeleted", self.include_non_deleted.as_ref())
            .errors(LIST_ERRORS);
        self.client.execute(call)
    }
}

/// Builder for [`ApplicationApi::get_application`].
pub struct ApiGetApplicationRequest<'a> {
    client: &'a ApiClient,
    app_id: String,
}

impl<'a> ApiGetApplicationRequest<'a> {
    pub fn execute(self) -> SdkResult<ApiResponse<Application>> {
        let call = RawCall::new(Method::Get, "/api/v1/apps/{appId}")
            .path_param("appId", &self.app_id)
            .errors(READ_ERRORS);
        self.client.execute(call)
    }
}

/// Builder for app lifecycle operations and deletion.
pub struct ApiApplicationActionRequest<'a> {
    client: &'a ApiClient,
    method: Method,
    app_id: String,
    action: Option<&'static str>,
}

impl<'a> ApiApplicationActionRequest<'a> {
    fn new(
        client: &'a ApiClient,
        method: Method,
        app_id: &str,
        action: Option<&'static str>,
    ) -> Self {
        Self {
            client,
            method,
            app_id: app_id.to_string(),
            action,
        }
    }

    pub fn execute(self) -> SdkResult<ApiResponse<()>> {
        let path = match self.action {
            Some(action) => format!("/api/v1/apps/{{appId}}/lifecycle/{}", action),
            None => "/api/v1/apps/{appId}".to_string(),
        };
        let call = RawCall::new(self.method, path)
            .path_param("appId", &self.app_id)
            .errors(READ_ERRORS);
        self.client.execute_empty(call)
    }
}

#[cfg(test)]
mod tests {
    use crate::client::ApiClient;
    use crate::configuration::Configuration;
    use crate::error::SdkError;
    use crate::transport::{HttpResponse, Method, RecordingTransport};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn setup() -> (ApiClient, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::new());
        let config = Configuration::new("https://dev-1.okta.com").unwrap();
        (ApiClient::with_transport(config, transport.clone()), transport)
    }

    #[test]
    fn test_list_applications_filter() {
        let (client, transport) = setup();
        transport.push_response(HttpResponse::new(
            200,
            r#"[{"id":"0oa1","label":"Portal","signOnMode":"BOOKMARK"}]"#,
        ));

        let apps = client
            .application_api()
            .list_applications()
            .filter("status eq \"ACTIVE\"")
            .include_non_deleted(false)
            .execute()
            .unwrap()
            .data;
        assert_eq!(apps[0].label.as_deref(), Some("Portal"));

        let request = &transport.requests()[0];
        assert!(request.header("Authorization").is_none());
        assert_eq!(
            request.url.query(),
            Some("filter=status+eq+%22ACTIVE%22&includeNonDeleted=false")
        );
    }

    #[test]
    fn test_lifecycle_paths() {
        let (client, transport) = setup();
        transport.push_response(HttpResponse::new(200, "{}"));
        transport.push_response(HttpResponse::new(204, ""));

        client.application_api().deactivate_application("0oa1").execute().unwrap();
        client.application_api().delete_application("0oa1").execute().unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].url.path(), "/api/v1/apps/0oa1/lifecycle/deactivate");
        assert_eq!(requests[1].method, Method::Delete);
        assert_eq!(requests[1].url.path(), "/api/v1/apps/0oa1");
    }

    #[test]
    fn test_delete_active_app_is_rejected() {
        let (client, transport) = setup();
        transport.push_response(HttpResponse::new(
            400,
            r#"{"errorCode":"E0000056","errorSummary":"Delete application forbidden."}"#,
        ));

        let err = client.application_api().delete_application("0oa1").execute().err().unwrap();
        match err {
            SdkError::Api(api) => assert_eq!(api.status, 400),
            other => panic!("unexpected error: {}", other),
        }
    }
}
