use super::{LIST_ERRORS, READ_ERRORS, WRITE_ERRORS};
use crate::client::{ApiClient, ApiResponse, RawCall};
use crate::error::SdkResult;
use crate::models::{CreateUserRequest, Group, UpdateUserRequest, User};
use crate::transport::Method;
use serde_json::Value;

/// Users API (`/api/v1/users`).
pub struct UserApi<'a> {
    client: &'a ApiClient,
}

impl<'a> UserApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Lists users. Without parameters, returns active users.
    pub fn list_users(&self) -> ApiListUsersRequest<'a> {
        ApiListUsersRequest {
            client: self.client,
            q: None,
            after: None,
            limit: None,
            filter: None,
            search: None,
            sort_by: None,
            sort_order: None,
        }
    }

    /// Creates a user, activated unless `activate(false)` is set.
    pub fn create_user(&self, body: CreateUserRequest) -> ApiCreateUserRequest<'a> {
        ApiCreateUserRequest {
            client: self.client,
            body,
            activate: None,
            provider: None,
            next_login: None,
        }
    }

    /// Retrieves a user by id or login.
    pub fn get_user(&self, user_id: &str) -> ApiGetUserRequest<'a> {
        ApiGetUserRequest {
            client: self.client,
            user_id: user_id.to_string(),
        }
    }

    /// Partially updates a user (`POST`); omitted attributes are kept.
    pub fn update_user(&self, user_id: &str, body: UpdateUserRequest) -> ApiUpdateUserRequest<'a> {
        ApiUpdateUserRequest {
            client: self.client,
            user_id: user_id.to_string(),
            body,
            method: Method::Post,
        }
    }

    /// Replaces a user (`PUT`); omitted attributes are cleared.
    pub fn replace_user(&self, user_id: &str, body: UpdateUserRequest) -> ApiUpdateUserRequest<'a> {
        ApiUpdateUserRequest {
            client: self.client,
            user_id: user_id.to_string(),
            body,
            method: Method::Put,
        }
    }

    /// Activates a staged or deprovisioned user.
    pub fn activate_user(&self, user_id: &str) -> ApiLifecycleRequest<'a> {
        ApiLifecycleRequest::new(self.client, user_id, "activate")
    }

    /// Deactivates a user.
    pub fn deactivate_user(&self, user_id: &str) -> ApiLifecycleRequest<'a> {
        ApiLifecycleRequest::new(self.client, user_id, "deactivate")
    }

    /// Deletes a user. An active user is deactivated by the first call and
    /// deleted by the second.
    pub fn delete_user(&self, user_id: &str) -> ApiDeleteUserRequest<'a> {
        ApiDeleteUserRequest {
            client: self.client,
            user_id: user_id.to_string(),
            send_email: None,
        }
    }

    /// Lists the groups a user belongs to.
    pub fn list_user_groups(&self, user_id: &str) -> ApiListUserGroupsRequest<'a> {
        ApiListUserGroupsRequest {
            client: self.client,
            user_id: user_id.to_string(),
        }
    }
}

/// Builder for [`UserApi::list_users`].
pub struct ApiListUsersRequest<'a> {
    client: &'a ApiClient,
    q: Option<String>,
    after: Option<String>,
    limit: Option<i32>,
    filter: Option<String>,
    search: Option<String>,
    sort_by: Option<String>,
    sort_order: Option<String>,
}

impl<'a> ApiListUsersRequest<'a> {
    /// Matches `firstName`, `lastName` or `email` by prefix.
    pub fn q(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    /// Pagination cursor from a previous page.
    pub fn after(mut self, after: impl Into<String>) -> Self {
        self.after = Some(after.into());
        self
    }

    pub fn limit(mut self, limit: i32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// SCIM-style search expression.
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn sort_by(mut self, sort_by: impl Into<String>) -> Self {
        self.sort_by = Some(sort_by.into());
        self
    }

    /// `asc` or `desc`; only applies with `search`.
    pub fn sort_order(mut self, sort_order: impl Into<String>) -> Self {
        self.sort_order = Some(sort_order.into());
        self
    }

    pub fn execute(self) -> SdkResult<ApiResponse<Vec<User>>> {
        let call = RawCall::new(Method::Get, "/api/v1/users")
            .query("q", self.q.as_ref())
            .query("after", self.after.as_ref())
            .query("limit", self.limit.as_ref())
            .query("filter", self.filter.as_ref())
            .query("search", self.search.as_ref())
            .query("sortBy", self.sort_by.as_ref())
            .query("sortOrder", self.sort_order.as_ref())
            .errors(LIST_ERRORS);
        self.client.execute(call)
    }
}

/// Builder for [`UserApi::create_user`].
pub struct ApiCreateUserRequest<'a> {
    client: &'a ApiClient,
    body: CreateUserRequest,
    activate: Option<bool>,
    provider: Option<bool>,
    next_login: Option<String>,
}

impl<'a> ApiCreateUserRequest<'a> {
    pub fn activate(mut self, activate: bool) -> Self {
        self.activate = Some(activate);
        self
    }

    /// Marks the credentials as mastered by an external provider.
    pub fn provider(mut self, provider: bool) -> Self {
        self.provider = Some(provider);
        self
    }

    /// `changePassword` forces a password change at first sign-in.
    pub fn next_login(mut self, next_login: impl Into<String>) -> Self {
        self.next_login = Some(next_login.into());
        self
    }

    pub fn execute(self) -> SdkResult<ApiResponse<User>> {
        let call = RawCall::new(Method::Post, "/api/v1/users")
            .query("activate", self.activate.as_ref())
            .query("provider", self.provider.as_ref())
            .query("nextLogin", self.next_login.as_ref())
            .body(&self.body)?
            .errors(WRITE_ERRORS);
        self.client.execute(call)
    }
}

/// Builder for [`UserApi::get_user`].
pub struct ApiGetUserRequest<'a> {
    client: &'a ApiClient,
    user_id: String,
}

impl<'a> ApiGetUserRequest<'a> {
    pub fn execute(self) -> SdkResult<ApiResponse<User>> {
        let call = RawCall::new(Method::Get, "/api/v1/users/{userId}")
            .path_param("userId", &self.user_id)
            .errors(READ_ERRORS);
        self.client.execute(call)
    }
}

/// Builder for [`UserApi::update_user`] and [`UserApi::replace_user`].
pub struct ApiUpdateUserRequest<'a> {
    client: &'a ApiClient,
    user_id: String,
    body: UpdateUserRequest,
    method: Method,
}

impl<'a> ApiUpdateUserRequest<'a> {
    pub fn execute(self) -> SdkResult<ApiResponse<User>> {
        let call = RawCall::new(self.method, "/api/v1/users/{userId}")
            .path_param("userId", &self.user_id)
            .body(&self.body)?
            .errors(WRITE_ERRORS);
        self.client.execute(call)
    }
}

/// Builder for [`UserApi::activate_user`] and [`UserApi::deactivate_user`].
pub struct ApiLifecycleRequest<'a> {
    client: &'a ApiClient,
    user_id: String,
    action: &'static str,
    send_email: Option<bool>,
}

impl<'a> ApiLifecycleRequest<'a> {
    fn new(client: &'a ApiClient, user_id: &str, action: &'static str) -> Self {
        Self {
            client,
            user_id: user_id.to_string(),
            action,
            send_email: None,
        }
    }

    /// Emails the user (activation link) or admins (deactivation notice).
    pub fn send_email(mut self, send_email: bool) -> Self {
        self.send_email = Some(send_email);
        self
    }

    /// Returns the response body; activation without email carries the
    /// activation link and token.
    pub fn execute(self) -> SdkResult<ApiResponse<Value>> {
        let path = format!("/api/v1/users/{{userId}}/lifecycle/{}", self.action);
        let call = RawCall::new(Method::Post, path)
            .path_param("userId", &self.user_id)
            .query("sendEmail", self.send_email.as_ref())
            .errors(READ_ERRORS);
        self.client.execute(call)
    }
}

/// Builder for [`UserApi::delete_user`].
pub struct ApiDeleteUserRequest<'a> {
    client: &'a ApiClient,
    user_id: String,
    send_email: Option<bool>,
}

impl<'a> ApiDeleteUserRequest<'a> {
    pub fn send_email(mut self, send_email: bool) -> Self {
        self.send_email = Some(send_email);
        self
    }

    pub fn execute(self) -> SdkResult<ApiResponse<()>> {
        let call = RawCall::new(Method::Delete, "/api/v1/users/{userId}")
            .path_param("userId", &self.user_id)
            .query("sendEmail", self.send_email.as_ref())
            .errors(READ_ERRORS);
        self.client.execute_empty(call)
    }
}

/// Builder for [`UserApi::list_user_groups`].
pub struct ApiListUserGroupsRequest<'a> {
    client: &'a ApiClient,
    user_id: String,
}

impl<'a> ApiListUserGroupsRequest<'a> {
    pub fn execute(self) -> SdkResult<ApiResponse<Vec<Group>>> {
        let call = RawCall::new(Method::Get, "/api/v1/users/{userId}/groups")
            .path_param("userId", &self.user_id)
            .errors(READ_ERRORS);
        self.client.execute(call)
    }
}

#[cfg(test)]
mod tests {
    use crate::client::ApiClient;
    use crate::configuration::Configuration;
    use crate::error::SdkError;
    use crate::models::{CreateUserRequest, UserProfile, UserStatus};
    use crate::transport::{HttpResponse, Method, RecordingTransport};
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    fn setup() -> (ApiClient, Arc<RecordingTransport>) {
        let transport = Arc::new(RecordingTransport::new());
        let config = Configuration::new("https://dev-1.okta.com")
            .unwrap()
            .with_api_token("tok");
        (ApiClient::with_transport(config, transport.clone()), transport)
    }

    #[test]
    fn test_list_users_query() {
        let (client, transport) = setup();
        transport.push_response(HttpResponse::new(
            200,
            r#"[{"id":"00u1","status":"STAGED","profile":{"login":"a@example.com"}}]"#,
        ));

        let response = client
            .user_api()
            .list_users()
            .search("profile.department eq \"Eng\"")
            .sort_by("profile.lastName")
            .sort_order("asc")
            .limit(25)
            .execute()
            .unwrap();

        assert_eq!(response.data[0].status, Some(UserStatus::Staged));
        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::Get);
        let pairs: Vec<(String, String)> = request.url.query_pairs().into_owned().collect();
        assert_eq!(
            pairs,
            vec![
                ("limit".to_string(), "25".to_string()),
                ("search".to_string(), "profile.department eq \"Eng\"".to_string()),
                ("sortBy".to_string(), "profile.lastName".to_string()),
                ("sortOrder".to_string(), "asc".to_string()),
            ]
        );
    }

    #[test]
    fn test_create_user_sends_body() {
        let (client, transport) = setup();
        transport.push_response(HttpResponse::new(200, r#"{"id":"00u2","status":"STAGED"}"#));

        let body = CreateUserRequest {
            profile: UserProfile {
                login: Some("b@example.com".into()),
                ..Default::default()
            },
            ..Default::default()
        };
        let user = client
            .user_api()
            .create_user(body)
            .activate(false)
            .execute()
            .unwrap()
            .data;

        assert_eq!(user.id.as_deref(), Some("00u2"));
        let request = &transport.requests()[0];
        assert_eq!(request.url.query(), Some("activate=false"));
        assert_eq!(
            request.body.as_deref(),
            Some(r#"{"profile":{"login":"b@example.com"}}"#)
        );
    }

    #[test]
    fn test_lifecycle_and_delete_paths() {
        let (client, transport) = setup();
        transport.push_response(HttpResponse::new(200, "{}"));
        transport.push_response(HttpResponse::new(204, ""));

        client
            .user_api()
            .deactivate_user("00u 3")
            .send_email(true)
            .execute()
            .unwrap();
        let deleted = client.user_api().delete_user("00u3").execute().unwrap();
        assert_eq!(deleted.status, 204);

        let requests = transport.requests();
        assert_eq!(
            requests[0].url.as_str(),
            "https://dev-1.okta.com/api/v1/users/00u%203/lifecycle/deactivate?sendEmail=true"
        );
        assert_eq!(requests[1].method, Method::Delete);
        assert_eq!(requests[1].url.path(), "/api/v1/users/00u3");
    }

    #[test]
    fn test_get_user_not_found() {
        let (client, transport) = setup();
        transport.push_response(HttpResponse::new(
            404,
            r#"{"errorCode":"E0000007","errorSummary":"Not found: Resource not found: nobody (User)"}"#,
        ));

        let err = client.user_api().get_user("nobody").execute().err().unwrap();
        assert!(matches!(&err, SdkError::Api(api) if api.error_code() == Some("E0000007")));
    }
}
