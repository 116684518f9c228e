use super::{LIST_ERRORS, READ_ERRORS, WRITE_ERRORS};
use crate::client::{ApiClient, ApiResponse, RawCall};
use crate::error::SdkResult;
use crate::models::{Group, User};
use crate::transport::Method;

/// Groups API (`/api/v1/groups`).
pub struct GroupApi<'a> {
    client: &'a ApiClient,
}

impl<'a> GroupApi<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub fn list_groups(&self) -> ApiListGroupsRequest<'a> {
        ApiListGroupsRequest {
            client: self.client,
            q: None,
            filter: None,
            after: None,
            limit: None,
            search: None,
        }
    }

    /// Creates an `OKTA_GROUP`.
    pub fn add_group(&self, group: Group) -> ApiGroupBodyRequest<'a> {
        ApiGroupBodyRequest {
            client: self.client,
            group_id: None,
            group,
        }
    }

    pub fn get_group(&self, group_id: &str) -> ApiGetGroupRequest<'a> {
        ApiGetGroupRequest {
            client: self.client,
            group_id: group_id.to_string(),
        }
    }

    /// Replaces the profile of an `OKTA_GROUP`.
    pub fn replace_group(&self, group_id: &str, group: Group) -> ApiGroupBodyRequest<'a> {
        ApiGroupBodyRequest {
            client: self.client,
            group_id: Some(group_id.to_string()),
            group,
        }
    }

    /// Deletes an `OKTA_GROUP`.
    pub fn delete_group(&self, group_id: &str) -> ApiDeleteGroupRequest<'a> {
        ApiDeleteGroupRequest {
            client: self.client,
            group_id: group_id.to_string(),
        }
    }

    pub fn list_group_users(&self, group_id: &str) -> ApiListGroupUsersRequest<'a> {
        ApiListGroupUsersRequest {
            client: self.client,
            group_id: group_id.to_string(),
            after: None,
            limit: None,
        }
    }

    pub fn assign_user_to_group(&self, group_id: &str, user_id: &str) -> ApiMembershipRequest<'a> {
        ApiMembershipRequest::new(self.client, Method::Put, group_id, user_id)
    }

    pub fn unassign_user_from_group(
        &self,
        group_id: &str,
        user_id: &str,
    ) -> ApiMembershipRequest<'a> {
        ApiMembershipRequest::new(self.client, Method::Delete, group_id, user_id)
    }
}

/// Builder for [`GroupApi::list_groups`].
pub struct ApiListGroupsRequest<'a> {
    client: &'a ApiClient,
    q: Option<String>,
    filter: Option<String>,
    after: Option<String>,
    limit: Option<i32>,
    search: Option<String>,
}

impl<'a> ApiListGroupsRequest<'a> {
    /// Matches group names by prefix.
    pub fn q(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
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

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn execute(self) -> SdkResult<ApiResponse<Vec<Group>>> {
        let call = RawCall::new(Method::Get, "/api/v1/groups")
            .query("q", self.q.as_ref())
            .query("filter", self.filter.as_ref())
            .query("after", self.after.as_ref())
            .query("limit", self.limit.as_ref())
            .query("search", self.search.as_ref())
            .errors(LIST_ERRORS);
        self.client.execute(call)
    }
}

/// Builder for [`GroupApi::add_group`] and [`GroupApi::replace_group`].
pub struct ApiGroupBodyRequest<'a> {
    client: &'a ApiClient,
    group_id: Option<String>,
    group: Group,
}

impl<'a> ApiGroupBodyRequest<'a> {
    pub fn execute(self) -> SdkResult<ApiResponse<Group>> {
        let call = match &self.group_id {
            Some(id) => RawCall::new(Method::Put, "/api/v1/groups/{groupId}").path_param("groupId", id),
            None => RawCall::new(Method::Post, "/api/v1/groups"),
        };
        let call = call.body(&self.group)?.errors(WRITE_ERRORS);
        self.client.execute(call)
    }
}

/// Builder for [`GroupApi::get_group`].
pub struct ApiGetGroupRequest<'a> {
    client: &'a ApiClient,
    group_id: String,
}

impl<'a> ApiGetGroupRequest<'a> {
    pub fn execute(self) -> SdkResult<ApiResponse<Group>> {
        let call = RawCall::new(Method::Get, "/api/v1/groups/{groupId}")
            .path_param("groupId", &self.group_id)
            .errors(READ_ERRORS);
        self.client.execute(call)
    }
}

/// Builder for [`GroupApi::delete_group`].
pub struct ApiDeleteGroupRequest<'a> {
    client: &'a ApiClient,
    group_id: String,
}

impl<'a> ApiDeleteGroupRequest<'a> {
    pub fn execute(self) -> SdkResult<ApiResponse<()>> {
        let call = RawCall::new(Method::Delete, "/api/v1/groups/{groupId}")
            .path_param("groupId", &self.group_id)
            .errors(READ_ERRORS);
        self.client.execute_empty(call)
    }
}

/// Builder for [`GroupApi::list_group_users`].
pub struct ApiListGroupUsersRequest<'a> {
    client: &'a ApiClient,
    group_id: String,
    after: Option<String>,
    limit: Option<i32>,
}

impl<'a> ApiListGroupUsersRequest<'a> {
    pub fn after(mut self, after: impl Into<String>) -> Self {
        self.after = Some(after.into());
        self
    }

    pub fn limit(mut self, limit: i32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn execute(self) -> SdkResult<ApiResponse<Vec<User>>> {
        let call = RawCall::new(Method::Get, "/api/v1/groups/{groupId}/users")
            .path_param("groupId", &self.group_id)
            .query("after", self.after.as_ref())
            .query("limit", self.limit.as_ref())
            .errors(READ_ERRORS);
        self.client.execute(call)
    }
}

/// Builder for group membership changes.
pub struct ApiMembershipRequest<'a> {
    client: &'a ApiClient,
    method: Method,
    group_id: String,
    user_id: String,
}

impl<'a> ApiMembershipRequest<'a> {
    fn new(client: &'a ApiClient, method: Method, group_id: &str, user_id: &str) -> Self {
        Self {
            client,
            method,
            group_id: group_id.to_string(),
            user_id: user_id.to_string(),
        }
    }

    pub fn execute(self) -> SdkResult<ApiResponse<()>> {
        let call = RawCall::new(self.method, "/api/v1/groups/{groupId}/users/{userId}")
            .path_param("groupId", &self.group_id)
            .path_param("userId", &self.user_id)
            .errors(READ_ERRORS);
        self.client.execute_empty(call)
    }
}
