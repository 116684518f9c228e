//! # Resource Commands
//!
//! Hand-written commands over the SDK's typed API groups.

pub mod apps;
pub mod groups;
pub mod users;

use crate::error::CliResult;
use crate::iostreams::IoStreams;
use crate::prompt::Prompter;
use okta_sdk::{ApiClient, ApiResponse, SdkResult};
use serde_json::json;

/// What a resource command needs to run.
pub struct Context<'a> {
    pub client: &'a ApiClient,
    pub io: &'a mut IoStreams,
    pub prompter: &'a dyn Prompter,
}

impl Context<'_> {
    /// True when `yes` is set or the user agrees.
    pub fn confirm(&self, yes: bool, question: &str) -> CliResult<bool> {
        if yes {
            return Ok(true);
        }
        self.prompter.confirm(question, false)
    }

    /// Prints the outcome of an operation without a response body.
    pub fn print_done(&mut self, id: &str, result: &str) -> CliResult<()> {
        self.io.print_json(&json!({ "id": id, "result": result }))
    }

    /// Reports a declined confirmation.
    pub fn aborted(&mut self) -> CliResult<()> {
        self.io.eprintln("Aborted.")
    }
}

/// Paging flags shared by list commands.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct PageArgs {
    /// Page size.
    #[clap(long)]
    pub limit: Option<i32>,

    /// Cursor returned by a previous page.
    #[clap(long)]
    pub after: Option<String>,

    /// Follow `Link: rel="next"` until the last page.
    #[clap(long)]
    pub all: bool,
}

/// Fetches one page, or every page when `all` is set.
///
/// `fetch` receives the cursor for the page to load.
pub fn collect_pages<T>(
    page: &PageArgs,
    mut fetch: impl FnMut(Option<String>) -> SdkResult<ApiResponse<Vec<T>>>,
) -> CliResult<Vec<T>> {
    let mut items = Vec::new();
    let mut cursor = page.after.clone();

    loop {
        let response = fetch(cursor.clone())?;
        let next = response.next_cursor();
        items.extend(response.data);

        match next {
            Some(next) if page.all && cursor.as_deref() != Some(next.as_str()) => {
                tracing::debug!(after = %next, "fetching next page");
                cursor = Some(next);
            }
            _ => break,
        }
    }

    Ok(items)
}


#[cfg(test)]
mod tests {
    use super::*;
    use okta_sdk::HttpResponse;
    use serde_json::Value;

    #[test]
    fn test_collect_pages_follows_next() {
        let (client, transport) = testing::client();
        transport.push_response(
            HttpResponse::new(200, r#"[{"id":"00u1"}]"#).with_header(
                "Link",
                r#"<https://dev-1.okta.com/api/v1/users?after=00u1&limit=1>; rel="next""#,
            ),
        );
        transport.push_response(HttpResponse::new(200, r#"[{"id":"00u2"}]"#));

        let page = PageArgs {
            limit: Some(1),
            all: true,
            ..Default::default()
        };
        let users: Vec<Value> = collect_pages(&page, |after| {
            let call = okta_sdk::RawCall::new(okta_sdk::Method::Get, "/api/v1/users")
                .query("after", after.as_ref())
                .query("limit", page.limit.as_ref());
            client.execute(call)
        })
        .unwrap();

        assert_eq!(users.len(), 2);
        let requests = transport.requests();
        assert_eq!(requests[1].url.query(), Some("after=00u1&limit=1"));
    }

    #[test]
    fn test_collect_pages_single_page_by_default() {
        let (client, transport) = testing::client();
        transport.push_response(
            HttpResponse::new(200, "[]").with_header("Link", r#"</api/v1/users?after=x>; rel="next""#),
        );

        let users: Vec<Value> = collect_pages(&PageArgs::default(), |_| {
            client.execute(okta_sdk::RawCall::new(okta_sdk::Method::Get, "/api/v1/users"))
        })
        .unwrap();

        assert!(users.is_empty());
        assert_eq!(transport.requests().len(), 1);
    }
}
