//! Issue service: issues and the notes attached to them.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use http::Method;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::scm::client::IssueService;
use crate::scm::error::ClientError;
use crate::scm::options::{IssueListOptions, ListOptions};
use crate::scm::response::Response;
use crate::scm::types::{Comment, CommentInput, Issue, IssueInput};

use super::dispatch::Dispatcher;
use super::user::{self, ApiUser};

pub(crate) struct GiteeIssueService {
    dispatcher: Arc<Dispatcher>,
}

impl GiteeIssueService {
    pub(crate) const fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl IssueService for GiteeIssueService {
    async fn find(&self, repo: &str, number: u64) -> Result<(Issue, Response), ClientError> {
        let path = format!("repos/{repo}/issues/{number}");
        let (out, response): (ApiIssue, Response) = self
            .dispatcher
            .request(Method::GET, &path, None::<&()>)
            .await?;
        Ok((out.into(), response))
    }

    async fn find_comment(
        &self,
        repo: &str,
        number: u64,
        id: u64,
    ) -> Result<(Comment, Response), ClientError> {
        let path = format!("repos/{repo}/issues/{number}/notes/{id}");
        let (out, response): (ApiComment, Response) = self
            .dispatcher
            .request(Method::GET, &path, None::<&()>)
            .await?;
        Ok((out.into(), response))
    }

    async fn list(
        &self,
        repo: &str,
        opts: IssueListOptions,
    ) -> Result<(Vec<Issue>, Response), ClientError> {
        let path = format!("repos/{repo}/issues?{}", opts.query());
        let (out, response): (Vec<ApiIssue>, Response) = self
            .dispatcher
            .request(Method::GET, &path, None::<&()>)
            .await?;
        Ok((out.into_iter().map(Into::into).collect(), response))
    }

    async fn list_comments(
        &self,
        repo: &str,
        number: u64,
        opts: ListOptions,
    ) -> Result<(Vec<Comment>, Response), ClientError> {
        let path = format!("repos/{repo}/issues/{number}/notes?{}", opts.query());
        let (out, response): (Vec<ApiComment>, Response) = self
            .dispatcher
            .request(Method::GET, &path, None::<&()>)
            .await?;
        Ok((out.into_iter().map(Into::into).collect(), response))
    }

    async fn create(
        &self,
        repo: &str,
        input: &IssueInput,
    ) -> Result<(Issue, Response), ClientError> {
        let path = format!("repos/{repo}/issues");
        let body = ApiIssueInput {
            title: input.title.clone(),
            body: input.body.clone(),
        };
        let (out, response): (ApiIssue, Response) = self
            .dispatcher
            .request(Method::POST, &path, Some(&body))
            .await?;
        Ok((out.into(), response))
    }

    // Gitee accepts the note text as a query parameter rather than a JSON
    // body on this endpoint.
    async fn create_comment(
        &self,
        repo: &str,
        number: u64,
        input: &CommentInput,
    ) -> Result<(Comment, Response), ClientError> {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("body", &input.body)
            .finish();
        let path = format!("repos/{repo}/issues/{number}/notes?{query}");
        let (out, response): (ApiComment, Response) = self
            .dispatcher
            .request(Method::POST, &path, None::<&()>)
            .await?;
        Ok((out.into(), response))
    }

    async fn delete_comment(
        &self,
        repo: &str,
        number: u64,
        id: u64,
    ) -> Result<Response, ClientError> {
        let path = format!("repos/{repo}/issues/{number}/notes/{id}");
        self.dispatcher
            .request_unit(Method::DELETE, &path, None::<&()>)
            .await
    }

    async fn close(&self, repo: &str, number: u64) -> Result<Response, ClientError> {
        let path = format!("repos/{repo}/issues/{number}?state_event=close");
        self.dispatcher
            .request_unit(Method::PUT, &path, None::<&()>)
            .await
    }

    async fn lock(&self, repo: &str, number: u64) -> Result<Response, ClientError> {
        let path = format!("repos/{repo}/issues/{number}?discussion_locked=true");
        self.dispatcher
            .request_unit(Method::PUT, &path, None::<&()>)
            .await
    }

    async fn unlock(&self, repo: &str, number: u64) -> Result<Response, ClientError> {
        let path = format!("repos/{repo}/issues/{number}?discussion_locked=false");
        self.dispatcher
            .request_unit(Method::PUT, &path, None::<&()>)
            .await
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ApiIssue {
    number: u64,
    title: String,
    body: String,
    state: String,
    html_url: String,
    discussion_locked: bool,
    labels: Vec<ApiLabel>,
    user: ApiUser,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ApiLabel {
    name: String,
}

impl From<ApiIssue> for Issue {
    fn from(from: ApiIssue) -> Self {
        Self {
            number: from.number,
            title: from.title,
            body: from.body,
            link: from.html_url,
            labels: from.labels.into_iter().map(|label| label.name).collect(),
            closed: from.state != "open",
            locked: from.discussion_locked,
            author: user::signature(from.user),
            created: from.created_at.unwrap_or(DateTime::UNIX_EPOCH),
            updated: from.updated_at.unwrap_or(DateTime::UNIX_EPOCH),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
struct ApiIssueInput {
    title: String,
    body: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ApiComment {
    id: u64,
    body: String,
    user: ApiUser,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<ApiComment> for Comment {
    fn from(from: ApiComment) -> Self {
        Self {
            id: from.id,
            body: from.body,
            author: user::signature(from.user),
            created: from.created_at.unwrap_or(DateTime::UNIX_EPOCH),
            updated: from.updated_at.unwrap_or(DateTime::UNIX_EPOCH),
        }
    }
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
