//! Pull request service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use http::Method;
use serde::{Deserialize, Serialize};

use crate::scm::client::PullRequestService;
use crate::scm::error::ClientError;
use crate::scm::options::{ListOptions, PullRequestListOptions};
use crate::scm::response::Response;
use crate::scm::types::{Change, PullRequest, PullRequestInput};

use super::dispatch::Dispatcher;
use super::git::ApiChange;
use super::user::{self, ApiUser};

pub(crate) struct GiteePullRequestService {
    dispatcher: Arc<Dispatcher>,
}

impl GiteePullRequestService {
    pub(crate) const fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl PullRequestService for GiteePullRequestService {
    async fn find(&self, repo: &str, number: u64) -> Result<(PullRequest, Response), ClientError> {
        let path = format!("repos/{repo}/pulls/{number}");
        let (out, response): (ApiPullRequest, Response) = self
            .dispatcher
            .request(Method::GET, &path, None::<&()>)
            .await?;
        Ok((out.into(), response))
    }

    async fn list(
        &self,
        repo: &str,
        opts: PullRequestListOptions,
    ) -> Result<(Vec<PullRequest>, Response), ClientError> {
        let path = format!("repos/{repo}/pulls?{}", opts.query());
        let (out, response): (Vec<ApiPullRequest>, Response) = self
            .dispatcher
            .request(Method::GET, &path, None::<&()>)
            .await?;
        Ok((out.into_iter().map(Into::into).collect(), response))
    }

    async fn list_changes(
        &self,
        repo: &str,
        number: u64,
        opts: ListOptions,
    ) -> Result<(Vec<Change>, Response), ClientError> {
        let path = format!("repos/{repo}/pulls/{number}/files?{}", opts.query());
        let (out, response): (Vec<ApiChange>, Response) = self
            .dispatcher
            .request(Method::GET, &path, None::<&()>)
            .await?;
        Ok((out.into_iter().map(Into::into).collect(), response))
    }

    async fn merge(&self, repo: &str, number: u64) -> Result<Response, ClientError> {
        let path = format!("repos/{repo}/pulls/{number}/merge");
        self.dispatcher
            .request_unit(Method::PUT, &path, None::<&()>)
            .await
    }

    async fn close(&self, repo: &str, number: u64) -> Result<Response, ClientError> {
        let path = format!("repos/{repo}/pulls/{number}");
        let body = ApiPullRequestUpdate {
            state: "closed".to_owned(),
        };
        self.dispatcher
            .request_unit(Method::PATCH, &path, Some(&body))
            .await
    }

    async fn create(
        &self,
        repo: &str,
        input: &PullRequestInput,
    ) -> Result<(PullRequest, Response), ClientError> {
        let path = format!("repos/{repo}/pulls");
        let body = ApiPullRequestInput {
            title: input.title.clone(),
            body: input.body.clone(),
            head: input.source.clone(),
            base: input.target.clone(),
        };
        let (out, response): (ApiPullRequest, Response) = self
            .dispatcher
            .request(Method::POST, &path, Some(&body))
            .await?;
        Ok((out.into(), response))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ApiPullRequest {
    number: u64,
    title: String,
    body: String,
    state: String,
    html_url: String,
    merged_at: Option<DateTime<Utc>>,
    head: ApiPullRequestBranch,
    base: ApiPullRequestBranch,
    user: ApiUser,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ApiPullRequestBranch {
    #[serde(rename = "ref")]
    reference: String,
    sha: String,
}

impl From<ApiPullRequest> for PullRequest {
    fn from(from: ApiPullRequest) -> Self {
        Self {
            number: from.number,
            title: from.title,
            body: from.body,
            sha: from.head.sha,
            ref_path: format!("refs/pull/{}/head", from.number),
            source: from.head.reference,
            target: from.base.reference,
            link: from.html_url,
            closed: from.state != "open",
            merged: from.merged_at.is_some(),
            author: user::signature(from.user),
            created: from.created_at.unwrap_or(DateTime::UNIX_EPOCH),
            updated: from.updated_at.unwrap_or(DateTime::UNIX_EPOCH),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
struct ApiPullRequestInput {
    title: String,
    body: String,
    head: String,
    base: String,
}

#[derive(Debug, Clone, Default, Serialize)]
struct ApiPullRequestUpdate {
    state: String,
}

#[cfg(test)]
#[path = "pr_tests.rs"]
mod tests;
