//! Repository service: repositories, webhooks, commit statuses, and
//! deployment statuses.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use http::Method;
use serde::{Deserialize, Serialize};

use crate::scm::client::RepositoryService;
use crate::scm::error::ClientError;
use crate::scm::options::ListOptions;
use crate::scm::response::Response;
use crate::scm::transport::AccessToken;
use crate::scm::types::{
    DeployStatus, Hook, HookEvent, HookInput, Perm, Repository, State, Status, StatusInput,
};

use super::dispatch::Dispatcher;

pub(crate) struct GiteeRepositoryService {
    dispatcher: Arc<Dispatcher>,
}

impl GiteeRepositoryService {
    pub(crate) const fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl RepositoryService for GiteeRepositoryService {
    async fn find(&self, repo: &str) -> Result<(Repository, Response), ClientError> {
        let path = format!("repos/{repo}");
        let (out, response): (ApiRepository, Response) = self
            .dispatcher
            .request(Method::GET, &path, None::<&()>)
            .await?;
        Ok((out.into(), response))
    }

    async fn find_hook(&self, repo: &str, id: &str) -> Result<(Hook, Response), ClientError> {
        let path = format!("repos/{repo}/hooks/{id}");
        let (out, response): (ApiHook, Response) = self
            .dispatcher
            .request(Method::GET, &path, None::<&()>)
            .await?;
        Ok((out.into(), response))
    }

    async fn find_perms(&self, repo: &str) -> Result<(Perm, Response), ClientError> {
        let (repository, response) = self.find(repo).await?;
        Ok((repository.perm, response))
    }

    async fn list(&self, opts: ListOptions) -> Result<(Vec<Repository>, Response), ClientError> {
        let path = format!("user/repos?{}", opts.query());
        let (out, response): (Vec<ApiRepository>, Response) = self
            .dispatcher
            .request(Method::GET, &path, None::<&()>)
            .await?;
        Ok((out.into_iter().map(Into::into).collect(), response))
    }

    async fn list_hooks(
        &self,
        repo: &str,
        opts: ListOptions,
    ) -> Result<(Vec<Hook>, Response), ClientError> {
        let path = format!("repos/{repo}/hooks?{}", opts.query());
        let (out, response): (Vec<ApiHook>, Response) = self
            .dispatcher
            .request(Method::GET, &path, None::<&()>)
            .await?;
        Ok((out.into_iter().map(Into::into).collect(), response))
    }

    async fn list_status(
        &self,
        repo: &str,
        reference: &str,
        opts: ListOptions,
    ) -> Result<(Vec<Status>, Response), ClientError> {
        let path = format!("repos/{repo}/statuses/{reference}?{}", opts.query());
        let (out, response): (Vec<ApiStatus>, Response) = self
            .dispatcher
            .request(Method::GET, &path, None::<&()>)
            .await?;
        Ok((out.into_iter().map(Into::into).collect(), response))
    }

    async fn create_hook(
        &self,
        repo: &str,
        token: &AccessToken,
        input: &HookInput,
    ) -> Result<(Hook, Response), ClientError> {
        let path = format!("repos/{repo}/hooks");
        let mut body = ApiHookInput::from(input);
        body.access_token = token.value().to_owned();
        let (out, response): (ApiHook, Response) = self
            .dispatcher
            .request(Method::POST, &path, Some(&body))
            .await?;
        Ok((out.into(), response))
    }

    async fn create_status(
        &self,
        repo: &str,
        reference: &str,
        input: &StatusInput,
    ) -> Result<(Status, Response), ClientError> {
        let path = format!("repos/{repo}/statuses/{reference}");
        let body = ApiStatus {
            state: convert_from_state(input.state).to_owned(),
            target_url: input.target.clone(),
            description: input.desc.clone(),
            context: input.label.clone(),
        };
        let (out, response): (ApiStatus, Response) = self
            .dispatcher
            .request(Method::POST, &path, Some(&body))
            .await?;
        Ok((out.into(), response))
    }

    async fn create_deploy_status(
        &self,
        repo: &str,
        input: &DeployStatus,
    ) -> Result<(DeployStatus, Response), ClientError> {
        let path = format!("repos/{repo}/deployments/{}/statuses", input.number);
        let body = ApiDeployStatus {
            id: 0,
            environment: input.environment.clone(),
            environment_url: input.environment_url.clone(),
            state: convert_from_state(input.state).to_owned(),
            target_url: input.target.clone(),
            description: input.desc.clone(),
        };
        let (out, response): (ApiDeployStatus, Response) = self
            .dispatcher
            .request(Method::POST, &path, Some(&body))
            .await?;
        Ok((out.into(), response))
    }

    async fn update_hook(
        &self,
        repo: &str,
        id: &str,
        input: &HookInput,
    ) -> Result<(Hook, Response), ClientError> {
        let path = format!("repos/{repo}/hooks/{id}");
        let body = ApiHookInput::from(input);
        let (out, response): (ApiHook, Response) = self
            .dispatcher
            .request(Method::PATCH, &path, Some(&body))
            .await?;
        Ok((out.into(), response))
    }

    async fn delete_hook(&self, repo: &str, id: &str) -> Result<Response, ClientError> {
        let path = format!("repos/{repo}/hooks/{id}");
        self.dispatcher
            .request_unit(Method::DELETE, &path, None::<&()>)
            .await
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ApiRepository {
    id: u64,
    owner: ApiOwner,
    name: String,
    private: bool,
    html_url: String,
    ssh_url: String,
    clone_url: String,
    default_branch: String,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    permission: ApiPermission,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ApiOwner {
    login: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ApiPermission {
    admin: bool,
    push: bool,
    pull: bool,
}

impl From<ApiRepository> for Repository {
    fn from(from: ApiRepository) -> Self {
        Self {
            id: from.id.to_string(),
            namespace: from.owner.login,
            name: from.name,
            perm: Perm {
                pull: from.permission.pull,
                push: from.permission.push,
                admin: from.permission.admin,
            },
            branch: from.default_branch,
            private: from.private,
            link: from.html_url,
            clone: from.clone_url,
            clone_ssh: from.ssh_url,
            created: from.created_at.unwrap_or(DateTime::UNIX_EPOCH),
            updated: from.updated_at.unwrap_or(DateTime::UNIX_EPOCH),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ApiHook {
    id: u64,
    url: String,
    push_events: bool,
    issues_events: bool,
    merge_requests_events: bool,
}

/// Gitee reports no subscription flags for create, delete, or deployment
/// events, so every hook counts as subscribed to them, and hooks always
/// come back active with TLS verification skipped.
impl From<ApiHook> for Hook {
    fn from(from: ApiHook) -> Self {
        let mut events = vec![HookEvent::Create, HookEvent::Delete, HookEvent::Deployment];
        if from.push_events {
            events.push(HookEvent::Push);
        }
        if from.merge_requests_events {
            events.push(HookEvent::PullRequest);
            events.push(HookEvent::PullRequestReviewComment);
        }
        if from.issues_events {
            events.push(HookEvent::Issues);
            events.push(HookEvent::IssueComment);
        }
        let id = if from.id == 0 {
            String::new()
        } else {
            from.id.to_string()
        };
        Self {
            id,
            target: from.url,
            events,
            active: true,
            skip_verify: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
struct ApiHookInput {
    access_token: String,
    url: String,
    password: String,
    push_events: bool,
    tag_push_events: bool,
    issues_events: bool,
    merge_requests_events: bool,
}

impl From<&HookInput> for ApiHookInput {
    fn from(from: &HookInput) -> Self {
        Self {
            url: from.target.clone(),
            password: from.secret.clone(),
            push_events: from.events.push,
            tag_push_events: from.events.tag,
            issues_events: from.events.issue,
            merge_requests_events: from.events.pull_request,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct ApiStatus {
    state: String,
    target_url: String,
    description: String,
    context: String,
}

impl From<ApiStatus> for Status {
    fn from(from: ApiStatus) -> Self {
        Self {
            state: convert_state(&from.state),
            label: from.context,
            desc: from.description,
            target: from.target_url,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
struct ApiDeployStatus {
    id: i64,
    environment: String,
    environment_url: String,
    state: String,
    #[serde(rename = "log_url")]
    target_url: String,
    description: String,
}

impl From<ApiDeployStatus> for DeployStatus {
    fn from(from: ApiDeployStatus) -> Self {
        Self {
            number: from.id,
            state: convert_state(&from.state),
            desc: from.description,
            target: from.target_url,
            environment: from.environment,
            environment_url: from.environment_url,
        }
    }
}

fn convert_state(from: &str) -> State {
    match from {
        "error" => State::Error,
        "failure" => State::Failure,
        "pending" => State::Pending,
        "success" => State::Success,
        _ => State::Unknown,
    }
}

/// Gitee's status vocabulary has no running state, so `Running` reports
/// as `pending`; states without a wire spelling report as `error`.
const fn convert_from_state(from: State) -> &'static str {
    match from {
        State::Pending | State::Running => "pending",
        State::Success => "success",
        State::Failure => "failure",
        State::Unknown | State::Canceled | State::Error => "error",
    }
}

#[cfg(test)]
#[path = "repo_tests.rs"]
mod tests;
