//! Git data service: branches, tags, commits, and diffs.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use http::Method;
use serde::Deserialize;

use crate::scm::client::GitService;
use crate::scm::error::ClientError;
use crate::scm::options::{CommitListOptions, ListOptions};
use crate::scm::refs::{expand_ref, trim_ref};
use crate::scm::response::Response;
use crate::scm::types::{Change, Commit, Reference, Signature};

use super::dispatch::Dispatcher;

pub(crate) struct GiteeGitService {
    dispatcher: Arc<Dispatcher>,
}

impl GiteeGitService {
    pub(crate) const fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl GitService for GiteeGitService {
    async fn find_branch(
        &self,
        repo: &str,
        name: &str,
    ) -> Result<(Reference, Response), ClientError> {
        let path = format!("repos/{repo}/branches/{name}");
        let (out, response): (ApiBranch, Response) = self
            .dispatcher
            .request(Method::GET, &path, None::<&()>)
            .await?;
        Ok((out.into(), response))
    }

    async fn find_commit(
        &self,
        repo: &str,
        reference: &str,
    ) -> Result<(Commit, Response), ClientError> {
        let path = format!("repos/{repo}/commits/{}", trim_ref(reference));
        let (out, response): (ApiCommit, Response) = self
            .dispatcher
            .request(Method::GET, &path, None::<&()>)
            .await?;
        Ok((out.into(), response))
    }

    async fn find_tag(
        &self,
        repo: &str,
        name: &str,
    ) -> Result<(Reference, Response), ClientError> {
        let path = format!("repos/{repo}/tags/{name}");
        let (out, response): (ApiTag, Response) = self
            .dispatcher
            .request(Method::GET, &path, None::<&()>)
            .await?;
        Ok((out.into(), response))
    }

    async fn list_branches(
        &self,
        repo: &str,
        opts: ListOptions,
    ) -> Result<(Vec<Reference>, Response), ClientError> {
        let path = format!("repos/{repo}/branches?{}", opts.query());
        let (out, response): (Vec<ApiBranch>, Response) = self
            .dispatcher
            .request(Method::GET, &path, None::<&()>)
            .await?;
        Ok((out.into_iter().map(Into::into).collect(), response))
    }

    async fn list_commits(
        &self,
        repo: &str,
        opts: &CommitListOptions,
    ) -> Result<(Vec<Commit>, Response), ClientError> {
        let path = format!("repos/{repo}/commits?{}", opts.query());
        let (out, response): (Vec<ApiCommit>, Response) = self
            .dispatcher
            .request(Method::GET, &path, None::<&()>)
            .await?;
        Ok((out.into_iter().map(Into::into).collect(), response))
    }

    async fn list_tags(
        &self,
        repo: &str,
        opts: ListOptions,
    ) -> Result<(Vec<Reference>, Response), ClientError> {
        let path = format!("repos/{repo}/tags?{}", opts.query());
        let (out, response): (Vec<ApiTag>, Response) = self
            .dispatcher
            .request(Method::GET, &path, None::<&()>)
            .await?;
        Ok((out.into_iter().map(Into::into).collect(), response))
    }

    async fn list_changes(
        &self,
        repo: &str,
        reference: &str,
        _opts: ListOptions,
    ) -> Result<(Vec<Change>, Response), ClientError> {
        let path = format!("repos/{repo}/commits/{reference}/diff");
        let (out, response): (Vec<ApiChange>, Response) = self
            .dispatcher
            .request(Method::GET, &path, None::<&()>)
            .await?;
        Ok((out.into_iter().map(Into::into).collect(), response))
    }

    async fn compare_changes(
        &self,
        repo: &str,
        source: &str,
        target: &str,
        _opts: ListOptions,
    ) -> Result<(Vec<Change>, Response), ClientError> {
        let path = format!("repos/{repo}/repository/compare?from={source}&to={target}");
        let (out, response): (ApiCompare, Response) = self
            .dispatcher
            .request(Method::GET, &path, None::<&()>)
            .await?;
        Ok((
            out.diffs.into_iter().map(Into::into).collect(),
            response,
        ))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ApiBranch {
    name: String,
    commit: ApiBranchCommit,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ApiBranchCommit {
    id: String,
}

impl From<ApiBranch> for Reference {
    fn from(from: ApiBranch) -> Self {
        Self {
            name: trim_ref(&from.name).to_owned(),
            path: expand_ref(&from.name, "refs/heads/"),
            sha: from.commit.id,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ApiTag {
    name: String,
    commit: ApiTagCommit,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ApiTagCommit {
    sha: String,
}

impl From<ApiTag> for Reference {
    fn from(from: ApiTag) -> Self {
        Self {
            name: trim_ref(&from.name).to_owned(),
            path: expand_ref(&from.name, "refs/tags/"),
            sha: from.commit.sha,
        }
    }
}

/// Commit payloads carry flattened author and committer fields rather
/// than nested signatures.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ApiCommit {
    id: String,
    message: String,
    author_name: String,
    author_email: String,
    authored_date: Option<DateTime<Utc>>,
    committer_name: String,
    committer_email: String,
    committed_date: Option<DateTime<Utc>>,
}

impl From<ApiCommit> for Commit {
    fn from(from: ApiCommit) -> Self {
        Self {
            sha: from.id,
            message: from.message,
            author: Signature {
                login: from.author_name.clone(),
                name: from.author_name,
                email: from.author_email,
                date: from.authored_date.unwrap_or(DateTime::UNIX_EPOCH),
                ..Signature::default()
            },
            committer: Signature {
                login: from.committer_name.clone(),
                name: from.committer_name,
                email: from.committer_email,
                date: from.committed_date.unwrap_or(DateTime::UNIX_EPOCH),
                ..Signature::default()
            },
        }
    }
}

/// Diff entry shared by commit diffs, revision comparisons, and pull
/// request file listings.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct ApiChange {
    new_path: String,
    new_file: bool,
    renamed_file: bool,
    deleted_file: bool,
}

impl From<ApiChange> for Change {
    fn from(from: ApiChange) -> Self {
        Self {
            path: from.new_path,
            added: from.new_file,
            renamed: from.renamed_file,
            deleted: from.deleted_file,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ApiCompare {
    diffs: Vec<ApiChange>,
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
