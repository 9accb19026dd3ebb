//! Service traits and the client shell that bundles them.
//!
//! Each trait groups the operations of one provider resource. Drivers
//! implement the traits against their own wire formats and the factory
//! wires the implementations into a [`Client`], so callers depend only on
//! this module. Every operation yields the domain payload together with
//! the parsed [`Response`] envelope, or just the envelope when the
//! provider returns nothing useful; failures surface as
//! [`ClientError`](super::ClientError) with the envelope preserved where
//! one exists.

use std::sync::Arc;

use async_trait::async_trait;
use url::Url;

use super::error::ClientError;
use super::options::{CommitListOptions, IssueListOptions, ListOptions, PullRequestListOptions};
use super::response::{Rate, RateSnapshot, Response};
use super::transport::AccessToken;
use super::types::{
    Change, Comment, CommentInput, Commit, Content, ContentInput, DeployStatus, Driver, Hook,
    HookInput, Issue, IssueInput, Organization, Perm, PullRequest, PullRequestInput, Reference,
    Repository, Status, StatusInput, User,
};

/// Convenience alias for an operation returning a payload and envelope.
type Reply<T> = Result<(T, Response), ClientError>;

/// Operations on git data: branches, tags, commits, and diffs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitService: Send + Sync {
    /// Looks up a branch by name.
    async fn find_branch(&self, repo: &str, name: &str) -> Reply<Reference>;

    /// Looks up a commit by reference or digest.
    async fn find_commit(&self, repo: &str, reference: &str) -> Reply<Commit>;

    /// Looks up a tag by name.
    async fn find_tag(&self, repo: &str, name: &str) -> Reply<Reference>;

    /// Lists branches.
    async fn list_branches(&self, repo: &str, opts: ListOptions) -> Reply<Vec<Reference>>;

    /// Lists commits.
    async fn list_commits(&self, repo: &str, opts: &CommitListOptions) -> Reply<Vec<Commit>>;

    /// Lists tags.
    async fn list_tags(&self, repo: &str, opts: ListOptions) -> Reply<Vec<Reference>>;

    /// Lists the files touched by a commit.
    async fn list_changes(
        &self,
        repo: &str,
        reference: &str,
        opts: ListOptions,
    ) -> Reply<Vec<Change>>;

    /// Lists the files that differ between two revisions.
    async fn compare_changes(
        &self,
        repo: &str,
        source: &str,
        target: &str,
        opts: ListOptions,
    ) -> Reply<Vec<Change>>;
}

/// Operations on repositories, webhooks, and statuses.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepositoryService: Send + Sync {
    /// Looks up a repository by `owner/name`.
    async fn find(&self, repo: &str) -> Reply<Repository>;

    /// Looks up a webhook by identifier.
    async fn find_hook(&self, repo: &str, id: &str) -> Reply<Hook>;

    /// Returns the authenticated user's permissions on the repository.
    async fn find_perms(&self, repo: &str) -> Reply<Perm>;

    /// Lists repositories visible to the authenticated user.
    async fn list(&self, opts: ListOptions) -> Reply<Vec<Repository>>;

    /// Lists webhooks registered on the repository.
    async fn list_hooks(&self, repo: &str, opts: ListOptions) -> Reply<Vec<Hook>>;

    /// Lists commit statuses for a revision.
    async fn list_status(
        &self,
        repo: &str,
        reference: &str,
        opts: ListOptions,
    ) -> Reply<Vec<Status>>;

    /// Registers a webhook. The provider requires the access token inside
    /// the request body, so it is passed explicitly here rather than
    /// taken from ambient state.
    async fn create_hook(
        &self,
        repo: &str,
        token: &AccessToken,
        input: &HookInput,
    ) -> Reply<Hook>;

    /// Reports a commit status for a revision.
    async fn create_status(
        &self,
        repo: &str,
        reference: &str,
        input: &StatusInput,
    ) -> Reply<Status>;

    /// Reports a deployment status.
    async fn create_deploy_status(
        &self,
        repo: &str,
        input: &DeployStatus,
    ) -> Reply<DeployStatus>;

    /// Updates a webhook.
    async fn update_hook(&self, repo: &str, id: &str, input: &HookInput) -> Reply<Hook>;

    /// Removes a webhook.
    async fn delete_hook(&self, repo: &str, id: &str) -> Result<Response, ClientError>;
}

/// Operations on issues and their comments.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IssueService: Send + Sync {
    /// Looks up an issue by number.
    async fn find(&self, repo: &str, number: u64) -> Reply<Issue>;

    /// Looks up an issue comment by identifier.
    async fn find_comment(&self, repo: &str, number: u64, id: u64) -> Reply<Comment>;

    /// Lists issues.
    async fn list(&self, repo: &str, opts: IssueListOptions) -> Reply<Vec<Issue>>;

    /// Lists the comments on an issue.
    async fn list_comments(
        &self,
        repo: &str,
        number: u64,
        opts: ListOptions,
    ) -> Reply<Vec<Comment>>;

    /// Opens an issue.
    async fn create(&self, repo: &str, input: &IssueInput) -> Reply<Issue>;

    /// Posts a comment on an issue.
    async fn create_comment(
        &self,
        repo: &str,
        number: u64,
        input: &CommentInput,
    ) -> Reply<Comment>;

    /// Removes a comment from an issue.
    async fn delete_comment(
        &self,
        repo: &str,
        number: u64,
        id: u64,
    ) -> Result<Response, ClientError>;

    /// Closes an issue.
    async fn close(&self, repo: &str, number: u64) -> Result<Response, ClientError>;

    /// Locks the discussion on an issue.
    async fn lock(&self, repo: &str, number: u64) -> Result<Response, ClientError>;

    /// Unlocks the discussion on an issue.
    async fn unlock(&self, repo: &str, number: u64) -> Result<Response, ClientError>;
}

/// Operations on pull requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PullRequestService: Send + Sync {
    /// Looks up a pull request by number.
    async fn find(&self, repo: &str, number: u64) -> Reply<PullRequest>;

    /// Lists pull requests.
    async fn list(&self, repo: &str, opts: PullRequestListOptions) -> Reply<Vec<PullRequest>>;

    /// Lists the files touched by a pull request.
    async fn list_changes(
        &self,
        repo: &str,
        number: u64,
        opts: ListOptions,
    ) -> Reply<Vec<Change>>;

    /// Merges a pull request.
    async fn merge(&self, repo: &str, number: u64) -> Result<Response, ClientError>;

    /// Closes a pull request without merging.
    async fn close(&self, repo: &str, number: u64) -> Result<Response, ClientError>;

    /// Opens a pull request.
    async fn create(&self, repo: &str, input: &PullRequestInput) -> Reply<PullRequest>;
}

/// Operations on user accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// Returns the authenticated user.
    async fn find(&self) -> Reply<User>;

    /// Looks up a user by login.
    async fn find_login(&self, login: &str) -> Reply<User>;

    /// Returns the authenticated user's email address.
    async fn find_email(&self) -> Reply<String>;
}

/// Operations on organisation accounts.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OrganizationService: Send + Sync {
    /// Looks up an organisation by name.
    async fn find(&self, name: &str) -> Reply<Organization>;

    /// Lists organisations the authenticated user belongs to.
    async fn list(&self, opts: ListOptions) -> Reply<Vec<Organization>>;
}

/// Operations on repository file contents.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ContentService: Send + Sync {
    /// Fetches a file at a revision.
    async fn find(&self, repo: &str, path: &str, reference: &str) -> Reply<Content>;

    /// Creates a file.
    async fn create(
        &self,
        repo: &str,
        path: &str,
        input: &ContentInput,
    ) -> Result<Response, ClientError>;

    /// Replaces a file.
    async fn update(
        &self,
        repo: &str,
        path: &str,
        input: &ContentInput,
    ) -> Result<Response, ClientError>;

    /// Deletes a file.
    async fn delete(
        &self,
        repo: &str,
        path: &str,
        input: &ContentInput,
    ) -> Result<Response, ClientError>;
}

/// Builds web URLs for repository resources.
#[cfg_attr(test, mockall::automock)]
pub trait Linker: Send + Sync {
    /// Returns the web page of a reference: a tree for branches and tags,
    /// a pull request page, or a commit page depending on the reference.
    fn resource(&self, repo: &str, reference: &Reference) -> String;

    /// Returns the web page comparing two references.
    fn diff(&self, repo: &str, source: &Reference, target: &Reference) -> String;
}

/// Provider-neutral client bundling one service implementation per
/// resource.
///
/// Built by a driver factory such as [`crate::gitee::new`]; callers reach
/// provider operations through the service accessors and shared state
/// through [`Client::rate`].
#[derive(Clone)]
pub struct Client {
    pub(crate) base: Url,
    pub(crate) website: String,
    pub(crate) driver: Driver,
    pub(crate) git: Arc<dyn GitService>,
    pub(crate) repositories: Arc<dyn RepositoryService>,
    pub(crate) issues: Arc<dyn IssueService>,
    pub(crate) pull_requests: Arc<dyn PullRequestService>,
    pub(crate) users: Arc<dyn UserService>,
    pub(crate) organizations: Arc<dyn OrganizationService>,
    pub(crate) contents: Arc<dyn ContentService>,
    pub(crate) linker: Arc<dyn Linker>,
    pub(crate) rate: RateSnapshot,
}

impl Client {
    /// API base address, normalised to end with a slash.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base
    }

    /// Web address of the provider, e.g. `https://gitee.com/`.
    #[must_use]
    pub const fn website(&self) -> &str {
        self.website.as_str()
    }

    /// Which provider backs this client.
    #[must_use]
    pub const fn driver(&self) -> Driver {
        self.driver
    }

    /// Git data operations.
    #[must_use]
    pub fn git(&self) -> &dyn GitService {
        self.git.as_ref()
    }

    /// Repository, webhook, and status operations.
    #[must_use]
    pub fn repositories(&self) -> &dyn RepositoryService {
        self.repositories.as_ref()
    }

    /// Issue operations.
    #[must_use]
    pub fn issues(&self) -> &dyn IssueService {
        self.issues.as_ref()
    }

    /// Pull request operations.
    #[must_use]
    pub fn pull_requests(&self) -> &dyn PullRequestService {
        self.pull_requests.as_ref()
    }

    /// User account operations.
    #[must_use]
    pub fn users(&self) -> &dyn UserService {
        self.users.as_ref()
    }

    /// Organisation operations.
    #[must_use]
    pub fn organizations(&self) -> &dyn OrganizationService {
        self.organizations.as_ref()
    }

    /// Repository content operations.
    #[must_use]
    pub fn contents(&self) -> &dyn ContentService {
        self.contents.as_ref()
    }

    /// Web URL builder for repository resources.
    #[must_use]
    pub fn linker(&self) -> &dyn Linker {
        self.linker.as_ref()
    }

    /// Rate-limit counters observed on the most recent exchange, or
    /// `None` before the first call completes.
    #[must_use]
    pub fn rate(&self) -> Option<Rate> {
        self.rate.last()
    }

    /// Overrides the recorded rate-limit counters.
    pub fn set_rate(&self, rate: Rate) {
        self.rate.record(rate);
    }
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base", &self.base)
            .field("website", &self.website)
            .field("driver", &self.driver)
            .finish_non_exhaustive()
    }
}
