//! Domain entities shared by every driver.
//!
//! These are plain data types: drivers decode provider payloads into
//! private wire structs and convert them into the entities here, so
//! nothing in this module carries serde derives or provider field names.
//! Missing wire fields surface as the obvious zero values (empty strings,
//! `false` flags, Unix-epoch timestamps).

use std::fmt;

use chrono::{DateTime, Utc};

/// Identity of the provider backing a [`super::Client`](crate::scm::Client).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Driver {
    /// The Gitee REST API.
    Gitee,
}

impl Driver {
    /// Lowercase provider name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gitee => "gitee",
        }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build or deployment state attached to a commit status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum State {
    /// The provider reported a state this crate does not recognise.
    #[default]
    Unknown,
    /// The build is queued.
    Pending,
    /// The build is executing.
    Running,
    /// The build passed.
    Success,
    /// The build failed.
    Failure,
    /// The build was cancelled.
    Canceled,
    /// The build errored before producing a result.
    Error,
}

/// Webhook event kinds a hook can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookEvent {
    /// Branch or tag creation.
    Create,
    /// Branch or tag deletion.
    Delete,
    /// Deployment lifecycle events.
    Deployment,
    /// Pushes to a branch.
    Push,
    /// Pull request lifecycle events.
    PullRequest,
    /// Review comments on a pull request.
    PullRequestReviewComment,
    /// Issue lifecycle events.
    Issues,
    /// Comments on an issue.
    IssueComment,
}

impl HookEvent {
    /// Canonical event name as it appears in webhook registrations.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Delete => "delete",
            Self::Deployment => "deployment",
            Self::Push => "push",
            Self::PullRequest => "pull_request",
            Self::PullRequestReviewComment => "pull_request_review_comment",
            Self::Issues => "issues",
            Self::IssueComment => "issue_comment",
        }
    }
}

impl fmt::Display for HookEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named git reference (branch or tag) together with its commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reference {
    /// Short name, e.g. `master`.
    pub name: String,
    /// Fully qualified path, e.g. `refs/heads/master`.
    pub path: String,
    /// Commit the reference points at.
    pub sha: String,
}

/// Author or committer identity on a commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// Provider login, where known.
    pub login: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// When the signature was made; Unix epoch when the provider omitted
    /// a timestamp.
    pub date: DateTime<Utc>,
    /// Avatar URL, where known.
    pub avatar: String,
}

impl Default for Signature {
    fn default() -> Self {
        Self {
            login: String::new(),
            name: String::new(),
            email: String::new(),
            date: DateTime::UNIX_EPOCH,
            avatar: String::new(),
        }
    }
}

/// A single commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    /// Commit digest.
    pub sha: String,
    /// Full commit message.
    pub message: String,
    /// Who authored the change.
    pub author: Signature,
    /// Who committed the change.
    pub committer: Signature,
}

/// A file touched by a commit or pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Change {
    /// Path of the file after the change.
    pub path: String,
    /// The file was created.
    pub added: bool,
    /// The file was renamed.
    pub renamed: bool,
    /// The file was deleted.
    pub deleted: bool,
}

/// Access the authenticated user holds on a repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Perm {
    /// May fetch and clone.
    pub pull: bool,
    /// May push.
    pub push: bool,
    /// May administer.
    pub admin: bool,
}

/// A repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Repository {
    /// Provider identifier, stringified.
    pub id: String,
    /// Owner login the repository lives under.
    pub namespace: String,
    /// Repository name.
    pub name: String,
    /// Permissions held by the authenticated user.
    pub perm: Perm,
    /// Default branch.
    pub branch: String,
    /// Whether the repository is private.
    pub private: bool,
    /// Web page of the repository.
    pub link: String,
    /// HTTP clone URL.
    pub clone: String,
    /// SSH clone URL.
    pub clone_ssh: String,
    /// Creation time.
    pub created: DateTime<Utc>,
    /// Last update time.
    pub updated: DateTime<Utc>,
}

/// A registered webhook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hook {
    /// Provider identifier, stringified; empty when the provider sent
    /// none.
    pub id: String,
    /// Delivery URL.
    pub target: String,
    /// Events the hook fires on.
    pub events: Vec<HookEvent>,
    /// Whether the hook is enabled.
    pub active: bool,
    /// Whether TLS verification is skipped on delivery.
    pub skip_verify: bool,
}

/// Parameters for creating or updating a webhook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookInput {
    /// Delivery URL.
    pub target: String,
    /// Shared secret presented on delivery.
    pub secret: String,
    /// Events the hook should fire on.
    pub events: HookEvents,
}

/// Event subscriptions requested for a webhook.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HookEvents {
    /// Branch events.
    pub branch: bool,
    /// Deployment events.
    pub deployment: bool,
    /// Issue lifecycle events.
    pub issue: bool,
    /// Issue comment events.
    pub issue_comment: bool,
    /// Pull request lifecycle events.
    pub pull_request: bool,
    /// Pull request comment events.
    pub pull_request_comment: bool,
    /// Push events.
    pub push: bool,
    /// Review comment events.
    pub review_comment: bool,
    /// Tag events.
    pub tag: bool,
}

/// A commit status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Status {
    /// Reported state.
    pub state: State,
    /// Status label, e.g. `continuous-integration/jenkins`.
    pub label: String,
    /// Human-readable description.
    pub desc: String,
    /// URL the status links to.
    pub target: String,
}

/// Parameters for creating a commit status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusInput {
    /// State to report.
    pub state: State,
    /// Status label.
    pub label: String,
    /// Human-readable description.
    pub desc: String,
    /// URL the status should link to.
    pub target: String,
}

/// A deployment status, doubling as the input when creating one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployStatus {
    /// Deployment number the status belongs to.
    pub number: i64,
    /// Reported state.
    pub state: State,
    /// Human-readable description.
    pub desc: String,
    /// URL of the build output.
    pub target: String,
    /// Environment name, e.g. `production`.
    pub environment: String,
    /// URL of the running environment.
    pub environment_url: String,
}

/// An issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// Issue number.
    pub number: u64,
    /// Title.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Web page of the issue.
    pub link: String,
    /// Label names attached to the issue.
    pub labels: Vec<String>,
    /// Whether the issue is closed.
    pub closed: bool,
    /// Whether the discussion is locked.
    pub locked: bool,
    /// Who opened the issue.
    pub author: Signature,
    /// Creation time.
    pub created: DateTime<Utc>,
    /// Last update time.
    pub updated: DateTime<Utc>,
}

/// Parameters for opening an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueInput {
    /// Title.
    pub title: String,
    /// Body text.
    pub body: String,
}

/// A comment on an issue or pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    /// Provider identifier.
    pub id: u64,
    /// Comment text.
    pub body: String,
    /// Who wrote the comment.
    pub author: Signature,
    /// Creation time.
    pub created: DateTime<Utc>,
    /// Last update time.
    pub updated: DateTime<Utc>,
}

/// Parameters for posting a comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentInput {
    /// Comment text.
    pub body: String,
}

/// A pull request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// Pull request number.
    pub number: u64,
    /// Title.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Head commit digest.
    pub sha: String,
    /// Synthetic reference path, e.g. `refs/pull/12/head`.
    pub ref_path: String,
    /// Source branch.
    pub source: String,
    /// Target branch.
    pub target: String,
    /// Web page of the pull request.
    pub link: String,
    /// Whether the pull request is closed.
    pub closed: bool,
    /// Whether the pull request was merged.
    pub merged: bool,
    /// Who opened the pull request.
    pub author: Signature,
    /// Creation time.
    pub created: DateTime<Utc>,
    /// Last update time.
    pub updated: DateTime<Utc>,
}

/// Parameters for opening a pull request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestInput {
    /// Title.
    pub title: String,
    /// Body text.
    pub body: String,
    /// Source branch.
    pub source: String,
    /// Target branch.
    pub target: String,
}

/// A user account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    /// Provider identifier, stringified.
    pub id: String,
    /// Login name.
    pub login: String,
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Avatar URL.
    pub avatar: String,
    /// Web page of the account.
    pub link: String,
}

/// An organisation account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Organization {
    /// Organisation name.
    pub name: String,
    /// Avatar URL.
    pub avatar: String,
}

/// Decoded contents of a file in a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Content {
    /// Path of the file within the repository.
    pub path: String,
    /// Raw file bytes.
    pub data: Vec<u8>,
    /// Blob digest of the file.
    pub sha: String,
}

/// Parameters for writing or deleting a file in a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentInput {
    /// Commit message to record the write under.
    pub message: String,
    /// Branch to commit to.
    pub branch: String,
    /// New file bytes.
    pub data: Vec<u8>,
    /// Blob digest being replaced; required for updates and deletes.
    pub sha: String,
}
