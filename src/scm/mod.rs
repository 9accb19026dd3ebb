//! Provider-independent source-control-management surface.
//!
//! Everything a caller touches lives here: plain domain entities produced
//! by driver codecs, list options with their query encodings, git
//! reference helpers, the response envelope with rate-limit bookkeeping,
//! the [`Transport`] seam drivers dispatch through, and the service traits
//! the [`Client`] shell bundles. Driver modules depend on this module,
//! never the other way round.

pub mod client;
pub mod error;
pub mod options;
pub mod refs;
pub mod response;
pub mod transport;
pub mod types;

pub use client::{
    Client, ContentService, GitService, IssueService, Linker, OrganizationService,
    PullRequestService, RepositoryService, UserService,
};
pub use error::ClientError;
pub use options::{CommitListOptions, IssueListOptions, ListOptions, PullRequestListOptions};
pub use response::{PageLinks, Rate, RateSnapshot, Response};
pub use transport::{AccessToken, HttpTransport, RawResponse, Request, Transport};
pub use types::{
    Change, Comment, CommentInput, Commit, Content, ContentInput, DeployStatus, Driver, Hook,
    HookEvent, HookEvents, HookInput, Issue, IssueInput, Organization, Perm, PullRequest,
    PullRequestInput, Reference, Repository, Signature, State, Status, StatusInput, User,
};
