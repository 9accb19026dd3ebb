//! Gitee driver.
//!
//! Builds the provider-neutral [`Client`] against Gitee's `api/v5` REST
//! surface. [`new_default`] targets gitee.com; [`with_config`] adds
//! credentials, debug logging, and a request timeout:
//!
//! ```no_run
//! use gitee_scm::{AccessToken, GiteeConfig};
//!
//! # async fn example() -> Result<(), gitee_scm::ClientError> {
//! let token = AccessToken::new("6d671d8bc9264e2a94a9a28c14c9ca6f")?;
//! let client = gitee_scm::gitee::with_config(
//!     "https://gitee.com/api/v5",
//!     GiteeConfig::new().with_token(token),
//! )?;
//! let (user, _) = client.users().find().await?;
//! println!("authenticated as {}", user.login);
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Duration;

use url::Url;

use crate::scm::client::Client;
use crate::scm::error::ClientError;
use crate::scm::response::RateSnapshot;
use crate::scm::transport::{AccessToken, HttpTransport, Transport};
use crate::scm::types::Driver;

mod content;
mod dispatch;
mod envelope;
mod git;
mod issue;
mod linker;
mod org;
mod pr;
mod repo;
mod user;

use self::content::GiteeContentService;
use self::dispatch::Dispatcher;
use self::git::GiteeGitService;
use self::issue::GiteeIssueService;
use self::linker::GiteeLinker;
use self::org::GiteeOrganizationService;
use self::pr::GiteePullRequestService;
use self::repo::GiteeRepositoryService;
use self::user::GiteeUserService;

/// API address of the public gitee.com instance.
pub const DEFAULT_API_ADDRESS: &str = "https://gitee.com/api/v5";

/// Construction options for the Gitee client.
#[derive(Debug, Clone, Default)]
pub struct GiteeConfig {
    token: Option<AccessToken>,
    debug: bool,
    timeout: Option<Duration>,
}

impl GiteeConfig {
    /// Starts from an anonymous client with no timeout and no debug
    /// logging.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Authenticates every request with the given token.
    #[must_use]
    pub fn with_token(mut self, token: AccessToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Emits a `tracing` debug event for every exchange, request and
    /// response bodies included.
    #[must_use]
    pub const fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Bounds every request to the given duration.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// Builds an anonymous client for the given API address.
///
/// # Errors
///
/// Returns [`ClientError::InvalidUrl`] when the address does not parse as
/// a base URL, or [`ClientError::Transport`] when the HTTP client cannot
/// be constructed.
pub fn new(uri: &str) -> Result<Client, ClientError> {
    with_config(uri, GiteeConfig::new())
}

/// Builds an anonymous client for the public gitee.com API.
///
/// # Errors
///
/// Returns [`ClientError::Transport`] when the HTTP client cannot be
/// constructed.
pub fn new_default() -> Result<Client, ClientError> {
    new(DEFAULT_API_ADDRESS)
}

/// Builds a client for the given API address with explicit options.
///
/// # Errors
///
/// Returns [`ClientError::InvalidUrl`] when the address does not parse as
/// a base URL, or [`ClientError::Transport`] when the HTTP client cannot
/// be constructed.
pub fn with_config(uri: &str, config: GiteeConfig) -> Result<Client, ClientError> {
    let base = normalise_base(uri)?;
    let transport = HttpTransport::new(base.clone(), config.token, config.timeout)?;
    Ok(assemble(base, config.debug, Arc::new(transport)))
}

/// Builds a client on top of a caller-supplied transport.
///
/// Only [`GiteeConfig::with_debug`] applies here; authentication and
/// timeouts belong to the supplied transport.
///
/// # Errors
///
/// Returns [`ClientError::InvalidUrl`] when the address does not parse as
/// a base URL.
pub fn with_transport(
    uri: &str,
    config: &GiteeConfig,
    transport: Arc<dyn Transport>,
) -> Result<Client, ClientError> {
    let base = normalise_base(uri)?;
    Ok(assemble(base, config.debug, transport))
}

/// Parses the base address and guarantees a trailing slash so relative
/// resource paths resolve under it rather than replacing its last
/// segment.
fn normalise_base(uri: &str) -> Result<Url, ClientError> {
    let mut base =
        Url::parse(uri).map_err(|error| ClientError::InvalidUrl(format!("{uri}: {error}")))?;
    if base.cannot_be_a_base() {
        return Err(ClientError::InvalidUrl(format!("{uri}: not a base URL")));
    }
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    Ok(base)
}

/// Derives the web address from the API address by dropping the path,
/// e.g. `https://gitee.com/api/v5` becomes `https://gitee.com/`.
fn website_address(base: &Url) -> String {
    let scheme = base.scheme();
    let host = base.host_str().unwrap_or_default();
    let port = base.port().map_or_else(String::new, |n| format!(":{n}"));
    format!("{scheme}://{host}{port}/")
}

fn assemble(base: Url, debug: bool, transport: Arc<dyn Transport>) -> Client {
    let rate = RateSnapshot::new();
    let website = website_address(&base);
    let dispatcher = Arc::new(Dispatcher::new(transport, rate.clone(), debug));
    Client {
        base,
        website: website.clone(),
        driver: Driver::Gitee,
        git: Arc::new(GiteeGitService::new(Arc::clone(&dispatcher))),
        repositories: Arc::new(GiteeRepositoryService::new(Arc::clone(&dispatcher))),
        issues: Arc::new(GiteeIssueService::new(Arc::clone(&dispatcher))),
        pull_requests: Arc::new(GiteePullRequestService::new(Arc::clone(&dispatcher))),
        users: Arc::new(GiteeUserService::new(Arc::clone(&dispatcher))),
        organizations: Arc::new(GiteeOrganizationService::new(Arc::clone(&dispatcher))),
        contents: Arc::new(GiteeContentService::new(Arc::clone(&dispatcher))),
        linker: Arc::new(GiteeLinker::new(website)),
        rate,
    }
}
