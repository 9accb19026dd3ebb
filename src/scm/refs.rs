//! Helpers for working with git reference paths.
//!
//! Drivers use these to translate between the short names callers pass
//! around and the fully qualified `refs/...` paths providers expect.

/// Strips a `refs/heads/` or `refs/tags/` prefix from a reference.
///
/// Names without a recognised prefix come back unchanged.
///
/// ```
/// use gitee_scm::scm::refs::trim_ref;
///
/// assert_eq!(trim_ref("refs/heads/master"), "master");
/// assert_eq!(trim_ref("refs/tags/v1.0.0"), "v1.0.0");
/// assert_eq!(trim_ref("master"), "master");
/// ```
#[must_use]
pub fn trim_ref(reference: &str) -> &str {
    let stripped = reference.strip_prefix("refs/heads/").unwrap_or(reference);
    stripped.strip_prefix("refs/tags/").unwrap_or(stripped)
}

/// Qualifies a short name with the given prefix.
///
/// Names already under `refs/` are returned unchanged, and a trailing
/// slash on the prefix is tolerated.
///
/// ```
/// use gitee_scm::scm::refs::expand_ref;
///
/// assert_eq!(expand_ref("master", "refs/heads/"), "refs/heads/master");
/// assert_eq!(expand_ref("refs/tags/v1.0.0", "refs/heads/"), "refs/tags/v1.0.0");
/// ```
#[must_use]
pub fn expand_ref(name: &str, prefix: &str) -> String {
    if name.starts_with("refs/") {
        return name.to_owned();
    }
    let trimmed = prefix.trim_end_matches('/');
    format!("{trimmed}/{name}")
}

/// Reports whether the reference names a branch.
#[must_use]
pub fn is_branch(reference: &str) -> bool {
    reference.starts_with("refs/heads/")
}

/// Reports whether the reference names a tag.
#[must_use]
pub fn is_tag(reference: &str) -> bool {
    reference.starts_with("refs/tags/")
}

/// Reports whether the reference names a pull request head.
#[must_use]
pub fn is_pull_request(reference: &str) -> bool {
    reference.starts_with("refs/pull/") || reference.starts_with("refs/merge-requests/")
}

/// Extracts the pull request number from a reference path.
///
/// Accepts both `refs/pull/<n>/head` and `refs/merge-requests/<n>/head`
/// spellings; anything else yields `None`.
#[must_use]
pub fn extract_pull_request(reference: &str) -> Option<u64> {
    const PREFIXES: [&str; 2] = ["refs/pull/", "refs/merge-requests/"];
    PREFIXES.iter().find_map(|prefix| {
        reference
            .strip_prefix(prefix)
            .and_then(|rest| rest.split('/').next())
            .and_then(|segment| segment.parse().ok())
    })
}
