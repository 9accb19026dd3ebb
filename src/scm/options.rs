//! Pagination and filter options for list operations.
//!
//! Each option type knows how to encode itself as a query string. The
//! encoders emit keys in a stable alphabetical order so request paths are
//! reproducible, and omit keys whose options were not set.

use url::form_urlencoded;

/// Plain pagination options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListOptions {
    /// Page number, one-based.
    pub page: Option<u32>,
    /// Page size.
    pub size: Option<u32>,
}

impl ListOptions {
    /// Encodes the options as `page`/`per_page` query parameters.
    #[must_use]
    pub fn query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        append_pagination(&mut query, self.page, self.size);
        query.finish()
    }
}

/// Pagination options for commit listings, with an optional starting
/// reference.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitListOptions {
    /// Page number, one-based.
    pub page: Option<u32>,
    /// Page size.
    pub size: Option<u32>,
    /// Branch, tag, or commit to list from.
    pub reference: Option<String>,
}

impl CommitListOptions {
    /// Encodes the options as `page`/`per_page`/`ref_name` query
    /// parameters.
    #[must_use]
    pub fn query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        append_pagination(&mut query, self.page, self.size);
        if let Some(reference) = &self.reference {
            query.append_pair("ref_name", reference);
        }
        query.finish()
    }
}

/// Pagination and state filters for issue listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IssueListOptions {
    /// Page number, one-based.
    pub page: Option<u32>,
    /// Page size.
    pub size: Option<u32>,
    /// Include open issues.
    pub open: bool,
    /// Include closed issues.
    pub closed: bool,
}

impl IssueListOptions {
    /// Encodes the options as `page`/`per_page`/`state` query parameters.
    #[must_use]
    pub fn query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        append_pagination(&mut query, self.page, self.size);
        if let Some(state) = state_filter(self.open, self.closed) {
            query.append_pair("state", state);
        }
        query.finish()
    }
}

/// Pagination and state filters for pull request listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PullRequestListOptions {
    /// Page number, one-based.
    pub page: Option<u32>,
    /// Page size.
    pub size: Option<u32>,
    /// Include open pull requests.
    pub open: bool,
    /// Include closed pull requests.
    pub closed: bool,
}

impl PullRequestListOptions {
    /// Encodes the options as `page`/`per_page`/`state` query parameters.
    #[must_use]
    pub fn query(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        append_pagination(&mut query, self.page, self.size);
        if let Some(state) = state_filter(self.open, self.closed) {
            query.append_pair("state", state);
        }
        query.finish()
    }
}

fn append_pagination(
    query: &mut form_urlencoded::Serializer<'_, String>,
    page: Option<u32>,
    size: Option<u32>,
) {
    if let Some(number) = page {
        query.append_pair("page", &number.to_string());
    }
    if let Some(count) = size {
        query.append_pair("per_page", &count.to_string());
    }
}

/// Maps the open/closed pair onto the provider's `state` filter. Asking
/// for both (or neither and then filtering nothing) follows the
/// convention that both flags mean `all` and neither means no filter.
const fn state_filter(open: bool, closed: bool) -> Option<&'static str> {
    match (open, closed) {
        (true, true) => Some("all"),
        (true, false) => Some("open"),
        (false, true) => Some("closed"),
        (false, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn list_options_encode_page_and_size() {
        let opts = ListOptions {
            page: Some(1),
            size: Some(30),
        };
        assert_eq!(opts.query(), "page=1&per_page=30");
    }

    #[test]
    fn unset_list_options_encode_empty() {
        assert_eq!(ListOptions::default().query(), "");
    }

    #[test]
    fn commit_options_encode_the_reference() {
        let opts = CommitListOptions {
            page: Some(1),
            size: Some(30),
            reference: Some("master".to_owned()),
        };
        assert_eq!(opts.query(), "page=1&per_page=30&ref_name=master");
    }

    #[rstest]
    #[case::both(true, true, "page=1&per_page=30&state=all")]
    #[case::open_only(true, false, "page=1&per_page=30&state=open")]
    #[case::closed_only(false, true, "page=1&per_page=30&state=closed")]
    #[case::neither(false, false, "page=1&per_page=30")]
    fn issue_options_map_flags_onto_the_state_filter(
        #[case] open: bool,
        #[case] closed: bool,
        #[case] expected: &str,
    ) {
        let opts = IssueListOptions {
            page: Some(1),
            size: Some(30),
            open,
            closed,
        };
        assert_eq!(opts.query(), expected);
    }

    #[test]
    fn pull_request_options_share_the_state_filter() {
        let opts = PullRequestListOptions {
            page: None,
            size: None,
            open: true,
            closed: true,
        };
        assert_eq!(opts.query(), "state=all");
    }

    #[test]
    fn query_values_are_percent_encoded() {
        let opts = CommitListOptions {
            page: None,
            size: None,
            reference: Some("feature branch".to_owned()),
        };
        assert_eq!(opts.query(), "ref_name=feature+branch");
    }
}
