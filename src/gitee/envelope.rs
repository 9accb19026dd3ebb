//! Parsing of Gitee response headers into the envelope.
//!
//! Header values that are missing or malformed never fail a call; they
//! simply leave the corresponding envelope field at its zero value.

use http::HeaderMap;
use http::header::LINK;
use url::Url;

use crate::scm::response::{PageLinks, Rate, Response};
use crate::scm::transport::RawResponse;

/// Builds the envelope for one exchange.
pub(crate) fn parse(raw: &RawResponse) -> Response {
    Response {
        id: header_text(&raw.headers, "x-request-id").unwrap_or_default(),
        status: raw.status,
        header: raw.headers.clone(),
        rate: parse_rate(&raw.headers),
        page: parse_page_links(&raw.headers),
    }
}

fn header_text(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(ToOwned::to_owned)
}

fn parse_rate(headers: &HeaderMap) -> Rate {
    Rate {
        limit: counter(headers, "X-RateLimit-Limit"),
        remaining: counter(headers, "X-RateLimit-Remaining"),
        reset: counter(headers, "X-RateLimit-Reset"),
    }
}

fn counter(headers: &HeaderMap, name: &str) -> u64 {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .and_then(|text| text.parse().ok())
        .unwrap_or_default()
}

/// Extracts page numbers from the `Link` header.
///
/// Each entry looks like `<https://…?page=2>; rel="next"`; the page is
/// taken from the linked URL's `page` query parameter.
fn parse_page_links(headers: &HeaderMap) -> PageLinks {
    let mut page = PageLinks::default();
    let Some(link) = headers.get(LINK).and_then(|value| value.to_str().ok()) else {
        return page;
    };
    for entry in link.split(',') {
        let mut segments = entry.split(';');
        let target = segments.next().unwrap_or_default().trim();
        let Some(number) = page_number(target) else {
            continue;
        };
        for segment in segments {
            match segment.trim() {
                r#"rel="first""# => page.first = Some(number),
                r#"rel="prev""# => page.prev = Some(number),
                r#"rel="next""# => page.next = Some(number),
                r#"rel="last""# => page.last = Some(number),
                _ => {}
            }
        }
    }
    page
}

fn page_number(target: &str) -> Option<u32> {
    let trimmed = target.trim_start_matches('<').trim_end_matches('>');
    let url = Url::parse(trimmed).ok()?;
    url.query_pairs()
        .find(|(name, _)| name == "page")
        .and_then(|(_, value)| value.parse().ok())
}
