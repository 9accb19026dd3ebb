//! Response envelope returned alongside every payload.
//!
//! Drivers parse rate-limit and pagination headers into these values so
//! callers never touch raw headers for the common cases, while the full
//! header map stays available for anything provider-specific.

use std::sync::{Arc, PoisonError, RwLock};

use http::{HeaderMap, StatusCode};

/// Rate-limit counters reported by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rate {
    /// Requests permitted in the current window.
    pub limit: u64,
    /// Requests remaining in the current window.
    pub remaining: u64,
    /// Unix time at which the window resets.
    pub reset: u64,
}

/// Page numbers extracted from a `Link` header.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageLinks {
    /// First page of the listing.
    pub first: Option<u32>,
    /// Page before the current one.
    pub prev: Option<u32>,
    /// Page after the current one.
    pub next: Option<u32>,
    /// Last page of the listing.
    pub last: Option<u32>,
}

/// Envelope describing one provider exchange.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    /// Request identifier echoed by the provider, empty when absent.
    pub id: String,
    /// HTTP status of the exchange.
    pub status: StatusCode,
    /// Complete response headers.
    pub header: HeaderMap,
    /// Rate-limit counters parsed from the headers.
    pub rate: Rate,
    /// Pagination links parsed from the headers.
    pub page: PageLinks,
}

/// Shared record of the most recently observed [`Rate`].
///
/// The dispatcher records the counters after every exchange and the
/// client exposes them, so clones hand out the same underlying slot. A
/// poisoned lock is absorbed rather than propagated; the counters are
/// advisory and a panicking writer cannot corrupt a `Copy` value.
#[derive(Debug, Clone, Default)]
pub struct RateSnapshot {
    inner: Arc<RwLock<Option<Rate>>>,
}

impl RateSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the counters observed on the latest exchange.
    pub fn record(&self, rate: Rate) {
        let mut guard = self
            .inner
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Some(rate);
    }

    /// Returns the most recently recorded counters, or `None` before any
    /// exchange has completed.
    #[must_use]
    pub fn last(&self) -> Option<Rate> {
        *self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_starts_empty() {
        assert_eq!(RateSnapshot::new().last(), None);
    }

    #[test]
    fn snapshot_returns_the_latest_recording() {
        let snapshot = RateSnapshot::new();
        snapshot.record(Rate {
            limit: 60,
            remaining: 59,
            reset: 1_512_076_018,
        });
        snapshot.record(Rate {
            limit: 60,
            remaining: 58,
            reset: 1_512_076_018,
        });
        assert_eq!(
            snapshot.last(),
            Some(Rate {
                limit: 60,
                remaining: 58,
                reset: 1_512_076_018,
            })
        );
    }

    #[test]
    fn clones_share_the_same_slot() {
        let snapshot = RateSnapshot::new();
        let observer = snapshot.clone();
        snapshot.record(Rate {
            limit: 5000,
            remaining: 4999,
            reset: 1,
        });
        assert_eq!(observer.last().map(|rate| rate.remaining), Some(4999));
    }

    #[test]
    fn response_default_is_an_ok_envelope() {
        let response = Response::default();
        assert_eq!(response.status, StatusCode::OK);
        assert!(response.id.is_empty());
        assert_eq!(response.page, PageLinks::default());
    }
}
