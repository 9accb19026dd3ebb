//! Error taxonomy shared by every driver.

use thiserror::Error;

use super::response::Response;

/// Errors raised while building a client or talking to a provider.
///
/// Provider and decode failures keep the parsed [`Response`] envelope so
/// callers can still inspect rate-limit and pagination state after a
/// failed call.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClientError {
    /// The base address could not be parsed as an absolute URL.
    #[error("invalid client URL: {0}")]
    InvalidUrl(String),

    /// An access token was blank or whitespace-only.
    #[error("access token is required")]
    MissingToken,

    /// The request could not be sent or no response was received.
    #[error("transport error: {message}")]
    Transport {
        /// Underlying transport failure, verbatim.
        message: String,
    },

    /// The provider answered with a status code above 300.
    ///
    /// The display form is the provider's own message so callers see
    /// exactly what the API said.
    #[error("{message}")]
    Provider {
        /// Message decoded from the provider's error body, empty when the
        /// body carried none.
        message: String,
        /// Envelope of the failed exchange.
        response: Box<Response>,
    },

    /// A success response body could not be decoded.
    #[error("decode error: {message}")]
    Decode {
        /// Underlying decoder failure.
        message: String,
        /// Envelope of the exchange whose body failed to decode.
        response: Box<Response>,
    },

    /// The provider has no way to express the requested operation.
    ///
    /// The Gitee driver supports its full facade surface; drivers for
    /// sparser providers return this from the gaps.
    #[error("operation not supported: {operation}")]
    NotSupported {
        /// Name of the unsupported operation.
        operation: String,
    },
}
