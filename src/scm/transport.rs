//! Transport seam between drivers and the network.
//!
//! Drivers build provider-relative [`Request`] values and hand them to a
//! [`Transport`]. The production implementation is [`HttpTransport`],
//! which resolves paths against the API base address and injects the
//! access token; tests substitute their own implementation to exercise
//! drivers without a server.

use std::time::Duration;

use async_trait::async_trait;
use http::header::AUTHORIZATION;
use http::{HeaderMap, HeaderValue, Method, StatusCode};
use url::Url;

use super::error::ClientError;

/// A validated personal access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Creates a token after trimming surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingToken`] when the trimmed token is
    /// empty.
    pub fn new(token: impl AsRef<str>) -> Result<Self, ClientError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ClientError::MissingToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        self.value()
    }
}

/// One provider-relative HTTP request.
#[derive(Debug, Clone, Default)]
pub struct Request {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the API base address, query string included.
    pub path: String,
    /// Extra headers to send.
    pub headers: HeaderMap,
    /// Serialised request body, if any.
    pub body: Option<Vec<u8>>,
}

/// A fully buffered HTTP response.
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    /// HTTP status.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Complete response body.
    pub body: Vec<u8>,
}

/// Executes provider-relative requests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends the request and buffers the complete response.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] when the exchange fails before
    /// a response is received.
    async fn execute(&self, request: Request) -> Result<RawResponse, ClientError>;
}

/// [`Transport`] backed by a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base: Url,
    authorization: Option<HeaderValue>,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Builds a transport rooted at the given base address.
    ///
    /// The token, when present, is sent as `Authorization: token <value>`
    /// on every request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Transport`] when the underlying HTTP client
    /// cannot be constructed or the token is not a valid header value.
    pub fn new(
        base: Url,
        token: Option<AccessToken>,
        timeout: Option<Duration>,
    ) -> Result<Self, ClientError> {
        let authorization = token
            .map(|secret| {
                let mut value = HeaderValue::from_str(&format!("token {}", secret.value()))
                    .map_err(|error| ClientError::Transport {
                        message: format!("access token is not a valid header value: {error}"),
                    })?;
                value.set_sensitive(true);
                Ok::<_, ClientError>(value)
            })
            .transpose()?;
        let mut builder = reqwest::Client::builder();
        if let Some(limit) = timeout {
            builder = builder.timeout(limit);
        }
        let client = builder.build().map_err(|error| ClientError::Transport {
            message: format!("failed to build HTTP client: {error}"),
        })?;
        Ok(Self {
            base,
            authorization,
            client,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: Request) -> Result<RawResponse, ClientError> {
        let url = self
            .base
            .join(&request.path)
            .map_err(|error| ClientError::InvalidUrl(error.to_string()))?;
        let mut builder = self
            .client
            .request(request.method, url)
            .headers(request.headers);
        if let Some(authorization) = &self.authorization {
            builder = builder.header(AUTHORIZATION, authorization.clone());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        let response = builder
            .send()
            .await
            .map_err(|error| ClientError::Transport {
                message: error.to_string(),
            })?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|error| ClientError::Transport {
                message: error.to_string(),
            })?
            .to_vec();
        Ok(RawResponse {
            status,
            headers,
            body,
        })
    }
}
