//! Request dispatch shared by every Gitee service.
//!
//! The dispatcher serialises request bodies, hands the exchange to the
//! [`Transport`], parses the envelope, records rate-limit counters, and
//! decodes payloads. Statuses above 300 become
//! [`ClientError::Provider`] carrying whatever message the API supplied.

use std::sync::Arc;

use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::scm::error::ClientError;
use crate::scm::response::{RateSnapshot, Response};
use crate::scm::transport::{RawResponse, Request, Transport};

use super::envelope;

pub(crate) struct Dispatcher {
    transport: Arc<dyn Transport>,
    rate: RateSnapshot,
    debug: bool,
}

impl Dispatcher {
    pub(crate) const fn new(
        transport: Arc<dyn Transport>,
        rate: RateSnapshot,
        debug: bool,
    ) -> Self {
        Self {
            transport,
            rate,
            debug,
        }
    }

    /// Sends a request and decodes the JSON response payload.
    pub(crate) async fn request<B, T>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(T, Response), ClientError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let (raw, response) = self.exchange(method, path, body).await?;
        match serde_json::from_slice(&raw.body) {
            Ok(payload) => Ok((payload, response)),
            Err(error) => Err(ClientError::Decode {
                message: error.to_string(),
                response: Box::new(response),
            }),
        }
    }

    /// Sends a request whose response body carries nothing worth
    /// decoding.
    pub(crate) async fn request_unit<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<Response, ClientError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let (_, response) = self.exchange(method, path, body).await?;
        Ok(response)
    }

    async fn exchange<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
    ) -> Result<(RawResponse, Response), ClientError>
    where
        B: Serialize + Sync + ?Sized,
    {
        let payload = body
            .map(|value| {
                serde_json::to_vec(value).map_err(|error| ClientError::Transport {
                    message: format!("failed to encode request body: {error}"),
                })
            })
            .transpose()?;
        let mut headers = HeaderMap::new();
        if payload.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        let dump = if self.debug { payload.clone() } else { None };
        let raw = self
            .transport
            .execute(Request {
                method: method.clone(),
                path: path.to_owned(),
                headers,
                body: payload,
            })
            .await?;
        let response = envelope::parse(&raw);
        self.rate.record(response.rate);
        if self.debug {
            tracing::debug!(
                method = %method,
                path,
                status = response.status.as_u16(),
                request_body = %String::from_utf8_lossy(dump.as_deref().unwrap_or_default()),
                response_body = %String::from_utf8_lossy(&raw.body),
                "gitee exchange"
            );
        }
        if raw.status.as_u16() > 300 {
            return Err(ClientError::Provider {
                message: provider_message(&raw.body),
                response: Box::new(response),
            });
        }
        Ok((raw, response))
    }
}

#[derive(Debug, Default, serde::Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
}

/// Pulls the provider's message out of a failure body. Bodies that do
/// not decode as the error shape yield an empty message.
fn provider_message(body: &[u8]) -> String {
    serde_json::from_slice::<ApiError>(body)
        .map(|error| error.message)
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
