//! Repository content service.

use std::sync::Arc;

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::Method;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::scm::client::ContentService;
use crate::scm::error::ClientError;
use crate::scm::response::Response;
use crate::scm::types::{Content, ContentInput};

use super::dispatch::Dispatcher;

pub(crate) struct GiteeContentService {
    dispatcher: Arc<Dispatcher>,
}

impl GiteeContentService {
    pub(crate) const fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl ContentService for GiteeContentService {
    async fn find(
        &self,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<(Content, Response), ClientError> {
        let endpoint = format!("repos/{repo}/contents/{path}?ref={reference}");
        let (out, response): (ApiContent, Response) = self
            .dispatcher
            .request(Method::GET, &endpoint, None::<&()>)
            .await?;
        match STANDARD.decode(out.content.as_bytes()) {
            Ok(data) => Ok((
                Content {
                    path: out.path,
                    data,
                    sha: out.sha,
                },
                response,
            )),
            Err(error) => Err(ClientError::Decode {
                message: format!("failed to decode file content: {error}"),
                response: Box::new(response),
            }),
        }
    }

    async fn create(
        &self,
        repo: &str,
        path: &str,
        input: &ContentInput,
    ) -> Result<Response, ClientError> {
        let endpoint = format!("repos/{repo}/contents/{path}");
        let body = ApiContentInput {
            content: STANDARD.encode(&input.data),
            message: input.message.clone(),
            branch: input.branch.clone(),
            sha: String::new(),
        };
        self.dispatcher
            .request_unit(Method::POST, &endpoint, Some(&body))
            .await
    }

    async fn update(
        &self,
        repo: &str,
        path: &str,
        input: &ContentInput,
    ) -> Result<Response, ClientError> {
        let endpoint = format!("repos/{repo}/contents/{path}");
        let body = ApiContentInput {
            content: STANDARD.encode(&input.data),
            message: input.message.clone(),
            branch: input.branch.clone(),
            sha: input.sha.clone(),
        };
        self.dispatcher
            .request_unit(Method::PUT, &endpoint, Some(&body))
            .await
    }

    async fn delete(
        &self,
        repo: &str,
        path: &str,
        input: &ContentInput,
    ) -> Result<Response, ClientError> {
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("message", &input.message)
            .append_pair("branch", &input.branch)
            .append_pair("sha", &input.sha)
            .finish();
        let endpoint = format!("repos/{repo}/contents/{path}?{query}");
        self.dispatcher
            .request_unit(Method::DELETE, &endpoint, None::<&()>)
            .await
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ApiContent {
    path: String,
    content: String,
    sha: String,
}

#[derive(Debug, Clone, Default, Serialize)]
struct ApiContentInput {
    content: String,
    message: String,
    branch: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    sha: String,
}

#[cfg(test)]
#[path = "content_tests.rs"]
mod tests;
