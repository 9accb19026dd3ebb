//! User service backed by the Gitee user endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use http::Method;
use serde::Deserialize;

use crate::scm::client::UserService;
use crate::scm::error::ClientError;
use crate::scm::response::Response;
use crate::scm::types::{Signature, User};

use super::dispatch::Dispatcher;

pub(crate) struct GiteeUserService {
    dispatcher: Arc<Dispatcher>,
}

impl GiteeUserService {
    pub(crate) const fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl UserService for GiteeUserService {
    async fn find(&self) -> Result<(User, Response), ClientError> {
        let (out, response): (ApiUser, Response) = self
            .dispatcher
            .request(Method::GET, "user", None::<&()>)
            .await?;
        Ok((out.into(), response))
    }

    async fn find_login(&self, login: &str) -> Result<(User, Response), ClientError> {
        let path = format!("users/{login}");
        let (out, response): (ApiUser, Response) = self
            .dispatcher
            .request(Method::GET, &path, None::<&()>)
            .await?;
        Ok((out.into(), response))
    }

    async fn find_email(&self) -> Result<(String, Response), ClientError> {
        let (user, response) = self.find().await?;
        Ok((user.email, response))
    }
}

/// Account shape embedded in several Gitee payloads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct ApiUser {
    pub(super) id: u64,
    pub(super) login: String,
    pub(super) name: String,
    pub(super) email: String,
    pub(super) avatar_url: String,
    pub(super) html_url: String,
}

impl From<ApiUser> for User {
    fn from(from: ApiUser) -> Self {
        Self {
            id: from.id.to_string(),
            login: from.login,
            name: from.name,
            email: from.email,
            avatar: from.avatar_url,
            link: from.html_url,
        }
    }
}

/// Signature of the account attached to issues, comments, and pull
/// requests. Gitee embeds no timestamp there, so the date stays at the
/// Unix epoch.
pub(super) fn signature(from: ApiUser) -> Signature {
    Signature {
        login: from.login,
        name: from.name,
        email: from.email,
        avatar: from.avatar_url,
        ..Signature::default()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::scm::client::Client;

    use super::*;

    fn api_user() -> serde_json::Value {
        json!({
            "id": 1,
            "login": "octocat",
            "name": "monalisa octocat",
            "email": "octocat@gitee.com",
            "avatar_url": "https://gitee.com/assets/avatar.png",
            "html_url": "https://gitee.com/octocat",
        })
    }

    fn client(server: &MockServer) -> Client {
        crate::gitee::new(&server.uri()).expect("client should build")
    }

    #[tokio::test]
    async fn find_returns_the_authenticated_user() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(api_user()))
            .mount(&server)
            .await;

        let (user, _) = client(&server)
            .users()
            .find()
            .await
            .expect("lookup should succeed");
        assert_eq!(user.id, "1");
        assert_eq!(user.login, "octocat");
        assert_eq!(user.avatar, "https://gitee.com/assets/avatar.png");
        assert_eq!(user.link, "https://gitee.com/octocat");
    }

    #[tokio::test]
    async fn find_login_addresses_the_user_by_path() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/octocat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(api_user()))
            .mount(&server)
            .await;

        let (user, _) = client(&server)
            .users()
            .find_login("octocat")
            .await
            .expect("lookup should succeed");
        assert_eq!(user.name, "monalisa octocat");
    }

    #[tokio::test]
    async fn find_email_projects_the_authenticated_user() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(api_user()))
            .mount(&server)
            .await;

        let (email, _) = client(&server)
            .users()
            .find_email()
            .await
            .expect("lookup should succeed");
        assert_eq!(email, "octocat@gitee.com");
    }

    #[test]
    fn an_empty_wire_payload_still_converts() {
        let user: User = ApiUser::default().into();
        assert_eq!(user.id, "0");
        assert!(user.login.is_empty());
        assert!(user.email.is_empty());
    }

    #[test]
    fn signatures_carry_no_timestamp() {
        let signed = signature(ApiUser {
            login: "octocat".to_owned(),
            name: "monalisa octocat".to_owned(),
            ..ApiUser::default()
        });
        assert_eq!(signed.login, "octocat");
        assert_eq!(signed.date, chrono::DateTime::UNIX_EPOCH);
    }
}
