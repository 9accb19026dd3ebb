//! Organisation service backed by the Gitee org endpoints.

use std::sync::Arc;

use async_trait::async_trait;
use http::Method;
use serde::Deserialize;

use crate::scm::client::OrganizationService;
use crate::scm::error::ClientError;
use crate::scm::options::ListOptions;
use crate::scm::response::Response;
use crate::scm::types::Organization;

use super::dispatch::Dispatcher;

pub(crate) struct GiteeOrganizationService {
    dispatcher: Arc<Dispatcher>,
}

impl GiteeOrganizationService {
    pub(crate) const fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }
}

#[async_trait]
impl OrganizationService for GiteeOrganizationService {
    async fn find(&self, name: &str) -> Result<(Organization, Response), ClientError> {
        let path = format!("orgs/{name}");
        let (out, response): (ApiOrganization, Response) = self
            .dispatcher
            .request(Method::GET, &path, None::<&()>)
            .await?;
        Ok((out.into(), response))
    }

    async fn list(&self, opts: ListOptions) -> Result<(Vec<Organization>, Response), ClientError> {
        let path = format!("user/orgs?{}", opts.query());
        let (out, response): (Vec<ApiOrganization>, Response) = self
            .dispatcher
            .request(Method::GET, &path, None::<&()>)
            .await?;
        Ok((out.into_iter().map(Into::into).collect(), response))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ApiOrganization {
    login: String,
    avatar_url: String,
}

impl From<ApiOrganization> for Organization {
    fn from(from: ApiOrganization) -> Self {
        Self {
            name: from.login,
            avatar: from.avatar_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::scm::client::Client;

    use super::*;

    fn client(server: &MockServer) -> Client {
        crate::gitee::new(&server.uri()).expect("client should build")
    }

    #[tokio::test]
    async fn find_fetches_the_named_organisation() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/orgs/gitee"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "login": "gitee",
                "avatar_url": "https://gitee.com/assets/gitee.png",
            })))
            .mount(&server)
            .await;

        let (org, _) = client(&server)
            .organizations()
            .find("gitee")
            .await
            .expect("lookup should succeed");
        assert_eq!(org.name, "gitee");
        assert_eq!(org.avatar, "https://gitee.com/assets/gitee.png");
    }

    #[tokio::test]
    async fn list_pages_through_the_viewer_memberships() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/orgs"))
            .and(query_param("page", "1"))
            .and(query_param("per_page", "30"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{ "login": "gitee", "avatar_url": "" }])),
            )
            .mount(&server)
            .await;

        let opts = ListOptions {
            page: Some(1),
            size: Some(30),
        };
        let (orgs, _) = client(&server)
            .organizations()
            .list(opts)
            .await
            .expect("listing should succeed");
        assert_eq!(orgs.len(), 1);
        assert_eq!(orgs.first().map(|org| org.name.as_str()), Some("gitee"));
    }

    #[test]
    fn an_empty_listing_converts_to_an_empty_collection() {
        let orgs: Vec<Organization> = Vec::<ApiOrganization>::new()
            .into_iter()
            .map(Into::into)
            .collect();
        assert!(orgs.is_empty());
    }
}
