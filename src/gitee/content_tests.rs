use http::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::scm::types::ContentInput;
use crate::scm::{Client, ClientError};

fn client(server: &MockServer) -> Client {
    crate::gitee::new(&server.uri()).expect("client should build against the mock server")
}

fn content_input() -> ContentInput {
    ContentInput {
        message: "create README".to_owned(),
        branch: "master".to_owned(),
        data: b"Hello World".to_vec(),
        sha: String::new(),
    }
}

#[tokio::test]
async fn find_decodes_the_base64_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/hello-world/contents/README"))
        .and(query_param("ref", "master"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "path": "README",
            "content": "SGVsbG8gV29ybGQ=",
            "sha": "980a0d5f19a64b4b30a87d4206aade58726b60e3"
        })))
        .mount(&server)
        .await;

    let scm = client(&server);
    let (content, _) = scm
        .contents()
        .find("octocat/hello-world", "README", "master")
        .await
        .expect("find should succeed");

    assert_eq!(content.path, "README");
    assert_eq!(content.data, b"Hello World");
    assert_eq!(content.sha, "980a0d5f19a64b4b30a87d4206aade58726b60e3");
}

#[tokio::test]
async fn malformed_base64_surfaces_as_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/hello-world/contents/README"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "path": "README",
            "content": "not base64!!",
            "sha": "980a0d5f19a64b4b30a87d4206aade58726b60e3"
        })))
        .mount(&server)
        .await;

    let scm = client(&server);
    let error = scm
        .contents()
        .find("octocat/hello-world", "README", "master")
        .await
        .expect_err("garbage content should fail");

    let ClientError::Decode { response, .. } = &error else {
        panic!("expected a decode error, got {error:?}");
    };
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn create_posts_the_encoded_file() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/octocat/hello-world/contents/README"))
        .and(body_partial_json(json!({
            "content": "SGVsbG8gV29ybGQ=",
            "message": "create README",
            "branch": "master"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({})))
        .mount(&server)
        .await;

    let scm = client(&server);
    let response = scm
        .contents()
        .create("octocat/hello-world", "README", &content_input())
        .await
        .expect("create should succeed");

    assert_eq!(response.status, StatusCode::CREATED);
}

#[tokio::test]
async fn update_carries_the_blob_sha() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/repos/octocat/hello-world/contents/README"))
        .and(body_partial_json(json!({
            "content": "SGVsbG8gV29ybGQ=",
            "message": "create README",
            "branch": "master",
            "sha": "980a0d5f19a64b4b30a87d4206aade58726b60e3"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let scm = client(&server);
    let mut input = content_input();
    input.sha = "980a0d5f19a64b4b30a87d4206aade58726b60e3".to_owned();
    let response = scm
        .contents()
        .update("octocat/hello-world", "README", &input)
        .await
        .expect("update should succeed");

    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn delete_passes_commit_details_in_the_query() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/repos/octocat/hello-world/contents/README"))
        .and(query_param("message", "create README"))
        .and(query_param("branch", "master"))
        .and(query_param("sha", "980a0d5f19a64b4b30a87d4206aade58726b60e3"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let scm = client(&server);
    let mut input = content_input();
    input.sha = "980a0d5f19a64b4b30a87d4206aade58726b60e3".to_owned();
    let response = scm
        .contents()
        .delete("octocat/hello-world", "README", &input)
        .await
        .expect("delete should succeed");

    assert_eq!(response.status, StatusCode::NO_CONTENT);
}
