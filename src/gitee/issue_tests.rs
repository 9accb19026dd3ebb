use chrono::{DateTime, Utc};
use http::StatusCode;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::scm::types::{CommentInput, IssueInput};
use crate::scm::{Client, IssueListOptions, ListOptions};

fn client(server: &MockServer) -> Client {
    crate::gitee::new(&server.uri()).expect("client should build against the mock server")
}

fn api_issue() -> serde_json::Value {
    json!({
        "number": 1,
        "title": "Found a bug",
        "body": "I'm having a problem with this.",
        "state": "open",
        "html_url": "https://gitee.com/mirrors/diaspora/issues/1",
        "discussion_locked": true,
        "labels": [{"name": "bug"}, {"name": "confirmed"}],
        "user": {
            "id": 1,
            "login": "janedoe",
            "name": "Jane Doe",
            "email": "janedoe@example.com",
            "avatar_url": "https://gitee.com/assets/avatar.png",
            "html_url": "https://gitee.com/janedoe"
        },
        "created_at": "2017-07-08T16:18:44+08:00",
        "updated_at": "2017-07-08T16:18:44+08:00"
    })
}

fn api_note() -> serde_json::Value {
    json!({
        "id": 302,
        "body": "lgtm",
        "user": {
            "id": 1,
            "login": "janedoe",
            "name": "Jane Doe"
        },
        "created_at": "2017-07-08T16:18:44+08:00",
        "updated_at": "2017-07-08T16:18:44+08:00"
    })
}

fn fixture_date() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2017-07-08T16:18:44+08:00")
        .expect("fixture date should parse")
        .with_timezone(&Utc)
}

#[tokio::test]
async fn find_decodes_the_issue() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/mirrors/diaspora/issues/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(api_issue()))
        .mount(&server)
        .await;

    let scm = client(&server);
    let (issue, _) = scm
        .issues()
        .find("mirrors/diaspora", 1)
        .await
        .expect("find should succeed");

    assert_eq!(issue.number, 1);
    assert_eq!(issue.title, "Found a bug");
    assert_eq!(issue.body, "I'm having a problem with this.");
    assert_eq!(issue.link, "https://gitee.com/mirrors/diaspora/issues/1");
    assert_eq!(issue.labels, vec!["bug".to_owned(), "confirmed".to_owned()]);
    assert!(!issue.closed);
    assert!(issue.locked);
    assert_eq!(issue.author.login, "janedoe");
    assert_eq!(issue.author.name, "Jane Doe");
    assert_eq!(issue.created, fixture_date());
}

#[tokio::test]
async fn closed_states_flip_the_closed_flag() {
    let server = MockServer::start().await;
    let mut fixture = api_issue();
    fixture["state"] = json!("closed");
    Mock::given(method("GET"))
        .and(path("/repos/mirrors/diaspora/issues/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(fixture))
        .mount(&server)
        .await;

    let scm = client(&server);
    let (issue, _) = scm
        .issues()
        .find("mirrors/diaspora", 1)
        .await
        .expect("find should succeed");

    assert!(issue.closed);
}

#[tokio::test]
async fn find_comment_decodes_the_note() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/mirrors/diaspora/issues/2/notes/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(api_note()))
        .mount(&server)
        .await;

    let scm = client(&server);
    let (comment, _) = scm
        .issues()
        .find_comment("mirrors/diaspora", 2, 1)
        .await
        .expect("find_comment should succeed");

    assert_eq!(comment.id, 302);
    assert_eq!(comment.body, "lgtm");
    assert_eq!(comment.author.login, "janedoe");
    assert_eq!(comment.updated, fixture_date());
}

#[tokio::test]
async fn list_filters_on_the_combined_state() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/mirrors/diaspora/issues"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "30"))
        .and(query_param("state", "all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([api_issue()])))
        .mount(&server)
        .await;

    let scm = client(&server);
    let opts = IssueListOptions {
        page: Some(1),
        size: Some(30),
        open: true,
        closed: true,
    };
    let (issues, _) = scm
        .issues()
        .list("mirrors/diaspora", opts)
        .await
        .expect("list should succeed");

    assert_eq!(issues.len(), 1);
}

#[tokio::test]
async fn list_comments_pages_through_notes() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/mirrors/diaspora/issues/1/notes"))
        .and(query_param("page", "1"))
        .and(query_param("per_page", "30"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([api_note()])))
        .mount(&server)
        .await;

    let scm = client(&server);
    let opts = ListOptions {
        page: Some(1),
        size: Some(30),
    };
    let (comments, _) = scm
        .issues()
        .list_comments("mirrors/diaspora", 1, opts)
        .await
        .expect("list_comments should succeed");

    assert_eq!(comments.len(), 1);
    assert_eq!(comments.first().map(|c| c.id), Some(302));
}

#[tokio::test]
async fn create_posts_the_title_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/mirrors/diaspora/issues"))
        .and(body_partial_json(json!({
            "title": "Found a bug",
            "body": "I'm having a problem with this."
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(api_issue()))
        .mount(&server)
        .await;

    let scm = client(&server);
    let input = IssueInput {
        title: "Found a bug".to_owned(),
        body: "I'm having a problem with this.".to_owned(),
    };
    let (issue, response) = scm
        .issues()
        .create("mirrors/diaspora", &input)
        .await
        .expect("create should succeed");

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(issue.title, "Found a bug");
}

#[tokio::test]
async fn create_comment_sends_the_note_as_a_query_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/mirrors/diaspora/issues/1/notes"))
        .and(query_param("body", "lgtm"))
        .respond_with(ResponseTemplate::new(201).set_body_json(api_note()))
        .mount(&server)
        .await;

    let scm = client(&server);
    let input = CommentInput {
        body: "lgtm".to_owned(),
    };
    let (comment, _) = scm
        .issues()
        .create_comment("mirrors/diaspora", 1, &input)
        .await
        .expect("create_comment should succeed");

    assert_eq!(comment.body, "lgtm");
}

#[tokio::test]
async fn comment_text_is_percent_encoded_into_the_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/mirrors/diaspora/issues/1/notes"))
        .and(query_param("body", "needs work & tests"))
        .respond_with(ResponseTemplate::new(201).set_body_json(api_note()))
        .mount(&server)
        .await;

    let scm = client(&server);
    let input = CommentInput {
        body: "needs work & tests".to_owned(),
    };
    scm.issues()
        .create_comment("mirrors/diaspora", 1, &input)
        .await
        .expect("create_comment should succeed");
}

#[tokio::test]
async fn delete_comment_issues_a_bare_delete() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/repos/mirrors/diaspora/issues/2/notes/1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let scm = client(&server);
    let response = scm
        .issues()
        .delete_comment("mirrors/diaspora", 2, 1)
        .await
        .expect("delete_comment should succeed");

    assert_eq!(response.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn close_sends_the_state_event() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/repos/mirrors/diaspora/issues/1"))
        .and(query_param("state_event", "close"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let scm = client(&server);
    let response = scm
        .issues()
        .close("mirrors/diaspora", 1)
        .await
        .expect("close should succeed");

    assert_eq!(response.status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn lock_and_unlock_toggle_the_discussion_flag() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/repos/mirrors/diaspora/issues/1"))
        .and(query_param("discussion_locked", "true"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/repos/mirrors/diaspora/issues/2"))
        .and(query_param("discussion_locked", "false"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let scm = client(&server);
    scm.issues()
        .lock("mirrors/diaspora", 1)
        .await
        .expect("lock should succeed");
    scm.issues()
        .unlock("mirrors/diaspora", 2)
        .await
        .expect("unlock should succeed");
}

#[tokio::test]
async fn empty_listings_stay_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/mirrors/diaspora/issues"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let scm = client(&server);
    let (issues, _) = scm
        .issues()
        .list("mirrors/diaspora", IssueListOptions::default())
        .await
        .expect("list should succeed");

    assert!(issues.is_empty());
}
