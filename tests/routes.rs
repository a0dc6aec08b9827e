mod common;

use std::sync::Arc;
use std::time::Duration;

use axum_test::TestServer;
use http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::Value;

use hn_frontend::hn::mock::MockTransport;
use hn_frontend::hn::{Item, StoryType, User};
use hn_frontend::http::{router, AppState};
use hn_frontend::Config;

use common::{client_with, comment, story};

fn server(transport: &Arc<MockTransport>) -> TestServer {
    let client = client_with(transport, 2);
    let state = AppState::new(client, Config::default());
    TestServer::new(router(state)).unwrap()
}

fn story_ids(body: &Value) -> Vec<u64> {
    body["stories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|story| story["id"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_front_page_is_top_stories() {
    let transport = Arc::new(MockTransport::new());
    transport.set_story_ids(StoryType::Top, &[1, 2, 3]);
    for id in 1..=3 {
        transport.add_item(story(id));
    }
    let server = server(&transport);

    let response = server.get("/").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["story_type"], "top");
    assert_eq!(body["page"], 1);
    assert_eq!(body["next_page"], 2);
    assert_eq!(story_ids(&body), vec![1, 2]);
    assert_eq!(body["stories"][0]["rank"], 1);
    assert_eq!(body["stories"][0]["host"], "example.com");
}

#[tokio::test]
async fn test_story_pages_by_type() {
    let transport = Arc::new(MockTransport::new());
    transport.set_story_ids(StoryType::Show, &[7, 8, 9]);
    for id in 7..=9 {
        transport.add_item(story(id));
    }
    let server = server(&transport);

    let response = server.get("/show").add_query_param("page", "2").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["story_type"], "show");
    assert_eq!(story_ids(&body), vec![9]);
    assert_eq!(body["stories"][0]["rank"], 3);
}

#[tokio::test]
async fn test_bad_page_falls_back_to_first() {
    let transport = Arc::new(MockTransport::new());
    transport.set_story_ids(StoryType::New, &[1]);
    transport.add_item(story(1));
    let server = server(&transport);

    let response = server.get("/new").add_query_param("page", "-3").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["page"], 1);
    assert_eq!(story_ids(&body), vec![1]);
}

#[tokio::test]
async fn test_page_past_end_is_empty_not_error() {
    let transport = Arc::new(MockTransport::new());
    transport.set_story_ids(StoryType::Job, &[1, 2]);
    let server = server(&transport);

    let response = server.get("/job").add_query_param("page", "9").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(story_ids(&body), Vec::<u64>::new());
}

#[tokio::test]
async fn test_largest_page_number_is_empty_not_panic() {
    let transport = Arc::new(MockTransport::new());
    transport.set_story_ids(StoryType::Top, &[1, 2, 3]);
    transport.add_user(User {
        id: "pg".to_string(),
        submitted: vec![1, 2, 3],
        ..Default::default()
    });
    let server = server(&transport);
    let page = usize::MAX.to_string();

    let response = server.get("/").add_query_param("page", &page).await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["page"], u64::MAX);
    assert_eq!(body["next_page"], u64::MAX);
    assert_eq!(story_ids(&body), Vec::<u64>::new());

    let response = server
        .get("/user")
        .add_query_param("id", "pg")
        .add_query_param("view", "comments")
        .add_query_param("page", &page)
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["next_page"], u64::MAX);
    assert_eq!(body["comments"], serde_json::json!([]));
}

#[tokio::test]
async fn test_upstream_failure_is_500() {
    let transport = Arc::new(MockTransport::new());
    transport.fail(MockTransport::story_ids_url(StoryType::Ask));
    let server = server(&transport);

    let response = server.get("/ask").expect_failure().await;
    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let transport = Arc::new(MockTransport::with_latency(Duration::from_secs(5)));
    transport.set_story_ids(StoryType::Top, &[1]);
    let config = Config {
        request_timeout: Duration::from_millis(50),
        ..Config::default()
    };
    let state = AppState::new(client_with(&transport, 2), config);
    let server = TestServer::new(router(state)).unwrap();

    let response = server.get("/").expect_failure().await;
    response.assert_status(StatusCode::REQUEST_TIMEOUT);
}

#[tokio::test]
async fn test_item_with_comments() {
    let transport = Arc::new(MockTransport::new());
    transport.add_item(Item {
        kids: vec![43, 44],
        ..story(42)
    });
    transport.add_item(comment(43, 42, &[]));
    transport.add_item(Item {
        dead: true,
        ..comment(44, 42, &[])
    });
    let server = server(&transport);

    let response = server.get("/item").add_query_param("id", "42").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["id"], 42);
    let comments = body["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["id"], 43);
}

#[tokio::test]
async fn test_invalid_item_id_is_400() {
    let transport = Arc::new(MockTransport::new());
    let server = server(&transport);

    let response = server
        .get("/item")
        .add_query_param("id", "abc")
        .expect_failure()
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let response = server.get("/item").expect_failure().await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(transport.total_calls(), 0);
}

#[tokio::test]
async fn test_user_profile_with_comments_view() {
    let transport = Arc::new(MockTransport::new());
    transport.add_user(User {
        id: "pg".to_string(),
        karma: 155_000,
        created: 1_160_418_111,
        submitted: vec![1, 2, 3, 4],
        ..Default::default()
    });
    transport.add_item(story(1));
    transport.add_item(comment(2, 1, &[]));
    transport.add_item(comment(3, 1, &[]));
    transport.add_item(comment(4, 1, &[]));
    let server = server(&transport);

    let response = server
        .get("/user")
        .add_query_param("id", "pg")
        .add_query_param("view", "comments")
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["karma"], 155_000);
    assert_eq!(body["created_date"], "October 9, 2006");
    assert_eq!(body["view"], "comments");
    let ids: Vec<_> = body["comments"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_u64().unwrap())
        .collect();
    assert_eq!(ids, vec![2, 3]);
    assert!(body.get("submissions").is_none());
}

#[tokio::test]
async fn test_user_profile_without_view_fetches_no_items() {
    let transport = Arc::new(MockTransport::new());
    transport.add_user(User {
        id: "pg".to_string(),
        submitted: vec![1, 2],
        ..Default::default()
    });
    let server = server(&transport);

    let response = server.get("/user").add_query_param("id", "pg").await;
    response.assert_status_ok();

    assert_eq!(transport.total_calls(), 1);
}

#[tokio::test]
async fn test_missing_user_id_is_400() {
    let transport = Arc::new(MockTransport::new());
    let server = server(&transport);

    let response = server.get("/user").expect_failure().await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_user_is_404() {
    let transport = Arc::new(MockTransport::new());
    let server = server(&transport);

    let response = server
        .get("/user")
        .add_query_param("id", "ghost")
        .expect_failure()
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_path() {
    let transport = Arc::new(MockTransport::new());
    let server = server(&transport);

    let response = server.get("/best").expect_failure().await;
    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_text("Unknown.");
}

#[tokio::test]
async fn test_health() {
    let transport = Arc::new(MockTransport::new());
    let server = server(&transport);

    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}
