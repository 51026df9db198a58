use std::time::{Duration, Instant};

use centrifugo_api::{
    BatchRequest, BlockUserRequest, BroadcastRequest, Client, Command, Config, ConnectionsRequest,
    DisconnectRequest, Error, HistoryRequest, InvalidateUserTokensRequest, PresenceStatsRequest,
    PublishRequest, RefreshRequest, RetryPolicy, StreamPosition, SubscribeRequest,
    UnsubscribeRequest, UpdateUserStatusRequest, UserStatus,
};
use httpmock::prelude::*;
use reqwest::StatusCode;
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

const API_KEY: &str = "test-api-key";

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn client_for(server: &MockServer) -> Client {
    let config = Config::new(API_KEY)
        .with_base_url(server.url("/api"))
        .with_retry(RetryPolicy::none());
    Client::new(config).unwrap()
}

/// A local address with nothing listening on it.
fn closed_port_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{port}/api")
}

/// Serves one connection: reads the request, then writes `response` and
/// closes the socket.
async fn serve_once(response: &'static [u8]) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        loop {
            if stream.read_buf(&mut request).await.unwrap() == 0 {
                break;
            }
            if request_complete(&request) {
                break;
            }
        }
        stream.write_all(response).await.unwrap();
        stream.flush().await.unwrap();
    });
    format!("http://127.0.0.1:{port}/api")
}

fn request_complete(request: &[u8]) -> bool {
    let Some(end) = request.windows(4).position(|w| w == b"\r\n\r\n") else {
        return false;
    };
    let head = request.get(..end).unwrap_or_default();
    let head = String::from_utf8_lossy(head).to_ascii_lowercase();
    let length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(0);
    request.len() >= end + 4 + length
}

// ---------------------------------------------------------------------------
// Request shape
// ---------------------------------------------------------------------------

#[tokio::test]
async fn publish_posts_json_with_api_key() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/publish")
                .header("x-api-key", API_KEY)
                .header("content-type", "application/json")
                .json_body(json!({"channel": "news", "data": {"text": "hi"}}));
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"result": {"offset": 7, "epoch": "xyz"}}));
        })
        .await;

    let client = client_for(&server);
    let req = PublishRequest::new("news", json!({"text": "hi"})).unwrap();
    let resp = client.publication().publish(&req).await.unwrap();

    mock.assert_calls_async(1).await;
    assert!(!resp.has_error());
    let result = resp.into_result().unwrap();
    assert_eq!(result.offset, Some(7));
    assert_eq!(result.epoch.as_deref(), Some("xyz"));
}

#[tokio::test]
async fn endpoints_post_to_their_paths() {
    let server = MockServer::start_async().await;
    let client = client_for(&server);

    let cases: Vec<(&str, serde_json::Value)> = vec![
        ("broadcast", json!({"channels": ["a", "b"], "data": {"n": 1}})),
        ("subscribe", json!({"channel": "news", "user": "42"})),
        ("unsubscribe", json!({"user": "42", "channel": "news"})),
        ("disconnect", json!({"user": "42"})),
        ("refresh", json!({"user": "42", "expired": true})),
        ("presence", json!({"channel": "news"})),
        ("presence_stats", json!({"channel": "news"})),
        ("history", json!({"channel": "news", "limit": 10, "since": {"offset": 1, "epoch": "e"}})),
        ("history_remove", json!({"channel": "news"})),
        ("channels", json!({"pattern": "chat:*"})),
        ("connections", json!({"user": "42"})),
        ("info", json!({})),
        ("block_user", json!({"user": "42", "expire_at": 1800000000})),
        ("unblock_user", json!({"user": "42"})),
        ("update_user_status", json!({"users": [{"user": "42", "state": "away"}]})),
        ("get_user_status", json!({"users": ["42", "43"]})),
        ("delete_user_status", json!({"users": ["42"]})),
        ("revoke_token", json!({"uid": "jti-1"})),
        ("invalidate_user_tokens", json!({"user": "42", "channel": "news"})),
    ];

    let mut mocks = Vec::new();
    for (path, body) in cases {
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(format!("/api/{path}"))
                    .header("x-api-key", API_KEY)
                    .json_body(body.clone());
                then.status(200)
                    .header("content-type", "application/json")
                    .json_body(json!({"result": {}}));
            })
            .await;
        mocks.push(mock);
    }

    let broadcast = BroadcastRequest::new(["a", "b"], json!({"n": 1})).unwrap();
    assert!(!client.publication().broadcast(&broadcast).await.unwrap().has_error());

    let conn = client.connection();
    conn.subscribe(&SubscribeRequest::new("42", "news").unwrap())
        .await
        .unwrap();
    conn.unsubscribe(&UnsubscribeRequest::new("42", "news").unwrap())
        .await
        .unwrap();
    conn.disconnect(&DisconnectRequest::new("42").unwrap())
        .await
        .unwrap();
    conn.refresh(&RefreshRequest::new("42").unwrap().expired(true))
        .await
        .unwrap();

    client.presence().presence_of("news").await.unwrap();
    client
        .presence()
        .presence_stats(&PresenceStatsRequest::new("news").unwrap())
        .await
        .unwrap();

    let history = HistoryRequest::new("news")
        .unwrap()
        .limit(10)
        .since(StreamPosition::new(1, "e"));
    client.history().history(&history).await.unwrap();
    client
        .history()
        .history_remove(&centrifugo_api::HistoryRemoveRequest::new("news").unwrap())
        .await
        .unwrap();

    client.channels().matching("chat:*").await.unwrap();
    client
        .stats()
        .connections(&ConnectionsRequest::for_user("42"))
        .await
        .unwrap();
    client.stats().info().await.unwrap();

    client
        .user_block()
        .block_user(&BlockUserRequest::new("42").unwrap().expire_at(1800000000))
        .await
        .unwrap();
    client.user_block().unblock("42").await.unwrap();

    let status = UserStatus::new("42").unwrap().with_state("away");
    client
        .user_status()
        .update_user_status(&UpdateUserStatusRequest::new(vec![status]).unwrap())
        .await
        .unwrap();
    client.user_status().get(["42", "43"]).await.unwrap();
    client.user_status().delete(["42"]).await.unwrap();

    client.token().revoke("jti-1").await.unwrap();
    client
        .token()
        .invalidate_user_tokens(
            &InvalidateUserTokensRequest::new("42")
                .unwrap()
                .for_channel("news"),
        )
        .await
        .unwrap();

    for mock in &mocks {
        mock.assert_calls_async(1).await;
    }
}

#[tokio::test]
async fn extra_headers_are_sent() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/api/info")
                .header("x-request-source", "ops");
            then.status(200).json_body(json!({"result": {"nodes": []}}));
        })
        .await;

    let config = Config::new(API_KEY)
        .with_base_url(server.url("/api/"))
        .with_header("x-request-source", "ops");
    let client = Client::new(config).unwrap();
    let info = client.stats().info().await.unwrap().into_result().unwrap();

    mock.assert_calls_async(1).await;
    assert!(info.nodes.is_empty());
}

#[tokio::test]
async fn invalid_request_is_rejected_before_sending() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/presence");
            then.status(200).json_body(json!({"result": {}}));
        })
        .await;

    let client = client_for(&server);
    let err = client.presence().presence_of("  ").await.unwrap_err();

    assert!(matches!(err, Error::InvalidRequest(_)));
    mock.assert_calls_async(0).await;
}

// ---------------------------------------------------------------------------
// Error decoding
// ---------------------------------------------------------------------------

#[tokio::test]
async fn error_envelope_becomes_api_error() {
    let server = MockServer::start_async().await;
    let body = r#"{"error":{"code":109,"message":"unknown channel"}}"#;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/publish");
            then.status(400)
                .header("content-type", "application/json")
                .body(body);
        })
        .await;

    let client = client_for(&server);
    let req = PublishRequest::new("nope", json!({})).unwrap();
    let err = client.publication().publish(&req).await.unwrap_err();

    match err {
        Error::Api(e) => {
            assert_eq!(e.code(), 109);
            assert_eq!(e.message(), "unknown channel");
            assert_eq!(e.status(), StatusCode::BAD_REQUEST);
            assert_eq!(e.body(), body);
        }
        other => panic!("expected decoded server error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_error_body_falls_back_to_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/history");
            then.status(401);
        })
        .await;

    let client = client_for(&server);
    let err = client
        .history()
        .history(&HistoryRequest::new("news").unwrap())
        .await
        .unwrap_err();

    match err {
        Error::Status { method, status, .. } => {
            assert_eq!(method, "history");
            assert_eq!(status, StatusCode::UNAUTHORIZED);
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_error_body_falls_back_to_status() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/channels");
            then.status(502).body("<html>bad gateway</html>");
        })
        .await;

    let client = client_for(&server);
    let err = client.channels().all().await.unwrap_err();

    assert!(matches!(err, Error::Status { .. }));
    assert_eq!(err.status(), Some(StatusCode::BAD_GATEWAY));
    assert_eq!(err.code(), None);
}

#[tokio::test]
async fn truncated_error_body_falls_back_with_empty_body() {
    let base = serve_once(
        b"HTTP/1.1 500 Internal Server Error\r\n\
          content-type: application/json\r\n\
          content-length: 100\r\n\
          \r\n\
          {\"error\":",
    )
    .await;
    let config = Config::new(API_KEY)
        .with_base_url(base)
        .with_retry(RetryPolicy::none());
    let client = Client::new(config).unwrap();

    let err = client.stats().info().await.unwrap_err();

    match err {
        Error::Status {
            method,
            status,
            body,
        } => {
            assert_eq!(method, "info");
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert!(body.is_empty(), "body: {body:?}");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn in_band_error_is_returned_in_response() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/api/presence_stats");
            then.status(200)
                .json_body(json!({"error": {"code": 108, "message": "not available"}}));
        })
        .await;

    let client = client_for(&server);
    let resp = client.presence().stats_of("news").await.unwrap();

    assert!(resp.has_error());
    match resp.into_result() {
        Err(Error::Reply(e)) => assert_eq!(e.code, 108),
        other => panic!("expected in-band error, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Batch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn batch_sends_commands_and_reads_top_level_replies() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/batch").json_body(json!({
                "commands": [
                    {"publish": {"channel": "news", "data": {"n": 1}}},
                    {"presence_stats": {"channel": "missing"}}
                ],
                "parallel": true
            }));
            then.status(200).json_body(json!({
                "replies": [
                    {"publish": {"offset": 1, "epoch": "e"}},
                    {"error": {"code": 102, "message": "unknown channel"}}
                ]
            }));
        })
        .await;

    let client = client_for(&server);
    let req = BatchRequest::new([
        Command::from(PublishRequest::new("news", json!({"n": 1})).unwrap()),
        Command::from(PresenceStatsRequest::new("missing").unwrap()),
    ])
    .parallel(true);
    let resp = client.batch().batch(&req).await.unwrap();

    mock.assert_calls_async(1).await;
    assert_eq!(resp.replies.len(), 2);
    assert_eq!(resp.replies[0].publish.as_ref().unwrap().offset, Some(1));
    assert!(resp.replies[1].has_error());
    assert_eq!(resp.error_count(), 1);
}

// ---------------------------------------------------------------------------
// Retry
// ---------------------------------------------------------------------------

#[tokio::test]
async fn http_errors_are_not_retried() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/info");
            then.status(500);
        })
        .await;

    let config = Config::new(API_KEY)
        .with_base_url(server.url("/api"))
        .with_retry(RetryPolicy {
            max_attempts: 3,
            initial_interval: Duration::from_millis(10),
            max_interval: Duration::from_millis(10),
        });
    let client = Client::new(config).unwrap();
    let err = client.stats().info().await.unwrap_err();

    mock.assert_calls_async(1).await;
    assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
}

#[tokio::test]
async fn retry_after_responses_are_retried() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/info");
            then.status(503).header("Retry-After", "0");
        })
        .await;

    let config = Config::new(API_KEY)
        .with_base_url(server.url("/api"))
        .with_retry(RetryPolicy {
            max_attempts: 3,
            initial_interval: Duration::from_millis(10),
            max_interval: Duration::from_millis(10),
        });
    let client = Client::new(config).unwrap();
    let err = client.stats().info().await.unwrap_err();

    mock.assert_calls_async(3).await;
    assert!(matches!(err, Error::Status { .. }));
    assert_eq!(err.status(), Some(StatusCode::SERVICE_UNAVAILABLE));
}

#[tokio::test]
async fn decoded_server_errors_ignore_retry_after() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/info");
            then.status(429)
                .header("Retry-After", "0")
                .header("content-type", "application/json")
                .body(r#"{"error":{"code":111,"message":"too many requests"}}"#);
        })
        .await;

    let config = Config::new(API_KEY)
        .with_base_url(server.url("/api"))
        .with_retry(RetryPolicy {
            max_attempts: 3,
            initial_interval: Duration::from_millis(10),
            max_interval: Duration::from_millis(10),
        });
    let client = Client::new(config).unwrap();
    let err = client.stats().info().await.unwrap_err();

    mock.assert_calls_async(1).await;
    assert!(matches!(err, Error::Api(_)));
    assert_eq!(err.code(), Some(111));
}

#[tokio::test]
async fn connect_failures_are_retried_then_reported() {
    let config = Config::new(API_KEY)
        .with_base_url(closed_port_url())
        .with_retry(RetryPolicy {
            max_attempts: 3,
            initial_interval: Duration::from_millis(50),
            max_interval: Duration::from_millis(50),
        });
    let client = Client::new(config).unwrap();

    let start = Instant::now();
    let err = client.stats().info().await.unwrap_err();

    // Two backoff sleeps between three attempts.
    assert!(start.elapsed() >= Duration::from_millis(100));
    match err {
        Error::Http(e) => assert!(e.is_connect()),
        other => panic!("expected transport error, got {other:?}"),
    }
}
