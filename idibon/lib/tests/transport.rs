use std::time::{Duration, Instant};

use idibon::{ApiError, ClientError, IdibonClient, ResponseError, RestMethod};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> IdibonClient {
    IdibonClient::builder("test-key")
        .base_url(server.uri())
        .unwrap()
        .build()
        .unwrap()
}

#[tokio::test]
async fn sends_auth_and_json_headers() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("authorization", "Basic dGVzdC1rZXk6"))
        .and(header("content-type", "application/json; charset=utf-8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"collections": []})))
        .expect(1)
        .mount(&server)
        .await;

    let value = client_for(&server).list_collections().await.unwrap();
    assert_eq!(value, json!({"collections": []}));

    let requests = server.received_requests().await.unwrap();
    let agent = requests[0].headers.get("user-agent").unwrap().to_str().unwrap();
    assert!(agent.starts_with("IdibonAPI:"), "unexpected user agent {agent}");
    assert!(agent.contains("-Rust:"));
}

#[tokio::test]
async fn get_without_body_sends_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/reviews/doc-1"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"document": {}})))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).get("/reviews/doc-1").await.unwrap();
}

#[tokio::test]
async fn null_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("null"))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .call_api(RestMethod::Post, "/reviews", Some(&json!({"a": 1})))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Response(ResponseError::UnexpectedNull { .. })));
}

#[tokio::test]
async fn empty_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = client_for(&server).get("/").await.unwrap_err();
    assert!(matches!(err, ApiError::Response(ResponseError::EmptyResponse)));
}

#[tokio::test]
async fn malformed_body_keeps_raw_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client_for(&server).get("/").await.unwrap_err();
    let ApiError::Response(response) = &err else {
        panic!("expected a response error, got {err:?}");
    };
    assert_eq!(response.raw_body(), Some("<html>oops</html>"));
}

#[tokio::test]
async fn error_status_with_plain_body_is_malformed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client_for(&server).get("/").await.unwrap_err();
    let ApiError::Response(response) = &err else {
        panic!("expected a response error, got {err:?}");
    };
    assert_eq!(response.raw_body(), Some("maintenance"));
}

#[tokio::test]
async fn error_status_with_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client_for(&server).get("/").await.unwrap_err();
    assert!(matches!(err, ApiError::Response(ResponseError::EmptyResponse)));
}

#[tokio::test]
async fn json_error_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"errors": ["bad scope"]})))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .call_api(RestMethod::Put, "/reviews", Some(&json!({})))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Client(ClientError::HttpStatus { status: 400, .. })
    ));
    assert_eq!(err.response_body().unwrap()["errors"][0], "bad scope");
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({}))
                .set_delay(Duration::from_millis(500)),
        )
        .mount(&server)
        .await;

    let client = IdibonClient::builder("test-key")
        .base_url(server.uri())
        .unwrap()
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let err = client.get("/").await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::Client(ClientError::Timeout { duration_ms: 50 })
    ));
}

async fn time_three_calls(max_sockets: usize) -> Duration {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"ok": true}))
                .set_delay(Duration::from_millis(150)),
        )
        .expect(3)
        .mount(&server)
        .await;

    let client = IdibonClient::builder("test-key")
        .base_url(server.uri())
        .unwrap()
        .max_sockets(max_sockets)
        .build()
        .unwrap();

    let started = Instant::now();
    let (a, b, c) = tokio::join!(client.get("/a"), client.get("/b"), client.get("/c"));
    let elapsed = started.elapsed();
    assert!(a.is_ok() && b.is_ok() && c.is_ok());
    elapsed
}

#[tokio::test]
async fn default_socket_limit_serializes_requests() {
    let elapsed = time_three_calls(1).await;
    assert!(elapsed >= Duration::from_millis(450), "finished in {elapsed:?}");
}

#[tokio::test]
async fn wider_socket_limit_overlaps_requests() {
    let elapsed = time_three_calls(3).await;
    assert!(elapsed < Duration::from_millis(450), "finished in {elapsed:?}");
}
