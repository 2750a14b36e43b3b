//! Failure classification over real sockets: no response versus error status.

mod common;

use std::time::Duration;

use placeholder_core::{ApiClient, ApiError, ClientConfig, RequestOptions, Services};
use serde_json::Value;

#[tokio::test]
async fn connection_refused_is_a_network_error() {
    // Bind to learn a free port, then release it so nothing is listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let api = Services::new(ApiClient::from_config(&common::config_for(addr)).unwrap());
    let err = api.users.list().await.unwrap_err();

    assert!(matches!(err, ApiError::Network { timed_out: false, .. }), "{err:?}");
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn silent_server_times_out() {
    // Accepts connections and never answers.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    let config = common::config_for(addr).with_timeout(Duration::from_millis(200));
    let client = ApiClient::from_config(&config).unwrap();
    let err = client.get::<Value>("/users", RequestOptions::new()).await.unwrap_err();

    assert!(err.is_timeout(), "{err:?}");
}

#[tokio::test]
async fn zero_timeout_waits_for_the_response() {
    let addr = common::spawn_fixture().await;
    let base_url = format!("http://{addr}");
    let config = ClientConfig::from_lookup(|key| match key {
        "BASE_URL" => Some(base_url.clone()),
        "TIMEOUT" => Some("0".to_string()),
        _ => None,
    })
    .unwrap();
    assert_eq!(config.timeout, None);

    let api = Services::from_config(&config).unwrap();
    let user = api.users.get(1).await.unwrap();

    assert_eq!(user.status, 200);
    assert_eq!(user.data.id, Some(1));
}

#[tokio::test]
async fn unknown_collection_is_an_http_status_error() {
    let addr = common::spawn_fixture().await;
    let client = ApiClient::from_config(&common::config_for(addr)).unwrap();

    let err = client.get::<Value>("/comments", RequestOptions::new()).await.unwrap_err();

    match err {
        ApiError::HttpStatus { status, body } => {
            assert_eq!(status, 404);
            assert_eq!(body, "{}");
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
}

#[tokio::test]
async fn rejected_body_is_a_client_error() {
    let addr = common::spawn_fixture().await;
    // Without a JSON content type the fixture refuses the body.
    let config = ClientConfig::with_base_url(&format!("http://{addr}"))
        .with_header("Content-Type", "text/plain")
        .unwrap();
    let client = ApiClient::from_config(&config).unwrap();

    let err = client
        .post::<_, Value>("/users", &serde_json::json!({"name": "x"}), RequestOptions::new())
        .await
        .unwrap_err();

    assert!(err.is_client_error(), "{err:?}");
}

#[tokio::test]
async fn per_call_header_reaches_the_server() {
    let addr = common::spawn_fixture().await;
    let client = ApiClient::from_config(&common::config_for(addr)).unwrap();

    // Overriding the content type for one call only.
    let err = client
        .post::<_, Value>(
            "/posts",
            &serde_json::json!({"title": "x"}),
            RequestOptions::new().header("content-type", "text/plain"),
        )
        .await
        .unwrap_err();
    assert_eq!(err.status(), Some(415));

    let ok: placeholder_core::ApiResponse<Value> = client
        .post("/posts", &serde_json::json!({"title": "x"}), RequestOptions::new())
        .await
        .unwrap();
    assert_eq!(ok.status, 201);
}
