//! End-to-end routing tests against mock backend services.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use httpmock::prelude::*;
use reqwest::Client;
use serde_json::{Value, json};
use tower::ServiceExt;

use ivor_core::{GatewayConfig, ServiceRegistry};
use ivor_gateway::router;

fn config_with(entries: Vec<(&str, String)>) -> Arc<GatewayConfig> {
    Arc::new(GatewayConfig {
        registry: ServiceRegistry::new(
            entries
                .into_iter()
                .map(|(n, u)| (n.to_string(), u))
                .collect(),
        ),
        ..GatewayConfig::with_defaults()
    })
}

async fn post_json(config: Arc<GatewayConfig>, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router(config, Client::new())
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get_json(config: Arc<GatewayConfig>, uri: &str) -> (StatusCode, Value) {
    let response = router(config, Client::new())
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn single_service_reply_carries_routing_metadata() {
    let core = MockServer::start_async().await;
    core.mock_async(|when, then| {
        when.method(POST).path("/api/chat");
        then.status(200)
            .json_body(json!({ "response": "community resources near you" }));
    })
    .await;

    let config = config_with(vec![("ivor-core", core.base_url())]);
    let (status, body) = post_json(
        config,
        "/api/chat",
        json!({ "message": "hello", "userId": "u-7" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "community resources near you");
    assert_eq!(body["routedVia"], "ivor-api-gateway");
    assert_eq!(body["targetService"], "ivor-core");
}

#[tokio::test]
async fn explicit_service_selection_is_honored() {
    let social = MockServer::start_async().await;
    social
        .mock_async(|when, then| {
            when.method(POST).path("/api/chat");
            then.status(200).json_body(json!({ "response": "boosting it" }));
        })
        .await;

    let config = config_with(vec![
        ("ivor-core", "http://127.0.0.1:9".to_string()),
        ("ivor-social", social.base_url()),
    ]);
    let (status, body) = post_json(
        config,
        "/api/chat",
        json!({ "message": "hi", "service": "ivor-social" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["targetService"], "ivor-social");
}

#[tokio::test]
async fn upstream_error_status_is_mirrored() {
    let core = MockServer::start_async().await;
    core.mock_async(|when, then| {
        when.method(POST).path("/api/chat");
        then.status(503);
    })
    .await;

    let config = config_with(vec![("ivor-core", core.base_url())]);
    let (status, body) = post_json(config, "/api/chat", json!({ "message": "hi" })).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Service responded with error");
    assert_eq!(body["status"], 503);
    assert_eq!(body["targetService"], "ivor-core");
}

#[tokio::test]
async fn unreachable_service_returns_bad_gateway() {
    let config = config_with(vec![("ivor-core", "http://127.0.0.1:9".to_string())]);
    let (status, body) = post_json(config, "/api/chat", json!({ "message": "hi" })).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "Failed to reach target service");
    assert_eq!(body["targetService"], "ivor-core");
}

#[tokio::test]
async fn orchestrated_echoes_explicit_services_and_stays_200() {
    // No backends listening at all: every query fails, the call still
    // succeeds with zero responses.
    let config = config_with(vec![("ivor-core", "http://127.0.0.1:9".to_string())]);
    let (status, body) = post_json(
        config,
        "/api/chat/orchestrated",
        json!({ "message": "hi", "services": ["ivor-core", "ivor-unknown"] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let queried: Vec<String> = serde_json::from_value(body["queriedServices"].clone()).unwrap();
    assert_eq!(queried, vec!["ivor-core", "ivor-unknown"]);
    assert_eq!(body["totalResponses"], 0);
    assert_eq!(body["sessionId"], "default");
    assert_eq!(body["userId"], "anonymous");
}

#[tokio::test]
async fn orchestrated_mutual_aid_reaches_organizing_service() {
    let organizing = MockServer::start_async().await;
    let chat_mock = organizing
        .mock_async(|when, then| {
            when.method(POST).path("/api/chat");
            then.status(200)
                .json_body(json!({ "response": "local mutual aid networks" }));
        })
        .await;

    let config = config_with(vec![
        ("ivor-core", "http://127.0.0.1:9".to_string()),
        ("ivor-organizing", organizing.base_url()),
    ]);
    let (status, body) = post_json(
        config,
        "/api/chat/orchestrated",
        json!({ "message": "how do I join a mutual aid group?" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let queried: Vec<String> = serde_json::from_value(body["queriedServices"].clone()).unwrap();
    assert!(queried.contains(&"ivor-organizing".to_string()));
    assert_eq!(body["totalResponses"], 1);
    chat_mock.assert_async().await;

    let total = body["totalResponses"].as_u64().unwrap() as usize;
    assert!(total <= queried.len());
}

#[tokio::test]
async fn status_fans_out_and_tolerates_dead_services() {
    let healthy = MockServer::start_async().await;
    healthy
        .mock_async(|when, then| {
            when.method(GET).path("/api/health");
            then.status(200).json_body(json!({ "status": "healthy" }));
        })
        .await;
    let unhealthy = MockServer::start_async().await;
    unhealthy
        .mock_async(|when, then| {
            when.method(GET).path("/api/health");
            then.status(500);
        })
        .await;

    let config = config_with(vec![
        ("ivor-core", healthy.base_url()),
        ("ivor-organizing", unhealthy.base_url()),
        ("ivor-community", "http://127.0.0.1:9".to_string()),
    ]);
    let (status, body) = get_json(config.clone(), "/api/status").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "operational");
    assert_eq!(body["services"]["ivor-core"]["status"], "healthy");
    assert_eq!(body["services"]["ivor-organizing"]["status"], "unhealthy");
    assert_eq!(body["services"]["ivor-community"]["status"], "error");

    // Idempotence: an immediate second call classifies identically.
    let (_, again) = get_json(config, "/api/status").await;
    assert_eq!(body["services"], again["services"]);
}
