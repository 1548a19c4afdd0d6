//! Axum HTTP server for the IVOR API gateway.
//!
//! `serve()` runs the gateway with a pre-bound listener until the
//! cancellation token fires. Single-service routing fails loud (upstream
//! failure detail is mirrored to the caller); orchestrated routing fails
//! quiet (partial results, always 200). That asymmetry is deliberate.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use reqwest::Client;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, info};

use ivor_core::{ChatRequest, GatewayConfig, merge_routing_metadata};

use crate::forward::{ForwardError, forward_chat, probe_health};
use crate::models::{
    GatewayIndex, HealthResponse, MissingMessageError, StatusResponse, UnknownServiceError,
    UnreachableErrorBody, UpstreamErrorBody,
};
use crate::orchestrate::orchestrate;

/// Shared application state for the gateway.
#[derive(Clone)]
struct AppState {
    /// HTTP client for forwarding requests to the backend services.
    client: Client,
    /// Immutable routing configuration.
    config: Arc<GatewayConfig>,
}

/// Build the gateway router with permissive CORS on every route.
#[must_use]
pub fn router(config: Arc<GatewayConfig>, client: Client) -> Router {
    let state = AppState { client, config };

    // Every route answers cross-origin; the web client and the Chrome
    // extension both call the gateway from foreign origins.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/health", get(health))
        .route("/api/status", get(status))
        .route("/api/chat", post(chat))
        .route("/api/chat/orchestrated", post(chat_orchestrated))
        .fallback(index)
        .layer(cors)
        .with_state(state)
}

/// Start the gateway with a pre-bound listener.
pub async fn serve(
    listener: TcpListener,
    config: Arc<GatewayConfig>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    info!("Gateway starting on {addr}");

    let client = Client::builder().pool_max_idle_per_host(10).build()?;
    let app = router(config, client);

    info!("Gateway listening on {addr}");
    axum::serve(listener, app)
        .with_graceful_shutdown(cancel.cancelled_owned())
        .await?;

    info!("Gateway shut down");
    Ok(())
}

/// `GET /api/health` - static capability report.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse::new(&state.config))
}

/// `GET /api/status` - health fan-out across every registered service.
///
/// Per-service failures land in the per-service entry; this call itself
/// always succeeds.
async fn status(State(state): State<AppState>) -> impl IntoResponse {
    debug!("GET /api/status");
    let mut services = BTreeMap::new();
    for (name, url) in state.config.registry.iter() {
        services.insert(name.to_string(), probe_health(&state.client, url).await);
    }
    Json(StatusResponse::new(services))
}

/// `POST /api/chat` - route a message to a single backend service.
async fn chat(State(state): State<AppState>, Json(request): Json<ChatRequest>) -> Response {
    debug!("POST /api/chat");

    if request.message.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, Json(MissingMessageError::default())).into_response();
    }

    let target = request
        .service
        .clone()
        .unwrap_or_else(|| state.config.default_service.clone());

    let Some(url) = state.config.registry.url_for(&target) else {
        let available = state
            .config
            .registry
            .names()
            .iter()
            .map(ToString::to_string)
            .collect();
        return (
            StatusCode::BAD_REQUEST,
            Json(UnknownServiceError::new(&target, available)),
        )
            .into_response();
    };

    match forward_chat(
        &state.client,
        url,
        &request.message,
        request.user_id.as_deref(),
        request.session_id.as_deref(),
    )
    .await
    {
        Ok(reply) => Json(merge_routing_metadata(reply, &target)).into_response(),
        Err(ForwardError::UpstreamStatus { status }) => {
            let code = StatusCode::from_u16(status).unwrap_or(StatusCode::BAD_GATEWAY);
            (
                code,
                Json(UpstreamErrorBody {
                    error: "Service responded with error".to_string(),
                    status,
                    target_service: target,
                }),
            )
                .into_response()
        }
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            Json(UnreachableErrorBody {
                error: "Failed to reach target service".to_string(),
                message: e.to_string(),
                target_service: target,
            }),
        )
            .into_response(),
    }
}

/// `POST /api/chat/orchestrated` - fan out to multiple services.
///
/// Always 200; `totalResponses` may be zero when every upstream failed.
async fn chat_orchestrated(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Response {
    debug!("POST /api/chat/orchestrated");

    if request.message.trim().is_empty() {
        return (StatusCode::BAD_REQUEST, Json(MissingMessageError::default())).into_response();
    }

    let reply = orchestrate(&state.client, &state.config, &request).await;
    Json(reply).into_response()
}

/// Fallback for unmatched routes: describe the gateway.
async fn index(State(state): State<AppState>) -> impl IntoResponse {
    Json(GatewayIndex::new(&state.config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    fn test_router() -> Router {
        router(Arc::new(GatewayConfig::with_defaults()), Client::new())
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "ivor-api-gateway");
    }

    #[tokio::test]
    async fn test_chat_requires_message() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/chat")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Message is required");
        assert_eq!(body["service"], "ivor-api-gateway");
    }

    #[tokio::test]
    async fn test_chat_unknown_service_lists_available() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/api/chat")
                    .header("content-type", "application/json")
                    .body(Body::from(
                        r#"{ "message": "hi", "service": "ivor-dancing" }"#,
                    ))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Service 'ivor-dancing' not found");
        let available: Vec<String> =
            serde_json::from_value(body["availableServices"].clone()).unwrap();
        assert_eq!(
            available,
            vec!["ivor-core", "ivor-organizing", "ivor-community", "ivor-social"]
        );
    }

    #[tokio::test]
    async fn test_cross_origin_requests_are_allowed() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .header("origin", "https://blkoutuk.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }

    #[tokio::test]
    async fn test_unmatched_route_serves_index() {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/something/else")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["service"], "ivor-api-gateway");
        assert!(body["endpoints"].as_array().unwrap().len() >= 4);
    }
}
