//! Request forwarding to the IVOR backend services.
//!
//! One injected reqwest client is shared across all forwarding. Failures are
//! split into upstream HTTP errors (the service answered with non-2xx) and
//! transport errors (the service never answered); the callers map the two
//! differently depending on routing mode.

use reqwest::Client;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

use crate::models::ServiceStatus;

/// A forwarding attempt that produced no usable upstream reply.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The upstream answered with a non-2xx status.
    #[error("Service responded with error ({status})")]
    UpstreamStatus {
        /// The upstream HTTP status code, mirrored to single-mode callers.
        status: u16,
    },

    /// The upstream could not be reached (DNS, refused, timeout) or sent an
    /// unreadable body.
    #[error("Failed to reach target service: {0}")]
    Unreachable(#[from] reqwest::Error),

    /// The per-call fan-out timeout elapsed before the upstream answered.
    #[error("Upstream call timed out")]
    Timeout,
}

/// POST a chat message to `{base_url}/api/chat` and return the JSON reply.
pub async fn forward_chat(
    client: &Client,
    base_url: &str,
    message: &str,
    user_id: Option<&str>,
    session_id: Option<&str>,
) -> Result<Value, ForwardError> {
    let url = format!("{base_url}/api/chat");
    debug!(url = %url, "Forwarding chat message");

    let response = client
        .post(&url)
        .json(&json!({
            "message": message,
            "userId": user_id,
            "sessionId": session_id,
        }))
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        return Err(ForwardError::UpstreamStatus {
            status: status.as_u16(),
        });
    }

    Ok(response.json().await?)
}

/// [`forward_chat`] under a deadline, for the orchestrated fan-out path.
pub async fn forward_chat_with_timeout(
    client: &Client,
    base_url: &str,
    message: &str,
    user_id: Option<&str>,
    session_id: Option<&str>,
    timeout: std::time::Duration,
) -> Result<Value, ForwardError> {
    let call = forward_chat(client, base_url, message, user_id, session_id);
    match tokio::time::timeout(timeout, call).await {
        Ok(result) => result,
        Err(_) => Err(ForwardError::Timeout),
    }
}

/// Probe `{base_url}/api/health` and classify the outcome.
///
/// Never fails: transport errors become an `error` status entry so a dead
/// backend cannot fail the whole `/api/status` fan-out.
pub async fn probe_health(client: &Client, base_url: &str) -> ServiceStatus {
    let url = format!("{base_url}/api/health");
    match client.get(&url).send().await {
        Ok(response) => ServiceStatus {
            status: if response.status().is_success() {
                "healthy".to_string()
            } else {
                "unhealthy".to_string()
            },
            url: base_url.to_string(),
            error: None,
        },
        Err(e) => ServiceStatus {
            status: "error".to_string(),
            url: base_url.to_string(),
            error: Some(e.to_string()),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[tokio::test]
    async fn test_forward_chat_success() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/chat")
                    .json_body_partial(r#"{ "message": "hello" }"#);
                then.status(200)
                    .json_body(serde_json::json!({ "response": "hey there" }));
            })
            .await;

        let client = Client::new();
        let reply = forward_chat(&client, &server.base_url(), "hello", Some("u-1"), None)
            .await
            .unwrap();
        assert_eq!(reply["response"], "hey there");
    }

    #[tokio::test]
    async fn test_forward_chat_upstream_error_keeps_status() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/api/chat");
                then.status(503);
            })
            .await;

        let client = Client::new();
        let err = forward_chat(&client, &server.base_url(), "hello", None, None)
            .await
            .unwrap_err();
        match err {
            ForwardError::UpstreamStatus { status } => assert_eq!(status, 503),
            other => panic!("expected UpstreamStatus, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_forward_chat_unreachable() {
        let client = Client::new();
        // Port 9 (discard) is not listening in the test environment.
        let err = forward_chat(&client, "http://127.0.0.1:9", "hello", None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ForwardError::Unreachable(_)));
    }

    #[tokio::test]
    async fn test_probe_health_classification() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/health");
                then.status(200).json_body(serde_json::json!({ "status": "healthy" }));
            })
            .await;

        let client = Client::new();
        let healthy = probe_health(&client, &server.base_url()).await;
        assert_eq!(healthy.status, "healthy");
        assert!(healthy.error.is_none());

        let dead = probe_health(&client, "http://127.0.0.1:9").await;
        assert_eq!(dead.status, "error");
        assert!(dead.error.is_some());
    }
}
