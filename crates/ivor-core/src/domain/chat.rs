//! Chat wire types.
//!
//! Field names on the wire are camelCase; the JSON contract is fixed by the
//! deployed IVOR services and their clients, so the serde renames here are
//! load-bearing.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::routing::GATEWAY_SERVICE;

/// An inbound chat request, for both single-service and orchestrated mode.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct ChatRequest {
    /// The user's message. Required and non-empty for every chat route.
    pub message: String,
    /// Explicit single-service target (single mode only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
    /// Explicit fan-out target list (orchestrated mode only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub services: Option<Vec<String>>,
    #[serde(rename = "userId", skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(rename = "sessionId", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    /// Liberation-pathway context attached by clients and monitor probes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ChatContext>,
}

/// Pathway context forwarded alongside a chat message.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pathway: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
}

/// Aggregated reply from orchestrated multi-service mode.
///
/// Always returned with HTTP 200: partial and even empty result sets are
/// valid outcomes, not errors.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrchestratedReply {
    #[serde(rename = "orchestratedResponse")]
    pub orchestrated_response: Vec<Value>,
    pub message: String,
    #[serde(rename = "queriedServices")]
    pub queried_services: Vec<String>,
    #[serde(rename = "totalResponses")]
    pub total_responses: usize,
    pub timestamp: String,
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(rename = "userId")]
    pub user_id: String,
}

impl OrchestratedReply {
    /// Assemble the aggregate reply from whatever responses succeeded.
    #[must_use]
    pub fn new(
        responses: Vec<Value>,
        queried_services: Vec<String>,
        session_id: Option<String>,
        user_id: Option<String>,
    ) -> Self {
        let total_responses = responses.len();
        Self {
            orchestrated_response: responses,
            message: "Orchestrated response from multiple IVOR services".to_string(),
            queried_services,
            total_responses,
            timestamp: chrono::Utc::now().to_rfc3339(),
            session_id: session_id.unwrap_or_else(|| "default".to_string()),
            user_id: user_id.unwrap_or_else(|| "anonymous".to_string()),
        }
    }
}

/// Merge gateway routing metadata into an upstream reply body.
///
/// The upstream body is passed through untouched apart from the added
/// `routedVia` and `targetService` keys. A non-object upstream body (which a
/// conforming service never sends) is wrapped under `response` first.
#[must_use]
pub fn merge_routing_metadata(upstream: Value, target_service: &str) -> Value {
    let mut map = match upstream {
        Value::Object(map) => map,
        other => {
            let mut map = serde_json::Map::new();
            map.insert("response".to_string(), other);
            map
        }
    };
    map.insert("routedVia".to_string(), Value::String(GATEWAY_SERVICE.to_string()));
    map.insert(
        "targetService".to_string(),
        Value::String(target_service.to_string()),
    );
    Value::Object(map)
}
