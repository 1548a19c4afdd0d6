//! API-layer response types for the gateway endpoints.
//!
//! Domain types live in `ivor-core`; this module holds the HTTP payload
//! shapes. Field names are part of the deployed service contract, hence the
//! camelCase renames.

use std::collections::BTreeMap;

use ivor_core::{GatewayConfig, routing::GATEWAY_SERVICE};
use serde::{Deserialize, Serialize};

/// Endpoints advertised by `/api/status` and the index payload.
pub const ENDPOINTS: &[&str] = &[
    "/api/health",
    "/api/status",
    "/api/chat",
    "/api/chat/orchestrated",
];

/// Body of `GET /api/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: String,
    pub services: Vec<String>,
    pub capabilities: Vec<String>,
}

impl HealthResponse {
    /// Static capability report for a live gateway.
    #[must_use]
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            status: "healthy".to_string(),
            service: GATEWAY_SERVICE.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            services: config.registry.names().iter().map(ToString::to_string).collect(),
            capabilities: vec![
                "orchestration".to_string(),
                "routing".to_string(),
                "coordination".to_string(),
            ],
        }
    }
}

/// Per-service entry in the `/api/status` fan-out result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    /// `healthy`, `unhealthy` or `error`.
    pub status: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of `GET /api/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub service: String,
    pub name: String,
    pub description: String,
    pub status: String,
    pub version: String,
    pub services: BTreeMap<String, ServiceStatus>,
    pub endpoints: Vec<String>,
}

impl StatusResponse {
    /// Wrap the per-service probe results in the static status envelope.
    #[must_use]
    pub fn new(services: BTreeMap<String, ServiceStatus>) -> Self {
        Self {
            service: GATEWAY_SERVICE.to_string(),
            name: "IVOR API Gateway".to_string(),
            description: "Cross-domain coordination and routing".to_string(),
            status: "operational".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            services,
            endpoints: ENDPOINTS.iter().map(ToString::to_string).collect(),
        }
    }
}

/// 400 body when a chat request carries no message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MissingMessageError {
    pub error: String,
    pub service: String,
}

impl Default for MissingMessageError {
    fn default() -> Self {
        Self {
            error: "Message is required".to_string(),
            service: GATEWAY_SERVICE.to_string(),
        }
    }
}

/// 400 body when a chat request names an unregistered service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnknownServiceError {
    pub error: String,
    #[serde(rename = "availableServices")]
    pub available_services: Vec<String>,
}

impl UnknownServiceError {
    #[must_use]
    pub fn new(requested: &str, available: Vec<String>) -> Self {
        Self {
            error: format!("Service '{requested}' not found"),
            available_services: available,
        }
    }
}

/// Body mirrored to the caller when an upstream returns a non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpstreamErrorBody {
    pub error: String,
    pub status: u16,
    #[serde(rename = "targetService")]
    pub target_service: String,
}

/// 502 body when the upstream could not be reached at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnreachableErrorBody {
    pub error: String,
    pub message: String,
    #[serde(rename = "targetService")]
    pub target_service: String,
}

/// Default payload for unmatched routes: a short self-description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayIndex {
    pub message: String,
    pub service: String,
    #[serde(rename = "availableServices")]
    pub available_services: Vec<String>,
    pub endpoints: Vec<String>,
    pub timestamp: String,
}

impl GatewayIndex {
    #[must_use]
    pub fn new(config: &GatewayConfig) -> Self {
        Self {
            message: "IVOR API Gateway - Cross-Domain Coordination Hub".to_string(),
            service: GATEWAY_SERVICE.to_string(),
            available_services: config.registry.names().iter().map(ToString::to_string).collect(),
            endpoints: ENDPOINTS.iter().map(ToString::to_string).collect(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
