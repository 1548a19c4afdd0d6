//! Core domain types and rules for the IVOR API gateway.
//!
//! This crate is pure logic: the service registry configuration, the
//! keyword routing rule table, the wire-level chat types and the response
//! quality classifier used by the cascade monitor. No IO lives here;
//! the HTTP adapters are `ivor-gateway` and `ivor-monitor`.

pub mod domain;
pub mod quality;
pub mod registry;
pub mod routing;

// Re-export commonly used types for convenience
pub use domain::{ChatContext, ChatRequest, OrchestratedReply, merge_routing_metadata};
pub use quality::{
    FALLBACK_INDICATORS, PREMATURE_FALLBACK_THRESHOLD, QualityAnalysis, ResponseQuality,
    analyze_response_quality,
};
pub use registry::{
    DEFAULT_FAN_OUT_CONCURRENCY, DEFAULT_GATEWAY_PORT, DEFAULT_UPSTREAM_TIMEOUT, GatewayConfig,
    ServiceRegistry,
};
pub use routing::{DEFAULT_SERVICE, GATEWAY_SERVICE, RoutingError, services_for_message};
