//! Keyword routing rules for orchestrated requests.
//!
//! The topic-to-service mapping is kept as a data table rather than inline
//! conditionals so tests can enumerate the rules independently of the
//! control flow that applies them.

use thiserror::Error;

/// Name the gateway reports in `routedVia` metadata.
pub const GATEWAY_SERVICE: &str = "ivor-api-gateway";

/// Service queried when no explicit target is given and no keyword matches.
pub const DEFAULT_SERVICE: &str = "ivor-core";

/// Topic keywords mapped to the backend service that owns the topic.
///
/// Matching is case-insensitive substring containment; a message can match
/// several rules and is then fanned out to every matched service.
const KEYWORD_ROUTES: &[(&[&str], &str)] = &[
    (&["wellness", "health", "personal"], "ivor-core"),
    (&["organize", "campaign", "mutual aid"], "ivor-organizing"),
    (&["trend", "community", "data"], "ivor-community"),
    (&["social", "viral", "amplify"], "ivor-social"),
];

/// Derive the fan-out target list for a message from the keyword table.
///
/// Returns targets in table order, deduplicated. Falls back to
/// [`DEFAULT_SERVICE`] when nothing matches.
#[must_use]
pub fn services_for_message(message: &str) -> Vec<&'static str> {
    let lower = message.to_lowercase();
    let mut targets: Vec<&'static str> = KEYWORD_ROUTES
        .iter()
        .filter(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, service)| *service)
        .collect();

    if targets.is_empty() {
        targets.push(DEFAULT_SERVICE);
    }
    targets
}

/// Routing failures surfaced to the caller as validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoutingError {
    /// The request carried no message text.
    #[error("Message is required")]
    EmptyMessage,

    /// The requested service is not in the registry.
    #[error("Service '{requested}' not found")]
    UnknownService {
        /// The service name the caller asked for.
        requested: String,
        /// Every registered service name, in registration order.
        available: Vec<String>,
    },
}
