//! Orchestrated multi-service fan-out.
//!
//! Targets come from the request's explicit `services` list or from the
//! keyword rule table. The fan-out is a bounded-concurrency join: at most
//! `fan_out_concurrency` upstream calls in flight, each under
//! `upstream_timeout`, results kept in target order. A failed call is logged
//! and dropped; the aggregate reply prioritizes availability over
//! completeness and is valid even when every call failed.

use futures_util::StreamExt;
use futures_util::stream;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use ivor_core::{ChatRequest, GatewayConfig, OrchestratedReply, services_for_message};

use crate::forward::forward_chat_with_timeout;

/// Resolve the fan-out target list for a request.
///
/// An explicit `services` list is taken verbatim (it is echoed back as
/// `queriedServices` even where it names unknown services); otherwise the
/// keyword rules derive the targets from the message.
#[must_use]
pub fn resolve_targets(request: &ChatRequest) -> Vec<String> {
    match &request.services {
        Some(services) if !services.is_empty() => services.clone(),
        _ => services_for_message(&request.message)
            .into_iter()
            .map(ToString::to_string)
            .collect(),
    }
}

/// Query every resolved target and aggregate the successful replies.
pub async fn orchestrate(
    client: &Client,
    config: &GatewayConfig,
    request: &ChatRequest,
) -> OrchestratedReply {
    let targets = resolve_targets(request);
    debug!(targets = ?targets, "Orchestrating chat request");

    // Unknown names stay in queriedServices but are never queried.
    let resolved: Vec<(String, String)> = targets
        .iter()
        .filter_map(|name| {
            config
                .registry
                .url_for(name)
                .map(|url| (name.clone(), url.to_string()))
        })
        .collect();

    let responses: Vec<Value> = stream::iter(resolved)
        .map(|(service, url)| {
            let message = request.message.clone();
            let user_id = request.user_id.clone();
            let session_id = request.session_id.clone();
            async move {
                let result = forward_chat_with_timeout(
                    client,
                    &url,
                    &message,
                    user_id.as_deref(),
                    session_id.as_deref(),
                    config.upstream_timeout,
                )
                .await;
                match result {
                    Ok(reply) => Some(reply),
                    Err(e) => {
                        warn!(service = %service, error = %e, "Dropping failed fan-out call");
                        None
                    }
                }
            }
        })
        .buffered(config.fan_out_concurrency.max(1))
        .filter_map(|reply| async move { reply })
        .collect()
        .await;

    OrchestratedReply::new(
        responses,
        targets,
        request.session_id.clone(),
        request.user_id.clone(),
    )
}
