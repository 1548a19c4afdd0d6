//! Cascade-failure alert formatting and webhook delivery.
//!
//! Alert delivery is strictly best-effort: a missing webhook is a logged
//! no-op and a delivery failure is logged and dropped, never retried and
//! never escalated into the monitoring result.

use reqwest::Client;
use serde_json::json;
use tracing::{info, warn};

use crate::runner::ScenarioResult;

/// Dashboard linked from every alert.
const MONITORING_DASHBOARD: &str = "https://ivor-monitoring-service.vercel.app/";

/// Render the cascade-failure alert for a result set.
///
/// Returns `None` when there is nothing to report (no weak/premature
/// results and no errors).
#[must_use]
pub fn format_alert(results: &[ScenarioResult]) -> Option<String> {
    let weak: Vec<&ScenarioResult> = results.iter().filter(|r| r.is_weak()).collect();
    let errors: Vec<&ScenarioResult> = results.iter().filter(|r| r.is_error()).collect();

    if weak.is_empty() && errors.is_empty() {
        return None;
    }

    let mut alert = String::from("IVOR CASCADE FAILURE DETECTED\n\n");

    if !weak.is_empty() {
        alert.push_str(&format!("PREMATURE FALLBACKS ({}):\n", weak.len()));
        for result in &weak {
            alert.push_str(&format!(
                "- {}: {}ms (too fast)\n",
                result.scenario, result.response_time_ms
            ));
        }
        alert.push('\n');
    }

    if !errors.is_empty() {
        alert.push_str(&format!("SERVICE FAILURES ({}):\n", errors.len()));
        for result in &errors {
            alert.push_str(&format!(
                "- {}: {}\n",
                result.scenario,
                result.error.as_deref().unwrap_or("unknown error")
            ));
        }
        alert.push('\n');
    }

    alert.push_str(&format!("Check monitoring: {MONITORING_DASHBOARD}\n"));
    alert.push_str(&format!("Time: {}", chrono::Utc::now().to_rfc3339()));

    Some(alert)
}

/// Deliver an alert to the webhook, if one is configured.
pub async fn send_alert(client: &Client, webhook_url: Option<&str>, alert: &str) {
    let Some(webhook_url) = webhook_url else {
        info!("No alert webhook configured, skipping cascade alert");
        return;
    };

    match client
        .post(webhook_url)
        .json(&json!({ "text": alert }))
        .send()
        .await
    {
        Ok(response) if response.status().is_success() => {
            info!("Cascade failure alert delivered");
        }
        Ok(response) => {
            warn!(status = %response.status(), "Alert webhook rejected the alert");
        }
        Err(e) => {
            warn!(error = %e, "Failed to deliver cascade alert");
        }
    }
}
