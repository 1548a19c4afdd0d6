//! The monitoring run: probe each scenario, classify, aggregate.
//!
//! Scenarios run strictly sequentially - the premature-fallback signal is a
//! latency measurement and concurrent probes would skew it. A probe failure
//! is recorded as an error-quality result and the run continues.

use std::time::Instant;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use ivor_core::{QualityAnalysis, ResponseQuality, analyze_response_quality};

use crate::alert::{format_alert, send_alert};
use crate::scenarios::{TestScenario, default_scenarios};

/// Where the monitor probes and where it complains.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Base URL of the gateway under test.
    pub gateway_url: String,
    /// Optional alert sink; no webhook means alerting is a logged no-op.
    pub webhook_url: Option<String>,
}

impl MonitorConfig {
    /// Read `IVOR_GATEWAY_URL` and `TELEGRAM_WEBHOOK_URL` from the
    /// environment, defaulting the gateway to a local instance.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            gateway_url: std::env::var("IVOR_GATEWAY_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            webhook_url: std::env::var("TELEGRAM_WEBHOOK_URL").ok(),
        }
    }
}

/// Outcome of one probed scenario.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario: String,
    #[serde(flatten)]
    pub analysis: QualityAnalysis,
    /// Wall-clock round trip in milliseconds.
    #[serde(rename = "responseTime")]
    pub response_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: String,
}

impl ScenarioResult {
    /// Whether this result counts against overall health as weak.
    #[must_use]
    pub fn is_weak(&self) -> bool {
        self.analysis.quality == ResponseQuality::Weak || self.analysis.premature_fallback
    }

    /// Whether the probe itself failed.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.analysis.quality == ResponseQuality::Error
    }
}

/// Aggregate counters for one run.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Summary {
    #[serde(rename = "highQuality")]
    pub high_quality: usize,
    #[serde(rename = "weakQuality")]
    pub weak_quality: usize,
    pub errors: usize,
}

/// Three-way health verdict for a monitoring run.
///
/// A fixed heuristic, not a statistical threshold: healthy means no weak
/// results and no errors; a single weak result with no errors is a warning;
/// anything worse is degraded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverallHealth {
    Healthy,
    Warning,
    Degraded,
}

impl OverallHealth {
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Warning => "warning",
            Self::Degraded => "degraded",
        }
    }
}

impl std::fmt::Display for OverallHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Full report for one monitoring run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringReport {
    pub timestamp: String,
    pub summary: Summary,
    pub results: Vec<ScenarioResult>,
    #[serde(rename = "overallHealth")]
    pub overall_health: OverallHealth,
}

/// Probe a single scenario through the gateway chat endpoint.
pub async fn run_scenario(
    client: &Client,
    gateway_url: &str,
    scenario: &TestScenario,
) -> ScenarioResult {
    info!(scenario = %scenario.name, "Testing scenario");
    let start = Instant::now();

    let outcome = async {
        let response = client
            .post(format!("{gateway_url}/api/chat"))
            .timeout(scenario.timeout)
            .json(&json!({
                "message": scenario.message,
                "context": scenario.context,
            }))
            .send()
            .await?;
        response.json::<serde_json::Value>().await
    }
    .await;

    let elapsed = start.elapsed();
    let pathway = scenario
        .context
        .as_ref()
        .and_then(|c| c.pathway.as_deref());

    match outcome {
        Ok(reply) => {
            let analysis = analyze_response_quality(&reply, pathway, elapsed);
            info!(
                scenario = %scenario.name,
                quality = %analysis.quality,
                elapsed_ms = elapsed.as_millis() as u64,
                "Scenario classified"
            );
            ScenarioResult {
                scenario: scenario.name.clone(),
                analysis,
                response_time_ms: elapsed.as_millis() as u64,
                error: None,
                timestamp: chrono::Utc::now().to_rfc3339(),
            }
        }
        Err(e) => {
            error!(scenario = %scenario.name, error = %e, "Scenario probe failed");
            ScenarioResult {
                scenario: scenario.name.clone(),
                analysis: QualityAnalysis {
                    quality: ResponseQuality::Error,
                    issues: vec!["network_failure".to_string()],
                    service_orchestration: false,
                    premature_fallback: false,
                },
                response_time_ms: elapsed.as_millis() as u64,
                error: Some(e.to_string()),
                timestamp: chrono::Utc::now().to_rfc3339(),
            }
        }
    }
}

/// Probe every scenario in order.
pub async fn run_scenarios(
    client: &Client,
    gateway_url: &str,
    scenarios: &[TestScenario],
) -> Vec<ScenarioResult> {
    let mut results = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        results.push(run_scenario(client, gateway_url, scenario).await);
    }
    results
}

/// Aggregate a result set into a report.
#[must_use]
pub fn summarize(results: Vec<ScenarioResult>) -> MonitoringReport {
    let high_quality = results
        .iter()
        .filter(|r| r.analysis.quality == ResponseQuality::High)
        .count();
    let weak_quality = results.iter().filter(|r| r.is_weak()).count();
    let errors = results.iter().filter(|r| r.is_error()).count();

    let overall_health = match (weak_quality, errors) {
        (0, 0) => OverallHealth::Healthy,
        (1, 0) => OverallHealth::Warning,
        _ => OverallHealth::Degraded,
    };

    MonitoringReport {
        timestamp: chrono::Utc::now().to_rfc3339(),
        summary: Summary {
            high_quality,
            weak_quality,
            errors,
        },
        results,
        overall_health,
    }
}

/// One full monitoring pass: probe, summarize, alert if needed.
pub async fn run_cascade_monitoring(config: &MonitorConfig) -> anyhow::Result<MonitoringReport> {
    info!("IVOR cascade monitoring started");
    let client = Client::new();

    let scenarios = default_scenarios();
    let results = run_scenarios(&client, &config.gateway_url, &scenarios).await;
    let report = summarize(results);

    info!(
        high = report.summary.high_quality,
        weak = report.summary.weak_quality,
        errors = report.summary.errors,
        health = %report.overall_health,
        "Cascade monitoring summary"
    );

    if let Some(alert) = format_alert(&report.results) {
        send_alert(&client, config.webhook_url.as_deref(), &alert).await;
    }

    Ok(report)
}
