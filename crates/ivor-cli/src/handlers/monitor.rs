//! `ivor monitor` - one cascade-monitoring pass.

use ivor_monitor::{MonitorConfig, run_cascade_monitoring};

use crate::error::CliError;

/// Run the probe set once and report; the returned code is the process exit
/// code (0 healthy, 1 otherwise).
pub async fn handle_monitor(
    gateway_url: Option<String>,
    webhook_url: Option<String>,
) -> Result<i32, CliError> {
    let mut config = MonitorConfig::from_env();
    if let Some(url) = gateway_url {
        config.gateway_url = url;
    }
    if let Some(url) = webhook_url {
        config.webhook_url = Some(url);
    }

    let report = run_cascade_monitoring(&config)
        .await
        .map_err(|e| CliError::Monitor(e.to_string()))?;

    println!("IVOR cascade monitoring summary");
    println!("  high quality responses:   {}", report.summary.high_quality);
    println!("  weak/premature fallbacks: {}", report.summary.weak_quality);
    println!("  errors:                   {}", report.summary.errors);
    println!("  overall health:           {}", report.overall_health);
    for result in &report.results {
        println!(
            "  - {}: {} ({}ms)",
            result.scenario,
            result.analysis.quality,
            result.response_time_ms
        );
    }

    Ok(i32::from(!report.overall_health.is_healthy()))
}
