//! `ivor status` - print the gateway's per-service health fan-out.

use ivor_monitor::MonitorConfig;

use crate::error::CliError;

/// Fetch `GET /api/status` from the gateway and pretty-print the result.
pub async fn handle_status(gateway_url: Option<String>) -> Result<(), CliError> {
    let gateway_url = gateway_url.unwrap_or_else(|| MonitorConfig::from_env().gateway_url);

    let response = reqwest::get(format!("{gateway_url}/api/status"))
        .await
        .map_err(|e| CliError::Gateway(e.to_string()))?;
    let body: serde_json::Value = response
        .json()
        .await
        .map_err(|e| CliError::Gateway(e.to_string()))?;

    let rendered = serde_json::to_string_pretty(&body)
        .map_err(|e| CliError::Gateway(e.to_string()))?;
    println!("{rendered}");
    Ok(())
}
