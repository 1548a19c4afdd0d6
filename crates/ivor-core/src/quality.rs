//! Response quality classification for cascade-failure detection.
//!
//! A properly orchestrated multi-service reply takes real time to produce.
//! Generic fallback language arriving fast is therefore treated as evidence
//! that orchestration never happened ("premature fallback"). The phrase list
//! and the timing threshold are rule data, kept separate from the control
//! flow that applies them.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::routing::GATEWAY_SERVICE;

/// Phrases that mark a reply as canned fallback text.
pub const FALLBACK_INDICATORS: &[&str] = &[
    "offline mode",
    "temporarily unavailable",
    "fallback response",
    "cannot access",
    "currently operating in",
];

/// Elapsed time under which fallback language is treated as premature.
///
/// Tunable constant. The value is a heuristic over observed production
/// latency, not a derived bound; changing it needs product guidance.
pub const PREMATURE_FALLBACK_THRESHOLD: Duration = Duration::from_millis(2000);

/// Replies longer than this (with routing markers) count as substantive.
const SUBSTANTIVE_LENGTH: usize = 100;

/// Quality label assigned to a probed reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseQuality {
    /// Routed, community-focused and culturally affirming.
    High,
    /// Routed and substantive, but missing the content flags.
    Good,
    /// Reply came back but shows no sign of real orchestration.
    Degraded,
    /// Fallback language returned implausibly fast.
    Weak,
    /// The probe itself failed (network error, timeout).
    Error,
    /// Not yet classified.
    Unknown,
}

impl ResponseQuality {
    /// String form used in reports and alerts.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Good => "good",
            Self::Degraded => "degraded",
            Self::Weak => "weak",
            Self::Error => "error",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ResponseQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of classifying one reply. Derived per probe, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityAnalysis {
    pub quality: ResponseQuality,
    /// Additive issue tags (`premature_fallback_detected`,
    /// `low_quality_response`, `pathway_context_ignored`).
    pub issues: Vec<String>,
    /// Whether the reply carries gateway routing markers.
    #[serde(rename = "serviceOrchestration")]
    pub service_orchestration: bool,
    /// Whether fallback language arrived under the timing threshold.
    #[serde(rename = "prematureFallback")]
    pub premature_fallback: bool,
}

/// Classify a gateway reply.
///
/// `reply` is the raw JSON body, `pathway` the liberation pathway the probe
/// asked about (if any), `elapsed` the wall-clock round-trip time.
#[must_use]
pub fn analyze_response_quality(
    reply: &Value,
    pathway: Option<&str>,
    elapsed: Duration,
) -> QualityAnalysis {
    let mut analysis = QualityAnalysis {
        quality: ResponseQuality::Unknown,
        issues: Vec::new(),
        service_orchestration: false,
        premature_fallback: false,
    };

    let response_text = reply
        .get("response")
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_lowercase();

    if reply.get("routedVia").and_then(Value::as_str) == Some(GATEWAY_SERVICE)
        && reply.get("targetService").is_some_and(|v| !v.is_null())
    {
        analysis.service_orchestration = true;
    }

    let has_fallback_language = FALLBACK_INDICATORS
        .iter()
        .any(|indicator| response_text.contains(indicator));

    let community_focused = reply.get("communityFocused").and_then(Value::as_bool) == Some(true);
    let culturally_affirming =
        reply.get("culturallyAffirming").and_then(Value::as_bool) == Some(true);

    if has_fallback_language && elapsed < PREMATURE_FALLBACK_THRESHOLD {
        analysis.quality = ResponseQuality::Weak;
        analysis.premature_fallback = true;
        analysis.issues.push("premature_fallback_detected".to_string());
    } else if analysis.service_orchestration && community_focused && culturally_affirming {
        analysis.quality = ResponseQuality::High;
    } else if response_text.len() > SUBSTANTIVE_LENGTH && analysis.service_orchestration {
        analysis.quality = ResponseQuality::Good;
    } else {
        analysis.quality = ResponseQuality::Degraded;
        analysis.issues.push("low_quality_response".to_string());
    }

    // Pathway check is additive only; it never changes the primary label.
    if let Some(pathway) = pathway
        && !response_text.contains(&pathway.to_lowercase())
    {
        analysis.issues.push("pathway_context_ignored".to_string());
    }

    analysis
}
