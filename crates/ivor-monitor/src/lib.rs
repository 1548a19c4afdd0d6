//! Cascade-failure monitor for the IVOR gateway.
//!
//! The services behind the gateway have a failure mode where they revert to
//! canned fallback text instead of letting orchestration finish. This crate
//! sends fixed synthetic scenarios through the gateway, classifies each
//! reply with the core quality rules, and alerts a webhook when premature
//! fallbacks or probe errors show up.

pub mod alert;
pub mod runner;
pub mod scenarios;

pub use alert::{format_alert, send_alert};
pub use runner::{
    MonitorConfig, MonitoringReport, OverallHealth, ScenarioResult, Summary, run_cascade_monitoring,
    run_scenario, run_scenarios, summarize,
};
pub use scenarios::{TestScenario, default_scenarios};
