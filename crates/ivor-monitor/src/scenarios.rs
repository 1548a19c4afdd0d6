//! Synthetic test scenarios sent through the gateway.

use std::time::Duration;

use ivor_core::{ChatContext, ResponseQuality};

/// One synthetic probe: a message, optional pathway context, the quality a
/// healthy system is expected to reach, and how long to wait for a reply.
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub name: String,
    pub message: String,
    pub context: Option<ChatContext>,
    pub expected_quality: ResponseQuality,
    pub timeout: Duration,
}

impl TestScenario {
    fn new(
        name: &str,
        message: &str,
        context: Option<(&str, &str)>,
        timeout: Duration,
    ) -> Self {
        Self {
            name: name.to_string(),
            message: message.to_string(),
            context: context.map(|(pathway, focus)| ChatContext {
                pathway: Some(pathway.to_string()),
                focus: Some(focus.to_string()),
            }),
            // All production probes expect a high-quality orchestrated reply.
            expected_quality: ResponseQuality::High,
            timeout,
        }
    }
}

/// The fixed production probe set.
///
/// Timeouts are generous on purpose: the point is to allow orchestration to
/// finish, so that a fast generic reply stands out as a premature fallback.
#[must_use]
pub fn default_scenarios() -> Vec<TestScenario> {
    vec![
        TestScenario::new(
            "System Disruptor Pathway Response",
            "I need help organizing a community action around housing justice",
            Some(("System Disruptor", "housing justice")),
            Duration::from_secs(8),
        ),
        TestScenario::new(
            "Community Healer Pathway Response",
            "Looking for trauma-informed support resources in my area",
            Some(("Community Healer", "trauma support")),
            Duration::from_secs(8),
        ),
        TestScenario::new(
            "Multi-Service Knowledge Query",
            "What community organizing strategies work best for Black queer communities?",
            None,
            Duration::from_secs(10),
        ),
    ]
}
