//! Service registry and gateway configuration.
//!
//! The registry is an immutable, ordered mapping from logical service name
//! to base URL. It is built once at startup (defaults, then environment
//! overrides) and passed by reference into the adapters; nothing mutates it
//! at runtime.

use std::time::Duration;

/// Default TCP port for the gateway HTTP server.
pub const DEFAULT_GATEWAY_PORT: u16 = 8080;

/// Default concurrency cap for orchestrated fan-out.
///
/// The backends are resource-constrained serverless deployments, so the cap
/// is deliberately low. Override with `IVOR_FANOUT_CONCURRENCY`.
pub const DEFAULT_FAN_OUT_CONCURRENCY: usize = 2;

/// Default per-call timeout for orchestrated fan-out requests.
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(8);

/// Production deployments of the IVOR backend services, in routing order.
const DEFAULT_SERVICES: &[(&str, &str)] = &[
    ("ivor-core", "https://ivor-core.vercel.app"),
    ("ivor-organizing", "https://ivor-organizing.vercel.app"),
    ("ivor-community", "https://ivor-community.vercel.app"),
    ("ivor-social", "https://ivor-social.vercel.app"),
];

/// Immutable mapping from logical service name to base URL.
///
/// Iteration order is insertion order, so error payloads and status fan-outs
/// list services deterministically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRegistry {
    entries: Vec<(String, String)>,
}

impl ServiceRegistry {
    /// Build a registry from `(name, base_url)` pairs.
    #[must_use]
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    /// Look up the base URL for a service name.
    #[must_use]
    pub fn url_for(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, url)| url.as_str())
    }

    /// All registered service names, in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    /// Iterate over `(name, base_url)` pairs in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, u)| (n.as_str(), u.as_str()))
    }

    /// Number of registered services.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Immutable gateway configuration, assembled once at startup.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Service name → base URL mapping used for all routing.
    pub registry: ServiceRegistry,
    /// Service queried when a request names no target.
    pub default_service: String,
    /// TCP port the gateway binds.
    pub port: u16,
    /// Concurrency cap for orchestrated fan-out.
    pub fan_out_concurrency: usize,
    /// Per-call timeout applied to each fan-out request.
    pub upstream_timeout: Duration,
}

impl GatewayConfig {
    /// Configuration with the production service registry and defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        let entries = DEFAULT_SERVICES
            .iter()
            .map(|(name, url)| ((*name).to_string(), (*url).to_string()))
            .collect();
        Self {
            registry: ServiceRegistry::new(entries),
            default_service: crate::routing::DEFAULT_SERVICE.to_string(),
            port: DEFAULT_GATEWAY_PORT,
            fan_out_concurrency: DEFAULT_FAN_OUT_CONCURRENCY,
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
        }
    }

    /// Defaults overridden by environment variables where set.
    ///
    /// Recognized variables: `IVOR_CORE_URL`, `IVOR_ORGANIZING_URL`,
    /// `IVOR_COMMUNITY_URL`, `IVOR_SOCIAL_URL`, `IVOR_GATEWAY_PORT`,
    /// `IVOR_FANOUT_CONCURRENCY`, `IVOR_UPSTREAM_TIMEOUT_MS`. Unparseable
    /// numeric values fall back to the default.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::with_defaults();

        let overrides = [
            ("ivor-core", "IVOR_CORE_URL"),
            ("ivor-organizing", "IVOR_ORGANIZING_URL"),
            ("ivor-community", "IVOR_COMMUNITY_URL"),
            ("ivor-social", "IVOR_SOCIAL_URL"),
        ];
        let mut entries: Vec<(String, String)> = config
            .registry
            .iter()
            .map(|(n, u)| (n.to_string(), u.to_string()))
            .collect();
        for (name, var) in overrides {
            if let Ok(url) = std::env::var(var)
                && !url.is_empty()
                && let Some(entry) = entries.iter_mut().find(|(n, _)| n == name)
            {
                entry.1 = url;
            }
        }
        config.registry = ServiceRegistry::new(entries);

        if let Ok(port) = std::env::var("IVOR_GATEWAY_PORT")
            && let Ok(port) = port.parse()
        {
            config.port = port;
        }
        if let Ok(cap) = std::env::var("IVOR_FANOUT_CONCURRENCY")
            && let Ok(cap) = cap.parse::<usize>()
            && cap > 0
        {
            config.fan_out_concurrency = cap;
        }
        if let Ok(ms) = std::env::var("IVOR_UPSTREAM_TIMEOUT_MS")
            && let Ok(ms) = ms.parse()
        {
            config.upstream_timeout = Duration::from_millis(ms);
        }

        config
    }
}
