//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML config
//! files; every section has defaults so a missing file still boots a
//! working gateway against the production Oscar host.

use serde::{Deserialize, Serialize};

use crate::prefs::{Currency, Locale};

/// Root configuration for the storefront gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Oscar backend the proxy forwards to.
    pub upstream: UpstreamConfig,

    /// Stripe credentials; absent keys disable the payment endpoint.
    pub stripe: StripeConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Preference defaults used when no cookie is present.
    pub preferences: PreferenceConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g. "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Upstream Oscar API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL of the Oscar REST API.
    pub api_base: String,

    /// Base URL for relative media paths in Oscar responses.
    pub media_base: String,

    /// Public-facing site URL.
    pub site_url: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            api_base: "https://orthodoxbookshop.asia/api".to_string(),
            media_base: "https://orthodoxbookshop.asia".to_string(),
            site_url: "http://localhost:3000".to_string(),
        }
    }
}

/// Stripe configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StripeConfig {
    /// Secret key; when unset the payment endpoint answers 503.
    pub secret_key: Option<String>,

    /// Publishable key, exposed to the storefront shell.
    pub publishable_key: Option<String>,

    /// Stripe API base URL (overridable for tests).
    pub api_base: String,
}

impl Default for StripeConfig {
    fn default() -> Self {
        Self {
            secret_key: None,
            publishable_key: None,
            api_base: "https://api.stripe.com".to_string(),
        }
    }
}

/// Timeout configuration for various operations.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            connect_secs: 5,
            request_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Preference defaults.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PreferenceConfig {
    pub default_locale: Locale,
    pub default_currency: Currency,
}
