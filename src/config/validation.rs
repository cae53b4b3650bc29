//! Configuration validation.
//!
//! Semantic checks on top of serde's syntactic ones. Returns all
//! validation errors, not just the first, so a bad deploy surfaces
//! every problem in one pass.

use url::Url;

use super::schema::GatewayConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("listener.bind_address must not be empty")]
    EmptyBindAddress,
    #[error("upstream.api_base is not a valid URL: {0}")]
    InvalidUpstreamUrl(String),
    #[error("upstream.media_base is not a valid URL: {0}")]
    InvalidMediaUrl(String),
    #[error("stripe.api_base is not a valid URL: {0}")]
    InvalidStripeUrl(String),
    #[error("timeouts.{0} must be greater than zero")]
    ZeroTimeout(&'static str),
    #[error("observability.metrics_address is not a valid socket address: {0}")]
    InvalidMetricsAddress(String),
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.trim().is_empty() {
        errors.push(ValidationError::EmptyBindAddress);
    }

    if Url::parse(&config.upstream.api_base).is_err() {
        errors.push(ValidationError::InvalidUpstreamUrl(
            config.upstream.api_base.clone(),
        ));
    }
    if Url::parse(&config.upstream.media_base).is_err() {
        errors.push(ValidationError::InvalidMediaUrl(
            config.upstream.media_base.clone(),
        ));
    }
    if Url::parse(&config.stripe.api_base).is_err() {
        errors.push(ValidationError::InvalidStripeUrl(
            config.stripe.api_base.clone(),
        ));
    }

    if config.timeouts.connect_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("connect_secs"));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroTimeout("request_secs"));
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<std::net::SocketAddr>()
            .is_err()
    {
        errors.push(ValidationError::InvalidMetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
