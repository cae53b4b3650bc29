//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;

use super::schema::GatewayConfig;
use super::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation failed: {}", format_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn format_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration: defaults, then the TOML file when given, then
/// environment overrides, then validation.
pub fn load_config(path: Option<&Path>) -> Result<GatewayConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => GatewayConfig::default(),
    };

    apply_env_overrides(&mut config);

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Environment variables override file values, matching the deployment
/// convention of the original storefront.
fn apply_env_overrides(config: &mut GatewayConfig) {
    if let Ok(url) = std::env::var("OSCAR_API_URL") {
        config.upstream.api_base = url;
    }
    if let Ok(key) = std::env::var("STRIPE_SECRET_KEY") {
        config.stripe.secret_key = Some(key);
    }
    if let Ok(key) = std::env::var("STRIPE_PUBLISHABLE_KEY") {
        config.stripe.publishable_key = Some(key);
    }
    if let Ok(url) = std::env::var("SITE_URL") {
        config.upstream.site_url = url;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_file_loads_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.timeouts.request_secs, 30);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_config(Some(Path::new("/nonexistent/gateway.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let dir = std::env::temp_dir().join("oscar-gateway-loader-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.toml");
        std::fs::write(&path, "[upstream\napi_base = ").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));

        std::fs::remove_file(&path).unwrap_or_default();
    }
}
