//! Gateway configuration.
//!
//! Defaults → optional TOML file → environment overrides, then semantic
//! validation. Validation is a pure function that reports all problems
//! at once, and runs before the config is accepted into the system.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::GatewayConfig;
