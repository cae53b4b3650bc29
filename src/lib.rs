//! Storefront gateway for an Oscar e-commerce backend.
//!
//! The gateway presents a same-origin HTTP surface for the storefront:
//! a session-bridging reverse proxy over the Oscar REST API and a
//! payment-intent endpoint backed by Stripe. The crate also ships the
//! storefront client runtime (auth token handling, locale/currency
//! preference synchronization, cancellable catalog fetching) used by the
//! app shell and exercised by the integration tests.

pub mod client;
pub mod config;
pub mod http;
pub mod i18n;
pub mod lifecycle;
pub mod observability;
pub mod payments;
pub mod prefs;
pub mod proxy;

pub use config::schema::GatewayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
