//! HTTP server subsystem.
//!
//! # Data Flow
//! ```text
//! Browser request
//!     → server.rs (Axum setup, middleware, request ID)
//!     → /api/oscar/{*path}   → proxy handler → Oscar backend
//!     → /api/stripe/…        → payment handler → Stripe
//!     → /healthz             → liveness probe
//! ```

pub mod server;

pub use server::{AppState, HttpServer};
