//! Observability subsystem.
//!
//! Structured logging via `tracing` and Prometheus metrics via the
//! `metrics` facade. Metric updates are cheap (atomic increments) and
//! recorded at the proxy and payment boundaries.

pub mod logging;
pub mod metrics;
