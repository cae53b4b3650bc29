//! Lifecycle management.
//!
//! Ordered shutdown: a signal or an explicit trigger fans out through a
//! broadcast channel; the server stops accepting, in-flight requests
//! drain, then the process exits.

pub mod shutdown;

pub use shutdown::Shutdown;
