//! Session-bridging reverse proxy over the Oscar API.
//!
//! # Data Flow
//! ```text
//! Browser request (ANY /api/oscar/{*path})
//!     → descriptor.rs (pure rewrite: path, query, headers, JSON body)
//!     → handler.rs (thin I/O shim: dispatch, await upstream)
//!     → session.rs (Session-Id header ↔ oscar-session-id cookie)
//!     → Response (upstream status preserved verbatim)
//! ```
//!
//! # Design Decisions
//! - Stateless: the upstream stays the single source of truth for
//!   session validity; the proxy only translates transports
//! - No retries, no caching, no body transformation beyond JSON
//!   re-encoding
//! - Upstream transport failures map to 502 Bad Gateway

pub mod descriptor;
pub mod handler;
pub mod session;

pub use descriptor::{build_outbound, OutboundRequest};
pub use handler::proxy_oscar;
