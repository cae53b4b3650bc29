//! Storefront client runtime.
//!
//! The pieces of the storefront that hold client-side state: the REST
//! client talking to the gateway's `/api/oscar` surface, auth token
//! handling with remember-me storage selection, the auth/preference
//! facade, and the cancellable catalog fetcher. Everything is
//! framework-independent and driven by the integration tests.

pub mod api;
pub mod auth;
pub mod catalog;
pub mod session;

pub use api::{ApiClient, ClientError};
pub use auth::AuthSession;
pub use catalog::{CatalogKey, CatalogState, CatalogView};
pub use session::StorefrontSession;
