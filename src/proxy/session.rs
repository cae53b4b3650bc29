//! Session transport bridging.
//!
//! The Oscar backend carries its session identifier in a custom
//! `Session-Id` header; browsers expect a cookie. The proxy is the only
//! place the `oscar-session-id` cookie is created or refreshed, and the
//! cookie is HTTP-only so client script never touches it.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use time::Duration;

/// Browser-side cookie mirroring the upstream session.
pub const SESSION_COOKIE: &str = "oscar-session-id";

/// Upstream's session header, both directions.
pub const SESSION_HEADER: &str = "Session-Id";

/// Session retention window.
pub const SESSION_TTL_DAYS: i64 = 30;

/// Build the session cookie for an upstream-issued identifier.
pub fn session_cookie(session_id: &str) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, session_id.to_string()))
        .http_only(true)
        .same_site(SameSite::Lax)
        .path("/")
        .max_age(Duration::days(SESSION_TTL_DAYS))
        .build()
}

/// Read the inbound session identifier, if the browser sent one.
pub fn inbound_session_id(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}
