//! Pure request rewriting for the Oscar proxy.
//!
//! Everything that decides *what* to send upstream lives here, with no
//! I/O, so the header and body bridging is unit-testable. The handler
//! only executes the returned descriptor.

use axum::http::Method;

/// What the proxy will send upstream, fully decided.
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundRequest {
    pub method: Method,
    pub url: String,
    /// Forwarded as the upstream's `Session-Id` header when present.
    pub session_id: Option<String>,
    /// Forwarded unchanged as `Authorization` when present.
    pub authorization: Option<String>,
    /// Re-serialized JSON body; `None` forwards no body.
    pub json_body: Option<serde_json::Value>,
}

/// Build the outbound descriptor for one inbound request.
///
/// The target URL is `<base>/<path>?<query>` with the query preserved
/// verbatim. Only POST/PUT/PATCH carry a body; a body that is not valid
/// JSON is dropped rather than aborting the request, since many Oscar
/// endpoints accept empty bodies.
pub fn build_outbound(
    method: Method,
    base: &str,
    path: &str,
    query: Option<&str>,
    session_id: Option<&str>,
    authorization: Option<&str>,
    body: &[u8],
) -> OutboundRequest {
    let mut url = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    if let Some(query) = query {
        if !query.is_empty() {
            url.push('?');
            url.push_str(query);
        }
    }

    let json_body = if carries_body(&method) {
        serde_json::from_slice(body).ok()
    } else {
        None
    };

    OutboundRequest {
        method,
        url,
        session_id: session_id.map(str::to_string),
        authorization: authorization.map(str::to_string),
        json_body,
    }
}

/// Methods that conventionally carry a request body.
fn carries_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}
