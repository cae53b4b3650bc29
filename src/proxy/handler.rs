//! The proxy I/O shim.
//!
//! All rewrite decisions are made by [`descriptor`], all session
//! translation by [`session`]; this handler only executes the outbound
//! request and mirrors the upstream response. The upstream status code
//! is preserved verbatim; transport failures and unreadable upstream
//! bodies map to 502 Bad Gateway.
//!
//! [`descriptor`]: super::descriptor
//! [`session`]: super::session

use std::time::Instant;

use axum::body::Bytes;
use axum::extract::{Path, RawQuery, State};
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use axum_extra::extract::CookieJar;

use crate::http::server::AppState;
use crate::observability::metrics;

use super::descriptor::build_outbound;
use super::session::{inbound_session_id, session_cookie, SESSION_HEADER};

/// Forward one request to the Oscar API.
pub async fn proxy_oscar(
    State(state): State<AppState>,
    Path(path): Path<String>,
    RawQuery(query): RawQuery,
    jar: CookieJar,
    headers: HeaderMap,
    method: Method,
    body: Bytes,
) -> Response {
    let start = Instant::now();
    let method_str = method.to_string();

    let authorization = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    let outbound = build_outbound(
        method,
        &state.upstream_base,
        &path,
        query.as_deref(),
        inbound_session_id(&jar).as_deref(),
        authorization,
        &body,
    );

    tracing::debug!(
        method = %outbound.method,
        url = %outbound.url,
        has_session = outbound.session_id.is_some(),
        has_body = outbound.json_body.is_some(),
        "proxying to oscar"
    );

    let mut request = state
        .client
        .request(outbound.method.clone(), &outbound.url)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(session_id) = &outbound.session_id {
        request = request.header(SESSION_HEADER, session_id);
    }
    if let Some(authorization) = &outbound.authorization {
        request = request.header(header::AUTHORIZATION, authorization);
    }
    if let Some(json) = &outbound.json_body {
        request = request.json(json);
    }

    let upstream = match request.send().await {
        Ok(upstream) => upstream,
        Err(e) => {
            tracing::error!(url = %outbound.url, error = %e, "upstream request failed");
            metrics::record_upstream_error();
            metrics::record_request(&method_str, 502, start);
            return (StatusCode::BAD_GATEWAY, "Upstream request failed").into_response();
        }
    };

    let status = upstream.status();
    let is_json = upstream
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.contains("application/json"));
    let new_session_id = upstream
        .headers()
        .get(SESSION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let text = match upstream.text().await {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(url = %outbound.url, error = %e, "failed to read upstream body");
            metrics::record_upstream_error();
            metrics::record_request(&method_str, 502, start);
            return (StatusCode::BAD_GATEWAY, "Upstream response unreadable").into_response();
        }
    };

    metrics::record_request(&method_str, status.as_u16(), start);

    let response = if is_json {
        match serde_json::from_str::<serde_json::Value>(&text) {
            Ok(value) => (status, Json(value)).into_response(),
            Err(_) => (status, text).into_response(),
        }
    } else {
        (status, text).into_response()
    };

    // The only point where the session cookie is created or refreshed.
    let jar = match new_session_id {
        Some(session_id) => jar.add(session_cookie(&session_id)),
        None => jar,
    };

    (jar, response).into_response()
}
