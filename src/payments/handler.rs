//! HTTP handler for payment-intent creation.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::http::server::AppState;
use crate::observability::metrics;

use super::stripe::PaymentError;
use super::types::{to_minor_units, CreatePaymentIntent};

/// `POST /api/stripe/create-payment-intent`.
///
/// A missing Stripe credential is reported as 503 with a descriptive
/// message, distinguished from generic failures (500).
pub async fn create_payment_intent(
    State(state): State<AppState>,
    Json(request): Json<CreatePaymentIntent>,
) -> Response {
    let amount_minor = to_minor_units(request.amount);

    match state
        .stripe
        .create_payment_intent(amount_minor, &request.currency)
        .await
    {
        Ok(created) => {
            metrics::record_payment_intent("created");
            Json(created).into_response()
        }
        Err(PaymentError::NotConfigured) => {
            tracing::warn!("payment intent requested but no stripe secret key is configured");
            metrics::record_payment_intent("unconfigured");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "error": "Payment service is not configured properly" })),
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "payment intent creation failed");
            metrics::record_payment_intent("failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to create payment intent" })),
            )
                .into_response()
        }
    }
}
