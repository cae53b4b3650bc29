//! Minimal Stripe client for payment-intent creation.
//!
//! Talks to the Stripe REST API directly (form-encoded, basic auth with
//! the secret key). A missing secret key is a distinct, detectable
//! condition surfaced as 503 by the handler, not a boot failure; the
//! HTTP client is built lazily on first use.

use std::sync::OnceLock;

use serde::Deserialize;

use super::types::PaymentIntentCreated;

/// Stripe access shared by the gateway handlers.
pub struct StripeHandle {
    secret_key: Option<String>,
    api_base: String,
    http: OnceLock<reqwest::Client>,
}

/// Failure modes for payment-intent creation.
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    /// No secret key configured; the endpoint is disabled.
    #[error("payment service is not configured")]
    NotConfigured,
    #[error("stripe request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("stripe rejected the request ({status}): {detail}")]
    Rejected { status: u16, detail: String },
}

#[derive(Deserialize)]
struct StripePaymentIntent {
    id: String,
    client_secret: String,
}

impl StripeHandle {
    pub fn new(secret_key: Option<String>, api_base: impl Into<String>) -> Self {
        Self {
            secret_key,
            api_base: api_base.into(),
            http: OnceLock::new(),
        }
    }

    /// Whether a secret key is configured.
    pub fn is_configured(&self) -> bool {
        self.secret_key.is_some()
    }

    /// Create a payment intent for `amount_minor` in `currency`.
    pub async fn create_payment_intent(
        &self,
        amount_minor: i64,
        currency: &str,
    ) -> Result<PaymentIntentCreated, PaymentError> {
        let secret_key = self.secret_key.as_deref().ok_or(PaymentError::NotConfigured)?;

        let params = [
            ("amount", amount_minor.to_string()),
            ("currency", currency.to_ascii_lowercase()),
            ("automatic_payment_methods[enabled]", "true".to_string()),
            ("metadata[order_source]", "church_bookstore".to_string()),
        ];

        let response = self
            .client()
            .post(format!("{}/v1/payment_intents", self.api_base))
            .basic_auth(secret_key, None::<&str>)
            .form(&params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let detail = response.text().await.unwrap_or_default();
            return Err(PaymentError::Rejected { status, detail });
        }

        let intent: StripePaymentIntent = response.json().await?;
        Ok(PaymentIntentCreated {
            client_secret: intent.client_secret,
            payment_intent_id: intent.id,
        })
    }

    fn client(&self) -> &reqwest::Client {
        self.http.get_or_init(reqwest::Client::new)
    }
}
