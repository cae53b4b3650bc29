//! Payment endpoint wire types.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/stripe/create-payment-intent`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePaymentIntent {
    /// Amount in major units (e.g. dollars).
    pub amount: f64,
    /// ISO currency code; defaults to `usd`.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "usd".to_string()
}

/// Successful response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentCreated {
    pub client_secret: String,
    pub payment_intent_id: String,
}

/// Convert a major-unit amount to Stripe's minor units.
pub fn to_minor_units(amount: f64) -> i64 {
    (amount * 100.0).round() as i64
}
