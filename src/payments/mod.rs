//! Payment-intent creation via Stripe.

pub mod handler;
pub mod stripe;
pub mod types;

pub use stripe::StripeHandle;
pub use types::{CreatePaymentIntent, PaymentIntentCreated};
