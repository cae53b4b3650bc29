//! Integration tests for the payment-intent endpoint.

mod common;

use common::{gateway_config, start_gateway, MockResponse, MockUpstream};

fn payment_request() -> serde_json::Value {
    serde_json::json!({ "amount": 19.99, "currency": "USD" })
}

#[tokio::test]
async fn missing_secret_key_disables_the_endpoint() {
    let upstream = MockUpstream::start().await;
    let (gateway, _shutdown) = start_gateway(gateway_config(&upstream.base_url())).await;

    let response = reqwest::Client::new()
        .post(format!("{gateway}/api/stripe/create-payment-intent"))
        .json(&payment_request())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 503);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Payment service is not configured properly");
}

#[tokio::test]
async fn intent_creation_converts_to_minor_units_and_tags_metadata() {
    let upstream = MockUpstream::start().await;
    let stripe = MockUpstream::start().await;
    stripe.set_default_response(MockResponse::json(
        r#"{"id":"pi_123","client_secret":"pi_123_secret_456"}"#,
    ));

    let mut config = gateway_config(&upstream.base_url());
    config.stripe.secret_key = Some("sk_test_abc".into());
    config.stripe.api_base = stripe.base_url();

    let (gateway, _shutdown) = start_gateway(config).await;

    let response = reqwest::Client::new()
        .post(format!("{gateway}/api/stripe/create-payment-intent"))
        .json(&payment_request())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["clientSecret"], "pi_123_secret_456");
    assert_eq!(body["paymentIntentId"], "pi_123");

    let requests = stripe.wait_for_requests(1).await;
    assert_eq!(requests[0].target, "/v1/payment_intents");
    assert!(requests[0].body.contains("amount=1999"));
    assert!(requests[0].body.contains("currency=usd"));
    assert!(requests[0]
        .body
        .contains("metadata%5Border_source%5D=church_bookstore"));
    assert!(requests[0]
        .header("Authorization")
        .unwrap()
        .starts_with("Basic "));
}

#[tokio::test]
async fn stripe_rejection_maps_to_generic_failure() {
    let upstream = MockUpstream::start().await;
    let stripe = MockUpstream::start().await;
    stripe.set_default_response(
        MockResponse::json(r#"{"error":{"message":"Amount too small"}}"#).with_status(400),
    );

    let mut config = gateway_config(&upstream.base_url());
    config.stripe.secret_key = Some("sk_test_abc".into());
    config.stripe.api_base = stripe.base_url();

    let (gateway, _shutdown) = start_gateway(config).await;

    let response = reqwest::Client::new()
        .post(format!("{gateway}/api/stripe/create-payment-intent"))
        .json(&payment_request())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Failed to create payment intent");
}

#[tokio::test]
async fn currency_defaults_to_usd_when_omitted() {
    let upstream = MockUpstream::start().await;
    let stripe = MockUpstream::start().await;
    stripe.set_default_response(MockResponse::json(
        r#"{"id":"pi_9","client_secret":"pi_9_secret"}"#,
    ));

    let mut config = gateway_config(&upstream.base_url());
    config.stripe.secret_key = Some("sk_test_abc".into());
    config.stripe.api_base = stripe.base_url();

    let (gateway, _shutdown) = start_gateway(config).await;

    reqwest::Client::new()
        .post(format!("{gateway}/api/stripe/create-payment-intent"))
        .json(&serde_json::json!({ "amount": 5.0 }))
        .send()
        .await
        .unwrap();

    let requests = stripe.wait_for_requests(1).await;
    assert!(requests[0].body.contains("amount=500"));
    assert!(requests[0].body.contains("currency=usd"));
}
