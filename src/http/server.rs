//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, timeout, request ID)
//! - Share the upstream HTTP client and Stripe handle with handlers
//! - Serve with graceful shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::{any, get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::payments::StripeHandle;
use crate::{payments, proxy};

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Oscar API base URL the proxy forwards to.
    pub upstream_base: String,
    /// Shared upstream HTTP client (connection pool reuse).
    pub client: reqwest::Client,
    /// Stripe access for the payment endpoint.
    pub stripe: Arc<StripeHandle>,
}

/// HTTP server for the storefront gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.timeouts.connect_secs))
            .timeout(Duration::from_secs(config.timeouts.request_secs))
            .build()
            .expect("HTTP client construction only fails on TLS backend misconfiguration");

        let stripe = Arc::new(StripeHandle::new(
            config.stripe.secret_key.clone(),
            config.stripe.api_base.clone(),
        ));

        let state = AppState {
            upstream_base: config.upstream.api_base.clone(),
            client,
            stripe,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/api/oscar/{*path}", any(proxy::proxy_oscar))
            .route(
                "/api/stripe/create-payment-intent",
                post(payments::handler::create_payment_intent),
            )
            .route("/healthz", get(healthz))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.api_base,
            stripe_configured = self.config.stripe.secret_key.is_some(),
            "gateway listening"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("gateway stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Liveness probe.
async fn healthz() -> StatusCode {
    StatusCode::OK
}
