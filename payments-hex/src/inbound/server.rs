//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, patch},
};
use tower_http::trace::TraceLayer;

use payments_types::PaymentRepository;

use super::handlers::{self, AppState};
use crate::PaymentService;

/// HTTP Server for the Payments API.
pub struct HttpServer<R: PaymentRepository> {
    state: Arc<AppState<R>>,
}

impl<R: PaymentRepository> HttpServer<R> {
    /// Creates a new HTTP server with the given service.
    pub fn new(service: PaymentService<R>) -> Self {
        Self {
            state: Arc::new(AppState { service }),
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api-docs/openapi.json", get(handlers::openapi_json))
            .route(
                "/api/v1/payments",
                get(handlers::list_payments::<R>).post(handlers::create_payment::<R>),
            )
            .route(
                "/api/v1/payments/uid/{uid}",
                get(handlers::get_payment::<R>).delete(handlers::delete_payment::<R>),
            )
            .route(
                "/api/v1/payments/uid/{uid}/processed",
                patch(handlers::mark_processed::<R>),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
