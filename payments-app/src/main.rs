//! # Payments Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Initialize the repository adapter
//! - Create the payment service
//! - Start the HTTP server

mod config;

use opentelemetry::global;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payments_hex::{PaymentService, inbound::HttpServer};
use payments_repo::build_repo;

fn init_tracer(endpoint: &str) -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // Use gRPC exporter with batch processing (non-blocking)
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("payments-service"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = config::Config::from_env()?;

    // Initialize OpenTelemetry tracing when a collector is configured
    let otel = config
        .otlp_endpoint
        .as_deref()
        .map(init_tracer)
        .transpose()?;
    let (telemetry, otel_provider) = match otel {
        Some((tracer, provider)) => (
            Some(tracing_opentelemetry::layer().with_tracer(tracer)),
            Some(provider),
        ),
        None => (None, None),
    };

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,payments_app=debug,payments_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    tracing::info!("Starting payments server on {}", config.server_addr());
    tracing::info!("Using database: {}", config.redacted_database_url());

    // Build repository (handles connection and migration)
    let repo = build_repo(&config.database_url()).await?;

    // Create the payment service
    let service = PaymentService::new(repo);

    // Create and run the HTTP server
    let server = HttpServer::new(service);
    server.run(&config.server_addr()).await?;

    // Ensure traces are flushed before exit
    if let Some(provider) = otel_provider {
        let _ = provider.shutdown();
    }
    Ok(())
}
