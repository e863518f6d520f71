//! Client example demonstrating the payment lifecycle against a running server.
//!
//! Run with: cargo run -p payments-app --example client_example --no-default-features --features sqlite

use chrono::Utc;
use payments_client::{ClientError, PaymentsClient};
use payments_hex::{PaymentService, inbound::HttpServer};
use payments_repo::build_repo;
use std::net::SocketAddr;
use tempfile::tempdir;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_env_filter("info").init();

    // Find an available port
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr: SocketAddr = listener.local_addr()?;
    let port = addr.port();
    drop(listener);

    // Use a temp file-backed SQLite DB
    let tmp = tempdir()?;
    let db_path = tmp.path().join("payment_db.db");
    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());

    println!("🚀 Starting server on port {port}...");
    println!("   Database: {db_url}");

    // Build repository (handles connection and migration)
    let repo = build_repo(&db_url).await?;

    // Start server in background
    let service = PaymentService::new(repo);
    let server = HttpServer::new(service);
    let router = server.router();

    let server_addr = format!("127.0.0.1:{port}");
    let server_listener = TcpListener::bind(&server_addr).await?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(server_listener, router.into_make_service()).await {
            eprintln!("server error: {e}");
        }
    });

    // Create client
    let base_url = format!("http://127.0.0.1:{port}");
    let client = PaymentsClient::new(&base_url);

    // ─────────────────────────────────────────────────────────────────────────
    // Demo: Full payment lifecycle
    // ─────────────────────────────────────────────────────────────────────────

    let health = client.health().await?;
    println!("✅ Server health: {health}");

    // Validation failure
    let invalid = client.create_payment("ES01", "ES02", 0.0, Utc::now()).await;
    if let Err(ClientError::Api { status, message }) = &invalid {
        println!("✅ Rejected zero amount: {status} {message}");
    }

    // Create two payments
    let rent = client
        .create_payment("ES01", "ES02", 850.0, Utc::now())
        .await?;
    println!("✅ Created payment {} for {}", rent.uid, rent.amount);

    let refund = client
        .create_payment("ES03", "ES01", 12.5, Utc::now())
        .await?;
    println!("✅ Created payment {} for {}", refund.uid, refund.amount);

    // Process the first one
    let rent = client.mark_processed(rent.uid.as_str()).await?;
    println!(
        "✅ Processed payment {} at {:?}",
        rent.uid, rent.processed_date
    );

    // Processed payments can be neither processed again nor deleted
    match client.delete_payment(rent.uid.as_str()).await {
        Err(ClientError::Api { status, message }) => {
            println!("✅ Delete of processed payment refused: {status} {message}")
        }
        other => println!("⚠️  Unexpected delete outcome: {other:?}"),
    }

    // Delete the unprocessed one
    client.delete_payment(refund.uid.as_str()).await?;
    println!("✅ Deleted payment {}", refund.uid);

    // List all payments
    let payments = client.list_payments().await?;
    println!("\n📋 All payments:");
    for payment in payments {
        println!(
            "   - {} {} -> {}: {} (processed={})",
            payment.uid,
            payment.account_origin,
            payment.account_target,
            payment.amount,
            payment.processed
        );
    }

    println!("\n🎉 Example completed successfully!");

    Ok(())
}
