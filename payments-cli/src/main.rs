//! Payments CLI
//!
//! Command-line interface for the Payments API.

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

use payments_client::PaymentsClient;

#[derive(Parser)]
#[command(name = "payments")]
#[command(author, version, about = "Payments API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Payments API
    #[arg(
        long,
        env = "PAYMENTS_API_URL",
        default_value = payments_client::DEFAULT_BASE_URL
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Payment operations
    Payment {
        #[command(subcommand)]
        action: PaymentCommands,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum PaymentCommands {
    /// List all payments
    List,
    /// Get payment details
    Get {
        /// Payment uid
        uid: String,
    },
    /// Create a new payment
    Create {
        /// Source account
        #[arg(long)]
        origin: String,
        /// Destination account
        #[arg(long)]
        target: String,
        /// Amount, strictly positive
        #[arg(long)]
        amount: f64,
        /// Payment date (RFC 3339); defaults to now
        #[arg(long)]
        date: Option<DateTime<Utc>>,
    },
    /// Mark a payment as processed
    Process {
        /// Payment uid
        uid: String,
    },
    /// Delete an unprocessed payment
    Delete {
        /// Payment uid
        uid: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = PaymentsClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Payment { action } => match action {
            PaymentCommands::List => {
                let payments = client.list_payments().await?;
                println!("{}", serde_json::to_string_pretty(&payments)?);
            }
            PaymentCommands::Get { uid } => {
                let payment = client.get_payment(&uid).await?;
                println!("{}", serde_json::to_string_pretty(&payment)?);
            }
            PaymentCommands::Create {
                origin,
                target,
                amount,
                date,
            } => {
                let date = date.unwrap_or_else(Utc::now);
                let payment = client
                    .create_payment(&origin, &target, amount, date)
                    .await?;
                println!("{}", serde_json::to_string_pretty(&payment)?);
            }
            PaymentCommands::Process { uid } => {
                let payment = client.mark_processed(&uid).await?;
                println!("{}", serde_json::to_string_pretty(&payment)?);
            }
            PaymentCommands::Delete { uid } => {
                client.delete_payment(&uid).await?;
                println!("✓ Payment {} deleted", uid);
            }
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_create() {
        let cli = Cli::try_parse_from([
            "payments",
            "payment",
            "create",
            "--origin",
            "A",
            "--target",
            "B",
            "--amount",
            "12.5",
            "--date",
            "2024-03-01T10:00:00Z",
        ])
        .unwrap();

        match cli.command {
            Commands::Payment {
                action:
                    PaymentCommands::Create {
                        origin,
                        target,
                        amount,
                        date,
                    },
            } => {
                assert_eq!(origin, "A");
                assert_eq!(target, "B");
                assert_eq!(amount, 12.5);
                assert!(date.is_some());
            }
            _ => panic!("expected payment create"),
        }
    }

    #[test]
    fn test_parse_process_uses_api_url() {
        let cli = Cli::try_parse_from([
            "payments",
            "--api-url",
            "http://payments:9000",
            "payment",
            "process",
            "abc",
        ])
        .unwrap();

        assert_eq!(cli.api_url, "http://payments:9000");
        assert!(matches!(
            cli.command,
            Commands::Payment {
                action: PaymentCommands::Process { .. }
            }
        ));
    }
}
