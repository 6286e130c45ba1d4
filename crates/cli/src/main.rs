//! Regalia CLI - Database migrations, seeding and reconciliation jobs.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! regalia-cli migrate
//!
//! # Seed the database with a demo dataset
//! regalia-cli seed
//!
//! # Tag Shopify customers whose events reached group size
//! regalia-cli job tag-group-customers --min-invited 4 --after 2026-01-01T00:00:00Z
//!
//! # Archive Shopify bundles for deactivated looks
//! regalia-cli job archive-looks
//!
//! # Merge duplicate accounts (expects exactly two per email)
//! regalia-cli job dedupe-users
//!
//! # Deactivate Shopify codes for redeemed personal discounts
//! regalia-cli job deactivate-discounts
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "regalia-cli")]
#[command(author, version, about = "Regalia CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed the database with a demo dataset
    Seed,
    /// Run a Shopify reconciliation job
    Job {
        #[command(subcommand)]
        job: JobCommand,
    },
}

#[derive(Subcommand)]
enum JobCommand {
    /// Tag Shopify customers owning events with enough invited attendees
    TagGroupCustomers {
        /// Minimum number of active invited attendees
        #[arg(long, default_value_t = 4)]
        min_invited: i64,

        /// Only consider events created after this instant (RFC 3339)
        #[arg(long)]
        after: DateTime<Utc>,
    },
    /// Archive Shopify bundle products for deactivated looks
    ArchiveLooks,
    /// Merge accounts sharing an email address
    DedupeUsers,
    /// Deactivate Shopify codes for redeemed personal discounts
    DeactivateDiscounts {
        /// Code prefix to select (defaults to the personal prefix)
        #[arg(long)]
        code_prefix: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed => commands::seed::run().await?,
        Commands::Job { job } => match job {
            JobCommand::TagGroupCustomers { min_invited, after } => {
                commands::job::tag_group_customers(min_invited, after).await?;
            }
            JobCommand::ArchiveLooks => commands::job::archive_looks().await?,
            JobCommand::DedupeUsers => commands::job::dedupe_users().await?,
            JobCommand::DeactivateDiscounts { code_prefix } => {
                commands::job::deactivate_discounts(code_prefix.as_deref()).await?;
            }
        },
    }
    Ok(())
}
