//! Reconciliation CLI - Command Line Operations
//!
//! Operational entry point for the reconciliation engine.
//!
//! # Commands
//!
//! - `recon process --booking <file> CONFIRMATION...` - Reconcile
//!   confirmation files against a booking dataset
//! - `recon check` - Check the canonical registry and configuration

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod error;

pub use error::{CliError, Result};

/// Swap-confirmation reconciliation CLI
#[derive(Parser)]
#[command(name = "recon")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconcile confirmation files against a booking dataset
    Process {
        /// Path to the booking reference CSV
        #[arg(short, long)]
        booking: Option<String>,

        /// Confirmation text files to process
        #[arg(required = true)]
        confirmations: Vec<String>,

        /// Alias book TOML file
        #[arg(short, long)]
        alias_book: Option<String>,

        /// Output format (json, pretty)
        #[arg(short, long, default_value = "pretty")]
        format: String,
    },

    /// Check the canonical registry and configuration
    Check,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Process {
            booking,
            confirmations,
            alias_book,
            format,
        } => commands::process::run(
            booking.as_deref(),
            &confirmations,
            alias_book.as_deref(),
            &format,
        ),
        Commands::Check => commands::check::run(),
    }
}
