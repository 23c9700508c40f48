//! Reconciliation Server
//!
//! REST API server for swap-confirmation reconciliation.

use clap::Parser;
use recon_core::alias::AliasBook;
use recon_server::config::{build_config, CliArgs as ConfigCliArgs};
use recon_server::server::Server;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Reconciliation Server - REST API for swap-confirmation review
#[derive(Parser, Debug)]
#[command(name = "recon_server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML format)
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Host address to bind to
    #[arg(long, env = "RECON_SERVER_HOST")]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "RECON_SERVER_PORT")]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RECON_LOG_LEVEL")]
    log_level: Option<String>,

    /// Alias book TOML file
    #[arg(long, env = "RECON_ALIAS_BOOK")]
    alias_book: Option<PathBuf>,
}

impl From<Args> for ConfigCliArgs {
    fn from(args: Args) -> Self {
        ConfigCliArgs {
            config_file: args.config,
            host: args.host,
            port: args.port,
            log_level: args.log_level,
            alias_book: args.alias_book,
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let cli_args: ConfigCliArgs = args.into();
    let config = build_config(&cli_args)?;

    init_tracing(config.log_level.as_filter_str());

    tracing::info!("Reconciliation Server v{}", recon_server::VERSION);
    tracing::info!(
        host = %config.host,
        port = %config.port,
        log_level = %config.log_level,
        environment = %config.environment,
        max_upload_bytes = %config.max_upload_bytes,
        "Server configuration loaded"
    );

    let alias_book = match &config.alias_book {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading alias book");
            AliasBook::from_path(path)?
        }
        None => AliasBook::with_defaults(),
    };
    tracing::info!(aliases = alias_book.len(), "alias store snapshot ready");

    let server = Server::new(config, alias_book);
    tracing::info!(address = %server.socket_addr(), "Starting server");

    server.run().await?;

    Ok(())
}
