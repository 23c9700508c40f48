//! Error types for the CLI.

use thiserror::Error;

use adapter_docs::DocError;
use recon_core::alias::AliasBookError;
use recon_engine::EngineError;

/// CLI result type
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid command line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Input adapter error
    #[error("Input error: {0}")]
    Doc(#[from] DocError),

    /// Alias book error
    #[error("Alias book error: {0}")]
    AliasBook(#[from] AliasBookError),

    /// Engine error
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Report serialisation error
    #[error("Report error: {0}")]
    Report(#[from] serde_json::Error),
}
