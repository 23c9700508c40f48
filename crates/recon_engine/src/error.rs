//! Error types for the reconciliation engine.

use thiserror::Error;

use recon_core::alias::AliasBookError;
use recon_core::types::SchemaError;

/// Engine error type.
///
/// Per-file failures are isolated by the batch pipeline and reported as
/// error marker entries; systemic failures (booking data, alias store)
/// abort the whole batch.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Invalid input (no files, unreadable document)
    #[error("Input error: {0}")]
    Input(String),

    /// Canonical schema violation
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Booking reference dataset unavailable or malformed
    #[error("Booking data error: {0}")]
    BookingData(String),

    /// Alias store unavailable or malformed
    #[error("Alias store error: {0}")]
    AliasStore(#[from] AliasBookError),

    /// Unexpected failure while processing one file
    #[error("Internal error: {0}")]
    Internal(String),

    /// Batch cancelled before this file started
    #[error("Cancelled before processing")]
    Cancelled,
}

impl EngineError {
    /// Create an input error
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Create a booking data error
    pub fn booking_data(msg: impl Into<String>) -> Self {
        Self::BookingData(msg.into())
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
