//! Error types for the input adapters.

use thiserror::Error;

/// Adapter error type.
#[derive(Debug, Error)]
pub enum DocError {
    /// Failed to read an input file
    #[error("Failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed booking dataset row
    #[error("Booking dataset error at line {line}: {message}")]
    Csv {
        /// 1-based line number including the header
        line: usize,
        /// Short parse failure description
        message: String,
    },

    /// Input is not valid text
    #[error("Input is not valid UTF-8: {0}")]
    Encoding(String),
}

impl DocError {
    /// Create a CSV row error
    pub fn csv_row(line: usize, message: impl Into<String>) -> Self {
        Self::Csv {
            line,
            message: message.into(),
        }
    }
}
