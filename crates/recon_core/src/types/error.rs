//! Error types for the foundation layer.
//!
//! This module provides:
//! - `DateError`: Errors from date construction and parsing
//! - `SchemaError`: Errors from canonical schema lookups and typed-value
//!   assignment

use thiserror::Error;

use super::field::CanonicalField;
use super::value::ValueKind;

/// Date-related errors.
///
/// # Variants
/// - `InvalidDate`: Invalid date components (e.g., February 30th)
/// - `ParseError`: Failed to parse an ISO 8601 date string
///
/// # Examples
/// ```
/// use recon_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse a date string.
    #[error("Date parse error: {0}")]
    ParseError(String),
}

/// Canonical schema errors.
///
/// # Variants
/// - `UnknownField`: A name that maps to no canonical field
/// - `UnknownCheck`: A name that maps to no validation check
/// - `KindMismatch`: A typed value assigned to a field of another kind
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// Name does not correspond to any canonical field.
    #[error("Unknown canonical field: {0}")]
    UnknownField(String),

    /// Name does not correspond to any validation check.
    #[error("Unknown validation check: {0}")]
    UnknownCheck(String),

    /// Value kind does not match the field's declared kind.
    #[error("Kind mismatch on {field}: expected {expected}, got {got}")]
    KindMismatch {
        /// The field being assigned
        field: CanonicalField,
        /// The kind the field declares
        expected: ValueKind,
        /// The kind of the offered value
        got: ValueKind,
    },
}
