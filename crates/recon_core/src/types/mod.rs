//! Foundation types for the reconciliation service.
//!
//! This module provides:
//! - `CanonicalField`: the fixed canonical field registry (`field`)
//! - `ValidationCheck`, `ValidationStatus`: the fixed check set (`check`)
//! - `Date`: ISO 8601 date wrapper (`date`)
//! - `Direction`, `FieldValue`, `ValueKind`: typed values (`value`)
//! - `DateError`, `SchemaError`: structured errors (`error`)

pub mod check;
pub mod date;
pub mod error;
pub mod field;
pub mod value;

pub use check::{ValidationCheck, ValidationStatus};
pub use date::Date;
pub use error::{DateError, SchemaError};
pub use field::CanonicalField;
pub use value::{Direction, FieldValue, ValueKind};
