//! # recon_core: Foundation Types for Swap-Confirmation Reconciliation
//!
//! ## Foundation Layer Role
//!
//! recon_core is the bottom layer of the workspace, providing:
//! - The canonical field registry (`types::field`)
//! - The fixed validation check set (`types::check`)
//! - Typed values and dates (`types::value`, `types::date`)
//! - Alias definitions and the alias book (`alias`)
//! - Confirmation and booking row records (`rows`)
//! - Parsed document form (`document`)
//! - The per-file and batch wire records (`result`)
//!
//! ## Zero Dependency Principle
//!
//! The foundation layer depends on no other workspace crate, with minimal
//! external dependencies:
//! - chrono: date arithmetic
//! - serde/serde_json: wire serialisation
//! - toml: alias book files
//! - thiserror: structured errors
//!
//! ## Wire Compatibility
//!
//! The serialised shape of `result::FileResult` is the contract consumed
//! by the review UI and is preserved bit-exact, including the historical
//! `"infered"` and `"breakbility"` spellings.
//!
//! ## Usage Examples
//!
//! ```rust
//! use recon_core::types::{CanonicalField, Date, ValidationCheck};
//!
//! // Registry lookup
//! let field: CanonicalField = "swap_ccy".parse().unwrap();
//! assert_eq!(field, CanonicalField::SwapCcy);
//!
//! // Dates are ISO 8601
//! let date = Date::parse("2024-01-15").unwrap();
//! assert_eq!(date.to_string(), "2024-01-15");
//!
//! // The check set is fixed at ten entries
//! assert_eq!(ValidationCheck::ALL.len(), 10);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod alias;
pub mod document;
pub mod result;
pub mod rows;
pub mod types;
