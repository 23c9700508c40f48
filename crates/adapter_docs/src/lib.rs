//! Input adapters for the reconciliation service.
//!
//! This crate structures already-extracted inputs for the engine:
//! - `parser`: line-oriented confirmation text → `Document`
//! - `booking`: booking reference CSV → `BookingRow` rows
//!
//! Document text extraction (PDF, OCR) and the inference service that
//! proposes new aliases are external collaborators and stay outside the
//! workspace.

pub mod booking;
pub mod error;
pub mod parser;

pub use booking::{load_booking_csv, load_booking_csv_bytes, load_booking_csv_path};
pub use error::DocError;
pub use parser::parse_text;
