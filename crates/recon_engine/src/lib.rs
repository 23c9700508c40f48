//! # recon_engine: Swap-Confirmation Reconciliation Engine
//!
//! The reconciliation kernel behind the review UI:
//!
//! - `resolver`: alias resolution for field labels and values
//! - `ledger`: the per-run alias usage accumulator
//! - `extractor`: document pairs → confirmation rows
//! - `matcher`: confirmation rows → booking candidates
//! - `validator`: the fixed per-file check set
//! - `aggregator`: per-file assembly and the rayon batch pipeline
//!
//! Documents are embarrassingly parallel: the only shared state is the
//! read-only canonical registry, the read-only alias book, and the
//! booking dataset. Alias usage accumulates per file and is merged
//! single-threadedly, so no updates are lost without any atomics on the
//! hot path.

pub mod aggregator;
pub mod error;
pub mod extractor;
pub mod ledger;
pub mod matcher;
pub mod resolver;
pub mod validator;

pub use aggregator::{process_batch, process_file, CancelToken};
pub use error::EngineError;
pub use extractor::{extract, Extraction};
pub use ledger::RunLedger;
pub use matcher::{BookingMatcher, BookingSet};
pub use resolver::{AliasResolver, ValueOutcome};
pub use validator::validate;
