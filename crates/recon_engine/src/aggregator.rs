//! Result aggregation and the batch pipeline.
//!
//! `process_file` combines extraction, matching, validation and the alias
//! report into one `FileResult` without re-deriving any field. Nothing is
//! emitted partially: an unexpected failure inside one file replaces the
//! whole entry with an error marker, and other files are unaffected.
//!
//! `process_batch` fans the per-file work out over rayon. Files share no
//! mutable state; each accumulates its own ledger, merged afterwards into
//! a run summary. A cancel token stops new files from starting while
//! letting in-flight files finish, so a truncated result is never emitted.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;

use recon_core::alias::AliasBook;
use recon_core::document::Document;
use recon_core::result::{FileEntry, FileError, FileResult, ProcessResult};
use recon_core::rows::BookingRow;
use recon_core::types::CanonicalField;

use crate::error::EngineError;
use crate::extractor::extract;
use crate::ledger::RunLedger;
use crate::matcher::{pool_matches, BookingMatcher, BookingSet};
use crate::validator::validate;

/// Leading excerpt length carried in each file result.
const TEXT_EXCERPT_CHARS: usize = 600;

/// Cooperative cancellation flag for an in-flight batch.
///
/// Cancelling stops new per-file work from launching; files already in
/// flight complete normally.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Creates an uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns whether cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Processes one document into a file result plus its usage ledger.
///
/// Pure combination of the pipeline stages; the caller owns error
/// isolation and ledger merging.
pub fn process_file(
    doc: &Document,
    booking: &BookingSet,
    book: &AliasBook,
) -> Result<(FileResult, RunLedger), EngineError> {
    let mut ledger = RunLedger::new();
    let extraction = extract(doc, book, &mut ledger)?;

    let matcher = BookingMatcher::new(booking);
    let matches_per_row: Vec<Vec<&BookingRow>> = extraction
        .rows
        .iter()
        .map(|row| matcher.matches_for(row))
        .collect();

    let validation_status = validate(&extraction.rows, &matches_per_row);
    let pooled: Vec<BookingRow> = pool_matches(&matches_per_row)
        .into_iter()
        .cloned()
        .collect();

    if pooled.len() != extraction.rows.len() {
        tracing::info!(
            filename = %doc.filename,
            rows = extraction.rows.len(),
            matches = pooled.len(),
            "confirmation row count differs from booking match count"
        );
    }

    let result = FileResult {
        filename: doc.filename.clone(),
        text_excerpt: doc.excerpt(TEXT_EXCERPT_CHARS),
        unmatched_values: extraction.unmatched_values,
        validation_status,
        confirmation_rows: extraction.rows,
        booking_matches_rows: pooled,
        unknown_fields: extraction.unknown_fields,
        canonical_fields: CanonicalField::ALL.to_vec(),
        aliases_used: ledger.report(book),
    };

    Ok((result, ledger))
}

/// Processes a batch of documents into the wire response.
///
/// Per-file failures are isolated into error marker entries; the batch
/// itself always produces a result. Systemic failures (unloadable booking
/// data or alias store) are the caller's responsibility and abort before
/// this function is reached.
pub fn process_batch(
    docs: &[Document],
    booking: &BookingSet,
    book: &AliasBook,
    booking_filename: &str,
    cancel: Option<&CancelToken>,
) -> ProcessResult {
    tracing::info!(
        files = docs.len(),
        booking_rows = booking.len(),
        "processing batch"
    );

    let mut book = book.clone();
    booking.seed_vocabulary(&mut book);

    let outcomes: Vec<(FileEntry, Option<RunLedger>)> = docs
        .par_iter()
        .map(|doc| {
            if cancel.map_or(false, CancelToken::is_cancelled) {
                return (
                    FileEntry::Err(FileError {
                        filename: doc.filename.clone(),
                        error: EngineError::Cancelled.to_string(),
                    }),
                    None,
                );
            }

            match catch_unwind(AssertUnwindSafe(|| process_file(doc, booking, &book))) {
                Ok(Ok((result, ledger))) => (FileEntry::Ok(result), Some(ledger)),
                Ok(Err(err)) => {
                    tracing::warn!(filename = %doc.filename, error = %err, "file failed");
                    (
                        FileEntry::Err(FileError {
                            filename: doc.filename.clone(),
                            error: err.to_string(),
                        }),
                        None,
                    )
                }
                Err(_) => {
                    tracing::error!(filename = %doc.filename, "file processing panicked");
                    (
                        FileEntry::Err(FileError {
                            filename: doc.filename.clone(),
                            error: "Internal error while processing file".to_string(),
                        }),
                        None,
                    )
                }
            }
        })
        .collect();

    let mut files = Vec::with_capacity(outcomes.len());
    let mut run_ledger = RunLedger::new();
    for (entry, ledger) in outcomes {
        files.push(entry);
        if let Some(ledger) = ledger {
            run_ledger.merge(ledger);
        }
    }
    tracing::debug!(
        aliases_touched = run_ledger.touched_len(),
        "run alias usage merged"
    );

    ProcessResult {
        booking_filename: booking_filename.to_string(),
        files,
    }
}
