//! Row extraction.
//!
//! Converts a parsed document's detected label/value pairs into zero or
//! more confirmation rows. Rows preserve document order and share no
//! extraction state; their unmatched-value contributions are pooled into
//! one file-level map. Labels with no canonical mapping become unknown
//! fields, deduplicated in first-seen order.

use recon_core::alias::{normalise_label, AliasBook};
use recon_core::document::Document;
use recon_core::result::UnmatchedValues;
use recon_core::rows::ConfirmationRow;

use crate::error::EngineError;
use crate::ledger::RunLedger;
use crate::resolver::{AliasResolver, ValueOutcome};

/// Output of extracting one document.
#[derive(Clone, Debug, Default)]
pub struct Extraction {
    /// Extracted rows, document order
    pub rows: Vec<ConfirmationRow>,
    /// File-level pool of unmatched values
    pub unmatched_values: UnmatchedValues,
    /// Labels with no canonical mapping, normalised, first-seen order
    pub unknown_fields: Vec<String>,
}

/// Extracts confirmation rows from a parsed document.
///
/// The ledger accumulates alias usage for the file; unresolved values
/// leave the row field `null` and are recorded in the unmatched pool.
pub fn extract(
    doc: &Document,
    book: &AliasBook,
    ledger: &mut RunLedger,
) -> Result<Extraction, EngineError> {
    let resolver = AliasResolver::new(book);
    let mut extraction = Extraction::default();

    for record in &doc.records {
        let mut row = ConfirmationRow::default();

        for detected in &record.fields {
            let Some(field) = resolver.resolve_field_name(&detected.label) else {
                let normalised = normalise_label(&detected.label);
                if !normalised.is_empty()
                    && !extraction.unknown_fields.contains(&normalised)
                {
                    extraction.unknown_fields.push(normalised);
                }
                continue;
            };

            let Some(raw) = detected.value.as_deref() else {
                continue;
            };

            match resolver.resolve_value(raw, field, ledger) {
                ValueOutcome::Canonical(value) | ValueOutcome::Aliased(value) => {
                    row.set(field, value)?;
                }
                ValueOutcome::Unmatched => {
                    extraction.unmatched_values.record(field, raw.trim());
                }
            }
        }

        extraction.rows.push(row);
    }

    Ok(extraction)
}
