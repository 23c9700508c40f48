//! Validation.
//!
//! Computes one boolean per validation check for a file, aggregated
//! across its rows: a check fails if it fails for any row. A row with no
//! booking match fails every check (nothing to validate against), and a
//! file with no rows fails everything (nothing was validated).

use recon_core::rows::{BookingRow, ConfirmationRow};
use recon_core::types::{ValidationCheck, ValidationStatus};

/// Computes the file-level validation status.
///
/// `matches_per_row` carries the matcher's output for each row, in row
/// order.
pub fn validate(
    rows: &[ConfirmationRow],
    matches_per_row: &[Vec<&BookingRow>],
) -> ValidationStatus {
    let mut status = ValidationStatus::default();
    if rows.is_empty() {
        return status;
    }

    for check in ValidationCheck::ALL {
        let pass = rows
            .iter()
            .zip(matches_per_row)
            .all(|(row, matches)| check_row(*check, row, matches));
        status.set(*check, pass);
    }
    status
}

/// One check against one row and its booking matches.
fn check_row(check: ValidationCheck, row: &ConfirmationRow, matches: &[&BookingRow]) -> bool {
    // Every inspected confirmation field must have resolved.
    for field in check.fields() {
        if row.get(*field).is_none() {
            return false;
        }
    }

    // No booking match: nothing to validate against, the check fails.
    if matches.is_empty() {
        return false;
    }

    matches.iter().all(|booking| agrees(check, row, booking))
}

/// Whether one booking row agrees with the row for a check.
fn agrees(check: ValidationCheck, row: &ConfirmationRow, booking: &BookingRow) -> bool {
    match check {
        // The booking dataset carries no benchmark column; presence plus
        // an existing match is all the check can assert.
        ValidationCheck::Benchmark => true,

        // Break terms must be booked for the break check to hold.
        ValidationCheck::Breakability => booking.breakability.is_some(),

        _ => {
            let field = check.fields()[0];
            match (row.get(field), booking.get(field)) {
                (Some(ours), Some(theirs)) => ours == theirs,
                // The booking row does not carry the column; no evidence
                // against the row.
                _ => true,
            }
        }
    }
}
