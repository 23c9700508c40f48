//! Booking reference dataset loader.
//!
//! Loads booking rows from headered CSV with the canonical column set:
//! `sivcom, counterparty, units, index, swap_ccy, spread, breakability,
//! strike_date, expiry_date, direction`. Empty cells become `None`.

use std::io::Read;
use std::path::Path;

use recon_core::rows::BookingRow;

use crate::error::DocError;

/// Loads booking rows from a CSV reader.
///
/// # Errors
///
/// Returns `DocError::Csv` with the offending line number when a row
/// fails to parse; the dataset is all-or-nothing, a malformed reference
/// file is a systemic failure.
pub fn load_booking_csv<R: Read>(reader: R) -> Result<Vec<BookingRow>, DocError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, record) in csv_reader.deserialize::<BookingRow>().enumerate() {
        // Line 1 is the header, data starts at line 2.
        let row = record.map_err(|e| DocError::csv_row(index + 2, e.to_string()))?;
        rows.push(row);
    }

    tracing::debug!(rows = rows.len(), "loaded booking dataset");
    Ok(rows)
}

/// Loads booking rows from a CSV file on disk.
pub fn load_booking_csv_path(path: &Path) -> Result<Vec<BookingRow>, DocError> {
    let file = std::fs::File::open(path)?;
    load_booking_csv(file)
}

/// Loads booking rows from raw uploaded bytes.
pub fn load_booking_csv_bytes(bytes: &[u8]) -> Result<Vec<BookingRow>, DocError> {
    load_booking_csv(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use recon_core::types::Direction;

    const HEADER: &str =
        "sivcom,counterparty,units,index,swap_ccy,spread,breakability,strike_date,expiry_date,direction";

    #[test]
    fn test_load_full_rows() {
        let csv = format!(
            "{}\n1001,JPMorgan Chase,50000000,SOFR,USD,0.005,Bilateral,2024-01-15,2026-01-15,long\n\
             2001,Goldman Sachs,100000000,SONIA,GBP,0.0075,Mutual,2024-01-01,2027-01-01,short",
            HEADER
        );

        let rows = load_booking_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 2);

        assert_eq!(rows[0].sivcom, 1001);
        assert_eq!(rows[0].counterparty.as_deref(), Some("JPMorgan Chase"));
        assert_eq!(rows[0].units, Some(50_000_000.0));
        assert_eq!(rows[0].spread, Some(0.005));
        assert_eq!(rows[0].direction, Some(Direction::Long));
        assert_eq!(
            rows[0].strike_date,
            Some("2024-01-15".parse().unwrap())
        );

        assert_eq!(rows[1].breakability.as_deref(), Some("Mutual"));
        assert_eq!(rows[1].direction, Some(Direction::Short));
    }

    #[test]
    fn test_empty_cells_become_none() {
        let csv = format!(
            "{}\n4001,Westpac Banking Corporation,5000000000,TONA,JPY,0.0035,,2024-03-20,2034-03-20,long",
            HEADER
        );

        let rows = load_booking_csv(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(rows[0].breakability.is_none());
        assert_eq!(rows[0].index.as_deref(), Some("TONA"));
    }

    #[test]
    fn test_malformed_row_reports_line() {
        let csv = format!(
            "{}\n1001,JPMorgan Chase,50000000,SOFR,USD,0.005,Bilateral,2024-01-15,2026-01-15,long\n\
             not_a_number,X,1,SOFR,USD,0.005,,2024-01-15,2026-01-15,long",
            HEADER
        );

        let err = load_booking_csv(csv.as_bytes()).unwrap_err();
        match err {
            DocError::Csv { line, .. } => assert_eq!(line, 3),
            other => panic!("expected Csv error, got {:?}", other),
        }
    }

    #[test]
    fn test_header_only_is_empty() {
        let rows = load_booking_csv(HEADER.as_bytes()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_bytes_helper() {
        let csv = format!(
            "{}\n1001,JPMorgan Chase,50000000,SOFR,USD,0.005,Bilateral,2024-01-15,2026-01-15,long",
            HEADER
        );
        let rows = load_booking_csv_bytes(csv.as_bytes()).unwrap();
        assert_eq!(rows.len(), 1);
    }
}
