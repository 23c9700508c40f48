//! Process command implementation
//!
//! Reconciles confirmation text files against a booking CSV and prints
//! the batch report as JSON.

use std::path::Path;

use tracing::info;

use adapter_docs::{load_booking_csv_path, parse_text};
use recon_core::alias::AliasBook;
use recon_core::document::Document;
use recon_engine::{process_batch, BookingSet};

use crate::{CliError, Result};

/// Run the process command
pub fn run(
    booking: Option<&str>,
    confirmations: &[String],
    alias_book: Option<&str>,
    format: &str,
) -> Result<()> {
    info!("Starting reconciliation...");
    info!("  Booking: {}", booking.unwrap_or("(none)"));
    info!("  Confirmations: {}", confirmations.len());

    if format != "json" && format != "pretty" {
        return Err(CliError::InvalidArgument(format!(
            "Unknown format: {}. Supported: json, pretty",
            format
        )));
    }

    let book = match alias_book {
        Some(path) => {
            if !Path::new(path).exists() {
                return Err(CliError::FileNotFound(path.to_string()));
            }
            AliasBook::from_path(Path::new(path))?
        }
        None => AliasBook::with_defaults(),
    };

    let (booking_filename, booking_set) = match booking {
        Some(path) => {
            if !Path::new(path).exists() {
                return Err(CliError::FileNotFound(path.to_string()));
            }
            let rows = load_booking_csv_path(Path::new(path))?;
            let filename = Path::new(path)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.to_string());
            (filename, BookingSet::new(rows))
        }
        None => (String::new(), BookingSet::default()),
    };

    let mut documents: Vec<Document> = Vec::with_capacity(confirmations.len());
    for path in confirmations {
        if !Path::new(path).exists() {
            return Err(CliError::FileNotFound(path.clone()));
        }
        let text = std::fs::read_to_string(path)?;
        let filename = Path::new(path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.clone());
        documents.push(parse_text(&filename, &text));
    }

    let result = process_batch(&documents, &booking_set, &book, &booking_filename, None);

    let rendered = match format {
        "pretty" => serde_json::to_string_pretty(&result)?,
        _ => serde_json::to_string(&result)?,
    };
    println!("{}", rendered);

    info!("Reconciliation complete");
    Ok(())
}
