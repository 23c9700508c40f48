//! Check command implementation
//!
//! Prints the canonical registry and check set so operators can confirm
//! what a run will normalise onto.

use recon_core::alias::AliasBook;
use recon_core::types::{CanonicalField, ValidationCheck};

use crate::Result;

/// Run the check command
pub fn run() -> Result<()> {
    println!("Canonical fields ({}):", CanonicalField::ALL.len());
    for field in CanonicalField::ALL {
        println!("  {:<28} {}", field.name(), field.kind());
    }

    println!("\nValidation checks ({}):", ValidationCheck::ALL.len());
    for check in ValidationCheck::ALL {
        println!("  {}", check.name());
    }

    let book = AliasBook::with_defaults();
    println!("\nDefault alias book: {} value aliases", book.len());

    Ok(())
}
