//! End-to-end pipeline tests over realistic confirmation shapes.

use approx::assert_relative_eq;
use recon_core::alias::{AliasBook, AliasDef, Provenance};
use recon_core::document::{DetectedField, DetectedRecord, Document};
use recon_core::rows::BookingRow;
use recon_core::types::{CanonicalField, Date, Direction};
use recon_engine::{process_batch, process_file, BookingSet};

fn date(s: &str) -> Date {
    Date::parse(s).unwrap()
}

fn gbp_booking() -> BookingSet {
    BookingSet::new(vec![BookingRow {
        sivcom: 2001,
        counterparty: Some("Goldman Sachs".to_string()),
        units: Some(100_000_000.0),
        index: Some("SONIA".to_string()),
        swap_ccy: Some("GBP".to_string()),
        spread: Some(0.0075),
        breakability: Some("Mutual".to_string()),
        strike_date: Some(date("2024-01-01")),
        expiry_date: Some(date("2027-01-01")),
        direction: Some(Direction::Short),
    }])
}

fn gbp_book() -> AliasBook {
    let mut book = AliasBook::with_defaults();
    book.add_alias(AliasDef::new(
        "£",
        "GBP",
        Provenance::Provided,
        CanonicalField::SwapCcy,
    ));
    book.add_alias(AliasDef::new(
        "GS Trading",
        "Goldman Sachs",
        Provenance::Infered,
        CanonicalField::Counterparty,
    ));
    book.add_alias(AliasDef::new(
        "Goldman Sachs International",
        "Goldman Sachs",
        Provenance::Infered,
        CanonicalField::Counterparty,
    ));
    book.add_alias(AliasDef::new(
        "75bps",
        "0.0075",
        Provenance::Infered,
        CanonicalField::Spread,
    ));
    book.add_alias(AliasDef::new(
        "75 basis points",
        "0.0075",
        Provenance::Infered,
        CanonicalField::Spread,
    ));
    book
}

/// Two rows naming the same counterparty by different spellings: the
/// first alias claims the target, the second is reported unused, and the
/// second spelling lands in the unmatched pool.
fn two_spelling_doc() -> Document {
    Document::new(
        "confirmation_unmatched_003.pdf",
        "SWAP CONFIRMATION REPORT\nParticipant 2: Goldman Sachs",
        vec![
            DetectedRecord::new(vec![
                DetectedField::new("Strike Date", "2024-01-01"),
                DetectedField::new("Expiry Date", "2027-01-01"),
                DetectedField::new("Direction", "short"),
                DetectedField::new("Index", "SONIA"),
                DetectedField::new("Swap Ccy", "£"),
                DetectedField::new("Counterparty", "GS Trading"),
                DetectedField::new("Units", "100,000,000"),
                DetectedField::new("Spread", "75bps"),
                DetectedField::new("Benchmark", "SONIA+75bps"),
                DetectedField::new("Early Termination Party A", "true"),
            ]),
            DetectedRecord::new(vec![
                DetectedField::new("Strike Date", "2024-01-01"),
                DetectedField::new("Expiry Date", "2027-01-01"),
                DetectedField::new("Direction", "short"),
                DetectedField::new("Index", "SONIA"),
                DetectedField::new("Swap Ccy", "£"),
                DetectedField::new("Counterparty", "Goldman Sachs International"),
                DetectedField::new("Units", "100,000,000"),
                DetectedField::new("Spread", "75 basis points"),
                DetectedField::new("Benchmark", "SONIA+75bps"),
                DetectedField::new("Early Termination Party A", "true"),
            ]),
        ],
    )
}

#[test]
fn two_spellings_one_used_alias() {
    let booking = gbp_booking();
    let result = process_batch(
        &[two_spelling_doc()],
        &booking,
        &gbp_book(),
        "booking_master.csv",
        None,
    );

    let file = result.files[0].as_ok().expect("file processed");

    // Both rows extracted, both resolved onto the same booking row.
    assert_eq!(file.confirmation_rows.len(), 2);
    assert_eq!(file.booking_matches_rows.len(), 1);
    assert_eq!(file.booking_matches_rows[0].sivcom, 2001);

    // Row 1 fully resolved through aliases.
    let row = &file.confirmation_rows[0];
    assert_eq!(row.swap_ccy.as_deref(), Some("GBP"));
    assert_eq!(row.counterparty.as_deref(), Some("Goldman Sachs"));
    assert_relative_eq!(row.spread.unwrap(), 0.0075);

    // Row 2's counterparty and spread lost the claim race and stay null.
    let row = &file.confirmation_rows[1];
    assert!(row.counterparty.is_none());
    assert!(row.spread.is_none());

    // Exactly one counterparty alias used; the competitor reported
    // untouched with a zero count.
    let cp_aliases: Vec<_> = file
        .aliases_used
        .iter()
        .filter(|a| a.on_field.contains(&CanonicalField::Counterparty))
        .collect();
    assert_eq!(cp_aliases.len(), 2);
    assert_eq!(cp_aliases.iter().filter(|a| a.used).count(), 1);
    let unused = cp_aliases.iter().find(|a| !a.used).unwrap();
    assert_eq!(unused.source_name, "Goldman Sachs International");
    assert_eq!(unused.count, 0);

    // The losing spellings are pooled as unmatched values.
    assert_eq!(
        file.unmatched_values
            .get(CanonicalField::Counterparty)
            .unwrap(),
        &["Goldman Sachs International"]
    );
    assert_eq!(
        file.unmatched_values.get(CanonicalField::Spread).unwrap(),
        &["75 basis points"]
    );
}

#[test]
fn alias_invariants_hold_in_results() {
    let booking = gbp_booking();
    let result = process_batch(
        &[two_spelling_doc()],
        &booking,
        &gbp_book(),
        "b.csv",
        None,
    );

    for entry in &result.files {
        let file = entry.as_ok().unwrap();
        for alias in &file.aliases_used {
            if alias.used {
                assert!(alias.count >= 1, "{} used with zero count", alias.source_name);
            } else {
                assert_eq!(alias.count, 0, "{} unused with count", alias.source_name);
            }
        }
    }
}

#[test]
fn unknown_fields_disjoint_from_canonical_fields() {
    let doc = Document::new(
        "confirmation_complex_005.pdf",
        "COMPLEX SWAP AGREEMENT",
        vec![DetectedRecord::new(vec![
            DetectedField::new("Reference No", "SWAP/2024/005"),
            DetectedField::new("Broker", "ICAP"),
            DetectedField::new("Strike Date", "2024-03-20"),
            DetectedField::new("Fixed Rate", "1.25% per annum"),
        ])],
    );

    let booking = gbp_booking();
    let result = process_batch(&[doc], &booking, &gbp_book(), "b.csv", None);
    let file = result.files[0].as_ok().unwrap();

    let canonical: Vec<&str> = file.canonical_fields.iter().map(|f| f.name()).collect();
    for unknown in &file.unknown_fields {
        assert!(
            !canonical.contains(&unknown.as_str()),
            "{} reported both unknown and canonical",
            unknown
        );
    }
    assert_eq!(
        file.unknown_fields,
        vec!["reference_no", "broker", "fixed_rate"]
    );
}

#[test]
fn unmatched_value_keys_are_canonical_and_non_empty() {
    let booking = gbp_booking();
    let result = process_batch(
        &[two_spelling_doc()],
        &booking,
        &gbp_book(),
        "b.csv",
        None,
    );
    let file = result.files[0].as_ok().unwrap();

    assert!(!file.unmatched_values.is_empty());
    for (field, values) in file.unmatched_values.iter() {
        assert!(CanonicalField::ALL.contains(&field));
        assert!(!values.is_empty());
    }
}

#[test]
fn canonical_values_touch_no_alias() {
    // A document made purely of canonical forms produces an empty alias
    // report even with a populated alias book.
    let doc = Document::new(
        "confirmation_perfect_006.pdf",
        "STANDARD SWAP CONFIRMATION",
        vec![DetectedRecord::new(vec![
            DetectedField::new("Strike Date", "2024-01-01"),
            DetectedField::new("Expiry Date", "2027-01-01"),
            DetectedField::new("Direction", "Short"),
            DetectedField::new("Swap Ccy", "GBP"),
            DetectedField::new("Counterparty", "Goldman Sachs"),
            DetectedField::new("Units", "100,000,000"),
            DetectedField::new("Spread", "0.0075"),
            DetectedField::new("Index", "SONIA"),
            DetectedField::new("Benchmark", "SONIA+75bps"),
            DetectedField::new("Early Termination Party A", "true"),
        ])],
    );

    let booking = gbp_booking();
    let result = process_batch(&[doc], &booking, &gbp_book(), "b.csv", None);
    let file = result.files[0].as_ok().unwrap();

    assert!(file.aliases_used.is_empty());
    assert!(file.unmatched_values.is_empty());
    assert!(file.validation_status.all_pass());
}

#[test]
fn wire_shape_of_batch_response() {
    let booking = gbp_booking();
    let result = process_batch(
        &[two_spelling_doc()],
        &booking,
        &gbp_book(),
        "booking_master.csv",
        None,
    );

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["booking_filename"], "booking_master.csv");

    let file = &json["files"][0];
    assert_eq!(file["filename"], "confirmation_unmatched_003.pdf");
    assert_eq!(
        file["validation_status"].as_object().unwrap().len(),
        10
    );
    assert!(file["validation_status"]
        .as_object()
        .unwrap()
        .contains_key("breakbility"));
    assert_eq!(file["booking_matches_rows"][0]["sivcom"], 2001);
    assert_eq!(file["confirmation_rows"][0]["direction"], "short");
    assert_eq!(file["canonical_fields"][0], "strike_date");

    let alias = &file["aliases_used"][0];
    assert!(alias.get("source").is_some());
    assert!(alias.get("on_field").is_some());
}

#[test]
fn round_trip_alias_target_feeds_validation() {
    // Source "75bps" resolves to numeric 0.0075, which is exactly what the
    // booking comparison and the spread check consume.
    let booking = gbp_booking();
    let (result, _) = process_file(
        &Document::new(
            "one_row.pdf",
            "",
            vec![DetectedRecord::new(vec![
                DetectedField::new("Strike Date", "2024-01-01"),
                DetectedField::new("Expiry Date", "2027-01-01"),
                DetectedField::new("Direction", "short"),
                DetectedField::new("Index", "SONIA"),
                DetectedField::new("Swap Ccy", "£"),
                DetectedField::new("Counterparty", "GS Trading"),
                DetectedField::new("Units", "100,000,000"),
                DetectedField::new("Spread", "75bps"),
                DetectedField::new("Benchmark", "SONIA+75bps"),
                DetectedField::new("Early Termination Party A", "true"),
            ])],
        ),
        &booking,
        &{
            let mut book = gbp_book();
            booking.seed_vocabulary(&mut book);
            book
        },
    )
    .unwrap();

    assert_eq!(result.confirmation_rows[0].spread, Some(0.0075));
    assert!(result.validation_status.spread);
    assert_eq!(result.booking_matches_rows.len(), 1);
}
