//! Booking matching.
//!
//! For each confirmation row the matcher selects the booking rows that
//! plausibly represent the same transaction. Candidate filtering compares
//! a small set of high-confidence keys; a candidate survives confirmation
//! when every remaining comparable field also agrees. The reference
//! dataset is read-only throughout.

use recon_core::rows::{BookingRow, ConfirmationRow};
use recon_core::types::CanonicalField;

use recon_core::alias::AliasBook;

/// High-confidence keys used for candidate filtering.
///
/// A key is only compared when both sides carry a value; an unresolved
/// confirmation field (e.g. an unmatched counterparty) simply drops out of
/// the comparison rather than failing the match.
pub const KEY_FIELDS: [CanonicalField; 5] = [
    CanonicalField::Counterparty,
    CanonicalField::SwapCcy,
    CanonicalField::Units,
    CanonicalField::StrikeDate,
    CanonicalField::ExpiryDate,
];

/// Fields compared during the confirmation stage.
const CONFIRM_FIELDS: [CanonicalField; 3] = [
    CanonicalField::Direction,
    CanonicalField::Index,
    CanonicalField::Spread,
];

/// Minimum number of comparable key fields required for a candidate.
const MIN_COMPARABLE_KEYS: usize = 2;

/// Read-only wrapper over the booking reference dataset.
#[derive(Clone, Debug, Default)]
pub struct BookingSet {
    rows: Vec<BookingRow>,
}

impl BookingSet {
    /// Creates a set from loaded rows.
    pub fn new(rows: Vec<BookingRow>) -> Self {
        Self { rows }
    }

    /// Returns the rows.
    pub fn rows(&self) -> &[BookingRow] {
        &self.rows
    }

    /// Returns the number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Extends the alias book's canonical vocabularies from this
    /// dataset's counterparty, index and currency columns.
    ///
    /// The booking reference is the canonical value source for those text
    /// fields: a document value equal to a booked value is canonical, not
    /// an alias candidate.
    pub fn seed_vocabulary(&self, book: &mut AliasBook) {
        book.extend_vocabulary(
            CanonicalField::Counterparty,
            self.rows.iter().filter_map(|r| r.counterparty.as_deref()),
        );
        book.extend_vocabulary(
            CanonicalField::Index,
            self.rows.iter().filter_map(|r| r.index.as_deref()),
        );
        book.extend_vocabulary(
            CanonicalField::SwapCcy,
            self.rows.iter().filter_map(|r| r.swap_ccy.as_deref()),
        );
    }
}

/// Matches confirmation rows against a booking set.
pub struct BookingMatcher<'a> {
    set: &'a BookingSet,
}

impl<'a> BookingMatcher<'a> {
    /// Creates a matcher over a booking set.
    pub fn new(set: &'a BookingSet) -> Self {
        Self { set }
    }

    /// Returns every booking row judged to represent the same transaction
    /// as `row`, in dataset order.
    ///
    /// Zero results and multiple equally-good results are both valid
    /// outcomes; the matcher never silently picks one of several.
    pub fn matches_for(&self, row: &ConfirmationRow) -> Vec<&'a BookingRow> {
        self.set
            .rows
            .iter()
            .filter(|booking| is_candidate(row, booking) && confirms(row, booking))
            .collect()
    }
}

/// Candidate filter: all comparable key fields equal, with at least
/// `MIN_COMPARABLE_KEYS` of them comparable.
fn is_candidate(row: &ConfirmationRow, booking: &BookingRow) -> bool {
    let mut comparable = 0;
    for field in KEY_FIELDS {
        match (row.get(field), booking.get(field)) {
            (Some(ours), Some(theirs)) => {
                if ours != theirs {
                    return false;
                }
                comparable += 1;
            }
            _ => continue,
        }
    }
    comparable >= MIN_COMPARABLE_KEYS
}

/// Confirmation stage: every comparable remaining field agrees.
fn confirms(row: &ConfirmationRow, booking: &BookingRow) -> bool {
    CONFIRM_FIELDS.iter().all(|field| {
        match (row.get(*field), booking.get(*field)) {
            (Some(ours), Some(theirs)) => ours == theirs,
            _ => true,
        }
    })
}

/// Pools per-row match lists into the file-level list, deduplicating by
/// `sivcom` in first-seen order.
pub fn pool_matches<'a>(per_row: &[Vec<&'a BookingRow>]) -> Vec<&'a BookingRow> {
    let mut seen: Vec<i64> = Vec::new();
    let mut pooled = Vec::new();
    for matches in per_row {
        for booking in matches {
            if !seen.contains(&booking.sivcom) {
                seen.push(booking.sivcom);
                pooled.push(*booking);
            }
        }
    }
    pooled
}

#[cfg(test)]
mod tests {
    use super::*;
    use recon_core::types::{Date, Direction};

    fn booking(sivcom: i64, counterparty: &str) -> BookingRow {
        BookingRow {
            sivcom,
            counterparty: Some(counterparty.to_string()),
            units: Some(100_000_000.0),
            index: Some("SONIA".to_string()),
            swap_ccy: Some("GBP".to_string()),
            spread: Some(0.0075),
            breakability: Some("Mutual".to_string()),
            strike_date: Some(Date::parse("2024-01-01").unwrap()),
            expiry_date: Some(Date::parse("2027-01-01").unwrap()),
            direction: Some(Direction::Short),
        }
    }

    fn matching_row() -> ConfirmationRow {
        ConfirmationRow {
            strike_date: Some(Date::parse("2024-01-01").unwrap()),
            expiry_date: Some(Date::parse("2027-01-01").unwrap()),
            direction: Some(Direction::Short),
            index: Some("SONIA".to_string()),
            swap_ccy: Some("GBP".to_string()),
            counterparty: Some("Goldman Sachs".to_string()),
            units: Some(100_000_000.0),
            spread: Some(0.0075),
            ..Default::default()
        }
    }

    #[test]
    fn test_exact_match() {
        let set = BookingSet::new(vec![booking(2001, "Goldman Sachs")]);
        let matcher = BookingMatcher::new(&set);

        let matches = matcher.matches_for(&matching_row());
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].sivcom, 2001);
    }

    #[test]
    fn test_unresolved_counterparty_still_matches() {
        // The counterparty never resolved; the remaining keys carry the
        // match on their own.
        let set = BookingSet::new(vec![booking(2001, "Goldman Sachs")]);
        let matcher = BookingMatcher::new(&set);

        let mut row = matching_row();
        row.counterparty = None;
        row.spread = None;

        let matches = matcher.matches_for(&row);
        assert_eq!(matches.len(), 1);
    }

    #[test]
    fn test_key_disagreement_rejects() {
        let set = BookingSet::new(vec![booking(2001, "Goldman Sachs")]);
        let matcher = BookingMatcher::new(&set);

        let mut row = matching_row();
        row.units = Some(50_000_000.0);

        assert!(matcher.matches_for(&row).is_empty());
    }

    #[test]
    fn test_confirm_stage_disagreement_rejects() {
        let set = BookingSet::new(vec![booking(2001, "Goldman Sachs")]);
        let matcher = BookingMatcher::new(&set);

        let mut row = matching_row();
        row.direction = Some(Direction::Long);

        assert!(matcher.matches_for(&row).is_empty());
    }

    #[test]
    fn test_too_few_comparable_keys_rejects() {
        let set = BookingSet::new(vec![booking(2001, "Goldman Sachs")]);
        let matcher = BookingMatcher::new(&set);

        let row = ConfirmationRow {
            swap_ccy: Some("GBP".to_string()),
            ..Default::default()
        };

        assert!(matcher.matches_for(&row).is_empty());
    }

    #[test]
    fn test_zero_candidates_is_empty_not_error() {
        let set = BookingSet::new(vec![]);
        let matcher = BookingMatcher::new(&set);
        assert!(matcher.matches_for(&matching_row()).is_empty());
    }

    #[test]
    fn test_multiple_equally_good_candidates_all_returned() {
        // Two bookings of the same trade shape; the matcher must return
        // both rather than silently picking one.
        let set = BookingSet::new(vec![
            booking(2001, "Goldman Sachs"),
            booking(2002, "Goldman Sachs"),
        ]);
        let matcher = BookingMatcher::new(&set);

        let matches = matcher.matches_for(&matching_row());
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].sivcom, 2001);
        assert_eq!(matches[1].sivcom, 2002);
    }

    #[test]
    fn test_booking_null_fields_do_not_block() {
        let mut b = booking(2001, "Goldman Sachs");
        b.spread = None;
        b.direction = None;
        let set = BookingSet::new(vec![b]);
        let matcher = BookingMatcher::new(&set);

        assert_eq!(matcher.matches_for(&matching_row()).len(), 1);
    }

    #[test]
    fn test_pool_matches_dedup_by_sivcom() {
        let b1 = booking(2001, "Goldman Sachs");
        let b2 = booking(2002, "Goldman Sachs");
        let per_row = vec![vec![&b1], vec![&b1, &b2]];

        let pooled = pool_matches(&per_row);
        assert_eq!(pooled.len(), 2);
        assert_eq!(pooled[0].sivcom, 2001);
        assert_eq!(pooled[1].sivcom, 2002);
    }

    #[test]
    fn test_seed_vocabulary_from_dataset() {
        let set = BookingSet::new(vec![booking(2001, "Goldman Sachs")]);
        let mut book = AliasBook::new();
        set.seed_vocabulary(&mut book);

        assert_eq!(
            book.vocabulary_match(CanonicalField::Counterparty, "goldman sachs"),
            Some("Goldman Sachs")
        );
        assert_eq!(
            book.vocabulary_match(CanonicalField::Index, "sonia"),
            Some("SONIA")
        );
        assert!(book.has_vocabulary(CanonicalField::SwapCcy));
    }
}
