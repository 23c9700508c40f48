//! Per-run alias usage ledger.
//!
//! The ledger is the run's only mutable alias state, passed explicitly
//! into each resolution call, never a hidden global. It records which
//! aliases were consulted (touched), which were applied (used, with a
//! count), and which `(field, target)` pairs have been claimed, so a
//! competing alias onto an already-claimed target is pre-empted rather
//! than applied.
//!
//! When documents are processed in parallel, each file accumulates into
//! its own ledger and the per-file ledgers are merged single-threadedly
//! afterwards; no atomic increments are needed and no updates are lost.

use std::collections::HashMap;

use recon_core::alias::{Alias, AliasBook, AliasId};
use recon_core::types::CanonicalField;

#[derive(Clone, Debug, Default)]
struct AliasUsage {
    used: bool,
    count: u32,
    last_seq: Option<u64>,
}

/// Per-run accumulator of alias usage.
///
/// Invariants, enforced by construction and checked in tests:
/// `used == false ⇒ count == 0` and `used == true ⇒ count ≥ 1`.
#[derive(Clone, Debug, Default)]
pub struct RunLedger {
    usage: HashMap<AliasId, AliasUsage>,
    touch_order: Vec<AliasId>,
    claims: HashMap<(CanonicalField, String), AliasId>,
    seq: u64,
}

impl RunLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that an alias was consulted during resolution.
    ///
    /// A touched alias appears in the run report even when it was never
    /// applied.
    pub fn touch(&mut self, id: AliasId) {
        if !self.usage.contains_key(&id) {
            self.usage.insert(id, AliasUsage::default());
            self.touch_order.push(id);
        }
    }

    /// Records one application of an alias on a field, claiming its
    /// `(field, target)` pair for this run.
    pub fn apply(&mut self, id: AliasId, field: CanonicalField, target: &str) {
        self.touch(id);
        self.claims
            .entry((field, target.to_string()))
            .or_insert(id);
        let entry = self.usage.get_mut(&id).expect("touched above");
        entry.used = true;
        entry.count += 1;
        entry.last_seq = Some(self.seq);
        self.seq += 1;
    }

    /// Returns the alias that claimed a `(field, target)` pair, if any.
    pub fn claimant(&self, field: CanonicalField, target: &str) -> Option<AliasId> {
        self.claims.get(&(field, target.to_string())).copied()
    }

    /// Returns the sequence number of the alias's most recent
    /// application, used for most-recently-used tie-breaking.
    pub fn last_used_seq(&self, id: AliasId) -> Option<u64> {
        self.usage.get(&id).and_then(|u| u.last_seq)
    }

    /// Returns `(used, count)` for a touched alias.
    pub fn usage(&self, id: AliasId) -> Option<(bool, u32)> {
        self.usage.get(&id).map(|u| (u.used, u.count))
    }

    /// Returns the number of touched aliases.
    pub fn touched_len(&self) -> usize {
        self.touch_order.len()
    }

    /// Returns whether nothing was touched.
    pub fn is_empty(&self) -> bool {
        self.touch_order.is_empty()
    }

    /// Merges another ledger into this one, single-threadedly.
    ///
    /// Counts add, `used` flags combine, first-seen touch order is kept,
    /// and existing claims win over the other ledger's claims.
    pub fn merge(&mut self, other: RunLedger) {
        let offset = self.seq;
        for id in other.touch_order {
            self.touch(id);
        }
        for (id, theirs) in other.usage {
            let entry = self.usage.get_mut(&id).expect("touched above");
            entry.used |= theirs.used;
            entry.count += theirs.count;
            if let Some(seq) = theirs.last_seq {
                let shifted = seq + offset;
                if entry.last_seq.map_or(true, |s| s < shifted) {
                    entry.last_seq = Some(shifted);
                }
            }
        }
        for (key, id) in other.claims {
            self.claims.entry(key).or_insert(id);
        }
        self.seq = offset + other.seq;
    }

    /// Builds the wire report: every touched alias in first-touch order.
    pub fn report(&self, book: &AliasBook) -> Vec<Alias> {
        self.touch_order
            .iter()
            .map(|id| {
                let def = book.def(*id);
                let usage = &self.usage[id];
                Alias {
                    source_name: def.source_name.clone(),
                    target_name: def.target_name.clone(),
                    used: usage.used,
                    count: usage.count,
                    provenance: def.provenance,
                    on_field: def.on_fields.clone(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recon_core::alias::{AliasDef, Provenance};

    fn book_with(defs: &[(&str, &str, Provenance, CanonicalField)]) -> (AliasBook, Vec<AliasId>) {
        let mut book = AliasBook::new();
        let ids = defs
            .iter()
            .map(|(s, t, p, f)| book.add_alias(AliasDef::new(*s, *t, *p, *f)))
            .collect();
        (book, ids)
    }

    #[test]
    fn test_touch_without_apply() {
        let (book, ids) = book_with(&[(
            "Goldman Sachs International",
            "Goldman Sachs",
            Provenance::Infered,
            CanonicalField::Counterparty,
        )]);

        let mut ledger = RunLedger::new();
        ledger.touch(ids[0]);

        let report = ledger.report(&book);
        assert_eq!(report.len(), 1);
        assert!(!report[0].used);
        assert_eq!(report[0].count, 0);
    }

    #[test]
    fn test_apply_sets_used_and_count() {
        let (book, ids) = book_with(&[(
            "GS Trading",
            "Goldman Sachs",
            Provenance::Infered,
            CanonicalField::Counterparty,
        )]);

        let mut ledger = RunLedger::new();
        ledger.apply(ids[0], CanonicalField::Counterparty, "Goldman Sachs");
        ledger.apply(ids[0], CanonicalField::Counterparty, "Goldman Sachs");

        let report = ledger.report(&book);
        assert!(report[0].used);
        assert_eq!(report[0].count, 2);
        assert_eq!(
            ledger.claimant(CanonicalField::Counterparty, "Goldman Sachs"),
            Some(ids[0])
        );
    }

    #[test]
    fn test_used_count_invariant() {
        let (book, ids) = book_with(&[
            ("a", "A", Provenance::Provided, CanonicalField::Counterparty),
            ("b", "B", Provenance::Infered, CanonicalField::Counterparty),
        ]);

        let mut ledger = RunLedger::new();
        ledger.touch(ids[0]);
        ledger.apply(ids[1], CanonicalField::Counterparty, "B");

        for alias in ledger.report(&book) {
            if alias.used {
                assert!(alias.count >= 1);
            } else {
                assert_eq!(alias.count, 0);
            }
        }
    }

    #[test]
    fn test_touch_order_preserved() {
        let (book, ids) = book_with(&[
            ("first", "F", Provenance::Provided, CanonicalField::Index),
            ("second", "S", Provenance::Provided, CanonicalField::Index),
        ]);

        let mut ledger = RunLedger::new();
        ledger.touch(ids[1]);
        ledger.apply(ids[0], CanonicalField::Index, "F");

        let report = ledger.report(&book);
        assert_eq!(report[0].source_name, "second");
        assert_eq!(report[1].source_name, "first");
    }

    #[test]
    fn test_merge_adds_counts_and_keeps_claims() {
        let (book, ids) = book_with(&[(
            "£",
            "GBP",
            Provenance::Provided,
            CanonicalField::SwapCcy,
        )]);

        let mut a = RunLedger::new();
        a.apply(ids[0], CanonicalField::SwapCcy, "GBP");

        let mut b = RunLedger::new();
        b.apply(ids[0], CanonicalField::SwapCcy, "GBP");
        b.apply(ids[0], CanonicalField::SwapCcy, "GBP");

        a.merge(b);

        let report = a.report(&book);
        assert_eq!(report.len(), 1);
        assert!(report[0].used);
        assert_eq!(report[0].count, 3);
        assert_eq!(
            a.claimant(CanonicalField::SwapCcy, "GBP"),
            Some(ids[0])
        );
    }

    #[test]
    fn test_merge_disjoint_touch_order() {
        let (book, ids) = book_with(&[
            ("a", "A", Provenance::Provided, CanonicalField::Index),
            ("b", "B", Provenance::Provided, CanonicalField::Index),
        ]);

        let mut a = RunLedger::new();
        a.touch(ids[0]);

        let mut b = RunLedger::new();
        b.apply(ids[1], CanonicalField::Index, "B");

        a.merge(b);
        let report = a.report(&book);
        assert_eq!(report.len(), 2);
        assert_eq!(report[0].source_name, "a");
        assert_eq!(report[1].source_name, "b");
        assert_eq!(a.usage(ids[1]), Some((true, 1)));
    }

    #[test]
    fn test_merge_mru_sequence_shifts() {
        let (_, ids) = book_with(&[
            ("a", "A", Provenance::Provided, CanonicalField::Index),
            ("b", "B", Provenance::Provided, CanonicalField::Index),
        ]);

        let mut a = RunLedger::new();
        a.apply(ids[0], CanonicalField::Index, "A");

        let mut b = RunLedger::new();
        b.apply(ids[1], CanonicalField::Index, "B");

        a.merge(b);
        // The merged ledger orders b's application after a's.
        assert!(a.last_used_seq(ids[1]).unwrap() > a.last_used_seq(ids[0]).unwrap());
    }
}
