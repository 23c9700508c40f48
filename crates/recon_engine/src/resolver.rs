//! Alias resolution.
//!
//! Given a raw token (a field label or a field value) the resolver decides
//! whether it exactly matches a canonical form, matches a known alias, or
//! is unmatched. Canonical-first: a value that already parses as the
//! field's kind never creates or touches an alias.
//!
//! Candidate ordering when several aliases apply to the same source value
//! on the same field: `provided` before `infered`, then most-recently-used
//! this run, then alias-book definition order. A candidate whose
//! `(field, target)` pair was already claimed by a different alias this
//! run is pre-empted: it is consulted and reported, but not applied.

use std::cmp::Reverse;

use recon_core::alias::{normalise_label, AliasBook, AliasDef, AliasId, Provenance};
use recon_core::types::{CanonicalField, Date, Direction, FieldValue, ValueKind};

use crate::ledger::RunLedger;

/// Outcome of resolving one raw value against a canonical field.
#[derive(Clone, Debug, PartialEq)]
pub enum ValueOutcome {
    /// The raw value already equals the canonical representation.
    Canonical(FieldValue),
    /// An alias was applied; the value is the parsed alias target.
    Aliased(FieldValue),
    /// No canonical form and no applicable alias.
    Unmatched,
}

impl ValueOutcome {
    /// Returns the resolved value for either successful outcome.
    pub fn value(&self) -> Option<&FieldValue> {
        match self {
            ValueOutcome::Canonical(v) | ValueOutcome::Aliased(v) => Some(v),
            ValueOutcome::Unmatched => None,
        }
    }
}

/// Resolves raw tokens against the alias book.
pub struct AliasResolver<'a> {
    book: &'a AliasBook,
}

impl<'a> AliasResolver<'a> {
    /// Creates a resolver over a book.
    pub fn new(book: &'a AliasBook) -> Self {
        Self { book }
    }

    /// Resolves a document label onto a canonical field.
    ///
    /// Exact case-insensitive match against the canonical names first,
    /// then the book's label aliases. `None` means the label is unknown;
    /// the caller records its normalised form and does not retry it
    /// within the run.
    pub fn resolve_field_name(&self, raw_label: &str) -> Option<CanonicalField> {
        let normalised = normalise_label(raw_label);
        if let Ok(field) = normalised.parse::<CanonicalField>() {
            return Some(field);
        }
        self.book.label_for(raw_label)
    }

    /// Resolves a raw value against a field's expected type.
    ///
    /// Every alias consulted is touched in the ledger; a successful
    /// application increments the alias's count and claims its
    /// `(field, target)` pair for the run.
    pub fn resolve_value(
        &self,
        raw: &str,
        field: CanonicalField,
        ledger: &mut RunLedger,
    ) -> ValueOutcome {
        let trimmed = raw.trim();

        if let Some(value) = self.parse_canonical(trimmed, field) {
            return ValueOutcome::Canonical(value);
        }

        let mut candidates: Vec<(AliasId, &AliasDef)> = self
            .book
            .iter()
            .filter(|(_, def)| {
                def.applies_to(field) && def.source_name.trim().eq_ignore_ascii_case(trimmed)
            })
            .collect();

        if candidates.is_empty() {
            return ValueOutcome::Unmatched;
        }

        candidates.sort_by_key(|(id, def)| {
            (
                provenance_rank(def.provenance),
                Reverse(ledger.last_used_seq(*id).map_or(0, |s| s + 1)),
            )
        });

        let mut chosen: Option<(AliasId, &AliasDef)> = None;
        for (id, def) in &candidates {
            match ledger.claimant(field, &def.target_name) {
                Some(existing) if existing != *id => continue,
                _ => {
                    chosen = Some((*id, *def));
                    break;
                }
            }
        }

        for (id, _) in &candidates {
            ledger.touch(*id);
        }

        match chosen {
            Some((id, def)) => match self.parse_target(&def.target_name, field) {
                Some(value) => {
                    ledger.apply(id, field, &def.target_name);
                    ValueOutcome::Aliased(value)
                }
                // Target does not parse as the field's kind; deterministic
                // fallback is unmatched, the candidate stays reported.
                None => ValueOutcome::Unmatched,
            },
            None => ValueOutcome::Unmatched,
        }
    }

    /// Parses a raw value as the field's canonical representation.
    fn parse_canonical(&self, raw: &str, field: CanonicalField) -> Option<FieldValue> {
        if raw.is_empty() {
            return None;
        }
        match field.kind() {
            ValueKind::Date => Date::parse(raw).ok().map(FieldValue::Date),
            ValueKind::Direction => raw.parse::<Direction>().ok().map(FieldValue::Direction),
            ValueKind::Number => parse_number(raw, self.book).map(FieldValue::Number),
            ValueKind::Flag => parse_flag(raw).map(FieldValue::Flag),
            ValueKind::Text => {
                if self.book.has_vocabulary(field) {
                    self.book
                        .vocabulary_match(field, raw)
                        .map(|canonical| FieldValue::Text(canonical.to_string()))
                } else {
                    Some(FieldValue::Text(raw.to_string()))
                }
            }
        }
    }

    /// Parses an alias target as the field's kind. Text targets are
    /// canonical by definition and accepted verbatim.
    fn parse_target(&self, target: &str, field: CanonicalField) -> Option<FieldValue> {
        let target = target.trim();
        match field.kind() {
            ValueKind::Date => Date::parse(target).ok().map(FieldValue::Date),
            ValueKind::Direction => target.parse::<Direction>().ok().map(FieldValue::Direction),
            ValueKind::Number => target.parse::<f64>().ok().map(FieldValue::Number),
            ValueKind::Flag => parse_flag(target).map(FieldValue::Flag),
            ValueKind::Text => Some(FieldValue::Text(target.to_string())),
        }
    }
}

fn provenance_rank(p: Provenance) -> u8 {
    match p {
        Provenance::Provided => 0,
        Provenance::Infered => 1,
    }
}

/// Parses a numeric value, tolerating digit grouping commas and a leading
/// currency code that matches the settlement-currency vocabulary
/// (`"USD 50,000,000"` is the canonical notional fifty million).
fn parse_number(raw: &str, book: &AliasBook) -> Option<f64> {
    let mut body = raw.trim();
    if let Some((head, rest)) = body.split_once(' ') {
        if book
            .vocabulary_match(CanonicalField::SwapCcy, head)
            .is_some()
        {
            body = rest.trim();
        }
    }
    let cleaned: String = body.chars().filter(|c| *c != ',').collect();
    match cleaned.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(n),
        _ => None,
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "yes" => Some(true),
        "false" | "no" => Some(false),
        _ => None,
    }
}
