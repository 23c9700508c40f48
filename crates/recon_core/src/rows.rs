//! Confirmation and booking row records.
//!
//! Both records are closed structs over the canonical value space:
//! exactly one optional, typed slot per canonical field, never an open
//! map. A field the source document did not yield (absent, or ambiguous
//! after alias resolution) stays `None` and serialises as JSON `null`.

use crate::types::{
    CanonicalField, Date, Direction, FieldValue, SchemaError, ValueKind,
};

/// One extracted record per identified transaction in a source document.
///
/// Owned by the file result that produced it; immutable once emitted.
///
/// # Examples
///
/// ```
/// use recon_core::rows::ConfirmationRow;
/// use recon_core::types::{CanonicalField, FieldValue};
///
/// let mut row = ConfirmationRow::default();
/// row.set(CanonicalField::Spread, FieldValue::Number(0.002)).unwrap();
/// assert_eq!(row.spread, Some(0.002));
///
/// // Kind mismatches are rejected, never coerced.
/// let err = row.set(
///     CanonicalField::Spread,
///     FieldValue::Text("20bp".to_string()),
/// );
/// assert!(err.is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ConfirmationRow {
    /// Strike (effective) date
    pub strike_date: Option<Date>,
    /// Trade date
    pub trade_date: Option<Date>,
    /// Direction
    pub direction: Option<Direction>,
    /// Swap product type
    pub swap_type: Option<String>,
    /// Floating rate index
    pub index: Option<String>,
    /// Our side of the trade
    pub party_a: Option<String>,
    /// Settlement currency
    pub swap_ccy: Option<String>,
    /// The other side of the trade
    pub counterparty: Option<String>,
    /// Notional units
    pub units: Option<f64>,
    /// Expiry date
    pub expiry_date: Option<Date>,
    /// Early termination right held by party A
    pub early_termination_party_a: Option<bool>,
    /// Benchmark expression
    pub benchmark: Option<String>,
    /// Spread over the index, decimal rate
    pub spread: Option<f64>,
}

impl ConfirmationRow {
    /// Returns the value of a canonical field, if set.
    pub fn get(&self, field: CanonicalField) -> Option<FieldValue> {
        match field {
            CanonicalField::StrikeDate => self.strike_date.map(FieldValue::Date),
            CanonicalField::TradeDate => self.trade_date.map(FieldValue::Date),
            CanonicalField::Direction => self.direction.map(FieldValue::Direction),
            CanonicalField::SwapType => self.swap_type.clone().map(FieldValue::Text),
            CanonicalField::Index => self.index.clone().map(FieldValue::Text),
            CanonicalField::PartyA => self.party_a.clone().map(FieldValue::Text),
            CanonicalField::SwapCcy => self.swap_ccy.clone().map(FieldValue::Text),
            CanonicalField::Counterparty => self.counterparty.clone().map(FieldValue::Text),
            CanonicalField::Units => self.units.map(FieldValue::Number),
            CanonicalField::ExpiryDate => self.expiry_date.map(FieldValue::Date),
            CanonicalField::EarlyTerminationPartyA => {
                self.early_termination_party_a.map(FieldValue::Flag)
            }
            CanonicalField::Benchmark => self.benchmark.clone().map(FieldValue::Text),
            CanonicalField::Spread => self.spread.map(FieldValue::Number),
        }
    }

    /// Sets the value of a canonical field.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::KindMismatch` when the value's kind does not
    /// match the field's declared kind.
    pub fn set(&mut self, field: CanonicalField, value: FieldValue) -> Result<(), SchemaError> {
        let mismatch = |got: ValueKind| SchemaError::KindMismatch {
            field,
            expected: field.kind(),
            got,
        };

        match (field, value) {
            (CanonicalField::StrikeDate, FieldValue::Date(d)) => self.strike_date = Some(d),
            (CanonicalField::TradeDate, FieldValue::Date(d)) => self.trade_date = Some(d),
            (CanonicalField::ExpiryDate, FieldValue::Date(d)) => self.expiry_date = Some(d),
            (CanonicalField::Direction, FieldValue::Direction(d)) => self.direction = Some(d),
            (CanonicalField::SwapType, FieldValue::Text(s)) => self.swap_type = Some(s),
            (CanonicalField::Index, FieldValue::Text(s)) => self.index = Some(s),
            (CanonicalField::PartyA, FieldValue::Text(s)) => self.party_a = Some(s),
            (CanonicalField::SwapCcy, FieldValue::Text(s)) => self.swap_ccy = Some(s),
            (CanonicalField::Counterparty, FieldValue::Text(s)) => self.counterparty = Some(s),
            (CanonicalField::Benchmark, FieldValue::Text(s)) => self.benchmark = Some(s),
            (CanonicalField::Units, FieldValue::Number(n)) => self.units = Some(n),
            (CanonicalField::Spread, FieldValue::Number(n)) => self.spread = Some(n),
            (CanonicalField::EarlyTerminationPartyA, FieldValue::Flag(b)) => {
                self.early_termination_party_a = Some(b)
            }
            (_, other) => return Err(mismatch(other.kind())),
        }
        Ok(())
    }

    /// Returns whether no field is set.
    pub fn is_empty(&self) -> bool {
        CanonicalField::ALL.iter().all(|f| self.get(*f).is_none())
    }
}

/// One reference record from the booking dataset.
///
/// Keyed by the external `sivcom` identifier; shares the canonical value
/// space with confirmation rows plus the `breakability` terms column.
/// Read-only for the matcher and validator.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BookingRow {
    /// External booking system identifier
    pub sivcom: i64,
    /// Counterparty canonical name
    pub counterparty: Option<String>,
    /// Notional units
    pub units: Option<f64>,
    /// Floating rate index
    pub index: Option<String>,
    /// Settlement currency
    pub swap_ccy: Option<String>,
    /// Spread over the index, decimal rate
    pub spread: Option<f64>,
    /// Break terms (e.g. `Bilateral`, `Mutual`)
    pub breakability: Option<String>,
    /// Strike date
    pub strike_date: Option<Date>,
    /// Expiry date
    pub expiry_date: Option<Date>,
    /// Direction
    pub direction: Option<Direction>,
}

impl BookingRow {
    /// Returns the booking-side value for a canonical field, where the
    /// dataset carries one.
    ///
    /// Fields with no booking column (`trade_date`, `swap_type`,
    /// `party_a`, `benchmark`, `early_termination_party_a`) return `None`.
    pub fn get(&self, field: CanonicalField) -> Option<FieldValue> {
        match field {
            CanonicalField::StrikeDate => self.strike_date.map(FieldValue::Date),
            CanonicalField::ExpiryDate => self.expiry_date.map(FieldValue::Date),
            CanonicalField::Direction => self.direction.map(FieldValue::Direction),
            CanonicalField::Index => self.index.clone().map(FieldValue::Text),
            CanonicalField::SwapCcy => self.swap_ccy.clone().map(FieldValue::Text),
            CanonicalField::Counterparty => self.counterparty.clone().map(FieldValue::Text),
            CanonicalField::Units => self.units.map(FieldValue::Number),
            CanonicalField::Spread => self.spread.map(FieldValue::Number),
            _ => None,
        }
    }
}
