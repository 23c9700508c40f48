//! Canonical field registry.
//!
//! All confirmation and booking data is normalised onto a fixed set of
//! canonical fields, defined at process start and stable across a run.

use std::fmt;
use std::str::FromStr;

use super::error::SchemaError;
use super::value::ValueKind;

/// One of the fixed canonical attribute names.
///
/// Every detected document label either resolves onto one of these fields
/// or is reported as an unknown field. Wire names are snake_case
/// (`strike_date`, `swap_ccy`, ...).
///
/// # Examples
///
/// ```
/// use recon_core::types::{CanonicalField, ValueKind};
///
/// assert_eq!(CanonicalField::StrikeDate.name(), "strike_date");
/// assert_eq!(CanonicalField::Units.kind(), ValueKind::Number);
///
/// // Case-insensitive parse
/// let field: CanonicalField = "Swap_Ccy".parse().unwrap();
/// assert_eq!(field, CanonicalField::SwapCcy);
/// ```
#[non_exhaustive]
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    serde::Serialize,
    serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalField {
    /// Strike (effective) date of the swap
    StrikeDate,
    /// Date the trade was executed
    TradeDate,
    /// Long or short
    Direction,
    /// Swap product type (IRS, OIS, ...)
    SwapType,
    /// Floating rate index (SOFR, SONIA, ...)
    Index,
    /// Our side of the trade
    PartyA,
    /// Swap settlement currency
    SwapCcy,
    /// The other side of the trade
    Counterparty,
    /// Notional units
    Units,
    /// Expiry (termination) date
    ExpiryDate,
    /// Whether party A holds an early termination right
    EarlyTerminationPartyA,
    /// Benchmark rate expression
    Benchmark,
    /// Spread over the index, as a decimal rate
    Spread,
}

impl CanonicalField {
    /// The full registry, in declaration order.
    ///
    /// This is the `canonical_fields` list reported with every file
    /// result.
    pub const ALL: &'static [CanonicalField] = &[
        CanonicalField::StrikeDate,
        CanonicalField::TradeDate,
        CanonicalField::Direction,
        CanonicalField::SwapType,
        CanonicalField::Index,
        CanonicalField::PartyA,
        CanonicalField::SwapCcy,
        CanonicalField::Counterparty,
        CanonicalField::Units,
        CanonicalField::ExpiryDate,
        CanonicalField::EarlyTerminationPartyA,
        CanonicalField::Benchmark,
        CanonicalField::Spread,
    ];

    /// Returns the snake_case wire name.
    pub fn name(&self) -> &'static str {
        match self {
            CanonicalField::StrikeDate => "strike_date",
            CanonicalField::TradeDate => "trade_date",
            CanonicalField::Direction => "direction",
            CanonicalField::SwapType => "swap_type",
            CanonicalField::Index => "index",
            CanonicalField::PartyA => "party_a",
            CanonicalField::SwapCcy => "swap_ccy",
            CanonicalField::Counterparty => "counterparty",
            CanonicalField::Units => "units",
            CanonicalField::ExpiryDate => "expiry_date",
            CanonicalField::EarlyTerminationPartyA => "early_termination_party_a",
            CanonicalField::Benchmark => "benchmark",
            CanonicalField::Spread => "spread",
        }
    }

    /// Returns the kind of value this field carries.
    pub fn kind(&self) -> ValueKind {
        match self {
            CanonicalField::StrikeDate
            | CanonicalField::TradeDate
            | CanonicalField::ExpiryDate => ValueKind::Date,
            CanonicalField::Direction => ValueKind::Direction,
            CanonicalField::Units | CanonicalField::Spread => ValueKind::Number,
            CanonicalField::EarlyTerminationPartyA => ValueKind::Flag,
            CanonicalField::SwapType
            | CanonicalField::Index
            | CanonicalField::PartyA
            | CanonicalField::SwapCcy
            | CanonicalField::Counterparty
            | CanonicalField::Benchmark => ValueKind::Text,
        }
    }
}

impl FromStr for CanonicalField {
    type Err = SchemaError;

    /// Parses a snake_case field name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, SchemaError> {
        let normalised = s.trim().to_lowercase();
        CanonicalField::ALL
            .iter()
            .copied()
            .find(|f| f.name() == normalised)
            .ok_or_else(|| SchemaError::UnknownField(s.to_string()))
    }
}

impl fmt::Display for CanonicalField {
    /// Formats as the wire name.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
