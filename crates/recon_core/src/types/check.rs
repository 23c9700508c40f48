//! Validation checks and the per-file status map.
//!
//! The check set is fixed and distinct from the canonical field set: check
//! names are stable across all files in a run so the UI's aggregate
//! percentages stay comparable. Wire names carry spaces, and `breakbility`
//! keeps its historical wire spelling.

use std::fmt;
use std::str::FromStr;

use super::error::SchemaError;
use super::field::CanonicalField;

/// One of the fixed validation checks computed per file.
///
/// # Examples
///
/// ```
/// use recon_core::types::{CanonicalField, ValidationCheck};
///
/// assert_eq!(ValidationCheck::SwapCcy.name(), "swap ccy");
/// assert_eq!(ValidationCheck::Breakability.name(), "breakbility");
/// assert_eq!(
///     ValidationCheck::Spread.fields(),
///     &[CanonicalField::Spread]
/// );
/// ```
#[derive(
    Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum ValidationCheck {
    /// Strike date agrees with the booking record
    #[serde(rename = "strike date")]
    StrikeDate,
    /// Expiry date agrees with the booking record
    #[serde(rename = "expiry date")]
    ExpiryDate,
    /// Direction agrees with the booking record
    #[serde(rename = "direction")]
    Direction,
    /// Index agrees with the booking record
    #[serde(rename = "index")]
    Index,
    /// Spread agrees with the booking record
    #[serde(rename = "spread")]
    Spread,
    /// Settlement currency agrees with the booking record
    #[serde(rename = "swap ccy")]
    SwapCcy,
    /// Benchmark expression is present
    #[serde(rename = "benchmark")]
    Benchmark,
    /// Counterparty agrees with the booking record
    #[serde(rename = "counterparty")]
    Counterparty,
    /// Notional units agree with the booking record
    #[serde(rename = "units")]
    Units,
    /// Break terms are present on both sides (wire name `breakbility`)
    #[serde(rename = "breakbility")]
    Breakability,
}

impl ValidationCheck {
    /// The fixed check set, in wire order.
    pub const ALL: &'static [ValidationCheck] = &[
        ValidationCheck::StrikeDate,
        ValidationCheck::ExpiryDate,
        ValidationCheck::Direction,
        ValidationCheck::Index,
        ValidationCheck::Spread,
        ValidationCheck::SwapCcy,
        ValidationCheck::Benchmark,
        ValidationCheck::Counterparty,
        ValidationCheck::Units,
        ValidationCheck::Breakability,
    ];

    /// Returns the wire name of this check.
    pub fn name(&self) -> &'static str {
        match self {
            ValidationCheck::StrikeDate => "strike date",
            ValidationCheck::ExpiryDate => "expiry date",
            ValidationCheck::Direction => "direction",
            ValidationCheck::Index => "index",
            ValidationCheck::Spread => "spread",
            ValidationCheck::SwapCcy => "swap ccy",
            ValidationCheck::Benchmark => "benchmark",
            ValidationCheck::Counterparty => "counterparty",
            ValidationCheck::Units => "units",
            ValidationCheck::Breakability => "breakbility",
        }
    }

    /// Returns the canonical fields this check inspects on the
    /// confirmation side.
    ///
    /// The breakability check inspects the early-termination flag; the
    /// booking-side `breakability` column is compared by the validator
    /// directly.
    pub fn fields(&self) -> &'static [CanonicalField] {
        match self {
            ValidationCheck::StrikeDate => &[CanonicalField::StrikeDate],
            ValidationCheck::ExpiryDate => &[CanonicalField::ExpiryDate],
            ValidationCheck::Direction => &[CanonicalField::Direction],
            ValidationCheck::Index => &[CanonicalField::Index],
            ValidationCheck::Spread => &[CanonicalField::Spread],
            ValidationCheck::SwapCcy => &[CanonicalField::SwapCcy],
            ValidationCheck::Benchmark => &[CanonicalField::Benchmark],
            ValidationCheck::Counterparty => &[CanonicalField::Counterparty],
            ValidationCheck::Units => &[CanonicalField::Units],
            ValidationCheck::Breakability => &[CanonicalField::EarlyTerminationPartyA],
        }
    }
}

impl FromStr for ValidationCheck {
    type Err = SchemaError;

    /// Parses a wire check name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, SchemaError> {
        let normalised = s.trim().to_lowercase();
        ValidationCheck::ALL
            .iter()
            .copied()
            .find(|c| c.name() == normalised)
            .ok_or_else(|| SchemaError::UnknownCheck(s.to_string()))
    }
}

impl fmt::Display for ValidationCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Per-file validation outcome: one boolean per check.
///
/// A closed struct rather than an open map, so the wire always carries
/// exactly the fixed 10-key set.
///
/// # Examples
///
/// ```
/// use recon_core::types::{ValidationCheck, ValidationStatus};
///
/// let mut status = ValidationStatus::default();
/// assert!(!status.all_pass());
///
/// status.set(ValidationCheck::Index, true);
/// assert!(status.get(ValidationCheck::Index));
/// assert_eq!(status.passed_count(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ValidationStatus {
    /// Strike date check
    #[serde(rename = "strike date")]
    pub strike_date: bool,
    /// Expiry date check
    #[serde(rename = "expiry date")]
    pub expiry_date: bool,
    /// Direction check
    pub direction: bool,
    /// Index check
    pub index: bool,
    /// Spread check
    pub spread: bool,
    /// Settlement currency check
    #[serde(rename = "swap ccy")]
    pub swap_ccy: bool,
    /// Benchmark check
    pub benchmark: bool,
    /// Counterparty check
    pub counterparty: bool,
    /// Units check
    pub units: bool,
    /// Break terms check (wire name `breakbility`)
    #[serde(rename = "breakbility")]
    pub breakability: bool,
}

impl ValidationStatus {
    /// Returns the outcome of one check.
    pub fn get(&self, check: ValidationCheck) -> bool {
        match check {
            ValidationCheck::StrikeDate => self.strike_date,
            ValidationCheck::ExpiryDate => self.expiry_date,
            ValidationCheck::Direction => self.direction,
            ValidationCheck::Index => self.index,
            ValidationCheck::Spread => self.spread,
            ValidationCheck::SwapCcy => self.swap_ccy,
            ValidationCheck::Benchmark => self.benchmark,
            ValidationCheck::Counterparty => self.counterparty,
            ValidationCheck::Units => self.units,
            ValidationCheck::Breakability => self.breakability,
        }
    }

    /// Sets the outcome of one check.
    pub fn set(&mut self, check: ValidationCheck, pass: bool) {
        match check {
            ValidationCheck::StrikeDate => self.strike_date = pass,
            ValidationCheck::ExpiryDate => self.expiry_date = pass,
            ValidationCheck::Direction => self.direction = pass,
            ValidationCheck::Index => self.index = pass,
            ValidationCheck::Spread => self.spread = pass,
            ValidationCheck::SwapCcy => self.swap_ccy = pass,
            ValidationCheck::Benchmark => self.benchmark = pass,
            ValidationCheck::Counterparty => self.counterparty = pass,
            ValidationCheck::Units => self.units = pass,
            ValidationCheck::Breakability => self.breakability = pass,
        }
    }

    /// Returns whether every check passed.
    pub fn all_pass(&self) -> bool {
        ValidationCheck::ALL.iter().all(|c| self.get(*c))
    }

    /// Returns the number of passing checks.
    pub fn passed_count(&self) -> usize {
        ValidationCheck::ALL.iter().filter(|c| self.get(**c)).count()
    }
}
