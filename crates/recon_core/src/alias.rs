//! Alias definitions and the alias book.
//!
//! An alias is a recorded source→target transformation: a literal token
//! observed in a source document (`"£"`, `"GS Trading"`, `"75bps"`) mapped
//! onto a canonical value (`"GBP"`, `"Goldman Sachs"`, `"0.0075"`).
//! Aliases are either pre-configured (`provided`) or inferred by an
//! external service ahead of the run (`infered`, the wire spelling).
//!
//! The `AliasBook` is the in-memory snapshot of the persisted alias store
//! consumed by a run: value aliases, document-label aliases, and the
//! canonical vocabularies used to decide whether a text value is already
//! canonical. The book is read-only during a run; per-run usage lives in
//! the engine's ledger.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use thiserror::Error;

use crate::types::{CanonicalField, SchemaError};

/// Where an alias came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    /// Pre-configured in the alias store
    Provided,
    /// Inferred by the external inference service (wire spelling `infered`)
    Infered,
}

impl Provenance {
    /// Returns the wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Provided => "provided",
            Provenance::Infered => "infered",
        }
    }
}

impl FromStr for Provenance {
    type Err = String;

    /// Parses the wire form; the conventional spelling is accepted on
    /// input but never emitted.
    fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_lowercase().as_str() {
            "provided" => Ok(Provenance::Provided),
            "infered" | "inferred" => Ok(Provenance::Infered),
            other => Err(format!("unknown provenance: {}", other)),
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A reported alias with its usage for one run.
///
/// This is the wire record carried in `aliases_used`. Invariants:
/// `used == false ⇒ count == 0` and `used == true ⇒ count ≥ 1`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Alias {
    /// The literal token observed in the source document
    pub source_name: String,
    /// The canonical value it resolves to
    pub target_name: String,
    /// Whether the alias was applied at least once this run
    pub used: bool,
    /// Number of applications this run
    pub count: u32,
    /// Provenance (wire field name `source`)
    #[serde(rename = "source")]
    pub provenance: Provenance,
    /// The canonical fields the alias applies on
    pub on_field: Vec<CanonicalField>,
}

/// A configured alias transformation, before any usage tracking.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AliasDef {
    /// The literal source token
    pub source_name: String,
    /// The canonical target value
    pub target_name: String,
    /// Provenance of the definition
    pub provenance: Provenance,
    /// Fields the alias is scoped to
    pub on_fields: Vec<CanonicalField>,
}

impl AliasDef {
    /// Creates a new alias definition scoped to one field.
    pub fn new(
        source_name: impl Into<String>,
        target_name: impl Into<String>,
        provenance: Provenance,
        field: CanonicalField,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            target_name: target_name.into(),
            provenance,
            on_fields: vec![field],
        }
    }

    /// Returns whether the definition is scoped to `field`.
    pub fn applies_to(&self, field: CanonicalField) -> bool {
        self.on_fields.contains(&field)
    }
}

/// Opaque handle to an alias definition within one book.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AliasId(usize);

impl AliasId {
    /// Returns the underlying index.
    #[inline]
    pub fn index(&self) -> usize {
        self.0
    }
}

/// Errors from loading an alias book.
#[derive(Error, Debug)]
pub enum AliasBookError {
    /// Failed to read the book file
    #[error("Failed to read alias book: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the book contents
    #[error("Failed to parse alias book: {0}")]
    Parse(String),

    /// A label mapped onto an unknown canonical field
    #[error("Alias book schema error: {0}")]
    Schema(#[from] SchemaError),
}

/// Normalises a document label to its snake_case form.
///
/// Lowercases, collapses runs of non-alphanumeric characters into a single
/// underscore, and trims leading/trailing underscores. This is the form
/// unknown fields are reported in.
///
/// # Examples
///
/// ```
/// use recon_core::alias::normalise_label;
///
/// assert_eq!(normalise_label("Trade Ref"), "trade_ref");
/// assert_eq!(normalise_label("  Settlement Method: "), "settlement_method");
/// ```
pub fn normalise_label(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut pending_sep = false;
    for ch in label.trim().chars() {
        if ch.is_alphanumeric() {
            if pending_sep && !out.is_empty() {
                out.push('_');
            }
            pending_sep = false;
            for lower in ch.to_lowercase() {
                out.push(lower);
            }
        } else {
            pending_sep = true;
        }
    }
    out
}

/// The run's snapshot of the alias store.
///
/// Holds value aliases (definition order is significant for tie-breaking),
/// label aliases mapping normalised document labels onto canonical fields,
/// and per-field canonical vocabularies for text fields.
///
/// # Examples
///
/// ```
/// use recon_core::alias::{AliasBook, AliasDef, Provenance};
/// use recon_core::types::CanonicalField;
///
/// let mut book = AliasBook::with_defaults();
/// book.add_alias(AliasDef::new(
///     "JPM",
///     "JPMorgan Chase",
///     Provenance::Provided,
///     CanonicalField::Counterparty,
/// ));
///
/// assert_eq!(
///     book.label_for("Effective Date"),
///     Some(CanonicalField::StrikeDate)
/// );
/// assert_eq!(book.vocabulary_match(CanonicalField::SwapCcy, "usd"), Some("USD"));
/// ```
#[derive(Clone, Debug, Default)]
pub struct AliasBook {
    defs: Vec<AliasDef>,
    labels: HashMap<String, CanonicalField>,
    vocab: HashMap<CanonicalField, Vec<String>>,
}

impl AliasBook {
    /// Creates an empty book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a book seeded with the standard label aliases and
    /// vocabularies.
    ///
    /// The label set covers the field headings commonly seen in
    /// confirmation documents; the vocabularies seed `swap_ccy` with the
    /// major ISO codes and `swap_type` with the supported product types.
    pub fn with_defaults() -> Self {
        let mut book = Self::new();

        for (label, field) in [
            ("date", CanonicalField::TradeDate),
            ("effective date", CanonicalField::StrikeDate),
            ("transaction start", CanonicalField::StrikeDate),
            ("termination date", CanonicalField::ExpiryDate),
            ("maturity date", CanonicalField::ExpiryDate),
            ("transaction maturity", CanonicalField::ExpiryDate),
            ("notional", CanonicalField::Units),
            ("amount", CanonicalField::Units),
            ("principal", CanonicalField::Units),
            ("currency", CanonicalField::SwapCcy),
            ("swap currency", CanonicalField::SwapCcy),
            ("party b", CanonicalField::Counterparty),
            ("counterparty details", CanonicalField::Counterparty),
            ("participant 2", CanonicalField::Counterparty),
            ("participant 1", CanonicalField::PartyA),
            ("client", CanonicalField::PartyA),
            ("trade direction", CanonicalField::Direction),
            ("trade type", CanonicalField::SwapType),
            ("floating reference", CanonicalField::Index),
            ("rate basis", CanonicalField::Index),
            ("spread adjustment", CanonicalField::Spread),
            ("adjustment", CanonicalField::Spread),
        ] {
            book.add_label(label, field);
        }

        book.add_vocabulary(
            CanonicalField::SwapCcy,
            ["USD", "EUR", "GBP", "JPY", "CHF", "AUD", "CAD", "NZD", "SEK", "NOK"],
        );
        book.add_vocabulary(CanonicalField::SwapType, ["IRS", "OIS"]);

        book
    }

    /// Loads a book from a TOML string.
    ///
    /// Format:
    ///
    /// ```toml
    /// [[aliases]]
    /// source_name = "£"
    /// target_name = "GBP"
    /// provenance = "provided"
    /// on_fields = ["swap_ccy"]
    ///
    /// [labels]
    /// "effective date" = "strike_date"
    ///
    /// [vocabulary]
    /// swap_type = ["IRS", "OIS"]
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `AliasBookError::Parse` on malformed TOML and
    /// `AliasBookError::Schema` when a label or vocabulary key names an
    /// unknown canonical field.
    pub fn from_toml_str(content: &str) -> Result<Self, AliasBookError> {
        #[derive(serde::Deserialize)]
        struct BookFile {
            #[serde(default)]
            aliases: Vec<AliasDef>,
            #[serde(default)]
            labels: std::collections::BTreeMap<String, String>,
            #[serde(default)]
            vocabulary: std::collections::BTreeMap<String, Vec<String>>,
        }

        let file: BookFile =
            toml::from_str(content).map_err(|e| AliasBookError::Parse(e.to_string()))?;

        let mut book = Self::with_defaults();
        for def in file.aliases {
            book.add_alias(def);
        }
        for (label, field_name) in file.labels {
            let field = CanonicalField::from_str(&field_name)?;
            book.add_label(&label, field);
        }
        for (field_name, values) in file.vocabulary {
            let field = CanonicalField::from_str(&field_name)?;
            book.add_vocabulary(field, values);
        }
        Ok(book)
    }

    /// Loads a book from a TOML file on disk.
    pub fn from_path(path: &Path) -> Result<Self, AliasBookError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Adds a value alias definition, returning its handle.
    pub fn add_alias(&mut self, def: AliasDef) -> AliasId {
        self.defs.push(def);
        AliasId(self.defs.len() - 1)
    }

    /// Adds a label alias mapping a document heading onto a field.
    pub fn add_label(&mut self, label: &str, field: CanonicalField) {
        self.labels.insert(normalise_label(label), field);
    }

    /// Adds vocabulary entries for a text field, skipping case-insensitive
    /// duplicates.
    pub fn add_vocabulary<I, S>(&mut self, field: CanonicalField, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let entries = self.vocab.entry(field).or_default();
        for value in values {
            let value = value.into();
            if !entries.iter().any(|v| v.eq_ignore_ascii_case(&value)) {
                entries.push(value);
            }
        }
    }

    /// Extends the vocabulary of a field from reference data (e.g. the
    /// counterparty and index values present in the booking dataset).
    pub fn extend_vocabulary<'a, I>(&mut self, field: CanonicalField, values: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        self.add_vocabulary(field, values.into_iter().map(str::to_string));
    }

    /// Looks up a label alias. The label is normalised before lookup.
    pub fn label_for(&self, label: &str) -> Option<CanonicalField> {
        self.labels.get(&normalise_label(label)).copied()
    }

    /// Returns the canonical casing for `raw` if it matches the field's
    /// vocabulary case-insensitively, or `None` when the field has no
    /// vocabulary or no entry matches.
    pub fn vocabulary_match(&self, field: CanonicalField, raw: &str) -> Option<&str> {
        let raw = raw.trim();
        self.vocab.get(&field).and_then(|entries| {
            entries
                .iter()
                .find(|v| v.eq_ignore_ascii_case(raw))
                .map(String::as_str)
        })
    }

    /// Returns whether the field carries a canonical vocabulary.
    pub fn has_vocabulary(&self, field: CanonicalField) -> bool {
        self.vocab.get(&field).is_some_and(|v| !v.is_empty())
    }

    /// Iterates over value alias definitions in definition order.
    pub fn iter(&self) -> impl Iterator<Item = (AliasId, &AliasDef)> {
        self.defs.iter().enumerate().map(|(i, d)| (AliasId(i), d))
    }

    /// Returns the definition behind a handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle came from a different book.
    pub fn def(&self, id: AliasId) -> &AliasDef {
        &self.defs[id.0]
    }

    /// Returns the number of value alias definitions.
    pub fn len(&self) -> usize {
        self.defs.len()
    }

    /// Returns whether the book has no value aliases.
    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provenance_wire_forms() {
        assert_eq!(Provenance::Provided.as_str(), "provided");
        assert_eq!(Provenance::Infered.as_str(), "infered");
        assert_eq!(
            serde_json::to_string(&Provenance::Infered).unwrap(),
            "\"infered\""
        );
    }

    #[test]
    fn test_provenance_parse_accepts_both_spellings() {
        assert_eq!("infered".parse::<Provenance>().unwrap(), Provenance::Infered);
        assert_eq!(
            "inferred".parse::<Provenance>().unwrap(),
            Provenance::Infered
        );
        assert!("guessed".parse::<Provenance>().is_err());
    }

    #[test]
    fn test_alias_wire_shape() {
        let alias = Alias {
            source_name: "GS Trading".to_string(),
            target_name: "Goldman Sachs".to_string(),
            used: true,
            count: 1,
            provenance: Provenance::Infered,
            on_field: vec![CanonicalField::Counterparty],
        };

        let json = serde_json::to_value(&alias).unwrap();
        assert_eq!(json["source_name"], "GS Trading");
        assert_eq!(json["source"], "infered");
        assert_eq!(json["on_field"][0], "counterparty");
        assert!(json.get("provenance").is_none());
    }

    #[test]
    fn test_normalise_label() {
        assert_eq!(normalise_label("Trade Ref"), "trade_ref");
        assert_eq!(normalise_label("Reference No:"), "reference_no");
        assert_eq!(normalise_label("  Documentation Version "), "documentation_version");
        assert_eq!(normalise_label("custom-field-XYZ"), "custom_field_xyz");
        assert_eq!(normalise_label("strike_date"), "strike_date");
    }

    #[test]
    fn test_default_labels() {
        let book = AliasBook::with_defaults();
        assert_eq!(
            book.label_for("Effective Date"),
            Some(CanonicalField::StrikeDate)
        );
        assert_eq!(
            book.label_for("Maturity Date"),
            Some(CanonicalField::ExpiryDate)
        );
        assert_eq!(book.label_for("Notional"), Some(CanonicalField::Units));
        assert_eq!(book.label_for("Settlement Method"), None);
    }

    #[test]
    fn test_vocabulary_match_case_insensitive() {
        let book = AliasBook::with_defaults();
        assert_eq!(
            book.vocabulary_match(CanonicalField::SwapCcy, "usd"),
            Some("USD")
        );
        assert_eq!(
            book.vocabulary_match(CanonicalField::SwapType, " irs "),
            Some("IRS")
        );
        assert_eq!(book.vocabulary_match(CanonicalField::SwapCcy, "£"), None);
        // Free-text fields carry no vocabulary.
        assert_eq!(
            book.vocabulary_match(CanonicalField::Benchmark, "SOFR+50bps"),
            None
        );
    }

    #[test]
    fn test_vocabulary_dedup() {
        let mut book = AliasBook::new();
        book.add_vocabulary(CanonicalField::Counterparty, ["Goldman Sachs"]);
        book.extend_vocabulary(CanonicalField::Counterparty, ["goldman sachs", "JPMorgan Chase"]);
        assert_eq!(
            book.vocabulary_match(CanonicalField::Counterparty, "GOLDMAN SACHS"),
            Some("Goldman Sachs")
        );
        assert!(book.has_vocabulary(CanonicalField::Counterparty));
    }

    #[test]
    fn test_add_alias_and_iterate() {
        let mut book = AliasBook::new();
        let id = book.add_alias(AliasDef::new(
            "£",
            "GBP",
            Provenance::Provided,
            CanonicalField::SwapCcy,
        ));

        assert_eq!(book.len(), 1);
        assert_eq!(book.def(id).target_name, "GBP");
        assert!(book.def(id).applies_to(CanonicalField::SwapCcy));
        assert!(!book.def(id).applies_to(CanonicalField::Spread));

        let collected: Vec<_> = book.iter().collect();
        assert_eq!(collected.len(), 1);
        assert_eq!(collected[0].0, id);
    }

    #[test]
    fn test_from_toml() {
        let toml = r#"
            [[aliases]]
            source_name = "JPM"
            target_name = "JPMorgan Chase"
            provenance = "provided"
            on_fields = ["counterparty"]

            [[aliases]]
            source_name = "20bp"
            target_name = "0.002"
            provenance = "provided"
            on_fields = ["spread"]

            [labels]
            "fixed leg" = "benchmark"

            [vocabulary]
            index = ["SOFR", "SONIA"]
        "#;

        let book = AliasBook::from_toml_str(toml).unwrap();
        assert_eq!(book.len(), 2);
        assert_eq!(book.label_for("Fixed Leg"), Some(CanonicalField::Benchmark));
        assert_eq!(
            book.vocabulary_match(CanonicalField::Index, "sofr"),
            Some("SOFR")
        );
        // Defaults are kept underneath the file's additions.
        assert_eq!(
            book.label_for("Effective Date"),
            Some(CanonicalField::StrikeDate)
        );
    }

    #[test]
    fn test_from_toml_unknown_field_rejected() {
        let toml = r#"
            [labels]
            "fixed leg" = "no_such_field"
        "#;
        let result = AliasBook::from_toml_str(toml);
        assert!(matches!(result, Err(AliasBookError::Schema(_))));
    }

    #[test]
    fn test_from_toml_malformed() {
        let result = AliasBook::from_toml_str("not [valid toml");
        assert!(matches!(result, Err(AliasBookError::Parse(_))));
    }
}
