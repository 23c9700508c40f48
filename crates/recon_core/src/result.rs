//! Per-file and batch result records.
//!
//! `FileResult` is the wire contract consumed by the review UI; its shape
//! is preserved bit-exact, including field names and the fixed key sets.
//! A file that failed processing is carried as an error marker entry, so
//! the batch response never contains a partially filled record.

use std::collections::BTreeMap;

use crate::alias::Alias;
use crate::rows::{BookingRow, ConfirmationRow};
use crate::types::{CanonicalField, ValidationStatus};

/// Distinct source-document values per field that resolved to neither a
/// canonical form nor a known alias.
///
/// Keys are canonical fields; value lists preserve input order and keep
/// duplicates (repeated occurrences across rows). Empty lists are never
/// stored, so every serialised key carries a non-empty array.
///
/// # Examples
///
/// ```
/// use recon_core::result::UnmatchedValues;
/// use recon_core::types::CanonicalField;
///
/// let mut unmatched = UnmatchedValues::new();
/// unmatched.record(CanonicalField::Index, "3M TONA");
/// unmatched.record(CanonicalField::Index, "Tokyo Overnight Average");
///
/// assert_eq!(
///     unmatched.get(CanonicalField::Index),
///     Some(&["3M TONA".to_string(), "Tokyo Overnight Average".to_string()][..])
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct UnmatchedValues {
    values: BTreeMap<CanonicalField, Vec<String>>,
}

impl UnmatchedValues {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one unmatched value for a field, preserving input order.
    pub fn record(&mut self, field: CanonicalField, value: impl Into<String>) {
        self.values.entry(field).or_default().push(value.into());
    }

    /// Returns the unmatched values for a field, if any.
    pub fn get(&self, field: CanonicalField) -> Option<&[String]> {
        self.values.get(&field).map(Vec::as_slice)
    }

    /// Returns whether no field has unmatched values.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Returns the number of fields carrying unmatched values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Iterates over fields and their value lists.
    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, &[String])> {
        self.values.iter().map(|(f, v)| (*f, v.as_slice()))
    }

    /// Absorbs another map, appending its values after the existing ones.
    pub fn absorb(&mut self, other: UnmatchedValues) {
        for (field, mut values) in other.values {
            self.values.entry(field).or_default().append(&mut values);
        }
    }
}

/// The complete reconciliation result for one source document.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FileResult {
    /// Original filename
    pub filename: String,
    /// Leading excerpt of the document text
    pub text_excerpt: String,
    /// Values that resolved to neither canonical form nor alias
    pub unmatched_values: UnmatchedValues,
    /// Fixed 10-key validation outcome
    pub validation_status: ValidationStatus,
    /// Extracted rows, document order
    pub confirmation_rows: Vec<ConfirmationRow>,
    /// Matched booking rows, deduplicated by `sivcom`
    pub booking_matches_rows: Vec<BookingRow>,
    /// Document labels with no canonical mapping, first-seen order
    pub unknown_fields: Vec<String>,
    /// The canonical field registry
    pub canonical_fields: Vec<CanonicalField>,
    /// Every alias touched for this file, used or not
    pub aliases_used: Vec<Alias>,
}

/// Error marker for a file whose processing failed.
///
/// Replaces the whole result; a `FileResult` is never emitted partially
/// filled. The message is short and never a stack trace.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FileError {
    /// Original filename
    pub filename: String,
    /// Short human-readable failure message
    pub error: String,
}

/// One entry in a batch response: a full result or an error marker.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum FileEntry {
    /// Processing succeeded
    Ok(FileResult),
    /// Processing failed; the marker replaces the result
    Err(FileError),
}

impl FileEntry {
    /// Returns the filename of either variant.
    pub fn filename(&self) -> &str {
        match self {
            FileEntry::Ok(r) => &r.filename,
            FileEntry::Err(e) => &e.filename,
        }
    }

    /// Returns the result when processing succeeded.
    pub fn as_ok(&self) -> Option<&FileResult> {
        match self {
            FileEntry::Ok(r) => Some(r),
            FileEntry::Err(_) => None,
        }
    }

    /// Returns whether this entry is an error marker.
    pub fn is_error(&self) -> bool {
        matches!(self, FileEntry::Err(_))
    }
}

/// The batch response: one entry per processed confirmation file.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProcessResult {
    /// Filename of the booking reference dataset
    pub booking_filename: String,
    /// Per-file entries, input order
    pub files: Vec<FileEntry>,
}
