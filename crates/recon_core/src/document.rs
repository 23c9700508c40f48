//! Parsed source documents.
//!
//! A `Document` is the neutral form an input adapter produces: the
//! original filename, the raw text, and the detected label/value pairs
//! grouped per transaction. Text extraction itself (PDF, OCR) is an
//! external collaborator; the engine only ever sees this form.

/// One detected label/value pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetectedField {
    /// The label as it appears in the document
    pub label: String,
    /// The raw value text, `None` for a bare label
    pub value: Option<String>,
}

impl DetectedField {
    /// Creates a pair with a value.
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: Some(value.into()),
        }
    }

    /// Creates a bare label with no value.
    pub fn bare(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: None,
        }
    }
}

/// The detected pairs of one transaction within a document.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DetectedRecord {
    /// Pairs in document order
    pub fields: Vec<DetectedField>,
}

impl DetectedRecord {
    /// Creates a record from pairs.
    pub fn new(fields: Vec<DetectedField>) -> Self {
        Self { fields }
    }

    /// Returns whether the record has no pairs.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A parsed source document, ready for extraction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    /// Original filename
    pub filename: String,
    /// Raw document text
    pub text: String,
    /// Detected transactions, in document order
    pub records: Vec<DetectedRecord>,
}

impl Document {
    /// Creates a document.
    pub fn new(
        filename: impl Into<String>,
        text: impl Into<String>,
        records: Vec<DetectedRecord>,
    ) -> Self {
        Self {
            filename: filename.into(),
            text: text.into(),
            records,
        }
    }

    /// Returns the leading excerpt of the raw text, capped at `max_chars`
    /// characters on a char boundary.
    pub fn excerpt(&self, max_chars: usize) -> String {
        self.text.chars().take(max_chars).collect()
    }
}
