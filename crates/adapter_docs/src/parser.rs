//! Confirmation document parser.
//!
//! Parses the line-oriented `Label: Value` form confirmation text arrives
//! in. The first colon on a line splits label from value; heading lines
//! without a colon are ignored; a delimiter line of three or more dashes
//! or equals signs starts a new transaction record.
//!
//! Text extraction itself (PDF, OCR) is an external collaborator; this
//! parser only structures already-extracted text.

use recon_core::document::{DetectedField, DetectedRecord, Document};

/// Returns whether a line is a record delimiter (`---`, `===`, ...).
fn is_delimiter(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.len() >= 3 && trimmed.chars().all(|c| c == '-' || c == '=')
}

/// Parses raw confirmation text into a document.
///
/// # Examples
///
/// ```
/// use adapter_docs::parse_text;
///
/// let doc = parse_text(
///     "confirmation.pdf",
///     "SWAP CONFIRMATION\nDirection: Long\nIndex: SOFR",
/// );
/// assert_eq!(doc.records.len(), 1);
/// assert_eq!(doc.records[0].fields.len(), 2);
/// assert_eq!(doc.records[0].fields[0].label, "Direction");
/// ```
pub fn parse_text(filename: &str, text: &str) -> Document {
    let mut records = Vec::new();
    let mut current: Vec<DetectedField> = Vec::new();

    for line in text.lines() {
        if is_delimiter(line) {
            if !current.is_empty() {
                records.push(DetectedRecord::new(std::mem::take(&mut current)));
            }
            continue;
        }

        let Some((label, value)) = line.split_once(':') else {
            continue;
        };
        let label = label.trim();
        if label.is_empty() {
            continue;
        }
        current.push(DetectedField::new(label, value.trim()));
    }

    if !current.is_empty() {
        records.push(DetectedRecord::new(current));
    }

    tracing::debug!(
        filename = %filename,
        records = records.len(),
        "parsed confirmation text"
    );

    Document::new(filename, text, records)
}
