//! The reconciliation batch endpoint.
//!
//! `POST /process` accepts a multipart form with an optional single
//! `booking_file` and zero or more `confirmation_files` entries, runs the
//! batch pipeline, and returns the `ProcessResult` wire record. No files
//! at all is a client error; an unreadable booking dataset is systemic
//! and fails the whole request; anything that goes wrong inside one
//! confirmation file surfaces as that file's error marker entry inside a
//! 200 response.

use axum::{
    extract::{Multipart, State},
    response::Json,
    routing::post,
    Router,
};

use adapter_docs::{load_booking_csv_bytes, parse_text};
use recon_core::document::Document;
use recon_core::result::ProcessResult;
use recon_engine::{process_batch, BookingSet};

use super::AppState;
use crate::error::ApiError;

/// Build the process routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/process", post(process_handler))
}

/// POST /process - run a reconciliation batch over uploaded files
async fn process_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ProcessResult>, ApiError> {
    let mut booking_upload: Option<(String, Vec<u8>)> = None;
    let mut documents: Vec<Document> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let filename = field.file_name().unwrap_or("upload").to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::bad_request(format!("Failed to read upload: {}", e)))?;

        match name.as_str() {
            "booking_file" => {
                booking_upload = Some((filename, bytes.to_vec()));
            }
            "confirmation_files" | "confirmation_files[]" => {
                let text = String::from_utf8_lossy(&bytes).into_owned();
                documents.push(parse_text(&filename, &text));
            }
            other => {
                tracing::debug!(field = %other, "ignoring unexpected multipart field");
            }
        }
    }

    if booking_upload.is_none() && documents.is_empty() {
        return Err(ApiError::bad_request("No files provided"));
    }

    let (booking_filename, booking_set) = match booking_upload {
        Some((filename, bytes)) => {
            let rows = load_booking_csv_bytes(&bytes)
                .map_err(|e| ApiError::internal(format!("Booking dataset error: {}", e)))?;
            (filename, BookingSet::new(rows))
        }
        None => (String::new(), BookingSet::default()),
    };

    tracing::info!(
        booking = %booking_filename,
        confirmations = documents.len(),
        "processing upload batch"
    );

    let book = state.alias_book.clone();
    let result = tokio::task::spawn_blocking(move || {
        process_batch(&documents, &booking_set, &book, &booking_filename, None)
    })
    .await
    .map_err(|e| ApiError::internal(format!("Batch worker failed: {}", e)))?;

    Ok(Json(result))
}
