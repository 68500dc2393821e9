//! Axum route handlers for the Extraction API.

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    http::{header, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::{run, write, EntryFailure, Record};
use crate::state::AppState;

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
pub const SUCCESS_MESSAGE: &str = "Extraction completed. Download your excel file";

/// Multipart field carrying the ZIP archive.
const UPLOAD_FIELD: &str = "file";

/// Response header carrying the number of entries skipped on error.
const FAILURES_HEADER: &str = "x-extraction-failures";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct ExtractionReport {
    pub batch_id: Uuid,
    pub completed_at: DateTime<Utc>,
    pub message: String,
    pub records: Vec<Record>,
    pub failures: Vec<EntryFailure>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/extract
///
/// Accepts a ZIP of résumés and returns the spreadsheet as a download.
/// Entries that fail to decode are left out; their count is in `x-extraction-failures`.
pub async fn handle_extract(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let archive = read_upload(multipart).await?;
    let batch_id = Uuid::new_v4();
    info!(%batch_id, bytes = archive.len(), "Received archive for spreadsheet export");

    let (failure_count, workbook) = run_blocking(move || {
        let outcome = run(&archive)?;
        let workbook = write(&outcome.records)?;
        Ok((outcome.failures.len(), workbook))
    })
    .await?;

    let disposition = format!(
        "attachment; filename=\"{}\"",
        state.config.output_filename
    );
    let disposition = HeaderValue::from_str(&disposition)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid output filename: {e}")))?;

    info!(%batch_id, failures = failure_count, "Spreadsheet ready");

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(XLSX_MIME)),
            (header::CONTENT_DISPOSITION, disposition),
            (
                HeaderName::from_static(FAILURES_HEADER),
                HeaderValue::from(failure_count),
            ),
        ],
        workbook,
    )
        .into_response())
}

/// POST /api/v1/extract/report
///
/// Same upload as `/extract`, but returns the records and one failure message
/// per skipped entry as JSON instead of a spreadsheet.
pub async fn handle_extract_report(
    multipart: Multipart,
) -> Result<Json<ExtractionReport>, AppError> {
    let archive = read_upload(multipart).await?;
    let batch_id = Uuid::new_v4();
    info!(%batch_id, bytes = archive.len(), "Received archive for report");

    let outcome = run_blocking(move || Ok(run(&archive)?)).await?;

    Ok(Json(ExtractionReport {
        batch_id,
        completed_at: Utc::now(),
        message: SUCCESS_MESSAGE.to_string(),
        records: outcome.records,
        failures: outcome.failures,
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Pulls the archive bytes out of the `file` multipart field.
async fn read_upload(mut multipart: Multipart) -> Result<Bytes, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        if bytes.is_empty() {
            return Err(AppError::Validation(
                "Uploaded archive is empty".to_string(),
            ));
        }
        return Ok(bytes);
    }

    Err(AppError::Validation(format!(
        "Missing '{UPLOAD_FIELD}' field with the ZIP archive"
    )))
}

/// Archive decoding and spreadsheet writing are CPU-bound; keep them off the executor.
async fn run_blocking<T, F>(task: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, AppError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(task)
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}")))?
}
