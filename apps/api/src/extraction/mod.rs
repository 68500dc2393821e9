// Résumé contact extraction
// Implements: archive traversal, PDF/DOCX text extraction, email/phone matching,
// name derivation, and the deduplicating spreadsheet writer.
// Decoding is CPU-bound; HTTP handlers run the pipeline inside tokio::task::spawn_blocking.

pub mod document;
pub mod fields;
pub mod handlers;
pub mod naming;
pub mod pipeline;
pub mod workbook;

use thiserror::Error;

// Re-export the public API consumed by the handlers.
pub use pipeline::{run, EntryFailure, Record};
pub use workbook::write;

/// Failure decoding a single archive entry. Recovered at the entry boundary.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("PDF parsing failed: {0}")]
    PdfParsing(String),

    #[error("DOCX parsing failed: {0}")]
    DocxParsing(String),

    #[error("Unreadable archive entry: {0}")]
    EntryRead(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The uploaded archive itself cannot be opened or listed. Fatal to the run.
#[derive(Debug, Error)]
#[error("Invalid archive: {0}")]
pub struct ArchiveError(#[from] pub zip::result::ZipError);

/// The spreadsheet could not be serialized. Fatal to the run.
#[derive(Debug, Error)]
#[error("Spreadsheet write failed: {0}")]
pub struct WorkbookError(#[from] pub rust_xlsxwriter::XlsxError);
