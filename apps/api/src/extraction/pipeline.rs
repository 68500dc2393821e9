//! Batch pipeline — walks a ZIP archive of résumés and builds one `Record` per readable entry.
//!
//! A bad entry is reported and skipped; only a malformed container aborts the run.

use std::io::{Cursor, Read};

use serde::Serialize;
use tracing::{debug, info, warn};

use super::document::{extract_text_from_reader, DocumentKind};
use super::fields::{extract_contact_numbers, extract_emails};
use super::naming::derive_name;
use super::{ArchiveError, ExtractionError};

/// Contact summary for one archive entry. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub name: String,
    pub emails: Vec<String>,
    /// Each phone match stringified as a quoted 4-tuple, in match order.
    pub phone_numbers: Vec<String>,
    pub raw_text: String,
}

/// An eligible entry that could not be read or decoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryFailure {
    pub entry: String,
    pub reason: String,
}

/// Records in archive listing order, plus the entries that were skipped on error.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub records: Vec<Record>,
    pub failures: Vec<EntryFailure>,
}

/// Runs the whole archive through extraction.
///
/// Returns `Err` only when the archive container cannot be opened or listed.
pub fn run(archive_bytes: &[u8]) -> Result<BatchOutcome, ArchiveError> {
    let mut archive = zip::ZipArchive::new(Cursor::new(archive_bytes))?;

    let mut eligible = Vec::new();
    for index in 0..archive.len() {
        let name = archive.by_index_raw(index)?.name().to_string();
        if DocumentKind::from_filename(&name).is_supported() {
            eligible.push((index, name));
        }
    }

    let mut outcome = BatchOutcome::default();
    for (index, name) in &eligible {
        let result = archive
            .by_index(*index)
            .map_err(ExtractionError::from)
            .and_then(|entry| build_record(name, entry));
        match result {
            Ok(record) => {
                debug!(
                    entry = %name,
                    emails = record.emails.len(),
                    phone_numbers = record.phone_numbers.len(),
                    "Processed entry"
                );
                outcome.records.push(record);
            }
            Err(e) => {
                warn!("Error processing file '{name}': {e}");
                outcome.failures.push(EntryFailure {
                    entry: name.clone(),
                    reason: e.to_string(),
                });
            }
        }
    }

    info!(
        total_entries = archive.len(),
        eligible = eligible.len(),
        processed = outcome.records.len(),
        failed = outcome.failures.len(),
        "Extraction batch complete"
    );

    Ok(outcome)
}

/// Name, text and contact fields for one entry. Reads nothing but the entry's own content.
fn build_record<R: Read>(entry_name: &str, content: R) -> Result<Record, ExtractionError> {
    let name = derive_name(entry_name);
    let raw_text = extract_text_from_reader(content, entry_name)?;
    let emails = extract_emails(&raw_text);
    let phone_numbers = extract_contact_numbers(&raw_text)
        .iter()
        .map(ToString::to_string)
        .collect();

    Ok(Record {
        name,
        emails,
        phone_numbers,
        raw_text,
    })
}
