//! Spreadsheet writer — renders records into an in-memory XLSX workbook.
//!
//! Dedup rules, scoped to a single `write` call:
//! - A name is shown only on its first row; later rows with the same name get an empty cell.
//! - An email is shown only on the first row it appears in; later rows drop it from their cell.
//! - Only the first phone number of a record is written, with `'`, `(`, `)`, `,` and spaces removed.
//! - Overall Text is always written verbatim.

use std::collections::HashSet;

use rust_xlsxwriter::Workbook;

use super::{Record, WorkbookError};

pub const HEADERS: [&str; 4] = ["Name", "Email", "Mobile Number", "Overall Text"];

/// Largest string a single spreadsheet cell may hold.
const MAX_CELL_CHARS: usize = 32_767;

const PHONE_STRIPPED_CHARS: [char; 5] = ['\'', '(', ')', ',', ' '];

/// Cell values for one data row, after deduplication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetRow {
    pub name: String,
    pub email: String,
    pub mobile_number: String,
    pub overall_text: String,
}

impl SheetRow {
    fn cells(&self) -> [&str; 4] {
        [
            &self.name,
            &self.email,
            &self.mobile_number,
            &self.overall_text,
        ]
    }
}

/// Serializes the records into XLSX bytes: a header row, then one row per record.
pub fn write(records: &[Record]) -> Result<Vec<u8>, WorkbookError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (i, row) in build_rows(records).iter().enumerate() {
        let row_num = (i + 1) as u32;
        for (col, value) in row.cells().into_iter().enumerate() {
            // Empty values stay blank cells.
            if !value.is_empty() {
                worksheet.write_string(row_num, col as u16, truncate_cell(value))?;
            }
        }
    }

    Ok(workbook.save_to_buffer()?)
}

/// Applies the cross-row dedup rules and yields the display values for each record.
pub fn build_rows(records: &[Record]) -> Vec<SheetRow> {
    let mut written_names: HashSet<&str> = HashSet::new();
    let mut written_emails: HashSet<&str> = HashSet::new();
    let mut rows = Vec::with_capacity(records.len());

    for record in records {
        let name = if written_names.contains(record.name.as_str()) {
            String::new()
        } else {
            record.name.clone()
        };

        let email = record
            .emails
            .iter()
            .map(String::as_str)
            .filter(|email| !written_emails.contains(email))
            .collect::<Vec<_>>()
            .join(", ");

        let mobile_number = record
            .phone_numbers
            .first()
            .map(|number| format_phone_number(number))
            .unwrap_or_default();

        rows.push(SheetRow {
            name,
            email,
            mobile_number,
            overall_text: record.raw_text.clone(),
        });

        written_names.insert(&record.name);
        written_emails.extend(record.emails.iter().map(String::as_str));
    }

    rows
}

/// Strips tuple punctuation from a stringified phone match.
///
/// The four fragments end up concatenated with no separator; the result is
/// not normalized into a dialable number.
pub fn format_phone_number(stringified: &str) -> String {
    stringified
        .chars()
        .filter(|c| !PHONE_STRIPPED_CHARS.contains(c))
        .collect()
}

fn truncate_cell(value: &str) -> &str {
    match value.char_indices().nth(MAX_CELL_CHARS) {
        Some((cut, _)) => &value[..cut],
        None => value,
    }
}
