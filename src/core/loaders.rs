//! Loader for entered student rows.
//!
//! The interactive form is replaced by a CSV file with one row per student
//! and the four form fields as columns:
//!
//! ```text
//! Student ID,Name,Total Class,Attended Class
//! S1,ann,20,15
//! ```

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;
use log::debug;
use thiserror::Error;

use super::records::RawRecord;

/// Header names of the four form fields, in input order.
pub const ENTRY_HEADERS: [&str; 4] = ["Student ID", "Name", "Total Class", "Attended Class"];

/// Errors that can occur while loading entries.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("No student entries in {0}")]
    EmptyFile(PathBuf),

    #[error("Missing required columns: {0}")]
    MissingColumns(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Column positions of the form fields within a CSV header.
#[derive(Debug, Clone, Copy)]
struct EntryColumns {
    student_id: usize,
    name: usize,
    total: usize,
    attended: usize,
}

/// Canonical lookup key for a header cell: trimmed, lowercase, `_` as space.
fn header_key(name: &str) -> String {
    name.trim().to_lowercase().replace('_', " ")
}

fn find_column(col_map: &HashMap<String, usize>, aliases: &[&str]) -> Option<usize> {
    aliases.iter().find_map(|alias| col_map.get(*alias).copied())
}

fn resolve_columns(headers: &csv::StringRecord) -> Result<EntryColumns> {
    let col_map: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .map(|(i, name)| (header_key(name), i))
        .collect();

    let student_id = find_column(&col_map, &["student id", "id"]);
    let name = find_column(&col_map, &["name"]);
    let total = find_column(&col_map, &["total class", "total classes"]);
    let attended = find_column(&col_map, &["attended class", "attended classes"]);

    let missing: Vec<&str> = [student_id, name, total, attended]
        .iter()
        .zip(ENTRY_HEADERS.iter())
        .filter(|(idx, _)| idx.is_none())
        .map(|(_, header)| *header)
        .collect();

    match (student_id, name, total, attended) {
        (Some(student_id), Some(name), Some(total), Some(attended)) => Ok(EntryColumns {
            student_id,
            name,
            total,
            attended,
        }),
        _ => Err(LoaderError::MissingColumns(missing.join(", "))),
    }
}

/// Parse a class count cell. Blank cells read as 0, the form default.
fn parse_count(value: Option<&str>, column: &str, line: u64) -> Result<u32> {
    let value = value.unwrap_or("").trim();
    if value.is_empty() {
        return Ok(0);
    }

    value.parse::<u32>().map_err(|_| {
        LoaderError::ParseError(format!(
            "line {}: invalid {} value '{}' (expected a non-negative integer)",
            line, column, value
        ))
    })
}

/// Read entries from any CSV source.
///
/// Rows with a blank id or name are skipped. Names are title-cased when
/// `title_case_names` is set.
///
/// # Errors
///
/// Returns an error if the header lacks a form field, or a count cell is
/// not a non-negative integer.
pub fn read_entries<R: Read>(source: R, title_case_names: bool) -> Result<Vec<RawRecord>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let columns = resolve_columns(&headers)?;

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for result in reader.records() {
        let row = result?;
        let line = row.position().map_or(0, |p| p.line());

        let student_id = row.get(columns.student_id).unwrap_or("");
        let name = row.get(columns.name).unwrap_or("");
        if student_id.trim().is_empty() || name.trim().is_empty() {
            debug!("Skipping line {}: missing student id or name", line);
            skipped += 1;
            continue;
        }

        let total = parse_count(row.get(columns.total), ENTRY_HEADERS[2], line)?;
        let attended = parse_count(row.get(columns.attended), ENTRY_HEADERS[3], line)?;

        if let Some(record) =
            RawRecord::from_entry(student_id, name, total, attended, title_case_names)
        {
            records.push(record);
        }
    }

    if skipped > 0 {
        debug!("Skipped {} incomplete entries", skipped);
    }

    Ok(records)
}

/// Load entries from a CSV file.
///
/// # Errors
///
/// Returns [`LoaderError::EmptyFile`] if no complete entry remains after
/// skipping blank rows, and the errors of [`read_entries`] otherwise.
pub fn load_entries_csv<P: AsRef<Path>>(path: P, title_case_names: bool) -> Result<Vec<RawRecord>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let records = read_entries(BufReader::new(file), title_case_names)?;

    if records.is_empty() {
        return Err(LoaderError::EmptyFile(path.to_path_buf()));
    }

    Ok(records)
}
