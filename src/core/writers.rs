//! CSV export of the cleaned attendance table.
//!
//! One header row followed by one row per record:
//!
//! ```text
//! Student ID,Name,Total Class,Attended Class,Attendance,Attendance Status
//! S1,Ann,20,15,75.00,Good
//! ```

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use super::loaders::ENTRY_HEADERS;
use super::records::{AttendanceTable, CleanedRecord};

/// Header row of the exported report.
pub const REPORT_HEADERS: [&str; 6] = [
    "Student ID",
    "Name",
    "Total Class",
    "Attended Class",
    "Attendance",
    "Attendance Status",
];

/// Errors that can occur during write operations.
#[derive(Error, Debug)]
pub enum WriteError {
    /// Failed to create parent directories.
    #[error("failed to create parent directories for '{path}': {source}")]
    CreateDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or open file for writing.
    #[error("failed to create file '{path}': {source}")]
    CreateFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to flush data to the destination.
    #[error("failed to write to '{path}': {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV writing error.
    #[error("CSV write error for '{path}': {source}")]
    CsvError {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Result type for write operations.
pub type Result<T> = std::result::Result<T, WriteError>;

/// Label used in errors for in-memory exports.
const MEMORY_TARGET: &str = "<memory>";

/// Creates parent directories for a file path if they don't exist.
fn ensure_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| WriteError::CreateDirectory {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
    }
    Ok(())
}

/// Formats one record as export fields.
fn record_fields(record: &CleanedRecord) -> [String; 6] {
    [
        record.student_id.clone(),
        record.name.clone(),
        record.total_classes.to_string(),
        record.attended_classes.to_string(),
        format!("{:.2}", record.attendance_pct),
        record.status.to_string(),
    ]
}

/// Writes header and rows through a CSV writer, then flushes it.
fn write_table<W: Write>(sink: W, table: &AttendanceTable, target: &str) -> Result<W> {
    let mut csv_writer = csv::WriterBuilder::new()
        .delimiter(b',')
        .quote_style(csv::QuoteStyle::Necessary)
        .from_writer(sink);

    csv_writer
        .write_record(REPORT_HEADERS)
        .map_err(|e| WriteError::CsvError {
            path: target.to_string(),
            source: e,
        })?;

    for record in table {
        csv_writer
            .write_record(&record_fields(record))
            .map_err(|e| WriteError::CsvError {
                path: target.to_string(),
                source: e,
            })?;
    }

    csv_writer.flush().map_err(|e| WriteError::WriteFile {
        path: target.to_string(),
        source: e,
    })?;

    csv_writer.into_inner().map_err(|e| WriteError::WriteFile {
        path: target.to_string(),
        source: e.into_error(),
    })
}

/// Write the attendance table to a CSV file.
///
/// # Arguments
///
/// * `path` - Output file path (parent directories will be created if needed)
/// * `table` - Cleaned attendance table
///
/// # Errors
///
/// Returns an error if:
/// - Parent directories cannot be created
/// - File cannot be created or written to
///
/// # Example
///
/// ```no_run
/// use attendance_pipeline::core::records::AttendanceTable;
/// use attendance_pipeline::core::writers::write_report_csv;
/// use std::path::Path;
///
/// let table = AttendanceTable::default();
/// write_report_csv(Path::new("attendance_report.csv"), &table).unwrap();
/// ```
pub fn write_report_csv(path: &Path, table: &AttendanceTable) -> Result<()> {
    ensure_parent_dirs(path)?;

    let file = File::create(path).map_err(|e| WriteError::CreateFile {
        path: path.display().to_string(),
        source: e,
    })?;

    write_table(BufWriter::new(file), table, &path.display().to_string())?;
    Ok(())
}

/// Render the attendance table as UTF-8 CSV bytes, e.g. for a download.
pub fn report_csv_bytes(table: &AttendanceTable) -> Result<Vec<u8>> {
    write_table(Vec::new(), table, MEMORY_TARGET)
}

/// Write an empty entry sheet containing only the form field headers.
pub fn write_entry_template(path: &Path) -> Result<()> {
    ensure_parent_dirs(path)?;

    let path_str = path.display().to_string();
    let file = File::create(path).map_err(|e| WriteError::CreateFile {
        path: path_str.clone(),
        source: e,
    })?;
    let mut csv_writer = csv::Writer::from_writer(BufWriter::new(file));

    csv_writer
        .write_record(ENTRY_HEADERS)
        .map_err(|e| WriteError::CsvError {
            path: path_str.clone(),
            source: e,
        })?;

    csv_writer.flush().map_err(|e| WriteError::WriteFile {
        path: path_str,
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::records::AttendanceStatus;
    use std::fs;
    use tempfile::tempdir;

    fn record(id: &str, name: &str, total: u32, attended: u32, pct: f64) -> CleanedRecord {
        CleanedRecord {
            student_id: id.to_string(),
            name: name.to_string(),
            total_classes: total,
            attended_classes: attended,
            attendance_pct: pct,
            status: AttendanceStatus::from_percentage(pct),
            total_imputed: false,
        }
    }

    fn create_test_table() -> AttendanceTable {
        AttendanceTable::from_records(vec![
            record("S1", "Ann", 20, 15, 75.0),
            record("S2", "Bob", 10, 5, 50.0),
            record("S3", "Cy", 3, 2, 66.67),
        ])
    }

    #[test]
    fn test_report_csv_bytes() {
        let bytes = report_csv_bytes(&create_test_table()).unwrap();
        let content = String::from_utf8(bytes).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(
            lines[0],
            "Student ID,Name,Total Class,Attended Class,Attendance,Attendance Status"
        );
        assert_eq!(lines[1], "S1,Ann,20,15,75.00,Good");
        assert_eq!(lines[2], "S2,Bob,10,5,50.00,Low");
        assert_eq!(lines[3], "S3,Cy,3,2,66.67,Low");
        assert_eq!(lines.len(), 4);
    }

    #[test]
    fn test_report_quotes_only_when_needed() {
        let table = AttendanceTable::from_records(vec![record("S1", "Lee, Ann", 4, 4, 100.0)]);
        let content = String::from_utf8(report_csv_bytes(&table).unwrap()).unwrap();
        assert_eq!(content.lines().nth(1), Some("S1,\"Lee, Ann\",4,4,100.00,Good"));
    }

    #[test]
    fn test_report_escapes_embedded_quotes() {
        let table =
            AttendanceTable::from_records(vec![record("S1", "Ann \"Annie\" Lee", 4, 2, 50.0)]);
        let content = String::from_utf8(report_csv_bytes(&table).unwrap()).unwrap();
        assert_eq!(
            content.lines().nth(1),
            Some("S1,\"Ann \"\"Annie\"\" Lee\",4,2,50.00,Low")
        );
    }

    #[test]
    fn test_write_report_csv_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("reports").join("attendance_report.csv");

        write_report_csv(&path, &create_test_table()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 4);
    }

    #[test]
    fn test_write_entry_template() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("entries.csv");

        write_entry_template(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Student ID,Name,Total Class,Attended Class\n");
    }

    #[test]
    fn test_write_empty_table_has_header_only() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        write_report_csv(&path, &AttendanceTable::default()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }
}
