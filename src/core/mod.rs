//! Core record types and I/O.

pub mod loaders;
pub mod records;
pub mod transforms;
pub mod writers;

pub use loaders::{load_entries_csv, read_entries, LoaderError, ENTRY_HEADERS};
pub use records::{
    AttendanceReport, AttendanceStatus, AttendanceTable, CleanedRecord, RawRecord, Summary,
    LOW_ATTENDANCE_THRESHOLD,
};
pub use writers::{
    report_csv_bytes, write_entry_template, write_report_csv, WriteError, REPORT_HEADERS,
};
