//! Student attendance cleaning and reporting pipeline.
//!
//! This crate provides tools for:
//! - Loading entered student rows (id, name, total and attended classes) from CSV
//! - Cleaning them: zero-total imputation, deduplication by student id, type normalization
//! - Deriving attendance percentages and flagging students below 75%
//! - Exporting the cleaned table as CSV
//!
//! # Example
//!
//! ```
//! use attendance_pipeline::{AttendancePipeline, RawRecord};
//!
//! let records = vec![
//!     RawRecord::new("S1", "Ann", 20, 15),
//!     RawRecord::new("S1", "Ann", 20, 15),
//!     RawRecord::new("S2", "Bob", 10, 5),
//! ];
//!
//! let report = AttendancePipeline::new().process(&records).unwrap();
//! assert_eq!(report.table.len(), 2);
//! assert_eq!(report.summary.duplicates_removed, 1);
//! assert_eq!(report.summary.average_display(), "62.50");
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod processors;

pub use config::{OverAttendancePolicy, PipelineConfig};
pub use crate::core::records::{
    AttendanceReport, AttendanceStatus, AttendanceTable, CleanedRecord, RawRecord, Summary,
    LOW_ATTENDANCE_THRESHOLD,
};
pub use processors::{AttendancePipeline, InvalidInputError, PipelineError};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
