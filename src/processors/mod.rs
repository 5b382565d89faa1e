//! Attendance pipeline stages.

pub mod dedup;
pub mod derivation;
pub mod imputation;
pub mod normalize;
pub mod pipeline;
pub mod summary;

use thiserror::Error;

// Re-export key types for convenience
pub use dedup::{deduplicate, Deduplicated, StudentKeyed};
pub use derivation::{attendance_percentage, derive_attendance, Derived};
pub use imputation::{impute_zero_totals, reject_zero_totals, ImputedRecord};
pub use normalize::{normalize_types, NormalizedRecord};
pub use pipeline::AttendancePipeline;
pub use summary::summarize;

/// Batch problems that the user must correct before a report can be made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidInputError {
    #[error("all {records} record(s) have 0 total classes; enter the total for at least one student")]
    AllTotalsZero { records: usize },

    #[error("student {student_id} has 0 total classes; enter at least 1")]
    ZeroTotal { student_id: String },

    #[error("student {student_id} attended {attended} classes but only {total} were held")]
    AttendedExceedsTotal {
        student_id: String,
        attended: u32,
        total: u32,
    },
}

/// Errors returned by [`AttendancePipeline::process`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    /// Nothing to process; the caller should ask for data again.
    #[error("no student entries to process; fill in student id and name first")]
    EmptyInput,

    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl PipelineError {
    /// True for the recoverable empty-input case.
    pub fn is_warning(&self) -> bool {
        matches!(self, PipelineError::EmptyInput)
    }
}
