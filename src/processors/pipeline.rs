//! The attendance pipeline driver.
//!
//! Runs the stages in order, each consuming the previous snapshot:
//!
//! 1. missing total handling ([`impute_zero_totals`] or [`reject_zero_totals`])
//! 2. [`deduplicate`]
//! 3. [`normalize_types`]
//! 4. [`derive_attendance`]
//! 5. [`summarize`]

use log::{debug, info};

use crate::config::{OverAttendancePolicy, PipelineConfig};
use crate::core::records::{AttendanceReport, AttendanceTable, RawRecord};

use super::dedup::deduplicate;
use super::derivation::derive_attendance;
use super::imputation::{impute_zero_totals, reject_zero_totals};
use super::normalize::normalize_types;
use super::summary::summarize;
use super::PipelineError;

/// Stateless attendance pipeline.
///
/// Holds only its settings; [`process`](Self::process) never mutates the
/// input and returns the same report for the same batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendancePipeline {
    impute_missing_totals: bool,
    over_attendance: OverAttendancePolicy,
}

impl Default for AttendancePipeline {
    fn default() -> Self {
        Self {
            impute_missing_totals: true,
            over_attendance: OverAttendancePolicy::Accept,
        }
    }
}

impl AttendancePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a pipeline from the imputation and validation settings.
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            impute_missing_totals: config.imputation.enabled,
            over_attendance: config.validation.over_attendance,
        }
    }

    /// Enable or disable zero-total imputation.
    pub fn with_imputation(mut self, enabled: bool) -> Self {
        self.impute_missing_totals = enabled;
        self
    }

    pub fn with_over_attendance(mut self, policy: OverAttendancePolicy) -> Self {
        self.over_attendance = policy;
        self
    }

    pub fn imputes_missing_totals(&self) -> bool {
        self.impute_missing_totals
    }

    pub fn over_attendance(&self) -> OverAttendancePolicy {
        self.over_attendance
    }

    /// Clean a batch of entered records and derive attendance figures.
    ///
    /// Records without an id or name are ignored.
    ///
    /// # Errors
    ///
    /// - [`PipelineError::EmptyInput`] if no complete record remains
    /// - [`PipelineError::InvalidInput`] if totals cannot be fixed up or a
    ///   record breaks the over-attendance policy
    pub fn process(&self, records: &[RawRecord]) -> Result<AttendanceReport, PipelineError> {
        let complete: Vec<RawRecord> = records.iter().filter(|r| r.is_complete()).cloned().collect();

        if complete.len() < records.len() {
            debug!(
                "Ignoring {} record(s) without student id or name",
                records.len() - complete.len()
            );
        }
        if complete.is_empty() {
            return Err(PipelineError::EmptyInput);
        }

        info!("Processing {} attendance record(s)", complete.len());

        let imputed = if self.impute_missing_totals {
            impute_zero_totals(&complete)?
        } else {
            reject_zero_totals(&complete)?
        };
        let imputed_totals = imputed.iter().filter(|r| r.total_imputed).count();

        let deduped = deduplicate(imputed);
        let normalized = normalize_types(deduped.records);
        let derived = derive_attendance(normalized, self.over_attendance)?;

        let table = AttendanceTable::from_records(derived.records);
        let mut summary = summarize(&table);
        summary.duplicates_removed = deduped.duplicates_removed;
        summary.imputed_totals = imputed_totals;
        summary.clamped = derived.clamped;

        info!(
            "Data wrangling completed: {} student(s), average attendance {}%, {} below threshold",
            table.len(),
            summary.average_display(),
            summary.below_threshold.len()
        );

        Ok(AttendanceReport { table, summary })
    }
}
