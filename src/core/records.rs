//! Record types flowing through the attendance pipeline.
//!
//! - [`RawRecord`]: one entered student row, before any cleaning
//! - [`CleanedRecord`]: a deduplicated row with derived percentage and status
//! - [`AttendanceTable`]: the ordered, id-unique set of cleaned rows
//! - [`Summary`]: batch statistics computed from the table

use std::fmt;

use super::transforms::title_case;

/// Attendance percentage below which a student is flagged as [`AttendanceStatus::Low`].
pub const LOW_ATTENDANCE_THRESHOLD: f64 = 75.0;

/// A single student entry as collected from the input form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// External student identifier.
    pub student_id: String,
    /// Display name.
    pub name: String,
    /// Number of classes held. Zero means "not entered".
    pub total_classes: u32,
    /// Number of classes attended.
    pub attended_classes: u32,
}

impl RawRecord {
    /// Creates a record from already-normalized fields.
    pub fn new(
        student_id: impl Into<String>,
        name: impl Into<String>,
        total_classes: u32,
        attended_classes: u32,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            name: name.into(),
            total_classes,
            attended_classes,
        }
    }

    /// Builds a record from one group of form fields.
    ///
    /// The id and name are trimmed, and the name is title-cased when
    /// `title_case_names` is set. Returns `None` when either the id or
    /// the name is blank, since such rows are not part of the batch.
    pub fn from_entry(
        student_id: &str,
        name: &str,
        total_classes: u32,
        attended_classes: u32,
        title_case_names: bool,
    ) -> Option<Self> {
        let student_id = student_id.trim();
        let name = name.trim();
        if student_id.is_empty() || name.is_empty() {
            return None;
        }

        let name = if title_case_names {
            title_case(name)
        } else {
            name.to_string()
        };

        Some(Self::new(student_id, name, total_classes, attended_classes))
    }

    /// Returns true if both identifier and name are present.
    #[inline]
    pub fn is_complete(&self) -> bool {
        !self.student_id.trim().is_empty() && !self.name.trim().is_empty()
    }
}

/// Attendance classification against [`LOW_ATTENDANCE_THRESHOLD`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttendanceStatus {
    Low,
    Good,
}

impl AttendanceStatus {
    /// Classifies a percentage. Exactly 75.0 counts as `Good`.
    pub fn from_percentage(attendance_pct: f64) -> Self {
        if attendance_pct < LOW_ATTENDANCE_THRESHOLD {
            AttendanceStatus::Low
        } else {
            AttendanceStatus::Good
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Low => "Low",
            AttendanceStatus::Good => "Good",
        }
    }
}

impl fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A cleaned student row with derived attendance fields.
///
/// `total_classes` is always greater than zero. `attended_classes` may
/// exceed it unless the over-attendance policy says otherwise.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanedRecord {
    pub student_id: String,
    pub name: String,
    pub total_classes: u32,
    pub attended_classes: u32,
    /// Percentage of classes attended, rounded to 2 decimals.
    pub attendance_pct: f64,
    pub status: AttendanceStatus,
    /// True if `total_classes` was filled in by imputation.
    pub total_imputed: bool,
}

impl CleanedRecord {
    /// Returns true if the record falls under the low-attendance threshold.
    #[inline]
    pub fn is_below_threshold(&self) -> bool {
        self.attendance_pct < LOW_ATTENDANCE_THRESHOLD
    }
}

/// Ordered collection of cleaned records, unique by student id.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AttendanceTable {
    records: Vec<CleanedRecord>,
}

impl AttendanceTable {
    /// Wraps records that have already been deduplicated.
    pub(crate) fn from_records(records: Vec<CleanedRecord>) -> Self {
        debug_assert!(
            {
                let mut seen = std::collections::HashSet::new();
                records.iter().all(|r| seen.insert(r.student_id.as_str()))
            },
            "attendance table must be unique by student id"
        );
        Self { records }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[CleanedRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CleanedRecord> {
        self.records.iter()
    }

    /// Looks up a record by student id.
    pub fn get(&self, student_id: &str) -> Option<&CleanedRecord> {
        self.records.iter().find(|r| r.student_id == student_id)
    }

    /// Records under the low-attendance threshold, in table order.
    pub fn below_threshold(&self) -> Vec<CleanedRecord> {
        self.records
            .iter()
            .filter(|r| r.is_below_threshold())
            .cloned()
            .collect()
    }

    pub fn into_records(self) -> Vec<CleanedRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a AttendanceTable {
    type Item = &'a CleanedRecord;
    type IntoIter = std::slice::Iter<'a, CleanedRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Batch statistics for one pipeline run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    /// Mean attendance percentage over the table (unrounded).
    pub average_attendance: f64,
    /// Records under the threshold, in table order.
    pub below_threshold: Vec<CleanedRecord>,
    /// Input records dropped as duplicate student ids.
    pub duplicates_removed: usize,
    /// Input records whose zero total was replaced by the batch mean.
    pub imputed_totals: usize,
    /// Table records whose attended count was clamped to the total.
    pub clamped: usize,
}

impl Summary {
    /// Average attendance formatted for display, e.g. `"62.50"`.
    pub fn average_display(&self) -> String {
        format!("{:.2}", self.average_attendance)
    }
}

/// Output of a successful pipeline run.
#[derive(Debug, Clone, PartialEq)]
pub struct AttendanceReport {
    pub table: AttendanceTable,
    pub summary: Summary,
}

impl AttendanceReport {
    pub fn into_parts(self) -> (AttendanceTable, Summary) {
        (self.table, self.summary)
    }
}
