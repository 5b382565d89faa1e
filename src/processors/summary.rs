//! Batch summary statistics.

use crate::core::records::{AttendanceTable, Summary};
use crate::core::transforms::mean;

/// Compute the average attendance and the below-threshold list for a table.
///
/// The count fields are filled in by the pipeline, which knows what earlier
/// stages removed or changed.
pub fn summarize(table: &AttendanceTable) -> Summary {
    let average_attendance = mean(table.iter().map(|r| r.attendance_pct)).unwrap_or(0.0);

    Summary {
        average_attendance,
        below_threshold: table.below_threshold(),
        ..Summary::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::records::{AttendanceStatus, CleanedRecord};

    fn record(id: &str, pct: f64) -> CleanedRecord {
        CleanedRecord {
            student_id: id.to_string(),
            name: id.to_string(),
            total_classes: 100,
            attended_classes: pct as u32,
            attendance_pct: pct,
            status: AttendanceStatus::from_percentage(pct),
            total_imputed: false,
        }
    }

    #[test]
    fn test_summarize() {
        let table = AttendanceTable::from_records(vec![
            record("S1", 75.0),
            record("S2", 50.0),
            record("S3", 90.0),
            record("S4", 10.0),
        ]);

        let summary = summarize(&table);
        assert_eq!(summary.average_attendance, 56.25);
        assert_eq!(summary.average_display(), "56.25");

        let low: Vec<&str> = summary
            .below_threshold
            .iter()
            .map(|r| r.student_id.as_str())
            .collect();
        assert_eq!(low, vec!["S2", "S4"]);
    }

    #[test]
    fn test_summarize_empty_table() {
        let summary = summarize(&AttendanceTable::default());
        assert_eq!(summary.average_attendance, 0.0);
        assert!(summary.below_threshold.is_empty());
    }
}
