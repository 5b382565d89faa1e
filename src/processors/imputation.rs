//! Handling of missing total-class counts.
//!
//! A total of zero means the count was never entered. In the wrangling
//! variant it is replaced by the batch mean of the non-zero totals; in the
//! simple variant it is rejected outright.

use log::{debug, info, warn};

use crate::core::records::RawRecord;
use crate::core::transforms::mean;

use super::InvalidInputError;

/// A record after the missing-data stage.
///
/// The total is fractional because an imputed mean need not be whole;
/// type normalization truncates it later.
#[derive(Debug, Clone, PartialEq)]
pub struct ImputedRecord {
    pub student_id: String,
    pub name: String,
    pub total_classes: f64,
    pub attended_classes: f64,
    pub total_imputed: bool,
}

impl ImputedRecord {
    fn from_raw(record: &RawRecord, total_classes: f64, total_imputed: bool) -> Self {
        Self {
            student_id: record.student_id.clone(),
            name: record.name.clone(),
            total_classes,
            attended_classes: f64::from(record.attended_classes),
            total_imputed,
        }
    }
}

/// Replace zero totals with the mean of the non-zero totals in the batch.
///
/// The mean is taken over the whole batch before any record is changed and
/// before deduplication, so repeated entries weigh in.
///
/// # Errors
///
/// Returns [`InvalidInputError::AllTotalsZero`] when no record has a
/// non-zero total to average.
pub fn impute_zero_totals(records: &[RawRecord]) -> Result<Vec<ImputedRecord>, InvalidInputError> {
    info!("Handling missing or invalid total classes...");

    let zero_count = records.iter().filter(|r| r.total_classes == 0).count();

    if zero_count == 0 {
        return Ok(records
            .iter()
            .map(|r| ImputedRecord::from_raw(r, f64::from(r.total_classes), false))
            .collect());
    }

    let fill = mean(
        records
            .iter()
            .filter(|r| r.total_classes > 0)
            .map(|r| f64::from(r.total_classes)),
    )
    .ok_or(InvalidInputError::AllTotalsZero {
        records: records.len(),
    })?;

    warn!(
        "Imputed total classes for {} record(s) with batch mean {:.2}",
        zero_count, fill
    );

    Ok(records
        .iter()
        .map(|r| {
            if r.total_classes == 0 {
                debug!("Student {}: total classes 0 -> {:.2}", r.student_id, fill);
                ImputedRecord::from_raw(r, fill, true)
            } else {
                ImputedRecord::from_raw(r, f64::from(r.total_classes), false)
            }
        })
        .collect())
}

/// Pass records through, failing on the first zero total.
///
/// Used when imputation is disabled, where the entry form would have
/// required at least one class.
///
/// # Errors
///
/// Returns [`InvalidInputError::ZeroTotal`] naming the first offending student.
pub fn reject_zero_totals(records: &[RawRecord]) -> Result<Vec<ImputedRecord>, InvalidInputError> {
    if let Some(r) = records.iter().find(|r| r.total_classes == 0) {
        return Err(InvalidInputError::ZeroTotal {
            student_id: r.student_id.clone(),
        });
    }

    Ok(records
        .iter()
        .map(|r| ImputedRecord::from_raw(r, f64::from(r.total_classes), false))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_impute_uses_mean_of_nonzero_totals() {
        let records = vec![
            RawRecord::new("S1", "Ann", 0, 0),
            RawRecord::new("S2", "Bob", 10, 5),
        ];

        let imputed = impute_zero_totals(&records).unwrap();
        assert_eq!(imputed[0].total_classes, 10.0);
        assert!(imputed[0].total_imputed);
        assert_eq!(imputed[1].total_classes, 10.0);
        assert!(!imputed[1].total_imputed);
    }

    #[test]
    fn test_impute_mean_counts_duplicates_and_can_be_fractional() {
        let records = vec![
            RawRecord::new("S1", "Ann", 20, 15),
            RawRecord::new("S1", "Ann", 20, 15),
            RawRecord::new("S2", "Bob", 5, 5),
            RawRecord::new("S3", "Cy", 0, 3),
        ];

        let imputed = impute_zero_totals(&records).unwrap();
        assert_eq!(imputed[3].total_classes, 15.0);

        let records = vec![
            RawRecord::new("S1", "Ann", 3, 1),
            RawRecord::new("S2", "Bob", 4, 1),
            RawRecord::new("S3", "Cy", 0, 1),
        ];
        let imputed = impute_zero_totals(&records).unwrap();
        assert_eq!(imputed[2].total_classes, 3.5);
    }

    #[test]
    fn test_impute_all_zero_fails() {
        let records = vec![
            RawRecord::new("S1", "Ann", 0, 0),
            RawRecord::new("S2", "Bob", 0, 2),
        ];

        assert_eq!(
            impute_zero_totals(&records),
            Err(InvalidInputError::AllTotalsZero { records: 2 })
        );
    }

    #[test]
    fn test_impute_does_not_touch_input() {
        let records = vec![
            RawRecord::new("S1", "Ann", 0, 0),
            RawRecord::new("S2", "Bob", 10, 5),
        ];
        let snapshot = records.clone();

        impute_zero_totals(&records).unwrap();
        assert_eq!(records, snapshot);
    }

    #[test]
    fn test_reject_zero_totals() {
        let records = vec![
            RawRecord::new("S1", "Ann", 10, 8),
            RawRecord::new("S2", "Bob", 0, 0),
        ];

        assert_eq!(
            reject_zero_totals(&records),
            Err(InvalidInputError::ZeroTotal {
                student_id: "S2".to_string()
            })
        );

        let ok = reject_zero_totals(&records[..1]).unwrap();
        assert_eq!(ok[0].total_classes, 10.0);
    }
}
