//! Attendance percentage and status derivation.

use log::{debug, warn};

use crate::config::OverAttendancePolicy;
use crate::core::records::{AttendanceStatus, CleanedRecord};
use crate::core::transforms::round_decimals;

use super::normalize::NormalizedRecord;
use super::InvalidInputError;

/// Derived records plus the number that were clamped.
#[derive(Debug, Clone, PartialEq)]
pub struct Derived {
    pub records: Vec<CleanedRecord>,
    pub clamped: usize,
}

/// `round(attended * 100 / total, 2)`.
///
/// `total_classes` must be non-zero.
#[inline]
pub fn attendance_percentage(attended_classes: u32, total_classes: u32) -> f64 {
    round_decimals(
        f64::from(attended_classes) * 100.0 / f64::from(total_classes),
        2,
    )
}

/// Compute percentage and status for every record.
///
/// # Errors
///
/// With [`OverAttendancePolicy::Reject`], returns
/// [`InvalidInputError::AttendedExceedsTotal`] for the first record that
/// attended more classes than were held.
pub fn derive_attendance(
    records: Vec<NormalizedRecord>,
    policy: OverAttendancePolicy,
) -> Result<Derived, InvalidInputError> {
    let mut clamped = 0usize;
    let mut derived = Vec::with_capacity(records.len());

    for r in records {
        let mut attended_classes = r.attended_classes;

        if attended_classes > r.total_classes {
            match policy {
                OverAttendancePolicy::Accept => {
                    debug!(
                        "Student {}: attended {} of {} classes, keeping as entered",
                        r.student_id, attended_classes, r.total_classes
                    );
                }
                OverAttendancePolicy::Clamp => {
                    debug!(
                        "Student {}: clamping attended {} to {}",
                        r.student_id, attended_classes, r.total_classes
                    );
                    attended_classes = r.total_classes;
                    clamped += 1;
                }
                OverAttendancePolicy::Reject => {
                    return Err(InvalidInputError::AttendedExceedsTotal {
                        student_id: r.student_id,
                        attended: attended_classes,
                        total: r.total_classes,
                    });
                }
            }
        }

        let attendance_pct = attendance_percentage(attended_classes, r.total_classes);

        derived.push(CleanedRecord {
            student_id: r.student_id,
            name: r.name,
            total_classes: r.total_classes,
            attended_classes,
            attendance_pct,
            status: AttendanceStatus::from_percentage(attendance_pct),
            total_imputed: r.total_imputed,
        });
    }

    if clamped > 0 {
        warn!("Clamped attended classes for {} record(s)", clamped);
    }

    Ok(Derived {
        records: derived,
        clamped,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(id: &str, total: u32, attended: u32) -> NormalizedRecord {
        NormalizedRecord {
            student_id: id.to_string(),
            name: "Test".to_string(),
            total_classes: total,
            attended_classes: attended,
            total_imputed: false,
        }
    }

    #[test]
    fn test_attendance_percentage() {
        assert_eq!(attendance_percentage(15, 20), 75.0);
        assert_eq!(attendance_percentage(5, 10), 50.0);
        assert_eq!(attendance_percentage(2, 3), 66.67);
        assert_eq!(attendance_percentage(1, 3), 33.33);
        assert_eq!(attendance_percentage(0, 10), 0.0);
    }

    #[test]
    fn test_status_threshold() {
        let out = derive_attendance(
            vec![normalized("S1", 20, 15), normalized("S2", 4, 2)],
            OverAttendancePolicy::Accept,
        )
        .unwrap();

        assert_eq!(out.records[0].status, AttendanceStatus::Good);
        assert_eq!(out.records[1].status, AttendanceStatus::Low);
    }

    #[test]
    fn test_accept_keeps_over_attendance() {
        let out = derive_attendance(vec![normalized("S1", 10, 12)], OverAttendancePolicy::Accept)
            .unwrap();

        assert_eq!(out.records[0].attended_classes, 12);
        assert_eq!(out.records[0].attendance_pct, 120.0);
        assert_eq!(out.clamped, 0);
    }

    #[test]
    fn test_clamp_over_attendance() {
        let out = derive_attendance(
            vec![normalized("S1", 10, 12), normalized("S2", 10, 3)],
            OverAttendancePolicy::Clamp,
        )
        .unwrap();

        assert_eq!(out.records[0].attended_classes, 10);
        assert_eq!(out.records[0].attendance_pct, 100.0);
        assert_eq!(out.records[1].attendance_pct, 30.0);
        assert_eq!(out.clamped, 1);
    }

    #[test]
    fn test_reject_over_attendance() {
        let result =
            derive_attendance(vec![normalized("S7", 10, 11)], OverAttendancePolicy::Reject);

        assert_eq!(
            result,
            Err(InvalidInputError::AttendedExceedsTotal {
                student_id: "S7".to_string(),
                attended: 11,
                total: 10,
            })
        );
    }
}
