//! Type normalization of class counts.

use log::info;

use super::imputation::ImputedRecord;

/// A deduplicated record with whole-number class counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRecord {
    pub student_id: String,
    pub name: String,
    pub total_classes: u32,
    pub attended_classes: u32,
    pub total_imputed: bool,
}

/// Truncate a count toward zero. Casting saturates, so negatives become 0.
#[inline]
fn to_count(value: f64) -> u32 {
    value.trunc() as u32
}

/// Coerce class counts to integers, truncating any fractional imputed mean.
pub fn normalize_types(records: Vec<ImputedRecord>) -> Vec<NormalizedRecord> {
    info!("Ensuring correct data types...");

    records
        .into_iter()
        .map(|r| {
            let total_classes = to_count(r.total_classes);
            debug_assert!(total_classes > 0, "total classes must be positive after imputation");

            NormalizedRecord {
                student_id: r.student_id,
                name: r.name,
                total_classes,
                attended_classes: to_count(r.attended_classes),
                total_imputed: r.total_imputed,
            }
        })
        .collect()
}
