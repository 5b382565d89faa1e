//! Deduplication by student identifier.

use std::collections::HashSet;

use log::{debug, warn};

use crate::core::records::{CleanedRecord, RawRecord};

use super::imputation::ImputedRecord;

/// Records that can be deduplicated by student id.
pub trait StudentKeyed {
    fn student_id(&self) -> &str;
}

impl StudentKeyed for RawRecord {
    fn student_id(&self) -> &str {
        &self.student_id
    }
}

impl StudentKeyed for ImputedRecord {
    fn student_id(&self) -> &str {
        &self.student_id
    }
}

impl StudentKeyed for CleanedRecord {
    fn student_id(&self) -> &str {
        &self.student_id
    }
}

/// Output of [`deduplicate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Deduplicated<T> {
    /// First record per student id, in input order.
    pub records: Vec<T>,
    /// Number of records dropped.
    pub duplicates_removed: usize,
}

/// Keep the first record for every student id, preserving input order.
///
/// Running this on its own output removes nothing further.
pub fn deduplicate<T: StudentKeyed>(records: Vec<T>) -> Deduplicated<T> {
    let before = records.len();
    let mut seen: HashSet<String> = HashSet::with_capacity(before);

    let records: Vec<T> = records
        .into_iter()
        .filter(|r| {
            let first = seen.insert(r.student_id().to_string());
            if !first {
                debug!("Dropping duplicate entry for student {}", r.student_id());
            }
            first
        })
        .collect();

    let duplicates_removed = before - records.len();
    if duplicates_removed > 0 {
        warn!(
            "Removed {} duplicate entries based on Student ID",
            duplicates_removed
        );
    }

    Deduplicated {
        records,
        duplicates_removed,
    }
}
