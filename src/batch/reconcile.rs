//! Coarse duplicate reconciliation over accumulated result rows.
//!
//! The detection key includes the serial number, so only rows re-inserted
//! verbatim count as duplicates, not coordinate-equal rows from different
//! runs. Two-phase by contract: detect, confirm with the caller, then
//! mutate. Never automatic.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::types::BatchResultRow;

/// Coordinates are quantized to six decimal places for the detection key.
const KEY_SCALE: f64 = 1e6;

/// Detection-phase output: the rows whose key was already seen, in list
/// order, plus how many unique rows would remain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateReport {
    pub duplicates: Vec<BatchResultRow>,
    pub unique_count: usize,
}

impl DuplicateReport {
    pub fn is_empty(&self) -> bool {
        self.duplicates.is_empty()
    }
}

/// Mutation-phase output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReconcileOutcome {
    pub removed: usize,
    pub remaining: usize,
}

fn row_key(row: &BatchResultRow) -> (u32, String, i64, i64) {
    (
        row.serial,
        row.image_id.clone(),
        (row.latitude * KEY_SCALE).round() as i64,
        (row.longitude * KEY_SCALE).round() as i64,
    )
}

/// Report rows that are exact re-insertions of an earlier row.
pub fn detect_duplicates(rows: &[BatchResultRow]) -> DuplicateReport {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for row in rows {
        if !seen.insert(row_key(row)) {
            duplicates.push(row.clone());
        }
    }
    DuplicateReport {
        unique_count: rows.len() - duplicates.len(),
        duplicates,
    }
}

/// Remove exact re-inserted rows and renumber the survivors 1..N in their
/// current order. Returns how many rows were removed.
pub fn remove_duplicates(rows: &mut Vec<BatchResultRow>) -> ReconcileOutcome {
    let before = rows.len();
    let mut seen = HashSet::new();
    rows.retain(|row| seen.insert(row_key(row)));
    for (index, row) in rows.iter_mut().enumerate() {
        row.serial = index as u32 + 1;
    }
    let outcome = ReconcileOutcome {
        removed: before - rows.len(),
        remaining: rows.len(),
    };
    if outcome.removed > 0 {
        tracing::info!(
            removed = outcome.removed,
            remaining = outcome.remaining,
            "duplicate rows reconciled"
        );
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(serial: u32, image_id: &str, lat: f64, lon: f64) -> BatchResultRow {
        BatchResultRow {
            serial,
            image_id: image_id.to_string(),
            latitude: lat,
            longitude: lon,
        }
    }

    #[test]
    fn exact_reinsertion_is_detected() {
        let rows = vec![
            row(1, "a", 30.045977, 73.604948),
            row(2, "b", 31.520370, 74.358747),
            row(1, "a", 30.045977, 73.604948),
        ];
        let report = detect_duplicates(&rows);
        assert_eq!(report.duplicates.len(), 1);
        assert_eq!(report.unique_count, 2);
        assert_eq!(report.duplicates[0].image_id, "a");
    }

    #[test]
    fn coordinate_equal_rows_with_different_serials_are_kept() {
        // Same point extracted in two runs gets two serials; the key
        // includes the serial, so this is not a duplicate.
        let rows = vec![
            row(1, "a", 30.045977, 73.604948),
            row(2, "a", 30.045977, 73.604948),
        ];
        let report = detect_duplicates(&rows);
        assert!(report.is_empty());
    }

    #[test]
    fn sub_microdegree_differences_share_a_key() {
        let rows = vec![
            row(1, "a", 30.0459770, 73.6049480),
            row(1, "a", 30.0459770000001, 73.6049480000001),
        ];
        let report = detect_duplicates(&rows);
        assert_eq!(report.duplicates.len(), 1);
    }

    #[test]
    fn removal_renumbers_survivors_contiguously() {
        let mut rows = vec![
            row(1, "a", 30.0, 73.0),
            row(2, "b", 31.0, 74.0),
            row(1, "a", 30.0, 73.0),
            row(3, "c", 32.0, 75.0),
            row(2, "b", 31.0, 74.0),
        ];
        let outcome = remove_duplicates(&mut rows);
        assert_eq!(outcome.removed, 2);
        assert_eq!(outcome.remaining, 3);
        let serials: Vec<u32> = rows.iter().map(|r| r.serial).collect();
        assert_eq!(serials, vec![1, 2, 3]);
        let images: Vec<&str> = rows.iter().map(|r| r.image_id.as_str()).collect();
        assert_eq!(images, vec!["a", "b", "c"], "relative order preserved");
    }

    #[test]
    fn removal_without_duplicates_only_renumbers() {
        let mut rows = vec![row(5, "a", 30.0, 73.0), row(9, "b", 31.0, 74.0)];
        let outcome = remove_duplicates(&mut rows);
        assert_eq!(outcome.removed, 0);
        assert_eq!(rows[0].serial, 1);
        assert_eq!(rows[1].serial, 2);
    }

    #[test]
    fn empty_rows_reconcile_to_empty() {
        let mut rows: Vec<BatchResultRow> = Vec::new();
        let outcome = remove_duplicates(&mut rows);
        assert_eq!(outcome.removed, 0);
        assert_eq!(outcome.remaining, 0);
    }
}
