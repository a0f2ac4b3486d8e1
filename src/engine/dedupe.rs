//! Tolerance-based deduplication of candidate coordinates.
//!
//! Candidates arrive in strategy-priority order; keeping the first
//! occurrence means the highest-priority strategy's format tag survives.
//! The scan compares each candidate against every kept one; per-input
//! candidate counts are bounded by strategies times OCR attempts.

use super::types::Coordinate;

/// Two candidates within this distance on both axes are the same point
/// (about 11 m of latitude).
pub const DEDUP_TOLERANCE: f64 = 1e-4;

/// Reduce an ordered candidate sequence, keeping the first occurrence of
/// each near-identical pair.
pub fn dedupe_coordinates(candidates: Vec<Coordinate>) -> Vec<Coordinate> {
    let mut unique: Vec<Coordinate> = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        let duplicate = unique.iter().any(|kept| {
            (candidate.latitude - kept.latitude).abs() < DEDUP_TOLERANCE
                && (candidate.longitude - kept.longitude).abs() < DEDUP_TOLERANCE
        });
        if !duplicate {
            unique.push(candidate);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_identical_pair_collapses_keeping_first_tag() {
        let reduced = dedupe_coordinates(vec![
            Coordinate::new("Lat/Long", 30.045977, 73.604948),
            Coordinate::new("Auto-detected", 30.045990, 73.604950),
        ]);
        assert_eq!(reduced.len(), 1);
        assert_eq!(reduced[0].format, "Lat/Long");
    }

    #[test]
    fn distinct_points_are_kept_in_order() {
        let reduced = dedupe_coordinates(vec![
            Coordinate::new("DMS", 40.7128, -74.0061),
            Coordinate::new("DDM", 51.5074, -0.1278),
        ]);
        assert_eq!(reduced.len(), 2);
        assert_eq!(reduced[0].format, "DMS");
        assert_eq!(reduced[1].format, "DDM");
    }

    #[test]
    fn tolerance_is_strict() {
        // Exactly 1e-4 apart on one axis is not a duplicate.
        let reduced = dedupe_coordinates(vec![
            Coordinate::new("a", 10.0, 20.0),
            Coordinate::new("b", 10.0001, 20.0),
        ]);
        assert_eq!(reduced.len(), 2);
    }

    #[test]
    fn both_axes_must_be_close() {
        let reduced = dedupe_coordinates(vec![
            Coordinate::new("a", 10.0, 20.0),
            Coordinate::new("b", 10.00001, 21.0),
        ]);
        assert_eq!(reduced.len(), 2);
    }

    #[test]
    fn dedup_is_idempotent() {
        let input = vec![
            Coordinate::new("a", 10.0, 20.0),
            Coordinate::new("b", 10.00001, 20.00001),
            Coordinate::new("c", 30.0, 40.0),
        ];
        let once = dedupe_coordinates(input);
        let twice = dedupe_coordinates(once.clone());
        assert_eq!(once.len(), twice.len());
        for (a, b) in once.iter().zip(twice.iter()) {
            assert_eq!(a.format, b.format);
            assert_eq!(a.latitude, b.latitude);
            assert_eq!(a.longitude, b.longitude);
        }
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(dedupe_coordinates(vec![]).is_empty());
    }
}
