//! Core data types for the extraction engine.

use serde::{Deserialize, Serialize};

use super::normalize::clip_chars;
use crate::ocr::OcrText;

/// A validated coordinate pair. `format` names the matching strategy that
/// produced it; it is diagnostic only and never part of equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coordinate {
    pub format: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(format: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            format: format.to_string(),
            latitude,
            longitude,
        }
    }
}

const ATTEMPT_PREVIEW_CHARS: usize = 500;
const COMBINED_PREVIEW_CHARS: usize = 1000;

/// Result of one engine run over a single input's OCR attempts.
///
/// The raw attempts and their concatenation are kept so a caller can show
/// what the OCR engine actually produced when nothing was found.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionOutcome {
    pub coordinates: Vec<Coordinate>,
    pub attempts: Vec<OcrText>,
    pub combined_text: String,
}

impl ExtractionOutcome {
    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }

    /// Render the raw OCR attempts for display when no coordinate was found.
    pub fn diagnostics(&self) -> String {
        let mut out = String::new();
        for (i, attempt) in self.attempts.iter().enumerate() {
            out.push_str(&format!("--- Attempt {} ({}) ---\n", i + 1, attempt.label));
            push_preview(&mut out, &attempt.text, ATTEMPT_PREVIEW_CHARS);
        }
        if !self.combined_text.is_empty() {
            out.push_str("--- Combined text ---\n");
            push_preview(&mut out, &self.combined_text, COMBINED_PREVIEW_CHARS);
        }
        out
    }
}

fn push_preview(out: &mut String, text: &str, max_chars: usize) {
    let clipped = clip_chars(text, max_chars);
    out.push_str(clipped);
    if clipped.len() < text.len() {
        out.push_str("...");
    }
    out.push_str("\n\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn diagnostics_lists_attempts_with_labels() {
        let outcome = ExtractionOutcome {
            coordinates: vec![],
            attempts: vec![
                OcrText::new("first pass text", "psm6"),
                OcrText::new("second pass text", "psm11"),
            ],
            combined_text: "first pass text\nsecond pass text".to_string(),
        };
        let diag = outcome.diagnostics();
        assert!(diag.contains("Attempt 1 (psm6)"));
        assert!(diag.contains("Attempt 2 (psm11)"));
        assert!(diag.contains("Combined text"));
    }

    #[test]
    fn diagnostics_truncates_long_attempts() {
        let long = "x".repeat(600);
        let outcome = ExtractionOutcome {
            coordinates: vec![],
            attempts: vec![OcrText::new(long, "psm6")],
            combined_text: String::new(),
        };
        let diag = outcome.diagnostics();
        assert!(diag.contains("..."));
        assert!(!diag.contains(&"x".repeat(600)));
    }

    #[test]
    fn outcome_emptiness_tracks_coordinates() {
        let mut outcome = ExtractionOutcome {
            coordinates: vec![],
            attempts: vec![],
            combined_text: String::new(),
        };
        assert!(outcome.is_empty());
        outcome.coordinates.push(Coordinate::new("DMS", 1.0, 2.0));
        assert!(!outcome.is_empty());
    }

    #[test]
    fn coordinate_serde_roundtrip() {
        let coord = Coordinate::new("Lat/Long", 30.045977, 73.604948);
        let json = serde_json::to_string(&coord).unwrap();
        let parsed: Coordinate = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.format, "Lat/Long");
        assert_eq!(parsed.latitude, 30.045977);
        assert_eq!(parsed.longitude, 73.604948);
    }
}
