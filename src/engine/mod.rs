//! Coordinate extraction engine.
//!
//! [`find_coordinates`] runs the full pattern bank over one raw text.
//! [`extract_from_attempts`] pools candidates from several OCR attempts plus
//! their concatenation and deduplicates the pool once more; a pair whose
//! halves landed in different attempts only surfaces in the combined view.
//! [`extract_image`] drives an [`OcrSource`] for a single input and keeps
//! the raw texts for diagnostics.

pub mod dedupe;
pub mod normalize;
pub mod strategy;
pub mod types;
pub mod validate;

pub use dedupe::{dedupe_coordinates, DEDUP_TOLERANCE};
pub use normalize::TextViews;
pub use strategy::Strategy;
pub use types::{Coordinate, ExtractionOutcome};
pub use validate::in_bounds;

use crate::error::ExtractionError;
use crate::ocr::{OcrSource, OcrText};

/// Extract every coordinate the pattern bank finds in one raw text,
/// deduplicated in strategy-priority order.
pub fn find_coordinates(text: &str) -> Vec<Coordinate> {
    let views = TextViews::new(text);
    let mut candidates = Vec::new();
    for strategy in Strategy::ALL {
        candidates.extend(strategy.extract(&views));
    }
    dedupe_coordinates(candidates)
}

/// Run the engine over a pool of OCR attempts for one input.
pub fn extract_from_attempts(attempts: &[OcrText]) -> ExtractionOutcome {
    let combined_text = attempts
        .iter()
        .map(|a| a.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");

    let mut pooled = Vec::new();
    for attempt in attempts {
        pooled.extend(find_coordinates(&attempt.text));
    }
    pooled.extend(find_coordinates(&combined_text));

    ExtractionOutcome {
        coordinates: dedupe_coordinates(pooled),
        attempts: attempts.to_vec(),
        combined_text,
    }
}

/// Acquire OCR attempts for one input and run the engine over them.
pub fn extract_image(
    ocr: &dyn OcrSource,
    image_id: &str,
) -> Result<ExtractionOutcome, ExtractionError> {
    let attempts = ocr.recognize(image_id)?;
    Ok(extract_from_attempts(&attempts))
}
