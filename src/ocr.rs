//! OCR collaborator contract.
//!
//! The engine never runs OCR itself. An [`OcrSource`] produces one or more
//! raw text attempts per input; the extraction side is agnostic to how many
//! engine configurations were tried. Attempts that come back empty or
//! whitespace-only must be discarded by the implementation before the list
//! reaches the engine.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::{Deserialize, Serialize};

use crate::error::ExtractionError;

/// One OCR attempt: the raw recognized text and a label naming the engine
/// configuration that produced it. The label is diagnostic only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrText {
    pub text: String,
    pub label: String,
}

impl OcrText {
    pub fn new(text: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            label: label.into(),
        }
    }
}

/// The external OCR engine, seen from the extraction side.
pub trait OcrSource: Send + Sync {
    /// Startup probe. An error here is fatal: no extraction can run.
    fn verify_available(&self) -> Result<(), ExtractionError>;

    /// Recognize text on one input, possibly under several configurations.
    /// Implementations must drop empty/whitespace-only attempts.
    fn recognize(&self, image_id: &str) -> Result<Vec<OcrText>, ExtractionError>;
}

/// Derive a stable, human-readable image identifier from a file path: the
/// file stem, falling back to the full file name.
pub fn image_id_from_path(path: &Path) -> String {
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// In-memory OCR source for unit tests and embedders without a real engine.
///
/// Fixtures map image identifiers to canned attempts; unknown identifiers
/// fail the way a broken input would. Recognition calls are counted so tests
/// can assert that inputs are not processed twice.
#[derive(Debug, Default)]
pub struct MockOcrSource {
    fixtures: HashMap<String, Vec<OcrText>>,
    calls: AtomicUsize,
}

impl MockOcrSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a single attempt labeled "mock" for an image.
    pub fn with_text(mut self, image_id: impl Into<String>, text: impl Into<String>) -> Self {
        self.fixtures
            .insert(image_id.into(), vec![OcrText::new(text, "mock")]);
        self
    }

    /// Register several attempts for an image.
    pub fn with_attempts(mut self, image_id: impl Into<String>, attempts: Vec<OcrText>) -> Self {
        self.fixtures.insert(image_id.into(), attempts);
        self
    }

    /// How many times `recognize` has been called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl OcrSource for MockOcrSource {
    fn verify_available(&self) -> Result<(), ExtractionError> {
        Ok(())
    }

    fn recognize(&self, image_id: &str) -> Result<Vec<OcrText>, ExtractionError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        let attempts = self
            .fixtures
            .get(image_id)
            .ok_or_else(|| ExtractionError::OcrFailed {
                image_id: image_id.to_string(),
                message: "no fixture registered".to_string(),
            })?;
        Ok(attempts
            .iter()
            .filter(|a| !a.text.trim().is_empty())
            .cloned()
            .collect())
    }
}
