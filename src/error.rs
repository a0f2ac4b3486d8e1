//! Error taxonomy for extraction and batch processing.
//!
//! Per-input failures are recoverable by contract: the batch run loop
//! converts them to status notifications and moves on to the next input.
//! Only the startup OCR probe, export I/O, and a dead worker thread surface
//! as hard errors to the caller.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    /// The OCR engine could not be reached at all. Nothing can proceed.
    #[error("OCR engine unavailable: {0}")]
    OcrUnavailable(String),

    /// OCR acquisition or decoding failed for a single input.
    #[error("OCR failed for {image_id}: {message}")]
    OcrFailed { image_id: String, message: String },

    /// Writing an export file failed. No partial-file cleanup is attempted.
    #[error("export failed: {0}")]
    Export(#[from] std::io::Error),

    /// The background batch worker panicked before returning its state.
    #[error("batch worker panicked")]
    WorkerPanicked,
}
