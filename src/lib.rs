//! geosift — coordinate extraction from noisy OCR text.
//!
//! The crate has two halves:
//! - the extraction engine ([`engine`]): turns raw OCR text into a
//!   deduplicated list of latitude/longitude pairs via a fixed bank of
//!   pattern-matching strategies tolerant of OCR noise, and
//! - the batch layer ([`batch`]): drives the engine sequentially over many
//!   inputs with pause/resume/cancel, incremental serially-numbered results,
//!   and an on-demand duplicate reconciliation pass.
//!
//! OCR itself is an external collaborator behind the [`ocr::OcrSource`]
//! trait; results leave the crate through the [`export`] text format.

pub mod batch;
pub mod config;
pub mod engine;
pub mod error;
pub mod export;
pub mod ocr;

pub use batch::{
    BatchController, BatchControls, BatchEvent, BatchPhase, BatchResultRow, BatchSummary,
    BatchWorker,
};
pub use engine::{
    extract_from_attempts, extract_image, find_coordinates, Coordinate, ExtractionOutcome,
};
pub use error::ExtractionError;
pub use ocr::{MockOcrSource, OcrSource, OcrText};

use tracing_subscriber::EnvFilter;

/// Initialize tracing for binaries that embed the crate.
/// Respects `RUST_LOG`, falling back to [`config::default_log_filter`].
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
