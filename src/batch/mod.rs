//! Batch processing over many inputs.
//!
//! A [`BatchController`] owns the accumulated state and runs inputs strictly
//! sequentially; [`BatchControls`] carries the cooperative pause/cancel
//! flags; [`BatchWorker`] drives a run on a background thread and streams
//! [`BatchEvent`]s to the owning side; [`reconcile`] cleans exact duplicate
//! rows on demand.

pub mod control;
pub mod controller;
pub mod reconcile;
pub mod types;
pub mod worker;

pub use control::BatchControls;
pub use controller::BatchController;
pub use reconcile::{detect_duplicates, remove_duplicates, DuplicateReport, ReconcileOutcome};
pub use types::{new_run_id, BatchEvent, BatchPhase, BatchResultRow, BatchSummary};
pub use worker::BatchWorker;
