//! Sequential batch state machine.
//!
//! The controller owns all batch state and its run loop is the only writer.
//! Inputs are processed strictly one at a time: serial assignment stays
//! deterministic and the external OCR engine sees bounded load. The owning
//! side observes the run through events and touches only the cooperative
//! flags in [`BatchControls`].

use std::collections::HashSet;
use std::time::Instant;

use crate::engine::normalize::clip_chars;
use crate::engine::{self, Coordinate};
use crate::error::ExtractionError;
use crate::ocr::OcrSource;

use super::control::BatchControls;
use super::reconcile::{self, DuplicateReport, ReconcileOutcome};
use super::types::{
    new_run_id, BatchEvent, BatchPhase, BatchResultRow, BatchSummary, DIAGNOSTIC_MAX_CHARS,
};

#[derive(Debug, Default)]
pub struct BatchController {
    pending: Vec<String>,
    processed: HashSet<String>,
    rows: Vec<BatchResultRow>,
    phase: BatchPhase,
}

impl BatchController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge image identifiers into the pending list. Identifiers already
    /// pending are silently ignored. Returns how many were newly added.
    pub fn add_images<I, S>(&mut self, ids: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut added = 0;
        for id in ids {
            let id = id.into();
            if !self.pending.iter().any(|p| p == &id) {
                self.pending.push(id);
                added += 1;
            }
        }
        added
    }

    /// Drop all pending inputs and accumulated results.
    pub fn clear(&mut self) {
        self.pending.clear();
        self.processed.clear();
        self.rows.clear();
        self.phase = BatchPhase::Idle;
    }

    pub fn pending(&self) -> &[String] {
        &self.pending
    }

    pub fn rows(&self) -> &[BatchResultRow] {
        &self.rows
    }

    pub fn phase(&self) -> BatchPhase {
        self.phase
    }

    /// Identifiers the next run would actually process: pending, not yet
    /// processed in this controller's lifetime, and not already represented
    /// in the accumulated rows.
    fn work_subset(&self) -> Vec<String> {
        let in_rows: HashSet<&str> = self.rows.iter().map(|r| r.image_id.as_str()).collect();
        self.pending
            .iter()
            .filter(|id| !self.processed.contains(*id) && !in_rows.contains(id.as_str()))
            .cloned()
            .collect()
    }

    /// Run the batch over every pending input not yet processed.
    ///
    /// Per-input failures become status notifications and the run continues;
    /// only an unreachable OCR engine aborts up front. Pause and cancel are
    /// honored between inputs only; an in-flight OCR call runs to
    /// completion.
    pub fn run(
        &mut self,
        ocr: &dyn OcrSource,
        controls: &BatchControls,
        on_event: Option<&dyn Fn(BatchEvent)>,
    ) -> Result<BatchSummary, ExtractionError> {
        ocr.verify_available()?;

        let start = Instant::now();
        let run_id = new_run_id();
        let mut summary = BatchSummary::empty(run_id.clone());

        let emit = |event: BatchEvent| {
            if let Some(notify) = on_event {
                notify(event);
            }
        };

        let work = self.work_subset();
        let total = work.len() as u32;

        if work.is_empty() {
            tracing::debug!(run_id = %run_id, "no unprocessed inputs, nothing to do");
            self.phase = BatchPhase::Completed;
            emit(BatchEvent::Completed {
                rows_added: 0,
                duration_ms: 0,
            });
            return Ok(summary);
        }

        tracing::info!(run_id = %run_id, total, "batch run starting");
        self.phase = BatchPhase::Running;
        emit(BatchEvent::Started {
            run_id: run_id.clone(),
            total,
        });

        let mut completed = 0u32;
        for image_id in work {
            if controls.is_paused() {
                self.phase = BatchPhase::Paused;
                tracing::info!(run_id = %run_id, "batch paused");
                if !controls.wait_if_paused() {
                    self.phase = BatchPhase::Running;
                    tracing::info!(run_id = %run_id, "batch resumed");
                }
            }
            if controls.is_cancelled() {
                self.phase = BatchPhase::Cancelled;
                summary.cancelled = true;
                summary.duration_ms = start.elapsed().as_millis() as u64;
                tracing::info!(run_id = %run_id, completed, total, "batch cancelled");
                emit(BatchEvent::Cancelled { completed, total });
                return Ok(summary);
            }

            match self.process_one(ocr, &image_id) {
                Ok(coordinates) if !coordinates.is_empty() => {
                    for coordinate in coordinates {
                        let row = BatchResultRow {
                            serial: self.rows.len() as u32 + 1,
                            image_id: image_id.clone(),
                            latitude: coordinate.latitude,
                            longitude: coordinate.longitude,
                        };
                        self.rows.push(row.clone());
                        summary.rows_added += 1;
                        emit(BatchEvent::RowAdded { row });
                    }
                }
                Ok(_) => {
                    tracing::debug!(image_id = %image_id, "no coordinates found");
                    emit(BatchEvent::NoCoordinates {
                        image_id: image_id.clone(),
                    });
                }
                Err(e) => {
                    let message = clipped_diagnostic(&e.to_string());
                    tracing::warn!(image_id = %image_id, error = %e, "input failed, continuing");
                    summary.images_failed += 1;
                    summary.errors.push(format!("{image_id}: {message}"));
                    emit(BatchEvent::InputError {
                        image_id: image_id.clone(),
                        message,
                    });
                }
            }

            self.processed.insert(image_id.clone());
            completed += 1;
            summary.images_processed += 1;
            emit(BatchEvent::Progress {
                completed,
                total,
                current_image: image_id,
            });
        }

        self.phase = BatchPhase::Completed;
        summary.duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            run_id = %run_id,
            rows_added = summary.rows_added,
            duration_ms = summary.duration_ms,
            "batch run completed"
        );
        emit(BatchEvent::Completed {
            rows_added: summary.rows_added,
            duration_ms: summary.duration_ms,
        });
        Ok(summary)
    }

    fn process_one(
        &self,
        ocr: &dyn OcrSource,
        image_id: &str,
    ) -> Result<Vec<Coordinate>, ExtractionError> {
        let attempts = ocr.recognize(image_id)?;
        Ok(engine::extract_from_attempts(&attempts).coordinates)
    }

    /// Reconciliation phase 1: report exact re-inserted rows.
    pub fn duplicate_report(&self) -> DuplicateReport {
        reconcile::detect_duplicates(&self.rows)
    }

    /// Reconciliation phase 2: remove the reported duplicates and renumber
    /// the survivors 1..N. Call only after the report was confirmed.
    pub fn apply_reconciliation(&mut self) -> ReconcileOutcome {
        reconcile::remove_duplicates(&mut self.rows)
    }
}

fn clipped_diagnostic(message: &str) -> String {
    let clipped = clip_chars(message, DIAGNOSTIC_MAX_CHARS);
    if clipped.len() < message.len() {
        format!("{clipped}...")
    } else {
        clipped.to_string()
    }
}
