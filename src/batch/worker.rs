//! Background driver for batch runs.
//!
//! One dedicated thread owns the controller for the duration of the run and
//! forwards every event into an ordering-preserving channel; the consumer
//! side never touches the worker's state directly. The handle carries the
//! cooperative controls. Dropping it cancels the run and joins the thread.

use std::sync::mpsc::Sender;
use std::sync::Arc;
use std::thread::JoinHandle;

use crate::error::ExtractionError;
use crate::ocr::OcrSource;

use super::control::BatchControls;
use super::controller::BatchController;
use super::types::{BatchEvent, BatchSummary};

pub struct BatchWorker {
    controls: Arc<BatchControls>,
    handle: Option<JoinHandle<(BatchController, Result<BatchSummary, ExtractionError>)>>,
}

impl BatchWorker {
    /// Spawn the run on a background thread with fresh controls.
    pub fn spawn(
        controller: BatchController,
        ocr: Arc<dyn OcrSource>,
        events: Sender<BatchEvent>,
    ) -> Self {
        Self::spawn_with_controls(controller, ocr, events, Arc::new(BatchControls::new()))
    }

    /// Spawn with caller-provided controls, e.g. to start paused.
    pub fn spawn_with_controls(
        mut controller: BatchController,
        ocr: Arc<dyn OcrSource>,
        events: Sender<BatchEvent>,
        controls: Arc<BatchControls>,
    ) -> Self {
        let run_controls = controls.clone();
        let handle = std::thread::spawn(move || {
            tracing::info!("batch worker started");
            let forward = move |event: BatchEvent| {
                // A disconnected consumer is not an error: delivery is
                // advisory, and the state comes back through join().
                let _ = events.send(event);
            };
            let result = controller.run(ocr.as_ref(), &run_controls, Some(&forward));
            tracing::info!("batch worker finished");
            (controller, result)
        });
        Self {
            controls,
            handle: Some(handle),
        }
    }

    pub fn controls(&self) -> &BatchControls {
        &self.controls
    }

    pub fn pause(&self) {
        self.controls.pause();
    }

    pub fn resume(&self) {
        self.controls.resume();
    }

    pub fn cancel(&self) {
        self.controls.cancel();
    }

    /// Wait for the run to finish and take the controller back along with
    /// the run summary.
    pub fn join(mut self) -> Result<(BatchController, BatchSummary), ExtractionError> {
        let handle = self.handle.take().ok_or(ExtractionError::WorkerPanicked)?;
        let (controller, result) = handle
            .join()
            .map_err(|_| ExtractionError::WorkerPanicked)?;
        let summary = result?;
        Ok((controller, summary))
    }
}

impl Drop for BatchWorker {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.controls.cancel();
            let _ = handle.join();
        }
    }
}
