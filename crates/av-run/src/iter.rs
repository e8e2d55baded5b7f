//! Pull-based playback of a run.
//!
//! ```text
//! consumer                         worker thread
//! ────────                         ─────────────
//! next() ──recv──┐          ┌──send── Tracer::emit(step k)
//!                └─◀────────┘  (zero-capacity channel: the worker blocks
//!                                until the consumer takes step k)
//! drop   ──cancel + hang up──▶ next emit fails with Cancelled → join
//! ```
//!
//! The worker never runs more than one step ahead of the consumer, so a
//! paused consumer pauses the algorithm.

use std::iter::FusedIterator;
use std::sync::mpsc::{self, Receiver};
use std::thread::{self, JoinHandle};

use av_core::{CancelToken, ObserverError, RunConfig, StepEvent, StepSnapshot, Tracer};

use crate::runner::execute;
use crate::{Algorithm, OwnedStructure, RunError, RunReport, RunResult};

type Outcome = RunResult<(RunReport, OwnedStructure)>;

/// Lazy, finite sequence of the steps of one run, ending with
/// [`StepSnapshot::Done`] when the run completes.
///
/// Not restartable.  Dropping it cancels the run and waits for the worker
/// to exit.
pub struct StepIter {
    steps:  Option<Receiver<StepSnapshot>>,
    worker: Option<JoinHandle<Outcome>>,
    cancel: CancelToken,
}

impl StepIter {
    pub(crate) fn spawn(
        algorithm: Algorithm,
        mut structure: OwnedStructure,
        config: RunConfig,
        cancel: CancelToken,
    ) -> Self {
        let (tx, rx) = mpsc::sync_channel::<StepSnapshot>(0);
        let token = cancel.clone();
        let worker = thread::spawn(move || -> Outcome {
            let mut observer = |event: &StepEvent<'_>| -> Result<(), ObserverError> {
                tx.send(event.to_snapshot()).map_err(|_| "step consumer hung up".into())
            };
            let tracer = Tracer::new(&mut observer, config.speed).with_cancel(token);
            let report = execute(algorithm, structure.as_structure(), &config, tracer)?;
            Ok((report, structure))
        });
        Self { steps: Some(rx), worker: Some(worker), cancel }
    }

    /// A handle that stops the run at its next step.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Skip the remaining steps and wait for the run's outcome, getting the
    /// final structure back.
    pub fn finish(mut self) -> RunResult<(RunReport, OwnedStructure)> {
        if let Some(steps) = self.steps.take() {
            steps.iter().for_each(drop);
        }
        match self.worker.take() {
            Some(worker) => worker.join().map_err(|_| RunError::WorkerPanicked)?,
            None => Err(RunError::WorkerPanicked),
        }
    }
}

impl Iterator for StepIter {
    type Item = StepSnapshot;

    fn next(&mut self) -> Option<StepSnapshot> {
        self.steps.as_ref()?.recv().ok()
    }
}

impl FusedIterator for StepIter {}

impl Drop for StepIter {
    fn drop(&mut self) {
        let Some(worker) = self.worker.take() else { return };
        self.cancel.cancel();
        drop(self.steps.take());
        if worker.join().is_err() {
            tracing::warn!("step worker panicked during shutdown");
        }
    }
}
