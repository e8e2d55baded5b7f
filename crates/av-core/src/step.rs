//! Step events, the observer contract, and the [`Tracer`] that drives it.
//!
//! # Protocol
//!
//! ```text
//! algorithm ──op──▶ Tracer::emit(event)
//!                     ① cancelled?         → Err(StepError::Cancelled)
//!                     ② observer.on_step() → Err(StepError::Observer) on failure
//!                     ③ sleep(speed.delay())
//! algorithm ──end─▶ Tracer::finish()  → observer sees StepEvent::Done
//! ```
//!
//! Events borrow the structure being mutated, so observing a step costs
//! nothing unless the observer chooses to copy it
//! ([`StepEvent::to_snapshot`]).

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::{Grid, ObserverError, PathGrid, Pos, Record, Speed, StepError, StepResult};

// ── Frames ────────────────────────────────────────────────────────────────────

/// Highlighted dataset indices for one sort step.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Marks {
    pub pivot:   Option<usize>,
    pub current: Option<usize>,
    pub next:    Option<usize>,
}

impl Marks {
    pub const NONE: Marks = Marks { pivot: None, current: None, next: None };

    #[inline]
    pub fn at(current: usize) -> Self {
        Marks { current: Some(current), ..Marks::NONE }
    }

    #[inline]
    pub fn pair(current: usize, next: usize) -> Self {
        Marks { current: Some(current), next: Some(next), pivot: None }
    }

    #[inline]
    pub fn with_pivot(mut self, pivot: usize) -> Self {
        self.pivot = Some(pivot);
        self
    }
}

/// Running operation counters of a sort.  Both start at 0 for each run and
/// never decrease.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Counters {
    /// Element exchanges.
    pub swaps: u64,
    /// Reads and writes through scratch buffers.
    pub aux:   u64,
}

/// One sort step: the dataset after the operation plus highlights.
#[derive(Copy, Clone, Debug)]
pub struct SortFrame<'a> {
    pub records:  &'a [Record],
    pub marks:    Marks,
    pub counters: Counters,
}

/// Highlighted cells for one generation step.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarveMarks {
    pub current:    Option<Pos>,
    pub next:       Option<Pos>,
    /// Start of the pending random walk (Wilson's).
    pub walk_start: Option<Pos>,
    /// Cell where the pending random walk met the maze (Wilson's).
    pub walk_end:   Option<Pos>,
    /// Row being scanned for a fresh start (Hunt-and-Kill).
    pub scan_row:   Option<u32>,
}

impl CarveMarks {
    #[inline]
    pub fn at(current: Pos) -> Self {
        CarveMarks { current: Some(current), ..Default::default() }
    }

    #[inline]
    pub fn pair(current: Pos, next: Pos) -> Self {
        CarveMarks { current: Some(current), next: Some(next), ..Default::default() }
    }
}

/// One generation step.
#[derive(Copy, Clone, Debug)]
pub struct CarveFrame<'a> {
    pub grid:  &'a Grid,
    pub marks: CarveMarks,
}

/// Which half of a solve is running.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchPhase {
    /// Expanding the frontier.
    Explore,
    /// Walking parent links from the goal and marking the path.
    Trace,
}

/// One solving step.
#[derive(Copy, Clone, Debug)]
pub struct SearchFrame<'a> {
    pub grid:    &'a PathGrid,
    pub current: Option<Pos>,
    pub phase:   SearchPhase,
}

/// Payload handed to a [`StepObserver`] after each atomic operation.
#[derive(Copy, Clone, Debug)]
pub enum StepEvent<'a> {
    Sort(SortFrame<'a>),
    Carve(CarveFrame<'a>),
    Search(SearchFrame<'a>),
    /// Terminal event: the run completed.
    Done,
}

impl StepEvent<'_> {
    pub fn is_done(&self) -> bool {
        matches!(self, StepEvent::Done)
    }

    /// Copy the borrowed state into an owned snapshot.
    pub fn to_snapshot(&self) -> StepSnapshot {
        match *self {
            StepEvent::Sort(f) => StepSnapshot::Sort {
                records:  f.records.to_vec(),
                marks:    f.marks,
                counters: f.counters,
            },
            StepEvent::Carve(f) => StepSnapshot::Carve {
                grid:  f.grid.clone(),
                marks: f.marks,
            },
            StepEvent::Search(f) => StepSnapshot::Search {
                grid:    f.grid.clone(),
                current: f.current,
                phase:   f.phase,
            },
            StepEvent::Done => StepSnapshot::Done,
        }
    }
}

/// Owned copy of a [`StepEvent`], for hosts that keep history or receive
/// steps across a thread boundary.
#[derive(Clone, Debug)]
pub enum StepSnapshot {
    Sort {
        records:  Vec<Record>,
        marks:    Marks,
        counters: Counters,
    },
    Carve {
        grid:  Grid,
        marks: CarveMarks,
    },
    Search {
        grid:    PathGrid,
        current: Option<Pos>,
        phase:   SearchPhase,
    },
    Done,
}

impl StepSnapshot {
    pub fn is_done(&self) -> bool {
        matches!(self, StepSnapshot::Done)
    }

    /// Sort counters, if this is a sort step.
    pub fn counters(&self) -> Option<Counters> {
        match self {
            StepSnapshot::Sort { counters, .. } => Some(*counters),
            _ => None,
        }
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

/// Receives every step of a run, synchronously, in the order the algorithm
/// performs its operations.
///
/// Returning `Err` aborts the run; the error reaches the caller as
/// [`StepError::Observer`].
///
/// Any `FnMut(&StepEvent<'_>) -> Result<(), ObserverError>` closure is an
/// observer.
///
/// # Example: count swaps as they happen
///
/// ```rust,ignore
/// let mut last = 0;
/// let mut observer = |event: &StepEvent<'_>| {
///     if let StepEvent::Sort(frame) = event {
///         last = frame.counters.swaps;
///     }
///     Ok(())
/// };
/// ```
pub trait StepObserver {
    fn on_step(&mut self, event: &StepEvent<'_>) -> Result<(), ObserverError>;
}

impl<F> StepObserver for F
where
    F: FnMut(&StepEvent<'_>) -> Result<(), ObserverError>,
{
    fn on_step(&mut self, event: &StepEvent<'_>) -> Result<(), ObserverError> {
        self(event)
    }
}

/// A [`StepObserver`] that does nothing.  Use when you only want the final
/// structure.
pub struct NoopObserver;

impl StepObserver for NoopObserver {
    fn on_step(&mut self, _event: &StepEvent<'_>) -> Result<(), ObserverError> {
        Ok(())
    }
}

/// A [`StepObserver`] that keeps an owned snapshot of every step.
///
/// Memory grows with the run; intended for tests and short replays.
#[derive(Default)]
pub struct Recorder {
    pub steps: Vec<StepSnapshot>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// `true` if the last recorded step is the terminal `Done`.
    pub fn finished(&self) -> bool {
        self.steps.last().is_some_and(StepSnapshot::is_done)
    }

    /// Counters of every sort step, in order.
    pub fn counters(&self) -> Vec<Counters> {
        self.steps.iter().filter_map(StepSnapshot::counters).collect()
    }
}

impl StepObserver for Recorder {
    fn on_step(&mut self, event: &StepEvent<'_>) -> Result<(), ObserverError> {
        self.steps.push(event.to_snapshot());
        Ok(())
    }
}

// ── CancelToken ───────────────────────────────────────────────────────────────

/// Cooperative cancellation flag, checked before every step.
///
/// Clones share the flag: keep one, hand the other to the run.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

// ── Tracer ────────────────────────────────────────────────────────────────────

/// Couples an observer with pacing and cancellation for one run.
///
/// Algorithms never talk to the observer directly; they call
/// [`emit`][Self::emit] after each operation and propagate its result.
pub struct Tracer<'o> {
    observer: &'o mut dyn StepObserver,
    delay:    Duration,
    cancel:   CancelToken,
    emitted:  u64,
}

impl<'o> Tracer<'o> {
    pub fn new(observer: &'o mut dyn StepObserver, speed: Speed) -> Self {
        Self {
            observer,
            delay:   speed.delay(),
            cancel:  CancelToken::new(),
            emitted: 0,
        }
    }

    /// Share `token` with the caller so it can stop the run between steps.
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Steps delivered so far (excluding `Done`).
    #[inline]
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Deliver one step, then pause for the configured delay.
    pub fn emit(&mut self, event: &StepEvent<'_>) -> StepResult<()> {
        if self.cancel.is_cancelled() {
            return Err(self.cancelled());
        }
        if let Err(e) = self.observer.on_step(event) {
            // A consumer that hangs up after cancelling reports through the
            // observer; surface that as cancellation.
            if self.cancel.is_cancelled() {
                return Err(self.cancelled());
            }
            return Err(StepError::Observer(e));
        }
        self.emitted += 1;
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        Ok(())
    }

    /// Deliver the terminal [`StepEvent::Done`].
    pub fn finish(&mut self) -> StepResult<()> {
        if self.cancel.is_cancelled() {
            return Err(self.cancelled());
        }
        self.observer.on_step(&StepEvent::Done).map_err(StepError::Observer)
    }

    fn cancelled(&self) -> StepError {
        tracing::debug!(after_steps = self.emitted, "run cancelled");
        StepError::Cancelled { after_steps: self.emitted }
    }
}
