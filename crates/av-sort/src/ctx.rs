//! `SortCtx`: per-run state threaded through every sort.
//!
//! Algorithms receive the dataset and the context as separate borrows:
//!
//! ```ignore
//! pub fn bubble(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()>
//! ```
//!
//! All mutation of the dataset that should be visible goes through the
//! context (`swap`, `write`, `compare_exchange`), which keeps the counters
//! and the step stream in lockstep with the actual work.

use av_core::{Counters, Marks, Order, Record, SortFrame, StepEvent, StepResult, StepRng, Tracer};

pub struct SortCtx<'o> {
    order:    Order,
    counters: Counters,
    rng:      StepRng,
    tracer:   Tracer<'o>,
}

impl<'o> SortCtx<'o> {
    /// Fresh context; counters start at zero.
    pub fn new(tracer: Tracer<'o>, order: Order, rng: StepRng) -> Self {
        Self {
            order,
            counters: Counters::default(),
            rng,
            tracer,
        }
    }

    #[inline]
    pub fn order(&self) -> Order {
        self.order
    }

    #[inline]
    pub fn counters(&self) -> Counters {
        self.counters
    }

    #[inline]
    pub fn rng(&mut self) -> &mut StepRng {
        &mut self.rng
    }

    /// Steps emitted so far.
    #[inline]
    pub fn steps(&self) -> u64 {
        self.tracer.emitted()
    }

    // ── Comparisons ───────────────────────────────────────────────────────

    /// `true` if `a` must come strictly before `b` in the requested order.
    #[inline(always)]
    pub fn precedes(&self, a: Record, b: Record) -> bool {
        self.order.precedes(a.value, b.value)
    }

    /// `true` if `a` may come before `b` (ties are in order).
    #[inline(always)]
    pub fn in_order(&self, a: Record, b: Record) -> bool {
        self.order.in_order(a.value, b.value)
    }

    // ── Instrumented operations ───────────────────────────────────────────

    /// Report the current dataset with `marks` highlighted.
    pub fn step(&mut self, data: &[Record], marks: Marks) -> StepResult<()> {
        self.tracer.emit(&StepEvent::Sort(SortFrame {
            records: data,
            marks,
            counters: self.counters,
        }))
    }

    /// Exchange two elements and report it.
    pub fn swap(&mut self, data: &mut [Record], i: usize, j: usize) -> StepResult<()> {
        self.exchange(data, i, j);
        self.step(data, Marks::pair(i, j))
    }

    /// Exchange two elements without reporting; callers batch several
    /// exchanges into one step.
    #[inline]
    pub fn exchange(&mut self, data: &mut [Record], i: usize, j: usize) {
        if i != j {
            data.swap(i, j);
            self.counters.swaps += 1;
        }
    }

    /// Put `i` and `j` (with `i < j`) in order, reporting the comparison
    /// either way.  Returns `true` if they were exchanged.
    pub fn compare_exchange(&mut self, data: &mut [Record], i: usize, j: usize) -> StepResult<bool> {
        if self.precedes(data[j], data[i]) {
            self.swap(data, i, j)?;
            Ok(true)
        } else {
            self.step(data, Marks::pair(i, j))?;
            Ok(false)
        }
    }

    /// Write `record` into slot `i` from a scratch buffer.
    pub fn write(&mut self, data: &mut [Record], i: usize, record: Record) -> StepResult<()> {
        data[i] = record;
        self.counters.aux += 1;
        self.step(data, Marks::at(i))
    }

    /// Copy slot `i` out into a scratch buffer.
    pub fn read(&mut self, data: &[Record], i: usize) -> StepResult<Record> {
        self.counters.aux += 1;
        self.step(data, Marks::at(i))?;
        Ok(data[i])
    }

    /// Count one scratch-buffer operation that has no dataset position
    /// (e.g. moving between piles), reporting `marks`.
    pub fn aux_step(&mut self, data: &[Record], marks: Marks) -> StepResult<()> {
        self.counters.aux += 1;
        self.step(data, marks)
    }

    /// Emit the terminal `Done` event and return the final counters.
    pub fn finish(mut self) -> StepResult<(Counters, u64)> {
        self.tracer.finish()?;
        Ok((self.counters, self.tracer.emitted()))
    }
}
