//! Library sort (gapped insertion sort).
//!
//! Records are inserted one at a time into a shelf of `2n` slots where `None`
//! marks a gap.  Keeping gaps between records means most insertions shift
//! only a few neighbours.  Whenever the number of inserted records reaches a
//! power of two, the shelf is repacked so every record sits at an odd slot
//! with a gap before it, and the ordered prefix is copied back into the
//! dataset.

use av_core::{Marks, Order, Record};

use crate::{SortCtx, SortResult};

struct Shelf {
    slots: Vec<Option<Record>>,
}

impl Shelf {
    fn new(n: usize) -> Self {
        Self { slots: vec![None; 2 * n] }
    }

    fn records(&self) -> impl Iterator<Item = Record> + '_ {
        self.slots.iter().flatten().copied()
    }

    /// First slot whose record belongs strictly after `value`, skipping
    /// over gaps; equal records stay in front, so insertion is stable.
    fn locate(&self, value: u32, order: Order) -> usize {
        let cap = self.slots.len();
        let (mut lo, mut hi) = (0, cap);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            let Some(m) = (mid..hi).find(|&m| self.slots[m].is_some()) else {
                hi = mid;
                continue;
            };
            match self.slots[m] {
                Some(r) if order.in_order(r.value, value) => lo = m + 1,
                _ => hi = mid,
            }
        }
        lo
    }

    /// Place `record` before slot `at`, shifting the nearest run of records
    /// towards a gap.  Returns the number of records moved.
    fn place(&mut self, record: Record, at: usize) -> usize {
        let cap = self.slots.len();
        if at > 0 && self.slots[at - 1].is_none() {
            self.slots[at - 1] = Some(record);
            return 0;
        }
        if at < cap && self.slots[at].is_none() {
            self.slots[at] = Some(record);
            return 0;
        }
        if let Some(gap) = (at..cap).find(|&e| self.slots[e].is_none()) {
            self.slots[at..=gap].rotate_right(1);
            self.slots[at] = Some(record);
            return gap - at;
        }
        // No gap to the right: shift the run before `at` one slot left.
        let gap = (0..at).rev().find(|&e| self.slots[e].is_none()).unwrap_or(0);
        self.slots[gap..at].rotate_left(1);
        self.slots[at - 1] = Some(record);
        at - 1 - gap
    }

    /// Spread the records out to slots `1, 3, 5, …`.
    fn rebalance(&mut self) -> Vec<Record> {
        let records: Vec<Record> = self.records().collect();
        self.slots.fill(None);
        for (j, &record) in records.iter().enumerate() {
            self.slots[2 * j + 1] = Some(record);
        }
        records
    }
}

pub fn library(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let n = data.len();
    let order = ctx.order();
    let mut shelf = Shelf::new(n);
    let mut next_repack = 1;

    for i in 0..n {
        let record = ctx.read(data, i)?;
        let at = shelf.locate(record.value, order);
        let moved = shelf.place(record, at);
        for _ in 0..moved {
            ctx.aux_step(data, Marks::at(i))?;
        }

        let inserted = i + 1;
        if inserted == next_repack && inserted < n {
            tracing::trace!(inserted, "library shelf repacked");
            let prefix = shelf.rebalance();
            for (k, record) in prefix.into_iter().enumerate() {
                ctx.write(data, k, record)?;
            }
            next_repack *= 2;
        }
    }

    let sorted: Vec<Record> = shelf.records().collect();
    for (k, record) in sorted.into_iter().enumerate() {
        ctx.write(data, k, record)?;
    }
    Ok(())
}
