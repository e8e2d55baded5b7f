//! Heap sort.  The heap is ordered so that its root is the element that
//! belongs *last*; repeatedly moving the root to the end of the range yields
//! the requested order.

use av_core::{Marks, Record};

use crate::{SortCtx, SortResult};

pub fn heap(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    heap_range(data, 0, data.len() - 1, ctx)
}

/// Heap sort of `lhs..=rhs` only; introsort falls back to this.
pub(crate) fn heap_range(data: &mut [Record], lhs: usize, rhs: usize, ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let len = rhs + 1 - lhs;
    for root in (0..len / 2).rev() {
        sift_down(data, lhs, root, len, ctx)?;
    }
    for end in (1..len).rev() {
        ctx.swap(data, lhs, lhs + end)?;
        sift_down(data, lhs, 0, end, ctx)?;
    }
    Ok(())
}

/// Restore the heap property below `root` within the first `len` slots
/// starting at `base`.
fn sift_down(data: &mut [Record], base: usize, mut root: usize, len: usize, ctx: &mut SortCtx<'_>) -> SortResult<()> {
    loop {
        let left = 2 * root + 1;
        if left >= len {
            return Ok(());
        }
        let mut child = left;
        if left + 1 < len && ctx.precedes(data[base + left], data[base + left + 1]) {
            child = left + 1;
        }
        if !ctx.precedes(data[base + root], data[base + child]) {
            ctx.step(data, Marks::pair(base + root, base + child))?;
            return Ok(());
        }
        ctx.swap(data, base + root, base + child)?;
        root = child;
    }
}
