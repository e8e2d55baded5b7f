//! Merge sort family.

use av_core::{Marks, Record};

use crate::util::merge;
use crate::{SortCtx, SortResult};

/// Classic recursive two-way merge sort.
pub fn merge_top_down(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    top_down_range(data, 0, data.len() - 1, ctx)
}

fn top_down_range(data: &mut [Record], lo: usize, hi: usize, ctx: &mut SortCtx<'_>) -> SortResult<()> {
    if lo >= hi {
        return Ok(());
    }
    let mid = lo + (hi - lo) / 2;
    top_down_range(data, lo, mid, ctx)?;
    top_down_range(data, mid + 1, hi, ctx)?;
    merge(data, lo, mid, hi, ctx)
}

/// Iterative merge sort over runs of width 1, 2, 4, …
pub fn merge_bottom_up(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let n = data.len();
    let mut width = 1;
    while width < n {
        let mut lo = 0;
        while lo + width < n {
            let mid = lo + width - 1;
            let hi = (lo + 2 * width - 1).min(n - 1);
            merge(data, lo, mid, hi, ctx)?;
            lo += 2 * width;
        }
        width *= 2;
    }
    Ok(())
}

/// Four-way merge sort: split into quarters, sort each, merge all four at
/// once by repeatedly taking the head that belongs first.
pub fn merge_four_way(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    four_way_range(data, 0, data.len() - 1, ctx)
}

fn four_way_range(data: &mut [Record], lo: usize, hi: usize, ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let len = hi + 1 - lo;
    if len < 2 {
        return Ok(());
    }
    if len < 4 {
        return top_down_range(data, lo, hi, ctx);
    }
    let q = len / 4;
    let bounds = [lo, lo + q, lo + 2 * q, lo + 3 * q, hi + 1];
    for w in bounds.windows(2) {
        four_way_range(data, w[0], w[1] - 1, ctx)?;
    }

    let mut runs: Vec<Vec<Record>> = Vec::with_capacity(4);
    for w in bounds.windows(2) {
        let mut run = Vec::with_capacity(w[1] - w[0]);
        for i in w[0]..w[1] {
            run.push(ctx.read(data, i)?);
        }
        runs.push(run);
    }

    let mut heads = [0usize; 4];
    for k in lo..=hi {
        // Leftmost run wins ties, which keeps the merge stable.
        let mut best: Option<usize> = None;
        for r in 0..4 {
            if heads[r] >= runs[r].len() {
                continue;
            }
            best = match best {
                Some(b) if ctx.in_order(runs[b][heads[b]], runs[r][heads[r]]) => Some(b),
                _ => Some(r),
            };
        }
        let Some(r) = best else { break };
        let record = runs[r][heads[r]];
        heads[r] += 1;
        ctx.write(data, k, record)?;
    }
    Ok(())
}

/// In-place merge sort: runs are merged by shifting each out-of-place element
/// of the right run leftwards with adjacent swaps; no scratch buffer.
pub fn merge_in_place(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    in_place_range(data, 0, data.len() - 1, ctx)
}

fn in_place_range(data: &mut [Record], lo: usize, hi: usize, ctx: &mut SortCtx<'_>) -> SortResult<()> {
    if lo >= hi {
        return Ok(());
    }
    let mid = lo + (hi - lo) / 2;
    in_place_range(data, lo, mid, ctx)?;
    in_place_range(data, mid + 1, hi, ctx)?;
    merge_rotating(data, lo, mid, hi, ctx)
}

fn merge_rotating(data: &mut [Record], lo: usize, mid: usize, hi: usize, ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let (mut left, mut mid, mut right) = (lo, mid, mid + 1);
    if ctx.in_order(data[mid], data[right]) {
        ctx.step(data, Marks::pair(mid, right))?;
        return Ok(());
    }
    while left <= mid && right <= hi {
        if ctx.in_order(data[left], data[right]) {
            ctx.step(data, Marks::pair(left, right))?;
            left += 1;
        } else {
            for k in (left..right).rev() {
                ctx.swap(data, k, k + 1)?;
            }
            left += 1;
            mid += 1;
            right += 1;
        }
    }
    Ok(())
}
