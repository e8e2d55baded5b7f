//! Tim sort (simplified): fixed-length runs sorted by binary insertion, then
//! merged pairwise either bottom-up or by recursive halving over runs.

use av_core::Record;

use crate::util::{binary_insertion_range, merge};
use crate::{SortCtx, SortResult};

const MIN_MERGE: usize = 32;

/// Minimum run length: shift `n` right until it drops below [`MIN_MERGE`],
/// OR-ing in every bit shifted out.
pub fn min_run_length(mut n: usize) -> usize {
    let mut r = 0;
    while n >= MIN_MERGE {
        r |= n & 1;
        n >>= 1;
    }
    n + r
}

fn sort_runs(data: &mut [Record], run: usize, ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let n = data.len();
    let mut start = 0;
    while start < n {
        let end = (start + run - 1).min(n - 1);
        binary_insertion_range(data, start, end, ctx)?;
        start += run;
    }
    Ok(())
}

pub fn tim_bottom_up(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let n = data.len();
    let run = min_run_length(n);
    sort_runs(data, run, ctx)?;

    let mut size = run;
    while size < n {
        let mut left = 0;
        while left + size < n {
            let mid = left + size - 1;
            let right = (left + 2 * size - 1).min(n - 1);
            merge(data, left, mid, right, ctx)?;
            left += 2 * size;
        }
        size *= 2;
    }
    Ok(())
}

pub fn tim_top_down(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let n = data.len();
    let run = min_run_length(n);
    sort_runs(data, run, ctx)?;
    let runs = n.div_ceil(run);
    merge_runs(data, run, 0, runs - 1, ctx)
}

/// Merge runs `first..=last` (run indices) recursively.
fn merge_runs(data: &mut [Record], run: usize, first: usize, last: usize, ctx: &mut SortCtx<'_>) -> SortResult<()> {
    if first >= last {
        return Ok(());
    }
    let n = data.len();
    let mid = first + (last - first) / 2;
    merge_runs(data, run, first, mid, ctx)?;
    merge_runs(data, run, mid + 1, last, ctx)?;
    let lo = first * run;
    let split = ((mid + 1) * run - 1).min(n - 1);
    let hi = ((last + 1) * run - 1).min(n - 1);
    merge(data, lo, split, hi, ctx)
}
