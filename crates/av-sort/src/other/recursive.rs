//! Deliberately inefficient recursive sorts.

use av_core::Record;

use crate::{SortCtx, SortResult};

/// Slowsort ("multiply and surrender"): sort both halves, move the larger
/// of their last elements to the end, then slowsort everything but the end.
pub fn slow(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    slow_range(data, 0, data.len() - 1, ctx)
}

fn slow_range(data: &mut [Record], lo: usize, hi: usize, ctx: &mut SortCtx<'_>) -> SortResult<()> {
    if lo >= hi {
        return Ok(());
    }
    let mid = lo + (hi - lo) / 2;
    slow_range(data, lo, mid, ctx)?;
    slow_range(data, mid + 1, hi, ctx)?;
    ctx.compare_exchange(data, mid, hi)?;
    slow_range(data, lo, hi - 1, ctx)
}

/// Stooge sort: order the ends, then sort the first two thirds, the last
/// two thirds and the first two thirds again.
pub fn stooge(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    stooge_range(data, 0, data.len() - 1, ctx)
}

fn stooge_range(data: &mut [Record], lo: usize, hi: usize, ctx: &mut SortCtx<'_>) -> SortResult<()> {
    ctx.compare_exchange(data, lo, hi)?;
    let len = hi - lo + 1;
    if len > 2 {
        let third = len / 3;
        stooge_range(data, lo, hi - third, ctx)?;
        stooge_range(data, lo + third, hi, ctx)?;
        stooge_range(data, lo, hi - third, ctx)?;
    }
    Ok(())
}
