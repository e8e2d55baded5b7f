//! Randomized sorts.  None of these has a worst-case bound: they loop until
//! [`order_satisfied`] holds and are only practical on tiny inputs.

use av_core::{Marks, Record};

use crate::util::{first_in_order, order_satisfied, shuffle};
use crate::{SortCtx, SortResult};

/// Shuffle the whole dataset until it happens to be ordered.
pub fn bogo(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let mut rounds = 0u64;
    while !order_satisfied(data, ctx.order()) {
        shuffle(data, ctx)?;
        rounds += 1;
    }
    tracing::trace!(rounds, "bogo settled");
    Ok(())
}

/// Swap two random elements until the dataset is ordered.
pub fn bozo(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let n = data.len();
    while !order_satisfied(data, ctx.order()) {
        let i = ctx.rng().index(n);
        let j = ctx.rng().index(n);
        if i == j {
            ctx.step(data, Marks::at(i))?;
        } else {
            ctx.swap(data, i, j)?;
        }
    }
    Ok(())
}

/// Fix one position at a time: reshuffle the unsorted suffix until its
/// first slot holds the element that belongs there.
pub fn less_bogo(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let n = data.len();
    for i in 0..n.saturating_sub(1) {
        let want = data[first_in_order(data, i, n - 1, ctx.order())].value;
        while data[i].value != want {
            shuffle_suffix(data, i, ctx)?;
        }
        ctx.step(data, Marks::at(i).with_pivot(i))?;
    }
    Ok(())
}

/// Fisher-Yates over `from..`, one step per exchange.
fn shuffle_suffix(data: &mut [Record], from: usize, ctx: &mut SortCtx<'_>) -> SortResult<()> {
    for i in (from + 1..data.len()).rev() {
        let j = ctx.rng().gen_range(from..=i);
        ctx.swap(data, i, j)?;
    }
    Ok(())
}
