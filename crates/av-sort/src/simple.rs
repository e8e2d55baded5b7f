//! Quadratic comparison sorts: exchange, insertion, and selection families.

use av_core::{Marks, Record};

use crate::util::{binary_insertion_range, first_in_order, insertion_range, last_in_order};
use crate::{SortCtx, SortResult};

/// Bubble sort with early exit once a pass makes no exchange.
pub fn bubble(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let n = data.len();
    for pass in 0..n.saturating_sub(1) {
        let mut swapped = false;
        for j in 0..n - 1 - pass {
            swapped |= ctx.compare_exchange(data, j, j + 1)?;
        }
        if !swapped {
            break;
        }
    }
    Ok(())
}

/// Bidirectional bubble sort.
pub fn cocktail_shaker(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let (mut lo, mut hi) = (0, data.len() - 1);
    while lo < hi {
        let mut swapped = false;
        for j in lo..hi {
            swapped |= ctx.compare_exchange(data, j, j + 1)?;
        }
        if !swapped {
            break;
        }
        hi -= 1;

        swapped = false;
        for j in (lo..hi).rev() {
            swapped |= ctx.compare_exchange(data, j, j + 1)?;
        }
        if !swapped {
            break;
        }
        lo += 1;
    }
    Ok(())
}

pub fn insertion(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    insertion_range(data, 0, data.len() - 1, ctx)
}

pub fn binary_insertion(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    binary_insertion_range(data, 0, data.len() - 1, ctx)
}

/// Selection sort; the extreme of each suffix is found with the recursive
/// bounded search.
pub fn selection(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let n = data.len();
    for i in 0..n.saturating_sub(1) {
        let m = first_in_order(data, i, n - 1, ctx.order());
        ctx.step(data, Marks::pair(i, m).with_pivot(i))?;
        if m != i {
            ctx.swap(data, i, m)?;
        }
    }
    Ok(())
}

/// Selection sort that places both the first and the last element of the
/// unsorted middle on every pass.
pub fn double_selection(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let (mut lo, mut hi) = (0, data.len() - 1);
    while lo < hi {
        let first = first_in_order(data, lo, hi, ctx.order());
        let mut last = last_in_order(data, lo, hi, ctx.order());
        ctx.step(data, Marks::pair(first, last).with_pivot(lo))?;
        ctx.swap(data, lo, first)?;
        // The last element may just have been moved out of `lo`.
        if last == lo {
            last = first;
        }
        ctx.swap(data, hi, last)?;
        lo += 1;
        hi -= 1;
    }
    Ok(())
}

/// Shell sort with the halving gap sequence.
pub fn shell(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let n = data.len();
    let mut gap = n / 2;
    while gap > 0 {
        for i in gap..n {
            let mut j = i;
            while j >= gap && ctx.precedes(data[j], data[j - gap]) {
                ctx.swap(data, j - gap, j)?;
                j -= gap;
            }
            if j >= gap {
                ctx.step(data, Marks::pair(j - gap, j).with_pivot(i))?;
            }
        }
        gap /= 2;
    }
    Ok(())
}
