//! Exchange-based curiosities: gnome, comb, odd-even transposition, cycle,
//! pancake and circle sorts.

use av_core::{Marks, Record};

use crate::util::last_in_order;
use crate::{SortCtx, SortResult};

// ── Gnome ─────────────────────────────────────────────────────────────────────

/// Step forward while the pair behind is ordered, otherwise swap and step back.
pub fn gnome(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let n = data.len();
    let mut i = 0;
    while i < n {
        if i == 0 || ctx.in_order(data[i - 1], data[i]) {
            ctx.step(data, Marks::at(i))?;
            i += 1;
        } else {
            ctx.swap(data, i - 1, i)?;
            i -= 1;
        }
    }
    Ok(())
}

/// Gnome sort that remembers where it turned back and jumps there once the
/// displaced element has settled.
pub fn gnome_optimized(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let n = data.len();
    let (mut i, mut resume) = (1, 0);
    while i < n {
        if ctx.precedes(data[i], data[i - 1]) {
            ctx.swap(data, i - 1, i)?;
            if i > 1 {
                if resume == 0 {
                    resume = i;
                }
                i -= 1;
                continue;
            }
        } else {
            ctx.step(data, Marks::pair(i - 1, i))?;
        }
        if resume != 0 {
            i = resume;
            resume = 0;
        }
        i += 1;
    }
    Ok(())
}

// ── Comb ──────────────────────────────────────────────────────────────────────

const COMB_SHRINK_NUM: usize = 10;
const COMB_SHRINK_DEN: usize = 13;

/// Bubble sort over a gap that shrinks by 1.3 each pass; finishes with plain
/// bubble passes at gap 1 until nothing moves.
pub fn comb(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let n = data.len();
    let mut gap = n;
    let mut sorted = false;
    while !sorted {
        gap = (gap * COMB_SHRINK_NUM / COMB_SHRINK_DEN).max(1);
        sorted = gap == 1;
        for i in 0..n.saturating_sub(gap) {
            if ctx.compare_exchange(data, i, i + gap)? {
                sorted = false;
            }
        }
    }
    Ok(())
}

// ── Odd-even transposition ────────────────────────────────────────────────────

/// Alternate passes over odd and even adjacent pairs until both are clean.
pub fn odd_even_transposition(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let n = data.len();
    let mut sorted = false;
    while !sorted {
        sorted = true;
        for start in [1, 0] {
            for i in (start..n.saturating_sub(1)).step_by(2) {
                if ctx.compare_exchange(data, i, i + 1)? {
                    sorted = false;
                }
            }
        }
    }
    Ok(())
}

// ── Cycle ─────────────────────────────────────────────────────────────────────

/// Cycle sort: rotate each cycle of the permutation into place, skipping
/// over duplicates of the element being placed.
pub fn cycle(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let n = data.len();
    for start in 0..n.saturating_sub(1) {
        loop {
            let item = data[start];
            let mut pos = start + (start + 1..n).filter(|&i| ctx.precedes(data[i], item)).count();
            ctx.step(data, Marks::pair(start, pos).with_pivot(start))?;
            if pos == start {
                break;
            }
            while data[pos].value == item.value {
                pos += 1;
            }
            ctx.swap(data, start, pos)?;
        }
    }
    Ok(())
}

// ── Pancake ───────────────────────────────────────────────────────────────────

/// Bring the element that belongs last in the unsorted prefix to the front,
/// then flip it to the end of the prefix.
pub fn pancake(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    for size in (2..=data.len()).rev() {
        let top = last_in_order(data, 0, size - 1, ctx.order());
        ctx.step(data, Marks::pair(top, size - 1))?;
        if top == size - 1 {
            continue;
        }
        flip(data, top, ctx)?;
        flip(data, size - 1, ctx)?;
    }
    Ok(())
}

/// Reverse `0..=end`.
fn flip(data: &mut [Record], end: usize, ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let (mut lo, mut hi) = (0, end);
    while lo < hi {
        ctx.swap(data, lo, hi)?;
        lo += 1;
        hi -= 1;
    }
    Ok(())
}

// ── Circle ────────────────────────────────────────────────────────────────────

/// Compare mirrored pairs of each range, recurse into both halves, and
/// repeat whole rounds until a round makes no exchange.
pub fn circle(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let hi = data.len() - 1;
    let mut rounds = 1u32;
    while circle_range(data, 0, hi, ctx)? {
        rounds += 1;
    }
    tracing::trace!(rounds, "circle sort settled");
    Ok(())
}

fn circle_range(data: &mut [Record], lo: usize, hi: usize, ctx: &mut SortCtx<'_>) -> SortResult<bool> {
    if lo >= hi {
        return Ok(false);
    }
    let mut swapped = false;
    let (mut l, mut h) = (lo, hi);
    while l < h {
        swapped |= ctx.compare_exchange(data, l, h)?;
        l += 1;
        h -= 1;
    }
    // Odd-length range: the middle element meets its right neighbour.
    if l == h && h < hi {
        swapped |= ctx.compare_exchange(data, l, h + 1)?;
    }
    let mid = lo + (hi - lo) / 2;
    let left = circle_range(data, lo, mid, ctx)?;
    let right = circle_range(data, mid + 1, hi, ctx)?;
    Ok(swapped || left || right)
}
