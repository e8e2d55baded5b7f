//! Quicksort family and introsort.
//!
//! Every variant recurses into the smaller partition and loops on the larger
//! one, so stack depth stays logarithmic even on adversarial inputs.  Steps
//! from nested partitions still arrive depth-first.

use av_core::{Marks, Record};

use crate::heap::heap_range;
use crate::util::insertion_range;
use crate::{SortCtx, SortResult};

/// Partitions at or below this size are finished by insertion sort in
/// introsort.
const INTRO_INSERTION_THRESHOLD: usize = 16;

// ── One-way (Lomuto) ──────────────────────────────────────────────────────────

pub fn quick_lomuto(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    lomuto_range(data, 0, data.len() - 1, ctx)
}

fn lomuto_range(data: &mut [Record], mut lo: usize, mut hi: usize, ctx: &mut SortCtx<'_>) -> SortResult<()> {
    while lo < hi {
        let p = lomuto_partition(data, lo, hi, ctx)?;
        if p - lo < hi - p {
            if p > lo {
                lomuto_range(data, lo, p - 1, ctx)?;
            }
            lo = p + 1;
        } else {
            lomuto_range(data, p + 1, hi, ctx)?;
            if p == lo {
                break;
            }
            hi = p - 1;
        }
    }
    Ok(())
}

/// Partition around `data[hi]`; returns the pivot's final index.
fn lomuto_partition(data: &mut [Record], lo: usize, hi: usize, ctx: &mut SortCtx<'_>) -> SortResult<usize> {
    let pivot = data[hi];
    let mut store = lo;
    for j in lo..hi {
        if ctx.precedes(data[j], pivot) {
            ctx.exchange(data, store, j);
            ctx.step(data, Marks::pair(store, j).with_pivot(hi))?;
            store += 1;
        } else {
            ctx.step(data, Marks::pair(store, j).with_pivot(hi))?;
        }
    }
    ctx.swap(data, store, hi)?;
    Ok(store)
}

// ── Two-way (Hoare) ───────────────────────────────────────────────────────────

pub fn quick_hoare(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    hoare_range(data, 0, data.len() - 1, ctx)
}

fn hoare_range(data: &mut [Record], mut lo: usize, mut hi: usize, ctx: &mut SortCtx<'_>) -> SortResult<()> {
    while lo < hi {
        let split = hoare_partition(data, lo, hi, ctx)?;
        // Both halves `lo..=split` and `split+1..=hi` are non-empty.
        if split - lo < hi - split {
            hoare_range(data, lo, split, ctx)?;
            lo = split + 1;
        } else {
            hoare_range(data, split + 1, hi, ctx)?;
            hi = split;
        }
    }
    Ok(())
}

fn hoare_partition(data: &mut [Record], lo: usize, hi: usize, ctx: &mut SortCtx<'_>) -> SortResult<usize> {
    let mid = lo + (hi - lo) / 2;
    let pivot = data[mid].value;
    let order = ctx.order();
    let (mut i, mut j) = (lo, hi);
    loop {
        while order.precedes(data[i].value, pivot) {
            i += 1;
        }
        while order.precedes(pivot, data[j].value) {
            j -= 1;
        }
        if i >= j {
            ctx.step(data, Marks::pair(i.min(hi), j).with_pivot(mid))?;
            return Ok(j);
        }
        ctx.exchange(data, i, j);
        ctx.step(data, Marks::pair(i, j).with_pivot(mid))?;
        i += 1;
        j -= 1;
    }
}

// ── Three-way (Dijkstra) ──────────────────────────────────────────────────────

pub fn quick_three_way(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    three_way_range(data, 0, data.len() - 1, ctx)
}

fn three_way_range(data: &mut [Record], mut lo: usize, mut hi: usize, ctx: &mut SortCtx<'_>) -> SortResult<()> {
    while lo < hi {
        // Random pivot, parked at `lo`.
        let p = ctx.rng().gen_range(lo..=hi);
        ctx.swap(data, lo, p)?;
        let pivot = data[lo];

        let (mut lt, mut gt, mut i) = (lo, hi, lo);
        while i <= gt {
            if ctx.precedes(data[i], pivot) {
                ctx.swap(data, lt, i)?;
                lt += 1;
                i += 1;
            } else if ctx.precedes(pivot, data[i]) {
                ctx.swap(data, i, gt)?;
                gt -= 1;
            } else {
                ctx.step(data, Marks::pair(i, gt).with_pivot(lt))?;
                i += 1;
            }
        }

        // `lo..lt` precedes the pivot, `gt+1..=hi` follows it.
        let left_len = lt - lo;
        let right_len = hi - gt;
        if left_len < right_len {
            if left_len > 1 {
                three_way_range(data, lo, lt - 1, ctx)?;
            }
            lo = gt + 1;
        } else {
            if right_len > 1 {
                three_way_range(data, gt + 1, hi, ctx)?;
            }
            if lt == lo {
                break;
            }
            hi = lt - 1;
        }
    }
    Ok(())
}

// ── Dual pivot (Yaroslavskiy) ─────────────────────────────────────────────────

pub fn quick_dual_pivot(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    dual_pivot_range(data, 0, data.len() - 1, ctx)
}

fn dual_pivot_range(data: &mut [Record], lo: usize, hi: usize, ctx: &mut SortCtx<'_>) -> SortResult<()> {
    if lo >= hi {
        return Ok(());
    }
    if ctx.precedes(data[hi], data[lo]) {
        ctx.swap(data, lo, hi)?;
    }
    let (p, q) = (data[lo], data[hi]);

    let (mut l, mut g, mut k) = (lo + 1, hi - 1, lo + 1);
    while k <= g {
        if ctx.precedes(data[k], p) {
            ctx.swap(data, k, l)?;
            l += 1;
        } else if !ctx.precedes(data[k], q) {
            while ctx.precedes(q, data[g]) && k < g {
                ctx.step(data, Marks::pair(k, g).with_pivot(hi))?;
                g -= 1;
            }
            ctx.swap(data, k, g)?;
            g -= 1;
            if ctx.precedes(data[k], p) {
                ctx.swap(data, k, l)?;
                l += 1;
            }
        } else {
            ctx.step(data, Marks::pair(k, l).with_pivot(lo))?;
        }
        k += 1;
    }
    l -= 1;
    g += 1;
    ctx.swap(data, lo, l)?;
    ctx.swap(data, hi, g)?;

    if l > lo {
        dual_pivot_range(data, lo, l - 1, ctx)?;
    }
    if g >= l + 2 {
        dual_pivot_range(data, l + 1, g - 1, ctx)?;
    }
    if hi > g {
        dual_pivot_range(data, g + 1, hi, ctx)?;
    }
    Ok(())
}

// ── Introsort ─────────────────────────────────────────────────────────────────

/// Quicksort with a recursion budget of `2 * floor(log2 n)`; ranges that
/// exhaust it are heap sorted, tiny ranges are insertion sorted.
pub fn intro(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let n = data.len();
    let budget = 2 * n.ilog2();
    intro_range(data, 0, n - 1, budget, ctx)
}

fn intro_range(data: &mut [Record], lo: usize, hi: usize, budget: u32, ctx: &mut SortCtx<'_>) -> SortResult<()> {
    if lo >= hi {
        return Ok(());
    }
    if hi - lo + 1 <= INTRO_INSERTION_THRESHOLD {
        return insertion_range(data, lo, hi, ctx);
    }
    if budget == 0 {
        tracing::trace!(lo, hi, "introsort depth budget exhausted, heap sorting");
        return heap_range(data, lo, hi, ctx);
    }

    // Median of three moved to `hi` before the Lomuto partition.
    let mid = lo + (hi - lo) / 2;
    if ctx.precedes(data[mid], data[lo]) {
        ctx.swap(data, lo, mid)?;
    }
    if ctx.precedes(data[hi], data[lo]) {
        ctx.swap(data, lo, hi)?;
    }
    if ctx.precedes(data[mid], data[hi]) {
        ctx.swap(data, mid, hi)?;
    }
    let p = lomuto_partition(data, lo, hi, ctx)?;

    if p > lo {
        intro_range(data, lo, p - 1, budget - 1, ctx)?;
    }
    intro_range(data, p + 1, hi, budget - 1, ctx)
}
