//! Sorting networks.
//!
//! Every comparator `(i, j)` with `i < j` leaves the element that belongs
//! first at `i`.  The power-of-two networks are run on an arbitrary `n` by
//! treating the missing tail as elements that belong after everything else:
//! a comparator whose partner is out of range would never move them, so it
//! is skipped.

use av_core::{Marks, Record};

use crate::{SortCtx, SortResult};

/// Comparator helper that tolerates partners beyond the dataset.
#[inline]
fn compare(data: &mut [Record], i: usize, j: usize, ctx: &mut SortCtx<'_>) -> SortResult<()> {
    if j < data.len() {
        ctx.compare_exchange(data, i, j)?;
    }
    Ok(())
}

// ── Bitonic, bottom-up ────────────────────────────────────────────────────────

/// Comparator pairs `(i, i ^ mask)` with `i < i ^ mask < n`, computed once per
/// level and replayed in order.
fn level_table(n: usize, mask: usize) -> Vec<(usize, usize)> {
    (0..n)
        .filter_map(|i| {
            let partner = i ^ mask;
            (partner > i && partner < n).then_some((i, partner))
        })
        .collect()
}

/// Iterative bitonic sort.  Each merge level first compares mirrored pairs
/// across blocks of size `k` (so both halves can stay in the same direction)
/// and then half-cleans with shrinking strides.
pub fn bitonic_bottom_up(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let n = data.len();
    let mut k = 2;
    while k / 2 < n {
        tracing::trace!(block = k, "bitonic level");
        for (i, j) in level_table(n, k - 1) {
            ctx.compare_exchange(data, i, j)?;
        }
        let mut stride = k / 4;
        while stride >= 1 {
            for (i, j) in level_table(n, stride) {
                ctx.compare_exchange(data, i, j)?;
            }
            stride /= 2;
        }
        k *= 2;
    }
    Ok(())
}

// ── Bitonic, top-down ─────────────────────────────────────────────────────────

/// Recursive bitonic sort for any `n`: sort the halves in opposite
/// directions, then merge with the largest power of two below the length.
pub fn bitonic_top_down(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let n = data.len();
    bitonic_sort(data, 0, n, true, ctx)
}

/// `forward` means the run ends up in the requested order, otherwise reversed.
fn bitonic_sort(data: &mut [Record], lo: usize, len: usize, forward: bool, ctx: &mut SortCtx<'_>) -> SortResult<()> {
    if len <= 1 {
        return Ok(());
    }
    let half = len / 2;
    bitonic_sort(data, lo, half, !forward, ctx)?;
    bitonic_sort(data, lo + half, len - half, forward, ctx)?;
    bitonic_merge(data, lo, len, forward, ctx)
}

fn bitonic_merge(data: &mut [Record], lo: usize, len: usize, forward: bool, ctx: &mut SortCtx<'_>) -> SortResult<()> {
    if len <= 1 {
        return Ok(());
    }
    // Largest power of two strictly below `len`.
    let m = 1 << (len - 1).ilog2();
    for i in lo..lo + len - m {
        directed(data, i, i + m, forward, ctx)?;
    }
    bitonic_merge(data, lo, m, forward, ctx)?;
    bitonic_merge(data, lo + m, len - m, forward, ctx)
}

fn directed(data: &mut [Record], i: usize, j: usize, forward: bool, ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let out_of_order = if forward {
        ctx.precedes(data[j], data[i])
    } else {
        ctx.precedes(data[i], data[j])
    };
    if out_of_order {
        ctx.swap(data, i, j)?;
    } else {
        ctx.step(data, Marks::pair(i, j))?;
    }
    Ok(())
}

// ── Odd-even merge ────────────────────────────────────────────────────────────

/// Batcher's odd-even merge sort, iterative formulation.
pub fn odd_even_merge_iterative(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let n = data.len();
    let mut p = 1;
    while p < n {
        let mut k = p;
        while k >= 1 {
            let mut j = k % p;
            while j + k < n {
                for i in 0..k.min(n - j - k) {
                    if (i + j) / (2 * p) == (i + j + k) / (2 * p) {
                        ctx.compare_exchange(data, i + j, i + j + k)?;
                    }
                }
                j += 2 * k;
            }
            k /= 2;
        }
        p *= 2;
    }
    Ok(())
}

/// Batcher's odd-even merge sort, recursive formulation over the next power
/// of two.
pub fn odd_even_merge_recursive(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let size = data.len().next_power_of_two();
    oem_sort(data, 0, size, ctx)
}

fn oem_sort(data: &mut [Record], lo: usize, len: usize, ctx: &mut SortCtx<'_>) -> SortResult<()> {
    if len <= 1 || lo >= data.len() {
        return Ok(());
    }
    let half = len / 2;
    oem_sort(data, lo, half, ctx)?;
    oem_sort(data, lo + half, half, ctx)?;
    oem_merge(data, lo, len, 1, ctx)
}

/// Merge the two sorted halves of `lo..lo + len`, looking at every `r`-th
/// element.
fn oem_merge(data: &mut [Record], lo: usize, len: usize, r: usize, ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let step = r * 2;
    if step < len {
        oem_merge(data, lo, len, step, ctx)?;
        oem_merge(data, lo + r, len, step, ctx)?;
        let mut i = lo + r;
        while i + r < lo + len {
            compare(data, i, i + r, ctx)?;
            i += step;
        }
        Ok(())
    } else {
        compare(data, lo, lo + r, ctx)
    }
}

// ── Pairwise ──────────────────────────────────────────────────────────────────

/// Parberry's pairwise sorting network.
pub fn pairwise(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let n = data.len();

    // Sort pairs, then pairs of pairs, and so on.
    let mut gap = 1;
    while gap < n {
        let (mut b, mut c) = (gap, 0);
        while b < n {
            ctx.compare_exchange(data, b - gap, b)?;
            b += 1;
            c = (c + 1) % gap;
            if c == 0 {
                b += gap;
            }
        }
        gap *= 2;
    }

    // Merge back down.
    gap /= 4;
    let mut e = 1;
    while gap > 0 {
        let mut d = e;
        while d > 0 {
            let (mut b, mut c) = ((d + 1) * gap, 0);
            while b < n {
                ctx.compare_exchange(data, b - d * gap, b)?;
                b += 1;
                c = (c + 1) % gap;
                if c == 0 {
                    b += gap;
                }
            }
            d /= 2;
        }
        gap /= 2;
        e = e * 2 + 1;
    }
    Ok(())
}
