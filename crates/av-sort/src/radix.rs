//! Radix sorts.
//!
//! Digit scratch state lives in a vector owned by the pass, parallel to the
//! dataset, never on the records themselves.

use av_core::{Marks, Order, Record};

use crate::util::{digit_at, digits_of, insertion_range};
use crate::{SortCtx, SortError, SortResult};

/// Partitions at or below this size are finished by insertion sort in MSD.
const MSD_INSERTION_THRESHOLD: usize = 16;

pub const DEFAULT_BASE: u32 = 10;

fn check_base(base: u32) -> SortResult<()> {
    if base < 2 {
        return Err(SortError::InvalidInput(format!("radix base must be at least 2, got {base}")));
    }
    Ok(())
}

/// Bucket index of `digit` so that ascending bucket order yields `order`.
#[inline]
fn bucket_of(digit: u32, base: u32, order: Order) -> usize {
    match order {
        Order::Ascent  => digit as usize,
        Order::Descent => (base - 1 - digit) as usize,
    }
}

// ── LSD ───────────────────────────────────────────────────────────────────────

/// Least-significant-digit radix sort in base 10.
pub fn radix_lsd(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    radix_lsd_base(data, DEFAULT_BASE, ctx)
}

/// LSD radix sort: one stable bucket pass per digit of the largest value.
pub fn radix_lsd_base(data: &mut [Record], base: u32, ctx: &mut SortCtx<'_>) -> SortResult<()> {
    check_base(base)?;
    let order = ctx.order();
    let max = data.iter().map(|r| r.value).max().unwrap_or(0);
    let passes = digits_of(max, base);
    let mut digits = vec![0u32; data.len()];

    for pass in 0..passes {
        tracing::trace!(pass, passes, base, "radix LSD pass");
        for (i, d) in digits.iter_mut().enumerate() {
            *d = digit_at(data[i].value, pass, base);
        }
        ctx.step(data, Marks::NONE)?;

        let mut buckets: Vec<Vec<Record>> = vec![Vec::new(); base as usize];
        for i in 0..data.len() {
            let record = ctx.read(data, i)?;
            buckets[bucket_of(digits[i], base, order)].push(record);
        }
        let mut k = 0;
        for bucket in buckets {
            for record in bucket {
                ctx.write(data, k, record)?;
                k += 1;
            }
        }
    }
    Ok(())
}

// ── MSD ───────────────────────────────────────────────────────────────────────

/// Most-significant-digit radix sort in base 10.
pub fn radix_msd(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    radix_msd_base(data, DEFAULT_BASE, ctx)
}

/// MSD radix sort: partition by leading digit, recurse into each bucket.
pub fn radix_msd_base(data: &mut [Record], base: u32, ctx: &mut SortCtx<'_>) -> SortResult<()> {
    check_base(base)?;
    let max = data.iter().map(|r| r.value).max().unwrap_or(0);
    let top = digits_of(max, base) - 1;
    msd_range(data, 0, data.len() - 1, top, base, ctx)
}

fn msd_range(
    data:  &mut [Record],
    lo:    usize,
    hi:    usize,
    digit: u32,
    base:  u32,
    ctx:   &mut SortCtx<'_>,
) -> SortResult<()> {
    if lo >= hi {
        return Ok(());
    }
    // Records in this partition share every digit above `digit`, so comparing
    // whole values is a digit-aware comparison from `digit` down.
    if hi - lo + 1 <= MSD_INSERTION_THRESHOLD {
        return insertion_range(data, lo, hi, ctx);
    }

    let order = ctx.order();
    let mut buckets: Vec<Vec<Record>> = vec![Vec::new(); base as usize];
    for i in lo..=hi {
        let record = ctx.read(data, i)?;
        buckets[bucket_of(digit_at(record.value, digit, base), base, order)].push(record);
    }

    let mut bounds = Vec::with_capacity(buckets.len());
    let mut k = lo;
    for bucket in buckets {
        let start = k;
        for record in bucket {
            ctx.write(data, k, record)?;
            k += 1;
        }
        if k > start + 1 {
            bounds.push((start, k - 1));
        }
    }

    if digit == 0 {
        return Ok(());
    }
    for (start, end) in bounds {
        msd_range(data, start, end, digit - 1, base, ctx)?;
    }
    Ok(())
}
