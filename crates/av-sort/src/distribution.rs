//! Distribution sorts: bucket, counting, pigeonhole, flash.

use av_core::{Marks, Order, Record};

use crate::util::insertion_range;
use crate::{SortCtx, SortError, SortResult};

/// Counting and pigeonhole sorts allocate one slot per distinct value in
/// `min..=max`; wider ranges are rejected.
pub const MAX_VALUE_SPAN: u64 = 1 << 24;

fn value_range(data: &[Record]) -> (u32, u32) {
    data.iter().fold((u32::MAX, u32::MIN), |(lo, hi), r| (lo.min(r.value), hi.max(r.value)))
}

fn checked_span(data: &[Record], algorithm: &str) -> SortResult<(u32, usize)> {
    let (min, max) = value_range(data);
    let span = max as u64 - min as u64 + 1;
    if span > MAX_VALUE_SPAN {
        return Err(SortError::InvalidInput(format!(
            "{algorithm} needs a value span of at most {MAX_VALUE_SPAN}, got {span}"
        )));
    }
    Ok((min, span as usize))
}

/// Slot for offset `v` in a table of `len` slots, honouring the order.
#[inline]
fn slot(v: usize, len: usize, order: Order) -> usize {
    match order {
        Order::Ascent  => v,
        Order::Descent => len - 1 - v,
    }
}

// ── Bucket sort ───────────────────────────────────────────────────────────────

/// Scatter into `ceil(sqrt(n))` value-range buckets, gather, then insertion
/// sort every bucket in place.
pub fn bucket(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let n = data.len();
    let order = ctx.order();
    let (min, max) = value_range(data);
    let count = (n as f64).sqrt().ceil().max(1.0) as usize;
    let span = max as u64 - min as u64 + 1;

    let mut buckets: Vec<Vec<Record>> = vec![Vec::new(); count];
    for i in 0..n {
        let record = ctx.read(data, i)?;
        let b = ((record.value - min) as u64 * count as u64 / span) as usize;
        buckets[slot(b, count, order)].push(record);
    }

    let mut ranges = Vec::with_capacity(count);
    let mut k = 0;
    for bucket in buckets {
        let start = k;
        for record in bucket {
            ctx.write(data, k, record)?;
            k += 1;
        }
        if k > start + 1 {
            ranges.push((start, k - 1));
        }
    }
    for (lo, hi) in ranges {
        insertion_range(data, lo, hi, ctx)?;
    }
    Ok(())
}

// ── Counting sort ─────────────────────────────────────────────────────────────

/// Stable counting sort: histogram, prefix sums, placement from the back.
pub fn counting(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let n = data.len();
    let order = ctx.order();
    let (min, span) = checked_span(data, "counting sort")?;

    let mut counts = vec![0usize; span];
    for i in 0..n {
        let v = (data[i].value - min) as usize;
        counts[slot(v, span, order)] += 1;
        ctx.aux_step(data, Marks::at(i))?;
    }
    for s in 1..span {
        counts[s] += counts[s - 1];
    }

    let mut output = vec![Record::default(); n];
    for i in (0..n).rev() {
        let record = ctx.read(data, i)?;
        let s = slot((record.value - min) as usize, span, order);
        counts[s] -= 1;
        output[counts[s]] = record;
    }
    for (k, record) in output.into_iter().enumerate() {
        ctx.write(data, k, record)?;
    }
    Ok(())
}

// ── Pigeonhole sort ───────────────────────────────────────────────────────────

/// One hole per value in `min..=max`; records are dropped into their hole
/// and collected hole by hole.
pub fn pigeonhole(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let order = ctx.order();
    let (min, span) = checked_span(data, "pigeonhole sort")?;

    let mut holes: Vec<Vec<Record>> = vec![Vec::new(); span];
    for i in 0..data.len() {
        let record = ctx.read(data, i)?;
        holes[slot((record.value - min) as usize, span, order)].push(record);
    }
    let mut k = 0;
    for hole in holes {
        for record in hole {
            ctx.write(data, k, record)?;
            k += 1;
        }
    }
    Ok(())
}

// ── Flash sort ────────────────────────────────────────────────────────────────

/// Flash sort with `n` classes.
///
/// ① classify every record by `(n - 1) * (v - min) / (max - min)`;
/// ② permute records into their class regions by cycle leading (records
///    are exchanged, so the dataset stays a permutation at every step);
/// ③ insertion sort inside each class with more than one record.
pub fn flash(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let n = data.len();
    let order = ctx.order();
    let (min, max) = value_range(data);
    if min == max {
        ctx.step(data, Marks::NONE)?;
        return Ok(());
    }
    let classes = n;
    let class_of = |v: u32| -> usize {
        let c = ((classes - 1) as u64 * (v - min) as u64 / (max - min) as u64) as usize;
        slot(c, classes, order)
    };

    let mut counts = vec![0usize; classes];
    for i in 0..n {
        counts[class_of(data[i].value)] += 1;
        ctx.aux_step(data, Marks::at(i))?;
    }
    let mut start = vec![0usize; classes];
    for c in 1..classes {
        start[c] = start[c - 1] + counts[c - 1];
    }
    let limit: Vec<usize> = (0..classes).map(|c| start[c] + counts[c]).collect();

    // `next[c]` is the first slot of class `c` not yet known to hold a member.
    let mut next = start.clone();
    for c in 0..classes {
        while next[c] < limit[c] {
            let i = next[c];
            let home = class_of(data[i].value);
            if home == c {
                next[c] += 1;
                continue;
            }
            // Send the misplaced record home; whatever it displaces lands at
            // `i` and is examined on the next iteration.
            let j = next[home];
            next[home] += 1;
            ctx.swap(data, i, j)?;
        }
    }

    for c in 0..classes {
        if counts[c] > 1 {
            insertion_range(data, start[c], limit[c] - 1, ctx)?;
        }
    }
    Ok(())
}
