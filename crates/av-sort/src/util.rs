//! Dataset utilities shared by every sort.
//!
//! Pure helpers (`order_satisfied`, `bounded_min`, `binary_search`, digit
//! extraction) do not emit steps; the instrumented ones (`merge`, `shuffle`,
//! `insertion_range`) take the [`SortCtx`] and report every operation.

use av_core::{Marks, Order, Record};

use crate::{SortCtx, SortResult};

/// `true` iff no adjacent pair is inverted for `order`.
pub fn order_satisfied(data: &[Record], order: Order) -> bool {
    data.windows(2).all(|w| order.in_order(w[0].value, w[1].value))
}

/// Index of the smallest key in `lhs..=rhs`, found by recursive halving.
/// The leftmost of equal keys wins.
pub fn bounded_min<K: Ord>(lhs: usize, rhs: usize, key: &impl Fn(usize) -> K) -> usize {
    if lhs >= rhs {
        return lhs;
    }
    let mid = lhs + (rhs - lhs) / 2;
    let left = bounded_min(lhs, mid, key);
    let right = bounded_min(mid + 1, rhs, key);
    if key(right) < key(left) { right } else { left }
}

/// Index of the largest key in `lhs..=rhs`, found by recursive halving.
/// The leftmost of equal keys wins.
pub fn bounded_max<K: Ord>(lhs: usize, rhs: usize, key: &impl Fn(usize) -> K) -> usize {
    if lhs >= rhs {
        return lhs;
    }
    let mid = lhs + (rhs - lhs) / 2;
    let left = bounded_max(lhs, mid, key);
    let right = bounded_max(mid + 1, rhs, key);
    if key(right) > key(left) { right } else { left }
}

/// Index in `lhs..=rhs` of the element that belongs first under `order`.
pub fn first_in_order(data: &[Record], lhs: usize, rhs: usize, order: Order) -> usize {
    let key = |i: usize| data[i].value;
    match order {
        Order::Ascent  => bounded_min(lhs, rhs, &key),
        Order::Descent => bounded_max(lhs, rhs, &key),
    }
}

/// Index in `lhs..=rhs` of the element that belongs last under `order`.
pub fn last_in_order(data: &[Record], lhs: usize, rhs: usize, order: Order) -> usize {
    first_in_order(data, lhs, rhs, order.reversed())
}

/// Insertion index for `target` within the ordered run `lhs..=rhs`.
///
/// On an exact match the matching midpoint is returned.  The result lies in
/// `lhs..=rhs + 1`.
pub fn binary_search(data: &[Record], lhs: usize, rhs: usize, target: u32, order: Order) -> usize {
    let (mut lo, mut hi) = (lhs, rhs + 1);
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        let v = data[mid].value;
        if v == target {
            return mid;
        }
        if order.precedes(target, v) {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}

/// Number of base-`base` digits in `value` (at least 1).
pub fn digits_of(value: u32, base: u32) -> u32 {
    let mut v = value / base;
    let mut digits = 1;
    while v > 0 {
        v /= base;
        digits += 1;
    }
    digits
}

/// Digit `digit` (0 = least significant) of `value` in base `base`.
pub fn digit_at(value: u32, digit: u32, base: u32) -> u32 {
    let scale = (base as u64).saturating_pow(digit);
    ((value as u64 / scale) % base as u64) as u32
}

/// Merge the ordered runs `lhs..=mid` and `mid + 1..=rhs` through scratch
/// buffers.  Every buffer read and write counts as one auxiliary operation
/// and one step.  Stable.
pub fn merge(data: &mut [Record], lhs: usize, mid: usize, rhs: usize, ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let mut left = Vec::with_capacity(mid + 1 - lhs);
    for i in lhs..=mid {
        left.push(ctx.read(data, i)?);
    }
    let mut right = Vec::with_capacity(rhs - mid);
    for i in mid + 1..=rhs {
        right.push(ctx.read(data, i)?);
    }

    let (mut i, mut j) = (0, 0);
    for k in lhs..=rhs {
        let take_left = j >= right.len() || (i < left.len() && ctx.in_order(left[i], right[j]));
        let record = if take_left {
            i += 1;
            left[i - 1]
        } else {
            j += 1;
            right[j - 1]
        };
        ctx.write(data, k, record)?;
    }
    Ok(())
}

/// Double-ended shuffle: each step exchanges a random element into the
/// front cursor and another into the back cursor.
pub fn shuffle(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let n = data.len();
    for front in 0..n / 2 {
        let back = n - 1 - front;
        let a = ctx.rng().gen_range(front..n);
        ctx.exchange(data, front, a);
        let b = ctx.rng().gen_range(0..=back);
        ctx.exchange(data, back, b);
        ctx.step(data, Marks::pair(front, back))?;
    }
    Ok(())
}

/// Straight insertion sort of `lhs..=rhs` by adjacent swaps.
pub fn insertion_range(data: &mut [Record], lhs: usize, rhs: usize, ctx: &mut SortCtx<'_>) -> SortResult<()> {
    for i in lhs + 1..=rhs {
        let mut j = i;
        while j > lhs && ctx.precedes(data[j], data[j - 1]) {
            ctx.swap(data, j - 1, j)?;
            j -= 1;
        }
        if j > lhs {
            ctx.step(data, Marks::pair(j - 1, j).with_pivot(i))?;
        }
    }
    Ok(())
}

/// Binary insertion sort of `lhs..=rhs`: locate with [`binary_search`], then
/// shift the element into place by adjacent swaps.
pub fn binary_insertion_range(data: &mut [Record], lhs: usize, rhs: usize, ctx: &mut SortCtx<'_>) -> SortResult<()> {
    for i in lhs + 1..=rhs {
        let target = data[i].value;
        let at = binary_search(data, lhs, i - 1, target, ctx.order());
        ctx.step(data, Marks::pair(i, at.min(i)).with_pivot(i))?;
        for j in (at..i).rev() {
            ctx.swap(data, j, j + 1)?;
        }
    }
    Ok(())
}
