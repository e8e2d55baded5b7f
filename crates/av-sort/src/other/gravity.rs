//! Gravity (bead) sort.
//!
//! Record `i` becomes row `i` of an abacus holding `value` beads packed to the
//! left.  Each pass lets every bead drop one row if the slot below it is
//! empty; the abacus has settled once a full pass moves nothing, and row
//! lengths then read out in order.  Rows fall towards the end of the dataset
//! for ascent and towards the front for descent.

use std::collections::{HashMap, VecDeque};

use av_core::{Marks, Order, Record};

use crate::{SortCtx, SortError, SortResult};

/// Largest value the abacus accepts.
pub const MAX_BEAD_VALUE: u32 = 1 << 16;
/// Largest abacus (rows × columns) the sort will allocate.
pub const MAX_BEADS: usize = 1 << 24;

pub fn gravity(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let n = data.len();
    let max = data.iter().map(|r| r.value).max().unwrap_or(0);
    if max > MAX_BEAD_VALUE || n.saturating_mul(max as usize) > MAX_BEADS {
        return Err(SortError::InvalidInput(format!(
            "gravity sort supports values up to {MAX_BEAD_VALUE} and at most {MAX_BEADS} beads, \
             got {n} records with maximum {max}"
        )));
    }
    let cols = max as usize;

    // Physical row `r` is dataset slot `r` for ascent and `n - 1 - r` for
    // descent, so beads always fall towards larger `r`.
    let order = ctx.order();
    let slot = |r: usize| match order {
        Order::Ascent  => r,
        Order::Descent => n - 1 - r,
    };

    let mut beads = vec![false; n * cols];
    for r in 0..n {
        let value = data[slot(r)].value as usize;
        beads[r * cols..r * cols + value].fill(true);
    }

    let row_len = |beads: &[bool], r: usize| beads[r * cols..(r + 1) * cols].iter().filter(|&&b| b).count() as u32;

    let mut heights = vec![Record::default(); n];
    let mut passes = 0u32;
    loop {
        let mut moved = false;
        for c in 0..cols {
            for r in (0..n.saturating_sub(1)).rev() {
                if beads[r * cols + c] && !beads[(r + 1) * cols + c] {
                    beads[r * cols + c] = false;
                    beads[(r + 1) * cols + c] = true;
                    moved = true;
                }
            }
        }
        if !moved {
            break;
        }
        passes += 1;
        for r in 0..n {
            heights[slot(r)] = Record::new(row_len(&beads, r), n);
        }
        ctx.aux_step(&heights, Marks::NONE)?;
    }
    tracing::trace!(passes, "gravity settled");

    // Each settled row length is one of the original values; hand the
    // matching records back out in their original relative order.
    let mut by_value: HashMap<u32, VecDeque<Record>> = HashMap::new();
    for record in data.iter() {
        by_value.entry(record.value).or_default().push_back(*record);
    }
    for r in 0..n {
        let count = row_len(&beads, r);
        let Some(record) = by_value.get_mut(&count).and_then(VecDeque::pop_front) else {
            return Err(SortError::InvalidInput(format!("abacus row {r} settled to unknown value {count}")));
        };
        ctx.write(data, slot(r), record)?;
    }
    Ok(())
}
