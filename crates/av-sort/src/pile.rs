//! Pile-based sorts: patience and strand.

use av_core::{Marks, Order, Record};

use crate::util::{bounded_max, bounded_min};
use crate::{SortCtx, SortResult};

// ── Patience sort ─────────────────────────────────────────────────────────────

/// Deal cards onto piles (first pile whose top can still accept the card),
/// then repeatedly take the best pile top with a k-way selection.
///
/// Each pile's top is its last element and is always the pile's first
/// element in the requested order, so the selection only looks at tops.
pub fn patience(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let n = data.len();
    let mut piles: Vec<Vec<Record>> = Vec::new();
    for i in 0..n {
        let card = data[i];
        let target = piles
            .iter()
            .position(|pile| pile.last().is_some_and(|&top| ctx.in_order(card, top)));
        match target {
            Some(p) => piles[p].push(card),
            None => piles.push(vec![card]),
        }
        ctx.aux_step(data, Marks::at(i))?;
    }
    tracing::trace!(piles = piles.len(), "patience deal finished");

    // Exhausted piles present a sentinel key that never wins.
    let order = ctx.order();
    for k in 0..n {
        let key = |p: usize| -> i64 {
            match (piles[p].last(), order) {
                (Some(top), _) => top.value as i64,
                (None, Order::Ascent) => i64::MAX,
                (None, Order::Descent) => i64::MIN,
            }
        };
        let best = match order {
            Order::Ascent  => bounded_min(0, piles.len() - 1, &key),
            Order::Descent => bounded_max(0, piles.len() - 1, &key),
        };
        let Some(record) = piles[best].pop() else { break };
        ctx.write(data, k, record)?;
    }
    Ok(())
}

// ── Strand sort ───────────────────────────────────────────────────────────────

/// Repeatedly pull an ordered strand out of the remaining input and merge it
/// into the output.  After every strand the dataset shows `output ++ input`,
/// so it stays a permutation of the original throughout.
pub fn strand(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let mut input: Vec<Record> = data.to_vec();
    let mut output: Vec<Record> = Vec::with_capacity(data.len());

    while !input.is_empty() {
        let mut strand = vec![input.remove(0)];
        let mut i = 0;
        while i < input.len() {
            let tail = strand[strand.len() - 1];
            if ctx.in_order(tail, input[i]) {
                strand.push(input.remove(i));
                ctx.aux_step(data, Marks::at(output.len() + strand.len() - 1))?;
            } else {
                i += 1;
            }
        }

        let mut merged = Vec::with_capacity(output.len() + strand.len());
        let (mut a, mut b) = (0, 0);
        while a < output.len() || b < strand.len() {
            let take_output = b >= strand.len()
                || (a < output.len() && ctx.in_order(output[a], strand[b]));
            if take_output {
                merged.push(output[a]);
                a += 1;
            } else {
                merged.push(strand[b]);
                b += 1;
            }
        }
        output = merged;

        for (k, &record) in output.iter().chain(input.iter()).enumerate() {
            if data[k] != record {
                ctx.write(data, k, record)?;
            }
        }
    }
    Ok(())
}
