//! Tree-based sorts: unbalanced binary search tree and tournament
//! (winner tree) selection.

use av_core::{Marks, Record};

use crate::{SortCtx, SortResult};

// ── BST sort ──────────────────────────────────────────────────────────────────

struct Node {
    record: Record,
    left:   Option<usize>,
    right:  Option<usize>,
}

/// Insert every record into an unbalanced BST keyed by the requested order,
/// then write the in-order traversal back.
///
/// Insertion and traversal are iterative, so an already-ordered input (a
/// degenerate, list-shaped tree) costs O(n²) time but no deep recursion.
pub fn bst(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let mut nodes: Vec<Node> = Vec::with_capacity(data.len());
    for i in 0..data.len() {
        let record = ctx.read(data, i)?;
        let id = nodes.len();
        nodes.push(Node { record, left: None, right: None });
        if id == 0 {
            continue;
        }
        let mut cur = 0;
        loop {
            // Ties go right, so equal keys keep their input order.
            let slot = if ctx.precedes(record, nodes[cur].record) {
                &mut nodes[cur].left
            } else {
                &mut nodes[cur].right
            };
            match *slot {
                Some(child) => cur = child,
                None => {
                    *slot = Some(id);
                    break;
                }
            }
        }
    }

    let mut stack: Vec<usize> = Vec::new();
    let mut cur = if nodes.is_empty() { None } else { Some(0) };
    let mut k = 0;
    while cur.is_some() || !stack.is_empty() {
        while let Some(id) = cur {
            stack.push(id);
            cur = nodes[id].left;
        }
        let Some(id) = stack.pop() else { break };
        ctx.write(data, k, nodes[id].record)?;
        k += 1;
        cur = nodes[id].right;
    }
    Ok(())
}

// ── Tournament sort ───────────────────────────────────────────────────────────

/// Winner-tree selection.  Leaves hold dataset indices; every internal node
/// holds the index of the leaf that wins its subtree.  After a winner is
/// emitted its leaf is retired and only the matches on its path are replayed.
pub fn tournament(data: &mut [Record], ctx: &mut SortCtx<'_>) -> SortResult<()> {
    let n = data.len();
    let size = n.next_power_of_two();
    let mut tree: Vec<Option<usize>> = vec![None; 2 * size];
    for i in 0..n {
        tree[size + i] = Some(i);
    }
    for node in (1..size).rev() {
        tree[node] = play(data, tree[2 * node], tree[2 * node + 1], ctx);
    }

    let mut out = Vec::with_capacity(n);
    while let Some(winner) = tree[1] {
        ctx.aux_step(data, Marks::at(winner))?;
        out.push(data[winner]);

        let mut node = size + winner;
        tree[node] = None;
        while node > 1 {
            node /= 2;
            tree[node] = play(data, tree[2 * node], tree[2 * node + 1], ctx);
        }
    }

    for (k, record) in out.into_iter().enumerate() {
        ctx.write(data, k, record)?;
    }
    Ok(())
}

/// One match: the entrant that belongs first wins; the left entrant wins ties.
fn play(data: &[Record], a: Option<usize>, b: Option<usize>, ctx: &SortCtx<'_>) -> Option<usize> {
    match (a, b) {
        (Some(x), Some(y)) => Some(if ctx.in_order(data[x], data[y]) { x } else { y }),
        (x, None) => x,
        (None, y) => y,
    }
}
