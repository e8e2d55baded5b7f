//! Priority-frontier solvers: A*, Dijkstra and greedy best-first.
//!
//! All three share one loop over a min-heap keyed by `(priority, seq)`.  The
//! sequence number is the insertion order, so among equal priorities the
//! cell discovered first is expanded first.
//!
//! | Solver    | priority      | `weight` holds | re-opens a cell |
//! |-----------|---------------|----------------|-----------------|
//! | A*        | g + h         | g              | on a cheaper g  |
//! | Dijkstra  | g             | g              | on a cheaper g  |
//! | Greedy    | h             | h              | never           |
//!
//! Moving between adjacent cells costs [`STEP_COST`]; `h` is the Euclidean
//! distance to the goal scaled by the same factor and floored, which never
//! overestimates on a four-connected grid.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use av_core::{CellId, PathGrid, Pos};

use crate::{MazeCtx, MazeError, MazeResult};

/// Cost of one move between adjacent cells.
pub const STEP_COST: u32 = 10;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
enum Frontier {
    AStar,
    Dijkstra,
    Greedy,
}

/// A*: expand by `g + h`.
pub fn a_star(grid: &mut PathGrid, start: Pos, goal: Pos, ctx: &mut MazeCtx<'_>) -> MazeResult<Vec<Pos>> {
    best_first(grid, start, goal, Frontier::AStar, ctx)
}

/// Dijkstra: A* with a zero heuristic.
pub fn dijkstra(grid: &mut PathGrid, start: Pos, goal: Pos, ctx: &mut MazeCtx<'_>) -> MazeResult<Vec<Pos>> {
    best_first(grid, start, goal, Frontier::Dijkstra, ctx)
}

/// Greedy best-first: expand whichever frontier cell looks closest to the
/// goal.  Fast, but the path need not be shortest on mazes with loops.
pub fn greedy(grid: &mut PathGrid, start: Pos, goal: Pos, ctx: &mut MazeCtx<'_>) -> MazeResult<Vec<Pos>> {
    best_first(grid, start, goal, Frontier::Greedy, ctx)
}

/// `floor(STEP_COST * euclidean(pos, goal))`.
#[inline]
pub fn heuristic(pos: Pos, goal: Pos) -> u32 {
    (f64::from(STEP_COST) * pos.euclidean(goal)).floor() as u32
}

fn best_first(
    grid:     &mut PathGrid,
    start:    Pos,
    goal:     Pos,
    frontier: Frontier,
    ctx:      &mut MazeCtx<'_>,
) -> MazeResult<Vec<Pos>> {
    let dims = grid.dims();
    let from = dims.checked_id(start)?;
    let to = dims.checked_id(goal)?;
    let h = |id: CellId| match frontier {
        Frontier::Dijkstra => 0,
        Frontier::AStar | Frontier::Greedy => heuristic(dims.pos(id), goal),
    };

    let mut heap: BinaryHeap<Reverse<(u32, u64, CellId)>> = BinaryHeap::new();
    let mut seq = 0u64;
    let start_weight = if frontier == Frontier::Greedy { h(from) } else { 0 };
    grid.cell_mut(from).weight = Some(start_weight);
    heap.push(Reverse((h(from), seq, from)));

    while let Some(Reverse((_, _, cur))) = heap.pop() {
        // Stale entry for a cell already expanded at a lower priority.
        if grid.cell(cur).visited {
            continue;
        }
        grid.cell_mut(cur).visited = true;
        ctx.explore(grid, cur)?;
        if cur == to {
            return super::trace(grid, start, goal, ctx);
        }

        let g = grid.cell(cur).weight.unwrap_or(0);
        let neighbors: Vec<CellId> = grid.open_neighbors(cur).collect();
        for n in neighbors {
            let cell = grid.cell(n);
            if cell.visited {
                continue;
            }
            let (weight, priority) = match frontier {
                Frontier::Greedy => {
                    if cell.weight.is_some() {
                        continue;
                    }
                    (h(n), h(n))
                }
                Frontier::AStar | Frontier::Dijkstra => {
                    let cand = g.saturating_add(STEP_COST);
                    if cell.weight.is_some_and(|known| known <= cand) {
                        continue;
                    }
                    (cand, cand.saturating_add(h(n)))
                }
            };
            let cell = grid.cell_mut(n);
            cell.weight = Some(weight);
            cell.parent = Some(cur);
            seq += 1;
            heap.push(Reverse((priority, seq, n)));
        }
    }

    Err(MazeError::Unreachable { start, goal })
}
