//! Spanning-tree generators: randomized Kruskal's and Prim's.

use av_core::{CarveMarks, CellId, Grid, SetId};

use super::{all_neighbors, unvisited_neighbors, visited_neighbors};
use crate::{MazeCtx, MazeResult};

/// Randomized Kruskal's by resampling.
///
/// Instead of shuffling the edge list once, keep drawing a random cell and a
/// random neighbour:
///
/// | cell sets              | action                                       |
/// |------------------------|----------------------------------------------|
/// | both unlabelled        | carve, give both a fresh set id              |
/// | one labelled           | carve, the other joins that set              |
/// | labelled, different    | carve, relabel the larger id to the smaller  |
/// | same set               | skip (would close a loop)                    |
///
/// The run ends once `cols * rows - 1` passages exist.
pub fn kruskal(grid: &mut Grid, ctx: &mut MazeCtx<'_>) -> MazeResult<()> {
    let len = grid.len();
    let mut sets: Vec<SetId> = vec![SetId::UNLABELLED; len];
    let mut next_set = 1u32;
    let mut carved = 0;

    while carved + 1 < len {
        let a = CellId(ctx.rng().index(len) as u32);
        let options = all_neighbors(grid, a);
        let Some(&(_, b)) = ctx.rng().choose(&options) else { continue };
        let (sa, sb) = (sets[a.index()], sets[b.index()]);

        let merged = match (sa == SetId::UNLABELLED, sb == SetId::UNLABELLED) {
            (true, true) => {
                let fresh = SetId(next_set);
                next_set += 1;
                sets[a.index()] = fresh;
                sets[b.index()] = fresh;
                true
            }
            (false, true) => {
                sets[b.index()] = sa;
                true
            }
            (true, false) => {
                sets[a.index()] = sb;
                true
            }
            (false, false) if sa != sb => {
                let (keep, absorb) = if sa < sb { (sa, sb) } else { (sb, sa) };
                for set in sets.iter_mut().filter(|s| **s == absorb) {
                    *set = keep;
                }
                true
            }
            (false, false) => false,
        };

        if merged {
            ctx.carve(grid, a, b)?;
            carved += 1;
        } else {
            ctx.step(grid, CarveMarks::pair(grid.pos(a), grid.pos(b)))?;
        }
    }
    Ok(())
}

/// Randomized Prim's: draw a random frontier cell, attach it to a random
/// neighbour already in the maze, and add its unvisited neighbours to the
/// frontier.
pub fn prim(grid: &mut Grid, ctx: &mut MazeCtx<'_>) -> MazeResult<()> {
    let mut in_frontier = vec![false; grid.len()];
    let start = CellId(ctx.rng().index(grid.len()) as u32);
    grid.visit(start);
    ctx.step(grid, CarveMarks::at(grid.pos(start)))?;

    let mut frontier = Vec::new();
    for n in unvisited_neighbors(grid, start) {
        in_frontier[n.index()] = true;
        frontier.push(n);
    }

    while !frontier.is_empty() {
        let cell = frontier.swap_remove(ctx.rng().index(frontier.len()));
        let anchors = visited_neighbors(grid, cell);
        let Some(anchor) = ctx.pick(&anchors) else { continue };
        ctx.carve(grid, anchor, cell)?;

        for n in unvisited_neighbors(grid, cell) {
            if !in_frontier[n.index()] {
                in_frontier[n.index()] = true;
                frontier.push(n);
            }
        }
    }
    Ok(())
}
