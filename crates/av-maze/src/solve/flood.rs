//! Flood fill.

use std::collections::VecDeque;

use av_core::{CellId, PathGrid, Pos};

use crate::{MazeCtx, MazeError, MazeResult};

/// Flood outward from the goal writing the distance to it into `weight`,
/// then walk from the start, always onto a neighbour one closer.
pub fn flood_fill(grid: &mut PathGrid, start: Pos, goal: Pos, ctx: &mut MazeCtx<'_>) -> MazeResult<Vec<Pos>> {
    let from = grid.dims().checked_id(start)?;
    let to = grid.dims().checked_id(goal)?;

    grid.cell_mut(to).weight = Some(0);
    let mut queue = VecDeque::from([to]);
    while let Some(cur) = queue.pop_front() {
        grid.cell_mut(cur).visited = true;
        ctx.explore(grid, cur)?;
        let depth = grid.cell(cur).weight.unwrap_or(0);
        let neighbors: Vec<CellId> = grid.open_neighbors(cur).collect();
        for n in neighbors {
            let cell = grid.cell_mut(n);
            if cell.weight.is_none() {
                cell.weight = Some(depth + 1);
                queue.push_back(n);
            }
        }
    }

    let Some(mut remaining) = grid.cell(from).weight else {
        return Err(MazeError::Unreachable { start, goal });
    };
    tracing::trace!(distance = remaining, "flood reached start");

    let mut cur = from;
    while cur != to {
        let next = grid
            .open_neighbors(cur)
            .find(|&n| grid.cell(n).weight == Some(remaining - 1))
            .ok_or(MazeError::Unreachable { start, goal })?;
        grid.cell_mut(next).parent = Some(cur);
        ctx.explore(grid, next)?;
        cur = next;
        remaining -= 1;
    }
    super::trace(grid, start, goal, ctx)
}
