//! Uninformed solvers: BFS, DFS and the randomized backtracker search.

use std::collections::VecDeque;

use av_core::{CellId, PathGrid, Pos};

use crate::{MazeCtx, MazeError, MazeResult};

/// Breadth-first search.  `weight` records the depth in edges, so the path
/// found is shortest in edge count.
pub fn bfs(grid: &mut PathGrid, start: Pos, goal: Pos, ctx: &mut MazeCtx<'_>) -> MazeResult<Vec<Pos>> {
    let from = grid.dims().checked_id(start)?;
    let to = grid.dims().checked_id(goal)?;

    let mut queue = VecDeque::from([from]);
    grid.cell_mut(from).weight = Some(0);

    while let Some(cur) = queue.pop_front() {
        grid.cell_mut(cur).visited = true;
        ctx.explore(grid, cur)?;
        if cur == to {
            return super::trace(grid, start, goal, ctx);
        }
        let depth = grid.cell(cur).weight.unwrap_or(0);
        let neighbors: Vec<CellId> = grid.open_neighbors(cur).collect();
        for n in neighbors {
            let cell = grid.cell_mut(n);
            if cell.weight.is_some() {
                continue;
            }
            cell.weight = Some(depth + 1);
            cell.parent = Some(cur);
            queue.push_back(n);
        }
    }
    Err(MazeError::Unreachable { start, goal })
}

/// Depth-first search with an explicit stack.  Neighbours are pushed in
/// reverse scan order so the northern one is explored first.
pub fn dfs(grid: &mut PathGrid, start: Pos, goal: Pos, ctx: &mut MazeCtx<'_>) -> MazeResult<Vec<Pos>> {
    let from = grid.dims().checked_id(start)?;
    let to = grid.dims().checked_id(goal)?;

    let mut stack = vec![from];
    while let Some(cur) = stack.pop() {
        if grid.cell(cur).visited {
            continue;
        }
        grid.cell_mut(cur).visited = true;
        ctx.explore(grid, cur)?;
        if cur == to {
            return super::trace(grid, start, goal, ctx);
        }
        let neighbors: Vec<CellId> = grid.open_neighbors(cur).collect();
        for n in neighbors.into_iter().rev() {
            let cell = grid.cell_mut(n);
            if cell.visited {
                continue;
            }
            // The latest push is popped first, so it owns the parent link.
            cell.parent = Some(cur);
            stack.push(n);
        }
    }
    Err(MazeError::Unreachable { start, goal })
}

/// Randomized depth-first walk: step into a random unvisited open neighbour,
/// or pop back one cell at a dead end.
pub fn backtracker(grid: &mut PathGrid, start: Pos, goal: Pos, ctx: &mut MazeCtx<'_>) -> MazeResult<Vec<Pos>> {
    let from = grid.dims().checked_id(start)?;
    let to = grid.dims().checked_id(goal)?;

    grid.cell_mut(from).visited = true;
    ctx.explore(grid, from)?;
    let mut stack = vec![from];

    while let Some(&cur) = stack.last() {
        if cur == to {
            return super::trace(grid, start, goal, ctx);
        }
        let fresh: Vec<CellId> = grid.open_neighbors(cur).filter(|&n| !grid.cell(n).visited).collect();
        match ctx.pick(&fresh) {
            Some(next) => {
                let cell = grid.cell_mut(next);
                cell.visited = true;
                cell.parent = Some(cur);
                cell.weight = Some(stack.len() as u32);
                ctx.explore(grid, next)?;
                stack.push(next);
            }
            None => {
                stack.pop();
                if let Some(&back) = stack.last() {
                    ctx.explore(grid, back)?;
                }
            }
        }
    }
    Err(MazeError::Unreachable { start, goal })
}
