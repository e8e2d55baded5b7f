//! Depth-first style generators: Recursive Backtracker (plain and doubled),
//! Hunt-and-Kill, and Growing Tree.

use std::ops::Range;

use av_core::{CarveMarks, CellId, Grid};

use super::{unvisited_neighbors, visited_neighbors};
use crate::{MazeCtx, MazeResult};

// ── Recursive backtracker ─────────────────────────────────────────────────────

/// Depth-first search with an explicit stack.
pub fn backtracker(grid: &mut Grid, ctx: &mut MazeCtx<'_>) -> MazeResult<()> {
    let cols = grid.cols();
    backtrack_columns(grid, 0..cols, ctx)
}

/// Backtrack the left and right halves independently, then join them with a
/// single passage on a random row.
pub fn backtracker_doubled(grid: &mut Grid, ctx: &mut MazeCtx<'_>) -> MazeResult<()> {
    let (cols, rows) = (grid.cols(), grid.rows());
    if cols < 2 {
        return backtracker(grid, ctx);
    }
    let split = cols / 2;
    backtrack_columns(grid, 0..split, ctx)?;
    backtrack_columns(grid, split..cols, ctx)?;

    let y = ctx.rng().index(rows as usize) as u32;
    let left = CellId(y * cols + split - 1);
    let right = CellId(y * cols + split);
    tracing::trace!(row = y, "joining backtracked halves");
    ctx.carve(grid, left, right)
}

/// Backtracker confined to the columns in `xs`.
fn backtrack_columns(grid: &mut Grid, xs: Range<u32>, ctx: &mut MazeCtx<'_>) -> MazeResult<()> {
    let dims = grid.dims();
    let inside = |id: CellId| xs.contains(&dims.pos(id).x);

    let x = xs.start + ctx.rng().index((xs.end - xs.start) as usize) as u32;
    let y = ctx.rng().index(dims.rows as usize) as u32;
    let start = CellId(y * dims.cols + x);
    grid.visit(start);
    ctx.step(grid, CarveMarks::at(grid.pos(start)))?;

    let mut stack = vec![start];
    while let Some(&cur) = stack.last() {
        let fresh: Vec<CellId> = unvisited_neighbors(grid, cur).into_iter().filter(|&n| inside(n)).collect();
        match ctx.pick(&fresh) {
            Some(next) => {
                ctx.carve(grid, cur, next)?;
                stack.push(next);
            }
            None => {
                stack.pop();
                if let Some(&back) = stack.last() {
                    ctx.step(grid, CarveMarks::pair(grid.pos(cur), grid.pos(back)))?;
                }
            }
        }
    }
    Ok(())
}

// ── Hunt-and-kill ─────────────────────────────────────────────────────────────

/// Random walk into unvisited cells; when stuck, scan rows top to bottom for
/// the first unvisited cell next to the maze and resume from there.
pub fn hunt_and_kill(grid: &mut Grid, ctx: &mut MazeCtx<'_>) -> MazeResult<()> {
    let dims = grid.dims();
    let mut cur = CellId(ctx.rng().index(grid.len()) as u32);
    grid.visit(cur);
    ctx.step(grid, CarveMarks::at(grid.pos(cur)))?;

    loop {
        // Kill: walk while there is somewhere new to go.
        let fresh = unvisited_neighbors(grid, cur);
        if let Some(next) = ctx.pick(&fresh) {
            ctx.carve(grid, cur, next)?;
            cur = next;
            continue;
        }

        // Hunt.
        let mut found = None;
        'rows: for y in 0..dims.rows {
            ctx.step(grid, CarveMarks { scan_row: Some(y), ..CarveMarks::default() })?;
            for id in dims.row(y) {
                if grid.is_visited(id) {
                    continue;
                }
                let anchors = visited_neighbors(grid, id);
                if let Some(anchor) = ctx.pick(&anchors) {
                    found = Some((id, anchor, y));
                    break 'rows;
                }
            }
        }
        let Some((id, anchor, y)) = found else { break };
        grid.open_wall(id, anchor)?;
        grid.visit(id);
        let marks = CarveMarks { scan_row: Some(y), ..CarveMarks::pair(grid.pos(anchor), grid.pos(id)) };
        ctx.step(grid, marks)?;
        cur = id;
    }
    Ok(())
}

// ── Growing tree ──────────────────────────────────────────────────────────────

/// Keep a set of active cells; each step grows from a uniformly random
/// active cell, or retires it once it has no unvisited neighbour.
pub fn growing_tree(grid: &mut Grid, ctx: &mut MazeCtx<'_>) -> MazeResult<()> {
    let start = CellId(ctx.rng().index(grid.len()) as u32);
    grid.visit(start);
    ctx.step(grid, CarveMarks::at(grid.pos(start)))?;

    let mut active = vec![start];
    while !active.is_empty() {
        let idx = ctx.rng().index(active.len());
        let cur = active[idx];
        let fresh = unvisited_neighbors(grid, cur);
        match ctx.pick(&fresh) {
            Some(next) => {
                ctx.carve(grid, cur, next)?;
                active.push(next);
            }
            None => {
                active.remove(idx);
                ctx.step(grid, CarveMarks::at(grid.pos(cur)))?;
            }
        }
    }
    Ok(())
}
