//! Random-walk generators: Aldous-Broder and Wilson's.

use av_core::{CarveMarks, CellId, Direction, Grid};

use super::{all_neighbors, unvisited_neighbors};
use crate::{MazeCtx, MazeResult};

/// Random walk that carves into unvisited neighbours; when every neighbour
/// has been visited the walk restarts from a random visited cell.
pub fn aldous_broder(grid: &mut Grid, ctx: &mut MazeCtx<'_>) -> MazeResult<()> {
    let len = grid.len();
    let mut visited: Vec<CellId> = Vec::with_capacity(len);

    let mut cur = CellId(ctx.rng().index(len) as u32);
    grid.visit(cur);
    visited.push(cur);
    ctx.step(grid, CarveMarks::at(grid.pos(cur)))?;

    while visited.len() < len {
        let fresh = unvisited_neighbors(grid, cur);
        if let Some(next) = ctx.pick(&fresh) {
            ctx.carve(grid, cur, next)?;
            visited.push(next);
            cur = next;
        } else if let Some(restart) = ctx.pick(&visited) {
            ctx.step(grid, CarveMarks::pair(grid.pos(cur), grid.pos(restart)))?;
            cur = restart;
        }
    }
    Ok(())
}

/// Loop-erased random walks.
///
/// Each walk starts at a random cell outside the maze and wanders until it
/// hits the maze, recording in `exits` the direction last taken out of every
/// cell it crossed.  Revisiting a cell overwrites its exit, which erases the
/// loop.  The walk is then committed by following the exits from its start.
pub fn wilson(grid: &mut Grid, ctx: &mut MazeCtx<'_>) -> MazeResult<()> {
    let dims = grid.dims();
    let mut exits: Vec<Option<Direction>> = vec![None; grid.len()];
    let mut outside: Vec<CellId> = dims.ids().collect();

    let seed = outside.swap_remove(ctx.rng().index(outside.len()));
    grid.visit(seed);
    ctx.step(grid, CarveMarks::at(grid.pos(seed)))?;

    while !outside.is_empty() {
        let idx = ctx.rng().index(outside.len());
        let start = outside[idx];
        if grid.is_visited(start) {
            outside.swap_remove(idx);
            continue;
        }

        // Walk until the maze is hit.
        let start_pos = grid.pos(start);
        let mut cur = start;
        while !grid.is_visited(cur) {
            let options = all_neighbors(grid, cur);
            let Some(&(dir, next)) = ctx.rng().choose(&options) else { break };
            exits[cur.index()] = Some(dir);
            let marks = CarveMarks {
                walk_start: Some(start_pos),
                ..CarveMarks::pair(grid.pos(cur), grid.pos(next))
            };
            ctx.step(grid, marks)?;
            cur = next;
        }
        let end_pos = grid.pos(cur);

        // Commit the loop-erased path.
        let mut cur = start;
        while !grid.is_visited(cur) {
            let Some(next) = exits[cur.index()].and_then(|dir| dims.neighbor(cur, dir)) else { break };
            grid.open_wall(cur, next)?;
            grid.visit(cur);
            let marks = CarveMarks {
                walk_start: Some(start_pos),
                walk_end:   Some(end_pos),
                ..CarveMarks::pair(grid.pos(cur), grid.pos(next))
            };
            ctx.step(grid, marks)?;
            cur = next;
        }
    }
    Ok(())
}
