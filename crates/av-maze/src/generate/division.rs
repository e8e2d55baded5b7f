//! Recursive division.

use av_core::{CarveMarks, CellId, Grid, Pos};

use crate::{MazeCtx, MazeResult};

/// Axis-aligned sub-rectangle of the grid.
#[derive(Copy, Clone, Debug)]
struct Chamber {
    x: u32,
    y: u32,
    w: u32,
    h: u32,
}

/// Start from an open field and split it with walls, each wall leaving one
/// passage, until every chamber is a single row or column.
pub fn recursive_division(grid: &mut Grid, ctx: &mut MazeCtx<'_>) -> MazeResult<()> {
    grid.open_interior();
    for id in grid.dims().ids() {
        grid.visit(id);
    }
    ctx.step(grid, CarveMarks::default())?;
    let (w, h) = (grid.cols(), grid.rows());
    divide(grid, Chamber { x: 0, y: 0, w, h }, ctx)
}

fn divide(grid: &mut Grid, c: Chamber, ctx: &mut MazeCtx<'_>) -> MazeResult<()> {
    if c.w < 2 || c.h < 2 {
        return Ok(());
    }
    let horizontal = match c.h.cmp(&c.w) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => ctx.rng().coin(),
    };
    let cols = grid.cols();
    let id = |x: u32, y: u32| CellId(y * cols + x);

    if horizontal {
        // Wall between rows `cut - 1` and `cut`.
        let cut = c.y + ctx.rng().gen_range(1..c.h);
        let door = c.x + ctx.rng().index(c.w as usize) as u32;
        tracing::trace!(?c, cut, door, "horizontal division");
        for x in c.x..c.x + c.w {
            if x == door {
                continue;
            }
            grid.close_wall(id(x, cut - 1), id(x, cut))?;
            ctx.step(grid, CarveMarks::pair(Pos::new(x, cut - 1), Pos::new(x, cut)))?;
        }
        divide(grid, Chamber { h: cut - c.y, ..c }, ctx)?;
        divide(grid, Chamber { y: cut, h: c.y + c.h - cut, ..c }, ctx)
    } else {
        // Wall between columns `cut - 1` and `cut`.
        let cut = c.x + ctx.rng().gen_range(1..c.w);
        let door = c.y + ctx.rng().index(c.h as usize) as u32;
        tracing::trace!(?c, cut, door, "vertical division");
        for y in c.y..c.y + c.h {
            if y == door {
                continue;
            }
            grid.close_wall(id(cut - 1, y), id(cut, y))?;
            ctx.step(grid, CarveMarks::pair(Pos::new(cut - 1, y), Pos::new(cut, y)))?;
        }
        divide(grid, Chamber { w: cut - c.x, ..c }, ctx)?;
        divide(grid, Chamber { x: cut, w: c.x + c.w - cut, ..c }, ctx)
    }
}
