//! Row-oriented generators: Binary Tree, Sidewinder and Eller's.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use av_core::{CarveMarks, CellId, Direction, Grid, SetId};

use crate::{MazeCtx, MazeError, MazeResult};

// ── Binary tree ───────────────────────────────────────────────────────────────

/// Corner every Binary Tree passage leads towards.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Corner {
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Corner {
    pub const ALL: [Corner; 4] = [Corner::NorthWest, Corner::NorthEast, Corner::SouthWest, Corner::SouthEast];

    /// The two directions a cell may carve: vertical first, then horizontal.
    pub const fn directions(self) -> [Direction; 2] {
        match self {
            Corner::NorthWest => [Direction::North, Direction::West],
            Corner::NorthEast => [Direction::North, Direction::East],
            Corner::SouthWest => [Direction::South, Direction::West],
            Corner::SouthEast => [Direction::South, Direction::East],
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Corner::NorthWest => "nw",
            Corner::NorthEast => "ne",
            Corner::SouthWest => "sw",
            Corner::SouthEast => "se",
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Corner {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nw" | "north-west" => Ok(Corner::NorthWest),
            "ne" | "north-east" => Ok(Corner::NorthEast),
            "sw" | "south-west" => Ok(Corner::SouthWest),
            "se" | "south-east" => Ok(Corner::SouthEast),
            other => Err(MazeError::InvalidInput(format!("unknown corner `{other}`"))),
        }
    }
}

/// Every cell opens one wall towards `corner`: a coin flip between the two
/// corner directions, or the only one available on the border.  The corner
/// cell itself opens nothing.
pub fn binary_tree(grid: &mut Grid, corner: Corner, ctx: &mut MazeCtx<'_>) -> MazeResult<()> {
    let dims = grid.dims();
    for id in dims.ids() {
        let options: Vec<CellId> = corner
            .directions()
            .into_iter()
            .filter_map(|dir| dims.neighbor(id, dir))
            .collect();
        let next = match options.as_slice() {
            [] => {
                grid.visit(id);
                ctx.step(grid, CarveMarks::at(grid.pos(id)))?;
                continue;
            }
            [only] => *only,
            [vertical, horizontal, ..] => {
                if ctx.rng().coin() { *vertical } else { *horizontal }
            }
        };
        ctx.carve(grid, id, next)?;
    }
    Ok(())
}

// ── Sidewinder ────────────────────────────────────────────────────────────────

/// Row 0 is one long eastward corridor.  Every later row is cut into runs;
/// each run ends at random (or at the east wall) and opens exactly one
/// northward passage from a random member.
pub fn sidewinder(grid: &mut Grid, ctx: &mut MazeCtx<'_>) -> MazeResult<()> {
    let dims = grid.dims();
    let cols = dims.cols;
    for y in 0..dims.rows {
        let row: Vec<CellId> = dims.row(y).collect();
        if y == 0 {
            grid.visit(row[0]);
            for pair in row.windows(2) {
                ctx.carve(grid, pair[0], pair[1])?;
            }
            if cols == 1 {
                ctx.step(grid, CarveMarks::at(grid.pos(row[0])))?;
            }
            continue;
        }

        let mut run_start = 0;
        for x in 0..cols as usize {
            let at_east_wall = x + 1 == cols as usize;
            if at_east_wall || ctx.rng().coin() {
                let member = row[run_start + ctx.rng().index(x - run_start + 1)];
                let Some(up) = dims.neighbor(member, Direction::North) else { continue };
                ctx.carve(grid, member, up)?;
                run_start = x + 1;
            } else {
                ctx.carve(grid, row[x], row[x + 1])?;
            }
        }
    }
    Ok(())
}

// ── Eller's ───────────────────────────────────────────────────────────────────

/// Row-by-row set merging.
///
/// `sets` holds the set id of every cell in the current row.  Within a row,
/// neighbouring cells of different sets are joined at random (always on the
/// last row); then every set sends at least one passage down, and the cells
/// below inherit its id.
pub fn eller(grid: &mut Grid, ctx: &mut MazeCtx<'_>) -> MazeResult<()> {
    let dims = grid.dims();
    let cols = dims.cols as usize;
    let mut sets: Vec<SetId> = vec![SetId::UNLABELLED; cols];
    let mut next_set = 1u32;

    for y in 0..dims.rows {
        let row: Vec<CellId> = dims.row(y).collect();
        let last_row = y + 1 == dims.rows;
        tracing::trace!(row = y, "eller row");

        for (x, set) in sets.iter_mut().enumerate() {
            if *set == SetId::UNLABELLED {
                *set = SetId(next_set);
                next_set += 1;
            }
            grid.visit(row[x]);
        }
        ctx.step(grid, CarveMarks { scan_row: Some(y), ..CarveMarks::default() })?;

        // Horizontal joins.
        for x in 0..cols.saturating_sub(1) {
            if sets[x] == sets[x + 1] || !(last_row || ctx.rng().coin()) {
                continue;
            }
            ctx.carve(grid, row[x], row[x + 1])?;
            let (keep, absorb) = (sets[x], sets[x + 1]);
            for set in sets.iter_mut().filter(|s| **s == absorb) {
                *set = keep;
            }
        }
        if last_row {
            break;
        }

        // Vertical carries: at least one per set.
        let mut members: BTreeMap<SetId, Vec<usize>> = BTreeMap::new();
        for (x, &set) in sets.iter().enumerate() {
            members.entry(set).or_default().push(x);
        }
        let mut below = vec![SetId::UNLABELLED; cols];
        for (set, mut xs) in members {
            ctx.rng().shuffle(&mut xs);
            for (k, &x) in xs.iter().enumerate() {
                if k == 0 || ctx.rng().coin() {
                    let Some(down) = dims.neighbor(row[x], Direction::South) else { continue };
                    ctx.carve(grid, row[x], down)?;
                    below[x] = set;
                }
            }
        }
        sets = below;
    }
    Ok(())
}
