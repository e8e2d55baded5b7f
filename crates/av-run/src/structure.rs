//! The data an algorithm runs against.

use av_core::{Grid, PathGrid, Pos, Record};

/// Borrowed structure for one run.  The run has exclusive access to it until
/// it returns.
#[derive(Debug)]
pub enum Structure<'a> {
    /// Records to sort in place.
    Dataset(&'a mut [Record]),
    /// Grid to carve; its current walls are discarded.
    Grid(&'a mut Grid),
    /// Maze to solve between two cells.
    Path {
        grid:  &'a mut PathGrid,
        start: Pos,
        goal:  Pos,
    },
}

impl Structure<'_> {
    pub const fn kind(&self) -> &'static str {
        match self {
            Structure::Dataset(_) => "dataset",
            Structure::Grid(_) => "grid",
            Structure::Path { .. } => "path grid",
        }
    }
}

/// Owned counterpart of [`Structure`], for runs that move to another thread.
#[derive(Clone, Debug, PartialEq)]
pub enum OwnedStructure {
    Dataset(Vec<Record>),
    Grid(Grid),
    Path { grid: PathGrid, start: Pos, goal: Pos },
}

impl OwnedStructure {
    pub fn as_structure(&mut self) -> Structure<'_> {
        match self {
            OwnedStructure::Dataset(records) => Structure::Dataset(records),
            OwnedStructure::Grid(grid) => Structure::Grid(grid),
            OwnedStructure::Path { grid, start, goal } => Structure::Path { grid, start: *start, goal: *goal },
        }
    }
}
