//! Search grid used by the maze solvers.
//!
//! A [`PathGrid`] copies the wall layout of a generated [`Grid`] and adds the
//! per-cell search state.  `parent` is a [`CellId`] into the same grid rather
//! than a reference: the path is recovered by re-looking-up indices from the
//! goal back to the start, so there is no ownership cycle to manage.

use crate::{CellId, CoreError, CoreResult, Dims, Direction, Grid, Pos, Walls};

/// One cell of a [`PathGrid`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathCell {
    /// Read-only copy of the generated maze's walls.
    pub walls:   Walls,
    /// Cell this one was first reached from.
    pub parent:  Option<CellId>,
    /// `true` once the cell is part of the recovered path.
    pub marked:  bool,
    /// `true` once the cell has been expanded by the search.
    pub visited: bool,
    /// Solver-specific cost: distance, priority, or flood depth.
    pub weight:  Option<u32>,
}

impl PathCell {
    fn fresh(walls: Walls) -> Self {
        Self { walls, parent: None, marked: false, visited: false, weight: None }
    }
}

/// A maze plus search state.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "PathGridParts", into = "PathGridParts")
)]
pub struct PathGrid {
    dims:  Dims,
    cells: Vec<PathCell>,
}

/// Unvalidated fields of a [`PathGrid`], as persisted.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathGridParts {
    pub dims:  Dims,
    pub cells: Vec<PathCell>,
}

impl TryFrom<PathGridParts> for PathGrid {
    type Error = CoreError;

    fn try_from(parts: PathGridParts) -> CoreResult<Self> {
        PathGrid::from_parts(parts)
    }
}

impl From<PathGrid> for PathGridParts {
    fn from(grid: PathGrid) -> Self {
        PathGridParts { dims: grid.dims, cells: grid.cells }
    }
}

impl PathGrid {
    pub fn from_grid(grid: &Grid) -> Self {
        Self {
            dims:  grid.dims(),
            cells: grid.cells().iter().map(|c| PathCell::fresh(c.walls)).collect(),
        }
    }

    /// Rebuild a search grid from its raw fields, keeping search state.
    ///
    /// The walls must form a layout [`Grid::from_walls`] accepts and every
    /// `parent` must name a cell of the same grid.
    pub fn from_parts(parts: PathGridParts) -> CoreResult<Self> {
        let PathGridParts { dims, cells } = parts;
        Dims::new(dims.cols, dims.rows)?.check_len(cells.len())?;
        let walls: Vec<Walls> = cells.iter().map(|c| c.walls).collect();
        Grid::from_walls(dims.cols, dims.rows, &walls)?;
        if let Some(parent) = cells.iter().filter_map(|c| c.parent).find(|p| p.index() >= cells.len()) {
            return Err(CoreError::InvalidInput(format!("parent {parent} lies outside the grid")));
        }
        Ok(Self { dims, cells })
    }

    /// Confirm the dimensions are non-zero and match the cell count.
    pub fn check_shape(&self) -> CoreResult<()> {
        Dims::new(self.dims.cols, self.dims.rows)?.check_len(self.cells.len())
    }

    /// Clear all search state, keeping the walls.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            *cell = PathCell::fresh(cell.walls);
        }
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[PathCell] {
        &self.cells
    }

    #[inline]
    pub fn cell(&self, id: CellId) -> &PathCell {
        &self.cells[id.index()]
    }

    #[inline]
    pub fn cell_mut(&mut self, id: CellId) -> &mut PathCell {
        &mut self.cells[id.index()]
    }

    #[inline]
    pub fn pos(&self, id: CellId) -> Pos {
        self.dims.pos(id)
    }

    /// Neighbours reachable from `id` without crossing a wall, in N, S, W, E
    /// order.
    pub fn open_neighbors(&self, id: CellId) -> impl Iterator<Item = CellId> + '_ {
        let walls = self.cells[id.index()].walls;
        self.dims
            .neighbors(id)
            .filter(move |&(dir, _)| !walls.has(dir))
            .map(|(_, n)| n)
    }

    /// `true` if `a` and `b` are adjacent with no wall between them.
    pub fn is_open(&self, a: CellId, b: CellId) -> bool {
        self.dims
            .direction(a, b)
            .is_some_and(|dir: Direction| !self.cells[a.index()].walls.has(dir))
    }

    /// Follow `parent` links from `goal` back to the first cell without a
    /// parent.  The result is in goal → start order.
    pub fn parent_chain(&self, goal: CellId) -> Vec<CellId> {
        let mut chain = vec![goal];
        let mut cur = goal;
        while let Some(parent) = self.cells[cur.index()].parent {
            chain.push(parent);
            cur = parent;
            if chain.len() > self.cells.len() {
                break;
            }
        }
        chain
    }

    /// Positions of all marked cells, row-major.
    pub fn marked(&self) -> Vec<Pos> {
        self.dims
            .ids()
            .filter(|id| self.cells[id.index()].marked)
            .map(|id| self.dims.pos(id))
            .collect()
    }
}
