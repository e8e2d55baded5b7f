//! Rectangular cell grid shared by maze generation and solving.
//!
//! # Layout
//!
//! Cells are stored row-major in a dense `Vec`; the cell at `(x, y)` lives
//! at index `y * cols + x`.  Neighbour lookup is index arithmetic, so every
//! algorithm gets O(1) adjacency instead of scanning the whole collection.
//!
//! Walls are stored redundantly on both sides of each shared edge.
//! [`Grid::open_wall`] and [`Grid::close_wall`] always update both cells, so
//! the two copies never disagree.

use std::collections::VecDeque;
use std::fmt;

use crate::{CellId, CoreError, CoreResult};

// ── Pos ───────────────────────────────────────────────────────────────────────

/// Column/row coordinate of a cell.  `(0, 0)` is the top-left corner.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pos {
    pub x: u32,
    pub y: u32,
}

impl Pos {
    #[inline]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn manhattan(self, other: Pos) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    #[inline]
    pub fn euclidean(self, other: Pos) -> f64 {
        let dx = self.x.abs_diff(other.x) as f64;
        let dy = self.y.abs_diff(other.y) as f64;
        (dx * dx + dy * dy).sqrt()
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// One of the four grid directions.  North is towards row 0.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    North,
    South,
    West,
    East,
}

impl Direction {
    /// Neighbour scan order used everywhere ties are broken: N, S, W, E.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    #[inline]
    pub fn opposite(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::South => Direction::North,
            Direction::West  => Direction::East,
            Direction::East  => Direction::West,
        }
    }

    /// The wall on this side of a cell.
    #[inline]
    pub fn wall(self) -> Walls {
        match self {
            Direction::North => Walls::TOP,
            Direction::South => Walls::BOTTOM,
            Direction::West  => Walls::LEFT,
            Direction::East  => Walls::RIGHT,
        }
    }

    #[inline]
    fn delta(self) -> (i64, i64) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::West  => (-1, 0),
            Direction::East  => (1, 0),
        }
    }
}

// ── Walls ─────────────────────────────────────────────────────────────────────

/// Bit set of the four walls around a cell; a set bit means the wall is present.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Walls(pub u8);

impl Walls {
    pub const NONE:   Walls = Walls(0);
    pub const TOP:    Walls = Walls(0b0001);
    pub const BOTTOM: Walls = Walls(0b0010);
    pub const LEFT:   Walls = Walls(0b0100);
    pub const RIGHT:  Walls = Walls(0b1000);
    pub const ALL:    Walls = Walls(0b1111);

    #[inline]
    pub fn contains(self, other: Walls) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub fn insert(&mut self, other: Walls) {
        self.0 |= other.0;
    }

    #[inline]
    pub fn remove(&mut self, other: Walls) {
        self.0 &= !other.0;
    }

    #[inline]
    pub fn has(self, dir: Direction) -> bool {
        self.contains(dir.wall())
    }

    pub fn top(self) -> bool {
        self.contains(Walls::TOP)
    }

    pub fn bottom(self) -> bool {
        self.contains(Walls::BOTTOM)
    }

    pub fn left(self) -> bool {
        self.contains(Walls::LEFT)
    }

    pub fn right(self) -> bool {
        self.contains(Walls::RIGHT)
    }
}

impl Default for Walls {
    /// Cells start fully enclosed.
    fn default() -> Self {
        Walls::ALL
    }
}

// ── Dims ──────────────────────────────────────────────────────────────────────

/// Grid dimensions plus all coordinate arithmetic.  Shared by [`Grid`] and
/// [`PathGrid`][crate::PathGrid].
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dims {
    pub cols: u32,
    pub rows: u32,
}

impl Dims {
    pub fn new(cols: u32, rows: u32) -> CoreResult<Self> {
        if cols == 0 || rows == 0 {
            return Err(CoreError::InvalidInput(format!(
                "grid must have at least one row and column, got {cols}x{rows}"
            )));
        }
        Ok(Self { cols, rows })
    }

    #[inline]
    pub fn len(self) -> usize {
        self.cols as usize * self.rows as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// `InvalidInput` unless `len` cells fill exactly these dimensions.
    pub fn check_len(self, len: usize) -> CoreResult<()> {
        if len != self.len() {
            return Err(CoreError::InvalidInput(format!(
                "{}x{} grid needs {} cells, got {len}",
                self.cols, self.rows, self.len()
            )));
        }
        Ok(())
    }

    #[inline]
    pub fn contains(self, pos: Pos) -> bool {
        pos.x < self.cols && pos.y < self.rows
    }

    /// Cell id for `pos`, or `None` outside the grid.
    #[inline]
    pub fn id(self, pos: Pos) -> Option<CellId> {
        self.contains(pos)
            .then(|| CellId(pos.y * self.cols + pos.x))
    }

    /// Like [`id`][Self::id] but reports the offending position.
    pub fn checked_id(self, pos: Pos) -> CoreResult<CellId> {
        self.id(pos).ok_or(CoreError::OutOfBounds(pos))
    }

    #[inline]
    pub fn pos(self, id: CellId) -> Pos {
        Pos::new(id.0 % self.cols, id.0 / self.cols)
    }

    /// The cell one step from `id` in `dir`, if it exists.
    #[inline]
    pub fn neighbor(self, id: CellId, dir: Direction) -> Option<CellId> {
        let pos = self.pos(id);
        let (dx, dy) = dir.delta();
        let x = pos.x as i64 + dx;
        let y = pos.y as i64 + dy;
        if x < 0 || y < 0 || x >= self.cols as i64 || y >= self.rows as i64 {
            return None;
        }
        Some(CellId(y as u32 * self.cols + x as u32))
    }

    /// All in-grid neighbours of `id` in N, S, W, E order.
    pub fn neighbors(self, id: CellId) -> impl Iterator<Item = (Direction, CellId)> {
        Direction::ALL
            .into_iter()
            .filter_map(move |dir| self.neighbor(id, dir).map(|n| (dir, n)))
    }

    /// Direction from `a` to `b`, or `None` if they are not adjacent.
    pub fn direction(self, a: CellId, b: CellId) -> Option<Direction> {
        Direction::ALL
            .into_iter()
            .find(|&dir| self.neighbor(a, dir) == Some(b))
    }

    pub fn ids(self) -> impl Iterator<Item = CellId> {
        (0..self.len() as u32).map(CellId)
    }

    /// Ids of row `y`, left to right.
    pub fn row(self, y: u32) -> impl Iterator<Item = CellId> {
        let cols = self.cols;
        (0..cols).map(move |x| CellId(y * cols + x))
    }
}

// ── Cell ──────────────────────────────────────────────────────────────────────

/// One maze cell.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub pos:     Pos,
    pub walls:   Walls,
    pub visited: bool,
}

// ── Grid ──────────────────────────────────────────────────────────────────────

/// A `cols × rows` maze grid.
///
/// Deserialization goes through [`Grid::from_parts`], so a persisted grid
/// whose dimensions disagree with its cells is rejected instead of loaded.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "GridParts", into = "GridParts")
)]
pub struct Grid {
    dims:  Dims,
    cells: Vec<Cell>,
}

/// Unvalidated fields of a [`Grid`], as persisted.
#[derive(Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridParts {
    pub dims:  Dims,
    pub cells: Vec<Cell>,
}

impl TryFrom<GridParts> for Grid {
    type Error = CoreError;

    fn try_from(parts: GridParts) -> CoreResult<Self> {
        Grid::from_parts(parts)
    }
}

impl From<Grid> for GridParts {
    fn from(grid: Grid) -> Self {
        GridParts { dims: grid.dims, cells: grid.cells }
    }
}

impl Grid {
    /// A grid with every wall closed and nothing visited.
    pub fn new(cols: u32, rows: u32) -> CoreResult<Self> {
        let dims = Dims::new(cols, rows)?;
        let cells = dims
            .ids()
            .map(|id| Cell { pos: dims.pos(id), walls: Walls::ALL, visited: false })
            .collect();
        Ok(Self { dims, cells })
    }

    /// Rebuild a grid from a persisted wall layout (row-major).
    ///
    /// The layout must have exactly `cols * rows` entries and agree with
    /// itself on every shared edge and keep the outer border closed.
    pub fn from_walls(cols: u32, rows: u32, walls: &[Walls]) -> CoreResult<Self> {
        let mut grid = Self::new(cols, rows)?;
        if walls.len() != grid.len() {
            return Err(CoreError::InvalidInput(format!(
                "wall layout has {} cells, expected {}x{} = {}",
                walls.len(), cols, rows, grid.len()
            )));
        }
        for (cell, &w) in grid.cells.iter_mut().zip(walls) {
            cell.walls = w;
        }
        for id in grid.dims.ids() {
            for dir in Direction::ALL {
                let here = grid.cells[id.index()].walls.has(dir);
                match grid.dims.neighbor(id, dir) {
                    None if !here => {
                        return Err(CoreError::InvalidInput(format!(
                            "border wall missing at {}",
                            grid.dims.pos(id)
                        )));
                    }
                    Some(n) if grid.cells[n.index()].walls.has(dir.opposite()) != here => {
                        return Err(CoreError::InvalidInput(format!(
                            "walls disagree between {} and {}",
                            grid.dims.pos(id),
                            grid.dims.pos(n)
                        )));
                    }
                    _ => {}
                }
            }
        }
        Ok(grid)
    }

    /// Rebuild a grid from its raw fields, keeping visited flags.
    ///
    /// Rejects zero dimensions, a cell count other than `cols * rows`, a
    /// cell stored at the wrong position, and every layout
    /// [`from_walls`][Self::from_walls] rejects.
    pub fn from_parts(parts: GridParts) -> CoreResult<Self> {
        let GridParts { dims, cells } = parts;
        Dims::new(dims.cols, dims.rows)?.check_len(cells.len())?;
        let walls: Vec<Walls> = cells.iter().map(|c| c.walls).collect();
        let mut grid = Self::from_walls(dims.cols, dims.rows, &walls)?;
        for (slot, cell) in grid.cells.iter_mut().zip(&cells) {
            if slot.pos != cell.pos {
                return Err(CoreError::InvalidInput(format!(
                    "cell stored at {} belongs at {}",
                    slot.pos, cell.pos
                )));
            }
            slot.visited = cell.visited;
        }
        Ok(grid)
    }

    /// Confirm the dimensions are non-zero and match the cell count.
    pub fn check_shape(&self) -> CoreResult<()> {
        Dims::new(self.dims.cols, self.dims.rows)?.check_len(self.cells.len())
    }

    /// The persisted form accepted by [`from_walls`][Self::from_walls].
    pub fn walls(&self) -> Vec<Walls> {
        self.cells.iter().map(|c| c.walls).collect()
    }

    #[inline]
    pub fn dims(&self) -> Dims {
        self.dims
    }

    #[inline]
    pub fn cols(&self) -> u32 {
        self.dims.cols
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.dims.rows
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.index()]
    }

    /// Cell at `pos`, or `None` outside the grid.
    pub fn at(&self, pos: Pos) -> Option<&Cell> {
        self.dims.id(pos).map(|id| &self.cells[id.index()])
    }

    #[inline]
    pub fn pos(&self, id: CellId) -> Pos {
        self.dims.pos(id)
    }

    #[inline]
    pub fn is_visited(&self, id: CellId) -> bool {
        self.cells[id.index()].visited
    }

    #[inline]
    pub fn visit(&mut self, id: CellId) {
        self.cells[id.index()].visited = true;
    }

    /// Close every wall and clear every visited flag.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.walls = Walls::ALL;
            cell.visited = false;
        }
    }

    /// Remove every interior wall, keeping the outer border.
    pub fn open_interior(&mut self) {
        for id in self.dims.ids() {
            let mut walls = Walls::NONE;
            for dir in Direction::ALL {
                if self.dims.neighbor(id, dir).is_none() {
                    walls.insert(dir.wall());
                }
            }
            self.cells[id.index()].walls = walls;
        }
    }

    /// Remove the shared wall between two grid-adjacent cells.
    pub fn open_wall(&mut self, a: CellId, b: CellId) -> CoreResult<()> {
        let dir = self.adjacency(a, b)?;
        self.cells[a.index()].walls.remove(dir.wall());
        self.cells[b.index()].walls.remove(dir.opposite().wall());
        Ok(())
    }

    /// Restore the shared wall between two grid-adjacent cells.
    pub fn close_wall(&mut self, a: CellId, b: CellId) -> CoreResult<()> {
        let dir = self.adjacency(a, b)?;
        self.cells[a.index()].walls.insert(dir.wall());
        self.cells[b.index()].walls.insert(dir.opposite().wall());
        Ok(())
    }

    fn adjacency(&self, a: CellId, b: CellId) -> CoreResult<Direction> {
        self.dims.direction(a, b).ok_or_else(|| CoreError::NotAdjacent {
            a: self.dims.pos(a),
            b: self.dims.pos(b),
        })
    }

    /// `true` if `a` and `b` are adjacent with no wall between them.
    pub fn is_open(&self, a: CellId, b: CellId) -> bool {
        self.dims
            .direction(a, b)
            .is_some_and(|dir| !self.cells[a.index()].walls.has(dir))
    }

    /// Neighbours reachable from `id` without crossing a wall (N, S, W, E).
    pub fn open_neighbors(&self, id: CellId) -> impl Iterator<Item = CellId> + '_ {
        let walls = self.cells[id.index()].walls;
        self.dims
            .neighbors(id)
            .filter(move |&(dir, _)| !walls.has(dir))
            .map(|(_, n)| n)
    }

    /// Number of open interior edges (each shared edge counted once).
    pub fn open_edge_count(&self) -> usize {
        self.dims
            .ids()
            .map(|id| {
                [Direction::South, Direction::East]
                    .into_iter()
                    .filter(|&dir| {
                        self.dims.neighbor(id, dir).is_some()
                            && !self.cells[id.index()].walls.has(dir)
                    })
                    .count()
            })
            .sum()
    }

    /// `true` if every cell is reachable from cell 0 through open walls.
    pub fn is_connected(&self) -> bool {
        let mut seen = vec![false; self.len()];
        let mut queue = VecDeque::from([CellId(0)]);
        seen[0] = true;
        let mut reached = 1;
        while let Some(id) = queue.pop_front() {
            for n in self.open_neighbors(id) {
                if !seen[n.index()] {
                    seen[n.index()] = true;
                    reached += 1;
                    queue.push_back(n);
                }
            }
        }
        reached == self.len()
    }

    /// `true` if the open walls form a spanning tree: connected, with exactly
    /// `cols * rows - 1` open edges and therefore no cycles.
    pub fn is_perfect(&self) -> bool {
        self.open_edge_count() + 1 == self.len() && self.is_connected()
    }
}

impl fmt::Display for Grid {
    /// ASCII rendering, one character cell per maze cell plus wall glyphs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cols = self.cols();
        write!(f, "+")?;
        for _ in 0..cols {
            write!(f, "--+")?;
        }
        writeln!(f)?;
        for y in 0..self.rows() {
            write!(f, "|")?;
            for id in self.dims.row(y) {
                let w = self.cells[id.index()].walls;
                write!(f, "  {}", if w.right() { '|' } else { ' ' })?;
            }
            writeln!(f)?;
            write!(f, "+")?;
            for id in self.dims.row(y) {
                let w = self.cells[id.index()].walls;
                write!(f, "{}+", if w.bottom() { "--" } else { "  " })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
