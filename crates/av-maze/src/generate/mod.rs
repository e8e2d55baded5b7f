//! Perfect-maze generators.
//!
//! Every generator starts from a grid with all walls closed (the dispatcher
//! resets it) and finishes with a spanning tree: connected, with exactly
//! `cols * rows - 1` open walls.

pub mod backtrack;
pub mod division;
pub mod row;
pub mod spanning;
pub mod walk;

use std::fmt;
use std::str::FromStr;

use av_core::{CellId, Direction, Grid, StepRng, Tracer};

pub use row::Corner;

use crate::{MazeCtx, MazeError, MazeResult};

// ── Neighbour helpers ─────────────────────────────────────────────────────────

/// In-grid neighbours of `id` with their direction, N, S, W, E.
pub(crate) fn all_neighbors(grid: &Grid, id: CellId) -> Vec<(Direction, CellId)> {
    grid.dims().neighbors(id).collect()
}

pub(crate) fn unvisited_neighbors(grid: &Grid, id: CellId) -> Vec<CellId> {
    grid.dims().neighbors(id).map(|(_, n)| n).filter(|&n| !grid.is_visited(n)).collect()
}

pub(crate) fn visited_neighbors(grid: &Grid, id: CellId) -> Vec<CellId> {
    grid.dims().neighbors(id).map(|(_, n)| n).filter(|&n| grid.is_visited(n)).collect()
}

// ── Catalogue ─────────────────────────────────────────────────────────────────

/// Every maze generator the library implements.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum MazeAlgorithm {
    AldousBroder,
    BinaryTree(Corner),
    Eller,
    GrowingTree,
    HuntAndKill,
    Kruskal,
    Prim,
    Backtracker,
    BacktrackerDoubled,
    RecursiveDivision,
    Sidewinder,
    Wilson,
}

impl MazeAlgorithm {
    pub const ALL: [MazeAlgorithm; 15] = [
        MazeAlgorithm::AldousBroder,
        MazeAlgorithm::BinaryTree(Corner::NorthWest),
        MazeAlgorithm::BinaryTree(Corner::NorthEast),
        MazeAlgorithm::BinaryTree(Corner::SouthWest),
        MazeAlgorithm::BinaryTree(Corner::SouthEast),
        MazeAlgorithm::Eller,
        MazeAlgorithm::GrowingTree,
        MazeAlgorithm::HuntAndKill,
        MazeAlgorithm::Kruskal,
        MazeAlgorithm::Prim,
        MazeAlgorithm::Backtracker,
        MazeAlgorithm::BacktrackerDoubled,
        MazeAlgorithm::RecursiveDivision,
        MazeAlgorithm::Sidewinder,
        MazeAlgorithm::Wilson,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            MazeAlgorithm::AldousBroder                    => "aldous-broder",
            MazeAlgorithm::BinaryTree(Corner::NorthWest)   => "binary-tree-nw",
            MazeAlgorithm::BinaryTree(Corner::NorthEast)   => "binary-tree-ne",
            MazeAlgorithm::BinaryTree(Corner::SouthWest)   => "binary-tree-sw",
            MazeAlgorithm::BinaryTree(Corner::SouthEast)   => "binary-tree-se",
            MazeAlgorithm::Eller                           => "eller",
            MazeAlgorithm::GrowingTree                     => "growing-tree",
            MazeAlgorithm::HuntAndKill                     => "hunt-and-kill",
            MazeAlgorithm::Kruskal                         => "kruskal",
            MazeAlgorithm::Prim                            => "prim",
            MazeAlgorithm::Backtracker                     => "backtracker",
            MazeAlgorithm::BacktrackerDoubled              => "backtracker-doubled",
            MazeAlgorithm::RecursiveDivision               => "recursive-division",
            MazeAlgorithm::Sidewinder                      => "sidewinder",
            MazeAlgorithm::Wilson                          => "wilson",
        }
    }

    fn carve(self, grid: &mut Grid, ctx: &mut MazeCtx<'_>) -> MazeResult<()> {
        match self {
            MazeAlgorithm::AldousBroder       => walk::aldous_broder(grid, ctx),
            MazeAlgorithm::BinaryTree(corner) => row::binary_tree(grid, corner, ctx),
            MazeAlgorithm::Eller              => row::eller(grid, ctx),
            MazeAlgorithm::GrowingTree        => backtrack::growing_tree(grid, ctx),
            MazeAlgorithm::HuntAndKill        => backtrack::hunt_and_kill(grid, ctx),
            MazeAlgorithm::Kruskal            => spanning::kruskal(grid, ctx),
            MazeAlgorithm::Prim               => spanning::prim(grid, ctx),
            MazeAlgorithm::Backtracker        => backtrack::backtracker(grid, ctx),
            MazeAlgorithm::BacktrackerDoubled => backtrack::backtracker_doubled(grid, ctx),
            MazeAlgorithm::RecursiveDivision  => division::recursive_division(grid, ctx),
            MazeAlgorithm::Sidewinder         => row::sidewinder(grid, ctx),
            MazeAlgorithm::Wilson             => walk::wilson(grid, ctx),
        }
    }
}

impl fmt::Display for MazeAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for MazeAlgorithm {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        MazeAlgorithm::ALL
            .into_iter()
            .find(|a| a.name() == wanted)
            .ok_or_else(|| MazeError::UnknownAlgorithm(s.to_owned()))
    }
}

// ── Run ───────────────────────────────────────────────────────────────────────

/// Outcome of a completed generation run.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct GenerateReport {
    /// Steps delivered to the observer, excluding `Done`.
    pub steps: u64,
}

/// Carve a perfect maze into `grid`, reporting every step through `tracer`
/// and finishing with `Done`.  Any existing passages are closed first.
///
/// # Errors
/// - [`MazeError::InvalidInput`] if the grid has fewer than two cells or its
///   dimensions disagree with its cell count.
/// - [`MazeError::Step`] if the observer fails or the run is cancelled.
pub fn generate(
    algorithm: MazeAlgorithm,
    grid:      &mut Grid,
    rng:       StepRng,
    tracer:    Tracer<'_>,
) -> MazeResult<GenerateReport> {
    grid.check_shape().map_err(|err| MazeError::InvalidInput(err.to_string()))?;
    if grid.len() < 2 {
        return Err(MazeError::InvalidInput(format!(
            "a maze needs at least two cells, got {}x{}",
            grid.cols(),
            grid.rows()
        )));
    }
    tracing::debug!(algorithm = algorithm.name(), cols = grid.cols(), rows = grid.rows(), "generation started");

    grid.reset();
    let mut ctx = MazeCtx::new(tracer, rng);
    algorithm.carve(grid, &mut ctx)?;
    let steps = ctx.finish()?;

    tracing::debug!(algorithm = algorithm.name(), steps, "generation finished");
    Ok(GenerateReport { steps })
}
