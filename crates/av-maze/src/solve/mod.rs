//! Maze solvers.
//!
//! A solver explores a [`PathGrid`] from `start` until it expands `goal`,
//! reporting each processed cell.  It then follows `parent` links from the
//! goal back to the start, marks every cell on the way with one `Trace` step
//! each, and returns the path in start → goal order.  Neighbours are always
//! scanned north, south, west, east.

pub mod best_first;
pub mod flood;
pub mod traverse;

use std::fmt;
use std::str::FromStr;

use av_core::{PathGrid, Pos, SearchPhase, StepRng, Tracer};

use crate::{MazeCtx, MazeError, MazeResult};

type SolveFn = fn(&mut PathGrid, Pos, Pos, &mut MazeCtx<'_>) -> MazeResult<Vec<Pos>>;

// ── Catalogue ─────────────────────────────────────────────────────────────────

/// Every maze solver the library implements.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum SolveAlgorithm {
    AStar,
    Greedy,
    Bfs,
    Dfs,
    Dijkstra,
    Backtracker,
    FloodFill,
}

impl SolveAlgorithm {
    pub const ALL: [SolveAlgorithm; 7] = [
        SolveAlgorithm::AStar,
        SolveAlgorithm::Greedy,
        SolveAlgorithm::Bfs,
        SolveAlgorithm::Dfs,
        SolveAlgorithm::Dijkstra,
        SolveAlgorithm::Backtracker,
        SolveAlgorithm::FloodFill,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            SolveAlgorithm::AStar       => "a-star",
            SolveAlgorithm::Greedy      => "greedy",
            SolveAlgorithm::Bfs         => "bfs",
            SolveAlgorithm::Dfs         => "dfs",
            SolveAlgorithm::Dijkstra    => "dijkstra",
            SolveAlgorithm::Backtracker => "backtracker",
            SolveAlgorithm::FloodFill   => "flood-fill",
        }
    }

    /// `true` for solvers whose path is shortest on any maze, loops included.
    pub const fn is_optimal(self) -> bool {
        matches!(
            self,
            SolveAlgorithm::AStar | SolveAlgorithm::Bfs | SolveAlgorithm::Dijkstra | SolveAlgorithm::FloodFill
        )
    }

    fn entry(self) -> SolveFn {
        match self {
            SolveAlgorithm::AStar       => best_first::a_star,
            SolveAlgorithm::Greedy      => best_first::greedy,
            SolveAlgorithm::Bfs         => traverse::bfs,
            SolveAlgorithm::Dfs         => traverse::dfs,
            SolveAlgorithm::Dijkstra    => best_first::dijkstra,
            SolveAlgorithm::Backtracker => traverse::backtracker,
            SolveAlgorithm::FloodFill   => flood::flood_fill,
        }
    }
}

impl fmt::Display for SolveAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SolveAlgorithm {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        let wanted = if wanted == "astar" || wanted == "a*" { "a-star".to_owned() } else { wanted };
        SolveAlgorithm::ALL
            .into_iter()
            .find(|a| a.name() == wanted)
            .ok_or_else(|| MazeError::UnknownAlgorithm(s.to_owned()))
    }
}

// ── Path trace ────────────────────────────────────────────────────────────────

/// Walk `parent` links back from `goal`, marking and reporting each cell.
pub(crate) fn trace(grid: &mut PathGrid, start: Pos, goal: Pos, ctx: &mut MazeCtx<'_>) -> MazeResult<Vec<Pos>> {
    let dims = grid.dims();
    let from = dims.checked_id(start)?;
    let to = dims.checked_id(goal)?;

    let chain = grid.parent_chain(to);
    if chain.last() != Some(&from) {
        return Err(MazeError::Unreachable { start, goal });
    }
    for &id in &chain {
        grid.cell_mut(id).marked = true;
        ctx.search(grid, Some(id), SearchPhase::Trace)?;
    }
    Ok(chain.into_iter().rev().map(|id| dims.pos(id)).collect())
}

// ── Run ───────────────────────────────────────────────────────────────────────

/// A recovered path and the number of steps it took to find.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Solution {
    /// Cells from start to goal inclusive; consecutive cells are open
    /// neighbours.
    pub path:  Vec<Pos>,
    /// Steps delivered to the observer, excluding `Done`.
    pub steps: u64,
}

impl Solution {
    /// Number of moves along the path.
    pub fn edges(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Solve `grid` from `start` to `goal`, reporting every step through
/// `tracer` and finishing with `Done`.  Previous search state is cleared.
///
/// # Errors
/// - [`MazeError::InvalidInput`] if the grid has fewer than two cells or its
///   dimensions disagree with its cell count.
/// - [`MazeError::OutOfBounds`] if either endpoint lies outside the grid.
/// - [`MazeError::SameEndpoints`] if `start == goal`.
/// - [`MazeError::Unreachable`] if no open path joins the endpoints.
/// - [`MazeError::Step`] if the observer fails or the run is cancelled.
pub fn solve(
    algorithm: SolveAlgorithm,
    grid:      &mut PathGrid,
    start:     Pos,
    goal:      Pos,
    rng:       StepRng,
    tracer:    Tracer<'_>,
) -> MazeResult<Solution> {
    grid.check_shape().map_err(|err| MazeError::InvalidInput(err.to_string()))?;
    let dims = grid.dims();
    if grid.len() < 2 {
        return Err(MazeError::InvalidInput(format!(
            "a maze needs at least two cells, got {}x{}",
            dims.cols, dims.rows
        )));
    }
    for pos in [start, goal] {
        if !dims.contains(pos) {
            return Err(MazeError::OutOfBounds(pos));
        }
    }
    if start == goal {
        return Err(MazeError::SameEndpoints(start));
    }
    tracing::debug!(algorithm = algorithm.name(), %start, %goal, "solve started");

    grid.reset();
    let mut ctx = MazeCtx::new(tracer, rng);
    let path = algorithm.entry()(grid, start, goal, &mut ctx)?;
    let steps = ctx.finish()?;

    tracing::debug!(algorithm = algorithm.name(), steps, edges = path.len() - 1, "solve finished");
    Ok(Solution { path, steps })
}
