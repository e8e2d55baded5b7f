//! `av-maze`: step-emitting perfect-maze generators and maze solvers for
//! the `algovis` library.
//!
//! # Run protocol
//!
//! ```text
//! generate(algorithm, grid, rng, tracer):
//!   ① Validate:  at least two cells.
//!   ② Reset:     every wall closed, every cell unvisited.
//!   ③ Carve:     one step per wall opened (or closed, for recursive
//!                 division) and per notable scan / backtrack.
//!   ④ Finish:    `Done`; the grid is now a spanning tree.
//!
//! solve(algorithm, path_grid, start, goal, rng, tracer):
//!   ① Validate:  two cells, both endpoints inside, start != goal.
//!   ② Explore:   one `Explore` step per processed cell.
//!   ③ Trace:     one `Trace` step per cell on the goal → start chain.
//!   ④ Finish:    `Done`; the path is returned start → goal.
//! ```
//!
//! # Modules
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`generate`] | `MazeAlgorithm` catalogue and the 12 generator families   |
//! | [`solve`]    | `SolveAlgorithm` catalogue and the 7 solvers              |
//! | [`ctx`]      | `MazeCtx`, the per-run RNG and step emitter               |
//! | [`error`]    | `MazeError`                                               |

pub mod ctx;
pub mod error;
pub mod generate;
pub mod solve;

#[cfg(test)]
mod tests;

pub use ctx::MazeCtx;
pub use error::{MazeError, MazeResult};
pub use generate::{generate, Corner, GenerateReport, MazeAlgorithm};
pub use solve::{solve, Solution, SolveAlgorithm};
