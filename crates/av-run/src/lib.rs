//! `av-run`: the single entry point of the `algovis` library.
//!
//! # Run lifecycle
//!
//! ```text
//! run_algorithm(algorithm, structure, config, observer):
//!   ① Match:     sort ↔ Dataset, generate ↔ Grid, solve ↔ Path;
//!                 anything else is RunError::Mismatch.
//!   ② Seed:      one StepRng from config.seed for the whole run.
//!   ③ Run:       the family's entry point emits every step through a
//!                 Tracer (observer, config.speed delay, cancel token).
//!   ④ Finish:    Done, then the family report.
//! ```
//!
//! Two ways to drive a run:
//!
//! | Style | API                                   | Threading                       |
//! |-------|---------------------------------------|---------------------------------|
//! | push  | [`run_algorithm`], [`Runner::run`]    | caller's thread, observer callback |
//! | pull  | [`Runner::iter`] → [`StepIter`]       | one worker, rendezvous channel  |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use av_core::{Grid, NoopObserver, PathGrid, Pos, RunConfig};
//! use av_maze::{MazeAlgorithm, SolveAlgorithm};
//! use av_run::{run_algorithm, Runner, Structure};
//!
//! let mut grid = Grid::new(16, 12)?;
//! let config = RunConfig::unthrottled(7);
//! run_algorithm(MazeAlgorithm::Wilson.into(), Structure::Grid(&mut grid), &config, &mut NoopObserver)?;
//!
//! let mut paths = PathGrid::from_grid(&grid);
//! let report = Runner::new(SolveAlgorithm::AStar)
//!     .config(config)
//!     .run(Structure::Path { grid: &mut paths, start: Pos::new(0, 0), goal: Pos::new(15, 11) }, &mut NoopObserver)?;
//! ```

pub mod algorithm;
pub mod error;
pub mod iter;
pub mod runner;
pub mod structure;

#[cfg(test)]
mod tests;

pub use algorithm::Algorithm;
pub use av_core::RunConfig;
pub use error::{RunError, RunResult};
pub use iter::StepIter;
pub use runner::{run_algorithm, RunReport, Runner};
pub use structure::{OwnedStructure, Structure};
