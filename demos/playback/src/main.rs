//! playback: plays one sort, one maze generation, and one solve in the
//! terminal through the public `av-run` API.
//!
//! ```text
//! playback [SORT] [GENERATOR] [SOLVER] [SPEED]
//! playback quick-dual-pivot wilson a-star fastest
//! RUST_LOG=av_sort=debug playback
//! ```

use std::fmt::Write as _;

use anyhow::{bail, Context, Result};
use tracing_subscriber::EnvFilter;

use av_core::{Dataset, Grid, PathGrid, Pos, Record, RunConfig, Speed, StepEvent, StepRng, StepSnapshot};
use av_maze::{MazeAlgorithm, SolveAlgorithm};
use av_run::{run_algorithm, OwnedStructure, RunReport, Runner, Structure};
use av_sort::SortAlgorithm;

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:         u64 = 42;
const RECORDS:      usize = 24;
const BAR_WIDTH:    usize = 40;
const MAZE_COLS:    u32 = 16;
const MAZE_ROWS:    u32 = 8;
/// Print every n-th sort step so the terminal keeps up.
const FRAME_STRIDE: u64 = 8;

// ── Rendering ─────────────────────────────────────────────────────────────────

fn bars(records: &[Record]) -> String {
    let mut out = String::new();
    for r in records {
        let len = ((r.ratio * BAR_WIDTH as f32).round() as usize).max(1);
        let _ = writeln!(out, "{:>4} {}", r.value, "#".repeat(len));
    }
    out
}

/// The maze with `*` on every cell of `path`.
fn render_path(grid: &Grid, path: &[Pos]) -> String {
    let mut out = String::from("+");
    out.push_str(&"--+".repeat(grid.cols() as usize));
    out.push('\n');
    for y in 0..grid.rows() {
        let mut body = String::from("|");
        let mut floor = String::from("+");
        for id in grid.dims().row(y) {
            let walls = grid.cell(id).walls;
            let glyph = if path.contains(&grid.pos(id)) { " *" } else { "  " };
            body.push_str(glyph);
            body.push(if walls.right() { '|' } else { ' ' });
            floor.push_str(if walls.bottom() { "--+" } else { "  +" });
        }
        out.push_str(&body);
        out.push('\n');
        out.push_str(&floor);
        out.push('\n');
    }
    out
}

// ── Phases ────────────────────────────────────────────────────────────────────

fn play_sort(algorithm: SortAlgorithm, config: &RunConfig) -> Result<()> {
    if algorithm.is_unbounded() {
        bail!("{algorithm} may never finish; pick a bounded sort for playback");
    }
    let data = Dataset::shuffled(RECORDS, &mut StepRng::new(config.seed));
    println!("── sort: {algorithm} ({RECORDS} records, {}) ──", config.order);

    let mut steps = Runner::new(algorithm).config(config.clone()).iter(OwnedStructure::Dataset(data));
    let mut index = 0u64;
    for step in steps.by_ref() {
        if let StepSnapshot::Sort { records, counters, .. } = &step {
            if index % FRAME_STRIDE == 0 {
                println!("step {index:>5}  swaps {:>5}  aux {:>5}", counters.swaps, counters.aux);
                print!("{}", bars(records));
            }
        }
        index += 1;
    }
    let (report, _) = steps.finish()?;
    if let RunReport::Sort(report) = report {
        println!(
            "done: {} steps, {} swaps, {} aux operations\n",
            report.steps, report.counters.swaps, report.counters.aux
        );
    }
    Ok(())
}

fn play_maze(generator: MazeAlgorithm, solver: SolveAlgorithm, config: &RunConfig) -> Result<()> {
    println!("── maze: {generator} ({MAZE_COLS}x{MAZE_ROWS}) ──");
    let mut grid = Grid::new(MAZE_COLS, MAZE_ROWS)?;
    let mut carved = 0u64;
    let mut count_carves = |event: &StepEvent<'_>| -> Result<(), av_core::ObserverError> {
        if matches!(event, StepEvent::Carve(_)) {
            carved += 1;
        }
        Ok(())
    };
    run_algorithm(generator.into(), Structure::Grid(&mut grid), config, &mut count_carves)?;
    print!("{grid}");
    println!("carved in {carved} steps\n");

    let start = Pos::new(0, 0);
    let goal = Pos::new(MAZE_COLS - 1, MAZE_ROWS - 1);
    println!("── solve: {solver} {start} → {goal} ──");
    let mut paths = PathGrid::from_grid(&grid);
    let report = run_algorithm(
        solver.into(),
        Structure::Path { grid: &mut paths, start, goal },
        config,
        &mut av_core::NoopObserver,
    )?;
    let RunReport::Solve(solution) = report else {
        bail!("solver returned a non-solve report");
    };
    print!("{}", render_path(&grid, &solution.path));
    println!("path: {} moves, {} steps", solution.edges(), solution.steps);
    Ok(())
}

// ── Main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let mut args = std::env::args().skip(1);
    let sort: SortAlgorithm = args.next().as_deref().unwrap_or("quick-hoare").parse().context("sort")?;
    let generator: MazeAlgorithm = args.next().as_deref().unwrap_or("backtracker").parse().context("generator")?;
    let solver: SolveAlgorithm = args.next().as_deref().unwrap_or("a-star").parse().context("solver")?;
    let speed: Speed = args.next().as_deref().unwrap_or("fastest").parse().context("speed")?;

    let config = RunConfig { speed, seed: SEED, ..RunConfig::default() };
    tracing::info!(%sort, %generator, %solver, %speed, "playback starting");

    play_sort(sort, &config)?;
    // Mazes are drawn once finished; no need to pace their steps.
    play_maze(generator, solver, &config.clone().with_speed(Speed::Unthrottled))?;
    Ok(())
}
