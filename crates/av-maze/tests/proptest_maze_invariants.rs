//! Property-based invariant tests for maze generation and solving.
//!
//! 1. Every generator carves a spanning tree on any grid size and seed.
//! 2. Every solver returns a contiguous open path from start to goal.
//! 3. BFS, Dijkstra, A* and flood fill return shortest paths, loops included.
//! 4. Every run ends with exactly one `Done`.

use std::collections::VecDeque;

use av_core::{Grid, NoopObserver, PathGrid, Pos, Recorder, Speed, StepRng, Tracer};
use av_maze::{generate, solve, MazeAlgorithm, SolveAlgorithm};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn any_generator() -> impl Strategy<Value = MazeAlgorithm> {
    proptest::sample::select(MazeAlgorithm::ALL.to_vec())
}

fn any_solver() -> impl Strategy<Value = SolveAlgorithm> {
    proptest::sample::select(SolveAlgorithm::ALL.to_vec())
}

/// Grid size with at least two cells.
fn any_size() -> impl Strategy<Value = (u32, u32)> {
    (1u32..=12, 1u32..=12).prop_filter("needs two cells", |&(c, r)| c * r >= 2)
}

fn carve(algorithm: MazeAlgorithm, cols: u32, rows: u32, seed: u64) -> Grid {
    let mut grid = Grid::new(cols, rows).unwrap();
    let mut observer = NoopObserver;
    let tracer = Tracer::new(&mut observer, Speed::Unthrottled);
    generate(algorithm, &mut grid, StepRng::new(seed), tracer).unwrap();
    grid
}

/// Two distinct in-grid positions picked from raw indices.
fn endpoints(cols: u32, rows: u32, a: u32, b: u32) -> (Pos, Pos) {
    let len = cols * rows;
    let from = a % len;
    let mut to = b % len;
    if to == from {
        to = (to + 1) % len;
    }
    (Pos::new(from % cols, from / cols), Pos::new(to % cols, to / cols))
}

fn shortest(grid: &Grid, start: Pos, goal: Pos) -> usize {
    let dims = grid.dims();
    let mut dist = vec![usize::MAX; grid.len()];
    let from = dims.id(start).unwrap();
    dist[from.index()] = 0;
    let mut queue = VecDeque::from([from]);
    while let Some(cur) = queue.pop_front() {
        for n in grid.open_neighbors(cur) {
            if dist[n.index()] == usize::MAX {
                dist[n.index()] = dist[cur.index()] + 1;
                queue.push_back(n);
            }
        }
    }
    dist[dims.id(goal).unwrap().index()]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Spanning tree
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn generators_carve_spanning_trees(algorithm in any_generator(), (cols, rows) in any_size(), seed in any::<u64>()) {
        let grid = carve(algorithm, cols, rows, seed);
        prop_assert!(grid.is_connected(), "{} {}x{} disconnected", algorithm, cols, rows);
        prop_assert_eq!(grid.open_edge_count(), grid.len() - 1);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2–3. Path validity and optimality
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn solver_paths_are_open_and_contiguous(
        generator in any_generator(),
        solver in any_solver(),
        (cols, rows) in any_size(),
        (a, b) in (any::<u32>(), any::<u32>()),
        seed in any::<u64>(),
    ) {
        let grid = carve(generator, cols, rows, seed);
        let (start, goal) = endpoints(cols, rows, a, b);
        let mut paths = PathGrid::from_grid(&grid);
        let mut observer = NoopObserver;
        let tracer = Tracer::new(&mut observer, Speed::Unthrottled);
        let solution = solve(solver, &mut paths, start, goal, StepRng::new(seed), tracer).unwrap();

        prop_assert_eq!(solution.path.first(), Some(&start));
        prop_assert_eq!(solution.path.last(), Some(&goal));
        let dims = grid.dims();
        for pair in solution.path.windows(2) {
            let (p, q) = (dims.id(pair[0]).unwrap(), dims.id(pair[1]).unwrap());
            prop_assert!(grid.is_open(p, q), "{} stepped through a wall at {}", solver, pair[0]);
        }
        // A perfect maze has exactly one simple path.
        prop_assert_eq!(solution.edges(), shortest(&grid, start, goal));
    }

    #[test]
    fn optimal_solvers_are_shortest_with_loops(
        solver in any_solver().prop_filter("optimal", |s| s.is_optimal()),
        (cols, rows) in any_size(),
        (a, b) in (any::<u32>(), any::<u32>()),
        seed in any::<u64>(),
        extra in proptest::collection::vec(any::<u32>(), 0..16),
    ) {
        // Braid a perfect maze by knocking out a few extra walls.
        let mut grid = carve(MazeAlgorithm::Backtracker, cols, rows, seed);
        let dims = grid.dims();
        for raw in extra {
            let id = av_core::CellId(raw % (cols * rows));
            if let Some((_, n)) = dims.neighbors(id).nth((raw / 7) as usize % 4) {
                grid.open_wall(id, n).unwrap();
            }
        }
        let (start, goal) = endpoints(cols, rows, a, b);
        let mut paths = PathGrid::from_grid(&grid);
        let mut observer = NoopObserver;
        let tracer = Tracer::new(&mut observer, Speed::Unthrottled);
        let solution = solve(solver, &mut paths, start, goal, StepRng::new(seed), tracer).unwrap();
        prop_assert_eq!(solution.edges(), shortest(&grid, start, goal), "{}", solver);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Terminal event
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn runs_end_with_a_single_done(
        generator in any_generator(),
        solver in any_solver(),
        (cols, rows) in any_size(),
        seed in any::<u64>(),
    ) {
        let mut grid = Grid::new(cols, rows).unwrap();
        let mut carved = Recorder::new();
        {
            let tracer = Tracer::new(&mut carved, Speed::Unthrottled);
            generate(generator, &mut grid, StepRng::new(seed), tracer).unwrap();
        }
        prop_assert!(carved.finished());
        prop_assert_eq!(carved.steps.iter().filter(|s| s.is_done()).count(), 1);

        let (start, goal) = endpoints(cols, rows, 0, cols * rows - 1);
        let mut paths = PathGrid::from_grid(&grid);
        let mut searched = Recorder::new();
        {
            let tracer = Tracer::new(&mut searched, Speed::Unthrottled);
            solve(solver, &mut paths, start, goal, StepRng::new(seed), tracer).unwrap();
        }
        prop_assert!(searched.finished());
        prop_assert_eq!(searched.steps.iter().filter(|s| s.is_done()).count(), 1);
    }
}
