//! Unit tests for av-maze.

use std::collections::VecDeque;

use av_core::{
    CancelToken, Grid, NoopObserver, ObserverError, PathGrid, Pos, Recorder, SearchPhase, Speed, StepError,
    StepEvent, StepRng, StepSnapshot, Tracer,
};

use crate::{
    generate, solve, Corner, GenerateReport, MazeAlgorithm, MazeError, MazeResult, Solution, SolveAlgorithm,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

const SEED: u64 = 42;

fn carve(algorithm: MazeAlgorithm, cols: u32, rows: u32, seed: u64) -> Grid {
    let mut grid = Grid::new(cols, rows).unwrap();
    let mut observer = NoopObserver;
    let tracer = Tracer::new(&mut observer, Speed::Unthrottled);
    generate(algorithm, &mut grid, StepRng::new(seed), tracer).unwrap();
    grid
}

fn carve_recorded(algorithm: MazeAlgorithm, grid: &mut Grid) -> (MazeResult<GenerateReport>, Recorder) {
    let mut recorder = Recorder::new();
    let result = {
        let tracer = Tracer::new(&mut recorder, Speed::Unthrottled);
        generate(algorithm, grid, StepRng::new(SEED), tracer)
    };
    (result, recorder)
}

fn run_solver(
    algorithm: SolveAlgorithm,
    grid: &mut PathGrid,
    start: Pos,
    goal: Pos,
) -> (MazeResult<Solution>, Recorder) {
    let mut recorder = Recorder::new();
    let result = {
        let tracer = Tracer::new(&mut recorder, Speed::Unthrottled);
        solve(algorithm, grid, start, goal, StepRng::new(SEED), tracer)
    };
    (result, recorder)
}

/// Edge distance between two cells, by an independent BFS over the walls.
fn distance(grid: &Grid, start: Pos, goal: Pos) -> Option<usize> {
    let dims = grid.dims();
    let (from, to) = (dims.id(start)?, dims.id(goal)?);
    let mut dist = vec![None; grid.len()];
    dist[from.index()] = Some(0);
    let mut queue = VecDeque::from([from]);
    while let Some(cur) = queue.pop_front() {
        let d = dist[cur.index()]?;
        for n in grid.open_neighbors(cur) {
            if dist[n.index()].is_none() {
                dist[n.index()] = Some(d + 1);
                queue.push_back(n);
            }
        }
    }
    dist[to.index()]
}

fn assert_valid_path(grid: &Grid, path: &[Pos], start: Pos, goal: Pos) {
    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last(), Some(&goal));
    let dims = grid.dims();
    for pair in path.windows(2) {
        let (a, b) = (dims.id(pair[0]).unwrap(), dims.id(pair[1]).unwrap());
        assert!(grid.is_open(a, b), "path crosses a wall between {} and {}", pair[0], pair[1]);
    }
}

fn corners(grid: &Grid) -> (Pos, Pos) {
    (Pos::new(0, 0), Pos::new(grid.cols() - 1, grid.rows() - 1))
}

// ── Catalogue ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod catalogue {
    use super::*;

    #[test]
    fn generator_names_round_trip() {
        let mut seen = std::collections::HashSet::new();
        for a in MazeAlgorithm::ALL {
            assert!(seen.insert(a.name()));
            assert_eq!(a.name().parse::<MazeAlgorithm>().unwrap(), a);
        }
        assert_eq!(MazeAlgorithm::ALL.len(), 15);
    }

    #[test]
    fn solver_names_round_trip() {
        for a in SolveAlgorithm::ALL {
            assert_eq!(a.to_string().parse::<SolveAlgorithm>().unwrap(), a);
        }
        assert_eq!("A*".parse::<SolveAlgorithm>().unwrap(), SolveAlgorithm::AStar);
        assert_eq!("Flood_Fill".parse::<SolveAlgorithm>().unwrap(), SolveAlgorithm::FloodFill);
    }

    #[test]
    fn unknown_names_error() {
        assert!(matches!("labyrinth".parse::<MazeAlgorithm>(), Err(MazeError::UnknownAlgorithm(_))));
        assert!(matches!("teleport".parse::<SolveAlgorithm>(), Err(MazeError::UnknownAlgorithm(_))));
        assert!(matches!("up".parse::<Corner>(), Err(MazeError::InvalidInput(_))));
    }

    #[test]
    fn corner_names_match_generator_suffixes() {
        for corner in Corner::ALL {
            let name = format!("binary-tree-{corner}");
            assert_eq!(name.parse::<MazeAlgorithm>().unwrap(), MazeAlgorithm::BinaryTree(corner));
        }
    }
}

// ── Generation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod generation {
    use super::*;

    const SIZES: [(u32, u32); 8] = [(1, 2), (2, 1), (2, 2), (1, 7), (7, 1), (5, 5), (7, 3), (12, 9)];

    #[test]
    fn every_generator_yields_a_perfect_maze() {
        for algorithm in MazeAlgorithm::ALL {
            for (cols, rows) in SIZES {
                for seed in 0..4 {
                    let grid = carve(algorithm, cols, rows, seed);
                    assert!(grid.is_perfect(), "{algorithm} {cols}x{rows} seed {seed} is not perfect:\n{grid}");
                    assert_eq!(grid.open_edge_count(), grid.len() - 1);
                }
            }
        }
    }

    #[test]
    fn binary_tree_nw_has_open_top_row_and_left_column() {
        let grid = carve(MazeAlgorithm::BinaryTree(Corner::NorthWest), 4, 4, SEED);
        let dims = grid.dims();
        for x in 0..3 {
            let (a, b) = (dims.id(Pos::new(x, 0)).unwrap(), dims.id(Pos::new(x + 1, 0)).unwrap());
            assert!(grid.is_open(a, b), "top row closed between x={x} and x={}", x + 1);
        }
        for y in 0..3 {
            let (a, b) = (dims.id(Pos::new(0, y)).unwrap(), dims.id(Pos::new(0, y + 1)).unwrap());
            assert!(grid.is_open(a, b), "left column closed between y={y} and y={}", y + 1);
        }
    }

    #[test]
    fn sidewinder_top_row_is_a_corridor() {
        let grid = carve(MazeAlgorithm::Sidewinder, 6, 4, SEED);
        let row: Vec<_> = grid.dims().row(0).collect();
        assert!(row.windows(2).all(|p| grid.is_open(p[0], p[1])));
    }

    #[test]
    fn every_cell_is_visited_afterwards() {
        for algorithm in MazeAlgorithm::ALL {
            let grid = carve(algorithm, 6, 5, SEED);
            assert!(grid.cells().iter().all(|c| c.visited), "{algorithm} left cells unvisited");
        }
    }

    #[test]
    fn existing_passages_are_discarded() {
        let mut grid = Grid::new(5, 5).unwrap();
        grid.open_interior();
        let (result, _) = carve_recorded(MazeAlgorithm::Prim, &mut grid);
        result.unwrap();
        assert!(grid.is_perfect());
    }

    #[test]
    fn same_seed_same_maze() {
        for algorithm in MazeAlgorithm::ALL {
            assert_eq!(carve(algorithm, 8, 6, 9), carve(algorithm, 8, 6, 9), "{algorithm}");
        }
    }

    #[test]
    fn steps_end_with_done_and_match_report() {
        for algorithm in MazeAlgorithm::ALL {
            let mut grid = Grid::new(5, 4).unwrap();
            let (result, recorder) = carve_recorded(algorithm, &mut grid);
            let report = result.unwrap();
            assert!(recorder.finished(), "{algorithm}");
            assert_eq!(recorder.len() as u64, report.steps + 1);
            assert_eq!(recorder.steps.iter().filter(|s| s.is_done()).count(), 1);
            assert!(recorder.steps[..recorder.len() - 1]
                .iter()
                .all(|s| matches!(s, StepSnapshot::Carve { .. })));
        }
    }

    #[test]
    fn hunt_and_kill_reports_scanned_rows() {
        let mut grid = Grid::new(8, 8).unwrap();
        let (result, recorder) = carve_recorded(MazeAlgorithm::HuntAndKill, &mut grid);
        result.unwrap();
        let scans = recorder
            .steps
            .iter()
            .filter(|s| matches!(s, StepSnapshot::Carve { marks, .. } if marks.scan_row.is_some()))
            .count();
        assert!(scans > 0);
    }

    #[test]
    fn wilson_reports_walk_endpoints() {
        let mut grid = Grid::new(6, 6).unwrap();
        let (result, recorder) = carve_recorded(MazeAlgorithm::Wilson, &mut grid);
        result.unwrap();
        assert!(recorder
            .steps
            .iter()
            .any(|s| matches!(s, StepSnapshot::Carve { marks, .. } if marks.walk_start.is_some())));
    }

    #[test]
    fn recursive_division_starts_open() {
        let mut grid = Grid::new(4, 4).unwrap();
        let (result, recorder) = carve_recorded(MazeAlgorithm::RecursiveDivision, &mut grid);
        result.unwrap();
        let StepSnapshot::Carve { grid: first, .. } = &recorder.steps[0] else {
            panic!("expected a carve step first");
        };
        assert_eq!(first.open_edge_count(), 2 * 4 * 3);
    }

    #[test]
    fn single_cell_grid_is_rejected() {
        let mut grid = Grid::new(1, 1).unwrap();
        let (result, recorder) = carve_recorded(MazeAlgorithm::Kruskal, &mut grid);
        assert!(matches!(result, Err(MazeError::InvalidInput(_))));
        assert!(recorder.is_empty());
    }
}

// ── Solving ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod solving {
    use super::*;

    #[test]
    fn bfs_on_open_three_by_three_takes_four_edges() {
        let mut grid = Grid::new(3, 3).unwrap();
        grid.open_interior();
        let mut paths = PathGrid::from_grid(&grid);
        let (result, _) = run_solver(SolveAlgorithm::Bfs, &mut paths, Pos::new(0, 0), Pos::new(2, 2));
        let solution = result.unwrap();
        assert_eq!(solution.path.len(), 5);
        assert_eq!(solution.edges(), 4);
        assert_valid_path(&grid, &solution.path, Pos::new(0, 0), Pos::new(2, 2));
    }

    #[test]
    fn every_solver_finds_the_unique_path_of_a_perfect_maze() {
        for generator in [MazeAlgorithm::Backtracker, MazeAlgorithm::Kruskal, MazeAlgorithm::Eller] {
            let grid = carve(generator, 9, 7, SEED);
            let (start, goal) = corners(&grid);
            let expected = distance(&grid, start, goal).unwrap();
            for solver in SolveAlgorithm::ALL {
                let mut paths = PathGrid::from_grid(&grid);
                let (result, _) = run_solver(solver, &mut paths, start, goal);
                let solution = result.unwrap();
                assert_valid_path(&grid, &solution.path, start, goal);
                assert_eq!(solution.edges(), expected, "{solver} on {generator}");
            }
        }
    }

    #[test]
    fn optimal_solvers_are_shortest_on_open_grids() {
        let mut grid = Grid::new(6, 5).unwrap();
        grid.open_interior();
        let (start, goal) = (Pos::new(1, 4), Pos::new(5, 0));
        for solver in SolveAlgorithm::ALL {
            let mut paths = PathGrid::from_grid(&grid);
            let (result, _) = run_solver(solver, &mut paths, start, goal);
            let solution = result.unwrap();
            assert_valid_path(&grid, &solution.path, start, goal);
            if solver.is_optimal() {
                assert_eq!(solution.edges(), start.manhattan(goal) as usize, "{solver}");
            }
        }
    }

    #[test]
    fn marked_cells_are_exactly_the_path() {
        let grid = carve(MazeAlgorithm::Wilson, 8, 8, SEED);
        let (start, goal) = corners(&grid);
        for solver in SolveAlgorithm::ALL {
            let mut paths = PathGrid::from_grid(&grid);
            let (result, _) = run_solver(solver, &mut paths, start, goal);
            let mut path = result.unwrap().path;
            path.sort_by_key(|p| (p.y, p.x));
            assert_eq!(paths.marked(), path, "{solver}");
        }
    }

    #[test]
    fn trace_steps_walk_goal_to_start_then_done() {
        let grid = carve(MazeAlgorithm::Prim, 6, 6, SEED);
        let (start, goal) = corners(&grid);
        for solver in SolveAlgorithm::ALL {
            let mut paths = PathGrid::from_grid(&grid);
            let (result, recorder) = run_solver(solver, &mut paths, start, goal);
            let solution = result.unwrap();
            let traced: Vec<Pos> = recorder
                .steps
                .iter()
                .filter_map(|s| match s {
                    StepSnapshot::Search { current, phase: SearchPhase::Trace, .. } => *current,
                    _ => None,
                })
                .collect();
            let mut expected = solution.path.clone();
            expected.reverse();
            assert_eq!(traced, expected, "{solver}");
            assert!(recorder.finished());
            assert_eq!(recorder.len() as u64, solution.steps + 1);
        }
    }

    #[test]
    fn a_star_expands_the_start_first() {
        let mut grid = Grid::new(4, 1).unwrap();
        grid.open_interior();
        let mut paths = PathGrid::from_grid(&grid);
        let (result, recorder) = run_solver(SolveAlgorithm::AStar, &mut paths, Pos::new(0, 0), Pos::new(3, 0));
        assert_eq!(result.unwrap().edges(), 3);
        assert!(matches!(
            &recorder.steps[0],
            StepSnapshot::Search { current: Some(p), phase: SearchPhase::Explore, .. } if *p == Pos::new(0, 0)
        ));
    }

    #[test]
    fn search_state_is_cleared_between_runs() {
        let grid = carve(MazeAlgorithm::GrowingTree, 5, 5, SEED);
        let (start, goal) = corners(&grid);
        let mut paths = PathGrid::from_grid(&grid);
        let (first, _) = run_solver(SolveAlgorithm::Dfs, &mut paths, start, goal);
        let (second, _) = run_solver(SolveAlgorithm::Bfs, &mut paths, start, goal);
        assert_eq!(first.unwrap().path, second.unwrap().path);
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod validation {
    use super::*;

    #[test]
    fn endpoints_outside_the_grid_are_rejected() {
        let mut paths = PathGrid::from_grid(&Grid::new(3, 3).unwrap());
        let (result, recorder) = run_solver(SolveAlgorithm::Bfs, &mut paths, Pos::new(0, 0), Pos::new(3, 1));
        assert!(matches!(result, Err(MazeError::OutOfBounds(p)) if p == Pos::new(3, 1)));
        assert!(recorder.is_empty());
    }

    #[test]
    fn identical_endpoints_are_rejected() {
        let mut paths = PathGrid::from_grid(&Grid::new(3, 3).unwrap());
        let (result, _) = run_solver(SolveAlgorithm::AStar, &mut paths, Pos::new(1, 1), Pos::new(1, 1));
        assert!(matches!(result, Err(MazeError::SameEndpoints(_))));
    }

    #[test]
    fn single_cell_path_grid_is_rejected() {
        let mut paths = PathGrid::from_grid(&Grid::new(1, 1).unwrap());
        let (result, _) = run_solver(SolveAlgorithm::Dijkstra, &mut paths, Pos::new(0, 0), Pos::new(0, 0));
        assert!(matches!(result, Err(MazeError::InvalidInput(_))));
    }

    #[test]
    fn walled_off_goal_is_unreachable_for_every_solver() {
        let grid = Grid::new(4, 3).unwrap();
        for solver in SolveAlgorithm::ALL {
            let mut paths = PathGrid::from_grid(&grid);
            let (result, recorder) = run_solver(solver, &mut paths, Pos::new(0, 0), Pos::new(3, 2));
            assert!(
                matches!(result, Err(MazeError::Unreachable { start, goal })
                    if start == Pos::new(0, 0) && goal == Pos::new(3, 2)),
                "{solver}"
            );
            assert!(!recorder.finished());
        }
    }
}

// ── Persisted grids ───────────────────────────────────────────────────────────

#[cfg(test)]
mod persisted {
    use super::*;

    /// `grid` as JSON with its dimensions replaced by `cols x rows`.
    fn with_dims<T: serde::Serialize>(grid: &T, cols: u32, rows: u32) -> serde_json::Value {
        let mut value = serde_json::to_value(grid).unwrap();
        value["dims"] = serde_json::json!({ "cols": cols, "rows": rows });
        value
    }

    #[test]
    fn saved_maze_reloads_and_solves() {
        let grid = carve(MazeAlgorithm::Prim, 6, 4, SEED);
        let reloaded: Grid = serde_json::from_str(&serde_json::to_string(&grid).unwrap()).unwrap();
        assert_eq!(reloaded, grid);

        let mut paths: PathGrid =
            serde_json::from_value(serde_json::to_value(PathGrid::from_grid(&reloaded)).unwrap()).unwrap();
        let (result, _) = run_solver(SolveAlgorithm::Bfs, &mut paths, Pos::new(0, 0), Pos::new(5, 3));
        assert_eq!(result.unwrap().path.last(), Some(&Pos::new(5, 3)));
    }

    #[test]
    fn grid_with_mismatched_dims_is_refused() {
        let value = with_dims(&Grid::new(2, 2).unwrap(), 3, 3);
        assert!(serde_json::from_value::<Grid>(value).is_err());

        let value = with_dims(&Grid::new(2, 2).unwrap(), 0, 4);
        assert!(serde_json::from_value::<Grid>(value).is_err());
    }

    #[test]
    fn path_grid_with_mismatched_dims_is_refused() {
        let paths = PathGrid::from_grid(&Grid::new(2, 2).unwrap());
        assert!(serde_json::from_value::<PathGrid>(with_dims(&paths, 3, 3)).is_err());
    }

    #[test]
    fn reloaded_grid_still_generates() {
        let value = serde_json::to_value(Grid::new(5, 5).unwrap()).unwrap();
        let mut grid: Grid = serde_json::from_value(value).unwrap();
        let (result, recorder) = carve_recorded(MazeAlgorithm::Backtracker, &mut grid);
        assert!(result.is_ok());
        assert!(recorder.finished());
        assert!(grid.is_perfect());
    }
}

// ── Run contract ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod contract {
    use super::*;

    #[test]
    fn observer_error_aborts_generation() {
        let mut grid = Grid::new(5, 5).unwrap();
        let mut seen = 0;
        let mut observer = |_: &StepEvent<'_>| -> Result<(), ObserverError> {
            seen += 1;
            if seen == 4 { Err("display closed".into()) } else { Ok(()) }
        };
        let tracer = Tracer::new(&mut observer, Speed::Unthrottled);
        let result = generate(MazeAlgorithm::Backtracker, &mut grid, StepRng::new(SEED), tracer);
        assert!(matches!(result, Err(MazeError::Step(StepError::Observer(_)))));
    }

    #[test]
    fn cancelled_solve_stops_before_the_first_step() {
        let grid = carve(MazeAlgorithm::Sidewinder, 5, 5, SEED);
        let mut paths = PathGrid::from_grid(&grid);
        let token = CancelToken::new();
        token.cancel();
        let mut recorder = Recorder::new();
        let result = {
            let tracer = Tracer::new(&mut recorder, Speed::Unthrottled).with_cancel(token);
            solve(SolveAlgorithm::Bfs, &mut paths, Pos::new(0, 0), Pos::new(4, 4), StepRng::new(SEED), tracer)
        };
        assert!(matches!(result, Err(MazeError::Step(StepError::Cancelled { after_steps: 0 }))));
        assert!(recorder.is_empty());
    }

    #[test]
    fn generated_maze_survives_a_wall_round_trip() {
        let grid = carve(MazeAlgorithm::Eller, 7, 4, SEED);
        let restored = Grid::from_walls(7, 4, &grid.walls()).unwrap();
        assert!(restored.is_perfect());
        assert_eq!(restored.walls(), grid.walls());
    }
}
