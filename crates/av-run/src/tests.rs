//! Tests for av-run.

use av_core::{
    CancelToken, Dataset, Grid, NoopObserver, Order, PathGrid, Pos, Recorder, RunConfig, Speed, StepRng,
    StepSnapshot,
};
use av_maze::{MazeAlgorithm, SolveAlgorithm};
use av_sort::SortAlgorithm;

use crate::{run_algorithm, Algorithm, OwnedStructure, RunError, RunReport, Runner, Structure};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn config(seed: u64) -> RunConfig {
    RunConfig::unthrottled(seed)
}

fn shuffled(len: usize) -> Vec<av_core::Record> {
    Dataset::shuffled(len, &mut StepRng::new(3))
}

fn maze(cols: u32, rows: u32) -> Grid {
    let mut grid = Grid::new(cols, rows).unwrap();
    run_algorithm(MazeAlgorithm::Kruskal.into(), Structure::Grid(&mut grid), &config(5), &mut NoopObserver)
        .unwrap();
    grid
}

// ── Catalogue ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod catalogue {
    use super::*;

    #[test]
    fn all_covers_every_family() {
        let all: Vec<Algorithm> = Algorithm::all().collect();
        assert_eq!(all.len(), SortAlgorithm::ALL.len() + 15 + 7);
        assert!(all.contains(&Algorithm::Solve(SolveAlgorithm::FloodFill)));
    }

    #[test]
    fn qualified_names_round_trip() {
        for algorithm in Algorithm::all() {
            assert_eq!(algorithm.to_string().parse::<Algorithm>().unwrap(), algorithm);
        }
    }

    #[test]
    fn bare_unique_names_resolve() {
        assert_eq!("heap".parse::<Algorithm>().unwrap(), Algorithm::Sort(SortAlgorithm::Heap));
        assert_eq!("wilson".parse::<Algorithm>().unwrap(), Algorithm::Generate(MazeAlgorithm::Wilson));
        assert_eq!("a-star".parse::<Algorithm>().unwrap(), Algorithm::Solve(SolveAlgorithm::AStar));
    }

    #[test]
    fn backtracker_needs_a_family() {
        assert!(matches!("backtracker".parse::<Algorithm>(), Err(RunError::Ambiguous { .. })));
        assert_eq!(
            "solve:backtracker".parse::<Algorithm>().unwrap(),
            Algorithm::Solve(SolveAlgorithm::Backtracker)
        );
    }

    #[test]
    fn unknown_names_error() {
        assert!(matches!("sort:wilson".parse::<Algorithm>(), Err(RunError::UnknownAlgorithm(_))));
        assert!(matches!("juggle".parse::<Algorithm>(), Err(RunError::UnknownAlgorithm(_))));
    }
}

// ── run_algorithm ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod dispatch {
    use super::*;

    #[test]
    fn sorts_a_dataset() {
        let mut data = shuffled(40);
        let mut recorder = Recorder::new();
        let report = run_algorithm(
            SortAlgorithm::QuickHoare.into(),
            Structure::Dataset(&mut data),
            &config(1).with_order(Order::Descent),
            &mut recorder,
        )
        .unwrap();
        let values = Dataset::values(&data);
        assert!(values.windows(2).all(|w| w[0] >= w[1]));
        assert!(matches!(report, RunReport::Sort(_)));
        assert_eq!(recorder.len() as u64, report.steps() + 1);
        assert!(recorder.finished());
    }

    #[test]
    fn generates_then_solves() {
        let grid = maze(10, 6);
        assert!(grid.is_perfect());
        let mut paths = PathGrid::from_grid(&grid);
        let structure = Structure::Path { grid: &mut paths, start: Pos::new(0, 0), goal: Pos::new(9, 5) };
        let report = run_algorithm(SolveAlgorithm::Bfs.into(), structure, &config(1), &mut NoopObserver).unwrap();
        let RunReport::Solve(solution) = report else { panic!("expected a solve report") };
        assert_eq!(solution.path.first(), Some(&Pos::new(0, 0)));
        assert_eq!(solution.path.last(), Some(&Pos::new(9, 5)));
    }

    #[test]
    fn mismatched_structure_is_rejected_before_any_step() {
        let mut grid = Grid::new(4, 4).unwrap();
        let mut recorder = Recorder::new();
        let err = run_algorithm(SortAlgorithm::Heap.into(), Structure::Grid(&mut grid), &config(1), &mut recorder)
            .unwrap_err();
        assert!(matches!(err, RunError::Mismatch { algorithm: "sort", structure: "grid" }));
        assert!(recorder.is_empty());
    }

    #[test]
    fn family_errors_pass_through() {
        let mut data: Vec<av_core::Record> = Vec::new();
        let err = run_algorithm(
            SortAlgorithm::Bubble.into(),
            Structure::Dataset(&mut data),
            &config(1),
            &mut NoopObserver,
        )
        .unwrap_err();
        assert!(matches!(err, RunError::Sort(av_sort::SortError::InvalidInput(_))));
    }

    #[test]
    fn same_seed_same_run() {
        let run = |seed| {
            let mut grid = Grid::new(7, 7).unwrap();
            let mut recorder = Recorder::new();
            run_algorithm(MazeAlgorithm::Wilson.into(), Structure::Grid(&mut grid), &config(seed), &mut recorder)
                .unwrap();
            (grid, recorder.len())
        };
        assert_eq!(run(11), run(11));
    }
}

// ── Runner ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod runner {
    use super::*;

    #[test]
    fn builder_overrides_config_fields() {
        let mut data = shuffled(25);
        let report = Runner::new(SortAlgorithm::MergeBottomUp)
            .speed(Speed::Unthrottled)
            .order(Order::Descent)
            .seed(9)
            .run(Structure::Dataset(&mut data), &mut NoopObserver)
            .unwrap();
        let values = Dataset::values(&data);
        assert!(values.windows(2).all(|w| w[0] >= w[1]));
        assert!(report.steps() > 0);
    }

    #[test]
    fn cancel_token_stops_the_run() {
        let token = CancelToken::new();
        let trigger = token.clone();
        let mut seen = 0u64;
        let mut observer = |_: &av_core::StepEvent<'_>| -> Result<(), av_core::ObserverError> {
            seen += 1;
            if seen == 5 {
                trigger.cancel();
            }
            Ok(())
        };
        let mut data = shuffled(30);
        let err = Runner::new(SortAlgorithm::Insertion)
            .config(config(1))
            .cancel_token(token)
            .run(Structure::Dataset(&mut data), &mut observer)
            .unwrap_err();
        assert!(err.is_cancelled());
        assert!(matches!(err.step_error(), Some(av_core::StepError::Cancelled { after_steps: 5 })));
    }
}

// ── StepIter ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod step_iter {
    use super::*;

    #[test]
    fn yields_the_same_steps_as_a_callback_run() {
        let data = shuffled(20);

        let mut pushed = data.clone();
        let mut recorder = Recorder::new();
        run_algorithm(SortAlgorithm::Shell.into(), Structure::Dataset(&mut pushed), &config(4), &mut recorder)
            .unwrap();

        let pulled: Vec<StepSnapshot> =
            Runner::new(SortAlgorithm::Shell).config(config(4)).iter(OwnedStructure::Dataset(data)).collect();

        assert_eq!(pulled.len(), recorder.len());
        assert!(pulled.last().is_some_and(StepSnapshot::is_done));
        for (a, b) in pulled.iter().zip(&recorder.steps) {
            match (a, b) {
                (StepSnapshot::Sort { records: x, counters: c, .. }, StepSnapshot::Sort { records: y, counters: d, .. }) => {
                    assert_eq!(x, y);
                    assert_eq!(c, d);
                }
                (StepSnapshot::Done, StepSnapshot::Done) => {}
                _ => panic!("step kinds diverged"),
            }
        }
    }

    #[test]
    fn finish_returns_the_final_structure() {
        let iter = Runner::new(MazeAlgorithm::Eller).config(config(2)).iter(OwnedStructure::Grid(Grid::new(6, 6).unwrap()));
        let (report, structure) = iter.finish().unwrap();
        assert!(matches!(report, RunReport::Generate(_)));
        let OwnedStructure::Grid(grid) = structure else { panic!("expected a grid back") };
        assert!(grid.is_perfect());
    }

    #[test]
    fn partial_consumption_then_finish() {
        let grid = maze(8, 8);
        let mut iter = Runner::new(SolveAlgorithm::Dfs).config(config(2)).iter(OwnedStructure::Path {
            grid:  PathGrid::from_grid(&grid),
            start: Pos::new(0, 0),
            goal:  Pos::new(7, 7),
        });
        assert!(iter.next().is_some());
        assert!(iter.next().is_some());
        let (report, _) = iter.finish().unwrap();
        let RunReport::Solve(solution) = report else { panic!("expected a solve report") };
        assert_eq!(solution.path.last(), Some(&Pos::new(7, 7)));
    }

    #[test]
    fn cancelling_mid_way_ends_the_iteration() {
        let mut iter = Runner::new(SortAlgorithm::Bubble).config(config(3)).iter(OwnedStructure::Dataset(shuffled(50)));
        assert!(iter.next().is_some());
        iter.cancel_token().cancel();
        // At most the step already handed to the channel arrives afterwards.
        assert!(iter.by_ref().take(2).count() <= 1);
        let err = iter.finish().unwrap_err();
        assert!(err.is_cancelled());
    }

    #[test]
    fn dropping_early_does_not_hang() {
        let mut iter = Runner::new(MazeAlgorithm::AldousBroder)
            .config(config(8))
            .iter(OwnedStructure::Grid(Grid::new(20, 20).unwrap()));
        assert!(iter.next().is_some());
        drop(iter);
    }

    #[test]
    fn mismatch_surfaces_from_finish() {
        let iter = Runner::new(SolveAlgorithm::Bfs).config(config(1)).iter(OwnedStructure::Dataset(shuffled(4)));
        assert!(matches!(iter.finish(), Err(RunError::Mismatch { algorithm: "solve", structure: "dataset" })));
    }
}
