//! `run_algorithm` and the fluent [`Runner`] around it.

use av_core::{CancelToken, Order, RunConfig, Speed, StepObserver, StepRng, Tracer};
use av_maze::{GenerateReport, Solution};
use av_sort::SortReport;

use crate::{Algorithm, OwnedStructure, RunError, RunResult, StepIter, Structure};

/// What a completed run produced.
#[derive(Clone, Debug, PartialEq)]
pub enum RunReport {
    Sort(SortReport),
    Generate(GenerateReport),
    Solve(Solution),
}

impl RunReport {
    /// Steps delivered to the observer, excluding `Done`.
    pub fn steps(&self) -> u64 {
        match self {
            RunReport::Sort(r) => r.steps,
            RunReport::Generate(r) => r.steps,
            RunReport::Solve(s) => s.steps,
        }
    }
}

/// Run `algorithm` against `structure`, delivering every step to `observer`.
///
/// The structure must match the algorithm's family: sorts take a
/// [`Structure::Dataset`], generators a [`Structure::Grid`], and solvers a
/// [`Structure::Path`].
///
/// # Errors
/// [`RunError::Mismatch`] for the wrong structure; otherwise whatever the
/// family's entry point reports.
pub fn run_algorithm(
    algorithm: Algorithm,
    structure: Structure<'_>,
    config:    &RunConfig,
    observer:  &mut dyn StepObserver,
) -> RunResult<RunReport> {
    execute(algorithm, structure, config, Tracer::new(observer, config.speed))
}

pub(crate) fn execute(
    algorithm: Algorithm,
    structure: Structure<'_>,
    config:    &RunConfig,
    tracer:    Tracer<'_>,
) -> RunResult<RunReport> {
    let rng = StepRng::new(config.seed);
    let result = match (algorithm, structure) {
        (Algorithm::Sort(a), Structure::Dataset(data)) => {
            av_sort::sort(a, data, config.order, rng, tracer).map(RunReport::Sort).map_err(RunError::from)
        }
        (Algorithm::Generate(a), Structure::Grid(grid)) => {
            av_maze::generate(a, grid, rng, tracer).map(RunReport::Generate).map_err(RunError::from)
        }
        (Algorithm::Solve(a), Structure::Path { grid, start, goal }) => {
            av_maze::solve(a, grid, start, goal, rng, tracer).map(RunReport::Solve).map_err(RunError::from)
        }
        (algorithm, structure) => {
            return Err(RunError::Mismatch { algorithm: algorithm.family(), structure: structure.kind() });
        }
    };

    if let Err(err) = &result {
        if err.is_cancelled() {
            tracing::warn!(%algorithm, "run cancelled");
        } else {
            tracing::warn!(%algorithm, %err, "run failed");
        }
    }
    result
}

// ── Runner ────────────────────────────────────────────────────────────────────

/// Fluent front end for one algorithm.
///
/// | Method             | Default                    |
/// |--------------------|----------------------------|
/// | `.config(c)`       | [`RunConfig::default()`]   |
/// | `.speed(s)`        | `Speed::Normal`            |
/// | `.order(o)`        | `Order::Ascent`            |
/// | `.seed(n)`         | `42`                       |
/// | `.cancel_token(t)` | none; the run cannot be stopped from outside |
///
/// # Example
///
/// ```rust,ignore
/// let token = CancelToken::new();
/// let report = Runner::new(SortAlgorithm::Heap)
///     .speed(Speed::Fast)
///     .order(Order::Descent)
///     .cancel_token(token.clone())
///     .run(Structure::Dataset(&mut data), &mut observer)?;
/// ```
#[derive(Clone, Debug)]
pub struct Runner {
    algorithm: Algorithm,
    config:    RunConfig,
    cancel:    Option<CancelToken>,
}

impl Runner {
    pub fn new(algorithm: impl Into<Algorithm>) -> Self {
        Self { algorithm: algorithm.into(), config: RunConfig::default(), cancel: None }
    }

    pub fn config(mut self, config: RunConfig) -> Self {
        self.config = config;
        self
    }

    pub fn speed(mut self, speed: Speed) -> Self {
        self.config.speed = speed;
        self
    }

    pub fn order(mut self, order: Order) -> Self {
        self.config.order = order;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = seed;
        self
    }

    /// Let the holder of another clone of `token` stop the run between steps.
    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Run to completion on the calling thread.
    pub fn run(&self, structure: Structure<'_>, observer: &mut dyn StepObserver) -> RunResult<RunReport> {
        let mut tracer = Tracer::new(observer, self.config.speed);
        if let Some(token) = &self.cancel {
            tracer = tracer.with_cancel(token.clone());
        }
        execute(self.algorithm, structure, &self.config, tracer)
    }

    /// Run on a worker thread, handing out steps one at a time.
    pub fn iter(self, structure: OwnedStructure) -> StepIter {
        StepIter::spawn(self.algorithm, structure, self.config, self.cancel.unwrap_or_default())
    }
}
