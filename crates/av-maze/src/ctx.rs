//! `MazeCtx`: per-run state threaded through generators and solvers.

use av_core::{
    CarveFrame, CarveMarks, CellId, Grid, PathGrid, SearchFrame, SearchPhase, StepEvent,
    StepResult, StepRng, Tracer,
};

use crate::MazeResult;

pub struct MazeCtx<'o> {
    rng:    StepRng,
    tracer: Tracer<'o>,
}

impl<'o> MazeCtx<'o> {
    pub fn new(tracer: Tracer<'o>, rng: StepRng) -> Self {
        Self { rng, tracer }
    }

    #[inline]
    pub fn rng(&mut self) -> &mut StepRng {
        &mut self.rng
    }

    /// Steps emitted so far.
    #[inline]
    pub fn steps(&self) -> u64 {
        self.tracer.emitted()
    }

    // ── Generation ────────────────────────────────────────────────────────

    /// Report the grid with `marks` highlighted.
    pub fn step(&mut self, grid: &Grid, marks: CarveMarks) -> StepResult<()> {
        self.tracer.emit(&StepEvent::Carve(CarveFrame { grid, marks }))
    }

    /// Open the wall between `a` and `b`, mark both visited, and report it.
    pub fn carve(&mut self, grid: &mut Grid, a: CellId, b: CellId) -> MazeResult<()> {
        grid.open_wall(a, b)?;
        grid.visit(a);
        grid.visit(b);
        self.step(grid, CarveMarks::pair(grid.pos(a), grid.pos(b)))?;
        Ok(())
    }

    /// Pick a uniformly random element of `cells`.
    pub fn pick(&mut self, cells: &[CellId]) -> Option<CellId> {
        self.rng.choose(cells).copied()
    }

    // ── Solving ───────────────────────────────────────────────────────────

    /// Report the search grid while expanding `current`.
    pub fn explore(&mut self, grid: &PathGrid, current: CellId) -> StepResult<()> {
        self.search(grid, Some(current), SearchPhase::Explore)
    }

    pub fn search(&mut self, grid: &PathGrid, current: Option<CellId>, phase: SearchPhase) -> StepResult<()> {
        let current = current.map(|id| grid.pos(id));
        self.tracer.emit(&StepEvent::Search(SearchFrame { grid, current, phase }))
    }

    /// Emit the terminal `Done` event and return the number of steps.
    pub fn finish(mut self) -> StepResult<u64> {
        self.tracer.finish()?;
        Ok(self.tracer.emitted())
    }
}
