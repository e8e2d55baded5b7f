//! `av-core`: foundational types for the `algovis` step-emitting algorithm
//! library.
//!
//! This crate is a dependency of every other `av-*` crate.  It intentionally
//! has no `av-*` dependencies and minimal external ones (`rand`, `thiserror`,
//! `tracing`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                  |
//! |-----------------|-----------------------------------------------------------|
//! | [`ids`]         | `CellId`, `SetId`                                         |
//! | [`record`]      | `Record`, `Order`, `Dataset` constructors                 |
//! | [`grid`]        | `Pos`, `Direction`, `Walls`, `Dims`, `Cell`, `Grid`       |
//! | [`path`]        | `PathCell`, `PathGrid`                                    |
//! | [`step`]        | `StepEvent`, frames, `StepObserver`, `Tracer`, `CancelToken` |
//! | [`speed`]       | `Speed` presets, `RunConfig`                              |
//! | [`rng`]         | `StepRng` (seeded, per run)                               |
//! | [`error`]       | `StepError`, `CoreError`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public data types,   |
//! |         | so hosts can persist generated mazes and run settings.     |

pub mod error;
pub mod grid;
pub mod ids;
pub mod path;
pub mod record;
pub mod rng;
pub mod speed;
pub mod step;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult, ObserverError, StepError, StepResult};
pub use grid::{Cell, Dims, Direction, Grid, GridParts, Pos, Walls};
pub use ids::{CellId, SetId};
pub use path::{PathCell, PathGrid, PathGridParts};
pub use record::{Dataset, Order, Record};
pub use rng::StepRng;
pub use speed::{RunConfig, Speed};
pub use step::{
    CancelToken, CarveFrame, CarveMarks, Counters, Marks, NoopObserver, Recorder, SearchFrame,
    SearchPhase, SortFrame, StepEvent, StepObserver, StepSnapshot, Tracer,
};
