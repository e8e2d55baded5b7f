//! `av-sort`: step-emitting sorting algorithms for the `algovis` library.
//!
//! # Run protocol
//!
//! ```text
//! sort(algorithm, data, order, rng, tracer):
//!   ① Validate:  the dataset must be non-empty.
//!   ② Run:       the algorithm mutates `data` in place through `SortCtx`;
//!                 every swap, buffer read/write, or inspected comparison
//!                 emits one step carrying the dataset, highlights, and the
//!                 running swap / auxiliary counters.
//!   ③ Finish:    the terminal `Done` step is emitted and the final
//!                 counters are returned.
//! ```
//!
//! Any observer error or cancellation aborts the run at the next step; the
//! dataset is then left mid-sort but is still a permutation of the input.
//!
//! # Modules
//!
//! | Module           | Algorithms                                                     |
//! |------------------|----------------------------------------------------------------|
//! | [`simple`]       | bubble, cocktail shaker, insertion, binary insertion, selection, double selection, shell |
//! | [`heap`]         | heap                                                           |
//! | [`quick`]        | Lomuto, Hoare, three-way, dual-pivot, introsort                |
//! | [`merge`]        | top-down, bottom-up, four-way, in-place                        |
//! | [`tim`]          | Tim (bottom-up, top-down)                                      |
//! | [`tree`]         | BST, tournament                                                |
//! | [`pile`]         | patience, strand                                               |
//! | [`radix`]        | LSD, MSD                                                       |
//! | [`distribution`] | bucket, counting, pigeonhole, flash                            |
//! | [`other`]        | bogo family, gnome family, networks, and the rest              |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use av_core::{Dataset, NoopObserver, Order, Speed, StepRng, Tracer};
//! use av_sort::{sort, SortAlgorithm};
//!
//! let mut data = Dataset::shuffled(64, &mut StepRng::new(7));
//! let mut observer = NoopObserver;
//! let tracer = Tracer::new(&mut observer, Speed::Unthrottled);
//! let report = sort(SortAlgorithm::Heap, &mut data, Order::Ascent, StepRng::new(7), tracer)?;
//! ```

pub mod algorithm;
pub mod ctx;
pub mod distribution;
pub mod error;
pub mod heap;
pub mod merge;
pub mod other;
pub mod pile;
pub mod quick;
pub mod radix;
pub mod simple;
pub mod tim;
pub mod tree;
pub mod util;

#[cfg(test)]
mod tests;

pub use algorithm::{sort, SortAlgorithm, SortReport};
pub use ctx::SortCtx;
pub use error::{SortError, SortResult};
