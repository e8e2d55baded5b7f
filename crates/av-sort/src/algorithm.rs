//! The sort catalogue and the run entry point.

use std::fmt;
use std::str::FromStr;

use av_core::{Counters, Order, Record, StepRng, Tracer};

use crate::{distribution, heap, merge, other, pile, quick, radix, simple, tim, tree};
use crate::{SortCtx, SortError, SortResult};

type SortFn = fn(&mut [Record], &mut SortCtx<'_>) -> SortResult<()>;

/// Declare the closed set of sorts: variant, kebab-case name, entry point.
macro_rules! sort_catalogue {
    ($($(#[$attr:meta])* $variant:ident => $name:literal, $func:path;)+) => {
        /// Every sort the library implements.
        #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
        pub enum SortAlgorithm {
            $($(#[$attr])* $variant,)+
        }

        impl SortAlgorithm {
            pub const ALL: &'static [SortAlgorithm] = &[$(SortAlgorithm::$variant,)+];

            pub const fn name(self) -> &'static str {
                match self {
                    $(SortAlgorithm::$variant => $name,)+
                }
            }

            fn entry(self) -> SortFn {
                match self {
                    $(SortAlgorithm::$variant => $func,)+
                }
            }
        }
    };
}

sort_catalogue! {
    Bubble                => "bubble",                    simple::bubble;
    CocktailShaker        => "cocktail-shaker",           simple::cocktail_shaker;
    Insertion             => "insertion",                 simple::insertion;
    BinaryInsertion       => "binary-insertion",          simple::binary_insertion;
    Selection             => "selection",                 simple::selection;
    DoubleSelection       => "double-selection",          simple::double_selection;
    Shell                 => "shell",                     simple::shell;
    Heap                  => "heap",                      heap::heap;
    QuickLomuto           => "quick-lomuto",              quick::quick_lomuto;
    QuickHoare            => "quick-hoare",               quick::quick_hoare;
    QuickThreeWay         => "quick-three-way",           quick::quick_three_way;
    QuickDualPivot        => "quick-dual-pivot",          quick::quick_dual_pivot;
    Intro                 => "intro",                     quick::intro;
    MergeTopDown          => "merge-top-down",            merge::merge_top_down;
    MergeBottomUp         => "merge-bottom-up",           merge::merge_bottom_up;
    MergeFourWay          => "merge-four-way",            merge::merge_four_way;
    MergeInPlace          => "merge-in-place",            merge::merge_in_place;
    TimBottomUp           => "tim-bottom-up",             tim::tim_bottom_up;
    TimTopDown            => "tim-top-down",              tim::tim_top_down;
    Tournament            => "tournament",                tree::tournament;
    Bst                   => "bst",                       tree::bst;
    Patience              => "patience",                  pile::patience;
    Strand                => "strand",                    pile::strand;
    RadixLsd              => "radix-lsd",                 radix::radix_lsd;
    RadixMsd              => "radix-msd",                 radix::radix_msd;
    Bucket                => "bucket",                    distribution::bucket;
    Counting              => "counting",                  distribution::counting;
    Pigeonhole            => "pigeonhole",                distribution::pigeonhole;
    Flash                 => "flash",                     distribution::flash;
    Bogo                  => "bogo",                      other::bogo;
    Bozo                  => "bozo",                      other::bozo;
    LessBogo              => "less-bogo",                 other::less_bogo;
    Gnome                 => "gnome",                     other::gnome;
    GnomeOptimized        => "gnome-optimized",           other::gnome_optimized;
    Comb                  => "comb",                      other::comb;
    Cycle                 => "cycle",                     other::cycle;
    BitonicBottomUp       => "bitonic-bottom-up",         other::bitonic_bottom_up;
    BitonicTopDown        => "bitonic-top-down",          other::bitonic_top_down;
    OddEvenMergeIterative => "odd-even-merge-iterative",  other::odd_even_merge_iterative;
    OddEvenMergeRecursive => "odd-even-merge-recursive",  other::odd_even_merge_recursive;
    Pairwise              => "pairwise",                  other::pairwise;
    OddEvenTransposition  => "odd-even-transposition",    other::odd_even_transposition;
    Pancake               => "pancake",                   other::pancake;
    Slow                  => "slow",                      other::slow;
    Stooge                => "stooge",                    other::stooge;
    Gravity               => "gravity",                   other::gravity;
    Library               => "library",                   other::library;
    Circle                => "circle",                    other::circle;
}

impl SortAlgorithm {
    /// `true` for the bogo family, whose running time has no upper bound.
    pub const fn is_unbounded(self) -> bool {
        matches!(self, SortAlgorithm::Bogo | SortAlgorithm::Bozo | SortAlgorithm::LessBogo)
    }
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortAlgorithm {
    type Err = SortError;

    /// Accepts the kebab-case name; `_` and case are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        SortAlgorithm::ALL
            .iter()
            .copied()
            .find(|a| a.name() == wanted)
            .ok_or_else(|| SortError::UnknownAlgorithm(s.to_owned()))
    }
}

// ── Run ───────────────────────────────────────────────────────────────────────

/// Outcome of a completed sort run.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct SortReport {
    /// Final swap and auxiliary counts.
    pub counters: Counters,
    /// Steps delivered to the observer, excluding `Done`.
    pub steps:    u64,
}

/// Sort `data` in place with `algorithm`, reporting every step through
/// `tracer` and finishing with `Done`.
///
/// # Errors
/// - [`SortError::InvalidInput`] for an empty dataset, or a value range the
///   algorithm cannot allocate for.
/// - [`SortError::Step`] if the observer fails or the run is cancelled.
pub fn sort(
    algorithm: SortAlgorithm,
    data:      &mut [Record],
    order:     Order,
    rng:       StepRng,
    tracer:    Tracer<'_>,
) -> SortResult<SortReport> {
    if data.is_empty() {
        return Err(SortError::InvalidInput("dataset is empty".into()));
    }
    tracing::debug!(algorithm = algorithm.name(), len = data.len(), %order, "sort started");

    let mut ctx = SortCtx::new(tracer, order, rng);
    (algorithm.entry())(data, &mut ctx)?;
    let (counters, steps) = ctx.finish()?;

    tracing::debug!(
        algorithm = algorithm.name(),
        steps,
        swaps = counters.swaps,
        aux = counters.aux,
        "sort finished"
    );
    Ok(SortReport { counters, steps })
}
