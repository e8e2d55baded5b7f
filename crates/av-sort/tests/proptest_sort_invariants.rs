//! Property-based invariant tests for the sort catalogue.
//!
//! 1. Every bounded sort outputs a permutation of its input.
//! 2. Every bounded sort satisfies the requested order.
//! 3. Swap and auxiliary counters never decrease within a run.
//! 4. The run ends with exactly one `Done`, and nothing follows it.
//! 5. The bogo family also ends ordered on tiny inputs.
//! 6. Same seed, same step sequence.

use av_core::{Dataset, NoopObserver, Order, Record, Recorder, Speed, StepRng, Tracer};
use av_sort::util::order_satisfied;
use av_sort::{sort, SortAlgorithm};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

fn small_values(max_len: usize) -> impl Strategy<Value = Vec<u32>> {
    proptest::collection::vec(0u32..=200, 1..=max_len)
}

fn any_order() -> impl Strategy<Value = Order> {
    prop_oneof![Just(Order::Ascent), Just(Order::Descent)]
}

fn bounded() -> impl Iterator<Item = SortAlgorithm> {
    SortAlgorithm::ALL.iter().copied().filter(|a| !a.is_unbounded())
}

fn sorted_copy(values: &[u32]) -> Vec<u32> {
    let mut v = values.to_vec();
    v.sort_unstable();
    v
}

fn run_quiet(algorithm: SortAlgorithm, data: &mut [Record], order: Order, seed: u64) {
    let mut observer = NoopObserver;
    let tracer = Tracer::new(&mut observer, Speed::Unthrottled);
    sort(algorithm, data, order, StepRng::new(seed), tracer).unwrap();
}

fn run_recorded(algorithm: SortAlgorithm, data: &mut [Record], order: Order, seed: u64) -> Recorder {
    let mut recorder = Recorder::new();
    {
        let tracer = Tracer::new(&mut recorder, Speed::Unthrottled);
        sort(algorithm, data, order, StepRng::new(seed), tracer).unwrap();
    }
    recorder
}

// ═════════════════════════════════════════════════════════════════════════
// 1–2. Permutation and order
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn output_is_an_ordered_permutation(values in small_values(24), order in any_order()) {
        for algorithm in bounded() {
            let mut data = Dataset::from_values(&values);
            run_quiet(algorithm, &mut data, order, 1);
            prop_assert!(
                order_satisfied(&data, order),
                "{} left {:?} unordered for {}", algorithm, Dataset::values(&data), order
            );
            prop_assert_eq!(
                sorted_copy(&Dataset::values(&data)), sorted_copy(&values),
                "{} lost or invented records", algorithm
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3–4. Counters and termination
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn counters_are_monotone_and_done_is_last(values in small_values(16), order in any_order()) {
        for algorithm in bounded() {
            let mut data = Dataset::from_values(&values);
            let recorder = run_recorded(algorithm, &mut data, order, 3);

            let counters = recorder.counters();
            for w in counters.windows(2) {
                prop_assert!(w[0].swaps <= w[1].swaps, "{} swap counter went backwards", algorithm);
                prop_assert!(w[0].aux <= w[1].aux, "{} aux counter went backwards", algorithm);
            }
            let dones = recorder.steps.iter().filter(|s| s.is_done()).count();
            prop_assert_eq!(dones, 1);
            prop_assert!(recorder.finished(), "{} did not end with Done", algorithm);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Bogo family
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn bogo_family_eventually_orders(values in proptest::collection::vec(0u32..=9, 1..=5), order in any_order()) {
        for algorithm in [SortAlgorithm::Bogo, SortAlgorithm::Bozo, SortAlgorithm::LessBogo] {
            let mut data = Dataset::from_values(&values);
            run_quiet(algorithm, &mut data, order, 11);
            prop_assert!(order_satisfied(&data, order), "{} unordered", algorithm);
            prop_assert_eq!(sorted_copy(&Dataset::values(&data)), sorted_copy(&values));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Determinism
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn same_seed_same_steps(values in small_values(16), seed in any::<u64>()) {
        for algorithm in [SortAlgorithm::QuickThreeWay, SortAlgorithm::Bozo] {
            if algorithm.is_unbounded() && values.len() > 4 {
                continue;
            }
            let mut a = Dataset::from_values(&values);
            let mut b = a.clone();
            let first = run_recorded(algorithm, &mut a, Order::Ascent, seed);
            let second = run_recorded(algorithm, &mut b, Order::Ascent, seed);
            prop_assert_eq!(first.counters(), second.counters());
            prop_assert_eq!(Dataset::values(&a), Dataset::values(&b));
        }
    }
}
