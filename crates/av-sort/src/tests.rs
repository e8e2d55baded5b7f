//! Unit tests for av-sort.

use av_core::{
    CancelToken, Dataset, NoopObserver, ObserverError, Order, Record, Recorder, Speed, StepError, StepEvent,
    StepRng, Tracer,
};

use crate::{sort, SortAlgorithm, SortError, SortReport, SortResult};

// ── Helpers ───────────────────────────────────────────────────────────────────

const SEED: u64 = 42;

fn run(algorithm: SortAlgorithm, data: &mut [Record], order: Order) -> (SortResult<SortReport>, Recorder) {
    let mut recorder = Recorder::new();
    let result = {
        let tracer = Tracer::new(&mut recorder, Speed::Unthrottled);
        sort(algorithm, data, order, StepRng::new(SEED), tracer)
    };
    (result, recorder)
}

fn sorted_values(algorithm: SortAlgorithm, values: &[u32], order: Order) -> Vec<u32> {
    let mut data = Dataset::from_values(values);
    let mut observer = NoopObserver;
    let tracer = Tracer::new(&mut observer, Speed::Unthrottled);
    sort(algorithm, &mut data, order, StepRng::new(SEED), tracer).unwrap();
    Dataset::values(&data)
}

fn expected(values: &[u32], order: Order) -> Vec<u32> {
    let mut v = values.to_vec();
    v.sort_unstable();
    if order == Order::Descent {
        v.reverse();
    }
    v
}

fn deterministic() -> impl Iterator<Item = SortAlgorithm> {
    SortAlgorithm::ALL.iter().copied().filter(|a| !a.is_unbounded())
}

/// Records tagged with their input position in `ratio`.
fn tagged(values: &[u32]) -> Vec<Record> {
    values
        .iter()
        .enumerate()
        .map(|(i, &value)| Record { value, ratio: i as f32 })
        .collect()
}

// ── Catalogue ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod catalogue {
    use super::*;

    #[test]
    fn names_are_unique_and_parse_back() {
        let mut seen = std::collections::HashSet::new();
        for &a in SortAlgorithm::ALL {
            assert!(seen.insert(a.name()), "duplicate name {}", a.name());
            assert_eq!(a.name().parse::<SortAlgorithm>().unwrap(), a);
        }
        assert_eq!(SortAlgorithm::ALL.len(), 48);
    }

    #[test]
    fn parse_is_lenient_about_case_and_underscores() {
        assert_eq!("Quick_Dual_Pivot".parse::<SortAlgorithm>().unwrap(), SortAlgorithm::QuickDualPivot);
        assert_eq!(" radix-lsd ".parse::<SortAlgorithm>().unwrap(), SortAlgorithm::RadixLsd);
    }

    #[test]
    fn unknown_name_errors() {
        let err = "quantum".parse::<SortAlgorithm>().unwrap_err();
        assert!(matches!(err, SortError::UnknownAlgorithm(name) if name == "quantum"));
    }

    #[test]
    fn only_bogo_family_is_unbounded() {
        let unbounded: Vec<_> = SortAlgorithm::ALL.iter().filter(|a| a.is_unbounded()).collect();
        assert_eq!(unbounded.len(), 3);
    }
}

// ── Scenarios ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod scenarios {
    use super::*;

    #[test]
    fn bubble_counts_one_swap_per_inversion() {
        // [5,3,4,1,2] has 8 inversions; every adjacent exchange removes one.
        let mut data = Dataset::from_values(&[5, 3, 4, 1, 2]);
        let (result, recorder) = run(SortAlgorithm::Bubble, &mut data, Order::Ascent);
        let report = result.unwrap();
        assert_eq!(Dataset::values(&data), vec![1, 2, 3, 4, 5]);
        assert_eq!(report.counters.swaps, 8);
        assert_eq!(report.counters.aux, 0);
        assert!(recorder.finished());
    }

    #[test]
    fn insertion_with_duplicates() {
        assert_eq!(sorted_values(SortAlgorithm::Insertion, &[3, 3, 1], Order::Ascent), vec![1, 3, 3]);
    }

    #[test]
    fn radix_lsd_textbook_input() {
        let values = [170, 45, 75, 90, 802, 24, 2, 66];
        assert_eq!(
            sorted_values(SortAlgorithm::RadixLsd, &values, Order::Ascent),
            vec![2, 24, 45, 66, 75, 90, 170, 802]
        );
        assert_eq!(
            sorted_values(SortAlgorithm::RadixLsd, &values, Order::Descent),
            vec![802, 170, 90, 75, 66, 45, 24, 2]
        );
    }

    #[test]
    fn single_element_still_finishes() {
        for algorithm in SortAlgorithm::ALL.iter().copied() {
            let mut data = Dataset::from_values(&[7]);
            let (result, recorder) = run(algorithm, &mut data, Order::Ascent);
            result.unwrap();
            assert_eq!(Dataset::values(&data), vec![7], "{algorithm}");
            assert!(recorder.finished(), "{algorithm}");
        }
    }

    #[test]
    fn empty_dataset_rejected() {
        let mut data: Vec<Record> = Vec::new();
        let (result, recorder) = run(SortAlgorithm::Heap, &mut data, Order::Ascent);
        assert!(matches!(result, Err(SortError::InvalidInput(_))));
        assert!(recorder.is_empty());
    }
}

// ── Every algorithm ───────────────────────────────────────────────────────────

#[cfg(test)]
mod all_algorithms {
    use super::*;

    #[test]
    fn sort_shuffled_both_orders() {
        let mut rng = StepRng::new(SEED);
        let values = Dataset::values(&Dataset::shuffled(61, &mut rng));
        for algorithm in deterministic() {
            for order in [Order::Ascent, Order::Descent] {
                assert_eq!(
                    sorted_values(algorithm, &values, order),
                    expected(&values, order),
                    "{algorithm} {order}"
                );
            }
        }
    }

    #[test]
    fn sort_with_many_duplicates() {
        let values: Vec<u32> = (0..40u32).map(|i| (i * 7 + 3) % 5).collect();
        for algorithm in deterministic() {
            assert_eq!(
                sorted_values(algorithm, &values, Order::Ascent),
                expected(&values, Order::Ascent),
                "{algorithm}"
            );
        }
    }

    #[test]
    fn sort_already_ordered_and_reversed() {
        let ascending: Vec<u32> = (1..=33).collect();
        let descending: Vec<u32> = ascending.iter().rev().copied().collect();
        for algorithm in deterministic() {
            for input in [&ascending, &descending] {
                assert_eq!(
                    sorted_values(algorithm, input, Order::Ascent),
                    ascending,
                    "{algorithm}"
                );
            }
        }
    }

    #[test]
    fn counters_never_decrease_and_done_is_last() {
        let mut rng = StepRng::new(7);
        for algorithm in deterministic() {
            let mut data = Dataset::shuffled(24, &mut rng);
            let (result, recorder) = run(algorithm, &mut data, Order::Ascent);
            let report = result.unwrap();
            let counters = recorder.counters();
            for w in counters.windows(2) {
                assert!(w[0].swaps <= w[1].swaps, "{algorithm}");
                assert!(w[0].aux <= w[1].aux, "{algorithm}");
            }
            assert_eq!(counters.last().copied().unwrap_or_default(), report.counters, "{algorithm}");
            assert_eq!(report.steps as usize + 1, recorder.len(), "{algorithm}");
            assert!(recorder.finished(), "{algorithm}");
            assert_eq!(recorder.steps.iter().filter(|s| s.is_done()).count(), 1);
        }
    }

    #[test]
    fn bogo_family_on_tiny_input() {
        for algorithm in [SortAlgorithm::Bogo, SortAlgorithm::Bozo, SortAlgorithm::LessBogo] {
            for order in [Order::Ascent, Order::Descent] {
                let values = [4, 1, 3, 1, 2];
                assert_eq!(sorted_values(algorithm, &values, order), expected(&values, order), "{algorithm}");
            }
        }
    }

    #[test]
    fn same_seed_same_steps() {
        for algorithm in [SortAlgorithm::QuickThreeWay, SortAlgorithm::Bozo] {
            let mut a = Dataset::from_values(&[3, 1, 2, 5, 4]);
            let mut b = a.clone();
            let (_, first) = run(algorithm, &mut a, Order::Ascent);
            let (_, second) = run(algorithm, &mut b, Order::Ascent);
            assert_eq!(first.counters(), second.counters(), "{algorithm}");
        }
    }

    #[test]
    fn stable_algorithms_keep_equal_keys_in_input_order() {
        let values = [2, 1, 2, 0, 1, 2, 0, 1, 1, 2, 0, 0, 2];
        for algorithm in [
            SortAlgorithm::Bubble,
            SortAlgorithm::Insertion,
            SortAlgorithm::MergeTopDown,
            SortAlgorithm::MergeBottomUp,
            SortAlgorithm::MergeFourWay,
            SortAlgorithm::Bst,
            SortAlgorithm::Tournament,
            SortAlgorithm::RadixLsd,
            SortAlgorithm::Counting,
            SortAlgorithm::Pigeonhole,
        ] {
            let mut data = tagged(&values);
            run(algorithm, &mut data, Order::Ascent).0.unwrap();
            for w in data.windows(2) {
                if w[0].value == w[1].value {
                    assert!(w[0].ratio < w[1].ratio, "{algorithm} is not stable");
                }
            }
        }
    }
}

// ── Observer contract ─────────────────────────────────────────────────────────

#[cfg(test)]
mod contract {
    use super::*;

    #[test]
    fn observer_error_aborts_the_run() {
        let mut data = Dataset::from_values(&[5, 4, 3, 2, 1]);
        let mut seen = 0;
        let mut observer = |_: &StepEvent<'_>| -> Result<(), ObserverError> {
            seen += 1;
            if seen == 3 { Err("display closed".into()) } else { Ok(()) }
        };
        let tracer = Tracer::new(&mut observer, Speed::Unthrottled);
        let err = sort(SortAlgorithm::Bubble, &mut data, Order::Ascent, StepRng::new(SEED), tracer)
            .unwrap_err();
        assert!(matches!(err, SortError::Step(StepError::Observer(_))));
        assert_eq!(seen, 3);

        // Aborted mid-run, but nothing was lost.
        let mut values = Dataset::values(&data);
        values.sort_unstable();
        assert_eq!(values, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn cancelled_run_stops_at_next_step() {
        let token = CancelToken::new();
        let remote = token.clone();
        let mut data = Dataset::from_values(&[5, 4, 3, 2, 1]);
        let mut steps = 0u64;
        let mut observer = |_: &StepEvent<'_>| -> Result<(), ObserverError> {
            steps += 1;
            if steps == 2 {
                remote.cancel();
            }
            Ok(())
        };
        let tracer = Tracer::new(&mut observer, Speed::Unthrottled).with_cancel(token);
        let err = sort(SortAlgorithm::Selection, &mut data, Order::Ascent, StepRng::new(SEED), tracer)
            .unwrap_err();
        assert!(matches!(err, SortError::Step(StepError::Cancelled { after_steps: 2 })));
    }

    #[test]
    fn frames_carry_highlights() {
        let mut data = Dataset::from_values(&[2, 1]);
        let (result, recorder) = run(SortAlgorithm::Bubble, &mut data, Order::Ascent);
        result.unwrap();
        match &recorder.steps[0] {
            av_core::StepSnapshot::Sort { records, marks, counters } => {
                assert_eq!(Dataset::values(records), vec![1, 2]);
                assert_eq!((marks.current, marks.next), (Some(0), Some(1)));
                assert_eq!(counters.swaps, 1);
            }
            other => panic!("unexpected first step {other:?}"),
        }
    }
}

// ── Validation ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod validation {
    use super::*;

    #[test]
    fn counting_rejects_huge_value_span() {
        let mut data = Dataset::from_values(&[0, 1 << 30]);
        let (result, _) = run(SortAlgorithm::Counting, &mut data, Order::Ascent);
        assert!(matches!(result, Err(SortError::InvalidInput(_))));
    }

    #[test]
    fn gravity_rejects_tall_beads() {
        let mut data = Dataset::from_values(&[1, crate::other::gravity::MAX_BEAD_VALUE + 1]);
        let (result, _) = run(SortAlgorithm::Gravity, &mut data, Order::Ascent);
        assert!(matches!(result, Err(SortError::InvalidInput(_))));
    }

    #[test]
    fn gravity_handles_zero_values() {
        assert_eq!(sorted_values(SortAlgorithm::Gravity, &[0, 3, 0, 1], Order::Ascent), vec![0, 0, 1, 3]);
    }
}

// ── Utilities ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod utilities {
    use super::*;
    use crate::tim::min_run_length;
    use crate::util::{
        binary_search, bounded_max, bounded_min, digit_at, digits_of, first_in_order,
        last_in_order, order_satisfied,
    };

    #[test]
    fn order_satisfied_checks_adjacent_pairs() {
        let data = Dataset::from_values(&[1, 2, 2, 5]);
        assert!(order_satisfied(&data, Order::Ascent));
        assert!(!order_satisfied(&data, Order::Descent));
        assert!(order_satisfied(&Dataset::from_values(&[4]), Order::Descent));
    }

    #[test]
    fn bounded_extremes_prefer_leftmost() {
        let keys = [3, 1, 4, 1, 5, 9, 2, 9];
        let key = |i: usize| keys[i];
        assert_eq!(bounded_min(0, keys.len() - 1, &key), 1);
        assert_eq!(bounded_max(0, keys.len() - 1, &key), 5);
        assert_eq!(bounded_min(2, 2, &key), 2);
    }

    #[test]
    fn first_and_last_follow_order() {
        let data = Dataset::from_values(&[3, 1, 4, 1, 5]);
        assert_eq!(first_in_order(&data, 0, 4, Order::Ascent), 1);
        assert_eq!(last_in_order(&data, 0, 4, Order::Ascent), 4);
        assert_eq!(first_in_order(&data, 0, 4, Order::Descent), 4);
    }

    #[test]
    fn binary_search_insertion_points() {
        let data = Dataset::from_values(&[1, 3, 5, 7]);
        assert_eq!(binary_search(&data, 0, 3, 0, Order::Ascent), 0);
        assert_eq!(binary_search(&data, 0, 3, 4, Order::Ascent), 2);
        assert_eq!(binary_search(&data, 0, 3, 8, Order::Ascent), 4);
        assert_eq!(binary_search(&data, 0, 3, 5, Order::Ascent), 2);

        let desc = Dataset::from_values(&[7, 5, 3, 1]);
        assert_eq!(binary_search(&desc, 0, 3, 4, Order::Descent), 2);
    }

    #[test]
    fn digits() {
        assert_eq!(digits_of(0, 10), 1);
        assert_eq!(digits_of(9, 10), 1);
        assert_eq!(digits_of(802, 10), 3);
        assert_eq!(digits_of(255, 16), 2);
        assert_eq!(digit_at(802, 0, 10), 2);
        assert_eq!(digit_at(802, 1, 10), 0);
        assert_eq!(digit_at(802, 2, 10), 8);
        assert_eq!(digit_at(802, 5, 10), 0);
    }

    #[test]
    fn min_run_shifts_in_dropped_bits() {
        assert_eq!(min_run_length(1), 1);
        assert_eq!(min_run_length(31), 31);
        assert_eq!(min_run_length(32), 16);
        assert_eq!(min_run_length(33), 17);
        assert_eq!(min_run_length(64), 16);
        assert_eq!(min_run_length(65), 17);
    }
}
