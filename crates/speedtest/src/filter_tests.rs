#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::time::Duration;

use proptest::prelude::*;
use yare::parameterized;

use super::*;
use crate::outcome::Failure;

fn ok_secs(secs: u64) -> Outcome {
    Outcome::success(Duration::from_secs(secs))
}

fn failed_secs(secs: u64) -> Outcome {
    Outcome::failed(
        Duration::from_secs(secs),
        Failure::from_error(&anyhow::anyhow!("run {} failed", secs)),
    )
}

fn secs(outcomes: &[Outcome]) -> Vec<u64> {
    outcomes.iter().map(|o| o.elapsed().as_secs()).collect()
}

#[test]
fn default_keeps_successes_in_order() {
    let input = vec![ok_secs(7), failed_secs(1), ok_secs(2), ok_secs(9)];
    assert_eq!(secs(&DefaultFilter.filter(&input)), vec![7, 2, 9]);
}

#[test]
fn default_does_not_mutate_input() {
    let input = vec![ok_secs(3), failed_secs(1)];
    let before = input.clone();
    let _ = DefaultFilter.filter(&input);
    assert_eq!(input, before);
}

#[test]
fn exclude_min_max_drops_extremes() {
    let input: Vec<_> = [21, 5, 1, 7, 6].into_iter().map(ok_secs).collect();
    assert_eq!(secs(&ExcludeMinAndMax.filter(&input)), vec![5, 6, 7]);
}

#[parameterized(
    empty = { &[], &[] },
    one = { &[4], &[4] },
    two = { &[9, 3], &[3, 9] },
    three = { &[9, 3, 5], &[5] },
)]
fn exclude_min_max_small_inputs(input: &[u64], expected: &[u64]) {
    let outcomes: Vec<_> = input.iter().copied().map(ok_secs).collect();
    assert_eq!(secs(&ExcludeMinAndMax.filter(&outcomes)), expected);
}

#[test]
fn exclude_min_max_ignores_failures_when_counting() {
    // Only two successes remain, so nothing is trimmed.
    let input = vec![failed_secs(1), ok_secs(3), failed_secs(100), ok_secs(9)];
    assert_eq!(secs(&ExcludeMinAndMax.filter(&input)), vec![3, 9]);
}

#[test]
fn exclude_min_max_drops_one_of_each_tied_extreme() {
    let input: Vec<_> = [2, 2, 5, 8, 8].into_iter().map(ok_secs).collect();
    assert_eq!(secs(&ExcludeMinAndMax.filter(&input)), vec![2, 5, 8]);
}

#[test]
fn exclude_min_max_tie_break_is_stable() {
    let first = Outcome::success(Duration::from_secs(4));
    let second = Outcome::success(Duration::from_millis(4000));
    let input = vec![ok_secs(1), first.clone(), second, ok_secs(10)];
    let out = ExcludeMinAndMax.filter(&input);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0], first);
}

#[test]
fn exception_only_keeps_failures_in_order() {
    let input = vec![failed_secs(5), ok_secs(1), failed_secs(2), ok_secs(3)];
    let out = ExceptionOnly.filter(&input);
    assert_eq!(secs(&out), vec![5, 2]);
    assert!(out.iter().all(Outcome::is_failure));
}

#[parameterized(
    default = { FilterKind::Default, "default" },
    exclude = { FilterKind::ExcludeMinMax, "exclude-min-max" },
    exception = { FilterKind::ExceptionOnly, "exception-only" },
)]
fn filter_kind_names_round_trip(kind: FilterKind, name: &str) {
    assert_eq!(kind.as_str(), name);
    assert_eq!(kind.build().name(), name);
}

#[test]
fn filter_kind_deserializes_kebab_case() {
    #[derive(Deserialize)]
    struct Wrapper {
        filter: FilterKind,
    }
    let parsed: Wrapper = toml::from_str("filter = \"exclude-min-max\"").unwrap();
    assert_eq!(parsed.filter, FilterKind::ExcludeMinMax);
}

fn arb_outcome() -> impl Strategy<Value = Outcome> {
    (0u64..10_000, any::<bool>()).prop_map(|(ms, failed)| {
        let elapsed = Duration::from_millis(ms);
        if failed {
            Outcome::failed(elapsed, Failure::from_error(&anyhow::anyhow!("x")))
        } else {
            Outcome::success(elapsed)
        }
    })
}

proptest! {
    #[test]
    fn default_and_exception_only_partition(outcomes in prop::collection::vec(arb_outcome(), 0..40)) {
        let kept = DefaultFilter.filter(&outcomes).len();
        let failed = ExceptionOnly.filter(&outcomes).len();
        prop_assert_eq!(kept + failed, outcomes.len());
    }

    #[test]
    fn exclude_min_max_trims_at_most_two(outcomes in prop::collection::vec(arb_outcome(), 0..40)) {
        let successes = outcomes.iter().filter(|o| o.is_success()).count();
        let out = ExcludeMinAndMax.filter(&outcomes);
        let expected = if successes > 2 { successes - 2 } else { successes };
        prop_assert_eq!(out.len(), expected);
        prop_assert!(out.windows(2).all(|w| w[0].elapsed() <= w[1].elapsed()));
        prop_assert!(out.iter().all(Outcome::is_success));
    }
}
