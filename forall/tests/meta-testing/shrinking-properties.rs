//! Shrinking correctness properties
//!
//! These properties ensure that shrinking stays inside the generator's
//! domain, always terminates, and converges to minimal counterexamples.

use crate::{arbitrary_range, arbitrary_seed, fast_config};
use forall::*;

/// Property: Every integer shrink is in range and closer to the target
pub fn test_integer_shrinks_stay_in_range() {
    let prop = for_all(Gen::zip(arbitrary_range(), arbitrary_seed()), |&((min, max), seed)| {
        let tree = Gen::<i64>::integer(min, max).generate(seed).unwrap();
        let target = shrink_target(min, max);
        let distance = |v: i64| (v - target).abs();

        tree.shrinks()
            .into_iter()
            .all(|s| (min..=max).contains(&s) && distance(s) < distance(tree.value))
    })
    .named("integer shrinks");

    match prop.check(&fast_config()) {
        TestResult::Pass { .. } => println!("✓ Integer shrink range property passed"),
        result => panic!("Integer shrink range property failed: {result:?}"),
    }
}

/// Property: Always taking the first shrink reaches a leaf
pub fn test_shrinking_convergence() {
    let prop = for_all(arbitrary_seed(), |&seed: &Seed| {
        let gen = Gen::array_of(Gen::<i64>::integer(0, 50), 10);
        let mut current = gen.generate(seed).unwrap();
        let mut steps = 0;
        let max_steps = 1_000;

        while steps < max_steps {
            match current.children().into_iter().next() {
                Some(child) => current = child,
                None => break,
            }
            steps += 1;
        }

        // The first shrink of any non-empty array drops its head.
        steps < max_steps && current.value.is_empty()
    });

    match prop.check(&fast_config()) {
        TestResult::Pass { .. } => println!("✓ Shrinking convergence property passed"),
        result => panic!("Shrinking convergence property failed: {result:?}"),
    }
}

/// Property: `x < threshold` fails with exactly `threshold` as minimal
pub fn test_threshold_counterexample_is_minimal() {
    let prop = for_all(
        Gen::zip(Gen::<i64>::integer(1, 500), arbitrary_seed()),
        |&(threshold, seed)| {
            let run_seed = seed.next_u64().0;
            let result = check(
                Gen::<i64>::integer(0, 1_000),
                move |&x| x < threshold,
                &Config::default().with_seed(run_seed),
            );

            match result.counterexample() {
                Some(counterexample) => counterexample.minimal == threshold,
                // Every draw landing under the threshold is possible for
                // large thresholds.
                None => result.is_pass(),
            }
        },
    );

    match prop.check(&fast_config()) {
        TestResult::Pass { .. } => println!("✓ Threshold counterexample property passed"),
        result => panic!("Threshold counterexample property failed: {result:?}"),
    }
}
