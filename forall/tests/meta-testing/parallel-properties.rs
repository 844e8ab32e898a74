//! Parallel runner properties
//!
//! Splitting trials across threads must not change which counterexample is
//! reported.

use crate::fast_config;
use forall::*;

/// Property: Parallel and sequential runs report the same counterexample
pub fn test_parallel_finds_same_counterexample() {
    let prop = for_all(
        Gen::zip(Gen::<i64>::integer(0, 10_000), Gen::<usize>::integer(1, 6)),
        |&(run_seed, threads)| {
            let config = Config::default()
                .with_seed(run_seed as u64)
                .with_tests(60)
                .with_threads(threads);
            let gen = Gen::array_of(Gen::<i64>::integer(-50, 50), 8);
            let holds = |xs: &Vec<i64>| xs.iter().sum::<i64>() < 120;

            let sequential = check(gen.clone(), holds, &config);
            let parallel = check_parallel(gen, holds, &config);

            sequential.counterexample() == parallel.counterexample()
                && sequential.is_pass() == parallel.is_pass()
        },
    )
    .named("parallel agreement");

    match prop.check(&fast_config().with_tests(15)) {
        TestResult::Pass { .. } => println!("✓ Parallel agreement property passed"),
        result => panic!("Parallel agreement property failed: {result:?}"),
    }
}

/// Passing parallel runs report every trial
pub fn test_parallel_pass_counts_all_trials() {
    let config = Config::default().with_seed(5).with_tests(250).with_threads(4);
    let result = check_parallel(Gen::<i64>::integer(0, 10), |&n| n <= 10, &config);

    match result {
        TestResult::Pass { tests_run, .. } => assert_eq!(tests_run, 250),
        result => panic!("Expected pass, got: {result:?}"),
    }
}
