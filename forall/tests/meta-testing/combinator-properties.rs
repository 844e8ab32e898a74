//! Generator combinator properties
//!
//! These properties ensure that map, bind, filter and one_of behave
//! correctly and keep their laws under shrinking.

use crate::{arbitrary_seed, fast_config};
use forall::*;

/// Property: Map composition law (map f . map g = map (f . g))
pub fn test_map_composition() {
    let prop = for_all(arbitrary_seed(), |&seed: &Seed| {
        let twice = Gen::<i64>::integer(0, 20)
            .map(|x| x + 1)
            .map(|x| x * 2)
            .generate(seed)
            .unwrap();
        let composed = Gen::<i64>::integer(0, 20)
            .map(|x| (x + 1) * 2)
            .generate(seed)
            .unwrap();

        twice.value == composed.value && twice.shrinks() == composed.shrinks()
    });

    match prop.check(&fast_config()) {
        TestResult::Pass { .. } => println!("✓ Map composition property passed"),
        result => panic!("Map composition property failed: {result:?}"),
    }
}

/// Property: A bound generator sees the outer value, also while shrinking
pub fn test_bind_respects_dependency() {
    let prop = for_all(arbitrary_seed(), |&seed: &Seed| {
        let gen = Gen::<i64>::integer(1, 10)
            .bind(|&n| Gen::<i64>::integer(0, n).map(move |m| (n, m)));
        let tree = gen.generate(seed).unwrap();

        tree.expand(4).into_iter().all(|(n, m)| (1..=10).contains(&n) && m <= n)
    });

    match prop.check(&fast_config()) {
        TestResult::Pass { .. } => println!("✓ Bind dependency property passed"),
        result => panic!("Bind dependency property failed: {result:?}"),
    }
}

/// Property: Filtered values and all their shrinks satisfy the predicate
pub fn test_filter_respects_predicate() {
    let prop = for_all(arbitrary_seed(), |&seed: &Seed| {
        let gen = Gen::<i64>::integer(0, 1_000).filter(|x| x % 2 == 0);
        let tree = gen.generate(seed).unwrap();

        tree.expand(3).into_iter().all(|x| x % 2 == 0)
    });

    match prop.check(&fast_config()) {
        TestResult::Pass { .. } => println!("✓ Filter predicate property passed"),
        result => panic!("Filter predicate property failed: {result:?}"),
    }
}

/// Property: one_of only ever produces values of its choices
pub fn test_one_of_picks_a_choice() {
    let prop = for_all(arbitrary_seed(), |&seed: &Seed| {
        let gen = Gen::one_of(vec![
            Gen::constant("red"),
            Gen::constant("green"),
            Gen::constant("blue"),
        ]);
        let tree = gen.generate(seed).unwrap();

        // Shrinking moves toward the first choice.
        tree.expand(2)
            .into_iter()
            .all(|colour| ["red", "green", "blue"].contains(&colour))
            && tree.shrinks().iter().all(|&colour| colour != tree.value)
    });

    match prop.check(&fast_config()) {
        TestResult::Pass { .. } => println!("✓ One-of choice property passed"),
        result => panic!("One-of choice property failed: {result:?}"),
    }
}
