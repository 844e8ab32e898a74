//! Generator invariant properties
//!
//! These properties ensure that generators are deterministic in their seed
//! and respect the bounds they are given.

use crate::{arbitrary_range, arbitrary_seed, fast_config};
use forall::*;

/// Property: Generators should be deterministic for the same seed
pub fn test_generator_determinism() {
    let prop = for_all(arbitrary_seed(), |&seed: &Seed| {
        let gen = Gen::array_of(Gen::<i64>::integer(0, 100), 10);
        let tree1 = gen.generate(seed).unwrap();
        let tree2 = gen.generate(seed).unwrap();

        tree1.value == tree2.value && tree1.shrinks() == tree2.shrinks()
    })
    .named("determinism");

    match prop.check(&fast_config()) {
        TestResult::Pass { .. } => println!("✓ Generator determinism property passed"),
        result => panic!("Generator determinism property failed: {result:?}"),
    }
}

/// Property: Integers stay inside their inclusive bounds
pub fn test_integer_bounds() {
    let prop = for_all(Gen::zip(arbitrary_range(), arbitrary_seed()), |&((min, max), seed)| {
        let values = sample(&Gen::<i64>::integer(min, max), 20, seed).unwrap();
        values.iter().all(|v| (min..=max).contains(v))
    });

    match prop.check(&fast_config()) {
        TestResult::Pass { .. } => println!("✓ Integer bounds property passed"),
        result => panic!("Integer bounds property failed: {result:?}"),
    }
}

/// Property: Arrays never exceed their maximum length
pub fn test_array_length_bounds() {
    let prop = for_all(
        Gen::zip(Gen::<usize>::integer(0, 12), arbitrary_seed()),
        |&(max_len, seed)| {
            let gen = Gen::array_of(Gen::boolean(), max_len);
            let values = sample(&gen, 20, seed).unwrap();
            values.iter().all(|xs| xs.len() <= max_len)
        },
    );

    match prop.check(&fast_config()) {
        TestResult::Pass { .. } => println!("✓ Array length property passed"),
        result => panic!("Array length property failed: {result:?}"),
    }
}

/// Property: `sample` draws the same values as chaining `draw` by hand
pub fn test_sample_matches_draw_chain() {
    let prop = for_all(arbitrary_seed(), |&seed: &Seed| {
        let gen = Gen::<String>::string(6);
        let sampled = sample(&gen, 5, seed).unwrap();

        let mut chained = Vec::new();
        let mut current = seed;
        for _ in 0..5 {
            let (tree, next) = gen.draw(current).unwrap();
            chained.push(tree.value);
            current = next;
        }

        sampled == chained
    });

    match prop.check(&fast_config()) {
        TestResult::Pass { .. } => println!("✓ Sample chaining property passed"),
        result => panic!("Sample chaining property failed: {result:?}"),
    }
}
