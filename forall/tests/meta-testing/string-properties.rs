//! String generator properties

use crate::{arbitrary_seed, fast_config};
use forall::*;

/// Property: Generated strings are printable ASCII and within length
pub fn test_strings_are_printable() {
    let prop = for_all(
        Gen::zip(Gen::<usize>::integer(0, 20), arbitrary_seed()),
        |&(max_len, seed)| {
            let strings = sample(&Gen::<String>::string(max_len), 10, seed).unwrap();
            strings.iter().all(|s| {
                s.chars().count() <= max_len && s.chars().all(|c| (' '..='~').contains(&c))
            })
        },
    );

    match prop.check(&fast_config()) {
        TestResult::Pass { .. } => println!("✓ Printable strings property passed"),
        result => panic!("Printable strings property failed: {result:?}"),
    }
}

/// Property: A string shrink is a proper prefix or keeps the length
pub fn test_string_shrinks_are_shorter_or_simpler() {
    let prop = for_all(arbitrary_seed(), |&seed: &Seed| {
        let tree = Gen::<String>::string(12).generate(seed).unwrap();
        let original = &tree.value;

        tree.shrinks().iter().all(|s| {
            (s.len() < original.len() && original.starts_with(s.as_str()))
                || (s.len() == original.len() && s != original)
        })
    });

    match prop.check(&fast_config()) {
        TestResult::Pass { .. } => println!("✓ String shrink property passed"),
        result => panic!("String shrink property failed: {result:?}"),
    }
}
