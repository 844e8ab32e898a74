//! Record and dynamic value properties
//!
//! Records keep exactly their declared fields through shrinking, and
//! `anything` never nests deeper than asked.

use crate::{arbitrary_seed, fast_config};
use forall::*;

fn person() -> Gen<Record> {
    Gen::record_of(vec![
        ("firstname", Gen::<String>::string(6).map(Value::Str)),
        ("surname", Gen::<String>::string(6).map(Value::Str)),
        ("age", Gen::<i64>::integer(0, 150).map(Value::Number)),
    ])
}

/// Property: Every shrink of a record has the same keys in the same order
pub fn test_record_keys_survive_shrinking() {
    let prop = for_all(arbitrary_seed(), |&seed: &Seed| {
        let tree = person().generate(seed).unwrap();

        tree.expand(2).iter().all(|record| {
            record.keys().collect::<Vec<_>>() == ["firstname", "surname", "age"]
        })
    })
    .named("record shape");

    match prop.check(&fast_config()) {
        TestResult::Pass { .. } => println!("✓ Record shape property passed"),
        result => panic!("Record shape property failed: {result:?}"),
    }
}

/// Property: `anything(depth)` never nests deeper than `depth`
pub fn test_anything_respects_depth() {
    let prop = for_all(
        Gen::zip(Gen::<usize>::integer(0, 3), arbitrary_seed()),
        |&(depth, seed)| {
            let values = sample(&Gen::anything(depth), 10, seed).unwrap();
            values.iter().all(|value| value.depth() <= depth)
        },
    );

    match prop.check(&fast_config()) {
        TestResult::Pass { .. } => println!("✓ Anything depth property passed"),
        result => panic!("Anything depth property failed: {result:?}"),
    }
}
