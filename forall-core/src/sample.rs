//! Drawing values for inspection, outside of any property.

use crate::{data::Seed, error::Result, gen::Gen};

/// Draw `count` values from `gen`, advancing the seed after each draw.
///
/// The same seed always yields the same sequence.
pub fn sample<T: 'static>(gen: &Gen<T>, count: usize, seed: Seed) -> Result<Vec<T>> {
    let mut seed = seed;
    let mut values = Vec::with_capacity(count);

    for _ in 0..count {
        let (tree, next) = gen.draw(seed)?;
        values.push(tree.value);
        seed = next;
    }

    log::trace!("sampled {count} values");
    Ok(values)
}

/// Draw `count` values from a random seed.
pub fn sample_random<T: 'static>(gen: &Gen<T>, count: usize) -> Result<Vec<T>> {
    sample(gen, count, Seed::random())
}
