//! Generator combinators for property-based testing.

use crate::{data::*, error::*, tree::*};
use std::sync::Arc;

/// Number of draws a [`Gen::filter`] attempts before giving up.
pub const DEFAULT_FILTER_RETRIES: usize = 100;

/// Maximum string length used by derived generators.
pub const DEFAULT_STRING_LEN: usize = 10;

/// Maximum vector length used by derived generators.
pub const DEFAULT_ARRAY_LEN: usize = 10;

/// Characters drawn by [`Gen::printable`] span this inclusive range.
const PRINTABLE: (char, char) = (' ', '~');

/// Printable characters shrink toward this one.
const SIMPLEST_CHAR: char = 'a';

type DrawFn<T> = dyn Fn(Seed) -> Result<(Tree<T>, Seed)> + Send + Sync;

/// A generator for test data of type `T`.
///
/// Generators are explicit, first-class recipes composed with combinator
/// functions. A generator holds no state: every draw takes a seed and
/// returns the tree of the drawn value together with the seed to use next.
pub struct Gen<T> {
    generator: Arc<DrawFn<T>>,
}

impl<T> Clone for Gen<T> {
    fn clone(&self) -> Self {
        Gen {
            generator: Arc::clone(&self.generator),
        }
    }
}

impl<T: 'static> Gen<T> {
    /// Create a new generator from a draw function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(Seed) -> Result<(Tree<T>, Seed)> + Send + Sync + 'static,
    {
        Gen {
            generator: Arc::new(f),
        }
    }

    /// Draw a value and its shrinks, returning the advanced seed.
    pub fn draw(&self, seed: Seed) -> Result<(Tree<T>, Seed)> {
        (self.generator)(seed)
    }

    /// Draw a value and its shrinks, discarding the advanced seed.
    pub fn generate(&self, seed: Seed) -> Result<Tree<T>> {
        self.draw(seed).map(|(tree, _)| tree)
    }

    /// Create a generator that always produces the same value.
    pub fn constant(value: T) -> Self
    where
        T: Clone + Send + Sync,
    {
        Gen::new(move |seed| Ok((Tree::singleton(value.clone()), seed)))
    }

    /// Map a function over the generated values and their shrinks.
    pub fn map<U, F>(self, f: F) -> Gen<U>
    where
        F: Fn(T) -> U + Send + Sync + 'static,
        U: 'static,
    {
        let f = Arc::new(f);
        Gen::new(move |seed| {
            let (tree, next) = self.draw(seed)?;
            let f = Arc::clone(&f);
            Ok((tree.map(move |value| f(value)), next))
        })
    }

    /// Bind/flatmap for dependent generation.
    ///
    /// The inner generator is always drawn from the same seed, so shrinking
    /// the outer value rebuilds the inner one deterministically.
    pub fn bind<U, F>(self, f: F) -> Gen<U>
    where
        F: Fn(&T) -> Gen<U> + Send + Sync + 'static,
        U: 'static,
    {
        let f = Arc::new(f);
        Gen::new(move |seed| {
            let (outer, after_outer) = self.draw(seed)?;
            let (inner_seed, next) = after_outer.split();
            let f = Arc::clone(&f);
            let tree = outer.bind(move |value| f(value).generate(inner_seed))?;
            Ok((tree, next))
        })
    }

    /// Keep only values satisfying the predicate.
    ///
    /// Redraws up to [`DEFAULT_FILTER_RETRIES`] times, then fails the draw
    /// with [`Error::UnsatisfiableFilter`].
    pub fn filter<F>(self, predicate: F) -> Gen<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        self.filter_with_retries(predicate, DEFAULT_FILTER_RETRIES)
    }

    /// Keep only values satisfying the predicate, with an explicit retry bound.
    pub fn filter_with_retries<F>(self, predicate: F, retries: usize) -> Gen<T>
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        let predicate = Arc::new(predicate);
        Gen::new(move |seed| {
            let mut seed = seed;
            for _ in 0..retries {
                let (tree, next) = self.draw(seed)?;
                seed = next;
                let predicate = Arc::clone(&predicate);
                if let Some(tree) = tree.filter(move |value| predicate(value)) {
                    return Ok((tree, seed));
                }
            }
            Err(Error::UnsatisfiableFilter { retries })
        })
    }

    /// Choose one of several generators uniformly.
    ///
    /// Shrinks toward earlier generators in the list first.
    pub fn one_of(generators: Vec<Gen<T>>) -> Self {
        if generators.is_empty() {
            return Gen::new(|_seed| {
                Err(Error::InvalidGenerator {
                    message: "one_of needs at least one generator".to_string(),
                })
            });
        }

        let last = generators.len() - 1;
        Gen::<usize>::integer(0, last).bind(move |&index| generators[index].clone())
    }
}

/// Primitive generators.
impl Gen<bool> {
    /// Generate a random boolean. `true` shrinks to `false`.
    pub fn boolean() -> Self {
        Gen::new(|seed| {
            let (value, next) = seed.next_bool();
            let tree = Tree::unfold(value, |&b| if b { vec![false] } else { Vec::new() });
            Ok((tree, next))
        })
    }
}

impl Gen<i64> {
    /// Generate an integer uniformly from `[min, max]`.
    ///
    /// Shrinks toward zero, or toward the bound nearest zero when zero is
    /// out of range, halving the distance each step.
    pub fn integer(min: i64, max: i64) -> Self {
        Gen::new(move |seed| {
            if min > max {
                return Err(Error::InvalidGenerator {
                    message: format!("empty integer range: min {min} > max {max}"),
                });
            }

            let (value, next) = seed.next_range(min, max);
            let target = shrink_target(min, max);
            Ok((Tree::unfold(value, move |&v| towards(target, v)), next))
        })
    }
}

/// Where integers in `[min, max]` shrink to.
pub fn shrink_target(min: i64, max: i64) -> i64 {
    if min > 0 {
        min
    } else if max < 0 {
        max
    } else {
        0
    }
}

macro_rules! impl_narrow_integer {
    ($($t:ty),*) => {
        $(
            impl Gen<$t> {
                /// Generate an integer uniformly from `[min, max]`.
                ///
                /// Shrinks like [`Gen::<i64>::integer`].
                pub fn integer(min: $t, max: $t) -> Self {
                    Gen::<i64>::integer(min as i64, max as i64).map(|v| v as $t)
                }
            }
        )*
    };
}

impl_narrow_integer!(i8, i16, i32, u8, u16, u32);

impl Gen<usize> {
    /// Generate a `usize` uniformly from `[min, max]`.
    ///
    /// Bounds above `i64::MAX` are clamped.
    pub fn integer(min: usize, max: usize) -> Self {
        let clamp = |n: usize| i64::try_from(n).unwrap_or(i64::MAX);
        Gen::<i64>::integer(clamp(min), clamp(max)).map(|v| v as usize)
    }
}

impl Gen<char> {
    /// Generate a printable ASCII character, `' '` through `'~'`.
    ///
    /// Shrinks toward `'a'`.
    pub fn printable() -> Self {
        Gen::new(|seed| {
            let (code, next) = seed.next_range(PRINTABLE.0 as i64, PRINTABLE.1 as i64);
            let value = char::from_u32(code as u32).unwrap_or(SIMPLEST_CHAR);
            let tree = Tree::unfold(value, |&c| {
                towards(SIMPLEST_CHAR as i64, c as i64)
                    .into_iter()
                    .filter_map(|code| char::from_u32(code as u32))
                    .collect()
            });
            Ok((tree, next))
        })
    }
}

impl Gen<String> {
    /// Generate a printable ASCII string of up to `max_len` characters.
    ///
    /// Shrinks to shorter prefixes first, then simplifies single characters.
    pub fn string(max_len: usize) -> Self {
        Self::string_from(Gen::printable(), max_len)
    }

    /// Generate a string of up to `max_len` characters drawn from `chars`.
    pub fn string_from(chars: Gen<char>, max_len: usize) -> Self {
        Gen::new(move |seed| {
            let (elements, next) = draw_elements(&chars, max_len, seed)?;
            let tree = Tree::prefixes(elements)
                .map(|chars: Vec<char>| chars.into_iter().collect::<String>());
            Ok((tree, next))
        })
    }
}

impl<T: Clone + 'static> Gen<Vec<T>> {
    /// Generate a vector of up to `max_len` elements.
    ///
    /// The length is drawn first, then each element in order. Shrinking
    /// removes one element per step before shrinking elements in place.
    pub fn array_of(element: Gen<T>, max_len: usize) -> Self {
        Gen::new(move |seed| {
            let (elements, next) = draw_elements(&element, max_len, seed)?;
            Ok((Tree::list(elements), next))
        })
    }
}

impl<A: Clone + 'static, B: Clone + 'static> Gen<(A, B)> {
    /// Pair two generators, drawing the left one first.
    ///
    /// Shrinks exactly one side per step, left side first. Nesting pairs
    /// gives records that shrink one field at a time.
    pub fn zip(left: Gen<A>, right: Gen<B>) -> Self {
        Gen::new(move |seed| {
            let (left_tree, seed) = left.draw(seed)?;
            let (right_tree, seed) = right.draw(seed)?;
            Ok((Tree::zip(left_tree, right_tree), seed))
        })
    }
}

/// Draw a length in `[0, max_len]`, then that many element trees.
fn draw_elements<T: 'static>(
    element: &Gen<T>,
    max_len: usize,
    seed: Seed,
) -> Result<(Vec<Tree<T>>, Seed)> {
    let max_len = i64::try_from(max_len).unwrap_or(i64::MAX);
    let (len, mut seed) = seed.next_range(0, max_len);

    let mut elements = Vec::with_capacity(len as usize);
    for _ in 0..len {
        let (tree, next) = element.draw(seed)?;
        elements.push(tree);
        seed = next;
    }

    Ok((elements, seed))
}
