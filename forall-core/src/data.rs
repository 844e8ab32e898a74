//! Core data types: the random source and the runner configuration.

use crate::error::{Error, Result};
use std::fmt;

/// Splittable random seed for deterministic test generation.
///
/// A seed is never mutated in place. Every draw takes a seed by value and
/// hands back the seed to use next, so any value can be replayed from the
/// seed that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Seed(pub u64, pub u64);

impl Seed {
    /// Create a new seed from a single value.
    pub fn from_u64(value: u64) -> Self {
        let state = splitmix64_mix(value);
        let gamma = mix_gamma(state);
        Seed(state, gamma)
    }

    /// Split a seed into two independent seeds.
    /// Uses SplitMix64 splitting strategy for independence.
    pub fn split(self) -> (Self, Self) {
        let Seed(state, gamma) = self;
        let new_state = state.wrapping_add(gamma);
        let output = splitmix64_mix(new_state);
        let new_gamma = mix_gamma(output);

        (Seed(new_state, gamma), Seed(output, new_gamma))
    }

    /// Generate the next random value and advance the seed.
    pub fn next_u64(self) -> (u64, Self) {
        let Seed(state, gamma) = self;
        let new_state = state.wrapping_add(gamma);
        let output = splitmix64_mix(new_state);
        (output, Seed(new_state, gamma))
    }

    /// Generate a bounded random value in `[0, bound)`.
    ///
    /// A `bound` of zero yields zero.
    pub fn next_bounded(self, bound: u64) -> (u64, Self) {
        let (value, new_seed) = self.next_u64();
        (((value as u128 * bound as u128) >> 64) as u64, new_seed)
    }

    /// Generate a value uniformly distributed over `[lo, hi]`.
    ///
    /// The bounds are reordered if `lo > hi`.
    pub fn next_range(self, lo: i64, hi: i64) -> (i64, Self) {
        let (lo, hi) = if lo <= hi { (lo, hi) } else { (hi, lo) };
        let span = (hi as i128 - lo as i128 + 1) as u128;

        if span > u64::MAX as u128 {
            // The full i64 domain: every bit pattern is a valid answer.
            let (value, new_seed) = self.next_u64();
            return (value as i64, new_seed);
        }

        let (offset, new_seed) = self.next_bounded(span as u64);
        ((lo as i128 + offset as i128) as i64, new_seed)
    }

    /// Generate a random bool.
    pub fn next_bool(self) -> (bool, Self) {
        let (value, new_seed) = self.next_u64();
        (value & 1 == 1, new_seed)
    }

    /// Generate a random seed.
    pub fn random() -> Self {
        Seed::from_u64(random_u64())
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Seed({}, {})", self.0, self.1)
    }
}

/// Draw a fresh run seed from the thread-local generator.
pub(crate) fn random_u64() -> u64 {
    use rand::Rng;
    rand::thread_rng().gen()
}

/// Environment variable overriding [`Config::tests`].
pub const ENV_TESTS: &str = "FORALL_TESTS";
/// Environment variable overriding [`Config::shrinks`].
pub const ENV_SHRINKS: &str = "FORALL_SHRINKS";
/// Environment variable pinning [`Config::seed`].
pub const ENV_SEED: &str = "FORALL_SEED";
/// Environment variable overriding [`Config::threads`].
pub const ENV_THREADS: &str = "FORALL_THREADS";

/// Configuration for property testing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of trials to run.
    pub tests: usize,

    /// Maximum number of accepted shrink steps.
    pub shrinks: usize,

    /// Run seed. A random one is drawn per run when unset.
    pub seed: Option<u64>,

    /// Worker threads used by the parallel runner.
    pub threads: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            tests: 100,
            shrinks: 1000,
            seed: None,
            threads: num_cpus::get().max(1),
        }
    }
}

impl Config {
    /// Set the number of trials.
    pub fn with_tests(mut self, tests: usize) -> Self {
        self.tests = tests;
        self
    }

    /// Set the shrink step budget.
    pub fn with_shrinks(mut self, shrinks: usize) -> Self {
        self.shrinks = shrinks;
        self
    }

    /// Pin the run seed, making the whole run reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the number of worker threads for the parallel runner.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads.max(1);
        self
    }

    /// Default configuration with overrides read from the environment.
    pub fn from_env() -> Result<Self> {
        Self::default().merge_env(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a key lookup.
    ///
    /// Unset keys keep the current value; set keys must parse.
    pub fn merge_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(tests) = parse_var(&lookup, ENV_TESTS)? {
            self.tests = tests;
        }
        if let Some(shrinks) = parse_var(&lookup, ENV_SHRINKS)? {
            self.shrinks = shrinks;
        }
        if let Some(seed) = parse_var(&lookup, ENV_SEED)? {
            self.seed = Some(seed);
        }
        if let Some(threads) = parse_var::<usize, _>(&lookup, ENV_THREADS)? {
            if threads == 0 {
                return Err(Error::InvalidConfig {
                    message: format!("{ENV_THREADS} must be at least 1"),
                });
            }
            self.threads = threads;
        }
        Ok(self)
    }

    /// The run seed: the pinned one, or a fresh random one.
    pub(crate) fn run_seed(&self) -> u64 {
        self.seed.unwrap_or_else(random_u64)
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(None);
    };
    log::debug!("config override {key}={raw}");
    raw.trim()
        .parse()
        .map(Some)
        .map_err(|err| Error::InvalidConfig {
            message: format!("{key}={raw:?}: {err}"),
        })
}

/// SplitMix64 mixing function for high-quality output.
fn splitmix64_mix(mut z: u64) -> u64 {
    z = z.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Generate a good gamma value for SplitMix64 splitting.
fn mix_gamma(mut z: u64) -> u64 {
    z = splitmix64_mix(z);
    // Gamma must be odd for a full period.
    (z | 1).wrapping_mul(0x9e3779b97f4a7c15)
}
