//! forall property-based testing library.
//!
//! This is the main entry point: it re-exports the core generators and
//! runner, the `Generate` derive macro when the `derive` feature is on, and
//! [`assert_forall`] for use inside `#[test]` functions.

pub use forall_core::*;

// Re-export derive macros when available
#[cfg(feature = "derive")]
pub use forall_derive::*;

use std::fmt::Debug;

/// Check a property and panic with the report if it fails.
///
/// The configuration comes from [`Config::from_env`], so a failing run can be
/// replayed by exporting the seed printed in the report.
#[track_caller]
pub fn assert_forall<T, F, R>(generator: Gen<T>, predicate: F)
where
    T: 'static + Debug + Clone,
    F: Fn(&T) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => panic!("{err}"),
    };
    assert_forall_with(generator, predicate, &config);
}

/// Check a property with an explicit configuration and panic with the
/// report if it fails.
#[track_caller]
pub fn assert_forall_with<T, F, R>(generator: Gen<T>, predicate: F, config: &Config)
where
    T: 'static + Debug + Clone,
    F: Fn(&T) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    check(generator, predicate, config).assert();
}
