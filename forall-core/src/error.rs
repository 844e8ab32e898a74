//! Error and report types for forall property testing.

use crate::data::{Seed, ENV_SEED};
use std::fmt;
use thiserror::Error;

/// Main error type for forall.
///
/// Property failures are not errors: they are reported through
/// [`TestResult::Fail`]. Only conditions that stop generation itself end up
/// here.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A filtered generator found no acceptable value within its retry bound.
    #[error("Unsatisfiable filter: no value passed after {retries} attempts")]
    UnsatisfiableFilter { retries: usize },

    /// Invalid generator construction.
    #[error("Invalid generator: {message}")]
    InvalidGenerator { message: String },

    /// Invalid configuration.
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

/// Result type for forall operations.
pub type Result<T> = std::result::Result<T, Error>;

/// A minimized failing input, with everything needed to replay it.
#[derive(Debug, Clone, PartialEq)]
pub struct Counterexample<T> {
    /// The value that first failed.
    pub original: T,
    /// The smallest failing value shrinking found.
    pub minimal: T,
    /// Why the minimal value failed.
    pub reason: String,
    /// The trial seed that generated `original`.
    pub seed: Seed,
    /// The run seed; rerunning with it reproduces the whole run.
    pub run_seed: u64,
    /// Zero-based index of the failing trial.
    pub trial: usize,
    /// Number of accepted shrink steps between `original` and `minimal`.
    pub shrink_steps: usize,
}

/// Outcome of a property check.
#[derive(Debug, Clone, PartialEq)]
pub enum TestResult<T> {
    /// Every trial passed.
    Pass {
        tests_run: usize,
        property_name: Option<String>,
    },

    /// A trial failed; shrinking produced a counterexample.
    Fail {
        counterexample: Counterexample<T>,
        tests_run: usize,
        property_name: Option<String>,
    },

    /// Generation aborted before the property could be decided.
    GaveUp {
        error: Error,
        tests_run: usize,
        property_name: Option<String>,
    },
}

impl<T> TestResult<T> {
    /// Whether every trial passed.
    pub fn is_pass(&self) -> bool {
        matches!(self, TestResult::Pass { .. })
    }

    /// The counterexample, if the property failed.
    pub fn counterexample(&self) -> Option<&Counterexample<T>> {
        match self {
            TestResult::Fail { counterexample, .. } => Some(counterexample),
            _ => None,
        }
    }

    /// Number of trials evaluated.
    pub fn tests_run(&self) -> usize {
        match self {
            TestResult::Pass { tests_run, .. }
            | TestResult::Fail { tests_run, .. }
            | TestResult::GaveUp { tests_run, .. } => *tests_run,
        }
    }

    /// Attach a property name used in the report.
    pub fn with_property_name(mut self, name: Option<String>) -> Self {
        match &mut self {
            TestResult::Pass { property_name, .. }
            | TestResult::Fail { property_name, .. }
            | TestResult::GaveUp { property_name, .. } => *property_name = name,
        }
        self
    }
}

impl<T: fmt::Debug> TestResult<T> {
    /// Panic with the formatted report unless every trial passed.
    #[track_caller]
    pub fn assert(self) {
        if !self.is_pass() {
            panic!("{self}");
        }
    }
}

impl<T: fmt::Debug> fmt::Display for TestResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestResult::Pass {
                tests_run,
                property_name,
            } => {
                let prop_name = property_name.as_deref().unwrap_or("property");
                write!(f, "  ✓ {} passed {} tests.", prop_name, tests_run)
            }
            TestResult::Fail {
                counterexample,
                tests_run,
                property_name,
            } => {
                let prop_name = property_name.as_deref().unwrap_or("property");
                writeln!(
                    f,
                    "  ✗ {} failed after {} tests and {} shrinks.",
                    prop_name, tests_run, counterexample.shrink_steps
                )?;
                writeln!(f)?;
                writeln!(f, "    Original: {:?}", counterexample.original)?;
                writeln!(f, "    Reason: {}", counterexample.reason)?;
                writeln!(f, "    Minimal counterexample: {:?}", counterexample.minimal)?;
                write!(
                    f,
                    "    Replay with {}={} (trial {}, {})",
                    ENV_SEED, counterexample.run_seed, counterexample.trial, counterexample.seed
                )
            }
            TestResult::GaveUp {
                error,
                tests_run,
                property_name,
            } => {
                let prop_name = property_name.as_deref().unwrap_or("property");
                write!(
                    f,
                    "  ⚐ {} gave up after {} tests: {}",
                    prop_name, tests_run, error
                )
            }
        }
    }
}
