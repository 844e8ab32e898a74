//! Property definitions and the property runner.

use crate::{data::*, error::*, gen::*, tree::*};
use std::cell::Cell;
use std::fmt::{self, Debug};
use std::panic::{self, catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Once};

/// Result of evaluating a property on one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The property held.
    Pass,
    /// The property did not hold, with the reason.
    Fail(String),
}

impl Outcome {
    /// Whether the property held.
    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }
}

/// Anything a property body may return.
pub trait IntoOutcome {
    fn into_outcome(self) -> Outcome;
}

impl IntoOutcome for Outcome {
    fn into_outcome(self) -> Outcome {
        self
    }
}

impl IntoOutcome for bool {
    fn into_outcome(self) -> Outcome {
        if self {
            Outcome::Pass
        } else {
            Outcome::Fail("property returned false".to_string())
        }
    }
}

/// Bodies that only assert pass unless they panic.
impl IntoOutcome for () {
    fn into_outcome(self) -> Outcome {
        Outcome::Pass
    }
}

impl<E: fmt::Display> IntoOutcome for std::result::Result<(), E> {
    fn into_outcome(self) -> Outcome {
        match self {
            Ok(()) => Outcome::Pass,
            Err(err) => Outcome::Fail(err.to_string()),
        }
    }
}

type TestFn<T> = dyn Fn(&T) -> Outcome + Send + Sync;

/// A property that can be tested with generated inputs.
pub struct Property<T> {
    generator: Gen<T>,
    test_function: Arc<TestFn<T>>,
    name: Option<String>,
}

impl<T> Clone for Property<T> {
    fn clone(&self) -> Self {
        Property {
            generator: self.generator.clone(),
            test_function: Arc::clone(&self.test_function),
            name: self.name.clone(),
        }
    }
}

impl<T> Property<T>
where
    T: 'static + Debug + Clone,
{
    /// Create a property that must hold for every generated value.
    pub fn for_all<F, R>(generator: Gen<T>, predicate: F) -> Self
    where
        F: Fn(&T) -> R + Send + Sync + 'static,
        R: IntoOutcome,
    {
        Property {
            generator,
            test_function: Arc::new(move |input| predicate(input).into_outcome()),
            name: None,
        }
    }

    /// Name the property for reports.
    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// The generator feeding this property.
    pub fn generator(&self) -> &Gen<T> {
        &self.generator
    }

    /// Evaluate the property on one value.
    ///
    /// A panicking body counts as a failure carrying the panic message. The
    /// installed panic hook still reports the panic; shrinking evaluates
    /// through [`Property::evaluate_quietly`] instead.
    pub fn evaluate(&self, value: &T) -> Outcome {
        match catch_unwind(AssertUnwindSafe(|| (self.test_function)(value))) {
            Ok(outcome) => outcome,
            Err(payload) => Outcome::Fail(format!("panicked: {}", panic_message(&*payload))),
        }
    }

    /// Evaluate like [`Property::evaluate`] without reporting panics through
    /// the panic hook on this thread.
    pub fn evaluate_quietly(&self, value: &T) -> Outcome {
        install_quiet_hook();
        QUIET_PANICS.with(|quiet| quiet.set(true));
        let outcome = self.evaluate(value);
        QUIET_PANICS.with(|quiet| quiet.set(false));
        outcome
    }

    /// Run this property with the given configuration.
    pub fn check(&self, config: &Config) -> TestResult<T> {
        let run_seed = config.run_seed();
        log::info!("{}: checking {} trials, seed {run_seed}", self.label(), config.tests);

        for (trial, trial_seed) in trial_seeds(run_seed).take(config.tests).enumerate() {
            match self.run_trial(trial_seed) {
                Ok(None) => continue,
                Ok(Some((tree, reason))) => {
                    return self.report_failure(tree, reason, trial_seed, run_seed, trial, config)
                }
                Err(error) => {
                    log::debug!("{}: generation aborted at trial {trial}: {error}", self.label());
                    return TestResult::GaveUp {
                        error,
                        tests_run: trial,
                        property_name: self.name.clone(),
                    };
                }
            }
        }

        TestResult::Pass {
            tests_run: config.tests,
            property_name: self.name.clone(),
        }
    }

    /// Draw one trial; `Some` carries the failing tree and reason.
    pub(crate) fn run_trial(&self, trial_seed: Seed) -> Result<Option<(Tree<T>, String)>> {
        let tree = self.generator.generate(trial_seed)?;
        match self.evaluate(&tree.value) {
            Outcome::Pass => Ok(None),
            Outcome::Fail(reason) => Ok(Some((tree, reason))),
        }
    }

    /// Shrink a failing tree and build the report.
    pub(crate) fn report_failure(
        &self,
        tree: Tree<T>,
        reason: String,
        trial_seed: Seed,
        run_seed: u64,
        trial: usize,
        config: &Config,
    ) -> TestResult<T> {
        log::debug!("{}: trial {trial} failed on {:?}: {reason}", self.label(), tree.value);

        let original = tree.value.clone();
        let (minimal, reason, shrink_steps) = self.shrink_failure(tree, reason, config.shrinks);

        log::debug!(
            "{}: shrunk to {minimal:?} in {shrink_steps} steps",
            self.label()
        );

        TestResult::Fail {
            counterexample: Counterexample {
                original,
                minimal,
                reason,
                seed: trial_seed,
                run_seed,
                trial,
                shrink_steps,
            },
            tests_run: trial + 1,
            property_name: self.name.clone(),
        }
    }

    /// Greedy descent: the first still-failing child becomes the new best,
    /// until no child fails or the step budget is spent.
    fn shrink_failure(&self, tree: Tree<T>, reason: String, budget: usize) -> (T, String, usize) {
        let mut current = tree;
        let mut reason = reason;
        let mut steps = 0;

        'shrinking: while steps < budget {
            for child in current.children() {
                if let Outcome::Fail(why) = self.evaluate_quietly(&child.value) {
                    steps += 1;
                    log::trace!("{}: shrink step {steps}: {:?}", self.label(), child.value);
                    current = child;
                    reason = why;
                    continue 'shrinking;
                }
            }
            break;
        }

        (current.value, reason, steps)
    }

    pub(crate) fn property_name(&self) -> Option<String> {
        self.name.clone()
    }

    fn label(&self) -> &str {
        self.name.as_deref().unwrap_or("property")
    }
}

thread_local! {
    /// Set while panics on this thread are expected and captured.
    static QUIET_PANICS: Cell<bool> = const { Cell::new(false) };
}

static QUIET_HOOK: Once = Once::new();

/// Wrap the current panic hook so it stays silent while [`QUIET_PANICS`] is set.
fn install_quiet_hook() {
    QUIET_HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            if !QUIET_PANICS.with(Cell::get) {
                previous(info);
            }
        }));
    });
}

/// Per-trial seeds of a run, split off one after another.
pub(crate) fn trial_seeds(run_seed: u64) -> impl Iterator<Item = Seed> {
    let mut seed = Seed::from_u64(run_seed);
    std::iter::from_fn(move || {
        let (trial_seed, next) = seed.split();
        seed = next;
        Some(trial_seed)
    })
}

pub(crate) fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Create a property that must hold for every generated value.
pub fn for_all<T, F, R>(generator: Gen<T>, predicate: F) -> Property<T>
where
    T: 'static + Debug + Clone,
    F: Fn(&T) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    Property::for_all(generator, predicate)
}

/// Check `predicate` against `generator` with the given configuration.
pub fn check<T, F, R>(generator: Gen<T>, predicate: F, config: &Config) -> TestResult<T>
where
    T: 'static + Debug + Clone,
    F: Fn(&T) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    Property::for_all(generator, predicate).check(config)
}
