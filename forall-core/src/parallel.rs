//! Parallel property execution.
//!
//! Trials are split into disjoint, contiguous index ranges, one per worker
//! thread. Trial seeds are derived exactly as in the sequential runner, so
//! the trial that fails first by index, its seed and its shrunk
//! counterexample are the same no matter how many threads run.

use crate::{data::*, error::*, gen::*, property::*};
use std::any::Any;
use std::fmt::Debug;
use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

/// What stopped a worker.
#[derive(Debug)]
enum TrialEvent {
    Failed(String),
    Aborted(Error),
    /// Drawing the trial panicked; re-raised on the calling thread.
    Panicked(Box<dyn Any + Send>),
}

impl<T> Property<T>
where
    T: 'static + Debug + Clone,
{
    /// Run this property on `config.threads` worker threads.
    ///
    /// Reports exactly what [`Property::check`] reports for the same seed.
    pub fn check_parallel(&self, config: &Config) -> TestResult<T> {
        let run_seed = config.run_seed();
        let seeds: Vec<Seed> = trial_seeds(run_seed).take(config.tests).collect();
        let threads = config.threads.clamp(1, seeds.len().max(1));
        let chunk_size = seeds.len().div_ceil(threads).max(1);

        log::info!(
            "checking {} trials on {threads} threads, seed {run_seed}",
            config.tests
        );

        // Lowest failing trial index seen so far; later trials are skipped.
        let first_event = AtomicUsize::new(usize::MAX);

        let events: Vec<(usize, TrialEvent)> = thread::scope(|scope| {
            let workers: Vec<_> = seeds
                .chunks(chunk_size)
                .enumerate()
                .map(|(chunk, chunk_seeds)| {
                    let first_event = &first_event;
                    scope.spawn(move || {
                        let offset = chunk * chunk_size;
                        self.run_chunk(offset, chunk_seeds, first_event)
                    })
                })
                .collect();

            workers
                .into_iter()
                .filter_map(|worker| match worker.join() {
                    Ok(event) => event,
                    Err(payload) => resume_unwind(payload),
                })
                .collect()
        });

        let Some((trial, event)) = events.into_iter().min_by_key(|(trial, _)| *trial) else {
            return TestResult::Pass {
                tests_run: config.tests,
                property_name: self.property_name(),
            };
        };

        let trial_seed = seeds[trial];
        match event {
            TrialEvent::Panicked(payload) => {
                log::debug!("trial {trial} panicked while drawing its input");
                resume_unwind(payload)
            }
            TrialEvent::Aborted(error) => TestResult::GaveUp {
                error,
                tests_run: trial,
                property_name: self.property_name(),
            },
            TrialEvent::Failed(reason) => match self.generator().generate(trial_seed) {
                Ok(tree) => self.report_failure(tree, reason, trial_seed, run_seed, trial, config),
                Err(error) => TestResult::GaveUp {
                    error,
                    tests_run: trial,
                    property_name: self.property_name(),
                },
            },
        }
    }

    /// Run one contiguous range of trials, stopping at the first event.
    fn run_chunk(
        &self,
        offset: usize,
        seeds: &[Seed],
        first_event: &AtomicUsize,
    ) -> Option<(usize, TrialEvent)> {
        for (i, &seed) in seeds.iter().enumerate() {
            let trial = offset + i;
            if first_event.load(Ordering::Relaxed) < trial {
                return None;
            }

            let event = match catch_unwind(AssertUnwindSafe(|| self.run_trial(seed))) {
                Ok(Ok(None)) => continue,
                Ok(Ok(Some((_, reason)))) => TrialEvent::Failed(reason),
                Ok(Err(error)) => TrialEvent::Aborted(error),
                Err(payload) => TrialEvent::Panicked(payload),
            };

            first_event.fetch_min(trial, Ordering::Relaxed);
            return Some((trial, event));
        }
        None
    }
}

/// Check `predicate` against `generator` on several threads.
pub fn check_parallel<T, F, R>(generator: Gen<T>, predicate: F, config: &Config) -> TestResult<T>
where
    T: 'static + Debug + Clone,
    F: Fn(&T) -> R + Send + Sync + 'static,
    R: IntoOutcome,
{
    Property::for_all(generator, predicate).check_parallel(config)
}
