use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    Error,
    reporting::{Failure, FailureReporter},
};

/// Stores every reported failure instead of failing the test.
///
/// Clones share the same storage: keep one clone in the test and hand the
/// other to [`Config::with_reporter`](crate::Config::with_reporter).
///
/// # Example
///
/// ```rust
/// use mimic::{Config, Error, Plain, Spy};
/// use mimic::reporters::CollectingReporter;
///
/// let failures = CollectingReporter::new();
/// let spy: Spy<(&'static str,), u32, Plain> =
///     Spy::with_config("price", Config::default().with_reporter(failures.clone()));
///
/// assert!(!mimic::verify(spy.with(("pear",))).called_times(1));
/// assert_eq!(failures.errors(), vec![Error::UnfulfilledCallCount(0)]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct CollectingReporter {
    failures: Arc<Mutex<Vec<Failure>>>,
}

impl CollectingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of all failures reported so far.
    pub fn failures(&self) -> Vec<Failure> {
        self.failures.lock().clone()
    }

    /// Returns the errors of all failures reported so far.
    pub fn errors(&self) -> Vec<Error> {
        self.failures
            .lock()
            .iter()
            .map(|f| f.error().clone())
            .collect()
    }

    /// Removes and returns all failures reported so far.
    pub fn take(&self) -> Vec<Failure> {
        std::mem::take(&mut *self.failures.lock())
    }

    pub fn len(&self) -> usize {
        self.failures.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.lock().is_empty()
    }
}

impl FailureReporter for CollectingReporter {
    fn report_failure(&self, failure: &Failure) {
        self.failures.lock().push(failure.clone());
    }
}
