use std::{fmt, sync::Arc};

use crate::reporting::FailureReporter;
use crate::reporters::PanicReporter;

/// Per-spy configuration.
///
/// Controls where verification failures go and how much of the call history
/// a failure message lists. Use the builder methods to customize, or
/// [`Default`] for panicking assertions that behave like `assert!`.
///
/// # Examples
///
/// ```rust
/// use mimic::{Config, Plain, Spy};
/// use mimic::reporters::CollectingReporter;
///
/// let failures = CollectingReporter::new();
/// let config = Config::default()
///     .with_reporter(failures.clone())        // collect instead of panicking
///     .with_max_listed_invocations(3);        // shorter failure messages
///
/// let spy: Spy<(u32,), u32, Plain> = Spy::with_config("price", config);
/// spy.verify().called();
/// assert_eq!(failures.len(), 1);
/// ```
#[derive(Clone)]
pub struct Config {
    /// Receives every verification failure.
    /// Default: [`PanicReporter`]
    reporter: Arc<dyn FailureReporter>,

    /// Number of recorded calls listed in a call-count failure.
    /// Default: 10
    max_listed_invocations: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            reporter: Arc::new(PanicReporter),
            max_listed_invocations: 10,
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("max_listed_invocations", &self.max_listed_invocations)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Route verification failures to `reporter`.
    pub fn with_reporter<R: FailureReporter + 'static>(self, reporter: R) -> Self {
        self.with_shared_reporter(Arc::new(reporter))
    }

    /// Route verification failures to an already shared reporter.
    pub fn with_shared_reporter(mut self, reporter: Arc<dyn FailureReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Returns the failure reporter.
    pub fn reporter(&self) -> &Arc<dyn FailureReporter> {
        &self.reporter
    }

    /// Set how many recorded calls a call-count failure lists.
    pub fn with_max_listed_invocations(mut self, limit: usize) -> Self {
        self.max_listed_invocations = limit;
        self
    }

    /// Returns how many recorded calls a call-count failure lists.
    pub fn max_listed_invocations(&self) -> usize {
        self.max_listed_invocations
    }
}
