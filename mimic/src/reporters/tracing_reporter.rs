use crate::reporting::{Failure, FailureReporter};

/// Logs failures to the `tracing` crate at `warn` level without failing.
///
/// Useful for exploratory runs where a test should keep going and the
/// subscriber output is inspected afterwards.
///
/// # Example
///
/// ```ignore
/// use mimic::reporters::TracingReporter;
///
/// let config = Config::default().with_reporter(TracingReporter);
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl FailureReporter for TracingReporter {
    fn report_failure(&self, failure: &Failure) {
        tracing::warn!(
            spy = %failure.spy(),
            location = %failure.location(),
            error = %failure.error(),
            details = ?failure.details(),
            "verification failed"
        );
    }
}
