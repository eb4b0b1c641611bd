use crate::reporting::Failure;

/// Receives verification failures.
///
/// Implement this to plug Mimic into a test framework that does not treat
/// panics as failures, or to collect failures for later inspection.
///
/// Reporters are shared between threads (a spy can be verified from any
/// thread), hence the `Send + Sync` bound.
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use mimic::reporting::{Failure, FailureReporter};
///
/// #[derive(Default)]
/// struct Counter(AtomicUsize);
///
/// impl FailureReporter for Counter {
///     fn report_failure(&self, _failure: &Failure) {
///         self.0.fetch_add(1, Ordering::Relaxed);
///     }
/// }
/// ```
pub trait FailureReporter: Send + Sync {
    /// Called once per failed verification.
    fn report_failure(&self, failure: &Failure);
}
