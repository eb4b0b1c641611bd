use crate::reporting::{Failure, FailureReporter};

/// Fails the current test by panicking with the failure message.
///
/// This is the default reporter. Rust test harnesses treat a panic as a test
/// failure, so verifications behave like `assert!`.
#[derive(Debug, Default, Clone, Copy)]
pub struct PanicReporter;

impl FailureReporter for PanicReporter {
    fn report_failure(&self, failure: &Failure) {
        panic!("{failure}");
    }
}

#[cfg(test)]
mod tests {
    use std::panic::Location;

    use super::*;
    use crate::{Error, SpyId};

    #[test]
    #[should_panic(expected = "verification of `fetch` failed")]
    fn panics_with_failure_message() {
        let failure = Failure::new(
            Error::UnfulfilledCallCount(3),
            SpyId::new("fetch"),
            Location::caller(),
        );
        PanicReporter.report_failure(&failure);
    }
}
