use std::{fmt, panic::Location};

use crate::{Error, SpyId};

/// A failed verification, ready to be reported.
///
/// Carries the [`Error`] describing what went wrong, the spy it concerns, the
/// source location of the verifying call and free-form detail lines (the
/// expectation, the recorded calls).
#[derive(Debug, Clone)]
pub struct Failure {
    error: Error,
    spy: SpyId,
    location: &'static Location<'static>,
    details: Vec<String>,
}

impl Failure {
    pub(crate) fn new(error: Error, spy: SpyId, location: &'static Location<'static>) -> Self {
        Self {
            error,
            spy,
            location,
            details: Vec::new(),
        }
    }

    pub(crate) fn with_detail(mut self, line: impl Into<String>) -> Self {
        self.details.push(line.into());
        self
    }

    /// Returns the error describing the failure.
    #[inline]
    pub fn error(&self) -> &Error {
        &self.error
    }

    /// Returns the spy the failed check was made against.
    #[inline]
    pub fn spy(&self) -> &SpyId {
        &self.spy
    }

    /// Returns the source location of the verifying call.
    #[inline]
    pub fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Returns the detail lines attached to the failure.
    pub fn details(&self) -> &[String] {
        &self.details
    }

    /// Renders the full multi-line message.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: verification of `{}` failed: {}",
            self.location, self.spy, self.error
        )?;
        for line in &self.details {
            write!(f, "\n  {line}")?;
        }
        Ok(())
    }
}
