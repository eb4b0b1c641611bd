use std::fmt;
use std::panic::Location;

use crate::{
    ArgMatcher, Arguments, Effect, Error, Fallible, Interaction, Invocation, InvocationMatcher,
    Spy, reporting::Failure,
};

/// Start verifying the calls matched by `interaction`.
///
/// ```
/// use mimic::{ArgMatcher, Spy, verify};
///
/// let price: Spy<(String,), u32> = Spy::new("price");
/// price.when((ArgMatcher::any(),)).then_return(1);
/// price.resolve(("apple".into(),));
///
/// assert!(verify(price.with(("apple",))).called());
/// assert_eq!(verify(price.with(("pear",))).count(), 0);
/// ```
pub fn verify<A: Arguments, O: 'static, F: Effect>(
    interaction: Interaction<'_, A, O, F>,
) -> Verifier<'_, A, O, F> {
    let (spy, matcher) = interaction.into_parts();
    Verifier::new(spy, Some(matcher))
}

/// Verify that no call matched by `interaction` was recorded.
///
/// Same as `verify(interaction).never_called()`.
#[track_caller]
pub fn verify_never<A: Arguments, O: 'static, F: Effect>(
    interaction: Interaction<'_, A, O, F>,
) -> bool {
    verify(interaction).never_called()
}

/// Answers verification queries about a spy's recorded calls.
///
/// Obtained from [`verify`] (calls matched by an interaction) or
/// [`Spy::verify`] (all calls). Every check returns true on success; on
/// failure it reports a [`Failure`] to the spy's
/// [`FailureReporter`](crate::reporting::FailureReporter), attributed to the
/// caller's source location, and returns false.
pub struct Verifier<'a, A, O, F> {
    spy: &'a Spy<A, O, F>,
    filter: Option<InvocationMatcher<A>>,
}

impl<A, O, F: Effect> fmt::Debug for Verifier<'_, A, O, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Verifier")
            .field("spy", self.spy)
            .field("filter", &self.filter)
            .finish()
    }
}

impl<'a, A: Arguments, O: 'static, F: Effect> Verifier<'a, A, O, F> {
    pub(crate) fn new(spy: &'a Spy<A, O, F>, filter: Option<InvocationMatcher<A>>) -> Self {
        Self { spy, filter }
    }

    fn accepts(&self, invocation: &Invocation<A>) -> bool {
        self.filter
            .as_ref()
            .is_none_or(|filter| filter.matches(invocation.arguments()))
    }

    fn describe(&self) -> String {
        match &self.filter {
            Some(filter) => format!("{}{}", self.spy.id(), filter.describe()),
            None => format!("{}(..)", self.spy.id()),
        }
    }

    /// Returns the number of recorded calls passing the filter.
    pub fn count(&self) -> usize {
        self.spy
            .invocations()
            .iter()
            .filter(|invocation| self.accepts(invocation))
            .count()
    }

    // ==================== Call counts ====================

    /// Check that the number of matching calls satisfies `expected`.
    ///
    /// Plain numbers check for an exact count; use [`ArgMatcher::ge`] and
    /// friends for ranges. Fails with [`Error::UnfulfilledCallCount`]
    /// carrying the observed count.
    ///
    /// Also fails if the spy has pending faults, see [`Spy::resolve`].
    #[track_caller]
    pub fn called_with_count(&self, expected: impl Into<ArgMatcher<usize>>) -> bool {
        let expected = expected.into();
        let clean = self.report_faults();
        let history = self.spy.invocations();
        let count = history
            .iter()
            .filter(|invocation| self.accepts(invocation))
            .count();

        if expected.matches(&count) {
            return clean;
        }

        let limit = self.spy.config().max_listed_invocations();
        let mut failure = Failure::new(
            Error::UnfulfilledCallCount(count),
            self.spy.id().clone(),
            Location::caller(),
        )
        .with_detail(format!(
            "expected {} calls matching {}",
            expected.description(),
            self.describe()
        ))
        .with_detail(format!("recorded calls: {}", history.len()));

        for invocation in history.iter().take(limit) {
            failure = failure.with_detail(format!(
                "{} {}{}",
                invocation.sequence(),
                self.spy.id(),
                invocation.arguments().describe()
            ));
        }
        if history.len() > limit {
            failure = failure.with_detail(format!("... and {} more", history.len() - limit));
        }

        self.fail(&failure)
    }

    /// Check that at least one matching call was recorded.
    #[track_caller]
    pub fn called(&self) -> bool {
        self.called_with_count(ArgMatcher::<usize>::ge(1))
    }

    /// Check that exactly `times` matching calls were recorded.
    #[track_caller]
    pub fn called_times(&self, times: usize) -> bool {
        self.called_with_count(times)
    }

    /// Check that no matching call was recorded.
    #[track_caller]
    pub fn never_called(&self) -> bool {
        self.called_with_count(0)
    }

    /// Reports the spy's pending faults. Returns true if there were none.
    fn report_faults(&self) -> bool {
        let faults = self.spy.take_faults();
        for fault in &faults {
            self.fail(fault);
        }
        faults.is_empty()
    }

    fn fail(&self, failure: &Failure) -> bool {
        tracing::debug!(
            spy = %self.spy.id(),
            error = %failure.error(),
            location = %failure.location(),
            "verification failed"
        );
        self.spy.config().reporter().report_failure(failure);
        false
    }
}

impl<A: Arguments, O: 'static, F: Fallible> Verifier<'_, A, O, F> {
    // ==================== Thrown errors ====================

    /// Returns every error the matching calls could have produced.
    ///
    /// For each matching call, the outcome of *every* stub accepting its
    /// arguments is evaluated again, not only the stub that answered the
    /// call. A call no stub accepts, or accepted by a stub without an
    /// outcome, contributes an [`Error::Unstubbed`].
    ///
    /// Stub closures run once more per (call, stub) pair.
    pub fn thrown_errors(&self) -> Vec<Error> {
        let (history, stubs) = self.spy.snapshot();
        let mut errors = Vec::new();

        for invocation in history.iter().filter(|invocation| self.accepts(invocation)) {
            let arguments = invocation.arguments();
            let mut matched = false;
            for stub in stubs.iter().filter(|stub| stub.matches(arguments)) {
                matched = true;
                match stub.outcome() {
                    Some(outcome) => {
                        if let Err(error) = outcome.evaluate(arguments) {
                            errors.push(error);
                        }
                    }
                    None => errors.push(Error::unstubbed(self.spy.id(), arguments.describe())),
                }
            }
            if !matched {
                errors.push(Error::unstubbed(self.spy.id(), arguments.describe()));
            }
        }

        errors
    }

    /// Check that the matching calls could have produced an error.
    ///
    /// Fails with [`Error::DidNotThrow`] if [`thrown_errors`](Self::thrown_errors)
    /// is empty.
    #[track_caller]
    pub fn throws(&self) -> bool {
        self.throws_matching(ArgMatcher::<Error>::any())
    }

    /// Check that the matching calls could have produced an error satisfying
    /// `expected`.
    ///
    /// Fails with [`Error::DidNotThrow`] if no error was found at all, and
    /// with [`Error::DidNotMatchThrownError`] listing the found errors if none
    /// of them satisfies `expected`.
    #[track_caller]
    pub fn throws_matching(&self, expected: impl Into<ArgMatcher<Error>>) -> bool {
        let expected = expected.into();
        let errors = self.thrown_errors();

        if errors.iter().any(|error| expected.matches(error)) {
            return true;
        }

        let error = if errors.is_empty() {
            Error::DidNotThrow
        } else {
            Error::DidNotMatchThrownError(errors)
        };
        let failure = Failure::new(error, self.spy.id().clone(), Location::caller()).with_detail(
            format!(
                "expected {} from calls matching {}",
                expected.description(),
                self.describe()
            ),
        );
        self.fail(&failure)
    }
}
