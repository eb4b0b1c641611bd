use std::panic::Location;

use crate::{Config, Error, Sequence, SpyId, reporting::Failure};

/// One step of an ordering check.
///
/// Implemented by [`Interaction`](crate::Interaction); lets
/// [`verify_in_order`] mix interactions with spies of different argument,
/// output and effect types.
pub trait OrderedStep {
    /// Returns the name of the spy the step refers to.
    fn spy_id(&self) -> &SpyId;

    /// Returns the configuration of the spy the step refers to.
    fn config(&self) -> &Config;

    /// Renders the step as a call, e.g. `price("apple")`.
    fn describe(&self) -> String;

    /// Returns the sequence number of the first matching call recorded
    /// strictly after `cursor`.
    fn first_match_after(&self, cursor: Sequence) -> Option<Sequence>;

    /// Removes the faults pending on the step's spy, see
    /// [`Spy::resolve`](crate::Spy::resolve).
    fn take_faults(&self) -> Vec<Failure>;
}

/// Verify that calls matching `steps` happened in the given order.
///
/// Steps are located greedily: each step takes the earliest matching call
/// recorded after the call taken by the previous step. Other calls may happen
/// in between. Because sequence numbers are global, steps may refer to
/// different spies.
///
/// Returns true on success. On failure, reports [`Error::OutOfOrder`] naming
/// the first step that could not be located to the reporter of that step's
/// spy, and returns false. Pending faults of the involved spies are reported
/// first and fail the check too. An empty list always succeeds.
///
/// # Example
///
/// ```
/// use mimic::{ArgMatcher, Plain, Spy, verify_in_order};
///
/// let open: Spy<(String,), (), Plain> = Spy::new("open");
/// let close: Spy<(String,), (), Plain> = Spy::new("close");
/// open.when((ArgMatcher::any(),)).then_return(());
/// close.when((ArgMatcher::any(),)).then_return(());
///
/// open.resolve(("a.txt".into(),));
/// close.resolve(("a.txt".into(),));
///
/// assert!(verify_in_order(&[&open.with(("a.txt",)), &close.with(("a.txt",))]));
/// ```
#[track_caller]
pub fn verify_in_order(steps: &[&dyn OrderedStep]) -> bool {
    let location = Location::caller();
    let mut clean = true;
    for step in steps {
        for fault in step.take_faults() {
            tracing::debug!(spy = %fault.spy(), error = %fault.error(), "pending fault reported");
            step.config().reporter().report_failure(&fault);
            clean = false;
        }
    }

    let mut cursor = Sequence::ZERO;
    for (index, step) in steps.iter().enumerate() {
        match step.first_match_after(cursor) {
            Some(sequence) => cursor = sequence,
            None => {
                let expected = steps
                    .iter()
                    .map(|s| s.describe())
                    .collect::<Vec<_>>()
                    .join(" -> ");
                let failure = Failure::new(
                    Error::OutOfOrder {
                        step: index,
                        interaction: step.describe(),
                    },
                    step.spy_id().clone(),
                    location,
                )
                .with_detail(format!("expected order: {expected}"))
                .with_detail(format!("matched up to sequence {cursor}"));

                tracing::debug!(
                    spy = %step.spy_id(),
                    step = index,
                    error = %failure.error(),
                    "ordering verification failed"
                );
                step.config().reporter().report_failure(&failure);
                return false;
            }
        }
    }

    clean
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArgMatcher, Plain, Spy, Throwing, reporters::CollectingReporter};

    fn spy<F: crate::Effect>(name: &str, failures: &CollectingReporter) -> Spy<(String,), u8, F> {
        let spy = Spy::with_config(name, Config::default().with_reporter(failures.clone()));
        spy.when((ArgMatcher::any(),)).then_return(0);
        spy
    }

    #[test]
    fn order_across_spies() {
        let failures = CollectingReporter::new();
        let a: Spy<_, _, Plain> = spy("a", &failures);
        let b: Spy<_, _, Plain> = spy("b", &failures);

        a.resolve(("x".into(),));
        b.resolve(("y".into(),));

        assert!(verify_in_order(&[&a.with(("x",)), &b.with(("y",))]));
        assert!(!verify_in_order(&[&b.with(("y",)), &a.with(("x",))]));

        assert_eq!(
            failures.errors(),
            vec![Error::OutOfOrder {
                step: 1,
                interaction: "a(\"x\")".into()
            }]
        );
        assert_eq!(failures.failures()[0].spy(), "a");
    }

    #[test]
    fn gaps_are_allowed() {
        let failures = CollectingReporter::new();
        let a: Spy<_, _, Plain> = spy("a", &failures);

        a.resolve(("1".into(),));
        a.resolve(("2".into(),));
        a.resolve(("3".into(),));

        assert!(verify_in_order(&[&a.with(("1",)), &a.with(("3",))]));
        assert!(failures.is_empty());
    }

    #[test]
    fn repeated_steps_need_repeated_calls() {
        let failures = CollectingReporter::new();
        let a: Spy<_, _, Plain> = spy("a", &failures);

        a.resolve(("x".into(),));
        let x = a.with(("x",));
        assert!(!verify_in_order(&[&x, &x]));

        a.resolve(("x".into(),));
        assert!(verify_in_order(&[&x, &x]));
    }

    #[test]
    fn mixes_effects_and_types() {
        let failures = CollectingReporter::new();
        let plain: Spy<_, _, Plain> = spy("plain", &failures);
        let fallible: Spy<(u32, bool), (), Throwing> = Spy::new("fallible");

        let _ = fallible.resolve_throwing((1, true));
        plain.resolve(("x".into(),));

        assert!(verify_in_order(&[&fallible.any(), &plain.any()]));
    }

    #[test]
    fn missing_step_is_reported() {
        let failures = CollectingReporter::new();
        let a: Spy<_, _, Plain> = spy("a", &failures);
        a.resolve(("x".into(),));

        assert!(!verify_in_order(&[&a.with(("x",)), &a.with(("never",))]));
        let failure = &failures.failures()[0];
        assert_eq!(failure.location().file(), file!());
        assert!(failure.details()[0].contains("a(\"x\") -> a(\"never\")"));
    }

    #[test]
    fn pending_faults_fail_ordering() {
        let failures = CollectingReporter::new();
        let a: Spy<_, _, Plain> = spy("a", &failures);
        let unstubbed: Spy<(u8,), u8> =
            Spy::with_config("unstubbed", Config::default().with_reporter(failures.clone()));

        let clone = unstubbed.clone();
        let _ = std::panic::catch_unwind(std::panic::AssertUnwindSafe(move || clone.resolve((1,))));
        a.resolve(("x".into(),));

        assert!(!verify_in_order(&[&unstubbed.any(), &a.any()]));
        assert_eq!(failures.len(), 1);
        assert!(failures.errors()[0].is_unstubbed());

        assert!(verify_in_order(&[&unstubbed.any(), &a.any()]));
    }

    #[test]
    fn empty_order_succeeds() {
        assert!(verify_in_order(&[]));
    }
}
