use std::fmt;
use std::sync::Arc;

use crate::Arguments;

type Predicate<A> = Arc<dyn Fn(&A) -> bool + Send + Sync>;

/// One [`ArgMatcher`](crate::ArgMatcher) per parameter of a call.
///
/// Matches a call iff every positional matcher accepts the corresponding
/// argument. Positions are checked left to right and the first rejection
/// stops the check. The arity is fixed by the argument tuple type `A`.
///
/// Built from a tuple of matchers (or of plain values, which match by
/// equality), usually implicitly through [`Spy::with`](crate::Spy::with):
///
/// ```
/// use mimic::{ArgMatcher, IntoInvocationMatcher, InvocationMatcher};
///
/// let matcher: InvocationMatcher<(String, u32)> =
///     ("apple", ArgMatcher::gt(2)).into_invocation_matcher();
///
/// assert!(matcher.matches(&("apple".to_string(), 3)));
/// assert!(!matcher.matches(&("apple".to_string(), 2)));
/// assert_eq!(matcher.describe(), "(\"apple\", > 2)");
/// ```
pub struct InvocationMatcher<A> {
    descriptions: Vec<String>,
    predicate: Predicate<A>,
}

impl<A> Clone for InvocationMatcher<A> {
    fn clone(&self) -> Self {
        Self {
            descriptions: self.descriptions.clone(),
            predicate: self.predicate.clone(),
        }
    }
}

impl<A> fmt::Debug for InvocationMatcher<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvocationMatcher")
            .field("positions", &self.descriptions)
            .finish_non_exhaustive()
    }
}

impl<A: Arguments> InvocationMatcher<A> {
    pub(crate) fn new<F>(descriptions: Vec<String>, predicate: F) -> Self
    where
        F: Fn(&A) -> bool + Send + Sync + 'static,
    {
        debug_assert_eq!(descriptions.len(), A::ARITY);
        Self {
            descriptions,
            predicate: Arc::new(predicate),
        }
    }

    /// Match every call.
    pub fn any() -> Self {
        A::any_matcher()
    }

    /// Returns true if every positional matcher accepts its argument.
    #[inline]
    pub fn matches(&self, arguments: &A) -> bool {
        (self.predicate)(arguments)
    }

    /// Returns the number of positions.
    pub fn arity(&self) -> usize {
        self.descriptions.len()
    }

    /// Renders the positional matchers, e.g. `("apple", any)`.
    pub fn describe(&self) -> String {
        format!("({})", self.descriptions.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::{ArgMatcher, IntoInvocationMatcher};

    #[test]
    fn all_positions_must_match() {
        let matcher: InvocationMatcher<(i32, i32)> = (1, 2).into_invocation_matcher();
        assert!(matcher.matches(&(1, 2)));
        assert!(!matcher.matches(&(1, 3)));
        assert!(!matcher.matches(&(0, 2)));
    }

    #[test]
    fn short_circuits_on_first_rejection() {
        static SECOND_CHECKED: AtomicUsize = AtomicUsize::new(0);

        let matcher: InvocationMatcher<(i32, i32)> = (
            ArgMatcher::eq(1),
            ArgMatcher::matching("counted", |_: &i32| {
                SECOND_CHECKED.fetch_add(1, Ordering::SeqCst);
                true
            }),
        )
            .into_invocation_matcher();

        assert!(!matcher.matches(&(0, 0)));
        assert_eq!(SECOND_CHECKED.load(Ordering::SeqCst), 0);

        assert!(matcher.matches(&(1, 0)));
        assert_eq!(SECOND_CHECKED.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn any_matches_every_call() {
        let matcher = InvocationMatcher::<(String, u8, bool)>::any();
        assert!(matcher.matches(&("x".into(), 0, false)));
        assert_eq!(matcher.arity(), 3);
        assert_eq!(matcher.describe(), "(any, any, any)");
    }

    #[test]
    fn zero_arity_matches_unit() {
        let matcher = InvocationMatcher::<()>::any();
        assert!(matcher.matches(&()));
        assert_eq!(matcher.describe(), "()");
    }
}
