use std::fmt;

use crate::{
    Arguments, Config, Effect, InvocationMatcher, Sequence, Spy, SpyId, in_order::OrderedStep,
    reporting::Failure,
};

/// A spy paired with an [`InvocationMatcher`].
///
/// Created by [`Spy::with`] and [`Spy::any`], and consumed by
/// [`when`](crate::when), [`verify`](crate::verify) and
/// [`verify_never`](crate::verify_never), or borrowed by
/// [`verify_in_order`](crate::verify_in_order). It borrows the spy and never
/// outlives it.
pub struct Interaction<'a, A, O, F> {
    spy: &'a Spy<A, O, F>,
    matcher: InvocationMatcher<A>,
}

impl<A, O, F: Effect> fmt::Debug for Interaction<'_, A, O, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Interaction")
            .field("spy", self.spy)
            .field("matcher", &self.matcher)
            .finish()
    }
}

impl<'a, A: Arguments, O: 'static, F: Effect> Interaction<'a, A, O, F> {
    pub(crate) fn new(spy: &'a Spy<A, O, F>, matcher: InvocationMatcher<A>) -> Self {
        Self { spy, matcher }
    }

    /// Returns the spy.
    pub fn spy(&self) -> &'a Spy<A, O, F> {
        self.spy
    }

    /// Returns the matcher.
    pub fn matcher(&self) -> &InvocationMatcher<A> {
        &self.matcher
    }

    pub(crate) fn into_parts(self) -> (&'a Spy<A, O, F>, InvocationMatcher<A>) {
        (self.spy, self.matcher)
    }

    /// Renders the interaction as a call, e.g. `price("apple")`.
    pub fn describe(&self) -> String {
        format!("{}{}", self.spy.id(), self.matcher.describe())
    }
}

impl<A: Arguments, O: 'static, F: Effect> OrderedStep for Interaction<'_, A, O, F> {
    fn spy_id(&self) -> &SpyId {
        self.spy.id()
    }

    fn config(&self) -> &Config {
        self.spy.config()
    }

    fn describe(&self) -> String {
        Interaction::describe(self)
    }

    fn first_match_after(&self, cursor: Sequence) -> Option<Sequence> {
        self.spy
            .invocations()
            .iter()
            .find(|invocation| {
                invocation.is_after(cursor) && self.matcher.matches(invocation.arguments())
            })
            .map(|invocation| invocation.sequence())
    }

    fn take_faults(&self) -> Vec<Failure> {
        self.spy.take_faults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArgMatcher, Plain};

    fn spy() -> Spy<(String,), u32, Plain> {
        let spy = Spy::new("price");
        spy.when((ArgMatcher::any(),)).then_return(1);
        spy
    }

    #[test]
    fn describe_renders_call() {
        let spy = spy();
        assert_eq!(spy.with(("apple",)).describe(), "price(\"apple\")");
        assert_eq!(spy.any().describe(), "price(any)");
    }

    #[test]
    fn first_match_after_skips_earlier_and_non_matching_calls() {
        let spy = spy();
        spy.resolve(("apple".into(),));
        spy.resolve(("pear".into(),));
        spy.resolve(("apple".into(),));
        let history = spy.invocations();

        let apple = spy.with(("apple",));
        assert_eq!(
            apple.first_match_after(Sequence::ZERO),
            Some(history[0].sequence())
        );
        assert_eq!(
            apple.first_match_after(history[0].sequence()),
            Some(history[2].sequence())
        );
        assert_eq!(apple.first_match_after(history[2].sequence()), None);
    }

    #[test]
    fn accessors() {
        let spy = spy();
        let interaction = spy.with(("apple",));
        assert_eq!(interaction.spy().id(), "price");
        assert_eq!(OrderedStep::spy_id(&interaction), "price");
        assert_eq!(interaction.matcher().arity(), 1);
    }
}
