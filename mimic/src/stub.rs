use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    Arguments, Effect, Error, Fallible, Interaction, InvocationMatcher, Outcome, Result, SpyId,
};

type OutcomeSlot<A, O> = Arc<Mutex<Option<Outcome<A, O>>>>;

/// A registered (matcher, outcome) pair, owned by a spy.
pub(crate) struct Stub<A, O> {
    matcher: InvocationMatcher<A>,
    outcome: OutcomeSlot<A, O>,
}

impl<A: Arguments, O> Stub<A, O> {
    pub(crate) fn new(matcher: InvocationMatcher<A>) -> Self {
        Self {
            matcher,
            outcome: Arc::new(Mutex::new(None)),
        }
    }

    #[inline]
    pub(crate) fn matches(&self, arguments: &A) -> bool {
        self.matcher.matches(arguments)
    }

    pub(crate) fn matcher(&self) -> &InvocationMatcher<A> {
        &self.matcher
    }

    /// Returns the outcome set so far, if any.
    pub(crate) fn outcome(&self) -> Option<Outcome<A, O>> {
        self.outcome.lock().clone()
    }
}

impl<A, O> Clone for Stub<A, O> {
    fn clone(&self) -> Self {
        Self {
            matcher: self.matcher.clone(),
            outcome: self.outcome.clone(),
        }
    }
}

/// Register a stub for the calls matched by `interaction`.
///
/// The stub is appended to the spy's stub list; set its outcome through the
/// returned handle.
pub fn when<A: Arguments, O: 'static, F: Effect>(
    interaction: Interaction<'_, A, O, F>,
) -> StubHandle<A, O, F> {
    let (spy, matcher) = interaction.into_parts();
    spy.register_stub(matcher)
}

/// Sets the outcome of a freshly registered stub.
///
/// Returned by [`when`](crate::when) and [`Spy::when`](crate::Spy::when).
/// Until one of the `then_*` methods is called the stub has no outcome, and a
/// call it wins resolves as [`Error::Unstubbed`]. Setting an outcome again
/// replaces the previous one.
///
/// # Example
///
/// ```
/// use mimic::{ArgMatcher, Spy, Throwing, when};
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("no such item")]
/// struct NoSuchItem;
///
/// let fetch: Spy<(u64,), String, Throwing> = Spy::new("fetch");
/// when(fetch.with((1,))).then_return("one".to_string());
/// when(fetch.with((ArgMatcher::gt(100),))).then_throw(NoSuchItem);
/// when(fetch.any()).then_return_with(|(id,)| format!("item {id}"));
///
/// assert_eq!(fetch.resolve_throwing((1,)).unwrap(), "one");
/// assert!(fetch.resolve_throwing((101,)).is_err());
/// assert_eq!(fetch.resolve_throwing((7,)).unwrap(), "item 7");
/// ```
pub struct StubHandle<A, O, F> {
    spy: SpyId,
    matcher: String,
    outcome: OutcomeSlot<A, O>,
    _effect: PhantomData<fn() -> F>,
}

impl<A, O, F> fmt::Debug for StubHandle<A, O, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StubHandle")
            .field("spy", &self.spy)
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

impl<A: Arguments, O: 'static, F: Effect> StubHandle<A, O, F> {
    pub(crate) fn new(spy: SpyId, stub: &Stub<A, O>) -> Self {
        Self {
            spy,
            matcher: stub.matcher().describe(),
            outcome: stub.outcome.clone(),
            _effect: PhantomData,
        }
    }

    fn set(&self, outcome: Outcome<A, O>) -> &Self {
        tracing::debug!(
            spy = %self.spy,
            matcher = %self.matcher,
            effect = F::NAME,
            "stub outcome set"
        );
        *self.outcome.lock() = Some(outcome);
        self
    }

    /// Answer matching calls with a clone of `value`.
    pub fn then_return(&self, value: O) -> &Self
    where
        O: Clone + Send + Sync,
    {
        self.set(Outcome::value(value))
    }

    /// Answer matching calls with a value computed from their arguments.
    ///
    /// The closure runs on every matching call.
    pub fn then_return_with<G>(&self, f: G) -> &Self
    where
        G: Fn(&A) -> O + Send + Sync + 'static,
    {
        self.set(Outcome::from_fn(f))
    }
}

impl<A: Arguments, O: 'static, F: Fallible> StubHandle<A, O, F> {
    /// Fail matching calls with a user error.
    ///
    /// The error is wrapped with [`Error::external`]; recover it with
    /// [`Error::downcast_ref`].
    pub fn then_throw<E>(&self, error: E) -> &Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.set(Outcome::error(Error::external(error)))
    }

    /// Fail matching calls with `error` as is.
    pub fn then_throw_error(&self, error: Error) -> &Self {
        self.set(Outcome::error(error))
    }

    /// Answer matching calls with a value or an error computed from their
    /// arguments.
    pub fn then_answer<G>(&self, f: G) -> &Self
    where
        G: Fn(&A) -> Result<O> + Send + Sync + 'static,
    {
        self.set(Outcome::try_from_fn(f))
    }

    /// Answer matching calls with a prepared [`Outcome`].
    pub fn then(&self, outcome: Outcome<A, O>) -> &Self {
        self.set(outcome)
    }
}
