use std::fmt;
use std::future::{Ready, ready};
use std::marker::PhantomData;
use std::panic::Location;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::{
    Arguments, Config, Effect, Error, Fallible, Infallible, Interaction, IntoInvocationMatcher,
    Invocation, InvocationMatcher, Outcome, Plain, Result, SpyId, StubHandle, Suspends, Verifier,
    reporting::Failure, sequence, stub::Stub,
};

struct SpyState<A, O> {
    invocations: Vec<Invocation<A>>,
    stubs: Vec<Stub<A, O>>,
    /// Unstubbed infallible calls not yet reported by a verification.
    faults: Vec<Failure>,
}

struct SpyInner<A, O> {
    id: SpyId,
    config: Config,
    state: Mutex<SpyState<A, O>>,
}

/// Recording, stubbable stand-in for one method.
///
/// A spy owns the call history and the stubs of a single method endpoint:
/// - every call is recorded with its arguments and a global [`Sequence`](crate::Sequence)
///   number before anything else happens
/// - the call is answered by the first registered stub whose matcher accepts
///   the arguments
/// - the history can be verified afterwards with [`verify`](crate::verify),
///   [`verify_never`](crate::verify_never) and [`verify_in_order`](crate::verify_in_order)
///
/// `A` is the argument tuple, `O` the success type and `F` the [`Effect`]
/// tag describing the call shape. A substitute for a contract holds one spy
/// per method and forwards each method to its spy:
///
/// ```
/// use mimic::{Plain, Spy, Throwing, verify, when};
///
/// trait Pricing {
///     fn price(&self, fruit: String) -> u32;
///     fn reserve(&self, fruit: String, amount: u32) -> mimic::Result<u64>;
/// }
///
/// #[derive(Default)]
/// struct PricingSpy {
///     price: Spy<(String,), u32, Plain>,
///     reserve: Spy<(String, u32), u64, Throwing>,
/// }
///
/// impl Pricing for PricingSpy {
///     fn price(&self, fruit: String) -> u32 {
///         self.price.resolve((fruit,))
///     }
///     fn reserve(&self, fruit: String, amount: u32) -> mimic::Result<u64> {
///         self.reserve.resolve_throwing((fruit, amount))
///     }
/// }
///
/// let pricing = PricingSpy::default();
/// when(pricing.price.with(("apple",))).then_return(13);
/// when(pricing.price.any()).then_return(17);
///
/// assert_eq!(pricing.price("apple".into()), 13);
/// assert_eq!(pricing.price("banana".into()), 17);
/// assert!(pricing.reserve("apple".into(), 2).unwrap_err().is_unstubbed());
///
/// assert!(verify(pricing.price.any()).called_times(2));
/// assert!(verify(pricing.price.with(("apple",))).called_times(1));
/// ```
///
/// Spies are cheap to clone; clones share history and stubs. All operations
/// are safe to call concurrently from any number of threads.
pub struct Spy<A, O, F = Plain> {
    inner: Arc<SpyInner<A, O>>,
    _effect: PhantomData<fn() -> F>,
}

impl<A, O, F> Clone for Spy<A, O, F> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            _effect: PhantomData,
        }
    }
}

impl<A, O, F: Effect> fmt::Debug for Spy<A, O, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.lock();
        f.debug_struct("Spy")
            .field("id", &self.inner.id)
            .field("effect", &F::NAME)
            .field("invocations", &state.invocations.len())
            .field("stubs", &state.stubs.len())
            .field("faults", &state.faults.len())
            .finish()
    }
}

impl<A: Arguments, O: 'static, F: Effect> Default for Spy<A, O, F> {
    /// A spy named after its effect, for quick substitutes whose failure
    /// messages do not need method names.
    fn default() -> Self {
        Spy::new(F::NAME)
    }
}

impl<A: Arguments, O: 'static, F: Effect> Spy<A, O, F> {
    /// Create a spy with the default [`Config`].
    pub fn new(name: impl Into<SpyId>) -> Self {
        Self::with_config(name, Config::default())
    }

    /// Create a spy with a custom [`Config`].
    pub fn with_config(name: impl Into<SpyId>, config: Config) -> Self {
        Self {
            inner: Arc::new(SpyInner {
                id: name.into(),
                config,
                state: Mutex::new(SpyState {
                    invocations: Vec::new(),
                    stubs: Vec::new(),
                    faults: Vec::new(),
                }),
            }),
            _effect: PhantomData,
        }
    }

    /// Returns the spy's name.
    #[inline]
    pub fn id(&self) -> &SpyId {
        &self.inner.id
    }

    /// Returns the spy's configuration.
    #[inline]
    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    // ==================== Stubbing ====================

    /// Append a stub without an outcome and return the handle that sets it.
    ///
    /// Stubs are consulted in registration order.
    pub fn register_stub(&self, matcher: InvocationMatcher<A>) -> StubHandle<A, O, F> {
        let stub = Stub::new(matcher);
        let handle = StubHandle::new(self.inner.id.clone(), &stub);
        tracing::debug!(spy = %self.inner.id, matcher = %stub.matcher().describe(), "stub registered");
        self.inner.state.lock().stubs.push(stub);
        handle
    }

    /// Shorthand for [`register_stub`](Self::register_stub) accepting a tuple
    /// of matchers or values.
    pub fn when<M: IntoInvocationMatcher<A>>(&self, matcher: M) -> StubHandle<A, O, F> {
        self.register_stub(matcher.into_invocation_matcher())
    }

    // ==================== Recording ====================

    /// Record a call and pick the outcome that answers it.
    ///
    /// Under the spy's lock: draws the next global sequence number, appends
    /// the invocation, and selects the first stub whose matcher accepts the
    /// arguments. Later stubs are never consulted, even if they match too.
    /// If no stub matches, or the winning stub has no outcome yet, the result
    /// is an outcome failing with [`Error::Unstubbed`].
    ///
    /// The outcome is returned unevaluated; evaluation happens outside the
    /// lock so stub closures may inspect the spy.
    pub fn record(&self, arguments: &A) -> Outcome<A, O> {
        let (sequence, winner) = {
            let mut state = self.inner.state.lock();
            let sequence = sequence::next();
            state
                .invocations
                .push(Invocation::new(arguments.clone(), sequence));
            let winner = state
                .stubs
                .iter()
                .find(|stub| stub.matches(arguments))
                .map(Stub::outcome);
            (sequence, winner)
        };

        tracing::trace!(
            spy = %self.inner.id,
            sequence = %sequence,
            arguments = ?arguments,
            stubbed = matches!(winner, Some(Some(_))),
            "call recorded"
        );

        match winner {
            Some(Some(outcome)) => outcome,
            _ => Outcome::error(Error::unstubbed(&self.inner.id, arguments.describe())),
        }
    }

    // ==================== Interactions ====================

    /// Pair this spy with a matcher, for [`when`](crate::when) and the
    /// verification functions.
    pub fn with<M: IntoInvocationMatcher<A>>(&self, matcher: M) -> Interaction<'_, A, O, F> {
        Interaction::new(self, matcher.into_invocation_matcher())
    }

    /// Pair this spy with a matcher accepting every call.
    pub fn any(&self) -> Interaction<'_, A, O, F> {
        Interaction::new(self, InvocationMatcher::any())
    }

    /// Verify the whole history, without a filter.
    pub fn verify(&self) -> Verifier<'_, A, O, F> {
        Verifier::new(self, None)
    }

    // ==================== Inspection ====================

    /// Returns a snapshot of the recorded calls, oldest first.
    pub fn invocations(&self) -> Vec<Invocation<A>> {
        self.inner.state.lock().invocations.clone()
    }

    /// Returns the number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.inner.state.lock().invocations.len()
    }

    /// Returns the number of registered stubs.
    pub fn stub_count(&self) -> usize {
        self.inner.state.lock().stubs.len()
    }

    /// Returns snapshots of the history and the stubs, taken atomically.
    pub(crate) fn snapshot(&self) -> (Vec<Invocation<A>>, Vec<Stub<A, O>>) {
        let state = self.inner.state.lock();
        (state.invocations.clone(), state.stubs.clone())
    }

    /// Returns true if an unstubbed infallible call is waiting to be
    /// reported by the next verification.
    pub fn is_faulted(&self) -> bool {
        !self.inner.state.lock().faults.is_empty()
    }

    /// Removes the pending faults, oldest first.
    pub(crate) fn take_faults(&self) -> Vec<Failure> {
        std::mem::take(&mut self.inner.state.lock().faults)
    }

    /// Forget all recorded calls, registered stubs and pending faults.
    ///
    /// Sequence numbers already issued are not reused.
    pub fn clear(&self) {
        let mut state = self.inner.state.lock();
        state.invocations.clear();
        state.stubs.clear();
        state.faults.clear();
        tracing::debug!(spy = %self.inner.id, "spy cleared");
    }
}

impl<A: Arguments, O: 'static, F: Infallible> Spy<A, O, F> {
    /// Record a call and return the stubbed value.
    ///
    /// # Panics
    ///
    /// Panics if no stub answers the call. An infallible method has no way to
    /// report the missing stub and no value to return, so the test stops here
    /// instead of continuing with made-up data.
    ///
    /// A panic in a task or thread nobody joins does not fail the test, so
    /// the spy is also marked faulted. The next verification involving it
    /// reports the unstubbed call and fails, whatever it checks.
    #[track_caller]
    pub fn resolve(&self, arguments: A) -> O {
        match self.record(&arguments).evaluate(&arguments) {
            Ok(value) => value,
            Err(error) => {
                tracing::error!(
                    spy = %self.inner.id,
                    error = %error,
                    "unresolvable call on infallible spy"
                );
                let fault = Failure::new(error.clone(), self.inner.id.clone(), Location::caller())
                    .with_detail("infallible calls need a stub, register one with `when`");
                self.inner.state.lock().faults.push(fault);
                panic!("{error}: infallible calls need a stub, register one with `when`");
            }
        }
    }
}

impl<A: Arguments, O: 'static, F: Fallible> Spy<A, O, F> {
    /// Record a call and return the stubbed value or error.
    ///
    /// A call no stub answers fails with [`Error::Unstubbed`].
    pub fn resolve_throwing(&self, arguments: A) -> Result<O> {
        let result = self.record(&arguments).evaluate(&arguments);
        if let Err(error) = &result {
            if error.is_unstubbed() {
                tracing::warn!(spy = %self.inner.id, error = %error, "unstubbed call");
            }
        }
        result
    }
}

impl<A: Arguments, O: 'static, F: Infallible + Suspends> Spy<A, O, F> {
    /// Async form of [`resolve`](Self::resolve).
    ///
    /// The call is recorded and resolved before the future is returned, so
    /// the history is accurate even if the future is never polled.
    ///
    /// # Panics
    ///
    /// Panics if no stub answers the call.
    #[track_caller]
    pub fn resolve_async(&self, arguments: A) -> Ready<O> {
        ready(self.resolve(arguments))
    }
}

impl<A: Arguments, O: 'static, F: Fallible + Suspends> Spy<A, O, F> {
    /// Async form of [`resolve_throwing`](Self::resolve_throwing).
    ///
    /// The call is recorded and resolved before the future is returned, so
    /// the history is accurate even if the future is never polled.
    pub fn resolve_throwing_async(&self, arguments: A) -> Ready<Result<O>> {
        ready(self.resolve_throwing(arguments))
    }
}
