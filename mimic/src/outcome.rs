use std::fmt;
use std::sync::Arc;

use crate::{Error, Result};

type Producer<A, O> = Arc<dyn Fn(&A) -> Result<O> + Send + Sync>;

/// A canned response: produces either a value or an error for a call.
///
/// Outcomes are evaluated lazily, every time a call resolves against them,
/// and receive the call's arguments. Nothing is cached, so a closure-based
/// outcome can answer differently from one call to the next.
///
/// # Example
///
/// ```
/// use mimic::Outcome;
///
/// let double = Outcome::from_fn(|(n,): &(u32,)| n * 2);
/// assert_eq!(double.evaluate(&(21,)).unwrap(), 42);
/// ```
pub struct Outcome<A, O> {
    producer: Producer<A, O>,
}

impl<A, O> Clone for Outcome<A, O> {
    fn clone(&self) -> Self {
        Self {
            producer: self.producer.clone(),
        }
    }
}

impl<A, O> fmt::Debug for Outcome<A, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Outcome").finish_non_exhaustive()
    }
}

impl<A: 'static, O: 'static> Outcome<A, O> {
    /// Always succeed with a clone of `value`.
    pub fn value(value: O) -> Self
    where
        O: Clone + Send + Sync,
    {
        Self::try_from_fn(move |_| Ok(value.clone()))
    }

    /// Succeed with whatever `f` computes from the call's arguments.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(&A) -> O + Send + Sync + 'static,
    {
        Self::try_from_fn(move |arguments| Ok(f(arguments)))
    }

    /// Produce a value or an error computed from the call's arguments.
    pub fn try_from_fn<F>(f: F) -> Self
    where
        F: Fn(&A) -> Result<O> + Send + Sync + 'static,
    {
        Self {
            producer: Arc::new(f),
        }
    }

    /// Always fail with a clone of `error`.
    pub fn error(error: Error) -> Self {
        Self::try_from_fn(move |_| Err(error.clone()))
    }

    /// Runs the producer for a call with `arguments`.
    pub fn evaluate(&self, arguments: &A) -> Result<O> {
        (self.producer)(arguments)
    }
}
