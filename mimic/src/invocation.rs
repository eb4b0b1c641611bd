use std::hash;

use crate::Sequence;

/// A recorded call: the arguments, captured by value, and the call's
/// position in the process-wide [`Sequence`].
///
/// Invocations are appended to a spy's history when the call is made and
/// never modified or removed afterwards (short of [`Spy::clear`](crate::Spy::clear)).
#[derive(Debug, Clone, PartialEq, Eq, hash::Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Invocation<A> {
    arguments: A,
    sequence: Sequence,
}

impl<A> Invocation<A> {
    pub(crate) fn new(arguments: A, sequence: Sequence) -> Self {
        Self {
            arguments,
            sequence,
        }
    }

    /// Returns the captured arguments.
    #[inline]
    pub fn arguments(&self) -> &A {
        &self.arguments
    }

    /// Returns the call's position in the global call order.
    #[inline]
    pub fn sequence(&self) -> Sequence {
        self.sequence
    }

    /// Consumes the invocation, returning the captured arguments.
    pub fn into_arguments(self) -> A {
        self.arguments
    }

    /// Returns true if this call happened after `cursor`.
    #[inline]
    pub(crate) fn is_after(&self, cursor: Sequence) -> bool {
        self.sequence > cursor
    }
}
