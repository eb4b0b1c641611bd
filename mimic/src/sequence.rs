use std::{
    fmt, hash,
    sync::atomic::{AtomicU64, Ordering},
};

static COUNTER: AtomicU64 = AtomicU64::new(0);

/// Position of a recorded call in the process-wide call order.
///
/// Every call recorded by any [`Spy`](crate::Spy) draws the next value from a
/// single counter, so sequences taken from different spies are comparable.
/// [`verify_in_order`](crate::verify_in_order) relies on this to check call
/// order across spies.
///
/// Real calls are numbered from 1; [`Sequence::ZERO`] precedes all of them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, hash::Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sequence(u64);

impl Sequence {
    /// Lower bound that precedes every recorded call.
    pub const ZERO: Sequence = Sequence(0);

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl From<u64> for Sequence {
    fn from(value: u64) -> Self {
        Sequence(value)
    }
}

impl From<Sequence> for u64 {
    fn from(value: Sequence) -> Self {
        value.0
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Draws the next sequence number.
pub(crate) fn next() -> Sequence {
    Sequence(COUNTER.fetch_add(1, Ordering::SeqCst) + 1)
}

/// Returns the most recently issued sequence number, or [`Sequence::ZERO`]
/// if nothing was recorded since start-up or the last [`reset`].
pub fn current() -> Sequence {
    Sequence(COUNTER.load(Ordering::SeqCst))
}

/// Restarts numbering from 1.
///
/// Only useful when a test binary needs identical sequence numbers across
/// independent runs. Calling this while other tests are still recording
/// breaks ordering checks in those tests, because new calls may then be
/// numbered below calls recorded earlier.
pub fn reset() {
    COUNTER.store(0, Ordering::SeqCst);
    tracing::debug!("sequence counter reset");
}
