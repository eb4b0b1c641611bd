//! Process-wide spies for substitutes that live in a `static`.
//!
//! Some dependencies are reached through free functions or global state
//! rather than an injected object. A [`SharedSpy`] can be declared as a
//! `static` and is shared by every thread of the test binary:
//!
//! ```
//! use mimic::{Plain, shared::SharedSpy, verify, when};
//!
//! static NOW: SharedSpy<(), u64, Plain> = SharedSpy::new("now");
//!
//! fn now() -> u64 {
//!     NOW.get().resolve(())
//! }
//!
//! when(NOW.get().any()).then_return(1_700_000_000);
//! assert_eq!(now(), 1_700_000_000);
//! assert!(verify(NOW.get().any()).called_times(1));
//!
//! mimic::shared::clear_all();
//! assert_eq!(NOW.get().call_count(), 0);
//! ```
//!
//! State survives between tests of the same binary. Call [`clear_all`] (or
//! [`SharedSpy::clear`]) at the start of every test that uses shared spies,
//! and keep such tests from running concurrently.

use std::fmt;
use std::sync::OnceLock;

use parking_lot::Mutex;

use crate::{Arguments, Effect, Plain, Spy};

/// A shared spy that can be reset through the registry.
trait Clear: Send + Sync {
    fn name(&self) -> &'static str;
    fn clear(&self);
}

static REGISTRY: Mutex<Vec<&'static dyn Clear>> = parking_lot::const_mutex(Vec::new());

/// A lazily created [`Spy`] usable in a `static`.
///
/// The spy is created on first access and registers itself so that
/// [`clear_all`] can reach it.
pub struct SharedSpy<A, O, F = Plain> {
    name: &'static str,
    cell: OnceLock<Spy<A, O, F>>,
}

impl<A, O, F: Effect> fmt::Debug for SharedSpy<A, O, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SharedSpy")
            .field("name", &self.name)
            .field("spy", &self.cell.get())
            .finish()
    }
}

impl<A, O, F> SharedSpy<A, O, F> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            cell: OnceLock::new(),
        }
    }

    /// Returns the name the spy is created with.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<A: Arguments, O: 'static, F: Effect> SharedSpy<A, O, F> {
    /// Returns the spy, creating and registering it on first access.
    pub fn get(&'static self) -> &'static Spy<A, O, F> {
        self.cell.get_or_init(|| {
            REGISTRY.lock().push(self);
            tracing::debug!(spy = self.name, "shared spy registered");
            Spy::new(self.name)
        })
    }

    /// Forget the spy's calls and stubs. Does nothing if the spy was never
    /// accessed.
    pub fn clear(&'static self) {
        if let Some(spy) = self.cell.get() {
            spy.clear();
        }
    }
}

impl<A: Arguments, O: 'static, F: Effect> Clear for SharedSpy<A, O, F> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn clear(&self) {
        if let Some(spy) = self.cell.get() {
            spy.clear();
        }
    }
}

/// Clear every shared spy accessed so far.
pub fn clear_all() {
    let registered = REGISTRY.lock().clone();
    for spy in &registered {
        spy.clear();
    }
    tracing::debug!(
        count = registered.len(),
        spies = ?registered.iter().map(|spy| spy.name()).collect::<Vec<_>>(),
        "shared spies cleared"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Throwing, verify, when};

    static LOOKUP: SharedSpy<(String,), u32, Throwing> = SharedSpy::new("lookup");
    static UNUSED: SharedSpy<(u8,), u8> = SharedSpy::new("unused");
    static THREADED: SharedSpy<(usize,), usize> = SharedSpy::new("threaded");

    #[test]
    fn get_returns_the_same_spy() {
        let a = LOOKUP.get();
        let b = LOOKUP.get();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a.id(), "lookup");
        assert_eq!(LOOKUP.name(), "lookup");
    }

    #[test]
    fn clear_before_first_access_is_harmless() {
        UNUSED.clear();
        assert!(format!("{UNUSED:?}").contains("unused"));
    }

    #[test]
    fn shared_across_threads() {
        THREADED.clear();
        when(THREADED.get().any()).then_return_with(|(n,)| n + 1);

        let results: Vec<usize> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|n| s.spawn(move || THREADED.get().resolve((n,))))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(results, (1..=8).collect::<Vec<_>>());
        assert!(verify(THREADED.get().any()).called_times(8));

        THREADED.clear();
        assert_eq!(THREADED.get().call_count(), 0);
        assert_eq!(THREADED.get().stub_count(), 0);
    }
}
