//! Call shapes of a substituted method.
//!
//! A method either can or cannot report an error, and either is or is not
//! awaited by its caller. The effect tag on [`Spy`](crate::Spy) records which
//! of the four combinations applies, and gates the API at compile time:
//!
//! | Tag | Resolve with | `then_throw` / `throws` |
//! |-----|--------------|-------------------------|
//! | [`Plain`] | [`resolve`](crate::Spy::resolve) | no |
//! | [`Throwing`] | [`resolve_throwing`](crate::Spy::resolve_throwing) | yes |
//! | [`Suspending`] | [`resolve_async`](crate::Spy::resolve_async) | no |
//! | [`SuspendingThrowing`] | [`resolve_throwing_async`](crate::Spy::resolve_throwing_async) | yes |
//!
//! The marker traits are sealed; only these four types implement them.
//!
//! ```compile_fail
//! use mimic::{Plain, Spy};
//!
//! let spy: Spy<(u32,), u32, Plain> = Spy::new("price");
//! mimic::when(spy.any()).then_throw(std::fmt::Error);
//! ```

mod sealed {
    pub trait Sealed {}
}

/// Marker for the four call shapes.
pub trait Effect: sealed::Sealed + Send + Sync + 'static {
    /// Short name used in diagnostics.
    const NAME: &'static str;
}

/// Call shapes without an error channel: [`Plain`] and [`Suspending`].
pub trait Infallible: Effect {}

/// Call shapes that return `Result`: [`Throwing`] and [`SuspendingThrowing`].
pub trait Fallible: Effect {}

/// Call shapes awaited by the caller: [`Suspending`] and [`SuspendingThrowing`].
pub trait Suspends: Effect {}

/// A synchronous method that cannot fail.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Plain;

/// A synchronous method returning `Result`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Throwing;

/// An `async` method that cannot fail.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Suspending;

/// An `async` method returning `Result`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SuspendingThrowing;

impl sealed::Sealed for Plain {}
impl sealed::Sealed for Throwing {}
impl sealed::Sealed for Suspending {}
impl sealed::Sealed for SuspendingThrowing {}

impl Effect for Plain {
    const NAME: &'static str = "plain";
}
impl Effect for Throwing {
    const NAME: &'static str = "throwing";
}
impl Effect for Suspending {
    const NAME: &'static str = "suspending";
}
impl Effect for SuspendingThrowing {
    const NAME: &'static str = "suspending throwing";
}

impl Infallible for Plain {}
impl Infallible for Suspending {}

impl Fallible for Throwing {}
impl Fallible for SuspendingThrowing {}

impl Suspends for Suspending {}
impl Suspends for SuspendingThrowing {}
