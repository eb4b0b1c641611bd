#![cfg_attr(docsrs, feature(doc_cfg))]
//! # Mimic
//!
//! A recording, stubbable test-double engine.
//!
//! Mimic replaces a real dependency with a substitute that records every call
//! and answers it from canned responses, then lets the test assert on how the
//! substitute was used. A substitute for a trait holds one [`Spy`] per method
//! and forwards each method to it; Mimic does the matching, the recording and
//! the verification.
//!
//! ## Quick Start
//!
//! ```rust
//! use mimic::*;
//!
//! #[derive(Debug, thiserror::Error)]
//! #[error("not enough stock")]
//! struct NotEnoughStock;
//!
//! trait Inventory {
//!     fn stock(&self, item: String) -> u32;
//!     fn reserve(&self, item: String, amount: u32) -> mimic::Result<u64>;
//! }
//!
//! #[derive(Default)]
//! struct InventorySpy {
//!     stock: Spy<(String,), u32, Plain>,
//!     reserve: Spy<(String, u32), u64, Throwing>,
//! }
//!
//! impl Inventory for InventorySpy {
//!     fn stock(&self, item: String) -> u32 {
//!         self.stock.resolve((item,))
//!     }
//!     fn reserve(&self, item: String, amount: u32) -> mimic::Result<u64> {
//!         self.reserve.resolve_throwing((item, amount))
//!     }
//! }
//!
//! let inventory = InventorySpy::default();
//! when(inventory.stock.with(("apple",))).then_return(13);
//! when(inventory.stock.any()).then_return(17);
//! when(inventory.reserve.with((ArgMatcher::any(), ArgMatcher::gt(10))))
//!     .then_throw(NotEnoughStock);
//!
//! assert_eq!(inventory.stock("apple".into()), 13);
//! assert_eq!(inventory.stock("banana".into()), 17);
//! let error = inventory.reserve("apple".into(), 20).unwrap_err();
//! assert!(error.downcast_ref::<NotEnoughStock>().is_some());
//!
//! assert!(verify(inventory.stock.any()).called_times(2));
//! assert!(verify(inventory.reserve.any()).throws_matching(ArgMatcher::error_kind::<NotEnoughStock>()));
//! assert!(verify_in_order(&[
//!     &inventory.stock.with(("banana",)),
//!     &inventory.reserve.any(),
//! ]));
//! ```
//!
//! ## Core Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Spy`] | Records the calls and holds the stubs of one method |
//! | [`ArgMatcher`] | Predicate over one argument, with a description for diagnostics |
//! | [`InvocationMatcher`] | One [`ArgMatcher`] per argument position |
//! | [`Interaction`] | A spy paired with a matcher, for [`when`] and [`verify`] |
//! | [`StubHandle`] | Sets the [`Outcome`] of a registered stub |
//! | [`Verifier`] | Count and throw checks over the recorded calls |
//! | [`Invocation`] | One recorded call: arguments plus global [`Sequence`] number |
//! | [`Config`] | Per-spy failure reporter and message settings |
//!
//! ## Call Shapes
//!
//! The third type parameter of a spy is an effect tag: [`Plain`],
//! [`Throwing`], [`Suspending`] or [`SuspendingThrowing`]. It decides which
//! operations exist. Only throwing spies offer `then_throw`,
//! `resolve_throwing` and throw verification, and only suspending spies
//! offer the `*_async` resolvers. Calling the wrong one does not compile.
//!
//! An infallible call that no stub answers panics, since there is no value
//! to return and no error channel to report through. A fallible call gets
//! [`Error::Unstubbed`] back instead.
//!
//! ## Reporting
//!
//! Verification failures never travel through the code under test. They are
//! handed to the spy's [`FailureReporter`](reporting::FailureReporter), which
//! panics by default. See [`reporters`] for alternatives.
//!
//! ## Features
//!
//! - **`serde`** - `Serialize`/`Deserialize` for [`Sequence`], [`SpyId`] and
//!   `Serialize` for [`Invocation`]

mod arg_matcher;
mod arguments;
mod config;
mod effect;
mod error;
mod in_order;
mod interaction;
mod invocation;
mod invocation_matcher;
mod outcome;
mod spy;
mod spy_id;
mod stub;
mod verifier;

pub mod reporters;
pub mod reporting;
pub mod sequence;
pub mod shared;

pub use arg_matcher::ArgMatcher;
pub use arguments::{Arguments, IntoInvocationMatcher};
pub use config::Config;
pub use effect::{Effect, Fallible, Infallible, Plain, Suspending, SuspendingThrowing, Suspends, Throwing};
pub use error::Error;
pub use in_order::{OrderedStep, verify_in_order};
pub use interaction::Interaction;
pub use invocation::Invocation;
pub use invocation_matcher::InvocationMatcher;
pub use outcome::Outcome;
pub use sequence::Sequence;
pub use spy::Spy;
pub use spy_id::SpyId;
pub use stub::{StubHandle, when};
pub use verifier::{Verifier, verify, verify_never};

/// Convenience alias for `Result<T, mimic::Error>`.
pub type Result<T = ()> = std::result::Result<T, Error>;
