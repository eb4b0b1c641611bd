//! Failure reporting seam between Mimic and the host test framework.
//!
//! Verification never propagates errors through the code under test. Every
//! failed check is turned into a [`Failure`] and handed to the
//! [`FailureReporter`] configured on the spy (see
//! [`Config::with_reporter`](crate::Config::with_reporter)).
//!
//! # Example
//!
//! ```rust
//! use mimic::reporting::{Failure, FailureReporter};
//!
//! struct Stderr;
//!
//! impl FailureReporter for Stderr {
//!     fn report_failure(&self, failure: &Failure) {
//!         eprintln!("{failure}");
//!     }
//! }
//! ```
//!
//! Ready-made reporters live in [`reporters`](crate::reporters).

mod failure;
mod reporter;

pub use failure::Failure;
pub use reporter::FailureReporter;
