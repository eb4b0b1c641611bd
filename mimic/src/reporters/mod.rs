//! Ready-to-use failure reporters.
//!
//! # Available Reporters
//!
//! - [`PanicReporter`] - Panics with the failure message, like `assert!` (default)
//! - [`CollectingReporter`] - Stores failures for later inspection
//! - [`TracingReporter`] - Logs failures via the `tracing` crate and carries on
//!
//! # Example
//!
//! ```rust
//! use mimic::{Config, Plain, Spy};
//! use mimic::reporters::TracingReporter;
//!
//! let spy: Spy<(), (), Plain> =
//!     Spy::with_config("flush", Config::default().with_reporter(TracingReporter));
//! ```

mod collecting_reporter;
mod panic_reporter;
mod tracing_reporter;

pub use collecting_reporter::CollectingReporter;
pub use panic_reporter::PanicReporter;
pub use tracing_reporter::TracingReporter;
