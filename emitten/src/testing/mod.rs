//! Test helpers for asserting on listener invocations.
//!
//! Enable with the `test-harness` feature:
//!
//! ```toml
//! [dev-dependencies]
//! emitten = { version = "0.1", features = ["test-harness"] }
//! ```
//!
//! # Example
//!
//! ```ignore
//! use emitten::{Emitter, testing::ListenerSpy};
//!
//! let emitter = Emitter::<&'static str, u32>::new();
//! let spy = ListenerSpy::new();
//!
//! emitter.once("bar", spy.listener());
//! emitter.emit("bar", &1)?;
//! emitter.emit("bar", &2)?;
//!
//! assert_eq!(spy.calls(), vec![1]);
//! assert!(!spy.was_called_with(&2));
//! ```
//!
//! # Note
//!
//! Spies use `Rc` internally and are `!Send`, like the emitters they observe.
//!
//! # Warning
//!
//! **Do not use in production.** Spies keep a copy of every argument they
//! ever receive.

mod listener_spy;

pub use listener_spy::ListenerSpy;
