#![cfg_attr(docsrs, feature(doc_cfg))]
//! # Emitten
//!
//! A small, synchronous, in-process event emitter.
//!
//! Listeners subscribe to named events either persistently or for a single
//! delivery. Emitting an event calls its listeners right away, on the
//! caller's stack, and hands the first listener error back to the caller.
//!
//! ## Quick Start
//!
//! ```rust
//! use emitten::{Emitter, Listener};
//!
//! let emitter = Emitter::<&'static str, str>::new();
//!
//! emitter.on("greet", Listener::new(|name: &str| println!("Hello, {name}!")));
//! emitter.once("greet", Listener::new(|_: &str| println!("(first greeting)")));
//!
//! emitter.emit("greet", "World")?;   // both listeners
//! emitter.emit("greet", "again")?;   // persistent listener only
//!
//! assert_eq!(emitter.active_events(), vec!["greet"]);
//! emitter.empty();
//! assert!(emitter.active_events().is_empty());
//! # Ok::<(), emitten::Error>(())
//! ```
//!
//! ## Core Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Emitter`] | Registry and dispatcher for events sharing one argument type |
//! | [`TypedEmitter`] | Same, with a distinct argument type per [`EventName`] |
//! | [`Listener`] | Callable with a stable identity, used to register and unregister |
//! | [`Disposer`] | Undoes one registration, returned by `on`, `once` and `disposable` |
//! | [`Subscriptions`] | Subscribe-only view of an emitter, for exposing events publicly |
//! | [`EventKey`] | Bound satisfied by any hashable, cloneable, debuggable key |
//! | [`Config`] | Initial sizing of the listener stores |
//!
//! ## Delivery Rules
//!
//! Every event has two independent listener sets: persistent (`on`) and
//! one-shot (`once`). Registration is idempotent per set. `emit` runs the
//! persistent set first, then the one-shot set, each in registration order,
//! and clears the one-shot set. `off` removes a listener from both sets.
//!
//! Listeners may freely register, unregister and emit on the emitter that
//! is calling them. See [`Emitter`] for the exact reentrancy rules.
//!
//! ## Errors
//!
//! Registry operations never fail. A listener built with
//! [`Listener::fallible`] may return an [`Error`], which stops the current
//! emit and is returned from it unchanged.
//!
//! ## Logging
//!
//! Registrations, removals and emits are reported through [`tracing`] at
//! `trace` level, [`Emitter::empty`] at `debug` level. Install any
//! `tracing` subscriber to see them.
//!
//! ## Features
//!
//! - **`serde`** - `Serialize`/`Deserialize` for [`Config`]
//! - **`test-harness`** - Test utilities such as [`ListenerSpy`](testing::ListenerSpy)
//!
//! ## Examples
//!
//! See the [`examples/`](https://github.com/emitten-rs/emitten/tree/main/emitten/examples) directory:
//!
//! - `hello-world.rs` - Persistent and one-shot listeners
//! - `typed.rs` - Per-event argument types with `TypedEmitter`
//! - `download.rs` - Exposing a subscribe-only handle

mod config;
mod disposer;
mod emitter;
mod error;
mod event_key;
mod event_name;
mod listener;
mod subscriptions;
mod typed_emitter;

mod internal;

#[cfg(any(test, feature = "test-harness"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-harness")))]
pub mod testing;

pub use config::Config;
pub use disposer::Disposer;
pub use emitter::Emitter;
pub use error::Error;
pub use event_key::EventKey;
pub use event_name::EventName;
pub use listener::{Listener, ListenerId};
pub use subscriptions::Subscriptions;
pub use typed_emitter::TypedEmitter;

/// Convenience alias for `Result<T, emitten::Error>`.
pub type Result<T = ()> = std::result::Result<T, Error>;
