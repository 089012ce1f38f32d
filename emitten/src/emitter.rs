use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    Config, Disposer, EventKey, Listener, Result, Subscriptions,
    internal::{Registry, dispatch},
};

/// An event emitter whose events all carry arguments of type `A`.
///
/// Listeners are registered per event key, either persistently with
/// [`on`](Self::on) or for a single delivery with [`once`](Self::once), and
/// invoked synchronously by [`emit`](Self::emit).
///
/// `A` is the argument shape shared by every event of this emitter. Use a
/// tuple for positional arguments, a slice for variadic ones, an enum when
/// events carry different payloads, or a dynamic value list such as
/// `[serde_json::Value]` when no static shape is wanted. When each event
/// has its own argument type, see [`TypedEmitter`](crate::TypedEmitter).
///
/// # Delivery
///
/// `emit(event, args)` calls every persistent listener of `event` in
/// registration order, then every one-shot listener in registration order,
/// and forgets the one-shot listeners. A listener registered both ways runs
/// twice on the first emit and once on later ones.
///
/// A listener returning `Err` stops the emit: later listeners are skipped
/// and the error is returned as is. Panics are not caught either.
///
/// # Reentrancy
///
/// Listeners may use the emitter they are called from. The persistent set
/// is snapshotted when the emit starts: listeners added during the emit
/// run from the next one, listeners removed during the emit still run in
/// this one. One-shot listeners registered while persistent listeners run
/// fire in the same emit. One-shot listeners registered while one-shot
/// listeners run wait for the next emit. Removing a one-shot listener that
/// has not run yet, with `off`, its [`Disposer`] or `empty`, takes effect
/// immediately: it neither runs in this emit nor comes back if the emit
/// fails.
///
/// # Ownership
///
/// `Emitter` is a cheap handle to shared state; clones address the same
/// listeners. It is neither `Send` nor `Sync`. A listener that captures a
/// clone of its own emitter forms a reference cycle, which
/// [`empty`](Self::empty) or [`off`](Self::off) breaks.
///
/// # Example
///
/// ```rust
/// use emitten::{Emitter, Listener};
///
/// let emitter = Emitter::<&'static str, String>::new();
/// emitter.on("greet", Listener::new(|name: &String| println!("hello {name}")));
/// emitter.once("greet", Listener::new(|_: &String| println!("first!")));
///
/// emitter.emit("greet", &"world".to_string())?;
/// emitter.emit("greet", &"again".to_string())?;
/// # Ok::<(), emitten::Error>(())
/// ```
pub struct Emitter<K: EventKey, A: ?Sized + 'static> {
    subscriptions: Subscriptions<K, A>,
}

impl<K: EventKey, A: ?Sized + 'static> Emitter<K, A> {
    /// Create an emitter with the default [`Config`].
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an emitter with the given store sizing.
    pub fn with_config(config: Config) -> Self {
        let registry = Rc::new(RefCell::new(Registry::new(config)));
        Self {
            subscriptions: Subscriptions::new(registry),
        }
    }

    /// Returns the configuration this emitter was created with.
    pub fn config(&self) -> Config {
        self.subscriptions.registry.borrow().config().clone()
    }

    /// Register `listener` for every future emit of `event`.
    ///
    /// Idempotent per (event, listener) pair. The returned [`Disposer`]
    /// unregisters the pair and may be ignored.
    pub fn on(&self, event: impl Into<K>, listener: Listener<A>) -> Disposer {
        self.subscriptions.on(event, listener)
    }

    /// Register `listener` for the next emit of `event` only.
    ///
    /// Idempotent per (event, listener) pair, independently of `on`.
    pub fn once(&self, event: impl Into<K>, listener: Listener<A>) -> Disposer {
        self.subscriptions.once(event, listener)
    }

    /// Remove both the persistent and the one-shot registration of
    /// `listener` for `event`. A no-op for unknown pairs.
    pub fn off(&self, event: impl Into<K>, listener: &Listener<A>) {
        self.subscriptions.off(event, listener)
    }

    /// Register `listener` persistently and get back its [`Disposer`].
    #[must_use = "dropping the disposer leaves the listener registered"]
    pub fn disposable(&self, event: impl Into<K>, listener: Listener<A>) -> Disposer {
        self.subscriptions.disposable(event, listener)
    }

    /// Deliver `args` to every listener of `event`.
    ///
    /// Emitting an event nobody listens to does nothing.
    ///
    /// # Errors
    ///
    /// Returns the first error produced by a listener. Listeners after the
    /// failing one do not run for this emit.
    pub fn emit(&self, event: impl Into<K>, args: &A) -> Result<()> {
        let event = event.into();
        dispatch(&self.subscriptions.registry, &event, |listener| {
            listener.call(args)
        })
    }

    /// Snapshot of the events that currently have at least one listener.
    pub fn active_events(&self) -> Vec<K> {
        self.subscriptions.active_events()
    }

    /// Number of registrations for `event`, persistent and one-shot combined.
    pub fn listener_count(&self, event: impl Into<K>) -> usize {
        self.subscriptions.listener_count(event)
    }

    /// Returns `true` if `event` has at least one listener.
    pub fn has_listeners(&self, event: impl Into<K>) -> bool {
        self.subscriptions.has_listeners(event)
    }

    /// Returns `true` if no listener is registered for any event.
    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Unregister every listener of every event.
    pub fn empty(&self) {
        self.subscriptions.registry.borrow_mut().empty();
    }

    /// A handle that can subscribe to this emitter but not emit on it.
    pub fn subscriptions(&self) -> Subscriptions<K, A> {
        self.subscriptions.clone()
    }
}

impl<K: EventKey, A: ?Sized + 'static> Default for Emitter<K, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: EventKey, A: ?Sized + 'static> Clone for Emitter<K, A> {
    fn clone(&self) -> Self {
        Self {
            subscriptions: self.subscriptions.clone(),
        }
    }
}

impl<K: EventKey, A: ?Sized + 'static> fmt::Debug for Emitter<K, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Emitter");
        if let Ok(registry) = self.subscriptions.registry.try_borrow() {
            s.field("active_events", &registry.active_events());
        }
        s.finish_non_exhaustive()
    }
}
