use std::{cell::RefCell, fmt, rc::Rc};

use crate::{
    Config, Disposer, Error, EventKey, EventName, Listener, Result,
    internal::{ErasedListener, Registry, dispatch},
};

/// An event emitter where each event has its own argument type.
///
/// Events are addressed through [`EventName`] values, which carry the
/// argument type alongside the key. Listeners are stored type-erased and
/// recovered on emit, so `TypedEmitter` follows exactly the same delivery,
/// ordering and reentrancy rules as [`Emitter`](crate::Emitter).
///
/// ```rust
/// use emitten::{EventName, Listener, TypedEmitter};
///
/// const OPENED: EventName<str> = EventName::new("opened");
/// const RESIZED: EventName<(u32, u32)> = EventName::new("resized");
///
/// let window = TypedEmitter::new();
/// window.on(OPENED, Listener::new(|title: &str| println!("opened {title}")));
/// window.on(RESIZED, Listener::new(|(w, h): &(u32, u32)| println!("{w}x{h}")));
///
/// window.emit(OPENED, "main")?;
/// window.emit(RESIZED, &(800, 600))?;
/// # Ok::<(), emitten::Error>(())
/// ```
///
/// Two names sharing one key but declaring different argument types make
/// `emit` fail with [`Error::SignatureMismatch`] when it reaches a listener
/// of the other type.
pub struct TypedEmitter<K: EventKey = &'static str> {
    registry: Rc<RefCell<Registry<K, ErasedListener>>>,
}

impl<K: EventKey> TypedEmitter<K> {
    /// Create an emitter with the default [`Config`].
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create an emitter with the given store sizing.
    pub fn with_config(config: Config) -> Self {
        Self {
            registry: Rc::new(RefCell::new(Registry::new(config))),
        }
    }

    /// Returns the configuration this emitter was created with.
    pub fn config(&self) -> Config {
        self.registry.borrow().config().clone()
    }

    /// Register `listener` for every future emit of `event`.
    pub fn on<A: ?Sized + 'static>(
        &self,
        event: EventName<A, K>,
        listener: Listener<A>,
    ) -> Disposer {
        let key = event.key().clone();
        self.registry
            .borrow_mut()
            .on(key.clone(), ErasedListener::new(listener.clone()));
        self.disposer(key, listener)
    }

    /// Register `listener` for the next emit of `event` only.
    pub fn once<A: ?Sized + 'static>(
        &self,
        event: EventName<A, K>,
        listener: Listener<A>,
    ) -> Disposer {
        let key = event.key().clone();
        self.registry
            .borrow_mut()
            .once(key.clone(), ErasedListener::new(listener.clone()));
        self.disposer(key, listener)
    }

    /// Remove both registrations of `listener` for `event`.
    pub fn off<A: ?Sized + 'static>(&self, event: EventName<A, K>, listener: &Listener<A>) {
        self.registry
            .borrow_mut()
            .off(event.key(), &ErasedListener::new(listener.clone()));
    }

    /// Register `listener` persistently and get back its [`Disposer`].
    #[must_use = "dropping the disposer leaves the listener registered"]
    pub fn disposable<A: ?Sized + 'static>(
        &self,
        event: EventName<A, K>,
        listener: Listener<A>,
    ) -> Disposer {
        self.on(event, listener)
    }

    /// Deliver `args` to every listener of `event`.
    ///
    /// # Errors
    ///
    /// Returns the first listener error, or [`Error::SignatureMismatch`]
    /// when a listener registered under the same key expects another
    /// argument type. Either way, later listeners do not run.
    pub fn emit<A: ?Sized + 'static>(&self, event: EventName<A, K>, args: &A) -> Result<()> {
        let key = event.key();
        dispatch(&self.registry, key, |erased| match erased.downcast::<A>() {
            Some(listener) => listener.call(args),
            None => Err(Error::SignatureMismatch {
                event: format!("{key:?}"),
                expected: std::any::type_name::<A>(),
            }),
        })
    }

    /// Snapshot of the events that currently have at least one listener.
    pub fn active_events(&self) -> Vec<K> {
        self.registry.borrow().active_events()
    }

    /// Number of registrations for `event`, persistent and one-shot combined.
    pub fn listener_count(&self, event: impl Into<K>) -> usize {
        self.registry.borrow().listener_count(&event.into())
    }

    /// Returns `true` if `event` has at least one listener.
    pub fn has_listeners(&self, event: impl Into<K>) -> bool {
        self.registry.borrow().has_listeners(&event.into())
    }

    /// Returns `true` if no listener is registered for any event.
    pub fn is_empty(&self) -> bool {
        self.registry.borrow().is_empty()
    }

    /// Unregister every listener of every event.
    pub fn empty(&self) {
        self.registry.borrow_mut().empty();
    }

    fn disposer<A: ?Sized + 'static>(&self, key: K, listener: Listener<A>) -> Disposer {
        let registry = Rc::downgrade(&self.registry);
        let erased = ErasedListener::new(listener);
        Disposer::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().off(&key, &erased);
            }
        })
    }
}

impl<K: EventKey> Default for TypedEmitter<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: EventKey> Clone for TypedEmitter<K> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<K: EventKey> fmt::Debug for TypedEmitter<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("TypedEmitter");
        if let Ok(registry) = self.registry.try_borrow() {
            s.field("active_events", &registry.active_events());
        }
        s.finish_non_exhaustive()
    }
}
