use std::{cell::RefCell, fmt, rc::Rc};

use crate::{Disposer, EventKey, Listener, internal::Registry};

pub(crate) type SharedRegistry<K, A> = Rc<RefCell<Registry<K, Listener<A>>>>;

/// The subscribing half of an [`Emitter`](crate::Emitter).
///
/// A `Subscriptions` handle shares the emitter's listener stores but can
/// only register, unregister and inspect. It cannot emit and cannot empty
/// the emitter. Hand it out when a component fires its own events and lets
/// other code listen:
///
/// ```rust
/// use emitten::{Emitter, Listener, Subscriptions};
///
/// struct Download {
///     events: Emitter<&'static str, u8>,
/// }
///
/// impl Download {
///     fn events(&self) -> Subscriptions<&'static str, u8> {
///         self.events.subscriptions()
///     }
///
///     fn advance(&self, percent: u8) -> emitten::Result {
///         self.events.emit("progress", &percent)
///     }
/// }
///
/// let download = Download { events: Emitter::new() };
/// download
///     .events()
///     .on("progress", Listener::new(|p: &u8| println!("{p}%")));
/// download.advance(50)?;
/// # Ok::<(), emitten::Error>(())
/// ```
pub struct Subscriptions<K: EventKey, A: ?Sized + 'static> {
    pub(crate) registry: SharedRegistry<K, A>,
}

impl<K: EventKey, A: ?Sized + 'static> Subscriptions<K, A> {
    pub(crate) fn new(registry: SharedRegistry<K, A>) -> Self {
        Self { registry }
    }

    /// Register `listener` for every future emit of `event`.
    ///
    /// Registering a listener that is already registered for `event` does
    /// nothing. The returned [`Disposer`] may be ignored.
    pub fn on(&self, event: impl Into<K>, listener: Listener<A>) -> Disposer {
        let event = event.into();
        self.registry
            .borrow_mut()
            .on(event.clone(), listener.clone());
        self.disposer(event, listener)
    }

    /// Register `listener` for the next emit of `event` only.
    pub fn once(&self, event: impl Into<K>, listener: Listener<A>) -> Disposer {
        let event = event.into();
        self.registry
            .borrow_mut()
            .once(event.clone(), listener.clone());
        self.disposer(event, listener)
    }

    /// Remove `listener` from `event`, both its persistent and its one-shot
    /// registration. Does nothing if it was not registered.
    pub fn off(&self, event: impl Into<K>, listener: &Listener<A>) {
        self.registry.borrow_mut().off(&event.into(), listener);
    }

    /// Same as [`on`](Self::on), for callers that intend to unregister later.
    #[must_use = "dropping the disposer leaves the listener registered"]
    pub fn disposable(&self, event: impl Into<K>, listener: Listener<A>) -> Disposer {
        self.on(event, listener)
    }

    /// Snapshot of the events that currently have at least one listener.
    ///
    /// Events with persistent listeners come first, in the order they were
    /// first registered, followed by events that only have one-shot
    /// listeners.
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

    fn disposer(&self, event: K, listener: Listener<A>) -> Disposer {
        let registry = Rc::downgrade(&self.registry);
        Disposer::new(move || {
            if let Some(registry) = registry.upgrade() {
                registry.borrow_mut().off(&event, &listener);
            }
        })
    }
}

impl<K: EventKey, A: ?Sized + 'static> Clone for Subscriptions<K, A> {
    fn clone(&self) -> Self {
        Self {
            registry: Rc::clone(&self.registry),
        }
    }
}

impl<K: EventKey, A: ?Sized + 'static> fmt::Debug for Subscriptions<K, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Subscriptions");
        if let Ok(registry) = self.registry.try_borrow() {
            s.field("active_events", &registry.active_events());
        }
        s.finish_non_exhaustive()
    }
}
