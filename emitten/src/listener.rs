use std::{fmt, hash::Hash, rc::Rc};

use crate::Result;

type ListenerFn<A> = dyn Fn(&A) -> Result<()>;

/// Stable identity of a [`Listener`].
///
/// Two listeners share an id exactly when one is a clone of the other.
/// Ids are only meaningful while the listener is alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(usize);

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{:x}", self.0)
    }
}

/// A callable registered against an event.
///
/// `Listener` is a cheap-to-clone handle around a shared closure. Equality
/// and hashing use the identity of that shared closure, never its behavior:
/// clones of one handle are the same listener, while two handles built
/// from identical closures are two different listeners. Keep a clone of the
/// handle around if you intend to [`off`](crate::Emitter::off) it later.
///
/// # Example
///
/// ```rust
/// use emitten::{Emitter, Listener};
///
/// let emitter = Emitter::<&'static str, String>::new();
/// let greet = Listener::new(|name: &String| println!("hello {name}"));
///
/// emitter.on("greet", greet.clone());
/// emitter.on("greet", greet.clone()); // same listener, not added twice
/// assert_eq!(emitter.listener_count("greet"), 1);
///
/// emitter.off("greet", &greet);
/// assert!(emitter.is_empty());
/// ```
pub struct Listener<A: ?Sized> {
    callback: Rc<ListenerFn<A>>,
}

impl<A: ?Sized> Listener<A> {
    /// Wrap an infallible closure.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&A) + 'static,
    {
        Self::fallible(move |args: &A| {
            f(args);
            Ok(())
        })
    }

    /// Wrap a closure that may fail.
    ///
    /// An `Err` returned from the closure aborts the `emit` call that invoked
    /// it and is handed to that call's caller unchanged.
    pub fn fallible<F>(f: F) -> Self
    where
        F: Fn(&A) -> Result<()> + 'static,
    {
        Self {
            callback: Rc::new(f),
        }
    }

    /// Returns the identity of this listener.
    #[inline]
    pub fn id(&self) -> ListenerId {
        ListenerId(Rc::as_ptr(&self.callback) as *const () as usize)
    }

    /// Invoke the listener directly, outside of any emitter.
    pub fn call(&self, args: &A) -> Result<()> {
        (self.callback)(args)
    }
}

impl<A: ?Sized> Clone for Listener<A> {
    fn clone(&self) -> Self {
        Self {
            callback: Rc::clone(&self.callback),
        }
    }
}

impl<A: ?Sized> PartialEq for Listener<A> {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id()
    }
}

impl<A: ?Sized> Eq for Listener<A> {}

impl<A: ?Sized> Hash for Listener<A> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id().hash(state);
    }
}

impl<A: ?Sized> fmt::Debug for Listener<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Listener").field(&self.id()).finish()
    }
}
