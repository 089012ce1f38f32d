use std::{any::Any, fmt, rc::Rc};

use crate::{Listener, ListenerId};

/// What the registry needs from a stored listener: cheap clones and a
/// stable identity used for dedup and removal.
pub(crate) trait Handle: Clone {
    fn id(&self) -> ListenerId;
}

impl<A: ?Sized> Handle for Listener<A> {
    #[inline]
    fn id(&self) -> ListenerId {
        Listener::id(self)
    }
}

/// A [`Listener`] with its argument type erased, so listeners of different
/// events can share one registry.
#[derive(Clone)]
pub(crate) struct ErasedListener {
    id: ListenerId,
    inner: Rc<dyn Any>,
}

impl ErasedListener {
    pub fn new<A: ?Sized + 'static>(listener: Listener<A>) -> Self {
        Self {
            id: listener.id(),
            inner: Rc::new(listener),
        }
    }

    /// Recover the typed listener, if it was registered with arguments `A`.
    pub fn downcast<A: ?Sized + 'static>(&self) -> Option<&Listener<A>> {
        self.inner.downcast_ref::<Listener<A>>()
    }
}

impl fmt::Debug for ErasedListener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ErasedListener").field(&self.id).finish()
    }
}

impl Handle for ErasedListener {
    #[inline]
    fn id(&self) -> ListenerId {
        self.id
    }
}
