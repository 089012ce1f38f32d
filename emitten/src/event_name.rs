use std::{fmt, hash::Hash, marker::PhantomData};

use crate::EventKey;

/// An event key that also names the argument type of the event.
///
/// Used with [`TypedEmitter`](crate::TypedEmitter), where every event may
/// carry a different payload. Declaring names as constants keeps listeners
/// and emit sites in agreement at compile time:
///
/// ```rust
/// use emitten::EventName;
///
/// const CONNECTED: EventName<str> = EventName::new("connected");
/// const RETRIED: EventName<(u32, bool)> = EventName::new("retried");
///
/// assert_eq!(*CONNECTED.key(), "connected");
/// assert_eq!(*RETRIED.key(), "retried");
/// ```
pub struct EventName<A: ?Sized, K = &'static str> {
    key: K,
    _args: PhantomData<fn(&A)>,
}

impl<A: ?Sized> EventName<A> {
    pub const fn new(name: &'static str) -> Self {
        Self {
            key: name,
            _args: PhantomData,
        }
    }
}

impl<A: ?Sized, K: EventKey> EventName<A, K> {
    /// Build a name over any key type, e.g. an enum of event kinds.
    pub fn with_key(key: K) -> Self {
        Self {
            key,
            _args: PhantomData,
        }
    }

    #[inline]
    pub fn key(&self) -> &K {
        &self.key
    }
}

impl<A: ?Sized, K: Clone> Clone for EventName<A, K> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            _args: PhantomData,
        }
    }
}

impl<A: ?Sized, K: Copy> Copy for EventName<A, K> {}

impl<A: ?Sized, K: PartialEq> PartialEq for EventName<A, K> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<A: ?Sized, K: Eq> Eq for EventName<A, K> {}

impl<A: ?Sized, K: Hash> Hash for EventName<A, K> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl<A: ?Sized, K: fmt::Debug> fmt::Debug for EventName<A, K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventName")
            .field("key", &self.key)
            .field("args", &std::any::type_name::<A>())
            .finish()
    }
}
