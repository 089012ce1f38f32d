use std::{cell::RefCell, fmt, rc::Rc};

use crate::Listener;

/// A listener that records every invocation.
///
/// [`listener()`](Self::listener) always hands out the same [`Listener`]
/// identity, so a spy can be registered, deduplicated and removed like any
/// other listener. Arguments are stored as owned copies (`A::Owned`), which
/// lets a spy observe unsized argument shapes such as `[bool]` or `str`.
pub struct ListenerSpy<A: ToOwned + ?Sized + 'static> {
    calls: Rc<RefCell<Vec<A::Owned>>>,
    listener: Listener<A>,
}

impl<A: ToOwned + ?Sized + 'static> ListenerSpy<A> {
    pub fn new() -> Self {
        let calls: Rc<RefCell<Vec<A::Owned>>> = Rc::default();
        let sink = Rc::clone(&calls);
        let listener = Listener::new(move |args: &A| sink.borrow_mut().push(args.to_owned()));
        Self { calls, listener }
    }

    /// The recording listener. Every call returns a clone of the same listener.
    pub fn listener(&self) -> Listener<A> {
        self.listener.clone()
    }

    /// Number of recorded invocations.
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Returns `true` if the listener ran at least once.
    pub fn was_called(&self) -> bool {
        self.call_count() > 0
    }

    /// Returns `true` if any invocation received exactly `args`.
    pub fn was_called_with(&self, args: &A) -> bool
    where
        A: PartialEq,
    {
        self.calls
            .borrow()
            .iter()
            .any(|call| <A::Owned as std::borrow::Borrow<A>>::borrow(call) == args)
    }

    /// Arguments of every invocation, oldest first.
    pub fn calls(&self) -> Vec<A::Owned> {
        self.calls
            .borrow()
            .iter()
            .map(|call| <A::Owned as std::borrow::Borrow<A>>::borrow(call).to_owned())
            .collect()
    }

    /// Arguments of the `n`-th invocation (zero based).
    pub fn nth_call(&self, n: usize) -> Option<A::Owned> {
        self.calls
            .borrow()
            .get(n)
            .map(|call| <A::Owned as std::borrow::Borrow<A>>::borrow(call).to_owned())
    }

    /// Arguments of the most recent invocation.
    pub fn last_call(&self) -> Option<A::Owned> {
        let count = self.call_count();
        count.checked_sub(1).and_then(|n| self.nth_call(n))
    }

    /// Forget recorded invocations. The listener identity is unchanged.
    pub fn reset(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl<A: ToOwned + ?Sized + 'static> Default for ListenerSpy<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: ToOwned + ?Sized + 'static> Clone for ListenerSpy<A> {
    fn clone(&self) -> Self {
        Self {
            calls: Rc::clone(&self.calls),
            listener: self.listener.clone(),
        }
    }
}

impl<A: ToOwned + ?Sized + 'static> fmt::Debug for ListenerSpy<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerSpy")
            .field("listener", &self.listener.id())
            .field("call_count", &self.call_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_calls_in_order() {
        let spy = ListenerSpy::<u32>::new();
        let listener = spy.listener();
        listener.call(&1).unwrap();
        listener.call(&2).unwrap();

        assert_eq!(spy.call_count(), 2);
        assert_eq!(spy.calls(), vec![1, 2]);
        assert_eq!(spy.nth_call(0), Some(1));
        assert_eq!(spy.last_call(), Some(2));
        assert_eq!(spy.nth_call(2), None);
    }

    #[test]
    fn listener_identity_is_stable() {
        let spy = ListenerSpy::<u32>::new();
        assert_eq!(spy.listener(), spy.listener());
        assert_eq!(spy.clone().listener(), spy.listener());
    }

    #[test]
    fn unsized_arguments_are_owned() {
        let spy = ListenerSpy::<str>::new();
        spy.listener().call("hello").unwrap();

        assert!(spy.was_called_with("hello"));
        assert!(!spy.was_called_with("bye"));
        assert_eq!(spy.last_call(), Some("hello".to_string()));
    }

    #[test]
    fn reset_forgets_calls() {
        let spy = ListenerSpy::<u32>::new();
        spy.listener().call(&9).unwrap();
        spy.reset();

        assert!(!spy.was_called());
        assert_eq!(spy.last_call(), None);
    }
}
