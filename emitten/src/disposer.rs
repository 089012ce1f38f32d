use std::{cell::RefCell, fmt};

type DisposeFn = Box<dyn FnOnce()>;

/// Undoes a single registration.
///
/// Returned by [`Emitter::on`](crate::Emitter::on),
/// [`Emitter::once`](crate::Emitter::once) and
/// [`Emitter::disposable`](crate::Emitter::disposable). Calling
/// [`dispose`](Self::dispose) unregisters exactly the (event, listener) pair
/// it was created for. Only the first call has an effect, even if the same
/// pair was registered again in the meantime.
///
/// Dropping a `Disposer` does **not** unregister anything, so ignoring the
/// value returned by `on` is fine.
///
/// The disposer only keeps a weak reference to the emitter: disposing after
/// the emitter is gone is a no-op.
///
/// ```rust
/// use emitten::{Emitter, Listener};
///
/// let emitter = Emitter::<&'static str, ()>::new();
/// let dispose = emitter.disposable("tick", Listener::new(|_: &()| {}));
/// assert_eq!(emitter.active_events(), vec!["tick"]);
///
/// dispose.dispose();
/// dispose.dispose(); // no-op
/// assert!(emitter.active_events().is_empty());
/// ```
pub struct Disposer {
    dispose: RefCell<Option<DisposeFn>>,
}

impl Disposer {
    pub(crate) fn new(f: impl FnOnce() + 'static) -> Self {
        Self {
            dispose: RefCell::new(Some(Box::new(f))),
        }
    }

    /// Unregister the pair this disposer was created for.
    pub fn dispose(&self) {
        // The borrow must end before `f` runs: it may reach back into the emitter.
        let f = self.dispose.borrow_mut().take();
        if let Some(f) = f {
            f();
        }
    }

    /// Returns `true` once [`dispose`](Self::dispose) has been called.
    pub fn is_disposed(&self) -> bool {
        self.dispose.borrow().is_none()
    }
}

impl fmt::Debug for Disposer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Disposer")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::Cell, rc::Rc};

    use super::*;

    #[test]
    fn runs_once() {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        let disposer = Disposer::new(move || c.set(c.get() + 1));

        assert!(!disposer.is_disposed());
        disposer.dispose();
        disposer.dispose();
        assert!(disposer.is_disposed());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn drop_does_not_dispose() {
        let count = Rc::new(Cell::new(0));
        let c = count.clone();
        drop(Disposer::new(move || c.set(c.get() + 1)));
        assert_eq!(count.get(), 0);
    }
}
