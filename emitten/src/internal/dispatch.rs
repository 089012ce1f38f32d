use std::cell::RefCell;

use super::{FlightId, Handle, Registry};
use crate::{EventKey, Result};

/// Fires `key`: persistent listeners first, then one-shot listeners.
///
/// No borrow of `registry` is held while `invoke` runs, so listeners are
/// free to mutate the registry. The persistent set is snapshotted up front.
/// The one-shot set is detached after the persistent pass but stays in the
/// registry as a flight, so `off` and `empty` still reach its listeners
/// until they run. A one-shot still in the flight when a listener fails (or
/// panics) goes back to the store.
///
/// The first error returned by `invoke` stops the fan-out and is returned
/// unchanged.
pub(crate) fn dispatch<K, L>(
    registry: &RefCell<Registry<K, L>>,
    key: &K,
    mut invoke: impl FnMut(&L) -> Result<()>,
) -> Result<()>
where
    K: EventKey,
    L: Handle,
{
    let persistent = registry.borrow().persistent_snapshot(key);
    for listener in &persistent {
        invoke(listener)?;
    }

    let mut once = 0usize;
    let flight = registry.borrow_mut().begin_once(key);
    if let Some(flight) = flight {
        let _end = EndFlight { registry, flight };
        loop {
            let next = registry.borrow_mut().next_once(flight);
            let Some(listener) = next else { break };
            once += 1;
            invoke(&listener)?;
        }
    }

    tracing::trace!(
        event = ?key,
        persistent = persistent.len(),
        once,
        "event fired"
    );
    Ok(())
}

/// Closes a flight however the one-shot pass ends.
struct EndFlight<'a, K: EventKey, L: Handle> {
    registry: &'a RefCell<Registry<K, L>>,
    flight: FlightId,
}

impl<K: EventKey, L: Handle> Drop for EndFlight<'_, K, L> {
    fn drop(&mut self) {
        if let Ok(mut registry) = self.registry.try_borrow_mut() {
            registry.end_once(self.flight);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::RefCell,
        panic::{AssertUnwindSafe, catch_unwind},
        rc::Rc,
    };

    use super::*;
    use crate::{Config, Error, Listener};

    type Calls = Rc<RefCell<Vec<&'static str>>>;

    fn registry() -> RefCell<Registry<&'static str, Listener<Calls>>> {
        RefCell::new(Registry::new(Config::default()))
    }

    fn named(name: &'static str) -> Listener<Calls> {
        Listener::new(move |calls: &Calls| calls.borrow_mut().push(name))
    }

    fn failing(name: &'static str) -> Listener<Calls> {
        Listener::fallible(move |calls: &Calls| {
            calls.borrow_mut().push(name);
            Err(Error::msg(name))
        })
    }

    fn fire(
        registry: &RefCell<Registry<&'static str, Listener<Calls>>>,
        key: &'static str,
        calls: &Calls,
    ) -> Result<()> {
        dispatch(registry, &key, |l| l.call(calls))
    }

    fn once_listeners(
        registry: &RefCell<Registry<&'static str, Listener<Calls>>>,
        key: &'static str,
    ) -> Vec<Listener<Calls>> {
        let mut registry = registry.borrow_mut();
        let Some(flight) = registry.begin_once(&key) else {
            return Vec::new();
        };
        let listeners = std::iter::from_fn(|| registry.next_once(flight)).collect();
        registry.end_once(flight);
        listeners
    }

    #[test]
    fn persistent_before_once() {
        let registry = registry();
        registry.borrow_mut().once("foo", named("once"));
        registry.borrow_mut().on("foo", named("on"));
        let calls = Calls::default();

        fire(&registry, "foo", &calls).unwrap();
        assert_eq!(*calls.borrow(), vec!["on", "once"]);
        assert_eq!(registry.borrow().listener_count(&"foo"), 1);
    }

    #[test]
    fn unknown_event_is_a_noop() {
        let registry = registry();
        let calls = Calls::default();

        fire(&registry, "nothing", &calls).unwrap();
        assert!(calls.borrow().is_empty());
        assert!(registry.borrow().is_empty());
    }

    #[test]
    fn persistent_error_keeps_once_listeners() {
        let registry = registry();
        registry.borrow_mut().on("foo", failing("bad"));
        registry.borrow_mut().on("foo", named("skipped"));
        registry.borrow_mut().once("foo", named("once"));
        let calls = Calls::default();

        assert_eq!(fire(&registry, "foo", &calls), Err(Error::msg("bad")));
        assert_eq!(*calls.borrow(), vec!["bad"]);
        assert_eq!(registry.borrow().listener_count(&"foo"), 3);
    }

    #[test]
    fn once_error_restores_unreached_listeners() {
        let registry = registry();
        let ran = named("ran");
        let bad = failing("bad");
        let later = named("later");
        registry.borrow_mut().once("foo", ran);
        registry.borrow_mut().once("foo", bad);
        registry.borrow_mut().once("foo", later.clone());
        let calls = Calls::default();

        assert_eq!(fire(&registry, "foo", &calls), Err(Error::msg("bad")));
        assert_eq!(*calls.borrow(), vec!["ran", "bad"]);

        assert_eq!(once_listeners(&registry, "foo"), vec![later]);
    }

    #[test]
    fn once_panic_restores_unreached_listeners() {
        let registry = registry();
        let later = named("later");
        registry
            .borrow_mut()
            .once("foo", Listener::new(|_: &Calls| panic!("listener panicked")));
        registry.borrow_mut().once("foo", later.clone());
        let calls = Calls::default();

        let result = catch_unwind(AssertUnwindSafe(|| fire(&registry, "foo", &calls)));
        assert!(result.is_err());
        assert!(calls.borrow().is_empty());
        assert_eq!(once_listeners(&registry, "foo"), vec![later]);
    }

    #[test]
    fn once_removed_before_failure_stays_removed() {
        let registry = Rc::new(registry());
        let victim = named("victim");
        let later = named("later");
        let r = registry.clone();
        let v = victim.clone();
        registry.borrow_mut().once(
            "foo",
            Listener::fallible(move |calls: &Calls| {
                calls.borrow_mut().push("remover");
                r.borrow_mut().off(&"foo", &v);
                Err(Error::msg("remover"))
            }),
        );
        registry.borrow_mut().once("foo", victim);
        registry.borrow_mut().once("foo", later.clone());
        let calls = Calls::default();

        assert_eq!(fire(&registry, "foo", &calls), Err(Error::msg("remover")));
        assert_eq!(once_listeners(&registry, "foo"), vec![later]);
    }

    #[test]
    fn once_removed_mid_pass_does_not_run() {
        let registry = Rc::new(registry());
        let victim = named("victim");
        let r = registry.clone();
        let v = victim.clone();
        registry.borrow_mut().once(
            "foo",
            Listener::new(move |_: &Calls| {
                r.borrow_mut().off(&"foo", &v);
            }),
        );
        registry.borrow_mut().once("foo", victim);
        let calls = Calls::default();

        fire(&registry, "foo", &calls).unwrap();
        assert!(calls.borrow().is_empty());
        assert!(registry.borrow().is_empty());
    }

    #[test]
    fn empty_before_failure_leaves_nothing_behind() {
        let registry = Rc::new(registry());
        let r = registry.clone();
        registry.borrow_mut().once(
            "foo",
            Listener::fallible(move |_: &Calls| {
                r.borrow_mut().empty();
                Err(Error::msg("emptied"))
            }),
        );
        registry.borrow_mut().once("foo", named("later"));
        registry.borrow_mut().on("bar", named("other"));
        let calls = Calls::default();

        assert_eq!(fire(&registry, "foo", &calls), Err(Error::msg("emptied")));
        assert!(registry.borrow().is_empty());
        assert!(registry.borrow().active_events().is_empty());

        fire(&registry, "foo", &calls).unwrap();
        assert!(calls.borrow().is_empty());
    }
}
