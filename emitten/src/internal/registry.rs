use std::collections::VecDeque;

use super::{Handle, Store};
use crate::{Config, EventKey};

/// Identifies the one-shot set detached by a single emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FlightId(u64);

/// One-shot listeners detached for an emit that have not run yet.
#[derive(Debug)]
struct Flight<K, L> {
    id: FlightId,
    key: K,
    pending: VecDeque<L>,
}

/// Dual-store listener bookkeeping.
///
/// Persistent and one-shot memberships live in two independent stores, so a
/// listener may hold both for the same event and fires once from each.
/// Firing itself lives in [`dispatch`](super::dispatch) because it must not
/// hold a borrow of the registry while listeners run.
///
/// One-shot sets detached by an emit in progress stay here as flights, so
/// `off` and `empty` reach listeners that have not run yet.
#[derive(Debug)]
pub(crate) struct Registry<K, L> {
    persistent: Store<K, L>,
    once: Store<K, L>,
    flights: Vec<Flight<K, L>>,
    next_flight: u64,
    config: Config,
}

impl<K: EventKey, L: Handle> Registry<K, L> {
    pub fn new(config: Config) -> Self {
        Self {
            persistent: Store::new(&config),
            once: Store::new(&config),
            flights: Vec::new(),
            next_flight: 0,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn on(&mut self, key: K, listener: L) -> bool {
        let id = listener.id();
        let added = self.persistent.insert(key.clone(), listener);
        tracing::trace!(event = ?key, listener = %id, added, "persistent listener registered");
        added
    }

    pub fn once(&mut self, key: K, listener: L) -> bool {
        let id = listener.id();
        let added = self.once.insert(key.clone(), listener);
        tracing::trace!(event = ?key, listener = %id, added, "one-shot listener registered");
        added
    }

    /// Removes `listener` from both stores and from any one-shot set an
    /// emit in progress has detached. Returns `true` if anything held it.
    pub fn off(&mut self, key: &K, listener: &L) -> bool {
        let from_persistent = self.persistent.remove(key, listener);
        let mut from_once = self.once.remove(key, listener);

        let id = listener.id();
        for flight in self.flights.iter_mut().filter(|f| &f.key == key) {
            let before = flight.pending.len();
            flight.pending.retain(|l| l.id() != id);
            from_once |= flight.pending.len() != before;
        }

        if from_persistent || from_once {
            tracing::trace!(
                event = ?key,
                listener = %id,
                from_persistent,
                from_once,
                "listener removed"
            );
        }
        from_persistent || from_once
    }

    pub fn persistent_snapshot(&self, key: &K) -> Vec<L> {
        self.persistent.snapshot(key)
    }

    /// Detaches the one-shot set of `key` for an emit. `None` if it is empty.
    pub fn begin_once(&mut self, key: &K) -> Option<FlightId> {
        let pending: VecDeque<L> = self.once.take(key).into();
        if pending.is_empty() {
            return None;
        }
        self.next_flight += 1;
        let id = FlightId(self.next_flight);
        self.flights.push(Flight {
            id,
            key: key.clone(),
            pending,
        });
        Some(id)
    }

    /// Next listener of the flight, removed from it before it runs.
    pub fn next_once(&mut self, flight: FlightId) -> Option<L> {
        self.flights
            .iter_mut()
            .find(|f| f.id == flight)
            .and_then(|f| f.pending.pop_front())
    }

    /// Closes the flight. Listeners it still holds go back to the one-shot
    /// store, ahead of those registered since it began.
    pub fn end_once(&mut self, flight: FlightId) {
        let Some(index) = self.flights.iter().position(|f| f.id == flight) else {
            return;
        };
        let Flight { key, pending, .. } = self.flights.remove(index);
        if pending.is_empty() {
            return;
        }
        tracing::trace!(event = ?key, count = pending.len(), "one-shot listeners restored");
        self.once.restore(key, pending.into());
    }

    /// Keys present in either store: persistent ones first, then the
    /// one-shot-only ones, each group in creation order.
    pub fn active_events(&self) -> Vec<K> {
        let mut keys = self.persistent.keys();
        keys.extend(
            self.once
                .keys()
                .into_iter()
                .filter(|k| !self.persistent.contains_key(k)),
        );
        keys
    }

    /// Persistent plus one-shot memberships for `key`.
    pub fn listener_count(&self, key: &K) -> usize {
        self.persistent.len_of(key) + self.once.len_of(key)
    }

    pub fn has_listeners(&self, key: &K) -> bool {
        self.persistent.contains_key(key) || self.once.contains_key(key)
    }

    pub fn is_empty(&self) -> bool {
        self.persistent.is_empty() && self.once.is_empty()
    }

    /// Unregisters every (event, listener) pair through [`off`](Self::off),
    /// including one-shots detached by an emit in progress.
    pub fn empty(&mut self) {
        let mut pairs = self.persistent.pairs();
        pairs.extend(self.once.pairs());
        pairs.extend(self.flights.iter().flat_map(|flight| {
            flight
                .pending
                .iter()
                .map(move |listener| (flight.key.clone(), listener.clone()))
        }));

        let total = pairs.len();
        for (key, listener) in &pairs {
            self.off(key, listener);
        }
        tracing::debug!(memberships = total, "emitter emptied");
    }
}
