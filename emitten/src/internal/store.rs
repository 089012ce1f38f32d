use std::collections::{HashMap, hash_map::Entry};

use super::Handle;
use crate::{Config, EventKey};

/// Listeners of a single event, deduplicated by identity, in registration order.
#[derive(Debug)]
struct ListenerSet<L> {
    since: u64,
    listeners: Vec<L>,
}

impl<L: Handle> ListenerSet<L> {
    fn new(since: u64, capacity: usize) -> Self {
        Self {
            since,
            listeners: Vec::with_capacity(capacity),
        }
    }

    fn contains(&self, listener: &L) -> bool {
        let id = listener.id();
        self.listeners.iter().any(|l| l.id() == id)
    }

    fn insert(&mut self, listener: L) -> bool {
        if self.contains(&listener) {
            return false;
        }
        self.listeners.push(listener);
        true
    }

    fn remove(&mut self, listener: &L) -> bool {
        let id = listener.id();
        match self.listeners.iter().position(|l| l.id() == id) {
            Some(index) => {
                self.listeners.remove(index);
                true
            }
            None => false,
        }
    }
}

/// Maps event keys to listener sets. An entry never holds an empty set.
#[derive(Debug)]
pub(crate) struct Store<K, L> {
    sets: HashMap<K, ListenerSet<L>>,
    next_seq: u64,
    listener_capacity: usize,
}

impl<K: EventKey, L: Handle> Store<K, L> {
    pub fn new(config: &Config) -> Self {
        Self {
            sets: HashMap::with_capacity(config.event_capacity()),
            next_seq: 0,
            listener_capacity: config.listener_capacity(),
        }
    }

    fn entry(&mut self, key: K) -> &mut ListenerSet<L> {
        match self.sets.entry(key) {
            Entry::Occupied(e) => e.into_mut(),
            Entry::Vacant(e) => {
                self.next_seq += 1;
                e.insert(ListenerSet::new(self.next_seq, self.listener_capacity))
            }
        }
    }

    /// Adds `listener` under `key`. Returns `false` if it was already there.
    pub fn insert(&mut self, key: K, listener: L) -> bool {
        self.entry(key).insert(listener)
    }

    /// Removes `listener` from `key`, dropping the entry once it is empty.
    pub fn remove(&mut self, key: &K, listener: &L) -> bool {
        let Some(set) = self.sets.get_mut(key) else {
            return false;
        };
        let removed = set.remove(listener);
        if set.listeners.is_empty() {
            self.sets.remove(key);
        }
        removed
    }

    pub fn snapshot(&self, key: &K) -> Vec<L> {
        self.sets
            .get(key)
            .map(|set| set.listeners.clone())
            .unwrap_or_default()
    }

    /// Detaches the whole set of `key`.
    pub fn take(&mut self, key: &K) -> Vec<L> {
        self.sets
            .remove(key)
            .map(|set| set.listeners)
            .unwrap_or_default()
    }

    /// Puts `listeners` back under `key`, ahead of whatever was registered
    /// since they were taken.
    pub fn restore(&mut self, key: K, listeners: Vec<L>) {
        if listeners.is_empty() {
            return;
        }
        let set = self.entry(key);
        let newer = std::mem::replace(&mut set.listeners, listeners);
        for listener in newer {
            set.insert(listener);
        }
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.sets.contains_key(key)
    }

    pub fn len_of(&self, key: &K) -> usize {
        self.sets.get(key).map_or(0, |set| set.listeners.len())
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Keys in the order their entries were created.
    pub fn keys(&self) -> Vec<K> {
        let mut keys: Vec<_> = self.sets.iter().map(|(k, set)| (set.since, k)).collect();
        keys.sort_unstable_by_key(|(since, _)| *since);
        keys.into_iter().map(|(_, k)| k.clone()).collect()
    }

    /// Every (key, listener) pair, keys in creation order.
    pub fn pairs(&self) -> Vec<(K, L)> {
        self.keys()
            .into_iter()
            .flat_map(|key| {
                self.snapshot(&key)
                    .into_iter()
                    .map(move |listener| (key.clone(), listener))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Listener;

    fn store() -> Store<&'static str, Listener<()>> {
        Store::new(&Config::default())
    }

    fn listener() -> Listener<()> {
        Listener::new(|_: &()| {})
    }

    #[test]
    fn insert_deduplicates() {
        let mut store = store();
        let l = listener();
        assert!(store.insert("foo", l.clone()));
        assert!(!store.insert("foo", l.clone()));
        assert_eq!(store.len_of(&"foo"), 1);
    }

    #[test]
    fn removing_last_listener_drops_entry() {
        let mut store = store();
        let a = listener();
        let b = listener();
        store.insert("foo", a.clone());
        store.insert("foo", b.clone());

        assert!(store.remove(&"foo", &a));
        assert!(store.contains_key(&"foo"));
        assert!(store.remove(&"foo", &b));
        assert!(!store.contains_key(&"foo"));
        assert!(store.is_empty());
    }

    #[test]
    fn remove_absent_is_noop() {
        let mut store = store();
        let a = listener();
        store.insert("foo", a.clone());

        assert!(!store.remove(&"bar", &a));
        assert!(!store.remove(&"foo", &listener()));
        assert_eq!(store.len_of(&"foo"), 1);
    }

    #[test]
    fn snapshot_preserves_registration_order() {
        let mut store = store();
        let (a, b, c) = (listener(), listener(), listener());
        store.insert("foo", b.clone());
        store.insert("foo", a.clone());
        store.insert("foo", c.clone());

        assert_eq!(store.snapshot(&"foo"), vec![b, a, c]);
    }

    #[test]
    fn keys_follow_creation_order() {
        let mut store = store();
        for key in ["one", "two", "three", "four"] {
            store.insert(key, listener());
        }
        assert_eq!(store.keys(), vec!["one", "two", "three", "four"]);
    }

    #[test]
    fn recreated_key_moves_to_the_back() {
        let mut store = store();
        let a = listener();
        store.insert("one", a.clone());
        store.insert("two", listener());
        store.remove(&"one", &a);
        store.insert("one", a);

        assert_eq!(store.keys(), vec!["two", "one"]);
    }

    #[test]
    fn take_detaches_the_set() {
        let mut store = store();
        let a = listener();
        store.insert("foo", a.clone());

        assert_eq!(store.take(&"foo"), vec![a]);
        assert!(store.take(&"foo").is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn restore_goes_ahead_of_newer_listeners() {
        let mut store = store();
        let (a, b, c) = (listener(), listener(), listener());
        store.insert("foo", c.clone());
        store.insert("foo", a.clone());

        store.restore("foo", vec![a.clone(), b.clone()]);
        assert_eq!(store.snapshot(&"foo"), vec![a, b, c]);
    }

    #[test]
    fn restore_nothing_creates_no_entry() {
        let mut store = store();
        store.restore("foo", Vec::new());
        assert!(!store.contains_key(&"foo"));
    }

    #[test]
    fn pairs_walks_every_membership() {
        let mut store = store();
        let (a, b) = (listener(), listener());
        store.insert("foo", a.clone());
        store.insert("bar", b.clone());
        store.insert("foo", b.clone());

        assert_eq!(
            store.pairs(),
            vec![("foo", a), ("foo", b.clone()), ("bar", b)]
        );
    }
}
