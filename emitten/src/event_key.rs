use std::{fmt::Debug, hash::Hash};

/// Identifies an event inside an emitter.
///
/// Any `Hash + Eq + Clone + Debug + 'static` type qualifies, so string
/// literals, `String`, `Arc<str>` and plain enums all work out of the box.
/// Two keys name the same event exactly when they compare equal.
///
/// Keys must be `Hash + Eq` because they index the listener stores, `Clone`
/// because snapshots such as [`Emitter::active_events`](crate::Emitter::active_events)
/// hand out owned copies, and `Debug` so registry activity can be traced.
///
/// ```rust
/// use emitten::EventKey;
///
/// #[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// enum Ui {
///     Click,
///     Resize,
/// }
///
/// fn assert_key<K: EventKey>() {}
/// assert_key::<Ui>();
/// assert_key::<&'static str>();
/// assert_key::<String>();
/// ```
pub trait EventKey: Hash + Eq + Clone + Debug + 'static {}

impl<T> EventKey for T where T: Hash + Eq + Clone + Debug + 'static {}

#[cfg(test)]
mod tests {
    use std::{collections::HashSet, sync::Arc};

    use super::*;

    fn dedup<K: EventKey>(keys: impl IntoIterator<Item = K>) -> usize {
        keys.into_iter().collect::<HashSet<_>>().len()
    }

    #[test]
    fn test_str_keys() {
        assert_eq!(dedup(["foo", "bar", "foo"]), 2);
    }

    #[test]
    fn test_shared_str_keys_compare_by_content() {
        let a: Arc<str> = Arc::from("foo");
        let b: Arc<str> = Arc::from("foo");
        assert!(!Arc::ptr_eq(&a, &b));
        assert_eq!(dedup([a, b]), 1);
    }

    #[test]
    fn test_key_as_enum() {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        enum Sensor {
            Temperature,
            Humidity,
        }
        assert_eq!(
            dedup([Sensor::Temperature, Sensor::Humidity, Sensor::Temperature]),
            2
        );
    }

    #[test]
    fn test_key_as_struct() {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        struct Channel {
            name: String,
            shard: u8,
        }
        let a = Channel {
            name: "iot".to_string(),
            shard: 0,
        };
        let b = Channel {
            name: "iot".to_string(),
            shard: 1,
        };
        assert_eq!(dedup([a.clone(), b, a]), 2);
    }
}
