/// Sizing hints for an emitter's listener stores.
///
/// Both stores (persistent and one-shot) are sized from the same config.
/// Use the builder methods to customize, or [`Default`] for sensible defaults.
///
/// # Examples
///
/// ```rust
/// use emitten::{Config, Emitter};
///
/// let config = Config::default()
///     .with_event_capacity(64)      // many distinct events expected
///     .with_listener_capacity(1);   // usually a single listener each
///
/// let emitter = Emitter::<&'static str, u32>::with_config(config);
/// assert_eq!(emitter.config().event_capacity(), 64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Number of distinct events each store can hold before reallocating.
    /// Default: 16
    event_capacity: usize,

    /// Initial capacity of a listener set created for a new event.
    /// Default: 4
    listener_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            event_capacity: 16,
            listener_capacity: 4,
        }
    }
}

impl Config {
    /// Set the initial event capacity of each store.
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        self.event_capacity = capacity;
        self
    }

    /// Returns the initial event capacity of each store.
    pub fn event_capacity(&self) -> usize {
        self.event_capacity
    }

    /// Set the initial capacity of newly created listener sets.
    ///
    /// Sets grow on demand, so this only trades a little memory for fewer
    /// reallocations when events typically carry several listeners.
    pub fn with_listener_capacity(mut self, capacity: usize) -> Self {
        self.listener_capacity = capacity;
        self
    }

    /// Returns the initial capacity of newly created listener sets.
    pub fn listener_capacity(&self) -> usize {
        self.listener_capacity
    }
}
