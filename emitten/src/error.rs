use std::sync::Arc;

/// The single error type for all Emitten operations.
///
/// Registry operations themselves never fail: unregistering an absent
/// listener, emitting an event nobody listens to and emptying an empty
/// emitter are all no-ops. Errors originate in listener bodies and travel
/// back to the caller of `emit` untouched.
#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
    #[error("Listener failed: {0}")]
    Listener(#[source] Arc<dyn std::error::Error + Send + Sync>),

    #[error("{0}")]
    Message(String),

    #[error("Event {event} was registered with a different argument type than {expected}")]
    SignatureMismatch {
        event: String,
        expected: &'static str,
    },
}

impl Error {
    /// Wrap an arbitrary error raised inside a listener.
    pub fn listener(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        Error::Listener(Arc::new(e))
    }

    /// Build an error from a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Error::Message(message.into())
    }
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Listener(a), Self::Listener(b)) => Arc::ptr_eq(a, b),
            (Self::Message(a), Self::Message(b)) => a == b,
            (
                Self::SignatureMismatch {
                    event: a,
                    expected: x,
                },
                Self::SignatureMismatch {
                    event: b,
                    expected: y,
                },
            ) => a == b && x == y,
            _ => false,
        }
    }
}

impl Eq for Error {}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Listener(Arc::new(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listener_errors_compare_by_identity() {
        let e = Error::listener(std::io::Error::other("disk gone"));
        let same = e.clone();
        let other = Error::listener(std::io::Error::other("disk gone"));

        assert_eq!(e, same);
        assert_ne!(e, other);
    }

    #[test]
    fn message_display() {
        let e = Error::msg("boom");
        assert_eq!(e.to_string(), "boom");
        assert_eq!(e, Error::Message("boom".into()));
    }

    #[test]
    fn listener_error_keeps_source() {
        use std::error::Error as _;

        let e: Error = std::io::Error::other("closed").into();
        assert!(e.to_string().contains("closed"));
        assert!(e.source().is_some());
    }
}
