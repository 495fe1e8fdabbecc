//! # Dispatch Context
//!
//! The data bundle handed to every handler for one occurrence: the event kind,
//! the source it was raised from, an arbitrary key/value [`Payload`], and a
//! flag telling whether the call site is inside an externally managed unit of
//! work.
//!
//! The unit-of-work flag is informational. The dispatcher forwards it and never
//! branches on it; handlers may, for example to hold back externally visible
//! effects until the surrounding transaction commits.

use crate::event::EventKind;
use std::{
    any::Any,
    collections::HashMap,
    fmt,
    sync::Arc,
};

/// Arbitrary key/value data attached to a dispatch.
///
/// Values are type-erased and read back with [`get`](Self::get). Cloning a
/// payload only bumps reference counts.
///
/// # Example
///
/// ```rust
/// use tidings_core::Payload;
///
/// let payload = Payload::new().with("id", 42_u64).with("name", "widget");
/// assert_eq!(payload.get::<u64>("id"), Some(&42));
/// assert_eq!(payload.get::<&str>("name"), Some(&"widget"));
/// assert_eq!(payload.get::<u32>("id"), None);
/// ```
#[derive(Clone, Default)]
pub struct Payload {
    entries: HashMap<String, Arc<dyn Any + Send + Sync>>,
}

impl Payload {
    /// Create an empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, builder style.
    pub fn with<T: Any + Send + Sync>(mut self, key: impl Into<String>, value: T) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a value, replacing any previous value under the same key.
    pub fn insert<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
        self.entries.insert(key.into(), Arc::new(value));
    }

    /// Typed lookup. `None` if the key is missing or holds another type.
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.entries.get(key)?.downcast_ref::<T>()
    }

    /// Check whether a key is present, whatever its type.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove a key. Returns `true` if it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.entries.remove(key).is_some()
    }

    /// Iterate over the keys in arbitrary order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the payload has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl fmt::Debug for Payload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys: Vec<&str> = self.keys().collect();
        keys.sort_unstable();
        f.debug_struct("Payload").field("keys", &keys).finish()
    }
}

/// The transient arguments passed to handlers for one dispatch.
#[derive(Debug, Clone)]
pub struct DispatchContext {
    kind: EventKind,
    source: String,
    payload: Payload,
    in_unit_of_work: bool,
}

impl DispatchContext {
    /// Create a new dispatch context.
    pub fn new(
        kind: EventKind,
        source: impl Into<String>,
        payload: Payload,
        in_unit_of_work: bool,
    ) -> Self {
        Self {
            kind,
            source: source.into(),
            payload,
            in_unit_of_work,
        }
    }

    /// The kind of event being dispatched.
    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    /// The origin that raised the event.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The event payload.
    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    /// Whether the call site is inside an externally managed unit of work.
    pub fn in_unit_of_work(&self) -> bool {
        self.in_unit_of_work
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_typed_access() {
        let mut payload = Payload::new().with("count", 3_i32);
        payload.insert("label", String::from("blue"));

        assert_eq!(payload.get::<i32>("count"), Some(&3));
        assert_eq!(payload.get::<String>("label").map(String::as_str), Some("blue"));
        assert_eq!(payload.get::<i64>("count"), None);
        assert_eq!(payload.get::<i32>("missing"), None);
        assert_eq!(payload.len(), 2);

        assert!(payload.remove("count"));
        assert!(!payload.remove("count"));
        assert!(!payload.contains_key("count"));
    }

    #[test]
    fn test_payload_clone_shares_values() {
        let payload = Payload::new().with("id", 7_u64);
        let cloned = payload.clone();
        assert_eq!(cloned.get::<u64>("id"), Some(&7));
        assert_eq!(format!("{payload:?}"), r#"Payload { keys: ["id"] }"#);
    }

    #[test]
    fn test_context_accessors() {
        let ctx = DispatchContext::new(
            EventKind::new("created").unwrap(),
            "Widget",
            Payload::new(),
            true,
        );
        assert_eq!(ctx.kind().as_str(), "created");
        assert_eq!(ctx.source(), "Widget");
        assert!(ctx.payload().is_empty());
        assert!(ctx.in_unit_of_work());
    }
}
