//! Event kinds and source filters.

use crate::error::RegistrationError;
use std::{borrow::Borrow, fmt, sync::Arc};

/// Identifier naming a class of occurrence, e.g. `"after-save"`.
///
/// Always non-empty. Cloning is cheap.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EventKind(Arc<str>);

impl EventKind {
    /// Validate and wrap an event kind.
    pub fn new(kind: impl AsRef<str>) -> Result<Self, RegistrationError> {
        let kind = kind.as_ref();
        if kind.trim().is_empty() {
            return Err(RegistrationError::EmptyEventKind);
        }
        Ok(Self(Arc::from(kind)))
    }

    /// The kind as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("EventKind").field(&&*self.0).finish()
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EventKind {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets the dispatcher look kinds up by `&str` without allocating.
impl Borrow<str> for EventKind {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for EventKind {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for EventKind {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

impl TryFrom<&str> for EventKind {
    type Error = RegistrationError;

    fn try_from(kind: &str) -> Result<Self, Self::Error> {
        Self::new(kind)
    }
}

impl TryFrom<String> for EventKind {
    type Error = RegistrationError;

    fn try_from(kind: String) -> Result<Self, Self::Error> {
        Self::new(kind)
    }
}

/// Restricts a registration to events raised by a specific origin.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum SourceFilter {
    /// Match events from any source.
    #[default]
    Any,
    /// Match only events whose source equals this identifier.
    Only(String),
}

impl SourceFilter {
    /// Filter matching a single source.
    pub fn only(source: impl Into<String>) -> Self {
        Self::Only(source.into())
    }

    /// Check whether an event raised by `source` passes this filter.
    pub fn matches(&self, source: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Only(expected) => expected == source,
        }
    }

    /// Check the filter is usable for a registration.
    pub fn validate(&self) -> Result<(), RegistrationError> {
        match self {
            Self::Only(source) if source.trim().is_empty() => {
                Err(RegistrationError::EmptySourceFilter)
            }
            _ => Ok(()),
        }
    }

    /// The source this filter is restricted to, if any.
    pub fn source(&self) -> Option<&str> {
        match self {
            Self::Any => None,
            Self::Only(source) => Some(source),
        }
    }
}

impl From<Option<String>> for SourceFilter {
    fn from(source: Option<String>) -> Self {
        source.map_or(Self::Any, Self::Only)
    }
}

impl fmt::Display for SourceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Any => f.write_str("*"),
            Self::Only(source) => f.write_str(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_kind_rejects_empty() {
        assert_eq!(EventKind::new(""), Err(RegistrationError::EmptyEventKind));
        assert_eq!(EventKind::new("  "), Err(RegistrationError::EmptyEventKind));
        assert_eq!(EventKind::new("after-save").unwrap(), "after-save");
    }

    #[test]
    fn test_source_filter_matching() {
        let widget = SourceFilter::only("Widget");
        assert!(widget.matches("Widget"));
        assert!(!widget.matches("Gadget"));
        assert!(SourceFilter::Any.matches("Gadget"));
        assert!(SourceFilter::Any.matches(""));
    }

    #[test]
    fn test_source_filter_validation() {
        assert!(SourceFilter::Any.validate().is_ok());
        assert!(SourceFilter::only("Widget").validate().is_ok());
        assert_eq!(
            SourceFilter::only("").validate(),
            Err(RegistrationError::EmptySourceFilter)
        );
        assert_eq!(
            SourceFilter::only(" \t").validate(),
            Err(RegistrationError::EmptySourceFilter)
        );
        assert_eq!(SourceFilter::from(None), SourceFilter::Any);
    }
}
