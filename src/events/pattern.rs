//! # Subscription patterns.
//!
//! [`EventPattern`] records which events a global registration asked for.
//! It is hashable so that `(listener, pattern)` can identify a registration.

use std::collections::BTreeSet;
use std::fmt;

/// Which events a registration subscribed to.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EventPattern {
    /// Every event.
    #[default]
    Any,
    /// Only the named events (sorted, deduplicated).
    Only(BTreeSet<String>),
}

impl EventPattern {
    /// Pattern for a single event name.
    pub fn on(name: impl Into<String>) -> Self {
        EventPattern::Only(BTreeSet::from([name.into()]))
    }

    /// Pattern for a list of event names.
    ///
    /// An empty list yields [`EventPattern::Any`].
    pub fn on_any_of<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let set: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        if set.is_empty() {
            EventPattern::Any
        } else {
            EventPattern::Only(set)
        }
    }
}

impl fmt::Display for EventPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventPattern::Any => f.write_str("*"),
            EventPattern::Only(names) => {
                let joined: Vec<&str> = names.iter().map(String::as_str).collect();
                write!(f, "{}", joined.join(","))
            }
        }
    }
}
