//! # Domain events delivered to listeners.
//!
//! An [`Event`] is what publishers hand to a [`Broadcaster`](crate::Broadcaster):
//! a name (e.g. `"order_created"`) plus ordered string arguments.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//! Use `seq` to restore the exact order when an asynchronous broadcaster delivers
//! events out of order.
//!
//! ## Example
//! ```rust
//! use herald::Event;
//!
//! let ev = Event::new("order_created")
//!     .with_arg("order-42")
//!     .with_arg("eur");
//!
//! assert_eq!(ev.name(), "order_created");
//! assert_eq!(ev.args().len(), 2);
//! assert_eq!(ev.arg(0), Some("order-42"));
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Domain event with positional arguments.
///
/// Cheap to clone: the name and arguments are reference-counted.
#[derive(Clone)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,

    name: Arc<str>,
    args: Vec<Arc<str>>,
}

impl Event {
    /// Creates a new event with the current timestamp and next sequence number.
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Appends a positional argument.
    #[inline]
    pub fn with_arg(mut self, arg: impl Into<Arc<str>>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Event name.
    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All positional arguments, in the order they were attached.
    #[inline]
    pub fn args(&self) -> &[Arc<str>] {
        &self.args
    }

    /// Argument at `index`, if present.
    #[inline]
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.args.get(index).map(|a| a.as_ref())
    }
}

impl fmt::Debug for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("seq", &self.seq)
            .field("name", &self.name)
            .field("args", &self.args)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequence_is_monotonic() {
        let a = Event::new("a");
        let b = Event::new("b");
        assert!(b.seq > a.seq);
    }

    #[test]
    fn test_args_keep_order() {
        let ev = Event::new("created").with_arg("x").with_arg("y");
        assert_eq!(ev.arg(0), Some("x"));
        assert_eq!(ev.arg(1), Some("y"));
        assert_eq!(ev.arg(2), None);
    }

    #[test]
    fn test_clone_shares_sequence() {
        let ev = Event::new("created");
        let copy = ev.clone();
        assert_eq!(ev.seq, copy.seq);
        assert_eq!(copy.name(), "created");
    }
}
