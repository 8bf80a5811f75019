//! # Core listener trait
//!
//! `Listener` is the extension point for reacting to domain events. A listener
//! is invoked by whichever [`Broadcaster`](crate::Broadcaster) its registration
//! (or the publisher) is configured with: synchronously, on a runtime task, or
//! not at all.
//!
//! ## Contract
//! - `on_event` may be called from any thread (async broadcasters spawn it).
//! - Identity is the `Arc` allocation: clones of one `Arc<dyn Listener>` are the
//!   same listener (see [`ListenerId`]).
//!
//! ## Example
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use herald::{Event, Listener};
//!
//! #[derive(Default)]
//! struct Counter(AtomicUsize);
//!
//! impl Listener for Counter {
//!     fn on_event(&self, _event: &Event) {
//!         self.0.fetch_add(1, Ordering::SeqCst);
//!     }
//!     fn name(&self) -> &'static str { "counter" }
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use crate::events::Event;

/// Contract for event listeners.
pub trait Listener: Send + Sync + 'static {
    /// Handle a single event.
    fn on_event(&self, event: &Event);

    /// Human-readable name (for logs and error messages).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Identity of a listener, derived from its `Arc` allocation.
///
/// Stable for as long as any clone of the `Arc` is alive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(usize);

impl ListenerId {
    /// Identity of the given listener handle.
    pub fn of(listener: &Arc<dyn Listener>) -> Self {
        Self(Arc::as_ptr(listener) as *const () as usize)
    }

    #[cfg(test)]
    pub(crate) fn from_raw(raw: usize) -> Self {
        Self(raw)
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener#{:x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;

    impl Listener for Noop {
        fn on_event(&self, _event: &Event) {}
    }

    #[test]
    fn test_clones_share_identity() {
        let a: Arc<dyn Listener> = Arc::new(Noop);
        let b = Arc::clone(&a);
        assert_eq!(ListenerId::of(&a), ListenerId::of(&b));
    }

    #[test]
    fn test_distinct_allocations_differ() {
        let a: Arc<dyn Listener> = Arc::new(Noop);
        let b: Arc<dyn Listener> = Arc::new(Noop);
        assert_ne!(ListenerId::of(&a), ListenerId::of(&b));
    }

    #[test]
    fn test_default_name_is_type_name() {
        assert!(Noop.name().ends_with("Noop"));
    }
}
