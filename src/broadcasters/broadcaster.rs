//! # Broadcaster strategy trait
//!
//! A [`Broadcaster`] decides *how* an event reaches a listener: immediately on
//! the caller's thread, later on a runtime task, or not at all. Registries and
//! global registrations hold broadcasters as `Arc<dyn Broadcaster>` so a single
//! instance can be shared across many slots.

use std::fmt;
use std::sync::Arc;

use crate::events::Event;
use crate::listeners::Listener;

/// Pluggable delivery strategy.
pub trait Broadcaster: Send + Sync + 'static {
    /// Deliver `event` to `listener`.
    ///
    /// Implementations decide whether the listener runs before this call returns.
    fn deliver(&self, event: &Event, listener: &Arc<dyn Listener>);

    /// Human-readable name (for logs).
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

impl fmt::Debug for dyn Broadcaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
