//! # InlineBroadcaster — synchronous delivery
//!
//! Calls the listener on the caller's thread before `deliver` returns, so a
//! test can assert on side effects right after publishing.

use std::sync::Arc;

use super::Broadcaster;
use crate::events::Event;
use crate::listeners::Listener;

/// Synchronous, in-process broadcaster.
#[derive(Clone, Copy, Debug, Default)]
pub struct InlineBroadcaster;

impl InlineBroadcaster {
    /// Construct a new [`InlineBroadcaster`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Broadcaster for InlineBroadcaster {
    fn deliver(&self, event: &Event, listener: &Arc<dyn Listener>) {
        listener.on_event(event);
    }

    fn name(&self) -> &'static str {
        "InlineBroadcaster"
    }
}
