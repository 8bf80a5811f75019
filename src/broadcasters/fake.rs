//! # FakeBroadcaster — drops every event
//!
//! Installed by [`OverrideController::fake`](crate::OverrideController::fake) to
//! silence listener side effects during a test.

use std::sync::Arc;

use tracing::trace;

use super::Broadcaster;
use crate::events::Event;
use crate::listeners::Listener;

/// No-op broadcaster: listeners are never invoked.
#[derive(Clone, Copy, Debug, Default)]
pub struct FakeBroadcaster;

impl FakeBroadcaster {
    /// Construct a new [`FakeBroadcaster`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Broadcaster for FakeBroadcaster {
    fn deliver(&self, event: &Event, listener: &Arc<dyn Listener>) {
        trace!(
            event = event.name(),
            seq = event.seq,
            listener = listener.name(),
            "fake broadcaster dropped event"
        );
    }

    fn name(&self) -> &'static str {
        "FakeBroadcaster"
    }
}
