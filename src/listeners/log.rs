//! # LogListener — simple event printer
//!
//! A minimal listener that logs every event it receives at `info` level.
//! Use it for tests or demos.
//!
//! ## Example output (with a fmt subscriber)
//! ```text
//! INFO herald::listeners::log: event seq=3 name="order_created" args=["order-42"]
//! ```

use tracing::info;

use crate::events::Event;
use crate::listeners::Listener;

/// Event logging listener.
#[derive(Default)]
pub struct LogListener;

impl LogListener {
    /// Construct a new [`LogListener`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Listener for LogListener {
    fn on_event(&self, e: &Event) {
        info!(seq = e.seq, name = e.name(), args = ?e.args(), "event");
    }

    fn name(&self) -> &'static str {
        "LogListener"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::broadcasters::{Broadcaster, InlineBroadcaster};

    #[test]
    fn test_logs_through_inline_delivery() {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let listener: Arc<dyn Listener> = Arc::new(LogListener::new());
        assert_eq!(listener.name(), "LogListener");
        InlineBroadcaster::new().deliver(&Event::new("created").with_arg("id-1"), &listener);
    }
}
