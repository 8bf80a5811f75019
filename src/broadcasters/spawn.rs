//! # AsyncBroadcaster — delivery on a tokio runtime
//!
//! The production-style strategy: every delivery is spawned onto a runtime
//! and `deliver` returns before the listener runs.
//!
//! ## Rules
//! - **Non-blocking**: `deliver()` never waits for the listener.
//! - **No ordering**: on a multi-threaded runtime, deliveries may interleave.
//! - **Isolation**: a panicking listener is caught and logged; the runtime keeps going.

use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use tokio::runtime::Handle;
use tracing::warn;

use super::Broadcaster;
use crate::error::HarnessError;
use crate::events::Event;
use crate::listeners::Listener;

/// Broadcaster that spawns each delivery onto a tokio runtime.
#[derive(Clone, Debug)]
pub struct AsyncBroadcaster {
    handle: Handle,
}

impl AsyncBroadcaster {
    /// Binds to the given runtime.
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    /// Binds to the runtime the caller is running on.
    ///
    /// Fails with [`HarnessError::NoRuntime`] outside a tokio runtime.
    pub fn current() -> Result<Self, HarnessError> {
        Handle::try_current()
            .map(Self::new)
            .map_err(|_| HarnessError::NoRuntime)
    }
}

impl Broadcaster for AsyncBroadcaster {
    fn deliver(&self, event: &Event, listener: &Arc<dyn Listener>) {
        let event = event.clone();
        let listener = Arc::clone(listener);

        self.handle.spawn(async move {
            if let Err(panic_err) = catch_unwind(AssertUnwindSafe(|| listener.on_event(&event))) {
                warn!(
                    listener = listener.name(),
                    event = event.name(),
                    info = %panic_message(panic_err.as_ref()),
                    "listener panicked during async delivery"
                );
            }
        });
    }

    fn name(&self) -> &'static str {
        "AsyncBroadcaster"
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
