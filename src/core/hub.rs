//! # Hub: one registry plus one listener table.
//!
//! Production code normally uses [`Hub::global`]. Tests that exercise the
//! override harness itself build isolated hubs with [`Hub::new`] and inject
//! them into an [`OverrideController`](crate::OverrideController).

use std::sync::{Arc, OnceLock};

use crate::listeners::ListenerTable;

use super::registry::BroadcasterRegistry;

static GLOBAL_HUB: OnceLock<Hub> = OnceLock::new();

/// Shared handles to a broadcaster registry and a global listener table.
///
/// Cheap to clone: both parts are `Arc`-backed.
#[derive(Clone, Debug, Default)]
pub struct Hub {
    registry: Arc<BroadcasterRegistry>,
    listeners: Arc<ListenerTable>,
}

impl Hub {
    /// Creates an isolated hub with an empty registry and table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a hub from existing parts.
    pub fn from_parts(registry: Arc<BroadcasterRegistry>, listeners: Arc<ListenerTable>) -> Self {
        Self {
            registry,
            listeners,
        }
    }

    /// The process-wide hub, created empty on first use.
    pub fn global() -> &'static Hub {
        GLOBAL_HUB.get_or_init(Hub::new)
    }

    /// Broadcaster registry.
    pub fn registry(&self) -> &Arc<BroadcasterRegistry> {
        &self.registry
    }

    /// Global listener table.
    pub fn listeners(&self) -> &Arc<ListenerTable> {
        &self.listeners
    }
}
