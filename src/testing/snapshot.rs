//! Point-in-time copies of broadcaster assignments.
//!
//! A [`Session`] pairs the registry copy with the per-registration copy taken by
//! one activation. Both are captured before any slot is overwritten.

use std::collections::HashMap;
use std::sync::Arc;

use crate::broadcasters::Broadcaster;
use crate::core::{BroadcasterKey, BroadcasterRegistry};
use crate::error::HarnessError;
use crate::listeners::{GlobalRegistration, Listener, ListenerTable, RegistrationKey};

/// Copy of the registry's key → broadcaster mapping.
pub(super) struct BroadcasterSnapshot {
    entries: HashMap<BroadcasterKey, Arc<dyn Broadcaster>>,
}

impl BroadcasterSnapshot {
    pub fn capture(registry: &BroadcasterRegistry) -> Self {
        Self {
            entries: registry.snapshot(),
        }
    }

    /// Replace-all: keys added after capture are dropped.
    pub fn restore_into(self, registry: &BroadcasterRegistry) {
        registry.replace_all(self.entries);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Captured broadcaster of one registration.
///
/// Holds the listener so its address, and therefore its [`ListenerId`](crate::ListenerId),
/// cannot be reused by another listener while the session is held.
struct OriginalBroadcaster {
    _listener: Arc<dyn Listener>,
    broadcaster: Arc<dyn Broadcaster>,
}

/// Copy of each global registration's broadcaster, keyed by `(listener, pattern)`.
pub(super) struct GlobalOverrideSnapshot {
    entries: HashMap<RegistrationKey, OriginalBroadcaster>,
}

impl GlobalOverrideSnapshot {
    pub fn capture(table: &ListenerTable) -> Self {
        let entries = table
            .registrations()
            .iter()
            .map(|reg| {
                let original = OriginalBroadcaster {
                    _listener: Arc::clone(reg.listener()),
                    broadcaster: reg.broadcaster(),
                };
                (reg.key().clone(), original)
            })
            .collect();
        Self { entries }
    }

    pub fn original_for(&self, reg: &GlobalRegistration) -> Option<&Arc<dyn Broadcaster>> {
        self.entries.get(reg.key()).map(|o| &o.broadcaster)
    }

    /// Fails on the first registration that has no captured broadcaster.
    pub fn ensure_covers(&self, regs: &[Arc<GlobalRegistration>]) -> Result<(), HarnessError> {
        match regs.iter().find(|reg| self.original_for(reg).is_none()) {
            None => Ok(()),
            Some(orphan) => Err(HarnessError::UnmappedRegistration {
                listener: orphan.listener().name(),
                listener_id: orphan.listener_id(),
                pattern: orphan.pattern().clone(),
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Everything one activation needs to be undone.
pub(super) struct Session {
    pub broadcasters: BroadcasterSnapshot,
    pub globals: GlobalOverrideSnapshot,
    pub strategy: &'static str,
}

impl Session {
    pub fn capture(
        registry: &BroadcasterRegistry,
        table: &ListenerTable,
        strategy: &'static str,
    ) -> Self {
        Self {
            broadcasters: BroadcasterSnapshot::capture(registry),
            globals: GlobalOverrideSnapshot::capture(table),
            strategy,
        }
    }
}
