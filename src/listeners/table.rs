//! # ListenerTable: the process-wide list of global registrations
//!
//! Keeps registrations in subscription order. Each `(listener, pattern)` pair
//! appears at most once: subscribing the same pair again updates the existing
//! registration's broadcaster instead of adding a duplicate.
//!
//! ## Diagram
//! ```text
//!   subscribe(L1, "created", B) ─► [ reg(L1, created, B) ]
//!   subscribe(L2, *, B)         ─► [ reg(L1, created, B), reg(L2, *, B) ]
//!   unsubscribe(L1)             ─► [ reg(L2, *, B) ]
//! ```

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::broadcasters::Broadcaster;
use crate::events::EventPattern;

use super::{GlobalRegistration, Listener, ListenerId, RegistrationKey};

/// Ordered collection of global registrations.
#[derive(Default)]
pub struct ListenerTable {
    registrations: RwLock<Vec<Arc<GlobalRegistration>>>,
}

impl ListenerTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `listener` for `pattern`, delivered through `broadcaster`.
    ///
    /// If the same listener is already registered for the same pattern, its
    /// broadcaster is replaced and the existing registration is returned.
    pub fn subscribe(
        &self,
        listener: Arc<dyn Listener>,
        pattern: EventPattern,
        broadcaster: Arc<dyn Broadcaster>,
    ) -> Arc<GlobalRegistration> {
        let key = RegistrationKey {
            listener: ListenerId::of(&listener),
            pattern,
        };

        let mut regs = self
            .registrations
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = regs.iter().find(|r| *r.key() == key) {
            existing.set_broadcaster(broadcaster);
            return Arc::clone(existing);
        }

        let reg = Arc::new(GlobalRegistration::new(listener, key.pattern, broadcaster));
        regs.push(Arc::clone(&reg));
        reg
    }

    /// Removes every registration of the given listener; returns how many were removed.
    pub fn unsubscribe(&self, listener: ListenerId) -> usize {
        let mut regs = self
            .registrations
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let before = regs.len();
        regs.retain(|r| r.listener_id() != listener);
        before - regs.len()
    }

    /// Snapshot of the current registrations, in subscription order.
    ///
    /// The returned handles are shared: mutating a broadcaster through them
    /// is visible to the table.
    pub fn registrations(&self) -> Vec<Arc<GlobalRegistration>> {
        self.registrations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Removes all registrations.
    pub fn clear(&self) {
        self.registrations
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registrations
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True if there are no registrations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for ListenerTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.registrations().iter()).finish()
    }
}
