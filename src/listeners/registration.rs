//! # Global listener registrations.
//!
//! A [`GlobalRegistration`] binds a listener to an [`EventPattern`] and carries
//! the broadcaster used to reach it. The broadcaster is the only mutable field
//! and is swapped through [`GlobalRegistration::set_broadcaster`], which is how
//! the override harness installs and removes its test doubles.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::broadcasters::Broadcaster;
use crate::events::EventPattern;

use super::{Listener, ListenerId};

/// Identity of a registration: which listener, on which events.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RegistrationKey {
    /// Listener identity.
    pub listener: ListenerId,
    /// Subscribed pattern.
    pub pattern: EventPattern,
}

/// A process-wide subscription of one listener.
pub struct GlobalRegistration {
    listener: Arc<dyn Listener>,
    key: RegistrationKey,
    broadcaster: RwLock<Arc<dyn Broadcaster>>,
}

impl GlobalRegistration {
    /// Creates a registration (normally done by [`ListenerTable::subscribe`](super::ListenerTable::subscribe)).
    pub fn new(
        listener: Arc<dyn Listener>,
        pattern: EventPattern,
        broadcaster: Arc<dyn Broadcaster>,
    ) -> Self {
        let key = RegistrationKey {
            listener: ListenerId::of(&listener),
            pattern,
        };
        Self {
            listener,
            key,
            broadcaster: RwLock::new(broadcaster),
        }
    }

    /// The subscribed listener.
    pub fn listener(&self) -> &Arc<dyn Listener> {
        &self.listener
    }

    /// Identity of the subscribed listener.
    pub fn listener_id(&self) -> ListenerId {
        self.key.listener
    }

    /// Events this registration subscribed to.
    pub fn pattern(&self) -> &EventPattern {
        &self.key.pattern
    }

    /// `(listener, pattern)` identity used to key snapshots.
    pub fn key(&self) -> &RegistrationKey {
        &self.key
    }

    /// Broadcaster currently used to reach the listener.
    pub fn broadcaster(&self) -> Arc<dyn Broadcaster> {
        let guard = self
            .broadcaster
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replaces the broadcaster in place and returns the previous one.
    pub fn set_broadcaster(&self, broadcaster: Arc<dyn Broadcaster>) -> Arc<dyn Broadcaster> {
        let mut guard = self
            .broadcaster
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, broadcaster)
    }
}

impl fmt::Debug for GlobalRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalRegistration")
            .field("listener", &self.listener.name())
            .field("id", &self.key.listener)
            .field("pattern", &self.key.pattern)
            .field("broadcaster", &self.broadcaster().name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broadcasters::{FakeBroadcaster, InlineBroadcaster};
    use crate::events::Event;

    struct Noop;

    impl Listener for Noop {
        fn on_event(&self, _event: &Event) {}
    }

    #[test]
    fn test_set_broadcaster_returns_previous() {
        let inline: Arc<dyn Broadcaster> = Arc::new(InlineBroadcaster::new());
        let fake: Arc<dyn Broadcaster> = Arc::new(FakeBroadcaster::new());
        let reg = GlobalRegistration::new(Arc::new(Noop), EventPattern::Any, Arc::clone(&inline));

        let prev = reg.set_broadcaster(Arc::clone(&fake));
        assert!(Arc::ptr_eq(&prev, &inline));
        assert!(Arc::ptr_eq(&reg.broadcaster(), &fake));
    }

    #[test]
    fn test_key_combines_listener_and_pattern() {
        let listener: Arc<dyn Listener> = Arc::new(Noop);
        let b: Arc<dyn Broadcaster> = Arc::new(InlineBroadcaster::new());
        let a = GlobalRegistration::new(Arc::clone(&listener), EventPattern::on("created"), b.clone());
        let c = GlobalRegistration::new(Arc::clone(&listener), EventPattern::on("deleted"), b);

        assert_eq!(a.listener_id(), c.listener_id());
        assert_ne!(a.key(), c.key());
    }
}
