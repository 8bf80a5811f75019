//! # Broadcaster registry - named delivery strategies.
//!
//! Maps a [`BroadcasterKey`] to the broadcaster publishers use for it. The
//! conventional key is [`BroadcasterKey::DEFAULT`].
//!
//! ## Rules
//! - Values are shared `Arc<dyn Broadcaster>`; `get` hands out clones of the handle.
//! - `replace_all` swaps the full contents under one write lock.
//! - `keys` is sorted, so iteration order is deterministic.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::broadcasters::Broadcaster;

/// Name of a broadcaster slot.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BroadcasterKey(Cow<'static, str>);

impl BroadcasterKey {
    /// The slot publishers use when they do not name one.
    pub const DEFAULT: BroadcasterKey = BroadcasterKey(Cow::Borrowed("default"));

    /// Creates a key.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for BroadcasterKey {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<String> for BroadcasterKey {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

impl fmt::Display for BroadcasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Key → broadcaster mapping, mutable in place.
#[derive(Default)]
pub struct BroadcasterRegistry {
    entries: RwLock<HashMap<BroadcasterKey, Arc<dyn Broadcaster>>>,
}

impl BroadcasterRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with `broadcaster` bound to [`BroadcasterKey::DEFAULT`].
    #[must_use]
    pub fn with_default(broadcaster: Arc<dyn Broadcaster>) -> Self {
        let reg = Self::new();
        reg.set(BroadcasterKey::DEFAULT, broadcaster);
        reg
    }

    /// Returns the sorted list of keys.
    pub fn keys(&self) -> Vec<BroadcasterKey> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        let mut keys: Vec<BroadcasterKey> = entries.keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    /// Broadcaster bound to `key`, if any.
    pub fn get(&self, key: &BroadcasterKey) -> Option<Arc<dyn Broadcaster>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Binds `broadcaster` to `key`; returns the previous binding.
    pub fn set(
        &self,
        key: impl Into<BroadcasterKey>,
        broadcaster: Arc<dyn Broadcaster>,
    ) -> Option<Arc<dyn Broadcaster>> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.into(), broadcaster)
    }

    /// Removes the binding for `key`.
    pub fn remove(&self, key: &BroadcasterKey) -> Option<Arc<dyn Broadcaster>> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }

    /// Removes all bindings.
    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// True if there are no bindings.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Point-in-time copy of all bindings.
    pub fn snapshot(&self) -> HashMap<BroadcasterKey, Arc<dyn Broadcaster>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the whole mapping: keys absent from `entries` are dropped.
    pub fn replace_all(&self, entries: HashMap<BroadcasterKey, Arc<dyn Broadcaster>>) {
        let mut guard = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        *guard = entries;
    }
}

impl fmt::Debug for BroadcasterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        f.debug_map()
            .entries(entries.iter().map(|(k, v)| (k.as_str(), v.name())))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broadcasters::{FakeBroadcaster, InlineBroadcaster};

    #[test]
    fn test_with_default_binds_default_key() {
        let inline: Arc<dyn Broadcaster> = Arc::new(InlineBroadcaster::new());
        let reg = BroadcasterRegistry::with_default(Arc::clone(&inline));

        assert_eq!(reg.keys(), vec![BroadcasterKey::DEFAULT]);
        assert!(Arc::ptr_eq(&reg.get(&BroadcasterKey::DEFAULT).unwrap(), &inline));
    }

    #[test]
    fn test_keys_are_sorted() {
        let reg = BroadcasterRegistry::new();
        let b: Arc<dyn Broadcaster> = Arc::new(FakeBroadcaster::new());
        reg.set("zeta", Arc::clone(&b));
        reg.set("alpha", Arc::clone(&b));
        reg.set(String::from("mid"), b);

        let keys: Vec<String> = reg.keys().iter().map(|k| k.to_string()).collect();
        assert_eq!(keys, vec!["alpha", "mid", "zeta"]);
    }

    #[test]
    fn test_replace_all_drops_unknown_keys() {
        let reg = BroadcasterRegistry::new();
        let b: Arc<dyn Broadcaster> = Arc::new(FakeBroadcaster::new());
        reg.set("keep", Arc::clone(&b));
        let snap = reg.snapshot();

        reg.set("added_later", Arc::clone(&b));
        assert_eq!(reg.len(), 2);

        reg.replace_all(snap);
        assert_eq!(reg.keys(), vec![BroadcasterKey::from("keep")]);
    }

    #[test]
    fn test_set_returns_previous_and_remove() {
        let reg = BroadcasterRegistry::new();
        let a: Arc<dyn Broadcaster> = Arc::new(FakeBroadcaster::new());
        let b: Arc<dyn Broadcaster> = Arc::new(InlineBroadcaster::new());

        assert!(reg.set("k", Arc::clone(&a)).is_none());
        let prev = reg.set("k", Arc::clone(&b)).unwrap();
        assert!(Arc::ptr_eq(&prev, &a));

        let removed = reg.remove(&BroadcasterKey::from("k")).unwrap();
        assert!(Arc::ptr_eq(&removed, &b));
        assert!(reg.is_empty());
    }
}
