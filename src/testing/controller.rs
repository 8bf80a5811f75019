//! # OverrideController: swap every broadcaster, then put them back.
//!
//! ## Lifecycle
//! ```text
//! fake() / inline() / activate(strategy)
//!   ├─► reactivation check (Reject → AlreadyEnabled)
//!   ├─► capture Session { registry copy, registration copy }
//!   ├─► registry[k] = strategy          for every key
//!   ├─► registration.broadcaster = strategy   for every global registration
//!   └─► push session (enabled = true)
//!
//! restore()
//!   ├─► no session → Ok (no-op)
//!   ├─► every current registration must be in the session copy
//!   │       └─ otherwise → UnmappedRegistration, nothing changed
//!   ├─► registry = session registry copy (replace-all)
//!   ├─► registration.broadcaster = original   for every global registration
//!   └─► pop session (enabled = depth > 0)
//! ```
//!
//! ## Invariants
//! - `is_enabled()` is true iff a session is held.
//! - A session is captured before any slot is overwritten, exactly once per activation.
//! - The replacement strategy is one shared `Arc` across all slots.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, error, trace};

use crate::broadcasters::{Broadcaster, FakeBroadcaster, InlineBroadcaster};
use crate::core::{BroadcasterRegistry, Hub};
use crate::error::HarnessError;
use crate::listeners::ListenerTable;

use super::{
    config::{OverrideConfig, ReactivationPolicy},
    guard::RestoreGuard,
    snapshot::Session,
};

/// Held sessions, innermost last. Empty means disabled.
#[derive(Default)]
struct OverrideState {
    sessions: Vec<Session>,
}

/// Replaces every broadcaster of a hub with a test double and restores them.
pub struct OverrideController {
    config: OverrideConfig,
    registry: Arc<BroadcasterRegistry>,
    listeners: Arc<ListenerTable>,
    state: Mutex<OverrideState>,
}

impl OverrideController {
    /// Creates a controller over the given registry and listener table.
    pub fn new(
        registry: Arc<BroadcasterRegistry>,
        listeners: Arc<ListenerTable>,
        config: OverrideConfig,
    ) -> Self {
        Self {
            config,
            registry,
            listeners,
            state: Mutex::new(OverrideState::default()),
        }
    }

    /// Creates a controller over `hub` with the default configuration.
    pub fn for_hub(hub: &Hub) -> Self {
        Self::with_config(hub, OverrideConfig::default())
    }

    /// Creates a controller over `hub` with a custom configuration.
    pub fn with_config(hub: &Hub, config: OverrideConfig) -> Self {
        Self::new(Arc::clone(hub.registry()), Arc::clone(hub.listeners()), config)
    }

    /// Current configuration.
    pub fn config(&self) -> &OverrideConfig {
        &self.config
    }

    /// Routes every broadcaster to a [`FakeBroadcaster`]: no listener is invoked.
    pub fn fake(&self) -> Result<(), HarnessError> {
        self.activate(Arc::new(FakeBroadcaster::new()))
    }

    /// Routes every broadcaster to an [`InlineBroadcaster`]: listeners run synchronously.
    pub fn inline(&self) -> Result<(), HarnessError> {
        self.activate(Arc::new(InlineBroadcaster::new()))
    }

    /// Routes every registry slot and every global registration to `strategy`.
    ///
    /// Under [`ReactivationPolicy::Reject`] this fails with
    /// [`HarnessError::AlreadyEnabled`] while an override is active.
    pub fn activate(&self, strategy: Arc<dyn Broadcaster>) -> Result<(), HarnessError> {
        self.push_session(strategy).map(|_| ())
    }

    /// Activates and returns the depth of the new session (1 for the outermost).
    fn push_session(&self, strategy: Arc<dyn Broadcaster>) -> Result<usize, HarnessError> {
        let mut state = self.lock_state();

        if !state.sessions.is_empty() && self.config.reactivation == ReactivationPolicy::Reject {
            debug!(
                strategy = strategy.name(),
                "override activation rejected: already enabled"
            );
            return Err(HarnessError::AlreadyEnabled);
        }

        let session = Session::capture(&self.registry, &self.listeners, strategy.name());

        for key in self.registry.keys() {
            self.registry.set(key, Arc::clone(&strategy));
        }
        for reg in self.listeners.registrations() {
            reg.set_broadcaster(Arc::clone(&strategy));
        }

        debug!(
            strategy = strategy.name(),
            keys = session.broadcasters.len(),
            registrations = session.globals.len(),
            depth = state.sessions.len() + 1,
            "broadcaster override activated"
        );
        state.sessions.push(session);
        Ok(state.sessions.len())
    }

    /// Restores the configuration captured by the innermost activation.
    ///
    /// A no-op when no override is active. Fails with
    /// [`HarnessError::UnmappedRegistration`] if a global registration was added
    /// during the override; in that case nothing is changed and the override stays active.
    pub fn restore(&self) -> Result<(), HarnessError> {
        let mut state = self.lock_state();

        let Some(session) = state.sessions.last() else {
            trace!("restore called without an active override");
            return Ok(());
        };

        let regs = self.listeners.registrations();
        session.globals.ensure_covers(&regs)?;

        let Some(session) = state.sessions.pop() else {
            return Ok(());
        };

        for reg in &regs {
            if let Some(original) = session.globals.original_for(reg) {
                reg.set_broadcaster(Arc::clone(original));
            }
        }
        let keys = session.broadcasters.len();
        session.broadcasters.restore_into(&self.registry);

        debug!(
            strategy = session.strategy,
            keys,
            registrations = regs.len(),
            depth = state.sessions.len(),
            "broadcaster override restored"
        );
        Ok(())
    }

    /// Restores every held session, innermost first.
    ///
    /// Stops at the first failure, leaving the remaining sessions held.
    pub fn restore_all(&self) -> Result<(), HarnessError> {
        self.unwind_to(0)
    }

    /// Restores sessions until at most `depth` remain.
    pub(super) fn unwind_to(&self, depth: usize) -> Result<(), HarnessError> {
        while self.depth() > depth {
            self.restore()?;
        }
        Ok(())
    }

    /// True between an activation and its restore.
    pub fn is_enabled(&self) -> bool {
        !self.lock_state().sessions.is_empty()
    }

    /// Number of held sessions (at most 1 under [`ReactivationPolicy::Reject`]).
    pub fn depth(&self) -> usize {
        self.lock_state().sessions.len()
    }

    /// Forgets every held session without touching the registry or registrations.
    ///
    /// Only meant for resetting the controller between tests of the harness itself.
    /// Fails with [`HarnessError::RestoreWithoutSnapshot`] when nothing is held.
    pub fn force_reset(&self) -> Result<(), HarnessError> {
        let mut state = self.lock_state();
        if state.sessions.is_empty() {
            return Err(HarnessError::RestoreWithoutSnapshot);
        }
        let dropped = state.sessions.len();
        state.sessions.clear();
        debug!(sessions = dropped, "broadcaster override state discarded");
        Ok(())
    }

    /// Runs `f` with every broadcaster faked, then restores, even if `f` panics.
    pub fn with_fake<R>(&self, f: impl FnOnce() -> R) -> Result<R, HarnessError> {
        self.with_strategy(Arc::new(FakeBroadcaster::new()), f)
    }

    /// Runs `f` with every broadcaster inlined, then restores, even if `f` panics.
    pub fn with_inline<R>(&self, f: impl FnOnce() -> R) -> Result<R, HarnessError> {
        self.with_strategy(Arc::new(InlineBroadcaster::new()), f)
    }

    /// Runs `f` with every broadcaster replaced by `strategy`, then restores.
    ///
    /// Activation errors are returned before `f` runs; restore errors after it.
    /// A panic in `f` propagates once the guard has restored.
    ///
    /// On exit, sessions the closure left open on top of this one are restored
    /// together with it. If the closure already restored this scope's session,
    /// nothing is touched and [`HarnessError::ScopeMismatch`] is returned.
    pub fn with_strategy<R>(
        &self,
        strategy: Arc<dyn Broadcaster>,
        f: impl FnOnce() -> R,
    ) -> Result<R, HarnessError> {
        let depth = self.push_session(strategy)?;
        let guard = RestoreGuard::new(self, depth);
        let out = f();
        guard.finish()?;
        Ok(out)
    }

    /// Async form of [`with_fake`](Self::with_fake).
    pub async fn with_fake_async<F: Future>(&self, fut: F) -> Result<F::Output, HarnessError> {
        self.with_strategy_async(Arc::new(FakeBroadcaster::new()), fut)
            .await
    }

    /// Async form of [`with_inline`](Self::with_inline).
    pub async fn with_inline_async<F: Future>(&self, fut: F) -> Result<F::Output, HarnessError> {
        self.with_strategy_async(Arc::new(InlineBroadcaster::new()), fut)
            .await
    }

    /// Async form of [`with_strategy`](Self::with_strategy).
    ///
    /// The override is also restored if the returned future is dropped before completion.
    pub async fn with_strategy_async<F: Future>(
        &self,
        strategy: Arc<dyn Broadcaster>,
        fut: F,
    ) -> Result<F::Output, HarnessError> {
        let depth = self.push_session(strategy)?;
        let guard = RestoreGuard::new(self, depth);
        let out = fut.await;
        guard.finish()?;
        Ok(out)
    }

    fn lock_state(&self) -> std::sync::MutexGuard<'_, OverrideState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for OverrideController {
    fn drop(&mut self) {
        if !self.config.restore_on_drop || !self.is_enabled() {
            return;
        }
        if let Err(err) = self.restore_all() {
            error!(
                label = err.as_label(),
                "broadcaster override left active on drop: {err}"
            );
        }
    }
}
