//! # Override controller configuration.
//!
//! [`ReactivationPolicy`] decides what happens when an override is activated
//! while another one is still active.
//!
//! ## Choosing the right policy
//!
//! **Flat tests** (one override per test, the common case):
//! ```text
//! ReactivationPolicy::Reject   → second activation fails with AlreadyEnabled
//! ```
//!
//! **Nested helpers** (a helper that fakes inside a test that inlines):
//! ```text
//! ReactivationPolicy::Stack    → each activation pushes a session,
//!                                each restore pops one
//! ```

/// Policy for activating an override while one is already active.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReactivationPolicy {
    /// Refuse the activation; the active session is left untouched (default).
    #[default]
    Reject,
    /// Push a new session on top of the active one.
    ///
    /// `restore` pops the innermost session only; the controller stays enabled
    /// until every session has been restored.
    Stack,
}

/// Configuration for an [`OverrideController`](super::OverrideController).
///
/// ## Field semantics
/// - `reactivation`: what a second activation does while enabled
/// - `restore_on_drop`: restore every held session when the controller is dropped
#[derive(Clone, Debug)]
pub struct OverrideConfig {
    /// Behavior of activation while an override is active.
    pub reactivation: ReactivationPolicy,

    /// Restore all held sessions when the controller is dropped.
    ///
    /// Failures during this restore are logged, never raised.
    pub restore_on_drop: bool,
}

impl Default for OverrideConfig {
    /// Default configuration:
    ///
    /// - `reactivation = ReactivationPolicy::Reject`
    /// - `restore_on_drop = true`
    fn default() -> Self {
        Self {
            reactivation: ReactivationPolicy::default(),
            restore_on_drop: true,
        }
    }
}
