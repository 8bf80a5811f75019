//! Error types used by the broadcaster override harness.
//!
//! [`HarnessError`] covers misuse of the override controller (restoring or
//! resetting without a session, re-activating while enabled), registrations the
//! controller cannot restore, and broadcaster construction failures.
//!
//! It provides helper methods (`as_label`, `as_message`) for logging.

use thiserror::Error;

use crate::events::EventPattern;
use crate::listeners::ListenerId;

/// # Errors produced by the override harness.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HarnessError {
    /// `force_reset` was called while no snapshot is held.
    #[error("no broadcaster snapshot to discard; force_reset called without an active override")]
    RestoreWithoutSnapshot,

    /// A global registration exists that was not present when the override was activated.
    ///
    /// Restoring it would leave a test-double broadcaster attached, so restore refuses.
    #[error(
        "global registration of listener '{listener}' ({listener_id}) on '{pattern}' was added \
         while the override was active and has no original broadcaster; unsubscribe it before restoring"
    )]
    UnmappedRegistration {
        /// Listener name as reported by [`Listener::name`](crate::Listener::name).
        listener: &'static str,
        /// Identity of the listener.
        listener_id: ListenerId,
        /// Pattern of the orphaned registration.
        pattern: EventPattern,
    },

    /// Activation requested while an override is already active.
    #[error("broadcaster override already active; restore before activating again")]
    AlreadyEnabled,

    /// A scoped helper found its own session already restored on exit.
    ///
    /// Sessions below the scope are left untouched.
    #[error("scoped override session at depth {expected} was restored inside the scope (depth now {found})")]
    ScopeMismatch {
        /// Depth of the scope's own session.
        expected: usize,
        /// Depth found when the scope exited.
        found: usize,
    },

    /// An async broadcaster was requested outside a tokio runtime.
    #[error("no tokio runtime available for async delivery")]
    NoRuntime,
}

impl HarnessError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use herald::HarnessError;
    ///
    /// assert_eq!(HarnessError::AlreadyEnabled.as_label(), "override_already_enabled");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            HarnessError::RestoreWithoutSnapshot => "restore_without_snapshot",
            HarnessError::UnmappedRegistration { .. } => "unmapped_registration",
            HarnessError::AlreadyEnabled => "override_already_enabled",
            HarnessError::ScopeMismatch { .. } => "scope_mismatch",
            HarnessError::NoRuntime => "no_runtime",
        }
    }

    /// Returns a compact message with the error details.
    pub fn as_message(&self) -> String {
        match self {
            HarnessError::RestoreWithoutSnapshot => "no snapshot held".to_string(),
            HarnessError::UnmappedRegistration {
                listener,
                listener_id,
                pattern,
            } => format!("orphaned registration listener={listener} id={listener_id} on={pattern}"),
            HarnessError::AlreadyEnabled => "override already active".to_string(),
            HarnessError::ScopeMismatch { expected, found } => {
                format!("scope session gone expected_depth={expected} found={found}")
            }
            HarnessError::NoRuntime => "no tokio runtime".to_string(),
        }
    }

    /// Indicates whether the error means the override is still active.
    ///
    /// Returns `true` for [`HarnessError::UnmappedRegistration`] (restore changed nothing)
    /// and [`HarnessError::AlreadyEnabled`] (the earlier session is untouched).
    pub fn leaves_override_active(&self) -> bool {
        matches!(
            self,
            HarnessError::UnmappedRegistration { .. } | HarnessError::AlreadyEnabled
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmapped_message_names_listener() {
        let err = HarnessError::UnmappedRegistration {
            listener: "audit",
            listener_id: ListenerId::from_raw(0x10),
            pattern: EventPattern::on("created"),
        };
        let text = err.to_string();
        assert!(text.contains("'audit'"), "{text}");
        assert!(text.contains("'created'"), "{text}");
        assert_eq!(err.as_label(), "unmapped_registration");
        assert!(err.leaves_override_active());
    }

    #[test]
    fn test_messages_are_compact() {
        let err = HarnessError::ScopeMismatch {
            expected: 2,
            found: 1,
        };
        assert_eq!(err.as_label(), "scope_mismatch");
        assert_eq!(err.as_message(), "scope session gone expected_depth=2 found=1");
        assert!(!err.leaves_override_active());
        assert_eq!(HarnessError::AlreadyEnabled.as_message(), "override already active");
        assert_eq!(HarnessError::RestoreWithoutSnapshot.as_message(), "no snapshot held");
    }

    #[test]
    fn test_labels_are_stable() {
        assert_eq!(HarnessError::RestoreWithoutSnapshot.as_label(), "restore_without_snapshot");
        assert_eq!(HarnessError::NoRuntime.as_label(), "no_runtime");
        assert!(!HarnessError::RestoreWithoutSnapshot.leaves_override_active());
    }
}
