//! Drop guard used by the scoped activation helpers.

use tracing::error;

use crate::error::HarnessError;

use super::OverrideController;

/// Restores the session a scope pushed when dropped, unless [`RestoreGuard::finish`] ran.
///
/// Covers both a panicking closure and a cancelled future. `depth` is the
/// stack depth right after the scope's own activation.
pub(super) struct RestoreGuard<'a> {
    controller: &'a OverrideController,
    depth: usize,
    armed: bool,
}

impl<'a> RestoreGuard<'a> {
    pub fn new(controller: &'a OverrideController, depth: usize) -> Self {
        Self {
            controller,
            depth,
            armed: true,
        }
    }

    /// Restores now and reports the outcome to the caller.
    pub fn finish(mut self) -> Result<(), HarnessError> {
        self.armed = false;
        self.unwind()
    }

    /// Restores this scope's session and anything left open above it.
    fn unwind(&self) -> Result<(), HarnessError> {
        let found = self.controller.depth();
        if found < self.depth {
            return Err(HarnessError::ScopeMismatch {
                expected: self.depth,
                found,
            });
        }
        self.controller.unwind_to(self.depth - 1)
    }
}

impl Drop for RestoreGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        if let Err(err) = self.unwind() {
            error!(
                label = err.as_label(),
                unwinding = std::thread::panicking(),
                "broadcaster override could not be restored: {err}"
            );
        }
    }
}
