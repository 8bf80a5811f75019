//! # Broadcaster override harness for tests.
//!
//! Asynchronous broadcasters make assertions about listener side effects racy.
//! [`OverrideController`] temporarily replaces every broadcaster of a
//! [`Hub`](crate::Hub), both the registry slots and the broadcasters embedded
//! in global registrations, with a deterministic stand-in, then restores the
//! exact original assignment.
//!
//! ## Entry points
//! | Persistent          | Scoped                         | Replacement               |
//! |---------------------|--------------------------------|---------------------------|
//! | `fake()`            | `with_fake(f)` / `_async`      | [`FakeBroadcaster`](crate::FakeBroadcaster)     |
//! | `inline()`          | `with_inline(f)` / `_async`    | [`InlineBroadcaster`](crate::InlineBroadcaster) |
//! | `activate(b)`       | `with_strategy(b, f)` / `_async` | any broadcaster         |
//!
//! Persistent activations are undone by `restore()`; scoped ones restore on the
//! way out, including when the closure panics.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use herald::{BroadcasterKey, FakeBroadcaster, Hub, OverrideController};
//!
//! let hub = Hub::new();
//! hub.registry().set(BroadcasterKey::DEFAULT, Arc::new(FakeBroadcaster::new()));
//!
//! let ctl = OverrideController::for_hub(&hub);
//! ctl.with_inline(|| {
//!     let b = hub.registry().get(&BroadcasterKey::DEFAULT).unwrap();
//!     assert_eq!(b.name(), "InlineBroadcaster");
//! })
//! .unwrap();
//!
//! assert!(!ctl.is_enabled());
//! ```

mod config;
mod controller;
mod guard;
mod snapshot;

use std::sync::OnceLock;

use crate::core::Hub;

pub use config::{OverrideConfig, ReactivationPolicy};
pub use controller::OverrideController;

static GLOBAL_CONTROLLER: OnceLock<OverrideController> = OnceLock::new();

/// Controller bound to [`Hub::global`] with the default configuration.
pub fn global() -> &'static OverrideController {
    GLOBAL_CONTROLLER.get_or_init(|| OverrideController::for_hub(Hub::global()))
}
