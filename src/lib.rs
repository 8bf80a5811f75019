//! # herald
//!
//! **Herald** is a small event broadcasting library with a test harness that
//! makes asynchronous delivery deterministic.
//!
//! Publishers hand events to a pluggable [`Broadcaster`] looked up in a
//! [`BroadcasterRegistry`]; process-wide subscriptions live in a
//! [`ListenerTable`] and each carries its own broadcaster. In tests,
//! [`OverrideController`] swaps all of them for a [`FakeBroadcaster`] or an
//! [`InlineBroadcaster`] and later restores the exact originals.
//!
//! ## Architecture
//! ```text
//!   ┌──────────────────────── Hub ─────────────────────────┐
//!   │  BroadcasterRegistry            ListenerTable        │
//!   │   default ─► AsyncBroadcaster    reg(L1, created, B) │
//!   │   audit   ─► AsyncBroadcaster    reg(L2, *,       B) │
//!   └───────────────▲─────────────────────────▲────────────┘
//!                   │ set / replace_all       │ set_broadcaster
//!            ┌──────┴─────────────────────────┴──────┐
//!            │          OverrideController           │
//!            │  sessions: [Session { registry copy,  │
//!            │                       registration    │
//!            │                       copy }]         │
//!            └───────────────────────────────────────┘
//! ```
//!
//! ## Features
//! | Area              | Description                                                  | Key types / traits                                |
//! |-------------------|--------------------------------------------------------------|---------------------------------------------------|
//! | **Events**        | Named events with positional arguments and global ordering.  | [`Event`], [`EventPattern`]                       |
//! | **Delivery**      | Pluggable broadcaster strategies.                            | [`Broadcaster`], [`AsyncBroadcaster`]             |
//! | **Subscriptions** | Listeners and process-wide registrations.                    | [`Listener`], [`ListenerTable`]                   |
//! | **Test harness**  | Reversible fake/inline override of every broadcaster.        | [`OverrideController`], [`OverrideConfig`]        |
//! | **Errors**        | Typed errors for harness misuse.                             | [`HarnessError`]                                  |
//!
//! ## Optional features
//! - `logging`: exports a simple built-in [`LogListener`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::{Arc, Mutex};
//! use herald::{
//!     AsyncBroadcaster, Broadcaster, BroadcasterKey, Event, EventPattern, Hub, Listener,
//!     OverrideController,
//! };
//!
//! #[derive(Default)]
//! struct Mailer(Mutex<Vec<String>>);
//!
//! impl Listener for Mailer {
//!     fn on_event(&self, event: &Event) {
//!         self.0.lock().unwrap().push(event.name().to_string());
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let hub = Hub::new();
//!     let production: Arc<dyn Broadcaster> = Arc::new(AsyncBroadcaster::current()?);
//!     hub.registry().set(BroadcasterKey::DEFAULT, Arc::clone(&production));
//!
//!     let mailer = Arc::new(Mailer::default());
//!     let listener: Arc<dyn Listener> = mailer.clone();
//!     hub.listeners()
//!         .subscribe(listener, EventPattern::on("signed_up"), production);
//!
//!     let ctl = OverrideController::for_hub(&hub);
//!     ctl.with_inline(|| {
//!         for reg in hub.listeners().registrations() {
//!             reg.broadcaster().deliver(&Event::new("signed_up"), reg.listener());
//!         }
//!         // Delivered before `deliver` returned.
//!         assert_eq!(mailer.0.lock().unwrap().len(), 1);
//!     })?;
//!
//!     assert!(!ctl.is_enabled());
//!     Ok(())
//! }
//! ```
mod broadcasters;
mod core;
mod error;
mod events;
mod listeners;
pub mod testing;

// ---- Public re-exports ----

pub use broadcasters::{AsyncBroadcaster, Broadcaster, FakeBroadcaster, InlineBroadcaster};
pub use crate::core::{BroadcasterKey, BroadcasterRegistry, Hub};
pub use error::HarnessError;
pub use events::{Event, EventPattern};
pub use listeners::{GlobalRegistration, Listener, ListenerId, ListenerTable, RegistrationKey};
pub use testing::{OverrideConfig, OverrideController, ReactivationPolicy};

// Optional: expose a simple built-in logging listener (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use listeners::LogListener;
