//! # Broadcaster strategies.
//!
//! ```text
//!   deliver(event, listener)
//!        │
//!        ├── FakeBroadcaster    ─► (dropped)
//!        ├── InlineBroadcaster  ─► listener.on_event()  (before returning)
//!        └── AsyncBroadcaster   ─► runtime.spawn(listener.on_event())
//! ```
//!
//! [`FakeBroadcaster`] and [`InlineBroadcaster`] are stateless; the override
//! harness shares one instance of either across every slot it replaces.

mod broadcaster;
mod fake;
mod inline;
mod spawn;

pub use broadcaster::Broadcaster;
pub use fake::FakeBroadcaster;
pub use inline::InlineBroadcaster;
pub use spawn::AsyncBroadcaster;
