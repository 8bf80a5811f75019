//! # Event listeners and their global registrations.
//!
//! ## Architecture
//! ```text
//!   ListenerTable
//!     ├── GlobalRegistration { listener: L1, pattern: "created", broadcaster: B1 }
//!     ├── GlobalRegistration { listener: L2, pattern: *,         broadcaster: B2 }
//!     └── ...
//!
//!   B.deliver(event, L) ──► L.on_event(&event)   (when, and whether, is up to B)
//! ```

mod listener;
mod registration;
mod table;

#[cfg(feature = "logging")]
mod log;

pub use listener::{Listener, ListenerId};
pub use registration::{GlobalRegistration, RegistrationKey};
pub use table::ListenerTable;

#[cfg(feature = "logging")]
pub use log::LogListener;
