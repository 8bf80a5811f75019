//! Publish/subscribe plumbing shared by publishers and the override harness.
//!
//! Internal modules:
//! - [`registry`]: named broadcaster slots;
//! - [`hub`]: bundles a registry with a global listener table.

mod hub;
mod registry;

pub use hub::Hub;
pub use registry::{BroadcasterKey, BroadcasterRegistry};
