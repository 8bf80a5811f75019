//! Domain events and the identifiers used to route them.
//!
//! ## Contents
//! - [`Event`] payload handed to broadcasters and listeners
//! - [`EventPattern`] the (opaque) subscription filter stored on a global registration
//!
//! Patterns are never evaluated here: they only take part in the identity of a
//! registration, which is what the override harness keys its snapshots by.

mod event;
mod pattern;

pub use event::Event;
pub use pattern::EventPattern;
