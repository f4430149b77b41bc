//! End-to-end favorites flows.
//!
//! These tests drive the complete App through the command interface, using
//! host-shaped JSON documents loaded into the in-memory item store.

mod e2e_helpers;

pub use e2e_helpers::*;
