//! API layer - the command entry point the sheet UI calls into.

pub mod commands;

pub use commands::{handle_request, ReorderResponse};
