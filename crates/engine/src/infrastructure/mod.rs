//! Infrastructure implementations.
//!
//! Contains port trait implementations and process setup.

pub mod app_settings;
pub mod memory_store;
pub mod ports;
pub mod settings;
pub mod telemetry;
