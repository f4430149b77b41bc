//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Item persistence (the host's document store)
//! - Configuration (the host's settings)

mod config;
mod error;
mod repos;
pub mod types;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::ItemStore;

// =============================================================================
// Configuration Ports
// =============================================================================
pub use config::ConfigurationProvider;

// =============================================================================
// Update Types
// =============================================================================
pub use types::{
    host_update_documents, ActorFieldPath, ActorUpdate, FieldPath, FieldValue, ItemUpdate,
};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use config::MockConfigurationProvider;
#[cfg(test)]
pub use repos::MockItemStore;

// =============================================================================
// Error Types
// =============================================================================
pub use error::RepoError;
