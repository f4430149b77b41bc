//! Configuration port.
//!
//! Host settings are read through this capability instead of ad hoc lookups,
//! so tests can supply fixed values without a host runtime.

use crate::infrastructure::app_settings::FavoritesConfig;

#[cfg_attr(test, mockall::automock)]
pub trait ConfigurationProvider: Send + Sync {
    fn favorites_config(&self) -> FavoritesConfig;
}
