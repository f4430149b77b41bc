//! Favorites settings.
//!
//! # Settings Serialization
//!
//! FavoritesConfig includes serde derives because hosts store module settings
//! as JSON and may hand them over as-is.

use serde::{Deserialize, Serialize};
use sheetmark_domain::SORT_INTEGER_DENSITY;

/// Default flag namespace; matches data written by earlier sheet versions.
pub const DEFAULT_FLAG_NAMESPACE: &str = "favtab";

/// All configurable favorites settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FavoritesConfig {
    /// Namespace under which favorite flags are stored on items
    #[serde(default = "default_flag_namespace")]
    pub flag_namespace: String,

    /// Spacing between freshly assigned sort keys
    #[serde(default = "default_sort_step")]
    pub sort_step: i64,

    /// Passed through to the view so cantrips can offer a prepare toggle
    #[serde(default)]
    pub allow_cantrip_to_be_prepared: bool,
}

fn default_flag_namespace() -> String {
    DEFAULT_FLAG_NAMESPACE.to_string()
}

fn default_sort_step() -> i64 {
    SORT_INTEGER_DENSITY
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            flag_namespace: default_flag_namespace(),
            sort_step: default_sort_step(),
            allow_cantrip_to_be_prepared: false,
        }
    }
}

impl FavoritesConfig {
    /// Sort step to use, falling back to the default for non-positive values.
    pub fn effective_sort_step(&self) -> i64 {
        if self.sort_step > 0 {
            self.sort_step
        } else {
            tracing::warn!(
                sort_step = self.sort_step,
                "Ignoring non-positive sort step, using default"
            );
            SORT_INTEGER_DENSITY
        }
    }

    pub fn with_sort_step(mut self, sort_step: i64) -> Self {
        self.sort_step = sort_step;
        self
    }

    pub fn with_flag_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.flag_namespace = namespace.into();
        self
    }

    pub fn with_allow_cantrip_to_be_prepared(mut self, allow: bool) -> Self {
        self.allow_cantrip_to_be_prepared = allow;
        self
    }
}
