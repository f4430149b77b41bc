//! Configuration providers.
//!
//! `EnvConfiguration` reads settings from the process environment after
//! loading `.env.local`/`.env`; `StaticConfiguration` wraps fixed values.

use std::path::Path;

use crate::infrastructure::app_settings::FavoritesConfig;
use crate::infrastructure::ports::ConfigurationProvider;

pub const ENV_FLAG_NAMESPACE: &str = "SHEETMARK_FLAG_NAMESPACE";
pub const ENV_SORT_STEP: &str = "SHEETMARK_SORT_STEP";
pub const ENV_ALLOW_CANTRIP_PREPARE: &str = "SHEETMARK_ALLOW_CANTRIP_PREPARE";

/// Configuration resolved once from environment variables.
#[derive(Debug, Clone)]
pub struct EnvConfiguration {
    config: FavoritesConfig,
}

impl EnvConfiguration {
    /// Load dotenv files from `dir` (local overrides first), then read the
    /// environment.
    pub fn load(dir: &Path) -> Self {
        for filename in [".env.local", ".env"] {
            let path = dir.join(filename);
            if path.exists() {
                if let Err(e) = dotenvy::from_path(&path) {
                    tracing::warn!(path = %path.display(), error = %e, "Failed to load env file");
                }
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through an arbitrary key lookup. Unparseable values
    /// keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = FavoritesConfig::default();

        if let Some(namespace) = lookup(ENV_FLAG_NAMESPACE)
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
        {
            config.flag_namespace = namespace;
        }

        if let Some(raw) = lookup(ENV_SORT_STEP) {
            match raw.trim().parse::<i64>() {
                Ok(step) => config.sort_step = step,
                Err(e) => tracing::warn!(value = %raw, error = %e, "Invalid {}", ENV_SORT_STEP),
            }
        }

        if let Some(raw) = lookup(ENV_ALLOW_CANTRIP_PREPARE) {
            config.allow_cantrip_to_be_prepared =
                matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }

        tracing::debug!(
            namespace = %config.flag_namespace,
            sort_step = config.sort_step,
            "Favorites configuration loaded"
        );
        Self { config }
    }
}

impl ConfigurationProvider for EnvConfiguration {
    fn favorites_config(&self) -> FavoritesConfig {
        self.config.clone()
    }
}

/// Fixed configuration, for embedding hosts and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticConfiguration(pub FavoritesConfig);

impl ConfigurationProvider for StaticConfiguration {
    fn favorites_config(&self) -> FavoritesConfig {
        self.0.clone()
    }
}
