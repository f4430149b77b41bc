//! Build favorites view use case.

use std::sync::Arc;

use sheetmark_domain::ActorId;

use crate::favorites::{FavoriteClassifier, FavoritesView};
use crate::infrastructure::ports::{ConfigurationProvider, ItemStore};

use super::{load_actor, FavoriteError};

/// Build favorites view use case.
///
/// Orchestrates: snapshot load, classification, view projection.
pub struct BuildFavoritesView {
    store: Arc<dyn ItemStore>,
    config: Arc<dyn ConfigurationProvider>,
}

impl BuildFavoritesView {
    pub fn new(store: Arc<dyn ItemStore>, config: Arc<dyn ConfigurationProvider>) -> Self {
        Self { store, config }
    }

    /// Execute the build favorites view use case.
    ///
    /// # Arguments
    /// * `actor_id` - The actor whose sheet is rendered
    ///
    /// # Returns
    /// * `Ok(Some(FavoritesView))` - The actor has favorites
    /// * `Ok(None)` - Nothing is favorited; the panel is not shown
    /// * `Err(FavoriteError)` - Actor missing or store failure
    pub async fn execute(&self, actor_id: ActorId) -> Result<Option<FavoritesView>, FavoriteError> {
        let actor = load_actor(self.store.as_ref(), &actor_id).await?;
        let config = self.config.favorites_config();

        let classified =
            FavoriteClassifier::new(config.effective_sort_step()).classify(&actor.items);
        Ok(FavoritesView::build(
            &classified,
            &actor,
            config.allow_cantrip_to_be_prepared,
        ))
    }
}
