//! Item store port - the host's document persistence as seen by the core.

use async_trait::async_trait;
use sheetmark_domain::*;

use super::error::RepoError;
use super::types::{ActorUpdate, ItemUpdate};

// =============================================================================
// Item Storage
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemStore: Send + Sync {
    /// Current snapshot of an actor and all of its items.
    async fn get_actor(&self, actor_id: ActorId) -> Result<Option<ActorSnapshot>, RepoError>;

    async fn get_item(
        &self,
        actor_id: ActorId,
        item_id: ItemId,
    ) -> Result<Option<SheetItem>, RepoError>;

    /// Apply a multi-item update atomically: either every write lands or none.
    async fn update_items(&self, actor_id: ActorId, batch: Vec<ItemUpdate>)
        -> Result<(), RepoError>;

    /// Apply actor-level writes atomically.
    async fn update_actor(&self, actor_id: ActorId, batch: Vec<ActorUpdate>)
        -> Result<(), RepoError>;
}
