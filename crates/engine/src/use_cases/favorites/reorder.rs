//! Reorder favorite use case.
//!
//! Applies a drag-and-drop move inside one favorites bucket.

use std::sync::Arc;

use sheetmark_domain::{ActorId, ReorderIntent};

use crate::favorites::{FavoriteClassifier, NoOpReason, ReorderOutcome, SortCoordinator};
use crate::infrastructure::ports::{ConfigurationProvider, ItemStore, ItemUpdate};

use super::{load_actor, FavoriteError};

/// Reorder favorite use case.
///
/// Orchestrates: snapshot load, classification, key computation, one batch
/// write. Rejected drops are reported as no-ops and never touch the store.
pub struct ReorderFavorite {
    store: Arc<dyn ItemStore>,
    config: Arc<dyn ConfigurationProvider>,
}

impl ReorderFavorite {
    pub fn new(store: Arc<dyn ItemStore>, config: Arc<dyn ConfigurationProvider>) -> Self {
        Self { store, config }
    }

    /// Execute the reorder.
    ///
    /// # Arguments
    /// * `owner` - Actor whose sheet received the drop
    /// * `intent` - The drop, as decoded from the drag payload
    ///
    /// # Returns
    /// * `Ok(ReorderOutcome::Updates)` - Keys that were written
    /// * `Ok(ReorderOutcome::NoOp)` - Nothing to do, with the reason
    /// * `Err(FavoriteError)` - Actor missing or store failure
    pub async fn execute(
        &self,
        owner: ActorId,
        intent: ReorderIntent,
    ) -> Result<ReorderOutcome, FavoriteError> {
        let actor = load_actor(self.store.as_ref(), &owner).await?;
        if !actor.editable {
            return Ok(noop(&owner, NoOpReason::ReadOnly));
        }

        let step = self.config.favorites_config().effective_sort_step();
        let classified = FavoriteClassifier::new(step).classify(&actor.items);

        let bucket = match intent.bucket {
            Some(id) => classified.bucket(id),
            None => classified.bucket_of(&intent.dragged_item_id),
        };
        let Some(bucket) = bucket else {
            let reason = if intent.actor_id != owner {
                NoOpReason::ForeignActor
            } else {
                NoOpReason::DraggedNotInBucket
            };
            return Ok(noop(&owner, reason));
        };

        let outcome = SortCoordinator::new(step).reorder(bucket, &owner, &intent);
        let updates = match outcome {
            ReorderOutcome::NoOp(reason) => return Ok(noop(&owner, reason)),
            ReorderOutcome::Updates(updates) => updates,
        };

        let batch: Vec<ItemUpdate> = updates.iter().cloned().map(ItemUpdate::from).collect();
        self.store.update_items(owner.clone(), batch).await?;

        tracing::info!(
            actor_id = %owner,
            item_id = %intent.dragged_item_id,
            bucket = %bucket.id,
            updates = updates.len(),
            "Reordered favorite"
        );
        Ok(ReorderOutcome::Updates(updates))
    }
}

fn noop(owner: &ActorId, reason: NoOpReason) -> ReorderOutcome {
    tracing::debug!(actor_id = %owner, %reason, "Ignoring favorite drop");
    ReorderOutcome::NoOp(reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::app_settings::FavoritesConfig;
    use crate::infrastructure::ports::{FieldValue, MockConfigurationProvider, MockItemStore};
    use sheetmark_domain::{
        ActorSnapshot, BucketId, ItemId, ItemKind, SheetItem, SortKey, SortUpdate,
    };

    fn owner() -> ActorId {
        ActorId::new("actor-1").unwrap()
    }

    fn id(s: &str) -> ItemId {
        ItemId::new(s).unwrap()
    }

    fn config() -> Arc<dyn ConfigurationProvider> {
        let mut config = MockConfigurationProvider::new();
        config
            .expect_favorites_config()
            .returning(FavoritesConfig::default);
        Arc::new(config)
    }

    fn actor() -> ActorSnapshot {
        let loot = |name: &str, sort: i64| {
            SheetItem::new(id(name), name, ItemKind::Loot)
                .with_favorite(true)
                .with_sort(SortKey::new(sort))
        };
        ActorSnapshot::new(owner(), "Vex").with_items(vec![
            loot("a", 100_000),
            loot("b", 200_000),
            loot("c", 300_000),
            SheetItem::new(id("alert"), "Alert", ItemKind::Feat).with_favorite(true),
        ])
    }

    fn store_returning(actor: ActorSnapshot) -> MockItemStore {
        let mut store = MockItemStore::new();
        store
            .expect_get_actor()
            .returning(move |_| Ok(Some(actor.clone())));
        store
    }

    #[tokio::test]
    async fn writes_one_batch() {
        let mut store = store_returning(actor());
        store
            .expect_update_items()
            .withf(|actor_id, batch| {
                *actor_id == owner()
                    && batch.len() == 1
                    && batch[0].item_id == id("a")
                    && batch[0].value == FieldValue::Integer(250_000)
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let use_case = ReorderFavorite::new(Arc::new(store), config());
        let outcome = use_case
            .execute(owner(), ReorderIntent::new(owner(), id("a"), id("b")))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            ReorderOutcome::Updates(vec![SortUpdate::new(id("a"), SortKey::new(250_000))])
        );
    }

    #[tokio::test]
    async fn cross_bucket_drop_does_no_io() {
        let mut store = store_returning(actor());
        store.expect_update_items().never();

        let use_case = ReorderFavorite::new(Arc::new(store), config());
        let outcome = use_case
            .execute(owner(), ReorderIntent::new(owner(), id("a"), id("alert")))
            .await
            .unwrap();

        assert_eq!(outcome, ReorderOutcome::NoOp(NoOpReason::TargetNotInBucket));
    }

    #[tokio::test]
    async fn bucket_hint_selects_bucket() {
        let mut store = store_returning(actor());
        store.expect_update_items().never();

        let use_case = ReorderFavorite::new(Arc::new(store), config());
        let intent = ReorderIntent::new(owner(), id("a"), id("b")).in_bucket(BucketId::Feats);
        let outcome = use_case.execute(owner(), intent).await.unwrap();

        assert_eq!(outcome, ReorderOutcome::NoOp(NoOpReason::DraggedNotInBucket));
    }

    #[tokio::test]
    async fn foreign_actor_drop() {
        let mut store = store_returning(actor());
        store.expect_update_items().never();

        let use_case = ReorderFavorite::new(Arc::new(store), config());
        let intent = ReorderIntent::new(ActorId::new("other").unwrap(), id("x"), id("b"));
        let outcome = use_case.execute(owner(), intent).await.unwrap();

        assert_eq!(outcome, ReorderOutcome::NoOp(NoOpReason::ForeignActor));
    }

    #[tokio::test]
    async fn read_only_sheet_is_a_no_op() {
        let mut store = store_returning(actor().with_editable(false));
        store.expect_update_items().never();

        let use_case = ReorderFavorite::new(Arc::new(store), config());
        let outcome = use_case
            .execute(owner(), ReorderIntent::new(owner(), id("a"), id("b")))
            .await
            .unwrap();

        assert_eq!(outcome, ReorderOutcome::NoOp(NoOpReason::ReadOnly));
    }
}
