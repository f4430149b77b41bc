//! Toggle favorite use case.
//!
//! Adds an item to the favorites panel or removes it.

use std::sync::Arc;

use sheetmark_domain::{ActorId, ItemId};

use crate::infrastructure::ports::{ItemStore, ItemUpdate};

use super::{editable_item, load_actor, FavoriteError};

pub struct ToggleFavorite {
    store: Arc<dyn ItemStore>,
}

impl ToggleFavorite {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    /// Flip the item's favorite flag.
    ///
    /// # Returns
    /// * `Ok(bool)` - The new favorite state
    /// * `Err(FavoriteError::NotFavoritable)` - Class items cannot be favorites
    pub async fn execute(&self, actor_id: ActorId, item_id: ItemId) -> Result<bool, FavoriteError> {
        let actor = load_actor(self.store.as_ref(), &actor_id).await?;
        let item = editable_item(&actor, &item_id)?;
        if !item.kind.is_favoritable() {
            return Err(FavoriteError::NotFavoritable(item_id));
        }

        let is_favorite = !item.is_favorite();
        self.store
            .update_items(
                actor_id.clone(),
                vec![ItemUpdate::favorite(item_id.clone(), is_favorite)],
            )
            .await?;

        tracing::info!(
            actor_id = %actor_id,
            item_id = %item_id,
            is_favorite,
            "Toggled favorite"
        );
        Ok(is_favorite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{FieldPath, FieldValue, MockItemStore, RepoError};
    use sheetmark_domain::{ActorSnapshot, ItemKind, SheetItem};

    fn actor_with(item: SheetItem) -> ActorSnapshot {
        ActorSnapshot::new(ActorId::new("actor-1").unwrap(), "Vex").with_items(vec![item])
    }

    fn store_returning(actor: ActorSnapshot) -> MockItemStore {
        let mut store = MockItemStore::new();
        store
            .expect_get_actor()
            .returning(move |_| Ok(Some(actor.clone())));
        store
    }

    #[tokio::test]
    async fn favorites_an_item_without_flag() {
        let item_id = ItemId::new("rope").unwrap();
        let mut store =
            store_returning(actor_with(SheetItem::new(item_id.clone(), "Rope", ItemKind::Loot)));
        let expected_id = item_id.clone();
        store
            .expect_update_items()
            .withf(move |_, batch| {
                batch.len() == 1
                    && batch[0].item_id == expected_id
                    && batch[0].field == FieldPath::Favorite
                    && batch[0].value == FieldValue::Bool(true)
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let use_case = ToggleFavorite::new(Arc::new(store));
        let result = use_case
            .execute(ActorId::new("actor-1").unwrap(), item_id)
            .await
            .unwrap();

        assert!(result);
    }

    #[tokio::test]
    async fn unfavorites_a_favorite() {
        let item_id = ItemId::new("rope").unwrap();
        let mut store = store_returning(actor_with(
            SheetItem::new(item_id.clone(), "Rope", ItemKind::Loot).with_favorite(true),
        ));
        store
            .expect_update_items()
            .withf(|_, batch| batch[0].value == FieldValue::Bool(false))
            .returning(|_, _| Ok(()));

        let use_case = ToggleFavorite::new(Arc::new(store));
        let result = use_case
            .execute(ActorId::new("actor-1").unwrap(), item_id)
            .await
            .unwrap();

        assert!(!result);
    }

    #[tokio::test]
    async fn rejects_class_items() {
        let item_id = ItemId::new("wizard").unwrap();
        let mut store =
            store_returning(actor_with(SheetItem::new(item_id.clone(), "Wizard", ItemKind::Class)));
        store.expect_update_items().never();

        let use_case = ToggleFavorite::new(Arc::new(store));
        let result = use_case
            .execute(ActorId::new("actor-1").unwrap(), item_id)
            .await;

        assert!(matches!(result, Err(FavoriteError::NotFavoritable(_))));
    }

    #[tokio::test]
    async fn unknown_item() {
        let store = store_returning(actor_with(SheetItem::new(
            ItemId::new("rope").unwrap(),
            "Rope",
            ItemKind::Loot,
        )));

        let use_case = ToggleFavorite::new(Arc::new(store));
        let result = use_case
            .execute(ActorId::new("actor-1").unwrap(), ItemId::new("nope").unwrap())
            .await;

        assert!(matches!(result, Err(FavoriteError::ItemNotFound(_))));
    }

    #[tokio::test]
    async fn store_failure_propagates() {
        let item_id = ItemId::new("rope").unwrap();
        let mut store =
            store_returning(actor_with(SheetItem::new(item_id.clone(), "Rope", ItemKind::Loot)));
        store
            .expect_update_items()
            .returning(|_, _| Err(RepoError::storage("update_items", "host rejected update")));

        let use_case = ToggleFavorite::new(Arc::new(store));
        let result = use_case
            .execute(ActorId::new("actor-1").unwrap(), item_id)
            .await;

        assert!(matches!(result, Err(FavoriteError::Repo(_))));
    }

    #[tokio::test]
    async fn read_only_sheet() {
        let item_id = ItemId::new("rope").unwrap();
        let actor = actor_with(SheetItem::new(item_id.clone(), "Rope", ItemKind::Loot))
            .with_editable(false);
        let mut store = store_returning(actor);
        store.expect_update_items().never();

        let use_case = ToggleFavorite::new(Arc::new(store));
        let result = use_case
            .execute(ActorId::new("actor-1").unwrap(), item_id)
            .await;

        assert!(matches!(result, Err(FavoriteError::ReadOnly)));
    }
}
