//! Set item uses use case.
//!
//! Writes the charge counter typed into a favorite's uses inputs. A counter
//! of 0/0 clears the charges display.

use std::sync::Arc;

use sheetmark_domain::{ActorId, ItemId, Uses};

use crate::infrastructure::ports::{ItemStore, ItemUpdate};

use super::{editable_item, load_actor, FavoriteError};

pub struct SetItemUses {
    store: Arc<dyn ItemStore>,
}

impl SetItemUses {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    pub async fn execute(
        &self,
        actor_id: ActorId,
        item_id: ItemId,
        uses: Uses,
    ) -> Result<Uses, FavoriteError> {
        let actor = load_actor(self.store.as_ref(), &actor_id).await?;
        editable_item(&actor, &item_id)?;

        self.store
            .update_items(
                actor_id.clone(),
                vec![
                    ItemUpdate::uses_value(item_id.clone(), uses.value),
                    ItemUpdate::uses_max(item_id.clone(), uses.max),
                ],
            )
            .await?;

        tracing::info!(
            actor_id = %actor_id,
            item_id = %item_id,
            value = uses.value,
            max = uses.max,
            "Set item uses"
        );
        Ok(uses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{FieldPath, FieldValue, MockItemStore};
    use sheetmark_domain::{ActorSnapshot, ItemKind, SheetItem};

    fn actor_id() -> ActorId {
        ActorId::new("actor-1").unwrap()
    }

    fn wand() -> ItemId {
        ItemId::new("wand").unwrap()
    }

    fn store_with(actor: ActorSnapshot) -> MockItemStore {
        let mut store = MockItemStore::new();
        store
            .expect_get_actor()
            .returning(move |_| Ok(Some(actor.clone())));
        store
    }

    #[tokio::test]
    async fn writes_value_and_max() {
        let actor = ActorSnapshot::new(actor_id(), "Vex")
            .with_items(vec![SheetItem::new(wand(), "Wand", ItemKind::Equipment)]);
        let mut store = store_with(actor);
        store
            .expect_update_items()
            .withf(|_, batch| {
                batch.len() == 2
                    && batch[0].field == FieldPath::UsesValue
                    && batch[0].value == FieldValue::Integer(3)
                    && batch[1].field == FieldPath::UsesMax
                    && batch[1].value == FieldValue::Integer(7)
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let uses = SetItemUses::new(Arc::new(store))
            .execute(actor_id(), wand(), Uses::new(3, 7))
            .await
            .unwrap();

        assert_eq!(uses, Uses::new(3, 7));
    }

    #[tokio::test]
    async fn read_only_sheet_is_refused() {
        let actor = ActorSnapshot::new(actor_id(), "Vex")
            .with_editable(false)
            .with_items(vec![SheetItem::new(wand(), "Wand", ItemKind::Equipment)]);
        let mut store = store_with(actor);
        store.expect_update_items().never();

        let result = SetItemUses::new(Arc::new(store))
            .execute(actor_id(), wand(), Uses::new(1, 1))
            .await;

        assert!(matches!(result, Err(FavoriteError::ReadOnly)));
    }
}
