//! Add item charges use case.
//!
//! Gives an item without a usage counter a single use so the panel can track
//! it.

use std::sync::Arc;

use sheetmark_domain::{ActorId, ItemId, Uses};

use crate::infrastructure::ports::{ItemStore, ItemUpdate};

use super::{editable_item, load_actor, FavoriteError};

pub struct AddItemCharges {
    store: Arc<dyn ItemStore>,
}

impl AddItemCharges {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    pub async fn execute(&self, actor_id: ActorId, item_id: ItemId) -> Result<Uses, FavoriteError> {
        let actor = load_actor(self.store.as_ref(), &actor_id).await?;
        editable_item(&actor, &item_id)?;

        let uses = Uses::new(1, 1);
        self.store
            .update_items(
                actor_id.clone(),
                vec![
                    ItemUpdate::uses_value(item_id.clone(), uses.value),
                    ItemUpdate::uses_max(item_id.clone(), uses.max),
                ],
            )
            .await?;

        tracing::info!(actor_id = %actor_id, item_id = %item_id, "Added item charges");
        Ok(uses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{FieldPath, FieldValue, MockItemStore};
    use sheetmark_domain::{ActorSnapshot, ItemKind, SheetItem};

    #[tokio::test]
    async fn sets_one_of_one() {
        let actor_id = ActorId::new("actor-1").unwrap();
        let item_id = ItemId::new("wand").unwrap();
        let actor = ActorSnapshot::new(actor_id.clone(), "Vex").with_items(vec![SheetItem::new(
            item_id.clone(),
            "Wand",
            ItemKind::Equipment,
        )]);

        let mut store = MockItemStore::new();
        store
            .expect_get_actor()
            .returning(move |_| Ok(Some(actor.clone())));
        store
            .expect_update_items()
            .withf(|_, batch| {
                batch.len() == 2
                    && batch[0].field == FieldPath::UsesValue
                    && batch[1].field == FieldPath::UsesMax
                    && batch.iter().all(|u| u.value == FieldValue::Integer(1))
            })
            .times(1)
            .returning(|_, _| Ok(()));

        let uses = AddItemCharges::new(Arc::new(store))
            .execute(actor_id, item_id)
            .await
            .unwrap();

        assert_eq!(uses, Uses::new(1, 1));
    }
}
