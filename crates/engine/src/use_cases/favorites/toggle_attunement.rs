//! Toggle attunement use case.

use std::sync::Arc;

use sheetmark_domain::{ActorId, Attunement, ItemId};

use crate::infrastructure::ports::{ItemStore, ItemUpdate};

use super::{editable_item, load_actor, FavoriteError};

pub struct ToggleAttunement {
    store: Arc<dyn ItemStore>,
}

impl ToggleAttunement {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    /// Attune or un-attune an item.
    ///
    /// An attuned item drops back to `Required`. Anything else becomes
    /// `Attuned` unless the actor is at its attunement maximum.
    ///
    /// # Returns
    /// * `Ok(Attunement)` - The new attunement state
    /// * `Err(FavoriteError::AttunementLimit)` - No free attunement slot
    pub async fn execute(
        &self,
        actor_id: ActorId,
        item_id: ItemId,
    ) -> Result<Attunement, FavoriteError> {
        let actor = load_actor(self.store.as_ref(), &actor_id).await?;
        let item = editable_item(&actor, &item_id)?;

        let next = match item.details.attunement {
            Attunement::Attuned => Attunement::Required,
            _ if actor.attunement.is_full() => {
                tracing::warn!(
                    actor_id = %actor_id,
                    count = actor.attunement.value,
                    max = actor.attunement.max,
                    "Attunement limit reached"
                );
                return Err(FavoriteError::AttunementLimit {
                    count: actor.attunement.value,
                    max: actor.attunement.max,
                });
            }
            _ => Attunement::Attuned,
        };

        self.store
            .update_items(
                actor_id.clone(),
                vec![ItemUpdate::attunement(item_id.clone(), next)],
            )
            .await?;

        tracing::info!(actor_id = %actor_id, item_id = %item_id, ?next, "Toggled attunement");
        Ok(next)
    }
}
