//! Toggle item active use case.
//!
//! Spells flip their prepared state; everything else flips equipped.

use std::sync::Arc;

use serde::Serialize;
use sheetmark_domain::{ActorId, ItemId};

use crate::infrastructure::ports::{ItemStore, ItemUpdate};

use super::{editable_item, load_actor, FavoriteError};

/// State of an item after toggling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "field", content = "value", rename_all = "camelCase")]
pub enum ActiveState {
    Prepared(bool),
    Equipped(bool),
}

pub struct ToggleItemActive {
    store: Arc<dyn ItemStore>,
}

impl ToggleItemActive {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    /// Execute the toggle.
    ///
    /// # Returns
    /// * `Ok(ActiveState)` - The new state
    /// * `Err(FavoriteError::AlwaysPrepared)` - Always-prepared spells cannot be unprepared
    pub async fn execute(
        &self,
        actor_id: ActorId,
        item_id: ItemId,
    ) -> Result<ActiveState, FavoriteError> {
        let actor = load_actor(self.store.as_ref(), &actor_id).await?;
        let item = editable_item(&actor, &item_id)?;

        let (update, state) = if item.is_spell() {
            let spell = item.spell.clone().unwrap_or_default();
            if spell.is_always_prepared() {
                return Err(FavoriteError::AlwaysPrepared(item_id));
            }
            let prepared = !spell.prepared;
            (
                ItemUpdate::prepared(item_id.clone(), prepared),
                ActiveState::Prepared(prepared),
            )
        } else {
            let equipped = !item.details.equipped;
            (
                ItemUpdate::equipped(item_id.clone(), equipped),
                ActiveState::Equipped(equipped),
            )
        };

        self.store
            .update_items(actor_id.clone(), vec![update])
            .await?;

        tracing::info!(actor_id = %actor_id, item_id = %item_id, ?state, "Toggled item active state");
        Ok(state)
    }
}
