//! Set spell slot use case.
//!
//! Writes a remaining-slot count or a maximum override for one slot pool.

use std::sync::Arc;

use sheetmark_domain::{ActorId, DomainError, SlotCounter, SlotField, SpellSlotId};

use crate::infrastructure::ports::{ActorUpdate, ItemStore};

use super::{load_actor, FavoriteError};

pub struct SetSpellSlot {
    store: Arc<dyn ItemStore>,
}

impl SetSpellSlot {
    pub fn new(store: Arc<dyn ItemStore>) -> Self {
        Self { store }
    }

    /// Set one number of a slot pool.
    ///
    /// # Returns
    /// * `Ok(SlotCounter)` - The pool after the write
    /// * `Err(FavoriteError::ReadOnly)` - The sheet cannot be edited
    pub async fn execute(
        &self,
        actor_id: ActorId,
        slot: SpellSlotId,
        field: SlotField,
        value: u32,
    ) -> Result<SlotCounter, FavoriteError> {
        let actor = load_actor(self.store.as_ref(), &actor_id).await?;
        if !actor.editable {
            return Err(FavoriteError::ReadOnly);
        }
        let mut counter = actor
            .spell_slots
            .get(slot)
            .ok_or_else(|| DomainError::validation(format!("No spell slots for {}", slot)))?;

        self.store
            .update_actor(
                actor_id.clone(),
                vec![ActorUpdate::spell_slot(slot, field, value)],
            )
            .await?;

        match field {
            SlotField::Value => counter.value = value,
            SlotField::Override => counter.max_override = Some(value),
        }
        tracing::info!(actor_id = %actor_id, %slot, ?field, value, "Set spell slot");
        Ok(counter)
    }
}
