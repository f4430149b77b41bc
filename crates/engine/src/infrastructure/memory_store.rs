//! In-memory item store.
//!
//! Holds actor snapshots keyed by id. Used by tests and by embedding hosts
//! that hand the engine a snapshot and read the result back. Batches are
//! validated in full before any field is written.

use async_trait::async_trait;
use dashmap::DashMap;
use sheetmark_domain::{
    ActorId, ActorSnapshot, Attunement, ItemId, SheetItem, SlotField, SortKey, Uses,
};

use crate::infrastructure::ports::{
    ActorFieldPath, ActorUpdate, FieldPath, FieldValue, ItemStore, ItemUpdate, RepoError,
};

#[derive(Debug, Default)]
pub struct InMemoryItemStore {
    actors: DashMap<ActorId, ActorSnapshot>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an actor snapshot.
    pub fn insert_actor(&self, actor: ActorSnapshot) {
        self.actors.insert(actor.id.clone(), actor);
    }

    /// Current copy of an actor, if stored.
    pub fn actor(&self, actor_id: &ActorId) -> Option<ActorSnapshot> {
        self.actors.get(actor_id).map(|a| a.value().clone())
    }
}

#[async_trait]
impl ItemStore for InMemoryItemStore {
    async fn get_actor(&self, actor_id: ActorId) -> Result<Option<ActorSnapshot>, RepoError> {
        Ok(self.actor(&actor_id))
    }

    async fn get_item(
        &self,
        actor_id: ActorId,
        item_id: ItemId,
    ) -> Result<Option<SheetItem>, RepoError> {
        Ok(self
            .actors
            .get(&actor_id)
            .and_then(|actor| actor.item(&item_id).cloned()))
    }

    async fn update_items(
        &self,
        actor_id: ActorId,
        batch: Vec<ItemUpdate>,
    ) -> Result<(), RepoError> {
        let mut actor = self
            .actors
            .get_mut(&actor_id)
            .ok_or_else(|| RepoError::not_found("Actor", actor_id.to_string()))?;

        for update in &batch {
            let item = actor
                .item(&update.item_id)
                .ok_or_else(|| RepoError::not_found("Item", update.item_id.to_string()))?;
            validate(item, update)?;
        }

        let mut attunement_changed = false;
        for update in &batch {
            if let Some(item) = actor.item_mut(&update.item_id) {
                attunement_changed |= update.field == FieldPath::Attunement;
                apply(item, update);
            }
        }

        if attunement_changed {
            let attuned = actor
                .items
                .iter()
                .filter(|i| i.details.attunement == Attunement::Attuned)
                .count();
            actor.attunement.value = u32::try_from(attuned).unwrap_or(u32::MAX);
        }

        tracing::debug!(actor_id = %actor_id, updates = batch.len(), "Applied item updates");
        Ok(())
    }

    async fn update_actor(
        &self,
        actor_id: ActorId,
        batch: Vec<ActorUpdate>,
    ) -> Result<(), RepoError> {
        let mut actor = self
            .actors
            .get_mut(&actor_id)
            .ok_or_else(|| RepoError::not_found("Actor", actor_id.to_string()))?;

        let mut writes = Vec::with_capacity(batch.len());
        for update in &batch {
            let value = update
                .value
                .as_integer()
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| {
                    RepoError::serialization(format!(
                        "{:?} expects a non-negative integer, got {:?}",
                        update.field, update.value
                    ))
                })?;
            let ActorFieldPath::SpellSlot { slot, .. } = update.field;
            if actor.spell_slots.get(slot).is_none() {
                return Err(RepoError::not_found("SpellSlot", slot.to_string()));
            }
            writes.push((update.field, value));
        }

        for (ActorFieldPath::SpellSlot { slot, field }, value) in writes {
            if let Some(counter) = actor.spell_slots.get_mut(slot) {
                match field {
                    SlotField::Value => counter.value = value,
                    SlotField::Override => counter.max_override = Some(value),
                }
            }
        }

        tracing::debug!(actor_id = %actor_id, updates = batch.len(), "Applied actor updates");
        Ok(())
    }
}

fn validate(item: &SheetItem, update: &ItemUpdate) -> Result<(), RepoError> {
    let mismatch = |expected: &str| {
        RepoError::serialization(format!(
            "{:?} on item {} expects {}, got {:?}",
            update.field, item.id, expected, update.value
        ))
    };

    match update.field {
        FieldPath::Favorite | FieldPath::Equipped => {
            update.value.as_bool().ok_or_else(|| mismatch("a boolean"))?;
        }
        FieldPath::Prepared => {
            update.value.as_bool().ok_or_else(|| mismatch("a boolean"))?;
            if !item.is_spell() {
                return Err(RepoError::storage(
                    "update_items",
                    format!("Item {} is not a spell", item.id),
                ));
            }
        }
        FieldPath::Sort => {
            update.value.as_integer().ok_or_else(|| mismatch("an integer"))?;
        }
        FieldPath::Attunement => {
            let code = update.value.as_integer().ok_or_else(|| mismatch("an integer"))?;
            if !(0..=2).contains(&code) {
                return Err(mismatch("an attunement code 0-2"));
            }
        }
        FieldPath::UsesValue | FieldPath::UsesMax => {
            update
                .value
                .as_integer()
                .and_then(|v| u32::try_from(v).ok())
                .ok_or_else(|| mismatch("a non-negative integer"))?;
        }
    }
    Ok(())
}

fn apply(item: &mut SheetItem, update: &ItemUpdate) {
    match (update.field, update.value) {
        (FieldPath::Favorite, FieldValue::Bool(b)) => {
            item.favorite.get_or_insert_with(Default::default).is_favorite = Some(b);
        }
        (FieldPath::Sort, FieldValue::Integer(i)) => {
            item.favorite.get_or_insert_with(Default::default).sort = Some(SortKey::new(i));
        }
        (FieldPath::Prepared, FieldValue::Bool(b)) => {
            item.spell.get_or_insert_with(Default::default).prepared = b;
        }
        (FieldPath::Equipped, FieldValue::Bool(b)) => item.details.equipped = b,
        (FieldPath::Attunement, FieldValue::Integer(code)) => {
            item.details.attunement = Attunement::from_code(code);
        }
        (FieldPath::UsesValue, FieldValue::Integer(v)) => {
            let uses = item.details.uses.get_or_insert_with(Uses::default);
            uses.value = u32::try_from(v).unwrap_or_default();
        }
        (FieldPath::UsesMax, FieldValue::Integer(v)) => {
            let uses = item.details.uses.get_or_insert_with(Uses::default);
            uses.max = u32::try_from(v).unwrap_or_default();
        }
        // Rejected by validate()
        _ => {}
    }
}
