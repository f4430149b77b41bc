//! Drag-and-drop payload decoding.
//!
//! When an item row is dragged, the host stores the item's data plus the id
//! of the actor it came from as JSON on the drag event. A drop onto another
//! favorites row becomes a [`ReorderIntent`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use sheetmark_domain::{
    ActorId, BucketId, ItemId, ItemKind, PreparationMode, ReorderIntent, SheetItem, SpellDetails,
    SpellLevel,
};

use crate::error::SharedError;

/// Drag data for an item row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DropPayload {
    #[serde(rename = "actorId", default)]
    pub actor_id: Option<String>,
    #[serde(rename = "_id", default)]
    pub item_id: Option<String>,
    /// Host item type of the dragged item
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub system: Option<Value>,
}

impl DropPayload {
    /// Parse the raw `text/plain` drag data.
    pub fn parse(raw: &str) -> Result<Self, SharedError> {
        serde_json::from_str(raw).map_err(|e| SharedError::MalformedPayload(e.to_string()))
    }

    /// Build a reorder intent for a drop onto `target_item_id`.
    ///
    /// The bucket hint is derived from the dragged item's type and spell
    /// data, the same way the classifier routes it.
    pub fn into_intent(self, target_item_id: &str) -> Result<ReorderIntent, SharedError> {
        let actor_id = self
            .actor_id
            .as_deref()
            .ok_or_else(|| SharedError::MalformedPayload("missing actorId".into()))?;
        let item_id = self
            .item_id
            .as_deref()
            .ok_or_else(|| SharedError::MalformedPayload("missing _id".into()))?;

        let actor_id = ActorId::new(actor_id)?;
        let dragged_item_id = ItemId::new(item_id)?;
        let target_item_id = ItemId::new(target_item_id)?;

        let mut intent = ReorderIntent::new(actor_id, dragged_item_id.clone(), target_item_id);
        if let Some(bucket) = self.bucket_hint(dragged_item_id) {
            intent = intent.in_bucket(bucket);
        }
        Ok(intent)
    }

    fn bucket_hint(&self, item_id: ItemId) -> Option<BucketId> {
        let kind = self.kind.as_deref()?.parse::<ItemKind>().ok()?;
        let mut item = SheetItem::new(item_id, "", kind);
        if kind == ItemKind::Spell {
            let system = self.system.as_ref();
            let level = system
                .and_then(|s| s.get("level"))
                .and_then(Value::as_u64)
                .and_then(|l| u8::try_from(l).ok())
                .and_then(|l| SpellLevel::new(l).ok())
                .unwrap_or_default();
            let mode = system
                .and_then(|s| s.pointer("/preparation/mode"))
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty())
                .map(|m| m.parse::<PreparationMode>().unwrap_or(PreparationMode::Unknown));
            let mut spell = SpellDetails::new(level);
            spell.mode = mode;
            item = item.with_spell(spell);
        }
        BucketId::for_item(&item)
    }
}
