//! Field updates sent through the item store.
//!
//! The core only ever writes a handful of item fields. Each is named by a
//! [`FieldPath`] so adapters can map it onto the host's dotted paths, with the
//! favorite flags living under the configured module namespace. Actor-level
//! writes (spell slot counters) are named by [`ActorFieldPath`].

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sheetmark_domain::{Attunement, ItemId, SlotField, SortKey, SortUpdate, SpellSlotId};

/// An item field the core may write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldPath {
    Favorite,
    Sort,
    Prepared,
    Equipped,
    Attunement,
    UsesValue,
    UsesMax,
}

impl FieldPath {
    /// Host document path for this field.
    pub fn host_path(&self, namespace: &str) -> String {
        match self {
            Self::Favorite => format!("flags.{}.isFavorite", namespace),
            Self::Sort => format!("flags.{}.sort", namespace),
            Self::Prepared => "system.preparation.prepared".to_string(),
            Self::Equipped => "system.equipped".to_string(),
            Self::Attunement => "system.attunement".to_string(),
            Self::UsesValue => "system.uses.value".to_string(),
            Self::UsesMax => "system.uses.max".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Integer(i64),
}

impl FieldValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Integer(_) => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            Self::Bool(_) => None,
        }
    }
}

/// One field write on one item. Batches of these are applied atomically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemUpdate {
    pub item_id: ItemId,
    pub field: FieldPath,
    pub value: FieldValue,
}

impl ItemUpdate {
    pub fn favorite(item_id: ItemId, is_favorite: bool) -> Self {
        Self {
            item_id,
            field: FieldPath::Favorite,
            value: FieldValue::Bool(is_favorite),
        }
    }

    pub fn sort(item_id: ItemId, sort: SortKey) -> Self {
        Self {
            item_id,
            field: FieldPath::Sort,
            value: FieldValue::Integer(sort.value()),
        }
    }

    pub fn prepared(item_id: ItemId, prepared: bool) -> Self {
        Self {
            item_id,
            field: FieldPath::Prepared,
            value: FieldValue::Bool(prepared),
        }
    }

    pub fn equipped(item_id: ItemId, equipped: bool) -> Self {
        Self {
            item_id,
            field: FieldPath::Equipped,
            value: FieldValue::Bool(equipped),
        }
    }

    pub fn attunement(item_id: ItemId, attunement: Attunement) -> Self {
        Self {
            item_id,
            field: FieldPath::Attunement,
            value: FieldValue::Integer(attunement.code()),
        }
    }

    pub fn uses_value(item_id: ItemId, value: u32) -> Self {
        Self {
            item_id,
            field: FieldPath::UsesValue,
            value: FieldValue::Integer(i64::from(value)),
        }
    }

    pub fn uses_max(item_id: ItemId, max: u32) -> Self {
        Self {
            item_id,
            field: FieldPath::UsesMax,
            value: FieldValue::Integer(i64::from(max)),
        }
    }

    /// `(path, value)` pair in the host's update format.
    pub fn to_host_patch(&self, namespace: &str) -> (String, Value) {
        let value = match self.value {
            FieldValue::Bool(b) => Value::Bool(b),
            FieldValue::Integer(i) => Value::from(i),
        };
        (self.field.host_path(namespace), value)
    }
}

impl From<SortUpdate> for ItemUpdate {
    fn from(update: SortUpdate) -> Self {
        Self::sort(update.item_id, update.sort)
    }
}

/// Group a batch into one host update document per item:
/// `[{ "_id": ..., "<path>": <value>, ... }, ...]` in first-seen order.
pub fn host_update_documents(batch: &[ItemUpdate], namespace: &str) -> Vec<Value> {
    let mut documents: Vec<(ItemId, serde_json::Map<String, Value>)> = Vec::new();
    for update in batch {
        let (path, value) = update.to_host_patch(namespace);
        let position = documents.iter().position(|(id, _)| id == &update.item_id);
        let fields = match position {
            Some(index) => &mut documents[index].1,
            None => {
                let mut fields = serde_json::Map::new();
                fields.insert("_id".to_string(), Value::from(update.item_id.as_str()));
                documents.push((update.item_id.clone(), fields));
                let last = documents.len() - 1;
                &mut documents[last].1
            }
        };
        fields.insert(path, value);
    }
    documents
        .into_iter()
        .map(|(_, fields)| Value::Object(fields))
        .collect()
}

/// An actor field the core may write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorFieldPath {
    SpellSlot { slot: SpellSlotId, field: SlotField },
}

impl ActorFieldPath {
    pub fn host_path(&self) -> String {
        match self {
            Self::SpellSlot { slot, field } => {
                let leaf = match field {
                    SlotField::Value => "value",
                    SlotField::Override => "override",
                };
                format!("system.spells.{}.{}", slot, leaf)
            }
        }
    }
}

/// One field write on the actor itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorUpdate {
    pub field: ActorFieldPath,
    pub value: FieldValue,
}

impl ActorUpdate {
    pub fn spell_slot(slot: SpellSlotId, field: SlotField, value: u32) -> Self {
        Self {
            field: ActorFieldPath::SpellSlot { slot, field },
            value: FieldValue::Integer(i64::from(value)),
        }
    }

    /// Host update document for a batch of actor writes.
    pub fn host_document(batch: &[ActorUpdate]) -> Value {
        let fields = batch
            .iter()
            .map(|update| {
                let value = match update.value {
                    FieldValue::Bool(b) => Value::Bool(b),
                    FieldValue::Integer(i) => Value::from(i),
                };
                (update.field.host_path(), value)
            })
            .collect();
        Value::Object(fields)
    }
}
