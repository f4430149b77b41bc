//! Sheet requests - the command interface the UI layer invokes.
//!
//! Ids are raw strings here and validated when the engine converts them.

use serde::{Deserialize, Serialize};
use sheetmark_domain::SlotField;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SheetRequest {
    /// Build the favorites view for a render pass
    GetFavorites { actor_id: String },
    /// Flip an item's favorite flag
    ToggleFavorite { actor_id: String, item_id: String },
    /// Move a favorite relative to another one in the same list
    ReorderFavorite {
        actor_id: String,
        /// Raw drag data from the drop event
        drop_data: String,
        target_item_id: String,
    },
    /// Flip prepared (spells) or equipped (everything else)
    ToggleItemActive { actor_id: String, item_id: String },
    ToggleAttunement { actor_id: String, item_id: String },
    /// Give an item a single charge
    AddItemCharges { actor_id: String, item_id: String },
    /// Charge inputs on a favorite; 0/0 clears the counter
    SetItemUses {
        actor_id: String,
        item_id: String,
        value: u32,
        max: u32,
    },
    /// Spell slot inputs; `slot` is the host key (`spell1`..`spell9`, `pact`)
    SetSpellSlot {
        actor_id: String,
        slot: String,
        #[serde(default)]
        field: SlotField,
        value: u32,
    },
}

impl SheetRequest {
    /// Actor whose sheet the request targets.
    pub fn actor_id(&self) -> &str {
        match self {
            Self::GetFavorites { actor_id }
            | Self::ToggleFavorite { actor_id, .. }
            | Self::ReorderFavorite { actor_id, .. }
            | Self::ToggleItemActive { actor_id, .. }
            | Self::ToggleAttunement { actor_id, .. }
            | Self::AddItemCharges { actor_id, .. }
            | Self::SetItemUses { actor_id, .. }
            | Self::SetSpellSlot { actor_id, .. } => actor_id,
        }
    }
}
