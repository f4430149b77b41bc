//! Favorites use cases.
//!
//! Commands the sheet issues against the favorites panel: building the view,
//! toggling favorites, reordering, the per-item quick actions, and the
//! charge and spell slot inputs.

mod add_charges;
mod build_view;
mod error;
mod reorder;
mod set_item_uses;
mod set_spell_slot;
mod toggle_active;
mod toggle_attunement;
mod toggle_favorite;

use sheetmark_domain::{ActorId, ActorSnapshot, ItemId, SheetItem};

use crate::infrastructure::ports::ItemStore;

pub use add_charges::AddItemCharges;
pub use build_view::BuildFavoritesView;
pub use error::FavoriteError;
pub use reorder::ReorderFavorite;
pub use set_item_uses::SetItemUses;
pub use set_spell_slot::SetSpellSlot;
pub use toggle_active::{ActiveState, ToggleItemActive};
pub use toggle_attunement::ToggleAttunement;
pub use toggle_favorite::ToggleFavorite;

/// Load an actor snapshot or fail with `ActorNotFound`.
async fn load_actor(
    store: &dyn ItemStore,
    actor_id: &ActorId,
) -> Result<ActorSnapshot, FavoriteError> {
    store
        .get_actor(actor_id.clone())
        .await?
        .ok_or_else(|| FavoriteError::ActorNotFound(actor_id.clone()))
}

/// Look up an item on an editable sheet.
fn editable_item<'a>(
    actor: &'a ActorSnapshot,
    item_id: &ItemId,
) -> Result<&'a SheetItem, FavoriteError> {
    if !actor.editable {
        return Err(FavoriteError::ReadOnly);
    }
    actor
        .item(item_id)
        .ok_or_else(|| FavoriteError::ItemNotFound(item_id.clone()))
}
