//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific area of the sheet.
//! Use cases orchestrate the favorites core and the item store.

pub mod favorites;

use std::sync::Arc;

use crate::infrastructure::ports::{ConfigurationProvider, ItemStore};

pub use favorites::FavoriteError;

/// Container for favorites use cases.
pub struct FavoritesUseCases {
    pub build_view: Arc<favorites::BuildFavoritesView>,
    pub toggle_favorite: Arc<favorites::ToggleFavorite>,
    pub reorder: Arc<favorites::ReorderFavorite>,
    pub toggle_active: Arc<favorites::ToggleItemActive>,
    pub toggle_attunement: Arc<favorites::ToggleAttunement>,
    pub add_charges: Arc<favorites::AddItemCharges>,
    pub set_uses: Arc<favorites::SetItemUses>,
    pub set_spell_slot: Arc<favorites::SetSpellSlot>,
}

impl FavoritesUseCases {
    pub fn new(store: Arc<dyn ItemStore>, config: Arc<dyn ConfigurationProvider>) -> Self {
        Self {
            build_view: Arc::new(favorites::BuildFavoritesView::new(
                store.clone(),
                config.clone(),
            )),
            toggle_favorite: Arc::new(favorites::ToggleFavorite::new(store.clone())),
            reorder: Arc::new(favorites::ReorderFavorite::new(store.clone(), config)),
            toggle_active: Arc::new(favorites::ToggleItemActive::new(store.clone())),
            toggle_attunement: Arc::new(favorites::ToggleAttunement::new(store.clone())),
            add_charges: Arc::new(favorites::AddItemCharges::new(store.clone())),
            set_uses: Arc::new(favorites::SetItemUses::new(store.clone())),
            set_spell_slot: Arc::new(favorites::SetSpellSlot::new(store)),
        }
    }
}
