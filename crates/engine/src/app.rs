//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::ports::{ConfigurationProvider, ItemStore};
use crate::use_cases::FavoritesUseCases;

/// Main application state.
///
/// Holds the injected ports and the use cases built on them.
/// Passed to the command handler.
pub struct App {
    pub store: Arc<dyn ItemStore>,
    pub config: Arc<dyn ConfigurationProvider>,
    pub favorites: FavoritesUseCases,
}

impl App {
    pub fn new(store: Arc<dyn ItemStore>, config: Arc<dyn ConfigurationProvider>) -> Self {
        let favorites = FavoritesUseCases::new(store.clone(), config.clone());
        Self {
            store,
            config,
            favorites,
        }
    }
}
