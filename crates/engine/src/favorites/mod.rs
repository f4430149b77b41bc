//! Favorites core: bucket classification, sort coordination and the view
//! model. Everything here is synchronous and free of I/O.

pub mod classifier;
pub mod sort;
pub mod view;

pub use classifier::{Bucket, ClassifiedFavorites, FavoriteClassifier, FavoriteEntry, FavoriteToggle};
pub use sort::{NoOpReason, ReorderOutcome, SortCoordinator};
pub use view::{
    FavoriteEntryView, FavoriteToggleView, FavoritesView, SpellLevelGroup, SpellModeGroup,
    ToggleTitle,
};
