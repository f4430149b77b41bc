//! Favorites operation errors.

use crate::infrastructure::ports::RepoError;
use sheetmark_domain::{ActorId, DomainError, ItemId};

/// Errors that can occur during favorites operations.
#[derive(Debug, thiserror::Error)]
pub enum FavoriteError {
    #[error("Actor not found: {0}")]
    ActorNotFound(ActorId),
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),
    #[error("Item {0} cannot be favorited")]
    NotFavoritable(ItemId),
    #[error("Spell {0} is always prepared")]
    AlwaysPrepared(ItemId),
    #[error("Attunement limit reached ({count}/{max})")]
    AttunementLimit { count: u32, max: u32 },
    #[error("Sheet is read-only")]
    ReadOnly,
    #[error("Validation error: {0}")]
    Domain(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
