extern crate self as sheetmark_domain;

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

// Re-export all entities (explicit list in entities/mod.rs)
pub use entities::{
    Activation, ActivationKind, ActorSnapshot, Attunement, AttunementCounter, FavoriteInfo,
    ItemDetails, ItemKind, PreparationMode, Recharge, SheetItem, SlotCounter, SlotField,
    SpellComponentFlags, SpellDetails, SpellLevel, SpellSlotId, SpellSlots, Uses, MAX_SPELL_LEVEL,
};

pub use error::DomainError;

// Re-export ID types
pub use ids::{ActorId, ItemId};

// Re-export value objects (explicit list in value_objects/mod.rs)
pub use value_objects::{
    BucketId, ReorderIntent, SortKey, SortUpdate, SpellModeBucket, SORT_INTEGER_DENSITY,
};
