//! Domain entities as seen from the favorites core.

mod actor;
mod item;
mod spell;

pub use actor::{ActorSnapshot, AttunementCounter, SlotCounter, SlotField, SpellSlotId, SpellSlots};
pub use item::{
    Activation, ActivationKind, Attunement, FavoriteInfo, ItemDetails, ItemKind, Recharge,
    SheetItem, Uses,
};
pub use spell::{PreparationMode, SpellComponentFlags, SpellDetails, SpellLevel, MAX_SPELL_LEVEL};
