//! Actor snapshot - the sheet owner and the resources the favorites view shows.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::item::SheetItem;
use super::spell::MAX_SPELL_LEVEL;
use crate::error::DomainError;
use crate::ids::{ActorId, ItemId};

/// One render-time snapshot of an actor's sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActorSnapshot {
    pub id: ActorId,
    pub name: String,
    /// Whether the viewing user may modify this sheet
    #[serde(default)]
    pub editable: bool,
    #[serde(default)]
    pub items: Vec<SheetItem>,
    #[serde(default)]
    pub spell_slots: SpellSlots,
    #[serde(default)]
    pub attunement: AttunementCounter,
}

impl ActorSnapshot {
    pub fn new(id: ActorId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            editable: true,
            items: Vec::new(),
            spell_slots: SpellSlots::default(),
            attunement: AttunementCounter::default(),
        }
    }

    pub fn with_items(mut self, items: Vec<SheetItem>) -> Self {
        self.items = items;
        self
    }

    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn with_spell_slots(mut self, spell_slots: SpellSlots) -> Self {
        self.spell_slots = spell_slots;
        self
    }

    pub fn with_attunement(mut self, attunement: AttunementCounter) -> Self {
        self.attunement = attunement;
        self
    }

    pub fn item(&self, item_id: &ItemId) -> Option<&SheetItem> {
        self.items.iter().find(|i| &i.id == item_id)
    }

    pub fn item_mut(&mut self, item_id: &ItemId) -> Option<&mut SheetItem> {
        self.items.iter_mut().find(|i| &i.id == item_id)
    }
}

/// Remaining/maximum counter (spell slots).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotCounter {
    pub value: u32,
    pub max: u32,
    /// Manual maximum set on the sheet, replacing the derived one
    #[serde(default, rename = "override", skip_serializing_if = "Option::is_none")]
    pub max_override: Option<u32>,
}

impl SlotCounter {
    pub fn new(value: u32, max: u32) -> Self {
        Self {
            value,
            max,
            max_override: None,
        }
    }

    pub fn with_override(mut self, max_override: u32) -> Self {
        self.max_override = Some(max_override);
        self
    }

    pub fn effective_max(&self) -> u32 {
        self.max_override.unwrap_or(self.max)
    }
}

/// One spell slot pool on the sheet: a spell level 1-9 or pact magic.
///
/// The string form is the host's key under `system.spells` (`spell3`, `pact`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum SpellSlotId {
    Level(u8),
    Pact,
}

impl SpellSlotId {
    /// Slot pool for a spell level; cantrips have none.
    pub fn level(level: u8) -> Result<Self, DomainError> {
        if level == 0 || level > MAX_SPELL_LEVEL {
            return Err(DomainError::validation(format!(
                "Spell slot level must be 1-{}, got {}",
                MAX_SPELL_LEVEL, level
            )));
        }
        Ok(Self::Level(level))
    }
}

impl fmt::Display for SpellSlotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Level(level) => write!(f, "spell{}", level),
            Self::Pact => write!(f, "pact"),
        }
    }
}

impl FromStr for SpellSlotId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "pact" {
            return Ok(Self::Pact);
        }
        let level = s
            .strip_prefix("spell")
            .and_then(|l| l.parse::<u8>().ok())
            .ok_or_else(|| DomainError::parse(format!("Unknown spell slot: {}", s)))?;
        Self::level(level)
    }
}

impl From<SpellSlotId> for String {
    fn from(id: SpellSlotId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for SpellSlotId {
    type Error = DomainError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Which number of a slot pool a sheet edit targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlotField {
    /// Remaining slots
    #[default]
    Value,
    /// Manual maximum
    Override,
}

/// Spell slots for levels 1-9 plus pact magic slots.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellSlots {
    /// Index 0 holds level 1
    #[serde(default)]
    levels: [SlotCounter; MAX_SPELL_LEVEL as usize],
    #[serde(default)]
    pub pact: SlotCounter,
}

impl SpellSlots {
    /// Slots for a spell level; cantrips and out-of-range levels have none.
    pub fn level(&self, level: u8) -> Option<SlotCounter> {
        if level == 0 {
            return None;
        }
        self.levels.get(usize::from(level) - 1).copied()
    }

    /// Set the counter for a level 1-9. Other levels are ignored.
    pub fn set_level(&mut self, level: u8, counter: SlotCounter) {
        if level == 0 {
            return;
        }
        if let Some(slot) = self.levels.get_mut(usize::from(level) - 1) {
            *slot = counter;
        }
    }

    pub fn with_level(mut self, level: u8, counter: SlotCounter) -> Self {
        self.set_level(level, counter);
        self
    }

    pub fn with_pact(mut self, pact: SlotCounter) -> Self {
        self.pact = pact;
        self
    }

    pub fn get(&self, slot: SpellSlotId) -> Option<SlotCounter> {
        match slot {
            SpellSlotId::Level(level) => self.level(level),
            SpellSlotId::Pact => Some(self.pact),
        }
    }

    pub fn get_mut(&mut self, slot: SpellSlotId) -> Option<&mut SlotCounter> {
        match slot {
            SpellSlotId::Level(0) => None,
            SpellSlotId::Level(level) => self.levels.get_mut(usize::from(level) - 1),
            SpellSlotId::Pact => Some(&mut self.pact),
        }
    }
}

/// Attuned items count against the actor's attunement maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttunementCounter {
    pub value: u32,
    pub max: u32,
}

impl Default for AttunementCounter {
    fn default() -> Self {
        Self { value: 0, max: 3 }
    }
}

impl AttunementCounter {
    pub fn is_full(&self) -> bool {
        self.value >= self.max
    }
}
