//! Sheet item - an embedded item document as the favorites core sees it.
//!
//! The host owns items; the core reads a snapshot and never mutates it.
//! Persisted favorite state lives in an explicit optional struct instead of a
//! free-form flag bag, so "flag absent" is a typed case.

use serde::{Deserialize, Serialize};

use super::spell::SpellDetails;
use crate::ids::ItemId;
use crate::value_objects::SortKey;

/// An item on an actor's sheet.
///
/// # Simple Data Struct
///
/// All fields are public because any combination of values is a valid
/// snapshot of host data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetItem {
    pub id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    /// Persisted favorite flags (None when the host never stored any)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorite: Option<FavoriteInfo>,
    /// Present only for spells
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spell: Option<SpellDetails>,
    #[serde(default)]
    pub details: ItemDetails,
}

impl SheetItem {
    pub fn new(id: ItemId, name: impl Into<String>, kind: ItemKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            favorite: None,
            spell: None,
            details: ItemDetails::default(),
        }
    }

    pub fn with_favorite(mut self, is_favorite: bool) -> Self {
        self.favorite
            .get_or_insert_with(FavoriteInfo::default)
            .is_favorite = Some(is_favorite);
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.favorite.get_or_insert_with(FavoriteInfo::default).sort = Some(sort);
        self
    }

    pub fn with_spell(mut self, spell: SpellDetails) -> Self {
        self.spell = Some(spell);
        self
    }

    pub fn with_details(mut self, details: ItemDetails) -> Self {
        self.details = details;
        self
    }

    /// Effective favorite state; a missing flag reads as `false`.
    pub fn is_favorite(&self) -> bool {
        self.favorite
            .as_ref()
            .map(FavoriteInfo::is_favorite)
            .unwrap_or(false)
    }

    /// Persisted manual sort key, if one was ever stored.
    pub fn sort_key(&self) -> Option<SortKey> {
        self.favorite.as_ref().and_then(|f| f.sort)
    }

    pub fn is_spell(&self) -> bool {
        self.kind == ItemKind::Spell
    }
}

/// Favorite flags stored on an item under the module namespace.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteInfo {
    #[serde(default)]
    pub is_favorite: Option<bool>,
    #[serde(default)]
    pub sort: Option<SortKey>,
}

impl FavoriteInfo {
    pub fn is_favorite(&self) -> bool {
        self.is_favorite.unwrap_or(false)
    }
}

/// Item document type as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Class,
    Feat,
    Spell,
    Weapon,
    Equipment,
    Consumable,
    Tool,
    Loot,
    Backpack,
    /// Any other host item type
    #[serde(other)]
    Other,
}

impl ItemKind {
    /// Class items never get a favorite toggle.
    pub fn is_favoritable(&self) -> bool {
        !matches!(self, Self::Class)
    }
}

impl std::fmt::Display for ItemKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Class => write!(f, "class"),
            Self::Feat => write!(f, "feat"),
            Self::Spell => write!(f, "spell"),
            Self::Weapon => write!(f, "weapon"),
            Self::Equipment => write!(f, "equipment"),
            Self::Consumable => write!(f, "consumable"),
            Self::Tool => write!(f, "tool"),
            Self::Loot => write!(f, "loot"),
            Self::Backpack => write!(f, "backpack"),
            Self::Other => write!(f, "other"),
        }
    }
}

impl std::str::FromStr for ItemKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "class" => Ok(Self::Class),
            "feat" => Ok(Self::Feat),
            "spell" => Ok(Self::Spell),
            "weapon" => Ok(Self::Weapon),
            "equipment" => Ok(Self::Equipment),
            "consumable" => Ok(Self::Consumable),
            "tool" => Ok(Self::Tool),
            "loot" => Ok(Self::Loot),
            "backpack" => Ok(Self::Backpack),
            _ => Ok(Self::Other),
        }
    }
}

/// Mechanical details the favorites view reports about an item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemDetails {
    #[serde(default)]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub equipped: bool,
    #[serde(default)]
    pub attunement: Attunement,
    #[serde(default)]
    pub magical: bool,
    #[serde(default)]
    pub recharge: Option<Recharge>,
    #[serde(default)]
    pub uses: Option<Uses>,
    #[serde(default)]
    pub activation: Option<Activation>,
}

/// Attunement state, stored by the host as 0/1/2.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Attunement {
    #[default]
    None,
    Required,
    Attuned,
}

impl Attunement {
    pub fn from_code(code: i64) -> Self {
        match code {
            1 => Self::Required,
            2 => Self::Attuned,
            _ => Self::None,
        }
    }

    pub fn code(&self) -> i64 {
        match self {
            Self::None => 0,
            Self::Required => 1,
            Self::Attuned => 2,
        }
    }

    /// Whether the item participates in attunement at all.
    pub fn applies(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// Recharge rule (e.g. "recharge 5-6").
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recharge {
    /// Minimum d6 roll to recharge
    pub value: Option<u8>,
    #[serde(default)]
    pub charged: bool,
}

impl Recharge {
    /// A rechargeable ability that has been spent.
    pub fn is_on_cooldown(&self) -> bool {
        self.value.is_some_and(|v| v > 0) && !self.charged
    }
}

/// Limited uses (charges).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Uses {
    pub value: u32,
    pub max: u32,
}

impl Uses {
    pub fn new(value: u32, max: u32) -> Self {
        Self { value, max }
    }
}

/// Activation cost of using an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Activation {
    pub kind: ActivationKind,
    #[serde(default)]
    pub cost: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActivationKind {
    None,
    Action,
    Bonus,
    Reaction,
    Crew,
    Legendary,
    Lair,
    Special,
    Minute,
    Hour,
    Day,
    /// Unknown activation for forward compatibility
    #[serde(other)]
    Other,
}

impl std::str::FromStr for ActivationKind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "none" => Ok(Self::None),
            "action" => Ok(Self::Action),
            "bonus" => Ok(Self::Bonus),
            "reaction" | "reactiondamage" | "reactionmanual" => Ok(Self::Reaction),
            "crew" => Ok(Self::Crew),
            "legendary" => Ok(Self::Legendary),
            "lair" => Ok(Self::Lair),
            "special" => Ok(Self::Special),
            "minute" => Ok(Self::Minute),
            "hour" => Ok(Self::Hour),
            "day" => Ok(Self::Day),
            _ => Ok(Self::Other),
        }
    }
}
