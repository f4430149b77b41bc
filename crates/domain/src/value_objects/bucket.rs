//! Bucket identity for favorited items.
//!
//! Membership is derived from an item's kind and spell preparation on every
//! classification pass; it is never stored.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::entities::{ItemKind, PreparationMode, SheetItem, MAX_SPELL_LEVEL};
use crate::error::DomainError;

/// Dedicated spell buckets that sit outside the per-level grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpellModeBucket {
    AtWill,
    Innate,
    Pact,
}

impl SpellModeBucket {
    pub const ALL: [SpellModeBucket; 3] = [Self::AtWill, Self::Innate, Self::Pact];

    pub fn from_mode(mode: PreparationMode) -> Option<Self> {
        match mode {
            PreparationMode::AtWill => Some(Self::AtWill),
            PreparationMode::Innate => Some(Self::Innate),
            PreparationMode::Pact => Some(Self::Pact),
            PreparationMode::Prepared | PreparationMode::Always | PreparationMode::Unknown => {
                None
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AtWill => "atwill",
            Self::Innate => "innate",
            Self::Pact => "pact",
        }
    }
}

/// Which favorites list an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum BucketId {
    /// Everything that is neither a feat nor a spell
    Items,
    Feats,
    /// Prepared and always-prepared spells, keyed by level (0 = cantrips)
    SpellLevel(u8),
    SpellMode(SpellModeBucket),
}

impl BucketId {
    /// Route an item to its bucket. Class items have none.
    ///
    /// Spells without spell data land with the cantrips; unknown preparation
    /// modes are grouped like prepared spells. A hand-built level above 9
    /// goes to the level 9 bucket so every favorite has a home.
    pub fn for_item(item: &SheetItem) -> Option<Self> {
        match item.kind {
            ItemKind::Class => None,
            ItemKind::Feat => Some(Self::Feats),
            ItemKind::Spell => {
                let Some(spell) = item.spell.as_ref() else {
                    return Some(Self::SpellLevel(0));
                };
                match SpellModeBucket::from_mode(spell.effective_mode()) {
                    Some(mode) => Some(Self::SpellMode(mode)),
                    None => Some(Self::SpellLevel(spell.level.as_number().min(MAX_SPELL_LEVEL))),
                }
            }
            _ => Some(Self::Items),
        }
    }

    pub fn is_spell_bucket(&self) -> bool {
        matches!(self, Self::SpellLevel(_) | Self::SpellMode(_))
    }
}

impl fmt::Display for BucketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Items => write!(f, "items"),
            Self::Feats => write!(f, "feats"),
            Self::SpellLevel(level) => write!(f, "spell-level-{}", level),
            Self::SpellMode(mode) => write!(f, "spell-mode-{}", mode.as_str()),
        }
    }
}

impl FromStr for BucketId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "items" => return Ok(Self::Items),
            "feats" => return Ok(Self::Feats),
            _ => {}
        }
        if let Some(level) = s.strip_prefix("spell-level-") {
            let level: u8 = level
                .parse()
                .map_err(|_| DomainError::parse(format!("Invalid spell level bucket: {}", s)))?;
            if level > MAX_SPELL_LEVEL {
                return Err(DomainError::parse(format!("Spell level out of range: {}", s)));
            }
            return Ok(Self::SpellLevel(level));
        }
        if let Some(mode) = s.strip_prefix("spell-mode-") {
            return SpellModeBucket::ALL
                .into_iter()
                .find(|m| m.as_str() == mode)
                .map(Self::SpellMode)
                .ok_or_else(|| DomainError::parse(format!("Unknown spell mode bucket: {}", s)));
        }
        Err(DomainError::parse(format!("Unknown bucket: {}", s)))
    }
}

impl From<BucketId> for String {
    fn from(value: BucketId) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for BucketId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
