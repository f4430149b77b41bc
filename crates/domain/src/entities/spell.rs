//! Spell details carried by spell items on a sheet.
//!
//! Only the parts the favorites view needs are modelled: level, how the
//! spell is made available (preparation mode), whether it is currently
//! prepared, and its component flags.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Highest spell level a sheet tracks slots for.
pub const MAX_SPELL_LEVEL: u8 = 9;

/// Spell-specific data on a sheet item.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellDetails {
    /// Spell level; absent levels are cantrips
    #[serde(default)]
    pub level: SpellLevel,
    /// How the spell is made available; absent means prepared
    #[serde(default)]
    pub mode: Option<PreparationMode>,
    /// Whether the spell is currently prepared
    #[serde(default)]
    pub prepared: bool,
    #[serde(default)]
    pub components: SpellComponentFlags,
}

impl SpellDetails {
    pub fn new(level: SpellLevel) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: PreparationMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_prepared(mut self, prepared: bool) -> Self {
        self.prepared = prepared;
        self
    }

    pub fn with_components(mut self, components: SpellComponentFlags) -> Self {
        self.components = components;
        self
    }

    /// Effective preparation mode (absent counts as prepared).
    pub fn effective_mode(&self) -> PreparationMode {
        self.mode.unwrap_or(PreparationMode::Prepared)
    }

    pub fn is_always_prepared(&self) -> bool {
        self.effective_mode() == PreparationMode::Always
    }
}

/// Spell level representation.
///
/// Deserialization goes through the same 0-9 check as [`SpellLevel::new`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawSpellLevel")]
pub enum SpellLevel {
    /// Cantrip (level 0 spell)
    #[default]
    Cantrip,
    /// Leveled spell (1-9)
    Level(u8),
}

impl SpellLevel {
    /// Build a level from the host's number, rejecting anything above 9.
    pub fn new(level: u8) -> Result<Self, DomainError> {
        if level > MAX_SPELL_LEVEL {
            return Err(DomainError::validation(format!(
                "Spell level must be 0-{}, got {}",
                MAX_SPELL_LEVEL, level
            )));
        }
        Ok(if level == 0 {
            SpellLevel::Cantrip
        } else {
            SpellLevel::Level(level)
        })
    }

    /// Convert to numeric level (cantrip = 0).
    pub fn as_number(&self) -> u8 {
        match self {
            SpellLevel::Cantrip => 0,
            SpellLevel::Level(n) => *n,
        }
    }

    /// Check if this is a cantrip.
    pub fn is_cantrip(&self) -> bool {
        matches!(self, SpellLevel::Cantrip) || self.as_number() == 0
    }
}

impl TryFrom<u8> for SpellLevel {
    type Error = DomainError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level)
    }
}

/// Wire shape of [`SpellLevel`] before the range check.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
enum RawSpellLevel {
    Cantrip,
    Level(u8),
}

impl TryFrom<RawSpellLevel> for SpellLevel {
    type Error = DomainError;

    fn try_from(raw: RawSpellLevel) -> Result<Self, Self::Error> {
        match raw {
            RawSpellLevel::Cantrip => Ok(Self::Cantrip),
            RawSpellLevel::Level(level) => Self::new(level),
        }
    }
}

/// How a spell is made available to its caster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreparationMode {
    Prepared,
    Always,
    AtWill,
    Innate,
    Pact,
    /// Unknown mode for forward compatibility
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for PreparationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Prepared => write!(f, "prepared"),
            Self::Always => write!(f, "always"),
            Self::AtWill => write!(f, "atwill"),
            Self::Innate => write!(f, "innate"),
            Self::Pact => write!(f, "pact"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::str::FromStr for PreparationMode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "prepared" => Ok(Self::Prepared),
            "always" => Ok(Self::Always),
            "atwill" => Ok(Self::AtWill),
            "innate" => Ok(Self::Innate),
            "pact" => Ok(Self::Pact),
            _ => Ok(Self::Unknown),
        }
    }
}

/// Spell component flags (what's required to cast).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellComponentFlags {
    #[serde(default)]
    pub vocal: bool,
    #[serde(default)]
    pub somatic: bool,
    #[serde(default)]
    pub material: bool,
    #[serde(default)]
    pub concentration: bool,
    #[serde(default)]
    pub ritual: bool,
}

impl SpellComponentFlags {
    /// Short component label, e.g. "VS" or "VSM".
    pub fn label(&self) -> String {
        let mut label = String::with_capacity(3);
        if self.vocal {
            label.push('V');
        }
        if self.somatic {
            label.push('S');
        }
        if self.material {
            label.push('M');
        }
        label
    }
}
