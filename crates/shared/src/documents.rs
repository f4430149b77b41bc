//! Host document shapes.
//!
//! The host hands the sheet its actor as JSON with embedded item documents.
//! Favorite state sits in a per-module flag bag (`flags.<namespace>`), and
//! several numeric fields arrive as numbers, numeric strings or empty strings
//! depending on how they were edited. These types absorb that looseness and
//! convert into the strict domain snapshot.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use sheetmark_domain::{
    Activation, ActivationKind, ActorId, ActorSnapshot, Attunement, AttunementCounter,
    FavoriteInfo, ItemDetails, ItemId, ItemKind, PreparationMode, Recharge, SheetItem,
    SlotCounter, SortKey, SpellComponentFlags, SpellDetails, SpellLevel, SpellSlots, Uses,
};

use crate::error::SharedError;

// =============================================================================
// Item documents
// =============================================================================

/// An embedded item document as the host serializes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostItemDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub flags: serde_json::Map<String, Value>,
    #[serde(default)]
    pub system: HostItemSystem,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostItemSystem {
    #[serde(default, deserialize_with = "lenient_u8")]
    pub level: Option<u8>,
    #[serde(default)]
    pub preparation: Option<HostPreparation>,
    #[serde(default)]
    pub components: Option<HostComponents>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub quantity: Option<u32>,
    #[serde(default)]
    pub equipped: Option<bool>,
    /// 0/1/2 in older data, sometimes a string
    #[serde(default)]
    pub attunement: Option<Value>,
    /// Either a `{ "mgc": true }` map or a list of property keys
    #[serde(default)]
    pub properties: Option<Value>,
    #[serde(default)]
    pub recharge: Option<HostRecharge>,
    #[serde(default)]
    pub uses: Option<HostUses>,
    #[serde(default)]
    pub activation: Option<HostActivation>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostPreparation {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub prepared: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostComponents {
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

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostRecharge {
    #[serde(default, deserialize_with = "lenient_u8")]
    pub value: Option<u8>,
    #[serde(default)]
    pub charged: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostUses {
    #[serde(default, deserialize_with = "lenient_u32")]
    pub value: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub max: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostActivation {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub cost: Option<u32>,
}

/// Favorite flags as stored under `flags.<namespace>`.
#[derive(Debug, Clone, Default, Deserialize)]
struct FavoriteFlags {
    #[serde(rename = "isFavorite", default)]
    is_favorite: Option<bool>,
    #[serde(default, deserialize_with = "lenient_i64")]
    sort: Option<i64>,
}

impl HostItemDocument {
    /// Convert into a domain item, reading favorite flags from `namespace`.
    ///
    /// Missing flags stay missing; nothing is defaulted into the document.
    pub fn into_sheet_item(self, namespace: &str) -> Result<SheetItem, SharedError> {
        let id = ItemId::new(self.id)?;
        let kind = self.kind.parse::<ItemKind>().unwrap_or(ItemKind::Other);
        let favorite = favorite_flags(&self.flags, namespace, &id);
        let magical = is_magical(&self.flags, self.system.properties.as_ref());
        let system = self.system;

        let spell = if kind == ItemKind::Spell {
            let level = SpellLevel::new(system.level.unwrap_or(0))?;
            let preparation = system.preparation.unwrap_or_default();
            let mode = preparation
                .mode
                .filter(|m| !m.is_empty())
                .map(|m| m.parse::<PreparationMode>().unwrap_or(PreparationMode::Unknown));
            let components = system
                .components
                .map(|c| SpellComponentFlags {
                    vocal: c.vocal,
                    somatic: c.somatic,
                    material: c.material,
                    concentration: c.concentration,
                    ritual: c.ritual,
                })
                .unwrap_or_default();
            Some(SpellDetails {
                level,
                mode,
                prepared: preparation.prepared.unwrap_or(false),
                components,
            })
        } else {
            None
        };

        let details = ItemDetails {
            quantity: system.quantity,
            equipped: system.equipped.unwrap_or(false),
            attunement: system
                .attunement
                .as_ref()
                .map(attunement_from_value)
                .unwrap_or_default(),
            magical,
            recharge: system.recharge.map(|r| Recharge {
                value: r.value,
                charged: r.charged.unwrap_or(false),
            }),
            uses: system.uses.and_then(|u| match (u.value, u.max) {
                (None, None) => None,
                (value, max) => Some(Uses::new(value.unwrap_or(0), max.unwrap_or(0))),
            }),
            activation: system.activation.and_then(|a| {
                let kind = a.kind.filter(|k| !k.is_empty())?;
                Some(Activation {
                    kind: kind.parse::<ActivationKind>().unwrap_or(ActivationKind::Other),
                    cost: a.cost,
                })
            }),
        };

        Ok(SheetItem {
            id,
            name: self.name,
            kind,
            favorite,
            spell,
            details,
        })
    }
}

fn favorite_flags(
    flags: &serde_json::Map<String, Value>,
    namespace: &str,
    item_id: &ItemId,
) -> Option<FavoriteInfo> {
    let raw = flags.get(namespace)?;
    match serde_json::from_value::<FavoriteFlags>(raw.clone()) {
        Ok(parsed) => Some(FavoriteInfo {
            is_favorite: parsed.is_favorite,
            sort: parsed.sort.map(SortKey::new),
        }),
        Err(e) => {
            tracing::warn!(item_id = %item_id, error = %e, "Ignoring unreadable favorite flags");
            None
        }
    }
}

fn is_magical(flags: &serde_json::Map<String, Value>, properties: Option<&Value>) -> bool {
    let magic_items = flags
        .get("magicitems")
        .and_then(|m| m.get("enabled"))
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let property = match properties {
        Some(Value::Object(map)) => map.get("mgc").and_then(Value::as_bool).unwrap_or(false),
        Some(Value::Array(list)) => list.iter().any(|p| p.as_str() == Some("mgc")),
        _ => false,
    };
    magic_items || property
}

fn attunement_from_value(value: &Value) -> Attunement {
    match value {
        Value::Number(n) => n.as_i64().map(Attunement::from_code).unwrap_or_default(),
        Value::String(s) => match s.trim() {
            "required" | "optional" => Attunement::Required,
            "attuned" => Attunement::Attuned,
            other => other
                .parse::<i64>()
                .map(Attunement::from_code)
                .unwrap_or_default(),
        },
        _ => Attunement::None,
    }
}

// =============================================================================
// Actor documents
// =============================================================================

/// An actor document with its embedded items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostActorDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub items: Vec<HostItemDocument>,
    #[serde(default)]
    pub system: HostActorSystem,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostActorSystem {
    /// `spell1`..`spell9` and `pact`
    #[serde(default)]
    pub spells: BTreeMap<String, HostCounter>,
    #[serde(default)]
    pub attributes: HostAttributes,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostAttributes {
    #[serde(default)]
    pub attunement: Option<HostCounter>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostCounter {
    #[serde(default, deserialize_with = "lenient_u32")]
    pub value: Option<u32>,
    #[serde(default, deserialize_with = "lenient_u32")]
    pub max: Option<u32>,
    /// Spell slot maximum override
    #[serde(
        default,
        rename = "override",
        deserialize_with = "lenient_u32",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_override: Option<u32>,
}

impl HostCounter {
    fn to_slots(&self) -> SlotCounter {
        SlotCounter {
            value: self.value.unwrap_or(0),
            max: self.max.unwrap_or(0),
            max_override: self.max_override,
        }
    }
}

impl HostActorDocument {
    /// Convert into a render snapshot. `editable` is decided by the host
    /// (ownership and sheet lock), not by the document.
    pub fn into_snapshot(
        self,
        editable: bool,
        namespace: &str,
    ) -> Result<ActorSnapshot, SharedError> {
        let id = ActorId::new(self.id)?;

        let mut spell_slots = SpellSlots::default();
        for (key, counter) in &self.system.spells {
            if key == "pact" {
                spell_slots.pact = counter.to_slots();
            } else if let Some(level) = key.strip_prefix("spell").and_then(|l| l.parse().ok()) {
                spell_slots.set_level(level, counter.to_slots());
            }
        }

        let mut attunement = AttunementCounter::default();
        if let Some(counter) = &self.system.attributes.attunement {
            attunement.value = counter.value.unwrap_or(0);
            if let Some(max) = counter.max {
                attunement.max = max;
            }
        }

        let items = self
            .items
            .into_iter()
            .map(|item| item.into_sheet_item(namespace))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ActorSnapshot {
            id,
            name: self.name,
            editable,
            items,
            spell_slots,
            attunement,
        })
    }
}

// =============================================================================
// Lenient numbers
// =============================================================================

fn lenient_number(value: Option<Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(lenient_number(value)
        .filter(|n| n.is_finite())
        .map(|n| n.round() as i64))
}

fn lenient_u32<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(lenient_number(value)
        .filter(|n| n.is_finite() && *n >= 0.0 && *n <= f64::from(u32::MAX))
        .map(|n| n as u32))
}

fn lenient_u8<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(lenient_number(value)
        .filter(|n| n.is_finite() && *n >= 0.0 && *n <= f64::from(u8::MAX))
        .map(|n| n as u8))
}
