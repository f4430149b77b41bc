//! Favorites view model.
//!
//! Presentation-ready projection of classified favorites plus the actor
//! resources shown next to them. Serialized to JSON for the sheet template.

use serde::Serialize;
use sheetmark_domain::{
    Activation, ActorSnapshot, Attunement, BucketId, ItemId, ItemKind, SlotCounter,
    SpellModeBucket, Uses,
};

use super::classifier::{Bucket, ClassifiedFavorites, FavoriteEntry, FavoriteToggle};

/// Label for an item's active-state control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ToggleTitle {
    AlwaysPrepared,
    Prepared,
    Unprepared,
    Equipped,
    Unequipped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteEntryView {
    pub item_id: ItemId,
    pub name: String,
    pub kind: ItemKind,
    pub sort: i64,
    pub is_stack: bool,
    pub quantity: Option<u32>,
    pub can_attune: bool,
    pub attuned: bool,
    pub is_magic: bool,
    pub is_on_cooldown: bool,
    /// Recharge threshold, shown as "[5+]" while on cooldown
    pub recharge_value: Option<u8>,
    /// Absent when the item has no charges or they were set to 0/0
    pub uses: Option<Uses>,
    pub activation: Option<Activation>,
    /// "V", "S" and "M" in that order, for spells
    pub spell_components: Option<String>,
    pub concentration: bool,
    pub ritual: bool,
    pub toggle_active: bool,
    pub toggle_title: ToggleTitle,
    pub can_prepare: bool,
    pub always_prepared: bool,
    pub editable: bool,
}

impl FavoriteEntryView {
    fn from_entry(entry: &FavoriteEntry, in_level_bucket: bool, editable: bool) -> Self {
        let item = &entry.item;
        let details = &item.details;
        let spell = item.spell.as_ref().filter(|_| item.is_spell());

        let recharge_value = details.recharge.and_then(|r| r.value).filter(|v| *v > 0);
        let is_on_cooldown = details.recharge.is_some_and(|r| r.is_on_cooldown());

        let (toggle_active, toggle_title) = match spell {
            Some(spell) if spell.is_always_prepared() => (spell.prepared, ToggleTitle::AlwaysPrepared),
            Some(spell) if spell.prepared => (true, ToggleTitle::Prepared),
            Some(_) => (false, ToggleTitle::Unprepared),
            None if item.is_spell() => (false, ToggleTitle::Unprepared),
            None if details.equipped => (true, ToggleTitle::Equipped),
            None => (false, ToggleTitle::Unequipped),
        };

        let level = spell.map(|s| s.level.as_number()).unwrap_or(0);

        Self {
            item_id: item.id.clone(),
            name: item.name.clone(),
            kind: item.kind,
            sort: entry.sort.value(),
            is_stack: details.quantity.is_some_and(|q| q > 1),
            quantity: details.quantity,
            can_attune: details.attunement.applies(),
            attuned: details.attunement == Attunement::Attuned,
            is_magic: details.magical,
            is_on_cooldown,
            recharge_value: recharge_value.filter(|_| is_on_cooldown),
            uses: details.uses.filter(|u| u.value > 0 || u.max > 0),
            activation: details.activation,
            spell_components: spell.map(|s| s.components.label()),
            concentration: spell.is_some_and(|s| s.components.concentration),
            ritual: spell.is_some_and(|s| s.components.ritual),
            toggle_active,
            toggle_title,
            can_prepare: item.is_spell() && in_level_bucket && level >= 1,
            always_prepared: entry.always_prepared,
            editable,
        }
    }
}

fn entry_views(bucket: &Bucket, editable: bool) -> Vec<FavoriteEntryView> {
    let in_level_bucket = matches!(bucket.id, BucketId::SpellLevel(_));
    bucket
        .entries
        .iter()
        .map(|e| FavoriteEntryView::from_entry(e, in_level_bucket, editable))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellLevelGroup {
    pub level: u8,
    /// Absent for cantrips
    pub slots: Option<SlotCounter>,
    pub spells: Vec<FavoriteEntryView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellModeGroup {
    pub mode: SpellModeBucket,
    /// Pact magic slots; absent for at-will and innate spells
    pub slots: Option<SlotCounter>,
    pub spells: Vec<FavoriteEntryView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteToggleView {
    pub item_id: ItemId,
    pub is_favorite: bool,
}

impl From<&FavoriteToggle> for FavoriteToggleView {
    fn from(toggle: &FavoriteToggle) -> Self {
        Self {
            item_id: toggle.item_id.clone(),
            is_favorite: toggle.is_favorite,
        }
    }
}

/// Everything the favorites panel renders. Empty groups are left out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoritesView {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<FavoriteEntryView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub feats: Vec<FavoriteEntryView>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub spell_levels: Vec<SpellLevelGroup>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub spell_modes: Vec<SpellModeGroup>,
    pub toggles: Vec<FavoriteToggleView>,
    pub editable: bool,
    pub allow_cantrip_to_be_prepared: bool,
}

impl FavoritesView {
    /// Build the view, or `None` when the actor has no favorites.
    pub fn build(
        classified: &ClassifiedFavorites,
        actor: &ActorSnapshot,
        allow_cantrip_to_be_prepared: bool,
    ) -> Option<Self> {
        if !classified.has_any_favorite {
            return None;
        }
        let editable = actor.editable;

        let spell_levels = classified
            .spell_levels
            .iter()
            .filter(|b| !b.is_empty())
            .filter_map(|b| match b.id {
                BucketId::SpellLevel(level) => Some(SpellLevelGroup {
                    level,
                    slots: actor.spell_slots.level(level),
                    spells: entry_views(b, editable),
                }),
                _ => None,
            })
            .collect();

        let spell_modes = classified
            .spell_modes
            .iter()
            .filter(|b| !b.is_empty())
            .filter_map(|b| match b.id {
                BucketId::SpellMode(mode) => Some(SpellModeGroup {
                    mode,
                    slots: (mode == SpellModeBucket::Pact).then_some(actor.spell_slots.pact),
                    spells: entry_views(b, editable),
                }),
                _ => None,
            })
            .collect();

        Some(Self {
            items: entry_views(&classified.items, editable),
            feats: entry_views(&classified.feats, editable),
            spell_levels,
            spell_modes,
            toggles: classified.toggles.iter().map(FavoriteToggleView::from).collect(),
            editable,
            allow_cantrip_to_be_prepared,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::classifier::FavoriteClassifier;
    use sheetmark_domain::{
        ActorId, ItemDetails, PreparationMode, Recharge, SheetItem, SpellComponentFlags,
        SpellDetails, SpellLevel, SpellSlots,
    };

    fn id(s: &str) -> ItemId {
        ItemId::new(s).unwrap()
    }

    fn actor(items: Vec<SheetItem>) -> ActorSnapshot {
        ActorSnapshot::new(ActorId::new("actor-1").unwrap(), "Vex").with_items(items)
    }

    fn build(actor: &ActorSnapshot) -> Option<FavoritesView> {
        let classified = FavoriteClassifier::default().classify(&actor.items);
        FavoritesView::build(&classified, actor, false)
    }

    #[test]
    fn no_favorites_gives_no_view() {
        let actor = actor(vec![SheetItem::new(id("rope"), "Rope", ItemKind::Loot)]);
        assert_eq!(build(&actor), None);
    }

    #[test]
    fn item_flags() {
        let details = ItemDetails {
            quantity: Some(3),
            equipped: true,
            attunement: Attunement::Required,
            magical: true,
            recharge: Some(Recharge {
                value: Some(5),
                charged: false,
            }),
            ..ItemDetails::default()
        };
        let actor = actor(vec![SheetItem::new(id("wand"), "Wand", ItemKind::Equipment)
            .with_favorite(true)
            .with_details(details)]);

        let view = build(&actor).unwrap();
        let wand = &view.items[0];

        assert!(wand.is_stack);
        assert!(wand.can_attune);
        assert!(!wand.attuned);
        assert!(wand.is_magic);
        assert!(wand.is_on_cooldown);
        assert_eq!(wand.recharge_value, Some(5));
        assert!(wand.toggle_active);
        assert_eq!(wand.toggle_title, ToggleTitle::Equipped);
        assert_eq!(wand.spell_components, None);
        assert!(!wand.can_prepare);
        assert!(view.editable);
    }

    #[test]
    fn zeroed_charges_are_hidden() {
        let with_uses = |name: &str, uses: Uses| {
            SheetItem::new(id(name), name, ItemKind::Consumable)
                .with_favorite(true)
                .with_details(ItemDetails {
                    uses: Some(uses),
                    ..ItemDetails::default()
                })
        };
        let actor = actor(vec![
            with_uses("cleared", Uses::new(0, 0)),
            with_uses("spent", Uses::new(0, 3)),
        ]);

        let view = build(&actor).unwrap();

        assert_eq!(view.items[0].uses, None);
        assert_eq!(view.items[1].uses, Some(Uses::new(0, 3)));
    }

    #[test]
    fn spell_flags_and_slots() {
        let components = SpellComponentFlags {
            vocal: true,
            material: true,
            concentration: true,
            ..SpellComponentFlags::default()
        };
        let actor = actor(vec![
            SheetItem::new(id("bless"), "Bless", ItemKind::Spell)
                .with_favorite(true)
                .with_spell(
                    SpellDetails::new(SpellLevel::new(1).unwrap())
                        .with_prepared(true)
                        .with_components(components),
                ),
            SheetItem::new(id("shield"), "Shield", ItemKind::Spell)
                .with_favorite(true)
                .with_spell(
                    SpellDetails::new(SpellLevel::new(1).unwrap()).with_mode(PreparationMode::Always),
                ),
            SheetItem::new(id("light"), "Light", ItemKind::Spell)
                .with_favorite(true)
                .with_spell(SpellDetails::new(SpellLevel::Cantrip)),
            SheetItem::new(id("hex"), "Hex", ItemKind::Spell)
                .with_favorite(true)
                .with_spell(SpellDetails::new(SpellLevel::new(1).unwrap()).with_mode(PreparationMode::Pact)),
        ])
        .with_spell_slots(
            SpellSlots::default()
                .with_level(1, SlotCounter::new(2, 4))
                .with_pact(SlotCounter::new(1, 2)),
        );

        let view = build(&actor).unwrap();

        assert!(view.items.is_empty());
        let levels: Vec<u8> = view.spell_levels.iter().map(|g| g.level).collect();
        assert_eq!(levels, vec![0, 1]);

        let cantrips = &view.spell_levels[0];
        assert_eq!(cantrips.slots, None);
        assert!(!cantrips.spells[0].can_prepare);

        let level_one = &view.spell_levels[1];
        assert_eq!(level_one.slots, Some(SlotCounter::new(2, 4)));
        let bless = &level_one.spells[0];
        assert_eq!(bless.spell_components.as_deref(), Some("VM"));
        assert!(bless.concentration);
        assert!(!bless.ritual);
        assert!(bless.can_prepare);
        assert_eq!(bless.toggle_title, ToggleTitle::Prepared);
        let shield = &level_one.spells[1];
        assert!(shield.always_prepared);
        assert_eq!(shield.toggle_title, ToggleTitle::AlwaysPrepared);

        assert_eq!(view.spell_modes.len(), 1);
        let pact = &view.spell_modes[0];
        assert_eq!(pact.mode, SpellModeBucket::Pact);
        assert_eq!(pact.slots, Some(SlotCounter::new(1, 2)));
        assert!(!pact.spells[0].can_prepare);
    }

    #[test]
    fn serializes_without_empty_groups() {
        let actor = actor(vec![SheetItem::new(id("alert"), "Alert", ItemKind::Feat)
            .with_favorite(true)])
        .with_editable(false);

        let json = serde_json::to_value(build(&actor).unwrap()).unwrap();

        assert!(json.get("items").is_none());
        assert!(json.get("spellLevels").is_none());
        assert_eq!(json["feats"][0]["name"], "Alert");
        assert_eq!(json["feats"][0]["editable"], false);
        assert_eq!(json["editable"], false);
        assert_eq!(json["allowCantripToBePrepared"], false);
    }
}
