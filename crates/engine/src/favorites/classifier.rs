//! Favorite classification.
//!
//! Splits a sheet's items into ordered buckets. Pure: the same items always
//! produce the same buckets, and nothing is written back to the items.

use sheetmark_domain::{
    BucketId, ItemId, SheetItem, SortKey, SpellModeBucket, MAX_SPELL_LEVEL,
    SORT_INTEGER_DENSITY,
};

/// One favorited item inside a bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteEntry {
    pub item: SheetItem,
    /// Persisted key, or the lazily assigned one when none is stored
    pub sort: SortKey,
    /// True when `sort` was computed here and is not stored on the item
    pub sort_is_lazy: bool,
    pub always_prepared: bool,
}

impl FavoriteEntry {
    pub fn item_id(&self) -> &ItemId {
        &self.item.id
    }
}

/// Ordered favorites sharing one classification key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bucket {
    pub id: BucketId,
    pub entries: Vec<FavoriteEntry>,
}

impl Bucket {
    pub fn new(id: BucketId) -> Self {
        Self {
            id,
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, item_id: &ItemId) -> bool {
        self.position(item_id).is_some()
    }

    pub fn position(&self, item_id: &ItemId) -> Option<usize> {
        self.entries.iter().position(|e| e.item_id() == item_id)
    }

    pub fn item_ids(&self) -> Vec<ItemId> {
        self.entries.iter().map(|e| e.item.id.clone()).collect()
    }
}

/// Favorite state of a non-class item, for rendering an add/remove control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteToggle {
    pub item_id: ItemId,
    pub is_favorite: bool,
}

/// Result of one classification pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedFavorites {
    pub items: Bucket,
    pub feats: Bucket,
    /// Index is the spell level, 0 (cantrips) through 9
    pub spell_levels: Vec<Bucket>,
    /// In `SpellModeBucket::ALL` order
    pub spell_modes: Vec<Bucket>,
    pub toggles: Vec<FavoriteToggle>,
    pub has_any_favorite: bool,
}

impl ClassifiedFavorites {
    fn empty() -> Self {
        Self {
            items: Bucket::new(BucketId::Items),
            feats: Bucket::new(BucketId::Feats),
            spell_levels: (0..=MAX_SPELL_LEVEL)
                .map(|level| Bucket::new(BucketId::SpellLevel(level)))
                .collect(),
            spell_modes: SpellModeBucket::ALL
                .into_iter()
                .map(|mode| Bucket::new(BucketId::SpellMode(mode)))
                .collect(),
            toggles: Vec::new(),
            has_any_favorite: false,
        }
    }

    pub fn bucket(&self, id: BucketId) -> Option<&Bucket> {
        self.buckets().find(|b| b.id == id)
    }

    fn bucket_mut(&mut self, id: BucketId) -> Option<&mut Bucket> {
        match id {
            BucketId::Items => Some(&mut self.items),
            BucketId::Feats => Some(&mut self.feats),
            BucketId::SpellLevel(level) => self.spell_levels.get_mut(usize::from(level)),
            BucketId::SpellMode(_) => self.spell_modes.iter_mut().find(|b| b.id == id),
        }
    }

    /// The bucket an item was routed to, if it is a favorite.
    pub fn bucket_of(&self, item_id: &ItemId) -> Option<&Bucket> {
        self.buckets().find(|b| b.contains(item_id))
    }

    pub fn buckets(&self) -> impl Iterator<Item = &Bucket> {
        std::iter::once(&self.items)
            .chain(std::iter::once(&self.feats))
            .chain(self.spell_levels.iter())
            .chain(self.spell_modes.iter())
    }

    fn buckets_mut(&mut self) -> impl Iterator<Item = &mut Bucket> {
        std::iter::once(&mut self.items)
            .chain(std::iter::once(&mut self.feats))
            .chain(self.spell_levels.iter_mut())
            .chain(self.spell_modes.iter_mut())
    }
}

/// Routes favorites into buckets and orders them.
#[derive(Debug, Clone, Copy)]
pub struct FavoriteClassifier {
    step: i64,
}

impl Default for FavoriteClassifier {
    fn default() -> Self {
        Self::new(SORT_INTEGER_DENSITY)
    }
}

impl FavoriteClassifier {
    /// `step` spaces lazily assigned keys; non-positive values use the default.
    pub fn new(step: i64) -> Self {
        Self {
            step: if step > 0 { step } else { SORT_INTEGER_DENSITY },
        }
    }

    pub fn classify(&self, items: &[SheetItem]) -> ClassifiedFavorites {
        let mut classified = ClassifiedFavorites::empty();

        for item in items {
            let Some(bucket_id) = BucketId::for_item(item) else {
                continue;
            };
            let is_favorite = item.is_favorite();
            classified.toggles.push(FavoriteToggle {
                item_id: item.id.clone(),
                is_favorite,
            });
            if !is_favorite {
                continue;
            }

            let Some(bucket) = classified.bucket_mut(bucket_id) else {
                tracing::warn!(
                    item_id = %item.id,
                    bucket = %bucket_id,
                    "Favorite routed to unknown bucket, skipping"
                );
                continue;
            };

            let always_prepared = item.spell.as_ref().is_some_and(|s| s.is_always_prepared());
            // Placeholder key; keyless entries are resolved below once every
            // persisted key in the bucket is known.
            let (sort, sort_is_lazy) = match item.sort_key() {
                Some(key) => (key, false),
                None => (SortKey::nth(bucket.len(), self.step), true),
            };
            bucket.entries.push(FavoriteEntry {
                item: item.clone(),
                sort,
                sort_is_lazy,
                always_prepared,
            });
            classified.has_any_favorite = true;
        }

        for bucket in classified.buckets_mut() {
            self.resolve_lazy_keys(bucket);
            bucket.entries.sort_by_key(|e| e.sort);
        }

        tracing::trace!(
            favorites = classified.buckets().map(Bucket::len).sum::<usize>(),
            "Classified favorites"
        );
        classified
    }

    /// Raise lazy keys that would not sort after the bucket's persisted keys.
    fn resolve_lazy_keys(&self, bucket: &mut Bucket) {
        let mut floor = bucket
            .entries
            .iter()
            .filter(|e| !e.sort_is_lazy)
            .map(|e| e.sort)
            .max();

        for entry in bucket.entries.iter_mut().filter(|e| e.sort_is_lazy) {
            if let Some(f) = floor {
                if entry.sort <= f {
                    entry.sort = SortKey::new(f.value().saturating_add(self.step));
                }
            }
            floor = Some(floor.map_or(entry.sort, |f| f.max(entry.sort)));
        }
    }
}
