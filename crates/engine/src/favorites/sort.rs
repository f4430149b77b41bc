//! Sort coordination for drag-and-drop reordering.
//!
//! Turns a reorder intent into the minimal set of key changes for one bucket.
//! The coordinator performs no I/O; callers persist the returned updates in a
//! single batch.

use sheetmark_domain::{ActorId, ReorderIntent, SortKey, SortUpdate, SORT_INTEGER_DENSITY};

use super::classifier::{Bucket, FavoriteEntry};

/// Why a reorder request produced no changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoOpReason {
    /// Dragged item belongs to a different actor
    ForeignActor,
    /// Drop named a bucket other than the one being sorted
    BucketMismatch,
    DraggedNotInBucket,
    TargetNotInBucket,
    SameItem,
    AlreadyInPlace,
    /// Sheet is not editable by the current user
    ReadOnly,
}

impl std::fmt::Display for NoOpReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let reason = match self {
            Self::ForeignActor => "dragged item belongs to another actor",
            Self::BucketMismatch => "drop bucket differs from sorted bucket",
            Self::DraggedNotInBucket => "dragged item is not in the bucket",
            Self::TargetNotInBucket => "target item is not in the bucket",
            Self::SameItem => "item dropped onto itself",
            Self::AlreadyInPlace => "item is already in place",
            Self::ReadOnly => "sheet is read-only",
        };
        f.write_str(reason)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReorderOutcome {
    Updates(Vec<SortUpdate>),
    NoOp(NoOpReason),
}

impl ReorderOutcome {
    pub fn is_noop(&self) -> bool {
        matches!(self, Self::NoOp(_))
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SortCoordinator {
    step: i64,
}

impl Default for SortCoordinator {
    fn default() -> Self {
        Self::new(SORT_INTEGER_DENSITY)
    }
}

impl SortCoordinator {
    /// `step` is the spacing for boundary moves and renumbering; non-positive
    /// values use the default.
    pub fn new(step: i64) -> Self {
        Self {
            step: if step > 0 { step } else { SORT_INTEGER_DENSITY },
        }
    }

    /// Compute the key changes that move the dragged item next to the target.
    ///
    /// Lazily keyed entries have their effective keys persisted along with
    /// the move, so the bucket reads back in the same order afterwards.
    ///
    /// # Arguments
    /// * `bucket` - Ordered bucket the drop happened in
    /// * `owner` - Actor whose sheet received the drop
    /// * `intent` - The drop
    pub fn reorder(
        &self,
        bucket: &Bucket,
        owner: &ActorId,
        intent: &ReorderIntent,
    ) -> ReorderOutcome {
        if &intent.actor_id != owner {
            return ReorderOutcome::NoOp(NoOpReason::ForeignActor);
        }
        if intent.bucket.is_some_and(|b| b != bucket.id) {
            return ReorderOutcome::NoOp(NoOpReason::BucketMismatch);
        }
        let Some(dragged_index) = bucket.position(&intent.dragged_item_id) else {
            return ReorderOutcome::NoOp(NoOpReason::DraggedNotInBucket);
        };
        if intent.target_item_id == intent.dragged_item_id {
            return ReorderOutcome::NoOp(NoOpReason::SameItem);
        }

        let dragged = &bucket.entries[dragged_index];
        let siblings: Vec<&FavoriteEntry> = bucket
            .entries
            .iter()
            .filter(|e| e.item_id() != &intent.dragged_item_id)
            .collect();
        let Some(target_index) = siblings
            .iter()
            .position(|e| e.item_id() == &intent.target_item_id)
        else {
            return ReorderOutcome::NoOp(NoOpReason::TargetNotInBucket);
        };

        let target = siblings[target_index];
        let sort_before = intent.sort_before.unwrap_or(dragged.sort > target.sort);
        let insert_at = if sort_before {
            target_index
        } else {
            target_index + 1
        };
        let lo = insert_at.checked_sub(1).and_then(|i| siblings.get(i)).copied();
        let hi = siblings.get(insert_at).copied();

        if insert_at == dragged_index
            && lo.map_or(true, |e| e.sort < dragged.sort)
            && hi.map_or(true, |e| dragged.sort < e.sort)
            && !bucket.entries.iter().any(|e| e.sort_is_lazy)
        {
            return ReorderOutcome::NoOp(NoOpReason::AlreadyInPlace);
        }

        let new_key = match (lo, hi) {
            (Some(lo), Some(hi)) => SortKey::between(lo.sort, hi.sort),
            (Some(lo), None) => lo.sort.checked_add(self.step),
            (None, Some(hi)) => hi.sort.checked_sub(self.step),
            (None, None) => None,
        };

        match new_key {
            Some(key) => {
                let mut updates = Vec::new();
                if key != dragged.sort || dragged.sort_is_lazy {
                    updates.push(SortUpdate::new(dragged.item.id.clone(), key));
                }
                updates.extend(
                    siblings
                        .iter()
                        .filter(|e| e.sort_is_lazy)
                        .map(|e| SortUpdate::new(e.item.id.clone(), e.sort)),
                );
                Self::outcome(updates)
            }
            None => {
                let mut order = siblings;
                order.insert(insert_at, dragged);
                tracing::debug!(
                    bucket = %bucket.id,
                    entries = order.len(),
                    "No free sort key between neighbours, renumbering bucket"
                );
                Self::outcome(self.renumber(&order))
            }
        }
    }

    /// An empty change set means the drop already matched the stored order.
    fn outcome(updates: Vec<SortUpdate>) -> ReorderOutcome {
        if updates.is_empty() {
            ReorderOutcome::NoOp(NoOpReason::AlreadyInPlace)
        } else {
            ReorderOutcome::Updates(updates)
        }
    }

    fn renumber(&self, order: &[&FavoriteEntry]) -> Vec<SortUpdate> {
        order
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| {
                let key = SortKey::nth(i, self.step);
                (entry.sort_is_lazy || entry.sort != key)
                    .then(|| SortUpdate::new(entry.item.id.clone(), key))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::favorites::classifier::FavoriteClassifier;
    use sheetmark_domain::{BucketId, ItemId, ItemKind, SheetItem};

    fn owner() -> ActorId {
        ActorId::new("actor-1").unwrap()
    }

    fn id(s: &str) -> ItemId {
        ItemId::new(s).unwrap()
    }

    fn item(name: &str, sort: Option<i64>) -> SheetItem {
        let item = SheetItem::new(id(name), name, ItemKind::Loot).with_favorite(true);
        match sort {
            Some(s) => item.with_sort(SortKey::new(s)),
            None => item,
        }
    }

    fn bucket(items: &[SheetItem]) -> Bucket {
        FavoriteClassifier::default().classify(items).items
    }

    fn abc() -> Bucket {
        bucket(&[
            item("a", Some(100_000)),
            item("b", Some(200_000)),
            item("c", Some(300_000)),
        ])
    }

    fn intent(dragged: &str, target: &str) -> ReorderIntent {
        ReorderIntent::new(owner(), id(dragged), id(target))
    }

    fn updates(outcome: ReorderOutcome) -> Vec<(String, i64)> {
        match outcome {
            ReorderOutcome::Updates(updates) => updates
                .into_iter()
                .map(|u| (u.item_id.to_string(), u.sort.value()))
                .collect(),
            ReorderOutcome::NoOp(reason) => panic!("expected updates, got no-op: {}", reason),
        }
    }

    /// Apply updates and return the resulting order.
    fn apply(bucket: &Bucket, outcome: ReorderOutcome) -> Vec<String> {
        let changes = updates(outcome);
        let items: Vec<SheetItem> = bucket
            .entries
            .iter()
            .map(|e| {
                let mut item = e.item.clone();
                if let Some((_, key)) = changes.iter().find(|(i, _)| i == item.id.as_str()) {
                    item = item.with_sort(SortKey::new(*key));
                }
                item
            })
            .collect();
        FavoriteClassifier::default()
            .classify(&items)
            .items
            .entries
            .iter()
            .map(|e| e.item.name.clone())
            .collect()
    }

    #[test]
    fn moving_down_lands_between_neighbours() {
        let outcome = SortCoordinator::default().reorder(&abc(), &owner(), &intent("a", "b"));
        assert_eq!(updates(outcome), vec![("a".to_string(), 250_000)]);
    }

    #[test]
    fn moving_up_lands_before_target() {
        let bucket = abc();
        let outcome = SortCoordinator::default().reorder(&bucket, &owner(), &intent("c", "a"));
        assert_eq!(updates(outcome.clone()), vec![("c".to_string(), 0)]);
        assert_eq!(apply(&bucket, outcome), vec!["c", "a", "b"]);
    }

    #[test]
    fn drop_after_last_item() {
        let outcome = SortCoordinator::default().reorder(&abc(), &owner(), &intent("a", "c"));
        assert_eq!(updates(outcome), vec![("a".to_string(), 400_000)]);
    }

    #[test]
    fn explicit_direction_overrides_drag_direction() {
        let outcome = SortCoordinator::default()
            .reorder(&abc(), &owner(), &intent("c", "b").before(false));
        // c is already right after b
        assert_eq!(outcome, ReorderOutcome::NoOp(NoOpReason::AlreadyInPlace));

        let outcome = SortCoordinator::default()
            .reorder(&abc(), &owner(), &intent("a", "c").before(true));
        assert_eq!(updates(outcome), vec![("a".to_string(), 250_000)]);
    }

    #[test]
    fn no_op_cases() {
        let coordinator = SortCoordinator::default();
        let bucket = abc();

        let foreign = ReorderIntent::new(ActorId::new("other").unwrap(), id("a"), id("b"));
        assert_eq!(
            coordinator.reorder(&bucket, &owner(), &foreign),
            ReorderOutcome::NoOp(NoOpReason::ForeignActor)
        );
        assert_eq!(
            coordinator.reorder(&bucket, &owner(), &intent("a", "b").in_bucket(BucketId::Feats)),
            ReorderOutcome::NoOp(NoOpReason::BucketMismatch)
        );
        assert_eq!(
            coordinator.reorder(&bucket, &owner(), &intent("zzz", "b")),
            ReorderOutcome::NoOp(NoOpReason::DraggedNotInBucket)
        );
        assert_eq!(
            coordinator.reorder(&bucket, &owner(), &intent("a", "zzz")),
            ReorderOutcome::NoOp(NoOpReason::TargetNotInBucket)
        );
        assert_eq!(
            coordinator.reorder(&bucket, &owner(), &intent("a", "a")),
            ReorderOutcome::NoOp(NoOpReason::SameItem)
        );
    }

    #[test]
    fn cross_bucket_drop_is_a_no_op() {
        let feats = FavoriteClassifier::default()
            .classify(&[
                SheetItem::new(id("alert"), "alert", ItemKind::Feat).with_favorite(true),
                SheetItem::new(id("lucky"), "lucky", ItemKind::Feat).with_favorite(true),
            ])
            .feats;
        // Item "a" lives in the items bucket, not the feats bucket
        let outcome = SortCoordinator::default().reorder(&feats, &owner(), &intent("a", "alert"));
        assert_eq!(outcome, ReorderOutcome::NoOp(NoOpReason::DraggedNotInBucket));

        let outcome = SortCoordinator::default().reorder(&abc(), &owner(), &intent("a", "alert"));
        assert_eq!(outcome, ReorderOutcome::NoOp(NoOpReason::TargetNotInBucket));
    }

    #[test]
    fn exhausted_gap_renumbers_in_new_order() {
        let bucket = bucket(&[item("a", Some(1)), item("b", Some(2)), item("c", Some(3))]);

        let outcome = SortCoordinator::default().reorder(&bucket, &owner(), &intent("c", "b"));

        assert_eq!(
            updates(outcome.clone()),
            vec![
                ("a".to_string(), 100_000),
                ("c".to_string(), 200_000),
                ("b".to_string(), 300_000),
            ]
        );
        assert_eq!(apply(&bucket, outcome), vec!["a", "c", "b"]);
    }

    #[test]
    fn renumbering_skips_unchanged_keys() {
        let bucket = bucket(&[
            item("a", Some(100_000)),
            item("b", Some(100_001)),
            item("c", Some(300_000)),
        ]);

        let outcome = SortCoordinator::default()
            .reorder(&bucket, &owner(), &intent("c", "b").before(true));

        assert_eq!(
            updates(outcome),
            vec![("c".to_string(), 200_000), ("b".to_string(), 300_000)]
        );
    }

    #[test]
    fn overflow_at_the_end_renumbers() {
        let bucket = bucket(&[item("a", Some(i64::MAX - 5)), item("b", Some(i64::MAX))]);

        let outcome = SortCoordinator::default().reorder(&bucket, &owner(), &intent("a", "b"));

        assert_eq!(
            updates(outcome),
            vec![("b".to_string(), 100_000), ("a".to_string(), 200_000)]
        );
    }

    #[test]
    fn lazy_keys_are_persisted_with_the_move() {
        let bucket = bucket(&[item("a", None), item("b", None), item("c", None)]);

        let outcome = SortCoordinator::default().reorder(&bucket, &owner(), &intent("c", "a"));

        assert_eq!(
            updates(outcome.clone()),
            vec![
                ("c".to_string(), 0),
                ("a".to_string(), 100_000),
                ("b".to_string(), 200_000),
            ]
        );
        assert_eq!(apply(&bucket, outcome), vec!["c", "a", "b"]);
    }

    #[test]
    fn keys_stay_strictly_ordered_over_many_moves() {
        let coordinator = SortCoordinator::default();
        let mut items = vec![item("a", Some(1)), item("b", Some(2)), item("c", Some(3)), item("d", Some(4))];

        for (dragged, target) in [("d", "a"), ("a", "b"), ("c", "d"), ("b", "c"), ("a", "d")] {
            let current = bucket(&items);
            let outcome = coordinator.reorder(&current, &owner(), &intent(dragged, target));
            if let ReorderOutcome::Updates(changes) = outcome {
                for change in changes {
                    if let Some(item) = items.iter_mut().find(|i| i.id == change.item_id) {
                        *item = item.clone().with_sort(change.sort);
                    }
                }
            }
            let keys: Vec<SortKey> = bucket(&items).entries.iter().map(|e| e.sort).collect();
            assert!(keys.windows(2).all(|w| w[0] < w[1]), "keys not strictly ordered: {:?}", keys);
        }
    }

    #[test]
    fn never_reports_an_empty_change_set() {
        let coordinator = SortCoordinator::new(1);
        let dense = bucket(&[
            item("a", Some(1)),
            item("b", Some(2)),
            item("c", Some(2)),
            item("d", Some(3)),
        ]);
        let names = ["a", "b", "c", "d"];

        for dragged in names {
            for target in names {
                for direction in [None, Some(true), Some(false)] {
                    let mut request = intent(dragged, target);
                    request.sort_before = direction;
                    if let ReorderOutcome::Updates(changes) =
                        coordinator.reorder(&dense, &owner(), &request)
                    {
                        assert!(
                            !changes.is_empty(),
                            "{} onto {} ({:?}) produced no changes",
                            dragged,
                            target,
                            direction
                        );
                    }
                }
            }
        }
    }
}
