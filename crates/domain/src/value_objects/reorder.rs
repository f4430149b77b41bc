//! Reorder requests and their resulting key changes.

use serde::{Deserialize, Serialize};

use super::bucket::BucketId;
use super::sort_key::SortKey;
use crate::ids::{ActorId, ItemId};

/// A user's request to move one favorite relative to another.
///
/// Produced by the UI layer from a drop gesture. `actor_id` is the actor the
/// dragged item came from, which may differ from the sheet it was dropped on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderIntent {
    pub actor_id: ActorId,
    pub dragged_item_id: ItemId,
    pub target_item_id: ItemId,
    /// Bucket the drop happened in, when the UI knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bucket: Option<BucketId>,
    /// Force placement before (`true`) or after (`false`) the target. When
    /// absent the direction follows the drag: moving up lands before the
    /// target, moving down lands after it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_before: Option<bool>,
}

impl ReorderIntent {
    pub fn new(actor_id: ActorId, dragged_item_id: ItemId, target_item_id: ItemId) -> Self {
        Self {
            actor_id,
            dragged_item_id,
            target_item_id,
            bucket: None,
            sort_before: None,
        }
    }

    pub fn in_bucket(mut self, bucket: BucketId) -> Self {
        self.bucket = Some(bucket);
        self
    }

    pub fn before(mut self, sort_before: bool) -> Self {
        self.sort_before = Some(sort_before);
        self
    }
}

/// New sort key for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortUpdate {
    pub item_id: ItemId,
    pub sort: SortKey,
}

impl SortUpdate {
    pub fn new(item_id: ItemId, sort: SortKey) -> Self {
        Self { item_id, sort }
    }
}
