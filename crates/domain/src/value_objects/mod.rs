//! Value objects for favorites ordering.

mod bucket;
mod reorder;
mod sort_key;

pub use bucket::{BucketId, SpellModeBucket};
pub use reorder::{ReorderIntent, SortUpdate};
pub use sort_key::{SortKey, SORT_INTEGER_DENSITY};
