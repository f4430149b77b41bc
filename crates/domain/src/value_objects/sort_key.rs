//! Manual sort keys for favorites.
//!
//! Keys only establish relative order within one bucket; their magnitude
//! carries no meaning. Fresh keys are spaced `SORT_INTEGER_DENSITY` apart so
//! later moves can usually land between two neighbours without touching them.

use serde::{Deserialize, Serialize};

/// Spacing between consecutively assigned keys.
pub const SORT_INTEGER_DENSITY: i64 = 100_000;

/// A persisted integer sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortKey(i64);

impl SortKey {
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i64 {
        self.0
    }

    /// Key for the `index`-th member (zero based) of a bucket laid out
    /// `step` apart: `(index + 1) * step`. Saturates instead of overflowing.
    pub fn nth(index: usize, step: i64) -> Self {
        let position = i64::try_from(index).unwrap_or(i64::MAX).saturating_add(1);
        Self(position.saturating_mul(step))
    }

    pub fn checked_add(self, step: i64) -> Option<Self> {
        self.0.checked_add(step).map(Self)
    }

    pub fn checked_sub(self, step: i64) -> Option<Self> {
        self.0.checked_sub(step).map(Self)
    }

    /// An integer strictly between `lo` and `hi`, or `None` when the two keys
    /// are adjacent, equal or out of order.
    pub fn between(lo: Self, hi: Self) -> Option<Self> {
        let gap = i128::from(hi.0) - i128::from(lo.0);
        if gap <= 1 {
            return None;
        }
        let mid = i128::from(lo.0) + gap / 2;
        i64::try_from(mid).ok().map(Self)
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for SortKey {
    fn from(value: i64) -> Self {
        Self(value)
    }
}
