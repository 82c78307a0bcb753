//! Sort direction and the sort-toggle state machine.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flip(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Applies the direction to an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

/// Active sort key and direction of a list view.
///
/// Clicking a sort control maps to [`SortState::toggle`]: the active key flips direction, any
/// other key becomes active in ascending order. There is no terminal state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SortState<K> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K: Copy + PartialEq> SortState<K> {
    pub fn new(key: K, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    #[must_use]
    pub fn toggle(self, clicked: K) -> Self {
        if clicked == self.key {
            self.flip()
        } else {
            Self::new(clicked, SortDirection::Ascending)
        }
    }

    /// Keeps the key and flips the direction.
    #[must_use]
    pub fn flip(self) -> Self {
        Self::new(self.key, self.direction.flip())
    }
}
