use itertools::Itertools;

use crate::types::ItemId;

/// Unordered pair of items, smaller id first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemPair(ItemId, ItemId);

impl ItemPair {
    pub fn new(a: ItemId, b: ItemId) -> Self {
        if a <= b {
            Self(a, b)
        } else {
            Self(b, a)
        }
    }

    pub fn first(&self) -> ItemId {
        self.0
    }

    pub fn second(&self) -> ItemId {
        self.1
    }

    pub fn as_itemset(&self) -> [ItemId; 2] {
        [self.0, self.1]
    }
}

/// Every unordered pair of distinct items, in the order the items are given.
pub fn candidate_pairs(frequent_items: &[ItemId]) -> Vec<ItemPair> {
    frequent_items
        .iter()
        .tuple_combinations()
        .map(|(&a, &b)| ItemPair::new(a, b))
        .collect()
}
