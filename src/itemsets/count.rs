use bitvec::vec::BitVec;
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    combi::{candidate_pairs, ItemPair},
    order::Order,
    types::{Inventory, ItemCounts, ItemId, ItemIdCounts, ItemName, ReverseLookup, Transaction},
    HashMap,
};

const APPROX_NUM_UNIQUE_ITEMS: usize = 256; // a grocery catalog
const APPROX_NUM_ITEMS_IN_1_ORDER: usize = 16; // arbitrary

/// Two items bought together in at least `min_support_count` orders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequentPair {
    pub products: (String, String),
    pub count: u32,
    pub support: f64,
}

/// Orders re-keyed by item id, one bit vector per order.
///
/// Item ids are handed out in first-seen order, so anything iterating ids
/// is deterministic for a fixed order history.
#[derive(Debug, Clone)]
pub struct EncodedOrders<'items> {
    inventory: Inventory<'items>,
    reverse_lookup: ReverseLookup<'items>,
    transactions: Vec<Transaction>,
}

impl<'items> EncodedOrders<'items> {
    pub fn encode(orders: &'items [Order]) -> Self {
        let mut reverse_lookup: ReverseLookup = HashMap::with_capacity(APPROX_NUM_UNIQUE_ITEMS);
        let mut inventory: Inventory = Vec::with_capacity(APPROX_NUM_UNIQUE_ITEMS);

        let item_ids: Vec<Vec<ItemId>> = orders
            .iter()
            .map(|order| {
                let mut items = Vec::with_capacity(APPROX_NUM_ITEMS_IN_1_ORDER);
                for name in order.item_names() {
                    let item_id = *reverse_lookup.entry(name).or_insert_with(|| {
                        inventory.push(name);
                        inventory.len() - 1
                    });
                    items.push(item_id);
                }
                items
            })
            .collect();

        // Bits are sized once the inventory is complete; repeated lines collapse here.
        let num_items = inventory.len();
        let transactions = item_ids
            .into_iter()
            .map(|items| {
                let mut transaction: Transaction = BitVec::repeat(false, num_items);
                for item_id in items {
                    transaction.set(item_id, true);
                }
                transaction
            })
            .collect();

        Self {
            inventory,
            reverse_lookup,
            transactions,
        }
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn num_items(&self) -> usize {
        self.inventory.len()
    }

    pub fn item_id(&self, name: &str) -> Option<ItemId> {
        self.reverse_lookup.get(name).copied()
    }

    pub fn item_name(&self, item_id: ItemId) -> ItemName<'items> {
        self.inventory[item_id]
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// Number of orders containing each item, indexed by item id.
    pub fn item_counts(&self) -> ItemIdCounts {
        let mut item_counts = vec![0; self.num_items()];
        for transaction in &self.transactions {
            for item_id in transaction.iter_ones() {
                item_counts[item_id] += 1;
            }
        }
        item_counts
    }

    /// Items present in at least `min_support_count` orders, in id order.
    pub fn frequent_items(&self, min_support_count: usize) -> Vec<ItemId> {
        self.item_counts()
            .into_iter()
            .enumerate()
            .filter(|&(_, support_count)| support_count as usize >= min_support_count)
            .map(|(item_id, _)| item_id)
            .collect()
    }

    /// Pairs of frequent items that co-occur in at least `min_support_count`
    /// orders, most frequent first.
    pub fn frequent_pairs(&self, min_support_count: usize) -> Vec<(ItemPair, u32)> {
        let min_support_count = min_support_count.max(1);

        // 1-itemset
        let frequent_items = self.frequent_items(min_support_count);

        // 2-itemset
        let candidates = candidate_pairs(&frequent_items);
        let transactions: Vec<&Transaction> = self
            .transactions
            .iter()
            .filter(|transaction| transaction.count_ones() >= 2)
            .collect();

        let mut pair_counts = generate_frequent_2_itemset_counts(
            &candidates,
            &transactions,
            min_support_count,
        );
        pair_counts.sort_by(|(_, a), (_, b)| b.cmp(a));

        log::debug!(
            "{} orders, {} items, {} frequent, {} candidate pairs, {} frequent pairs (min count {})",
            self.len(),
            self.num_items(),
            frequent_items.len(),
            candidates.len(),
            pair_counts.len(),
            min_support_count
        );

        pair_counts
    }

    pub(crate) fn to_frequent_pair(&self, pair: ItemPair, count: u32) -> FrequentPair {
        FrequentPair {
            products: (
                self.item_name(pair.first()).to_owned(),
                self.item_name(pair.second()).to_owned(),
            ),
            count,
            support: fraction(count as usize, self.len()),
        }
    }
}

/// Order-preserving, so the caller's stable sort keeps discovery order on ties.
fn generate_frequent_2_itemset_counts(
    candidates: &[ItemPair],
    transactions: &[&Transaction],
    min_support_count: usize,
) -> Vec<(ItemPair, u32)> {
    candidates
        .par_iter()
        .filter_map(|&candidate| {
            let candidate_count = transactions
                .iter()
                .filter(|transaction| transaction[candidate.first()] && transaction[candidate.second()])
                .count();
            if candidate_count >= min_support_count {
                Some((candidate, candidate_count as u32))
            } else {
                None
            }
        })
        .collect()
}

/// `count / total`, or 0 when there is nothing to divide by.
pub(crate) fn fraction(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

/// Number of orders containing each item name at least once.
pub fn compute_item_frequencies(orders: &[Order]) -> ItemCounts {
    let encoded = EncodedOrders::encode(orders);
    encoded
        .item_counts()
        .into_iter()
        .enumerate()
        .map(|(item_id, count)| (encoded.item_name(item_id).to_owned(), count))
        .collect()
}

/// Co-purchased pairs appearing in at least `min_support_count` orders,
/// sorted by descending count.
pub fn find_frequent_pairs(orders: &[Order], min_support_count: usize) -> Vec<FrequentPair> {
    let encoded = EncodedOrders::encode(orders);
    encoded
        .frequent_pairs(min_support_count)
        .into_iter()
        .map(|(pair, count)| encoded.to_frequent_pair(pair, count))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::LineItem;
    use chrono::{TimeZone, Utc};
    use maplit::hashmap;

    const A: &str = "Basmati Rice";
    const B: &str = "Toor Dal";
    const C: &str = "Ghee";
    const D: &str = "Jaggery";

    macro_rules! order {
        ($($x:expr),*) => {
            {
                let date = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
                let mut items: Vec<LineItem> = Vec::new();
                $(items.push(LineItem::new($x, 1, 10.0));)*
                Order::new(date, items)
            }
        };
    }

    fn names(pair: &FrequentPair) -> (&str, &str) {
        (pair.products.0.as_str(), pair.products.1.as_str())
    }

    #[test]
    fn encode_assigns_ids_in_first_seen_order() {
        let orders = vec![order![B, A], order![C, A]];
        let encoded = EncodedOrders::encode(&orders);

        assert_eq!(encoded.len(), 2);
        assert_eq!(encoded.num_items(), 3);
        assert_eq!(encoded.item_id(B), Some(0));
        assert_eq!(encoded.item_id(A), Some(1));
        assert_eq!(encoded.item_id(C), Some(2));
        assert_eq!(encoded.item_id(D), None);
        assert_eq!(encoded.item_name(2), C);
        assert!(encoded.transactions().iter().all(|t| t.len() == 3));
    }

    #[test]
    fn item_frequencies_count_orders_not_lines() {
        let orders = vec![order![A, B, A], order![A], order![C]];
        let counts = compute_item_frequencies(&orders);

        assert_eq!(
            counts,
            hashmap! {
                A.to_owned() => 2,
                B.to_owned() => 1,
                C.to_owned() => 1,
            }
        );
    }

    #[test]
    fn item_frequencies_of_nothing() {
        assert!(compute_item_frequencies(&[]).is_empty());
        assert!(compute_item_frequencies(&[order![]]).is_empty());
    }

    #[test]
    fn frequent_items_prune_below_threshold() {
        let orders = vec![order![A, B], order![A, C], order![A, B, C], order![B, D]];
        let encoded = EncodedOrders::encode(&orders);

        let frequent: Vec<&str> = encoded
            .frequent_items(2)
            .into_iter()
            .map(|id| encoded.item_name(id))
            .collect();
        assert_eq!(frequent, vec![A, B, C]);
    }

    #[test]
    fn frequent_pairs_min_support_2() {
        let orders = vec![order![A, B], order![A, B], order![A, C]];
        let pairs = find_frequent_pairs(&orders, 2);

        assert_eq!(pairs.len(), 1);
        assert_eq!(names(&pairs[0]), (A, B));
        assert_eq!(pairs[0].count, 2);
        assert!((pairs[0].support - 2.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn frequent_pairs_sorted_by_count_then_discovery() {
        let orders = vec![
            order![A, B],
            order![A, C],
            order![A, B, C],
            order![B, C],
            order![B, C],
            order![D],
        ];
        let pairs = find_frequent_pairs(&orders, 1);
        let got: Vec<((&str, &str), u32)> = pairs.iter().map(|p| (names(p), p.count)).collect();

        assert_eq!(got, vec![((B, C), 3), ((A, B), 2), ((A, C), 2)]);
    }

    #[test]
    fn zero_threshold_behaves_like_one() {
        let orders = vec![order![A, B], order![C]];
        assert_eq!(find_frequent_pairs(&orders, 0), find_frequent_pairs(&orders, 1));
        assert_eq!(find_frequent_pairs(&orders, 0).len(), 1);
    }

    #[test]
    fn duplicate_lines_count_once() {
        let orders = vec![order![A, A, B], order![A, C]];
        let pairs = find_frequent_pairs(&orders, 2);
        assert!(pairs.is_empty());

        let pairs = find_frequent_pairs(&orders, 1);
        let ab = pairs.iter().find(|p| names(p) == (A, B)).unwrap();
        assert_eq!(ab.count, 1);
    }

    #[test]
    fn degenerate_inputs_yield_nothing() {
        assert!(find_frequent_pairs(&[], 1).is_empty());
        assert!(find_frequent_pairs(&[order![A]], 1).is_empty());
        assert!(find_frequent_pairs(&[order![], order![]], 1).is_empty());
        assert!(find_frequent_pairs(&[order![A, B]], 5).is_empty());
    }

    #[test]
    fn fraction_guards_zero_total() {
        assert_eq!(fraction(0, 0), 0.0);
        assert_eq!(fraction(1, 4), 0.25);
    }
}
