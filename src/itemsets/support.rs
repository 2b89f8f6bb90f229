use rayon::prelude::*;

use crate::{
    itemsets::count::{fraction, EncodedOrders},
    order::Order,
    types::{ItemId, Itemset},
};

impl EncodedOrders<'_> {
    /// Number of orders containing every item of `itemset`.
    pub fn support_count(&self, itemset: &[ItemId]) -> usize {
        self.transactions()
            .par_iter()
            .filter(|transaction| itemset.iter().all(|&item_id| transaction[item_id]))
            .count()
    }

    pub fn support(&self, itemset: &[ItemId]) -> f64 {
        fraction(self.support_count(itemset), self.len())
    }

    /// `support(antecedent ∪ consequent) / support(antecedent)`, or `None`
    /// when no order contains the antecedent.
    pub fn confidence(&self, antecedent: &[ItemId], consequent: &[ItemId]) -> Option<f64> {
        let antecedent_count = self.support_count(antecedent);
        if antecedent_count == 0 {
            return None;
        }
        let union: Itemset = antecedent.iter().chain(consequent).copied().collect();
        Some(self.support_count(&union) as f64 / antecedent_count as f64)
    }

    /// Ids for `names`, or `None` if any of them was never ordered.
    fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Option<Itemset> {
        names
            .iter()
            .map(|name| self.item_id(name.as_ref()))
            .collect()
    }
}

/// Fraction of orders containing every item in `itemset`.
pub fn compute_support<S: AsRef<str>>(itemset: &[S], orders: &[Order]) -> f64 {
    let encoded = EncodedOrders::encode(orders);
    match encoded.resolve(itemset) {
        Some(item_ids) => encoded.support(&item_ids),
        None => 0.0,
    }
}

/// Confidence of `antecedent → consequent`; `None` when the antecedent never occurs.
pub fn compute_confidence<S: AsRef<str>>(
    antecedent: &[S],
    consequent: &[S],
    orders: &[Order],
) -> Option<f64> {
    let encoded = EncodedOrders::encode(orders);
    let antecedent = encoded.resolve(antecedent)?;
    match encoded.resolve(consequent) {
        Some(consequent) => encoded.confidence(&antecedent, &consequent),
        // The antecedent may still be absent, which must stay undefined.
        None => encoded.confidence(&antecedent, &[]).map(|_| 0.0),
    }
}
