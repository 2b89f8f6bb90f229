use serde::Serialize;

use crate::{combi::ItemPair, itemsets::EncodedOrders, types::ItemId};

/// "If an order has `if_buy`, recommend `then_buy`."
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociationRule {
    pub if_buy: String,
    pub then_buy: String,
    pub confidence: f64,
    /// Support of the pair both items form.
    pub support: f64,
    pub lift: f64,
}

/// One direction of a frequent pair, scored against the encoded orders.
#[derive(Debug, PartialEq)]
pub struct Rule {
    pub antecedent: ItemId,
    pub consequent: ItemId,
    pub confidence: f64,
    pub lift: f64,
}

impl Rule {
    /// Both directions of `pair`, unscored.
    pub fn from_pair(pair: ItemPair) -> [Rule; 2] {
        [
            Rule::new(pair.first(), pair.second()),
            Rule::new(pair.second(), pair.first()),
        ]
    }

    fn new(antecedent: ItemId, consequent: ItemId) -> Self {
        Self {
            antecedent,
            consequent,
            confidence: 0.0,
            lift: 0.0,
        }
    }

    /// Scores the rule. Returns `false` when the antecedent never occurs, in
    /// which case the rule must not be emitted.
    pub fn compute_confidence(&mut self, encoded: &EncodedOrders) -> bool {
        let confidence = match encoded.confidence(&[self.antecedent], &[self.consequent]) {
            Some(confidence) => confidence,
            None => return false,
        };
        let consequent_support = encoded.support(&[self.consequent]);

        self.confidence = confidence;
        self.lift = if consequent_support > 0.0 {
            confidence / consequent_support
        } else {
            0.0
        };
        true
    }

    pub fn to_association_rule(&self, encoded: &EncodedOrders, support: f64) -> AssociationRule {
        AssociationRule {
            if_buy: encoded.item_name(self.antecedent).to_owned(),
            then_buy: encoded.item_name(self.consequent).to_owned(),
            confidence: self.confidence,
            support,
            lift: self.lift,
        }
    }
}
