//! JSON-facing views of the miner output, as the storefront dashboard reads them.

use serde::Serialize;

use crate::{
    config::MinerConfig,
    error::Result,
    itemsets::{EncodedOrders, FrequentPair},
    order::Order,
    rules::{generate_rules, AssociationRule},
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairView {
    pub products: [String; 2],
    pub count: u32,
    pub support: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleView {
    pub if_buy: String,
    pub then_buy: String,
    pub confidence: String,
    pub support: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternReport {
    pub frequent_pairs: Vec<PairView>,
    pub recommendation_rules: Vec<RuleView>,
}

impl From<&FrequentPair> for PairView {
    fn from(pair: &FrequentPair) -> Self {
        Self {
            products: [pair.products.0.clone(), pair.products.1.clone()],
            count: pair.count,
            support: format_percent(pair.support),
        }
    }
}

impl From<&AssociationRule> for RuleView {
    fn from(rule: &AssociationRule) -> Self {
        Self {
            if_buy: rule.if_buy.clone(),
            then_buy: rule.then_buy.clone(),
            confidence: format_percent(rule.confidence),
            support: format_percent(rule.support),
        }
    }
}

/// `0.1234` -> `"12.3%"`. Halves round away from zero, so `0.3125` is `"31.3%"`.
pub fn format_percent(fraction: f64) -> String {
    let percent = fraction * 100.0;
    format!("{:.1}%", (percent * 10.0).round() / 10.0)
}

/// Frequent pairs and recommendation rules over `orders`, both thresholds
/// taken from `config`.
pub fn sales_patterns(orders: &[Order], config: &MinerConfig) -> Result<PatternReport> {
    config.validate()?;

    let encoded = EncodedOrders::encode(orders);
    let min_support_count = config.min_support_count(encoded.len());

    let pair_counts = encoded.frequent_pairs(min_support_count);
    let rules = generate_rules(config.min_confidence, &encoded, &pair_counts);

    Ok(PatternReport {
        frequent_pairs: pair_counts
            .iter()
            .map(|&(pair, count)| PairView::from(&encoded.to_frequent_pair(pair, count)))
            .collect(),
        recommendation_rules: rules.iter().map(RuleView::from).collect(),
    })
}
