use crate::{
    combi::ItemPair,
    config::min_support_count,
    error::{check_fraction, Result},
    itemsets::{fraction, EncodedOrders},
    order::Order,
    rules::rule::{AssociationRule, Rule},
};

/// Scores both directions of every frequent pair and keeps the confident ones,
/// most confident first.
pub fn generate_rules(
    min_conf: f64,
    encoded: &EncodedOrders,
    frequent_pairs: &[(ItemPair, u32)],
) -> Vec<AssociationRule> {
    let mut final_rules: Vec<AssociationRule> = frequent_pairs
        .iter()
        .flat_map(|&(pair, count)| {
            let support = fraction(count as usize, encoded.len());
            Rule::from_pair(pair)
                .into_iter()
                .filter_map(move |mut rule| {
                    if !rule.compute_confidence(encoded) {
                        return None;
                    }
                    log::trace!(
                        "{} => {}: confidence {:.3}",
                        encoded.item_name(rule.antecedent),
                        encoded.item_name(rule.consequent),
                        rule.confidence
                    );
                    if rule.confidence >= min_conf {
                        Some(rule.to_association_rule(encoded, support))
                    } else {
                        None
                    }
                })
        })
        .collect();

    // Confidence is never NaN here, the zero-antecedent case was filtered out.
    final_rules.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

    log::debug!(
        "{} rules from {} pairs at confidence >= {}",
        final_rules.len(),
        frequent_pairs.len(),
        min_conf
    );

    final_rules
}

/// "If buy X then recommend Y" rules over the whole order history.
///
/// `min_support` is a fraction of all orders; it is floored to an order
/// count, and at least one order is required whenever there are orders.
pub fn find_association_rules(
    orders: &[Order],
    min_support: f64,
    min_confidence: f64,
) -> Result<Vec<AssociationRule>> {
    check_fraction("min_support", min_support)?;
    check_fraction("min_confidence", min_confidence)?;

    let encoded = EncodedOrders::encode(orders);
    let frequent_pairs = encoded.frequent_pairs(min_support_count(min_support, encoded.len()));
    Ok(generate_rules(min_confidence, &encoded, &frequent_pairs))
}
