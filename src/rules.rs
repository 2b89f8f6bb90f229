mod rule;
mod search;

pub use rule::{AssociationRule, Rule};
pub use search::{find_association_rules, generate_rules};
