//! Sales-pattern mining for a grocery storefront.
//!
//! Given the full order history, the miner finds pairs of products that are
//! frequently bought together and turns them into "if buy X then recommend Y"
//! rules with support and confidence. Everything is recomputed per call from
//! the orders passed in; nothing is cached between calls.

use std::collections::HashMap;

pub mod analytics;
pub mod combi;
pub mod config;
pub mod error;
pub mod itemsets;
pub mod order;
pub mod report;
pub mod rules;
pub mod types;
#[cfg(feature = "python")]
mod wrapper;

pub use analytics::{sales_analytics, SalesAnalytics};
pub use config::MinerConfig;
pub use error::{Error, Result};
pub use itemsets::{
    compute_confidence, compute_item_frequencies, compute_support, find_frequent_pairs,
    FrequentPair,
};
pub use order::{load_orders, load_orders_from_path, LineItem, Order};
pub use report::{format_percent, sales_patterns, PatternReport};
pub use rules::{find_association_rules, AssociationRule};
