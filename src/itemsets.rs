mod count;
mod support;

pub use count::{compute_item_frequencies, find_frequent_pairs, EncodedOrders, FrequentPair};
pub use support::{compute_confidence, compute_support};

pub(crate) use count::fraction;
