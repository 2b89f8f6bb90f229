use bitvec::vec::BitVec;

use crate::HashMap;

pub type ItemId = usize;
pub type ItemName<'l> = &'l str;
pub type Itemset = Vec<ItemId>;

pub type ReverseLookup<'l> = HashMap<ItemName<'l>, ItemId>;
pub type Inventory<'l> = Vec<ItemName<'l>>;

/// One order's distinct items, one bit per inventory slot.
pub type Transaction = BitVec;

pub type ItemCounts = HashMap<String, u32>;
pub type ItemIdCounts = Vec<u32>;
