//! Specialized collection types

pub use slotmap::{new_key_type, SlotMap};

/// Handle-based map using slot map for stable references
pub type HandleMap<K, T> = SlotMap<K, T>;
