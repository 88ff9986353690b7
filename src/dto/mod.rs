//! Serializable view structs passed into templates.

pub mod categories;
pub mod products;
