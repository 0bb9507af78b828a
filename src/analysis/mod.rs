pub mod aggregate;
pub mod tier;

pub use aggregate::aggregate_by_category;
