//! Input analysis: header resolution and value aggregation.

pub mod aggregator;
pub mod fields;

pub use aggregator::*;
