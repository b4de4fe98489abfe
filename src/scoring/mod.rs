//! Rule scoring and weighted aggregation

pub mod aggregate;
pub mod rules;
pub mod weights;

pub use aggregate::ScoreAggregator;
pub use rules::RuleScorer;
pub use weights::{Weights, DEFAULT_WEIGHTS};
