pub mod clause;
pub mod evaluator;
pub mod feature_set;
