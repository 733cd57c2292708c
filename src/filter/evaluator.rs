use std::cmp::Ordering;

use crate::geofile::feature::{Feature, Scalar};

use super::clause::{FilterClause, FilterMode, FilterSpec, Predicate};

/// Anything that can decide whether a feature is selected.
///
/// Implemented by [`FilterSpec`] and by plain closures, so externally compiled predicates
/// can be used wherever a filter is accepted.
pub trait FeaturePredicate {
    fn test(&self, feature: &Feature) -> bool;
}

impl FeaturePredicate for FilterSpec {
    fn test(&self, feature: &Feature) -> bool {
        matches(feature, self)
    }
}

impl<F: Fn(&Feature) -> bool> FeaturePredicate for F {
    fn test(&self, feature: &Feature) -> bool {
        self(feature)
    }
}

/// Evaluate `spec` against the properties of `feature`.
///
/// Evaluation stops at the first failing clause in `All` mode and at the first passing clause
/// in `Any` mode. An empty spec matches everything in `All` mode and nothing in `Any` mode.
pub fn matches(feature: &Feature, spec: &FilterSpec) -> bool {
    match spec.mode {
        FilterMode::All => spec
            .clauses
            .iter()
            .all(|clause| clause_matches(feature, clause)),
        FilterMode::Any => spec
            .clauses
            .iter()
            .any(|clause| clause_matches(feature, clause)),
    }
}

/// A property the feature does not have fails every predicate.
pub fn clause_matches(feature: &Feature, clause: &FilterClause) -> bool {
    let Some(value) = feature.property(&clause.field) else {
        return false;
    };
    match &clause.predicate {
        Predicate::Range { min, max } => {
            let above_min = min
                .as_ref()
                .map_or(true, |min| value.compare(min) == Some(Ordering::Greater));
            let below_max = max
                .as_ref()
                .map_or(true, |max| value.compare(max) == Some(Ordering::Less));
            above_min && below_max
        }
        Predicate::List(values) => values.contains(value),
        Predicate::Equals(expected) => strict_eq(value, expected),
    }
}

/// Equality without any coercion between kinds.
fn strict_eq(value: &Scalar, expected: &Scalar) -> bool {
    value == expected
}
