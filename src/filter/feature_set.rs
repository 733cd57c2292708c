use std::borrow::Cow;

use crate::geofile::feature::{Feature, FeatureMap};

use super::{
    clause::FilterSpec,
    evaluator::{matches, FeaturePredicate},
};

/// Select the features for which `predicate` holds, or the ones for which it does not when
/// `inverse` is set. The input is left untouched and the relative order is kept.
pub fn filter_features<P: FeaturePredicate + ?Sized>(
    features: &[Feature],
    predicate: &P,
    inverse: bool,
) -> Vec<Feature> {
    let selected: Vec<Feature> = features
        .iter()
        .filter(|feature| predicate.test(feature) != inverse)
        .cloned()
        .collect();
    log::debug!(
        "Selected {} of {} features (inverse: {})",
        selected.len(),
        features.len(),
        inverse
    );
    selected
}

/// Features matching `spec`. Without a spec the input itself is handed back, not a copy.
pub fn match_features<'a>(features: &'a [Feature], spec: Option<&FilterSpec>) -> Cow<'a, [Feature]> {
    match spec {
        Some(spec) => Cow::Owned(filter_features(features, spec, false)),
        None => Cow::Borrowed(features),
    }
}

/// Apply `patch` to the properties of every feature matching `spec`.
///
/// Patch keys override existing keys, other properties and the geometry are kept. Features
/// that do not match are copied into the result unchanged.
pub fn change_features(features: &[Feature], spec: &FilterSpec, patch: &FeatureMap) -> Vec<Feature> {
    let mut num_changed = 0;
    let changed: Vec<Feature> = features
        .iter()
        .map(|feature| {
            let mut feature = feature.clone();
            if matches(&feature, spec) {
                feature
                    .properties
                    .extend(patch.iter().map(|(key, value)| (key.clone(), value.clone())));
                num_changed += 1;
            }
            feature
        })
        .collect();
    log::debug!("Changed {} of {} features", num_changed, features.len());
    changed
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use crate::{
        filter::clause::{FilterClause, FilterSpec},
        geofile::feature::{Feature, FeatureMap, Scalar},
    };

    use super::{change_features, filter_features, match_features};

    fn features() -> Vec<Feature> {
        (0..6)
            .map(|index| {
                Feature::from(geo::Geometry::Point(geo::Point::new(index as f64, 0.0)))
                    .with_property("index", index)
                    .with_property("kind", if index % 2 == 0 { "road" } else { "path" })
            })
            .collect()
    }

    fn indices(features: &[Feature]) -> Vec<f64> {
        features
            .iter()
            .map(|feature| match feature.property("index") {
                Some(Scalar::Number(index)) => *index,
                other => panic!("unexpected index {:?}", other),
            })
            .collect()
    }

    #[test]
    fn test_filter_features_keeps_order() {
        let input = features();
        let spec = FilterSpec::all(vec![FilterClause::equals("kind", "road")]);
        let selected = filter_features(&input, &spec, false);
        assert_eq!(vec![0.0, 2.0, 4.0], indices(&selected));
        assert_eq!(features(), input);
    }

    #[test]
    fn test_filter_features_partitions_input() {
        let input = features();
        let spec = FilterSpec::any(vec![
            FilterClause::equals("kind", "path"),
            FilterClause::range("index", None, Some(2.into())),
        ]);
        let selected = filter_features(&input, &spec, false);
        let rejected = filter_features(&input, &spec, true);
        assert_eq!(vec![0.0, 1.0, 3.0, 5.0], indices(&selected));
        assert_eq!(vec![2.0, 4.0], indices(&rejected));

        let mut all = indices(&selected);
        all.extend(indices(&rejected));
        all.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(indices(&input), all);
    }

    #[test]
    fn test_filter_features_with_closure() {
        let input = features();
        let selected = filter_features(
            &input,
            &|feature: &Feature| match feature.geometry {
                geo::Geometry::Point(point) => point.x() > 3.5,
                _ => false,
            },
            false,
        );
        assert_eq!(vec![4.0, 5.0], indices(&selected));
    }

    #[test]
    fn test_match_features() {
        let input = features();
        assert!(matches!(match_features(&input, None), Cow::Borrowed(_)));
        assert_eq!(input.as_slice(), &*match_features(&input, None));

        let spec = FilterSpec::all(vec![FilterClause::list(
            "index",
            vec![1.into(), 5.into(), 9.into()],
        )]);
        let matched = match_features(&input, Some(&spec));
        assert_eq!(vec![1.0, 5.0], indices(&matched));
    }

    #[test]
    fn test_change_features() {
        let input = features();
        let spec = FilterSpec::all(vec![
            FilterClause::equals("kind", "road"),
            FilterClause::range("index", Some(0.into()), None),
        ]);
        let patch = FeatureMap::from([
            ("kind".to_string(), Scalar::from("highway")),
            ("reviewed".to_string(), Scalar::from(true)),
        ]);
        let changed = change_features(&input, &spec, &patch);

        assert_eq!(input.len(), changed.len());
        assert_eq!(features(), input);
        for (before, after) in input.iter().zip(changed.iter()) {
            assert_eq!(before.geometry, after.geometry);
            assert_eq!(before.property("index"), after.property("index"));
        }
        let highways: Vec<f64> = indices(&filter_features(
            &changed,
            &FilterSpec::all(vec![FilterClause::equals("kind", "highway")]),
            false,
        ));
        assert_eq!(vec![2.0, 4.0], highways);
        assert_eq!(Some(&Scalar::from(true)), changed[2].property("reviewed"));
        assert_eq!(None, changed[0].property("reviewed"));
        assert_eq!(input[1], changed[1]);
    }
}
