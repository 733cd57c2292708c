use std::{fs, path::Path};

use anyhow::Context;
use serde_json::Value as JsonValue;

use super::feature::{Feature, FeatureMap, Scalar};

/// Read all features of a GeoJSON file. See [`parse_features`].
pub fn read_features_from_geojson(filepath: &Path) -> anyhow::Result<Vec<Feature>> {
    let contents = fs::read_to_string(filepath)
        .with_context(|| format!("Reading GeoJSON file {:?}", filepath))?;
    parse_features(&contents).with_context(|| format!("Parsing GeoJSON file {:?}", filepath))
}

/// Decode a GeoJSON FeatureCollection, Feature or bare Geometry into features.
///
/// Features without a geometry are dropped. Nested array and object properties have no
/// scalar representation and are dropped as well.
pub fn parse_features(contents: &str) -> anyhow::Result<Vec<Feature>> {
    let geojson: geojson::GeoJson = contents.parse()?;
    let geojson_features = match geojson {
        geojson::GeoJson::FeatureCollection(collection) => collection.features,
        geojson::GeoJson::Feature(feature) => vec![feature],
        geojson::GeoJson::Geometry(geometry) => vec![geojson::Feature::from(geometry)],
    };

    let num_features = geojson_features.len();
    let mut features = Vec::with_capacity(num_features);
    for geojson_feature in geojson_features {
        let geometry = match geojson_feature.geometry {
            Some(geometry) => geo::Geometry::<f64>::try_from(geometry.value)?,
            None => continue,
        };
        let properties = geojson_feature
            .properties
            .map(properties_from_json)
            .unwrap_or_default();
        features.push(Feature::new(geometry, properties));
    }
    if features.len() != num_features {
        log::warn!(
            "Out of {} features read, only {} had a geometry.",
            num_features,
            features.len()
        )
    }
    Ok(features)
}

fn properties_from_json(properties: serde_json::Map<String, JsonValue>) -> FeatureMap {
    properties
        .into_iter()
        .filter_map(|(key, value)| {
            let scalar = match value {
                JsonValue::Null => Scalar::Null,
                JsonValue::Bool(value) => Scalar::Bool(value),
                JsonValue::Number(number) => Scalar::Number(number.as_f64()?),
                JsonValue::String(value) => Scalar::String(value),
                JsonValue::Array(_) | JsonValue::Object(_) => {
                    log::warn!("Dropping non-scalar property '{}'", key);
                    return None;
                }
            };
            Some((key, scalar))
        })
        .collect()
}

fn scalar_to_json(scalar: &Scalar) -> JsonValue {
    match scalar {
        Scalar::Null => JsonValue::Null,
        Scalar::Bool(value) => JsonValue::Bool(*value),
        Scalar::Number(value) => serde_json::Number::from_f64(*value)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null),
        Scalar::String(value) => JsonValue::String(value.clone()),
    }
}

pub fn features_to_geojson(features: &[Feature]) -> geojson::GeoJson {
    let feature_collection: geojson::FeatureCollection = features
        .iter()
        .map(|feature| {
            let mut geojson_feature = geojson::Feature::from(geojson::Geometry::new(
                geojson::Value::from(&feature.geometry),
            ));
            geojson_feature.properties = Some(
                feature
                    .properties
                    .iter()
                    .map(|(key, value)| (key.clone(), scalar_to_json(value)))
                    .collect(),
            );
            geojson_feature
        })
        .collect();
    geojson::GeoJson::from(feature_collection)
}

pub fn write_features_to_geojson(features: &[Feature], output_filepath: &Path) -> anyhow::Result<()> {
    log::info!(
        "Writing {} features to {:?}",
        features.len(),
        output_filepath
    );
    fs::write(output_filepath, features_to_geojson(features).to_string())
        .with_context(|| format!("Writing GeoJSON file {:?}", output_filepath))
}
