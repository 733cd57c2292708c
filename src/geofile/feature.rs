use std::{cmp::Ordering, collections::HashMap};

use serde::{Deserialize, Serialize};

/// A single property value of a feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Null,
    Bool(bool),
    Number(f64),
    String(String),
}

impl Scalar {
    /// Order two scalars of the same kind. Numbers compare numerically and strings
    /// lexicographically; every other pairing is unordered.
    pub fn compare(&self, other: &Scalar) -> Option<Ordering> {
        match (self, other) {
            (Scalar::Number(a), Scalar::Number(b)) => a.partial_cmp(b),
            (Scalar::String(a), Scalar::String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }
}

impl From<f64> for Scalar {
    fn from(value: f64) -> Self {
        Scalar::Number(value)
    }
}

impl From<i32> for Scalar {
    fn from(value: i32) -> Self {
        Scalar::Number(value as f64)
    }
}

impl From<bool> for Scalar {
    fn from(value: bool) -> Self {
        Scalar::Bool(value)
    }
}

impl From<&str> for Scalar {
    fn from(value: &str) -> Self {
        Scalar::String(value.to_string())
    }
}

impl From<String> for Scalar {
    fn from(value: String) -> Self {
        Scalar::String(value)
    }
}

/// Named properties of a feature.
pub type FeatureMap = HashMap<String, Scalar>;

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    pub geometry: geo::Geometry,
    pub properties: FeatureMap,
}

impl Feature {
    pub fn new(geometry: geo::Geometry, properties: FeatureMap) -> Self {
        Self {
            geometry,
            properties,
        }
    }

    pub fn property(&self, field: &str) -> Option<&Scalar> {
        self.properties.get(field)
    }

    pub fn with_property(mut self, field: &str, value: impl Into<Scalar>) -> Self {
        self.properties.insert(field.to_string(), value.into());
        self
    }
}

impl From<geo::Geometry> for Feature {
    fn from(value: geo::Geometry) -> Self {
        Self {
            geometry: value,
            properties: FeatureMap::new(),
        }
    }
}
