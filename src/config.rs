use std::{
    fs::read_to_string,
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context};
use serde::Deserialize;

use crate::{
    catalog::node::{CatalogNode, MapSourceState},
    filter::clause::FilterSpec,
    geofile::feature::FeatureMap,
    units::unit_table::UnitSymbol,
};

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementKind {
    Length,
    Area,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub kind: MeasurementKind,
    pub value: f64,
    pub from: UnitSymbol,
    pub to: UnitSymbol,
}

#[derive(Deserialize, Debug)]
pub struct Config {
    #[serde(default)]
    pub features_paths: Vec<PathBuf>,
    #[serde(default)]
    pub filter: Option<FilterSpec>,
    #[serde(default)]
    pub inverse: bool,
    #[serde(default)]
    pub patch: Option<FeatureMap>,
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
    #[serde(default)]
    pub catalog: Option<CatalogNode>,
    #[serde(default)]
    pub map_sources: Option<MapSourceState>,
    #[serde(default)]
    pub conversions: Vec<ConversionRequest>,
}

impl Config {
    pub fn load(config_filepath: &Path) -> anyhow::Result<Self> {
        if !config_filepath.exists() {
            return Err(anyhow!("Config file {:?} not found", config_filepath));
        }
        let config_contents = read_to_string(config_filepath)?;
        serde_yaml::from_str(&config_contents)
            .with_context(|| format!("Parsing config file {:?}", config_filepath))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use testdir::testdir;

    use crate::{
        filter::clause::{FilterClause, FilterMode},
        geofile::feature::Scalar,
        units::unit_table::UnitSymbol,
    };

    use super::{Config, ConversionRequest, MeasurementKind};

    #[test]
    fn test_load_config() {
        let test_dir = testdir!();
        let config_filepath = test_dir.join("config.yaml");
        fs::write(
            &config_filepath,
            r#"
features_paths: [parcels.geojson, roads.geojson]
filter:
  mode: any
  clauses:
    - {field: area, type: range, min: 100}
    - {zoning: [R1, R2]}
inverse: true
patch: {reviewed: true}
output_dir: out
catalog:
  children:
    - title: Parcels
      src: [{mapSourceName: cadastre, layerName: parcels}]
map_sources:
  cadastre:
    zIndex: 2
    layers: [{name: parcels, on: true}]
conversions:
  - {kind: area, value: 1, from: km, to: m}
"#,
        )
        .unwrap();

        let config = Config::load(&config_filepath).unwrap();
        assert_eq!(2, config.features_paths.len());
        let filter = config.filter.unwrap();
        assert_eq!(FilterMode::Any, filter.mode);
        assert_eq!(
            FilterClause::range("area", Some(100.into()), None),
            filter.clauses[0]
        );
        assert!(config.inverse);
        assert_eq!(
            Some(&Scalar::Bool(true)),
            config.patch.as_ref().unwrap().get("reviewed")
        );
        assert_eq!(1, config.catalog.unwrap().layers().len());
        assert_eq!(2, config.map_sources.unwrap()["cadastre"].z_index);
        assert_eq!(
            vec![ConversionRequest {
                kind: MeasurementKind::Area,
                value: 1.0,
                from: UnitSymbol::Kilometers,
                to: UnitSymbol::Meters,
            }],
            config.conversions
        );
    }

    #[test]
    fn test_load_config_rejects_unknown_unit() {
        let test_dir = testdir!();
        let config_filepath = test_dir.join("config.yaml");
        fs::write(
            &config_filepath,
            "conversions: [{kind: length, value: 1, from: km, to: furlong}]",
        )
        .unwrap();
        assert!(Config::load(&config_filepath).is_err());
    }

    #[test]
    fn test_load_missing_config() {
        let test_dir = testdir!();
        assert!(Config::load(&test_dir.join("missing.yaml")).is_err());
    }
}
