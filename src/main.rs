extern crate log;
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use geofilter::catalog::resolver::z_ordered_layers;
use geofilter::config::{Config, ConversionRequest, MeasurementKind};
use geofilter::crs::projection_registry::{build_utm_projections, ProjectionRegistry};
use geofilter::crs::utm_zone::utm_zone;
use geofilter::extent::{extent, extent_rect, Extent};
use geofilter::filter::clause::FilterSpec;
use geofilter::filter::evaluator::FeaturePredicate;
use geofilter::filter::feature_set::{change_features, filter_features, match_features};
use geofilter::geofile::feature::{Feature, FeatureMap};
use geofilter::geofile::geojson::{read_features_from_geojson, write_features_to_geojson};
use geofilter::units::conversion::{convert_area_units, convert_length_units};
use rayon::prelude::*;

/// Evaluate layer filters, extents and draw order for a set of GeoJSON files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the input config file.
    #[arg(short, long)]
    config_filepath: PathBuf,
}

#[derive(Debug)]
struct FileReport {
    filepath: PathBuf,
    num_features: usize,
    selected: Vec<Feature>,
    extent: Extent,
}

/// Features selected by `filter` (its complement when `inverse` is set), with `patch`
/// applied to the features matching `filter`. Without a filter every feature is selected
/// and patched.
fn select_features<'a>(
    features: &'a [Feature],
    filter: Option<&FilterSpec>,
    inverse: bool,
    patch: Option<&FeatureMap>,
) -> Cow<'a, [Feature]> {
    let (filter, patch) = match (filter, patch) {
        (None, None) => return match_features(features, None),
        (Some(filter), None) => return filter_features(features, filter, inverse).into(),
        (None, Some(patch)) => {
            return change_features(features, &FilterSpec::default(), patch).into()
        }
        (Some(filter), Some(patch)) => (filter, patch),
    };
    // Selection is decided on the unpatched features, the patch may touch filtered fields.
    change_features(features, filter, patch)
        .into_iter()
        .zip(features)
        .filter(|(_, original)| filter.test(original) != inverse)
        .map(|(patched, _)| patched)
        .collect::<Vec<_>>()
        .into()
}

fn evaluate_features_file(filepath: &Path, config: &Config) -> anyhow::Result<FileReport> {
    let features = read_features_from_geojson(filepath)?;
    let selected = select_features(
        &features,
        config.filter.as_ref(),
        config.inverse,
        config.patch.as_ref(),
    );

    if let Some(output_dir) = &config.output_dir {
        let stem = filepath
            .file_stem()
            .with_context(|| format!("No file name in {:?}", filepath))?
            .to_string_lossy();
        let output_filepath = output_dir.join(format!("{}_filtered.geojson", stem));
        write_features_to_geojson(&selected, &output_filepath)?;
    }

    Ok(FileReport {
        filepath: filepath.to_path_buf(),
        num_features: features.len(),
        extent: extent(&selected),
        selected: selected.into_owned(),
    })
}

fn run_conversion(request: &ConversionRequest) -> f64 {
    match request.kind {
        MeasurementKind::Length => convert_length_units(request.value, request.from, request.to),
        MeasurementKind::Area => convert_area_units(request.value, request.from, request.to),
    }
}

fn try_main() -> anyhow::Result<()> {
    let args = Args::try_parse()?;
    let config = Config::load(&args.config_filepath)?;

    let mut projections: HashMap<String, String> = HashMap::new();
    build_utm_projections(&mut projections)?;

    let reports: Vec<FileReport> = config
        .features_paths
        .par_iter()
        .map(|filepath| evaluate_features_file(filepath, &config))
        .collect::<anyhow::Result<_>>()?;
    for report in &reports {
        log::info!(
            "{:?}: selected {} of {} features, extent {:?}",
            report.filepath,
            report.selected.len(),
            report.num_features,
            report.extent
        );
    }

    let all_selected: Vec<Feature> = reports
        .into_iter()
        .flat_map(|report| report.selected)
        .collect();
    if let Some(rect) = extent_rect(&all_selected) {
        let center = rect.center();
        let zone = utm_zone(center.x, center.y);
        log::info!(
            "Selection centre ({:.6}, {:.6}) lies in {} ({})",
            center.x,
            center.y,
            zone,
            projections.lookup(&zone).unwrap_or_default()
        );
    }

    if let Some(catalog) = &config.catalog {
        let draw_order = z_ordered_layers(catalog, config.map_sources.as_ref());
        log::info!("{} visible layers, front to back:", draw_order.len());
        for entry in draw_order {
            log::info!(
                "  z={} {}",
                entry.z_index,
                entry.layer.title.as_deref().unwrap_or("<untitled>")
            );
        }
    }

    for request in &config.conversions {
        log::info!(
            "{} {} = {} {}",
            request.value,
            request.from,
            run_conversion(request),
            request.to
        );
    }
    Ok(())
}

fn main() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    env_logger::init();
    if let Err(e) = try_main() {
        eprintln!("Error: {:?}", e);
        std::process::exit(1)
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use geofilter::filter::clause::{FilterClause, FilterSpec};
    use geofilter::geofile::feature::{Feature, FeatureMap, Scalar};

    use super::select_features;

    fn features() -> Vec<Feature> {
        ["road", "path", "road"]
            .iter()
            .enumerate()
            .map(|(index, kind)| {
                Feature::from(geo::Geometry::Point(geo::Point::new(index as f64, 0.0)))
                    .with_property("index", index as i32)
                    .with_property("kind", *kind)
            })
            .collect()
    }

    fn patch() -> FeatureMap {
        FeatureMap::from([("kind".to_string(), Scalar::from("highway"))])
    }

    #[test]
    fn test_select_features_patches_matches() {
        let input = features();
        let filter = FilterSpec::all(vec![FilterClause::equals("kind", "road")]);
        let selected = select_features(&input, Some(&filter), false, Some(&patch()));
        assert_eq!(2, selected.len());
        for feature in selected.iter() {
            assert_eq!(Some(&Scalar::from("highway")), feature.property("kind"));
        }
    }

    #[test]
    fn test_select_features_inverse_leaves_non_matches_unpatched() {
        let input = features();
        let filter = FilterSpec::all(vec![FilterClause::equals("kind", "road")]);
        let selected = select_features(&input, Some(&filter), true, Some(&patch()));
        assert_eq!(vec![input[1].clone()], selected.into_owned());
    }

    #[test]
    fn test_select_features_without_filter() {
        let input = features();
        assert!(matches!(
            select_features(&input, None, false, None),
            Cow::Borrowed(_)
        ));
        let patched = select_features(&input, None, false, Some(&patch()));
        assert_eq!(3, patched.len());
        assert!(patched
            .iter()
            .all(|feature| feature.property("kind") == Some(&Scalar::from("highway"))));
    }
}
