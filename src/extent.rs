use crate::geofile::feature::Feature;

/// Bounding box as `[min_x, min_y, max_x, max_y]`. A bound is `None` until a coordinate
/// has been seen.
pub type Extent = [Option<f64>; 4];

pub const EMPTY_EXTENT: Extent = [None, None, None, None];

/// Compute the extent of the features' geometries.
///
/// Points, line strings, polygons (exterior and interior rings) and multi line strings
/// contribute their vertices. Every other geometry kind is skipped, so a collection made up
/// only of those yields [`EMPTY_EXTENT`].
pub fn extent(features: &[Feature]) -> Extent {
    features.iter().fold(EMPTY_EXTENT, |mut bounds, feature| {
        expand_by_geometry(&mut bounds, &feature.geometry);
        bounds
    })
}

/// Same bounds as [`extent`] as a rectangle, or `None` when nothing contributed.
pub fn extent_rect(features: &[Feature]) -> Option<geo::Rect> {
    match extent(features) {
        [Some(min_x), Some(min_y), Some(max_x), Some(max_y)] => Some(geo::Rect::new(
            geo::Coord { x: min_x, y: min_y },
            geo::Coord { x: max_x, y: max_y },
        )),
        _ => None,
    }
}

fn expand_by_geometry(bounds: &mut Extent, geometry: &geo::Geometry) {
    match geometry {
        geo::Geometry::Point(point) => expand_by_coord(bounds, &point.0),
        geo::Geometry::LineString(line) => expand_by_line(bounds, line),
        geo::Geometry::Polygon(polygon) => {
            expand_by_line(bounds, polygon.exterior());
            for ring in polygon.interiors() {
                expand_by_line(bounds, ring);
            }
        }
        geo::Geometry::MultiLineString(lines) => {
            for line in lines.iter() {
                expand_by_line(bounds, line);
            }
        }
        _ => {}
    }
}

fn expand_by_line(bounds: &mut Extent, line: &geo::LineString) {
    for coord in line.coords() {
        expand_by_coord(bounds, coord);
    }
}

/// Coordinates with a NaN or infinite component are ignored.
fn expand_by_coord(bounds: &mut Extent, coord: &geo::Coord) {
    if !coord.x.is_finite() || !coord.y.is_finite() {
        return;
    }
    let [min_x, min_y, max_x, max_y] = bounds;
    update_bound(min_x, coord.x, |value, bound| value < bound);
    update_bound(min_y, coord.y, |value, bound| value < bound);
    update_bound(max_x, coord.x, |value, bound| value > bound);
    update_bound(max_y, coord.y, |value, bound| value > bound);
}

fn update_bound(bound: &mut Option<f64>, value: f64, replaces: impl Fn(f64, f64) -> bool) {
    match *bound {
        Some(current) if !replaces(value, current) => {}
        _ => *bound = Some(value),
    }
}
