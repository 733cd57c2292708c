use crate::error::Result;

use super::unit_table::UnitSymbol;

/// Convert a length between two unit symbols, e.g. `convert_length(3.0, "ft", "yd")`.
pub fn convert_length(value: f64, from: &str, to: &str) -> Result<f64> {
    let from: UnitSymbol = from.parse()?;
    let to: UnitSymbol = to.parse()?;
    Ok(convert_length_units(value, from, to))
}

/// Convert an area between two linear unit symbols. The ratio of the unit lengths is squared.
pub fn convert_area(value: f64, from: &str, to: &str) -> Result<f64> {
    let from: UnitSymbol = from.parse()?;
    let to: UnitSymbol = to.parse()?;
    Ok(convert_area_units(value, from, to))
}

pub fn convert_length_units(value: f64, from: UnitSymbol, to: UnitSymbol) -> f64 {
    // x * k / k is not always exactly x in floating point.
    if from == to {
        return value;
    }
    value * from.meters() / to.meters()
}

pub fn convert_area_units(value: f64, from: UnitSymbol, to: UnitSymbol) -> f64 {
    if from == to {
        return value;
    }
    value * from.meters().powi(2) / to.meters().powi(2)
}
