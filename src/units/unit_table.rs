use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Linear unit symbols accepted by the length and area converters.
///
/// The set is closed: any other symbol is rejected with [`Error::UnknownUnit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum UnitSymbol {
    Feet,
    Yards,
    Miles,
    Inches,
    Meters,
    Kilometers,
    Chains,
    /// Side of a square acre.
    Acres,
    /// Side of a square hectare.
    Hectares,
}

impl UnitSymbol {
    pub const ALL: [UnitSymbol; 9] = [
        UnitSymbol::Feet,
        UnitSymbol::Yards,
        UnitSymbol::Miles,
        UnitSymbol::Inches,
        UnitSymbol::Meters,
        UnitSymbol::Kilometers,
        UnitSymbol::Chains,
        UnitSymbol::Acres,
        UnitSymbol::Hectares,
    ];

    /// Length of one unit in meters.
    pub const fn meters(&self) -> f64 {
        match self {
            UnitSymbol::Feet => 0.3048,
            UnitSymbol::Yards => 0.9144,
            UnitSymbol::Miles => 1609.347,
            UnitSymbol::Inches => 0.0254,
            UnitSymbol::Meters => 1.0,
            UnitSymbol::Kilometers => 1000.0,
            UnitSymbol::Chains => 20.11684,
            UnitSymbol::Acres => 63.63,
            UnitSymbol::Hectares => 100.0,
        }
    }

    pub const fn symbol(&self) -> &'static str {
        match self {
            UnitSymbol::Feet => "ft",
            UnitSymbol::Yards => "yd",
            UnitSymbol::Miles => "mi",
            UnitSymbol::Inches => "in",
            UnitSymbol::Meters => "m",
            UnitSymbol::Kilometers => "km",
            UnitSymbol::Chains => "ch",
            UnitSymbol::Acres => "a",
            UnitSymbol::Hectares => "h",
        }
    }
}

impl FromStr for UnitSymbol {
    type Err = Error;

    fn from_str(symbol: &str) -> Result<Self, Self::Err> {
        UnitSymbol::ALL
            .into_iter()
            .find(|unit| unit.symbol() == symbol)
            .ok_or_else(|| Error::UnknownUnit(symbol.to_string()))
    }
}

impl TryFrom<String> for UnitSymbol {
    type Error = Error;

    fn try_from(symbol: String) -> Result<Self, Self::Error> {
        symbol.parse()
    }
}

impl From<UnitSymbol> for String {
    fn from(unit: UnitSymbol) -> Self {
        unit.symbol().to_string()
    }
}

impl fmt::Display for UnitSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use crate::error::Error;

    use super::UnitSymbol;

    #[rstest]
    #[case("ft", UnitSymbol::Feet)]
    #[case("mi", UnitSymbol::Miles)]
    #[case("ch", UnitSymbol::Chains)]
    #[case("a", UnitSymbol::Acres)]
    #[case("h", UnitSymbol::Hectares)]
    fn test_parse_unit_symbol(#[case] symbol: &str, #[case] expected: UnitSymbol) {
        assert_eq!(expected, symbol.parse::<UnitSymbol>().unwrap());
        assert_eq!(symbol, expected.to_string());
    }

    #[rstest]
    #[case("")]
    #[case("FT")]
    #[case("nmi")]
    #[case(" m")]
    fn test_parse_unknown_unit_symbol(#[case] symbol: &str) {
        assert_eq!(
            Err(Error::UnknownUnit(symbol.to_string())),
            symbol.parse::<UnitSymbol>()
        );
    }

    #[test]
    fn test_symbols_are_unique() {
        for (index, unit) in UnitSymbol::ALL.iter().enumerate() {
            for other in UnitSymbol::ALL.iter().skip(index + 1) {
                assert_ne!(unit.symbol(), other.symbol());
            }
        }
    }
}
