use std::fmt;

use super::crs_utils::{EpsgCode, WGS84_UTM_NORTH_BASE, WGS84_UTM_SOUTH_BASE};

/// Number of UTM zones around the globe.
pub const UTM_ZONE_COUNT: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    pub const ALL: [Hemisphere; 2] = [Hemisphere::North, Hemisphere::South];

    /// Single letter suffix used in zone labels such as `UTM33N`.
    pub fn letter(&self) -> char {
        match self {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
        }
    }

    /// Hemisphere name as it appears in proj-strings.
    pub fn name(&self) -> &'static str {
        match self {
            Hemisphere::North => "north",
            Hemisphere::South => "south",
        }
    }
}

/// A UTM zone number paired with a hemisphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtmZone {
    pub zone: i32,
    pub hemisphere: Hemisphere,
}

impl UtmZone {
    /// Zone containing the WGS84 lon/lat coordinate.
    ///
    /// This is the simple 6 degree band rule: the Norway and Svalbard exceptions are not
    /// applied, a latitude of exactly 0 counts as south, and a longitude of exactly 180 yields
    /// zone 61.
    pub fn from_lon_lat(lon: f64, lat: f64) -> Self {
        let zone = (lon / 6.0 + 30.0).floor() as i32 + 1;
        let hemisphere = if lat > 0.0 {
            Hemisphere::North
        } else {
            Hemisphere::South
        };
        Self { zone, hemisphere }
    }

    /// EPSG code of the WGS 84 based CRS for this zone, or `None` for zones outside 1-60.
    pub fn epsg_code(&self) -> Option<EpsgCode> {
        if !(1..=UTM_ZONE_COUNT as i32).contains(&self.zone) {
            return None;
        }
        let base = match self.hemisphere {
            Hemisphere::North => WGS84_UTM_NORTH_BASE,
            Hemisphere::South => WGS84_UTM_SOUTH_BASE,
        };
        Some(base + self.zone as EpsgCode)
    }
}

impl fmt::Display for UtmZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UTM{}{}", self.zone, self.hemisphere.letter())
    }
}

/// Label of the UTM zone containing the lon/lat coordinate, e.g. `"UTM15N"`.
pub fn utm_zone(lon: f64, lat: f64) -> String {
    UtmZone::from_lon_lat(lon, lat).to_string()
}
