pub type EpsgCode = u32;

/// Base EPSG code of the WGS 84 / UTM north zones; zone `n` north is `32600 + n`.
pub const WGS84_UTM_NORTH_BASE: EpsgCode = 32600;
/// Base EPSG code of the WGS 84 / UTM south zones; zone `n` south is `32700 + n`.
pub const WGS84_UTM_SOUTH_BASE: EpsgCode = 32700;

pub fn epsg_code_to_authority_string(code: EpsgCode) -> String {
    format!("EPSG:{}", code)
}

#[cfg(test)]
mod tests {
    use super::epsg_code_to_authority_string;

    #[test]
    fn test_epsg_code_to_authority_string() {
        assert_eq!("EPSG:32654", epsg_code_to_authority_string(32654));
        assert_eq!("EPSG:4326", epsg_code_to_authority_string(4326));
    }
}
