use std::collections::{BTreeMap, HashMap};

use crate::error::{Error, Result};

use super::{
    crs_utils::epsg_code_to_authority_string,
    utm_zone::{Hemisphere, UtmZone, UTM_ZONE_COUNT},
};

/// A store of projection definitions keyed by id, e.g. `"EPSG:32633"` or an alias.
///
/// The registry is owned by the caller. Registration is expected to happen once, before
/// any concurrent readers look definitions up.
pub trait ProjectionRegistry {
    fn define(&mut self, id: &str, proj_string: &str);

    fn lookup(&self, id: &str) -> Option<String>;
}

impl ProjectionRegistry for HashMap<String, String> {
    fn define(&mut self, id: &str, proj_string: &str) {
        self.insert(id.to_string(), proj_string.to_string());
    }

    fn lookup(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}

impl ProjectionRegistry for BTreeMap<String, String> {
    fn define(&mut self, id: &str, proj_string: &str) {
        self.insert(id.to_string(), proj_string.to_string());
    }

    fn lookup(&self, id: &str) -> Option<String> {
        self.get(id).cloned()
    }
}

/// Proj-string for a WGS 84 UTM zone.
///
/// NOTE: there is no space between the hemisphere and `+datum`. Existing consumers compare
/// these strings byte for byte, so the format is kept as is.
pub fn utm_proj_string(zone: i32, hemisphere: Hemisphere) -> String {
    format!(
        "+proj=utm +zone={} +{}+datum=WGS84 +units=m +no_defs",
        zone,
        hemisphere.name()
    )
}

/// Register every WGS 84 UTM zone (1-60, north and south) in `registry`.
///
/// Each zone is defined under its EPSG id and then aliased as `UTM<zone><N|S>` by copying
/// the definition that was just registered. Zones are visited in ascending order with north
/// before south.
pub fn build_utm_projections<R: ProjectionRegistry + ?Sized>(registry: &mut R) -> Result<()> {
    for zone in 1..=UTM_ZONE_COUNT as i32 {
        for hemisphere in Hemisphere::ALL {
            let utm_zone = UtmZone { zone, hemisphere };
            let epsg_code = utm_zone
                .epsg_code()
                .ok_or_else(|| Error::UndefinedProjection(utm_zone.to_string()))?;
            let epsg_id = epsg_code_to_authority_string(epsg_code);
            let proj_string = utm_proj_string(zone, hemisphere);
            log::debug!("Defining {} as '{}'", epsg_id, proj_string);
            registry.define(&epsg_id, &proj_string);

            let definition = registry
                .lookup(&epsg_id)
                .ok_or_else(|| Error::UndefinedProjection(epsg_id.clone()))?;
            registry.define(&utm_zone.to_string(), &definition);
        }
    }
    log::info!(
        "Registered {} UTM projections with aliases",
        UTM_ZONE_COUNT as usize * Hemisphere::ALL.len()
    );
    Ok(())
}
