pub mod crs_utils;
pub mod projection_registry;
pub mod utm_zone;
