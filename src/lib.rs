pub mod catalog;
pub mod config;
pub mod crs;
pub mod error;
pub mod extent;
pub mod filter;
pub mod geofile;
pub mod units;

pub use error::{Error, Result};
