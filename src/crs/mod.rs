pub mod crs_utils;
pub mod units;
pub mod utm_zone;
