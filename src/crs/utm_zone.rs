use anyhow::anyhow;

use super::crs_utils::EpsgCode;

/// A UTM zone number in 1..=60.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtmZone(u8);

impl UtmZone {
    /// Zone containing the given WGS84 longitude, `floor((lon + 180) / 6) + 1`.
    ///
    /// Deviates from that formula on purpose outside [-180, 180): longitudes are wrapped first, so
    /// exactly 180 degrees is zone 1 rather than the formula's zone 61 (EPSG:32661 is UPS North,
    /// not a UTM zone).
    pub fn from_longitude(lon: f64) -> anyhow::Result<Self> {
        if !lon.is_finite() {
            return Err(anyhow!("Cannot determine UTM zone for longitude {}", lon));
        }
        let wrapped_lon = (lon + 180.0).rem_euclid(360.0) - 180.0;
        let zone = ((wrapped_lon + 180.0) / 6.0).floor() as u8 + 1;
        // Guards against rem_euclid rounding up to 360 for tiny negative inputs.
        Ok(Self(zone.min(60)))
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    /// EPSG code of the WGS 84 / UTM zone in the northern hemisphere, e.g. 32614 for zone 14.
    /// Southern hemisphere zones (327xx) are not used.
    pub fn north_epsg_code(&self) -> EpsgCode {
        32600 + self.0 as EpsgCode
    }
}
