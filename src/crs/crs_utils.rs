use anyhow::Context;
use gdal::spatial_ref::SpatialRef;

use crate::error::LengthError;

use super::units::LinearUnit;

pub type EpsgCode = u32;

pub const WGS84_EPSG_CODE: EpsgCode = 4326;

pub fn epsg_code_to_authority_string(code: EpsgCode) -> String {
    format!("EPSG:{}", code)
}

/// Definition of the CRS that PROJ accepts: "EPSG:<code>" when the CRS carries an EPSG
/// authority, its WKT otherwise (e.g. CRSs read from ESRI .prj files).
pub fn crs_definition(spatial_ref: &SpatialRef) -> anyhow::Result<String> {
    if let (Ok(auth_name), Ok(auth_code)) = (spatial_ref.auth_name(), spatial_ref.auth_code()) {
        if auth_name == "EPSG" {
            return Ok(epsg_code_to_authority_string(auth_code as EpsgCode));
        }
    }
    spatial_ref.to_wkt().context("Exporting CRS to WKT")
}

#[derive(Debug, Clone, PartialEq)]
pub enum CrsKind {
    /// Coordinates in degrees. Lines must be reprojected before measuring.
    Geographic,
    /// Coordinates in `linear_unit`, measurable directly.
    Projected { linear_unit: LinearUnit },
}

pub fn classify_crs(spatial_ref: &SpatialRef) -> anyhow::Result<CrsKind> {
    if spatial_ref.is_geographic() {
        return Ok(CrsKind::Geographic);
    }
    if spatial_ref.is_projected() {
        let unit_name = spatial_ref
            .linear_units_name()
            .context("Reading the linear unit of the CRS")?;
        log::debug!("Projected CRS with linear unit '{}'", unit_name);
        return Ok(CrsKind::Projected {
            linear_unit: LinearUnit::from_name(&unit_name),
        });
    }
    Err(LengthError::UnclassifiedCrs.into())
}
