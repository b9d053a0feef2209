use anyhow::{anyhow, Context};
use gdal::vector::LayerAccess;
use indicatif::ProgressBar;
use std::path::Path;

use crate::error::LengthError;

use super::feature::FeatureCollection;

/// Read all geometries and the CRS of one layer of a vector geofile.
///
/// Files with a single layer are read directly. Files with several layers (e.g. GeoPackage)
/// require `layer_name`.
pub fn read_features_from_geofile(
    filepath: &Path,
    layer_name: Option<&str>,
) -> anyhow::Result<FeatureCollection> {
    gdal::DriverManager::register_all();
    let open_options = gdal::DatasetOptions {
        open_flags: gdal::GdalOpenFlags::GDAL_OF_VECTOR,
        ..Default::default()
    };
    let dataset = gdal::Dataset::open_ex(filepath, open_options)
        .with_context(|| format!("Opening geofile {:?}", filepath))?;

    let mut layer = match layer_name {
        Some(layer_name) => dataset
            .layer_by_name(layer_name)
            .with_context(|| format!("Opening layer '{}'", layer_name))?,
        None => {
            let layer_count = dataset.layer_count();
            if 1 != layer_count {
                return Err(anyhow!(
                    "Found {} layers, specify a layer name when there is not exactly one layer.",
                    layer_count
                ));
            }
            dataset.layer(0)?
        }
    };

    let spatial_ref = layer.spatial_ref().ok_or(LengthError::MissingCrs)?;
    log::debug!(
        "Layer '{}' uses CRS {}",
        layer.name(),
        spatial_ref.name().unwrap_or_else(|_| "<unnamed>".to_string())
    );

    let bar = ProgressBar::new(layer.feature_count());
    let mut geometries = Vec::new();
    for (index, gdal_feature) in layer.features().enumerate() {
        let geometry = gdal_feature
            .geometry_by_index(0)
            .with_context(|| format!("Feature at index {} has no geometry", index))?;
        let wkb_bytes = geometry.wkb()?;
        let geometry = wkb::wkb_to_geom(&mut wkb_bytes.as_slice()).map_err(|err| {
            anyhow!(
                "Could not read geometry of feature at index {} from WKB, {:?}",
                index,
                err
            )
        })?;
        geometries.push(geometry);
        bar.inc(1);
    }
    bar.finish_and_clear();
    log::info!("Read {} features from {:?}", geometries.len(), filepath);

    Ok(FeatureCollection::new(geometries, spatial_ref))
}

/// Write geometries to a new single-layer geofile. Used to build fixtures for tests.
#[cfg(test)]
pub fn write_geometries_to_geofile(
    geometries: &[geo::Geometry],
    output_filepath: &Path,
    crs: Option<&gdal::spatial_ref::SpatialRef>,
    driver: &str,
) -> anyhow::Result<()> {
    let driver = gdal::DriverManager::get_driver_by_name(driver).context("Getting GDAL driver")?;

    let layer_type = {
        use gdal::vector::OGRwkbGeometryType::*;
        let geometry_type = |geometry: &geo::Geometry| match geometry {
            geo::Geometry::Point(_) => wkbPoint,
            geo::Geometry::LineString(_) => wkbLineString,
            geo::Geometry::Polygon(_) => wkbPolygon,
            geo::Geometry::MultiPoint(_) => wkbMultiPoint,
            geo::Geometry::MultiLineString(_) => wkbMultiLineString,
            geo::Geometry::MultiPolygon(_) => wkbMultiPolygon,
            _ => wkbUnknown,
        };
        let mut types = geometries.iter().map(geometry_type);
        match types.next() {
            Some(first) if types.all(|other| other == first) => first,
            _ => wkbUnknown,
        }
    };

    let mut dataset = driver.create_vector_only(output_filepath)?;
    let layer_options = gdal::LayerOptions {
        name: "lines",
        srs: crs,
        ty: layer_type,
        options: None,
    };
    let mut layer = dataset.create_layer(layer_options)?;
    for geometry in geometries {
        let wkb = wkb::geom_to_wkb(geometry)
            .map_err(|err| anyhow!("Could not write geometry to WKB, {:?}", err))?;
        layer.create_feature(gdal::vector::Geometry::from_wkb(&wkb)?)?;
    }
    Ok(())
}
