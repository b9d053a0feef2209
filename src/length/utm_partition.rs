use std::collections::BTreeMap;

use anyhow::{anyhow, Context};
use proj::Transform;

use crate::{
    crs::{
        crs_utils::{crs_definition, epsg_code_to_authority_string, WGS84_EPSG_CODE},
        utm_zone::UtmZone,
    },
    geofile::feature::{Feature, FeatureCollection},
};

use super::line_geometry::{sum_feature_lengths, LineGeometry, MeasurableLine};

/// Group the features of a geographic collection by the UTM zone of their centroid.
///
/// Centroids are computed in the source CRS and transformed to WGS84 before picking the zone.
/// Empty lines have no centroid and no length; they are left out.
pub fn partition_by_utm_zone(
    collection: &FeatureCollection,
) -> anyhow::Result<BTreeMap<UtmZone, Vec<&Feature>>> {
    let to_wgs84 = proj::Proj::new_known_crs(
        &crs_definition(&collection.spatial_ref)?,
        &epsg_code_to_authority_string(WGS84_EPSG_CODE),
        None,
    )
    .context("Creating transformation to EPSG:4326")?;

    let mut partitions: BTreeMap<UtmZone, Vec<&Feature>> = BTreeMap::new();
    for feature in &collection.features {
        let centroid = match LineGeometry::of_feature(feature)?.centroid() {
            Some(centroid) => centroid,
            None => {
                log::debug!("Skipping empty line at index {}", feature.index);
                continue;
            }
        };
        let wgs84_centroid = centroid.transformed(&to_wgs84).map_err(|err| {
            anyhow!(
                "Could not transform centroid of feature at index {} to EPSG:4326, {}",
                feature.index,
                err
            )
        })?;
        let zone = UtmZone::from_longitude(wgs84_centroid.x())
            .with_context(|| format!("Feature at index {}", feature.index))?;
        partitions.entry(zone).or_default().push(feature);
    }
    Ok(partitions)
}

/// Reproject line features from `from_crs` (a PROJ definition) to the northern UTM zone `zone`.
pub fn project_features_to_utm(
    features: &[&Feature],
    from_crs: &str,
    zone: UtmZone,
) -> anyhow::Result<Vec<Feature>> {
    let projection = proj::Proj::new_known_crs(
        from_crs,
        &epsg_code_to_authority_string(zone.north_epsg_code()),
        None,
    )?;
    features
        .iter()
        .map(|feature| -> anyhow::Result<Feature> {
            let geometry: geo::Geometry = match LineGeometry::of_feature(feature)? {
                MeasurableLine::Simple(line) => line.transformed(&projection)?.into(),
                MeasurableLine::MultiPart(lines) => lines.transformed(&projection)?.into(),
            };
            Ok(Feature::new(feature.index, geometry))
        })
        .collect()
}

/// Total length in meters of a geographic collection, measuring each UTM zone partition in its
/// own projection.
pub fn sum_lengths_by_utm_zone(collection: &FeatureCollection) -> anyhow::Result<f64> {
    let from_crs = crs_definition(&collection.spatial_ref)?;
    let mut total_length = 0.0;
    for (zone, features) in partition_by_utm_zone(collection)? {
        log::info!(
            "Projecting {} features in UTM zone {} to {}",
            features.len(),
            zone.number(),
            epsg_code_to_authority_string(zone.north_epsg_code())
        );
        let projected_features = project_features_to_utm(&features, &from_crs, zone)?;
        total_length += sum_feature_lengths(&projected_features)?;
    }
    Ok(total_length)
}
