pub mod line_geometry;
pub mod utm_partition;

use std::path::Path;

use crate::{
    crs::{
        crs_utils::{classify_crs, CrsKind},
        units::{feet_to_rounded_miles, to_feet, LinearUnit},
    },
    geofile::{feature::FeatureCollection, gdal_geofile::read_features_from_geofile},
};

use self::{line_geometry::sum_feature_lengths, utm_partition::sum_lengths_by_utm_zone};

/// Total length of all line features of a geofile in miles, rounded to three decimals.
///
/// Prints a one-line report of the result to stdout.
pub fn line_length_in_miles(filepath: &Path, layer_name: Option<&str>) -> anyhow::Result<f64> {
    let collection = read_features_from_geofile(filepath, layer_name)?;
    let total_miles = total_length_in_miles(&collection)?;
    println!("{}", length_report(total_miles));
    Ok(total_miles)
}

/// Total length of `collection` in miles, rounded to three decimals.
///
/// Geographic collections are measured per UTM zone in meters. Projected collections are measured
/// in their own linear unit.
pub fn total_length_in_miles(collection: &FeatureCollection) -> anyhow::Result<f64> {
    let (total_length, reporting_unit) = match classify_crs(&collection.spatial_ref)? {
        CrsKind::Geographic => {
            log::info!("Geographic CRS, measuring lines in their UTM zones");
            (sum_lengths_by_utm_zone(collection)?, LinearUnit::Meter)
        }
        CrsKind::Projected { linear_unit } => {
            log::info!("Projected CRS, measuring lines in {:?}", linear_unit);
            (sum_feature_lengths(&collection.features)?, linear_unit)
        }
    };
    let total_feet = to_feet(total_length, &reporting_unit)?;
    log::debug!("Total length: {} ft", total_feet);
    Ok(feet_to_rounded_miles(total_feet))
}

pub fn length_report(total_miles: f64) -> String {
    // Debug formatting keeps the decimal point on whole numbers, e.g. "0.0".
    format!("Input shapefile's total length is: {:?} miles", total_miles)
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use gdal::spatial_ref::SpatialRef;
    use geo::{line_string, point, GeodesicLength};
    use proj::Transform;
    use rstest::rstest;
    use testdir::testdir;

    use crate::{
        crs::units::{meters_to_international_feet, FEET_PER_MILE},
        error::LengthError,
        geofile::{feature::FeatureCollection, gdal_geofile::write_geometries_to_geofile},
    };

    use super::{length_report, line_length_in_miles, total_length_in_miles};

    fn tmerc_with_units(units: &str) -> SpatialRef {
        SpatialRef::from_proj4(&format!(
            "+proj=tmerc +lat_0=0 +lon_0=0 +k=1 +x_0=0 +y_0=0 +ellps=WGS84 +units={} +no_defs",
            units
        ))
        .unwrap()
    }

    fn wandering_line() -> geo::LineString {
        line_string![
            (x: 2.1, y: 45.0),
            (x: 2.6, y: 45.3),
            (x: 3.4, y: 45.2),
            (x: 3.9, y: 46.1),
        ]
    }

    #[rstest]
    #[case(4326)]
    #[case(32631)]
    fn test_empty_geofile_is_zero_miles(#[case] epsg_code: u32) {
        let geofile_filepath = testdir!().join("empty.gpkg");
        let spatial_ref = SpatialRef::from_epsg(epsg_code).unwrap();
        write_geometries_to_geofile(&[], &geofile_filepath, Some(&spatial_ref), "GPKG").unwrap();

        assert_eq!(line_length_in_miles(&geofile_filepath, None).unwrap(), 0.0);
    }

    #[test]
    fn test_projected_meters() {
        let geometries: Vec<geo::Geometry> = vec![
            line_string![(x: 500_000.0, y: 0.0), (x: 500_000.0, y: 1609.344)].into(),
            geo::MultiLineString::new(vec![
                line_string![(x: 0.0, y: 0.0), (x: 804.672, y: 0.0)],
                line_string![(x: 0.0, y: 10.0), (x: 804.672, y: 10.0)],
            ])
            .into(),
        ];
        let geofile_filepath = testdir!().join("meters.gpkg");
        let spatial_ref = SpatialRef::from_epsg(32631).unwrap();
        write_geometries_to_geofile(&geometries, &geofile_filepath, Some(&spatial_ref), "GPKG")
            .unwrap();

        assert_eq!(line_length_in_miles(&geofile_filepath, None).unwrap(), 2.0);
    }

    #[rstest]
    #[case("ft", 1.0)]
    #[case("us-ft", 1.0)]
    #[case("ft", 10.0)]
    fn test_projected_feet(#[case] units: &str, #[case] miles: f64) {
        let collection = FeatureCollection::new(
            vec![line_string![(x: 0.0, y: 0.0), (x: 5280.0 * miles, y: 0.0)].into()],
            tmerc_with_units(units),
        );
        assert_eq!(total_length_in_miles(&collection).unwrap(), miles);
    }

    #[test]
    fn test_unrecognized_unit_is_rejected() {
        let collection = FeatureCollection::new(
            vec![line_string![(x: 0.0, y: 0.0), (x: 100.0, y: 0.0)].into()],
            tmerc_with_units("ch"),
        );
        let err = total_length_in_miles(&collection).err().unwrap();
        assert!(matches!(
            err.downcast_ref::<LengthError>(),
            Some(LengthError::UnsupportedUnit(_))
        ));
    }

    #[test]
    fn test_unsupported_geometry_is_rejected() {
        let geometries: Vec<geo::Geometry> = vec![
            line_string![(x: 0.0, y: 0.0), (x: 100.0, y: 0.0)].into(),
            point!(x: 50.0, y: 50.0).into(),
            line_string![(x: 0.0, y: 10.0), (x: 100.0, y: 10.0)].into(),
        ];
        let geofile_filepath = testdir!().join("mixed.gpkg");
        let spatial_ref = SpatialRef::from_epsg(32631).unwrap();
        write_geometries_to_geofile(&geometries, &geofile_filepath, Some(&spatial_ref), "GPKG")
            .unwrap();

        let err = line_length_in_miles(&geofile_filepath, None).err().unwrap();
        assert_eq!(
            err.downcast_ref::<LengthError>(),
            Some(&LengthError::UnsupportedGeometry {
                index: 1,
                kind: "Point"
            })
        );
    }

    #[test]
    fn test_geographic_and_projected_forms_agree() {
        let wgs84_line = wandering_line();
        let to_utm = proj::Proj::new_known_crs("EPSG:4326", "EPSG:32631", None).unwrap();
        let utm_line = wgs84_line.transformed(&to_utm).unwrap();
        let test_dir = testdir!();

        let wgs84_filepath = test_dir.join("wgs84.gpkg");
        write_geometries_to_geofile(
            &[wgs84_line.into()],
            &wgs84_filepath,
            Some(&SpatialRef::from_epsg(4326).unwrap()),
            "GPKG",
        )
        .unwrap();
        let utm_filepath = test_dir.join("utm.gpkg");
        write_geometries_to_geofile(
            &[utm_line.into()],
            &utm_filepath,
            Some(&SpatialRef::from_epsg(32631).unwrap()),
            "GPKG",
        )
        .unwrap();

        let wgs84_miles = line_length_in_miles(&wgs84_filepath, None).unwrap();
        let utm_miles = line_length_in_miles(&utm_filepath, None).unwrap();
        assert!(wgs84_miles > 0.0);
        // Both results are rounded to three decimals.
        assert_abs_diff_eq!(wgs84_miles, utm_miles, epsilon = 1.5e-3);
    }

    #[test]
    fn test_geographic_meridian_matches_geodesic_miles() {
        let line = line_string![(x: 3.0, y: 0.0), (x: 3.0, y: 1.0)];
        let geodesic_miles = meters_to_international_feet(line.geodesic_length()) / FEET_PER_MILE;
        let collection =
            FeatureCollection::new(vec![line.into()], SpatialRef::from_epsg(4326).unwrap());

        let miles = total_length_in_miles(&collection).unwrap();
        assert_abs_diff_eq!(miles, geodesic_miles, epsilon = 0.1);
    }

    #[rstest]
    #[case(0.0, "Input shapefile's total length is: 0.0 miles")]
    #[case(68.681, "Input shapefile's total length is: 68.681 miles")]
    #[case(2.0, "Input shapefile's total length is: 2.0 miles")]
    fn test_length_report(#[case] total_miles: f64, #[case] expected: &str) {
        assert_eq!(length_report(total_miles), expected);
    }
}
