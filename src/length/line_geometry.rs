use geo::{Centroid, EuclideanLength};

use crate::{error::LengthError, geofile::feature::Feature};

/// The geometry kinds that carry a length. Everything else is `Other`, named by its kind.
#[derive(Debug)]
pub enum LineGeometry<'a> {
    Simple(&'a geo::LineString),
    MultiPart(&'a geo::MultiLineString),
    Other(&'static str),
}

impl<'a> From<&'a geo::Geometry> for LineGeometry<'a> {
    fn from(geometry: &'a geo::Geometry) -> Self {
        match geometry {
            geo::Geometry::LineString(line) => LineGeometry::Simple(line),
            geo::Geometry::MultiLineString(lines) => LineGeometry::MultiPart(lines),
            geo::Geometry::Point(_) => LineGeometry::Other("Point"),
            geo::Geometry::Line(_) => LineGeometry::Other("Line"),
            geo::Geometry::Polygon(_) => LineGeometry::Other("Polygon"),
            geo::Geometry::MultiPoint(_) => LineGeometry::Other("MultiPoint"),
            geo::Geometry::MultiPolygon(_) => LineGeometry::Other("MultiPolygon"),
            geo::Geometry::GeometryCollection(_) => LineGeometry::Other("GeometryCollection"),
            geo::Geometry::Rect(_) => LineGeometry::Other("Rect"),
            geo::Geometry::Triangle(_) => LineGeometry::Other("Triangle"),
        }
    }
}

impl<'a> LineGeometry<'a> {
    /// Classify the geometry of `feature`, failing for anything that is not a (multi) line.
    pub fn of_feature(feature: &'a Feature) -> Result<MeasurableLine<'a>, LengthError> {
        match LineGeometry::from(&feature.geometry) {
            LineGeometry::Simple(line) => Ok(MeasurableLine::Simple(line)),
            LineGeometry::MultiPart(lines) => Ok(MeasurableLine::MultiPart(lines)),
            LineGeometry::Other(kind) => Err(LengthError::UnsupportedGeometry {
                index: feature.index,
                kind,
            }),
        }
    }
}

/// A geometry that passed classification in `LineGeometry::of_feature`.
#[derive(Debug)]
pub enum MeasurableLine<'a> {
    Simple(&'a geo::LineString),
    MultiPart(&'a geo::MultiLineString),
}

impl<'a> MeasurableLine<'a> {
    /// Length in the unit of the coordinates. Multi-part lines are the sum of their parts.
    pub fn length(&self) -> f64 {
        match self {
            MeasurableLine::Simple(line) => line.euclidean_length(),
            MeasurableLine::MultiPart(lines) => {
                lines.iter().map(|line| line.euclidean_length()).sum()
            }
        }
    }

    /// `None` for empty lines.
    pub fn centroid(&self) -> Option<geo::Point> {
        match self {
            MeasurableLine::Simple(line) => line.centroid(),
            MeasurableLine::MultiPart(lines) => lines.centroid(),
        }
    }
}

/// Sum the lengths of `features`, stopping at the first feature that is not a line.
pub fn sum_feature_lengths<'a>(
    features: impl IntoIterator<Item = &'a Feature>,
) -> Result<f64, LengthError> {
    let mut total_length = 0.0;
    for feature in features {
        total_length += LineGeometry::of_feature(feature)?.length();
    }
    Ok(total_length)
}
