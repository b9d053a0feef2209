#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Zero-based position of the feature in the source layer. Used to report offending features.
    pub index: usize,
    pub geometry: geo::Geometry,
}

impl Feature {
    pub fn new(index: usize, geometry: geo::Geometry) -> Self {
        Self { index, geometry }
    }
}

/// Features of one layer together with the CRS shared by all of them.
pub struct FeatureCollection {
    pub features: Vec<Feature>,
    pub spatial_ref: gdal::spatial_ref::SpatialRef,
}

impl FeatureCollection {
    pub fn new(geometries: Vec<geo::Geometry>, spatial_ref: gdal::spatial_ref::SpatialRef) -> Self {
        let features = geometries
            .into_iter()
            .enumerate()
            .map(|(index, geometry)| Feature::new(index, geometry))
            .collect();
        Self {
            features,
            spatial_ref,
        }
    }
}
