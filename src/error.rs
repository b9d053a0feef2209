/// Fatal input errors of the length calculation. None of them are recovered from; they are
/// returned up to `main`, which reports them and exits.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LengthError {
    #[error("Unsupported geometry type {kind} at index {index}")]
    UnsupportedGeometry { index: usize, kind: &'static str },

    #[error("The input shapefile is in an unsupported CRS (linear unit '{0}')")]
    UnsupportedUnit(String),

    #[error("The input CRS is neither geographic nor projected")]
    UnclassifiedCrs,

    #[error("The input layer has no CRS")]
    MissingCrs,
}
