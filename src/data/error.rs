use thiserror::Error;

pub type Result<T> = std::result::Result<T, DataError>;

/// Failures of the road data core.
///
/// Each variant is handled at the boundary closest to its origin and shown
/// as a status message; none of them terminates the app.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("no usable rows after cleaning the dataset")]
    DataUnavailable,

    #[error("no elevation data found for road '{0}'")]
    RoadNotFound(String),

    #[error("road '{0}' has no samples")]
    EmptySeries(String),

    #[error("road '{name}' has {count} sample(s), at least 2 are needed to interpolate")]
    InsufficientData { name: String, count: usize },

    #[error("target distance {0} is not a finite number")]
    InvalidInput(f64),
}
