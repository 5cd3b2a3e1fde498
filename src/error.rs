use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the regression core. Each one is local to a single dataset.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegressionError {
    #[error("x and y must have the same length (x: {x_len}, y: {y_len})")]
    DimensionMismatch { x_len: usize, y_len: usize },

    #[error("need at least {required} samples, found {found}")]
    InsufficientSamples { required: usize, found: usize },

    #[error("degenerate input, `{0}`")]
    DegenerateInput(&'static str),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Regression(#[from] RegressionError),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("open file error: {0}")]
    File(#[from] std::io::Error),

    #[error("json serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
