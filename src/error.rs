use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    /// Dataset violates a structural invariant and cannot be charted.
    #[error("malformed chart data: {0}")]
    MalformedData(String),

    #[error("series index {index} is out of range (series count: {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("failed to read chart data: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
