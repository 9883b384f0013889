use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid bar renderer config: {0}")]
    InvalidConfig(String),

    #[error(
        "number of bar groups ({num_groups}) exceeds length of weight pattern ({pattern_len})"
    )]
    WeightPatternTooShort { pattern_len: usize, num_groups: usize },
}
