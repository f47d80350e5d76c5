//! Error taxonomy for the chart core.
//!
//! None of these escape the [`LineChart`](crate::LineChart) facade: they are
//! produced by the inner layers, logged, and recovered from locally.

use thiserror::Error;

/// Coarse classification used for logging and recovery decisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or unusable bounds/container. The chart becomes inert.
    Configuration,
    /// Empty series or zero-sized bounds. The chart is cleared.
    DegenerateInput,
    /// A static pool was asked for more markers than it holds. The series is truncated.
    PoolExhaustion,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChartError {
    #[error("chart bounds region is missing")]
    MissingBounds,

    #[error("placement or projection transform is not invertible")]
    SingularTransform,

    #[error("degenerate chart bounds ({width} x {height})")]
    DegenerateBounds { width: f32, height: f32 },

    #[error("series is empty")]
    EmptySeries,

    #[error("marker pool exhausted: {requested} requested, {provisioned} provisioned")]
    PoolExhausted { requested: usize, provisioned: usize },

    #[error("invalid style: {0}")]
    InvalidStyle(String),
}

impl ChartError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingBounds | Self::SingularTransform | Self::InvalidStyle(_) => {
                ErrorKind::Configuration
            }
            Self::DegenerateBounds { .. } | Self::EmptySeries => ErrorKind::DegenerateInput,
            Self::PoolExhausted { .. } => ErrorKind::PoolExhaustion,
        }
    }
}

pub type ChartResult<T> = Result<T, ChartError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(ChartError::MissingBounds.kind(), ErrorKind::Configuration);
        assert_eq!(
            ChartError::DegenerateBounds { width: 0.0, height: 1.0 }.kind(),
            ErrorKind::DegenerateInput
        );
        assert_eq!(
            ChartError::PoolExhausted { requested: 30, provisioned: 24 }.kind(),
            ErrorKind::PoolExhaustion
        );
    }
}
