use thiserror::Error;

/// Errors reported by [`RunningMoments`](crate::RunningMoments)
///
/// All of them are caller-correctable: check [`is_empty`](crate::RunningMoments::is_empty)
/// before querying, and pass a non-zero window size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatisticsError {
    /// A derived statistic was queried before any sample was added
    #[error("no samples accumulated")]
    EmptyAccumulator,
    /// The window size must hold at least one sample
    #[error("invalid window size {window_size}, must be at least 1")]
    InvalidConfiguration {
        /// The rejected window size
        window_size: usize,
    },
    /// Not enough samples for the requested degrees of freedom
    #[error("need at least {required} samples, have {available}")]
    InsufficientSamples {
        /// Samples needed by the query
        required: usize,
        /// Samples currently accumulated
        available: usize,
    },
    /// A sample count could not be represented in the sample type
    #[error("sample count not representable in the sample type")]
    Conversion,
}

/// Result alias used across the crate
pub type Result<T, E = StatisticsError> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    extern crate alloc;
    use alloc::string::ToString;

    #[test]
    fn display_messages() {
        assert_eq!(
            StatisticsError::EmptyAccumulator.to_string(),
            "no samples accumulated"
        );
        assert_eq!(
            StatisticsError::InvalidConfiguration { window_size: 0 }.to_string(),
            "invalid window size 0, must be at least 1"
        );
        assert_eq!(
            StatisticsError::InsufficientSamples {
                required: 2,
                available: 1
            }
            .to_string(),
            "need at least 2 samples, have 1"
        );
    }
}
