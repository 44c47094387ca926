//! Errors that may occur when configuring a decoder.

use thiserror::Error;

use crate::consts::{PathMetric, Sample};

/// Decoder configuration errors. The sample path itself never fails.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum DecoderError {
    /// Reference levels weren't strictly increasing from the -2 to the +2 symbol.
    #[error("reference levels must be strictly increasing")]
    UnorderedLevels,
    /// A reference level fell outside the accepted sample window.
    #[error("reference level {0} is outside the sample window")]
    LevelOutOfRange(Sample),
    /// Lock hysteresis window of zero samples.
    #[error("lock window must be at least one sample")]
    EmptyLockWindow,
    /// Normalization threshold leaves no headroom for the next branch metrics.
    #[error("normalization threshold {0} exceeds half the path metric range")]
    ThresholdTooLarge(PathMetric),
}

/// Standard result using `DecoderError`.
pub type Result<T> = std::result::Result<T, DecoderError>;
