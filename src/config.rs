//! Runtime decoder configuration.

use crate::consts::{PathMetric, LOCK_THRESHOLD, LOCK_WINDOW, NORMALIZE_THRESHOLD};
use crate::detect::branch::ReferenceLevels;
use crate::detect::lock::LockBasis;
use crate::error::{DecoderError, Result};

#[cfg(feature = "ser")]
use serde_derive::{Deserialize, Serialize};

/// Parameters of one decoder instance. Levels change with the channel rate or format;
/// the rest is fixed per deployment.
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Ideal equalized levels of the three PR4 symbols.
    pub levels: ReferenceLevels,
    /// Path metrics are rebased once their minimum exceeds this.
    pub normalize_threshold: PathMetric,
    /// Lock metric must be strictly below this for a sample to count towards lock.
    /// `None` derives it from the levels and lock basis, see `lock_limit`.
    pub lock_threshold: Option<PathMetric>,
    /// Consecutive converged samples that declare lock.
    pub lock_window: usize,
    /// Quantity the lock detector evaluates.
    pub lock_basis: LockBasis,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            levels: ReferenceLevels::default(),
            normalize_threshold: NORMALIZE_THRESHOLD,
            lock_threshold: None,
            lock_window: LOCK_WINDOW,
            lock_basis: LockBasis::default(),
        }
    }
}

impl Config {
    pub fn with_levels(mut self, levels: ReferenceLevels) -> Self {
        self.levels = levels;
        self
    }

    pub fn with_normalize_threshold(mut self, threshold: PathMetric) -> Self {
        self.normalize_threshold = threshold;
        self
    }

    pub fn with_lock_threshold(mut self, threshold: PathMetric) -> Self {
        self.lock_threshold = Some(threshold);
        self
    }

    pub fn with_lock_window(mut self, window: usize) -> Self {
        self.lock_window = window;
        self
    }

    pub fn with_lock_basis(mut self, basis: LockBasis) -> Self {
        self.lock_basis = basis;
        self
    }

    /// Lock threshold in effect. Without an explicit threshold, the increment basis
    /// accepts up to half the squared level spacing, the cost of a sample halfway between
    /// two adjacent levels.
    pub fn lock_limit(&self) -> PathMetric {
        match (self.lock_threshold, self.lock_basis) {
            (Some(threshold), _) => threshold,
            (None, LockBasis::MinimumIncrement) => {
                let gap = self.levels.spacing().max(0) as PathMetric;
                gap * gap / 2
            },
            (None, LockBasis::MinimumMetric) => LOCK_THRESHOLD,
        }
    }

    /// Verify every parameter is usable.
    pub fn validate(&self) -> Result<()> {
        self.levels.validate()?;

        if self.lock_window == 0 {
            return Err(DecoderError::EmptyLockWindow);
        }

        // Headroom above the threshold keeps ACS sums from saturating.
        if self.normalize_threshold > NORMALIZE_THRESHOLD {
            return Err(DecoderError::ThresholdTooLarge(self.normalize_threshold));
        }

        Ok(())
    }
}
