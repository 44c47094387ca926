//! Hysteresis lock detection from the minimum path metric or its growth.

use crate::consts::PathMetric;

#[cfg(feature = "ser")]
use serde_derive::{Deserialize, Serialize};

/// Quantity compared against the lock threshold each sample.
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LockBasis {
    /// Minimum path metric after normalization. This keeps growing on a noisy channel
    /// until the normalizer rebases it, so it only tracks quality when the normalize
    /// threshold sits well below the lock threshold.
    MinimumMetric,
    /// Growth of the minimum path metric over the last sample, which is the cost of the
    /// newest branch on the best path.
    MinimumIncrement,
}

impl Default for LockBasis {
    fn default() -> Self { LockBasis::MinimumIncrement }
}

/// Change in lock state.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum LockEvent {
    /// The counter saturated.
    Acquired,
    /// A sample violated the threshold while locked.
    Lost,
}

/// Counts consecutive converged samples up to a cap.
#[derive(Copy, Clone, Debug)]
pub struct LockDetector {
    /// Metric must be strictly below this to count.
    threshold: PathMetric,
    /// Counter value that declares lock.
    window: usize,
    /// Consecutive converged samples, saturating at `window`.
    count: usize,
}

impl LockDetector {
    /// Construct a new `LockDetector` with the given threshold and window.
    pub fn new(threshold: PathMetric, window: usize) -> LockDetector {
        debug_assert!(window > 0);

        LockDetector {
            threshold: threshold,
            window: window,
            count: 0,
        }
    }

    /// Metric bound in effect.
    pub fn threshold(&self) -> PathMetric { self.threshold }

    /// Change the metric bound, keeping the counter.
    pub fn set_threshold(&mut self, threshold: PathMetric) { self.threshold = threshold; }

    /// Clear the counter.
    pub fn reset(&mut self) { self.count = 0; }

    /// Whether the counter has saturated.
    pub fn locked(&self) -> bool { self.count == self.window }

    /// Current counter value.
    pub fn count(&self) -> usize { self.count }

    /// Evaluate one sample's metric and return the lock transition it caused, if any.
    pub fn feed(&mut self, metric: PathMetric) -> Option<LockEvent> {
        let was = self.locked();

        if metric < self.threshold {
            if self.count < self.window {
                self.count += 1;
            }
        } else {
            self.count = 0;
        }

        match (was, self.locked()) {
            (false, true) => Some(LockEvent::Acquired),
            (true, false) => Some(LockEvent::Lost),
            _ => None,
        }
    }
}
