//! Branch metric unit: scores each sample against the three PR4 reference levels.

use std::cmp;

use crate::consts::{
    BranchMetric, Sample, BRANCH_METRIC_MAX, SAMPLE_MAX, SAMPLE_MIN, UNIT_AMPLITUDE,
};
use crate::error::{DecoderError, Result};

#[cfg(feature = "ser")]
use serde_derive::{Deserialize, Serialize};

/// Noiseless output of the PR4 channel, `x[n] - x[n-2]` for `x` in {-1, +1}.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Symbol {
    /// -2
    Minus,
    /// 0
    Zero,
    /// +2
    Plus,
}

impl Symbol {
    /// Channel output for the given current bit and the bit two periods earlier.
    pub fn from_bits(cur: bool, prev2: bool) -> Symbol {
        match (cur, prev2) {
            (true, false) => Symbol::Plus,
            (false, true) => Symbol::Minus,
            _ => Symbol::Zero,
        }
    }

    /// Integer value of the symbol.
    pub fn value(&self) -> i32 {
        match *self {
            Symbol::Minus => -2,
            Symbol::Zero => 0,
            Symbol::Plus => 2,
        }
    }

    fn idx(&self) -> usize {
        match *self {
            Symbol::Minus => 0,
            Symbol::Zero => 1,
            Symbol::Plus => 2,
        }
    }
}

/// Ideal sample values of the three PR4 symbols after equalization.
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct ReferenceLevels {
    /// Level of the -2 symbol.
    pub minus: Sample,
    /// Level of the 0 symbol.
    pub zero: Sample,
    /// Level of the +2 symbol.
    pub plus: Sample,
}

impl ReferenceLevels {
    /// Construct a new `ReferenceLevels` from the -2, 0, and +2 levels.
    pub fn new(minus: Sample, zero: Sample, plus: Sample) -> ReferenceLevels {
        ReferenceLevels {
            minus: minus,
            zero: zero,
            plus: plus,
        }
    }

    /// Levels at the raw symbol values {-2, 0, +2}.
    pub fn unit() -> ReferenceLevels {
        ReferenceLevels::new(-2, 0, 2)
    }

    /// Get the level of the given symbol.
    pub fn level(&self, sym: Symbol) -> Sample {
        match sym {
            Symbol::Minus => self.minus,
            Symbol::Zero => self.zero,
            Symbol::Plus => self.plus,
        }
    }

    /// Smallest gap between adjacent levels.
    pub fn spacing(&self) -> i32 {
        let low = self.zero as i32 - self.minus as i32;
        let high = self.plus as i32 - self.zero as i32;

        low.min(high)
    }

    /// Verify the levels are ordered and inside the sample window.
    pub fn validate(&self) -> Result<()> {
        for &l in &[self.minus, self.zero, self.plus] {
            if l < SAMPLE_MIN || l > SAMPLE_MAX {
                return Err(DecoderError::LevelOutOfRange(l));
            }
        }

        if self.minus < self.zero && self.zero < self.plus {
            Ok(())
        } else {
            Err(DecoderError::UnorderedLevels)
        }
    }
}

impl Default for ReferenceLevels {
    fn default() -> Self {
        ReferenceLevels::new(-2 * UNIT_AMPLITUDE, 0, 2 * UNIT_AMPLITUDE)
    }
}

/// Clip the given sample into the accepted sample window.
pub fn clip(s: Sample) -> Sample {
    num::clamp(s, SAMPLE_MIN, SAMPLE_MAX)
}

/// Squared distance between a (clipped) sample and a level, saturated at the branch
/// metric width.
fn distance(s: Sample, level: Sample) -> BranchMetric {
    let diff = clip(s) as i32 - level as i32;
    cmp::min((diff * diff) as BranchMetric, BRANCH_METRIC_MAX)
}

/// Branch metrics of one sample, one per symbol.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct BranchMetrics([BranchMetric; 3]);

impl BranchMetrics {
    /// Score the given sample against each of the given levels.
    pub fn new(s: Sample, levels: &ReferenceLevels) -> BranchMetrics {
        BranchMetrics([
            distance(s, levels.minus),
            distance(s, levels.zero),
            distance(s, levels.plus),
        ])
    }

    /// Get the metric of the branch that would output the given symbol.
    pub fn get(&self, sym: Symbol) -> BranchMetric {
        self.0[sym.idx()]
    }
}
