//! The 4-state PR4 trellis: transition table, add-compare-select update, and path
//! metric normalization.
//!
//! A state holds the last two decided bits, newest in the high position, so state
//! `b1 b0` moves to `i b1` on input bit `i` while the channel outputs `2 * (i - b0)`.

use collect_slice::CollectSlice;

use crate::consts::{PathMetric, STATES};
use crate::detect::branch::{BranchMetrics, Symbol};

use self::Symbol::*;

/// An incoming trellis edge.
#[derive(Copy, Clone, Debug)]
pub struct Branch {
    /// State the edge leaves from.
    pub prev: usize,
    /// Channel output on the edge.
    pub output: Symbol,
}

/// Incoming edges of each state, lower-numbered predecessor first.
const PREDECESSORS: [[Branch; 2]; STATES] = [
    [Branch { prev: 0, output: Zero }, Branch { prev: 1, output: Minus }],
    [Branch { prev: 2, output: Zero }, Branch { prev: 3, output: Minus }],
    [Branch { prev: 0, output: Plus }, Branch { prev: 1, output: Zero }],
    [Branch { prev: 2, output: Plus }, Branch { prev: 3, output: Zero }],
];

/// Get the two incoming edges of the given state.
pub fn predecessors(state: usize) -> &'static [Branch; 2] {
    &PREDECESSORS[state]
}

/// Get the predecessor of the given state selected by the given survivor bit.
pub fn predecessor(state: usize, survivor: bool) -> usize {
    PREDECESSORS[state][survivor as usize].prev
}

/// State reached from the given state on the given input bit.
pub fn next_state(state: usize, bit: bool) -> usize {
    (bit as usize) << 1 | state >> 1
}

/// Channel output on the transition from the given state on the given input bit.
pub fn output(state: usize, bit: bool) -> Symbol {
    Symbol::from_bits(bit, state & 1 == 1)
}

/// Input bit that leads into the given state.
pub fn input(state: usize) -> bool {
    state >> 1 == 1
}

/// Survivor decisions of one sample: bit `s` selects the predecessor of state `s`.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct Survivors(u8);

impl Survivors {
    /// Construct a new `Survivors` from the 4 given bits in the LSB position.
    pub fn new(bits: u8) -> Survivors {
        assert!(bits >> STATES == 0);
        Survivors(bits)
    }

    /// Get the wrapped decisions, which are guaranteed to have only 4 LSBs.
    pub fn bits(&self) -> u8 { self.0 }

    /// Get the decision for the given state.
    pub fn get(&self, state: usize) -> bool { (self.0 >> state) & 1 == 1 }
}

/// Accumulated cost of the best path into each state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct PathMetrics([PathMetric; STATES]);

impl PathMetrics {
    /// Construct a new `PathMetrics` with every state at zero cost.
    pub fn new() -> PathMetrics {
        PathMetrics([0; STATES])
    }

    /// Construct a `PathMetrics` from the given per-state costs.
    pub fn from_metrics(metrics: [PathMetric; STATES]) -> PathMetrics {
        PathMetrics(metrics)
    }

    /// Get the per-state costs.
    pub fn metrics(&self) -> &[PathMetric; STATES] { &self.0 }

    /// Get the cost of the given state.
    pub fn get(&self, state: usize) -> PathMetric { self.0[state] }

    /// Get the state with the lowest cost and that cost. Ties go to the lowest state.
    pub fn best(&self) -> (usize, PathMetric) {
        self.0.iter().enumerate().fold((0, PathMetric::MAX), |(best, min), (s, &m)| {
            if m < min {
                (s, m)
            } else {
                (best, min)
            }
        })
    }

    /// Get the lowest cost over all states.
    pub fn min(&self) -> PathMetric { self.best().1 }

    /// Run add-compare-select for every state with the given branch metrics and return
    /// the survivor decisions. Ties keep the lower-numbered predecessor.
    pub fn update(&mut self, bm: &BranchMetrics) -> Survivors {
        let mut next = [(0, false); STATES];

        (0..STATES).map(|s| self.select(s, bm)).collect_slice_checked(&mut next[..]);

        next.iter().enumerate().fold(Survivors(0), |surv, (s, &(metric, pick))| {
            self.0[s] = metric;
            Survivors(surv.0 | (pick as u8) << s)
        })
    }

    /// Pick the cheaper incoming edge of the given state.
    fn select(&self, state: usize, bm: &BranchMetrics) -> (PathMetric, bool) {
        let [a, b] = PREDECESSORS[state];

        let ca = self.0[a.prev].saturating_add(bm.get(a.output));
        let cb = self.0[b.prev].saturating_add(bm.get(b.output));

        if cb < ca {
            (cb, true)
        } else {
            (ca, false)
        }
    }

    /// Subtract the minimum from every cost if it exceeds the given threshold. Return
    /// whether the metrics were rebased.
    pub fn normalize(&mut self, threshold: PathMetric) -> bool {
        let min = self.min();

        if min <= threshold {
            return false;
        }

        for m in self.0.iter_mut() {
            *m -= min;
        }

        true
    }
}

impl Default for PathMetrics {
    fn default() -> Self { PathMetrics::new() }
}
