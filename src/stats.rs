//! Runtime statistics.

#[cfg(feature = "ser")]
use serde_derive::{Deserialize, Serialize};

use crate::detect::lock::LockEvent;

/// Counters kept by a decoder over its lifetime. Resets don't clear them.
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct DecoderStats {
    /// Samples run through the trellis.
    pub samples: usize,
    /// Ticks without a valid sample.
    pub skipped: usize,
    /// Decoded bits emitted.
    pub bits: usize,
    /// Times the path metrics were rebased.
    pub normalizations: usize,
    /// Times lock was acquired.
    pub locks_acquired: usize,
    /// Times lock was lost.
    pub locks_lost: usize,
    /// Resets applied.
    pub resets: usize,
}

impl DecoderStats {
    /// Record a lock transition.
    pub fn record_lock(&mut self, event: LockEvent) {
        match event {
            LockEvent::Acquired => self.locks_acquired += 1,
            LockEvent::Lost => self.locks_lost += 1,
        }
    }

    /// Merge in the stats from the given object and reset the other stats back to
    /// default.
    pub fn merge<T: HasStats>(&mut self, other: &mut T) {
        let stats = other.stats();

        self.samples += stats.samples;
        self.skipped += stats.skipped;
        self.bits += stats.bits;
        self.normalizations += stats.normalizations;
        self.locks_acquired += stats.locks_acquired;
        self.locks_lost += stats.locks_lost;
        self.resets += stats.resets;

        stats.clear();
    }

    /// Clear all stats.
    pub fn clear(&mut self) {
        *self = DecoderStats::default();
    }
}

/// Indicates that a type captures statistics.
pub trait HasStats {
    /// Retrieve captured statistics.
    fn stats(&mut self) -> &mut DecoderStats;
}

impl HasStats for DecoderStats {
    fn stats(&mut self) -> &mut DecoderStats { self }
}
