//! Fixed-depth ring buffer of survivor decisions.

use std::fmt::Debug;

use crate::detect::trellis::Survivors;

/// Backing array of a survivor history, which fixes the traceback depth.
pub trait Storage: Copy + Debug {
    /// Number of samples of decisions retained. This is also the decoding delay.
    fn depth() -> usize;

    /// Construct empty storage.
    fn new() -> Self;

    fn slots(&self) -> &[Survivors];
    fn slots_mut(&mut self) -> &mut [Survivors];
}

macro_rules! storage_type {
    ($name: ident, $depth: expr) => {
        #[derive(Copy, Clone, Debug)]
        pub struct $name([Survivors; $depth]);

        impl Storage for $name {
            fn depth() -> usize { $depth }
            fn new() -> Self { $name([Survivors::default(); $depth]) }
            fn slots(&self) -> &[Survivors] { &self.0[..] }
            fn slots_mut(&mut self) -> &mut [Survivors] { &mut self.0[..] }
        }
    };
}

storage_type!(Depth16, 16);
storage_type!(Depth32, 32);
storage_type!(Depth64, 64);

/// Ring buffer holding the decisions of the most recent `S::depth()` samples.
#[derive(Copy, Clone, Debug)]
pub struct History<S: Storage> {
    storage: S,
    /// Slot the next entry is written to.
    pos: usize,
    /// Number of valid entries.
    len: usize,
}

impl<S: Storage> History<S> {
    /// Construct a new, empty `History`.
    pub fn new() -> History<S> {
        History {
            storage: S::new(),
            pos: 0,
            len: 0,
        }
    }

    /// Discard all entries.
    pub fn reset(&mut self) {
        self.pos = 0;
        self.len = 0;
    }

    /// Number of valid entries.
    pub fn len(&self) -> usize { self.len }

    /// Whether no entries have been written since the last reset.
    pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Whether the window holds `S::depth()` entries.
    pub fn is_full(&self) -> bool { self.len == S::depth() }

    /// Record the decisions of one sample, overwriting the oldest entry once full.
    pub fn push(&mut self, surv: Survivors) {
        self.storage.slots_mut()[self.pos] = surv;

        self.pos += 1;
        self.pos %= S::depth();

        if self.len < S::depth() {
            self.len += 1;
        }
    }

    /// Iterate over the valid entries from newest to oldest.
    pub fn recent(&self) -> Recent<'_, S> {
        Recent {
            history: self,
            remain: self.len,
        }
    }
}

impl<S: Storage> Default for History<S> {
    fn default() -> Self { History::new() }
}

/// Iterates over the valid entries of a `History`, newest first.
pub struct Recent<'a, S: Storage + 'a> {
    history: &'a History<S>,
    /// Number of entries still to yield.
    remain: usize,
}

impl<'a, S: Storage> Iterator for Recent<'a, S> {
    type Item = Survivors;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remain == 0 {
            return None;
        }

        // Age of the yielded entry, starting at 1 for the newest.
        let age = self.history.len - self.remain + 1;
        self.remain -= 1;

        let slot = (self.history.pos + S::depth() - age) % S::depth();
        Some(self.history.storage.slots()[slot])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remain, Some(self.remain))
    }
}

impl<'a, S: Storage> ExactSizeIterator for Recent<'a, S> {}
