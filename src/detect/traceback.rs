//! Traceback over the survivor history.
//!
//! The engine stays idle until the history already holds a full window when a sample
//! arrives. From then on every sample is followed by one walk of exactly `depth`
//! decisions back from the best state, which yields the input bit of the sample that
//! left the window, so each bit comes out a fixed `depth` samples after its sample.

use crate::detect::history::{History, Recent, Storage};
use crate::detect::trellis;

/// Traceback phase.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Phase {
    /// Waiting for the history to fill.
    Idle,
    /// Producing one bit per sample.
    Running,
}

/// Decides when tracebacks run and performs them.
#[derive(Copy, Clone, Debug)]
pub struct Traceback {
    phase: Phase,
}

impl Traceback {
    /// Construct a new `Traceback` in the idle phase.
    pub fn new() -> Traceback {
        Traceback {
            phase: Phase::Idle,
        }
    }

    /// Get the current phase.
    pub fn phase(&self) -> Phase { self.phase }

    /// Return to the idle phase, dropping the pending window.
    pub fn reset(&mut self) { self.phase = Phase::Idle; }

    /// Check whether the sample about to be recorded completes priming. This must be
    /// called before the sample's decisions are pushed into the history.
    pub fn arm<S: Storage>(&mut self, history: &History<S>) {
        if history.is_full() {
            self.phase = Phase::Running;
        }
    }

    /// Trace back from the given origin state once running and return the oldest bit on
    /// the traced path.
    pub fn decode<S: Storage>(&self, history: &History<S>, origin: usize) -> Option<bool> {
        match self.phase {
            Phase::Idle => None,
            Phase::Running => Path::new(history, origin).last().map(trellis::input),
        }
    }
}

impl Default for Traceback {
    fn default() -> Self { Traceback::new() }
}

/// Iterates over the states of a survivor path from newest to oldest. The origin state
/// isn't yielded; each item is the predecessor selected by the next older decision.
pub struct Path<'a, S: Storage + 'a> {
    entries: Recent<'a, S>,
    state: usize,
}

impl<'a, S: Storage> Path<'a, S> {
    /// Construct a new `Path` walking back from the given state.
    pub fn new(history: &'a History<S>, origin: usize) -> Path<'a, S> {
        Path {
            entries: history.recent(),
            state: origin,
        }
    }
}

impl<'a, S: Storage> Iterator for Path<'a, S> {
    type Item = usize;

    fn next(&mut self) -> Option<Self::Item> {
        let surv = self.entries.next()?;
        self.state = trellis::predecessor(self.state, surv.get(self.state));
        Some(self.state)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::detect::history::Depth16;
    use crate::detect::trellis::Survivors;

    /// Record the decisions a noiseless decoder would make along the given bits, with
    /// every state pointing at its true predecessor on that path.
    fn record(bits: &[bool]) -> (History<Depth16>, usize) {
        let mut history = History::new();
        let mut state = 0;

        for &bit in bits {
            let next = trellis::next_state(state, bit);
            let pick = trellis::predecessor(next, true) == state;

            // Only the decision of the state on the path matters for the walk.
            history.push(Survivors::new((pick as u8) << next));
            state = next;
        }

        (history, state)
    }

    #[test]
    fn test_path() {
        let bits = [true, false, true, true, false, false, true, false];
        let (history, end) = record(&bits);

        let states: Vec<usize> = Path::new(&history, end).collect();
        assert_eq!(states.len(), bits.len());

        // Walking back the whole record ends at the reset state.
        assert_eq!(*states.last().unwrap(), 0);

        // Each state carries the bit that led into it.
        let decoded: Vec<bool> = states.iter().rev().skip(1).map(|&s| trellis::input(s))
            .chain(Some(trellis::input(end)))
            .collect();

        assert_eq!(&decoded[..], &bits[..]);
    }

    #[test]
    fn test_phase() {
        let mut tb = Traceback::new();
        let mut history = History::<Depth16>::new();

        for _ in 0..16 {
            tb.arm(&history);
            assert_eq!(tb.phase(), Phase::Idle);
            history.push(Survivors::new(0));
            assert!(tb.decode(&history, 0).is_none());
        }

        tb.arm(&history);
        assert_eq!(tb.phase(), Phase::Running);
        history.push(Survivors::new(0));
        assert_eq!(tb.decode(&history, 0), Some(false));

        tb.reset();
        assert_eq!(tb.phase(), Phase::Idle);
        assert!(tb.decode(&history, 0).is_none());
    }

    #[test]
    fn test_window() {
        // 20 bits into a 16-deep history: the walk reaches the state after bit 3, so
        // the decoded bit is bits[3].
        let bits = [
            true, true, false, true, false, false, true, true, true, false,
            false, true, false, true, true, false, false, false, true, false,
        ];
        let (history, end) = record(&bits);

        assert_eq!(Path::new(&history, end).count(), 16);

        let mut tb = Traceback::new();
        tb.arm(&history);
        assert_eq!(tb.decode(&history, end), Some(bits[3]));
    }
}
