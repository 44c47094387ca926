//! Noiseless PR4 channel model, `y[n] = x[n] - x[n-2]` with `x[n]` in {-1, +1}, for
//! synthesizing ideal equalized samples from bits.
//!
//! Both forms start from the trellis reset state, as if two 0 bits (`x = -1`) preceded
//! the stream.

use crate::consts::Sample;
use crate::detect::branch::{ReferenceLevels, Symbol};
use crate::detect::trellis;

/// FIR form of the channel.
pub struct Pr4Filter {
    /// A ring buffer of channel inputs, represents x[i].
    history: [i32; 3],
    /// The index of the slot the next input goes into.
    idx: usize,
}

impl Pr4Filter {
    /// Impulse response of the channel, most recent input first.
    const TAPS: [i32; 3] = [1, 0, -1];

    /// Construct a new `Pr4Filter` with a history of -1 inputs.
    pub fn new() -> Pr4Filter {
        Pr4Filter {
            history: [-1; 3],
            idx: 0,
        }
    }

    /// Perform the convolution with the current history. Calculates
    /// y[n] = x[n] - x[n-2].
    fn calc(&self) -> i32 {
        let len = self.history.len();
        // Copy the current index so we can move backwards.
        let mut cur = self.idx;

        Self::TAPS.iter().fold(0, |s, &tap| {
            // Wrap around to the last slot after visiting the first.
            cur = (cur + len - 1) % len;
            s + tap * self.history[cur]
        })
    }

    /// Add an input (-1 or +1) to the history and calculate the channel output.
    pub fn feed(&mut self, x: i32) -> i32 {
        debug_assert!(x == -1 || x == 1);

        self.history[self.idx] = x;

        self.idx += 1;
        self.idx %= self.history.len();

        self.calc()
    }
}

impl Default for Pr4Filter {
    fn default() -> Self { Pr4Filter::new() }
}

/// Trellis form of the channel.
#[derive(Copy, Clone, Debug, Default)]
pub struct Pr4Channel {
    /// Current trellis state.
    state: usize,
}

impl Pr4Channel {
    /// Construct a new `Pr4Channel` at the reset state.
    pub fn new() -> Pr4Channel {
        Pr4Channel {
            state: 0,
        }
    }

    /// Current trellis state.
    pub fn state(&self) -> usize { self.state }

    /// Apply the given bit and return the channel output on the transition.
    pub fn feed(&mut self, bit: bool) -> Symbol {
        let out = trellis::output(self.state, bit);
        self.state = trellis::next_state(self.state, bit);
        out
    }
}

/// Yields the ideal sample for each bit of a source.
pub struct Pr4Samples<T> {
    channel: Pr4Channel,
    levels: ReferenceLevels,
    /// The bit source to iterate over.
    src: T,
}

impl<T: Iterator<Item = bool>> Pr4Samples<T> {
    /// Construct a new `Pr4Samples` over the given bits at the given levels.
    pub fn new(src: T, levels: ReferenceLevels) -> Pr4Samples<T> {
        Pr4Samples {
            channel: Pr4Channel::new(),
            levels: levels,
            src: src,
        }
    }
}

impl<T: Iterator<Item = bool>> Iterator for Pr4Samples<T> {
    type Item = Sample;

    fn next(&mut self) -> Option<Self::Item> {
        let bit = self.src.next()?;
        Some(self.levels.level(self.channel.feed(bit)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.src.size_hint()
    }
}
