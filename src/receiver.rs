//! Tick-level front end of a decoder for downstream sync and address mark detectors.

use log::info;

use crate::bits::BytePacker;
use crate::consts::Sample;
use crate::detect::decoder::Decoder;
use crate::detect::history::{Depth32, Storage};
use crate::detect::lock::LockEvent;
use crate::stats::{DecoderStats, HasStats};

/// Outputs of one channel tick.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Tick {
    /// Decoded bit emitted on this tick.
    pub bit: Option<bool>,
    /// Byte completed by the decoded bit, MSB first.
    pub byte: Option<u8>,
    /// Lock transition caused by this tick.
    pub lock: Option<LockEvent>,
}

/// Drives a decoder from validity-flagged ticks and packs its bits into bytes.
#[derive(Clone, Debug)]
pub struct Receiver<S: Storage = Depth32> {
    decoder: Decoder<S>,
    packer: BytePacker,
}

impl<S: Storage> Receiver<S> {
    /// Create a new `Receiver` around the given decoder.
    pub fn new(decoder: Decoder<S>) -> Receiver<S> {
        Receiver {
            decoder: decoder,
            packer: BytePacker::new(),
        }
    }

    /// Get the wrapped decoder, such as for diagnostics.
    pub fn decoder(&self) -> &Decoder<S> { &self.decoder }

    /// Reset the decoder and drop any partial byte, such as when the channel is
    /// reinitialized.
    pub fn reset(&mut self) {
        self.decoder.reset();
        self.packer.reset();
    }

    /// Handle one tick, where `None` marks a tick without a valid sample.
    pub fn feed(&mut self, s: Option<Sample>) -> Tick {
        let bit = self.decoder.tick(s);
        let lock = self.decoder.last_event();

        match lock {
            Some(LockEvent::Acquired) => info!("channel locked"),
            Some(LockEvent::Lost) => info!("channel lost lock"),
            None => {},
        }

        Tick {
            bit: bit,
            byte: bit.and_then(|b| self.packer.feed(b)),
            lock: lock,
        }
    }
}

impl<S: Storage> Default for Receiver<S> {
    fn default() -> Self { Receiver::new(Decoder::default()) }
}

impl<S: Storage> HasStats for Receiver<S> {
    fn stats(&mut self) -> &mut DecoderStats { self.decoder.stats() }
}
