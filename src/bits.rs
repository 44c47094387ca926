//! Utilities for packing/unpacking decoded bits into/out of bytes, MSB first.

/// Iterates over the bits of a byte source, MSB to LSB.
pub struct Bits<T: Iterator<Item = u8>> {
    src: T,
    /// Current byte.
    byte: u8,
    /// Bits of the current byte still to yield.
    remain: usize,
}

impl<T: Iterator<Item = u8>> Bits<T> {
    /// Construct a new `Bits` over the given bytes.
    pub fn new(src: T) -> Bits<T> {
        Bits {
            src: src,
            byte: 0,
            remain: 0,
        }
    }
}

impl<T: Iterator<Item = u8>> Iterator for Bits<T> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remain == 0 {
            self.byte = self.src.next()?;
            self.remain = 8;
        }

        self.remain -= 1;

        Some(self.byte >> self.remain & 1 == 1)
    }
}

/// Accumulates bits into bytes, MSB first.
#[derive(Copy, Clone, Debug, Default)]
pub struct BytePacker {
    buf: u8,
    /// Bits in the current byte.
    pos: usize,
}

impl BytePacker {
    /// Construct a new `BytePacker` with an empty byte.
    pub fn new() -> BytePacker {
        BytePacker {
            buf: 0,
            pos: 0,
        }
    }

    /// Drop any partial byte.
    pub fn reset(&mut self) {
        self.buf = 0;
        self.pos = 0;
    }

    /// Add a bit and return the completed byte, if any. The packer is reset once `Some`
    /// is returned.
    pub fn feed(&mut self, bit: bool) -> Option<u8> {
        self.buf = self.buf << 1 | bit as u8;
        self.pos += 1;

        if self.pos == 8 {
            let byte = self.buf;
            self.reset();
            Some(byte)
        } else {
            None
        }
    }
}

/// Groups bits into full bytes. A trailing partial byte is dropped.
pub struct BitBytes<T: Iterator<Item = bool>> {
    src: T,
    packer: BytePacker,
}

impl<T: Iterator<Item = bool>> BitBytes<T> {
    /// Construct a new `BitBytes` over the given bits.
    pub fn new(src: T) -> BitBytes<T> {
        BitBytes {
            src: src,
            packer: BytePacker::new(),
        }
    }
}

impl<T: Iterator<Item = bool>> Iterator for BitBytes<T> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(byte) = self.packer.feed(self.src.next()?) {
                return Some(byte);
            }
        }
    }
}
