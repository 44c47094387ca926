//! Maximum-likelihood sequence detection over the 4-state PR4 trellis.

pub mod branch;
pub mod decoder;
pub mod history;
pub mod lock;
pub mod traceback;
pub mod trellis;

pub use self::branch::{ReferenceLevels, Symbol};
pub use self::decoder::{DecodedBits, Decoder, Diagnostics, Pr4Decoder};
pub use self::history::{Depth16, Depth32, Depth64, Storage};
pub use self::lock::{LockBasis, LockEvent};
