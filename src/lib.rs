//! Streaming PR4 (partial response class 4) Viterbi detector for magnetic read
//! channels. Equalized samples go in one per tick; decoded bits come out a fixed
//! traceback depth later, alongside a hysteresis lock indicator.

pub mod bits;
pub mod channel;
pub mod config;
pub mod consts;
pub mod detect;
pub mod error;
pub mod receiver;
pub mod stats;

pub use config::Config;
pub use detect::{Decoder, Pr4Decoder, ReferenceLevels};
pub use error::{DecoderError, Result};
