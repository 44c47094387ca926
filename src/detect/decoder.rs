//! Streaming PR4 Viterbi decoder combining the branch metric unit, trellis, survivor
//! history, traceback, and lock detector.

use log::{debug, trace};

#[cfg(feature = "ser")]
use serde_derive::{Deserialize, Serialize};

use crate::config::Config;
use crate::consts::{PathMetric, Sample, STATES};
use crate::detect::branch::{BranchMetrics, ReferenceLevels};
use crate::detect::history::{Depth32, History, Storage};
use crate::detect::lock::{LockBasis, LockDetector, LockEvent};
use crate::detect::traceback::Traceback;
use crate::detect::trellis::PathMetrics;
use crate::error::Result;
use crate::stats::{DecoderStats, HasStats};

/// Decoder with the default 32-sample traceback depth.
pub type Pr4Decoder = Decoder<Depth32>;

/// Snapshot of the decoder's externally visible state.
#[cfg_attr(feature = "ser", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Diagnostics {
    /// Per-state path metrics.
    pub metrics: [PathMetric; STATES],
    /// Lowest path metric.
    pub min_metric: PathMetric,
    /// State holding the lowest path metric.
    pub best_state: usize,
    /// Lock indicator.
    pub locked: bool,
    /// Lock hysteresis counter.
    pub lock_count: usize,
}

/// Maximum-likelihood sequence detector for one PR4 channel. Each fed sample advances
/// every stage exactly once, and decoded bits come out `S::depth()` samples after the
/// sample responsible for them.
#[derive(Clone, Debug)]
pub struct Decoder<S: Storage = Depth32> {
    config: Config,
    metrics: PathMetrics,
    history: History<S>,
    traceback: Traceback,
    lock: LockDetector,
    /// Lowest path metric after the previous sample.
    min: PathMetric,
    /// State holding `min`.
    best: usize,
    /// Lock transition caused by the most recent tick.
    event: Option<LockEvent>,
    stats: DecoderStats,
}

impl<S: Storage> Decoder<S> {
    /// Construct a new `Decoder` with the given configuration.
    pub fn new(config: Config) -> Result<Decoder<S>> {
        config.validate()?;
        Ok(Decoder::build(config))
    }

    /// Construct a `Decoder` from an already validated configuration.
    fn build(config: Config) -> Decoder<S> {
        Decoder {
            config: config,
            metrics: PathMetrics::new(),
            history: History::new(),
            traceback: Traceback::new(),
            lock: LockDetector::new(config.lock_limit(), config.lock_window),
            min: 0,
            best: 0,
            event: None,
            stats: DecoderStats::default(),
        }
    }

    /// Restore the initial state, discarding the in-progress traceback window without
    /// emitting its bits.
    pub fn reset(&mut self) {
        self.metrics = PathMetrics::new();
        self.history.reset();
        self.traceback.reset();
        self.lock.reset();
        self.min = 0;
        self.best = 0;
        self.event = None;
        self.stats.resets += 1;

        debug!("decoder reset after {} samples", self.stats.samples);
    }

    /// Change the reference levels, such as after a data rate or format change.
    pub fn set_levels(&mut self, levels: ReferenceLevels) -> Result<()> {
        levels.validate()?;

        debug!("reference levels changed from {:?} to {:?}", self.config.levels, levels);
        self.config.levels = levels;
        self.lock.set_threshold(self.config.lock_limit());

        Ok(())
    }

    /// Feed one equalized sample through the trellis, possibly yielding the decoded bit
    /// of the sample `S::depth()` samples earlier.
    pub fn feed(&mut self, s: Sample) -> Option<bool> {
        let bm = BranchMetrics::new(s, &self.config.levels);
        let surv = self.metrics.update(&bm);

        let grown = self.metrics.min().saturating_sub(self.min);

        if self.metrics.normalize(self.config.normalize_threshold) {
            self.stats.normalizations += 1;
            trace!("path metrics rebased to {:?}", self.metrics.metrics());
        }

        let (best, min) = self.metrics.best();
        self.best = best;
        self.min = min;

        let converge = match self.config.lock_basis {
            LockBasis::MinimumMetric => min,
            LockBasis::MinimumIncrement => grown,
        };

        self.event = self.lock.feed(converge);

        if let Some(event) = self.event {
            self.stats.record_lock(event);
            debug!("{:?} lock at sample {} (metric {})", event, self.stats.samples, converge);
        }

        self.traceback.arm(&self.history);
        self.history.push(surv);

        let bit = self.traceback.decode(&self.history, best);

        self.stats.samples += 1;

        if bit.is_some() {
            self.stats.bits += 1;
        }

        bit
    }

    /// Handle one channel tick, where `None` marks a tick without a valid sample. Invalid
    /// ticks leave every stage untouched.
    pub fn tick(&mut self, s: Option<Sample>) -> Option<bool> {
        match s {
            Some(s) => self.feed(s),
            None => {
                self.stats.skipped += 1;
                self.event = None;
                None
            },
        }
    }

    /// Decode the given sample source, yielding only decoded bits.
    pub fn decode<T>(self, src: T) -> DecodedBits<S, T::IntoIter> where
        T: IntoIterator<Item = Sample>
    {
        DecodedBits::new(self, src.into_iter())
    }

    /// Traceback depth, which is also the decoding delay in samples.
    pub fn depth(&self) -> usize { S::depth() }

    /// Whether the survivor history is full, so the next sample produces a bit.
    pub fn primed(&self) -> bool { self.history.is_full() }

    /// Active configuration.
    pub fn config(&self) -> &Config { &self.config }

    /// Current per-state path metrics.
    pub fn metrics(&self) -> &[PathMetric; STATES] { self.metrics.metrics() }

    /// Lowest path metric.
    pub fn min_metric(&self) -> PathMetric { self.min }

    /// State holding the lowest path metric, lowest index on ties.
    pub fn best_state(&self) -> usize { self.best }

    /// Lock indicator.
    pub fn locked(&self) -> bool { self.lock.locked() }

    /// Lock hysteresis counter.
    pub fn lock_count(&self) -> usize { self.lock.count() }

    /// Lock transition caused by the most recent tick, if any.
    pub fn last_event(&self) -> Option<LockEvent> { self.event }

    /// Snapshot of the metrics and lock state, such as for a per-channel monitor.
    pub fn diagnostics(&self) -> Diagnostics {
        Diagnostics {
            metrics: *self.metrics.metrics(),
            min_metric: self.min,
            best_state: self.best,
            locked: self.locked(),
            lock_count: self.lock_count(),
        }
    }
}

impl<S: Storage> Default for Decoder<S> {
    fn default() -> Self { Decoder::build(Config::default()) }
}

impl<S: Storage> HasStats for Decoder<S> {
    fn stats(&mut self) -> &mut DecoderStats { &mut self.stats }
}

/// Runs a sample source through a decoder and yields the decoded bits.
pub struct DecodedBits<S: Storage, T: Iterator<Item = Sample>> {
    decoder: Decoder<S>,
    /// Source of samples.
    src: T,
}

impl<S: Storage, T: Iterator<Item = Sample>> DecodedBits<S, T> {
    /// Construct a new `DecodedBits` over the given decoder and samples.
    pub fn new(decoder: Decoder<S>, src: T) -> DecodedBits<S, T> {
        DecodedBits {
            decoder: decoder,
            src: src,
        }
    }

    /// Get the underlying decoder.
    pub fn decoder(&self) -> &Decoder<S> { &self.decoder }

    /// Recover the underlying decoder.
    pub fn into_decoder(self) -> Decoder<S> { self.decoder }
}

impl<S: Storage, T: Iterator<Item = Sample>> Iterator for DecodedBits<S, T> {
    type Item = bool;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(bit) = self.decoder.feed(self.src.next()?) {
                return Some(bit);
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::channel::Pr4Samples;
    use crate::detect::history::Depth16;

    const PATTERN: &[bool] = &[true, false, true, true, false, false, true, false];

    /// Ideal samples of the given bits followed by `pad` zero bits.
    fn samples(bits: &[bool], pad: usize, levels: ReferenceLevels) -> Vec<Sample> {
        let src = bits.iter().cloned().chain(std::iter::repeat(false).take(pad));
        Pr4Samples::new(src, levels).collect()
    }

    fn unit_decoder<S: Storage>() -> Decoder<S> {
        Decoder::new(Config::default().with_levels(ReferenceLevels::unit())).unwrap()
    }

    #[test]
    fn test_pattern() {
        let mut d: Decoder = unit_decoder();
        let input = samples(PATTERN, 32, ReferenceLevels::unit());
        assert_eq!(&input[..8], &[2, 0, 0, 2, -2, -2, 2, 0]);

        let mut out = vec![];

        for (i, &s) in input.iter().enumerate() {
            match d.feed(s) {
                Some(bit) => {
                    // Each bit comes out exactly one depth after its sample.
                    assert!(i >= 32);
                    out.push(bit);
                },
                None => assert!(i < 32),
            }
        }

        assert_eq!(out.len(), input.len() - 32);
        assert_eq!(&out[..8], PATTERN);
        assert!(out[8..].iter().all(|&b| !b));
        assert_eq!(d.min_metric(), 0);
        assert_eq!(d.best_state(), 0);
    }

    #[test]
    fn test_default_levels() {
        let d = Pr4Decoder::default();
        let bits: Vec<bool> = d.decode(samples(PATTERN, 40, ReferenceLevels::default()))
            .collect();

        assert_eq!(bits.len(), 16);
        assert_eq!(&bits[..8], PATTERN);
    }

    #[test]
    fn test_depth() {
        let mut d: Decoder<Depth16> = unit_decoder();
        assert_eq!(d.depth(), 16);

        let input = samples(PATTERN, 16, ReferenceLevels::unit());
        let mut out = vec![];

        for (i, &s) in input.iter().enumerate() {
            assert_eq!(d.primed(), i >= 16);

            if let Some(bit) = d.feed(s) {
                out.push(bit);
            }
        }

        assert_eq!(&out[..], PATTERN);
    }

    #[test]
    fn test_lock() {
        let mut d: Decoder = unit_decoder();
        let input = samples(&[true, true], 100, ReferenceLevels::unit());

        for (i, &s) in input.iter().enumerate() {
            d.feed(s);
            assert_eq!(d.locked(), i >= 63);

            let edge = if i == 63 { Some(LockEvent::Acquired) } else { None };
            assert_eq!(d.last_event(), edge);
        }

        assert_eq!(d.lock_count(), 64);

        // A wild sample on a noiseless stream breaks lock immediately.
        d.feed(i16::MAX);
        assert!(!d.locked());
        assert_eq!(d.lock_count(), 0);
        assert_eq!(d.last_event(), Some(LockEvent::Lost));

        // Idle ticks report no transition.
        d.tick(None);
        assert_eq!(d.last_event(), None);

        let stats = d.stats();
        assert_eq!(stats.locks_acquired, 1);
        assert_eq!(stats.locks_lost, 1);
    }

    #[test]
    fn test_reset_before_primed() {
        let input = samples(PATTERN, 32, ReferenceLevels::unit());

        let mut d: Decoder = unit_decoder();

        for &s in &input[..20] {
            assert!(d.feed(s).is_none());
        }

        d.reset();
        assert!(!d.primed());
        assert_eq!(d.diagnostics(), unit_decoder::<Depth32>().diagnostics());

        let fresh: Vec<bool> = unit_decoder::<Depth32>().decode(input.iter().cloned())
            .collect();
        let after: Vec<bool> = d.decode(input.iter().cloned()).collect();

        assert_eq!(after, fresh);
    }

    #[test]
    fn test_tick() {
        let input = samples(PATTERN, 32, ReferenceLevels::unit());

        let mut a: Decoder = unit_decoder();
        let mut b: Decoder = unit_decoder();

        let mut out_a = vec![];
        let mut out_b = vec![];

        for &s in &input {
            out_a.extend(a.feed(s));

            // Gaps in validity don't shift the output.
            out_b.extend(b.tick(None));
            out_b.extend(b.tick(Some(s)));
        }

        assert_eq!(out_a, out_b);
        assert_eq!(b.stats().skipped, input.len());
        assert_eq!(b.stats().samples, input.len());
        assert_eq!(b.stats().bits, input.len() - 32);
    }

    #[test]
    fn test_normalize() {
        let levels = ReferenceLevels::unit();
        let mut a: Decoder = unit_decoder();
        let mut b: Decoder = Decoder::new(Config::default()
            .with_levels(levels)
            .with_normalize_threshold(10)).unwrap();

        // Samples off the ideal levels keep the metrics growing.
        let input: Vec<Sample> = samples(PATTERN, 200, levels).iter().enumerate()
            .map(|(i, &s)| if i % 3 == 0 { s + 1 } else { s })
            .collect();

        for &s in &input {
            assert_eq!(a.feed(s), b.feed(s));
            assert_eq!(a.best_state(), b.best_state());
            assert!(b.metrics().iter().all(|&m| m <= 10 + 2 * crate::consts::BRANCH_METRIC_MAX));
        }

        assert!(a.stats().normalizations == 0);
        assert!(b.stats().normalizations > 0);
        assert!(a.min_metric() > 10);
        assert!(b.min_metric() <= 10);
    }

    #[test]
    fn test_origin_tie() {
        let mut d: Decoder = unit_decoder();

        // Every state has a zero-cost edge for a zero sample, so all metrics tie and
        // the origin is the lowest state.
        d.feed(0);
        assert_eq!(d.metrics(), &[0, 0, 0, 0]);
        assert_eq!(d.best_state(), 0);
    }

    #[test]
    fn test_set_levels() {
        let mut d = Pr4Decoder::default();
        assert!(d.set_levels(ReferenceLevels::new(1, 0, -1)).is_err());
        assert_eq!(d.config().levels, ReferenceLevels::default());

        assert!(d.set_levels(ReferenceLevels::unit()).is_ok());
        assert_eq!(d.config().levels, ReferenceLevels::unit());
    }

    #[test]
    fn test_set_levels_threshold() {
        let input = samples(&[true, true], 80, ReferenceLevels::unit());

        let mut d = Pr4Decoder::default();
        d.set_levels(ReferenceLevels::unit()).unwrap();

        for &s in &input {
            d.feed(s);
        }

        assert!(d.locked());

        // Costs 4 against the nearest unit level, which is below the threshold of the
        // default levels but not of the unit levels.
        d.feed(4);
        assert!(!d.locked());
        assert_eq!(d.last_event(), Some(LockEvent::Lost));
    }

    #[test]
    fn test_clone() {
        let input = samples(PATTERN, 64, ReferenceLevels::unit());

        let mut a: Decoder = unit_decoder();

        for &s in &input[..40] {
            a.feed(s);
        }

        let mut b = a.clone();
        assert_eq!(a.diagnostics(), b.diagnostics());

        for &s in &input[40..] {
            assert_eq!(a.feed(s), b.feed(s));
        }

        assert_eq!(a.diagnostics(), b.diagnostics());
        assert!(format!("{:?}", b).contains("Decoder"));
    }

    #[test]
    fn test_bad_config() {
        assert!(Pr4Decoder::new(Config::default().with_lock_window(0)).is_err());
    }
}
