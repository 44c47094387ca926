#![allow(dead_code)]

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, StandardNormal};

use prml::channel::Pr4Samples;
use prml::consts::Sample;
use prml::ReferenceLevels;

/// Random bits led by two 1 bits, which pin both interleaves of the channel from the
/// first samples on.
pub fn random_bits(seed: u64, n: usize) -> Vec<bool> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut bits = vec![true, true];
    bits.extend((2..n).map(|_| rng.random::<bool>()));
    bits
}

/// Ideal channel samples of the given bits.
pub fn ideal(bits: &[bool], levels: ReferenceLevels) -> Vec<Sample> {
    Pr4Samples::new(bits.iter().cloned(), levels).collect()
}

/// Unit-variance Gaussian noise, the same realization for the same seed.
pub fn noise(seed: u64, n: usize) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| StandardNormal.sample(&mut rng)).collect()
}

/// Add the given noise scaled to the given standard deviation.
pub fn awgn(clean: &[Sample], noise: &[f64], sigma: f64) -> Vec<Sample> {
    clean.iter().zip(noise.iter()).map(|(&s, &n)| {
        let y = (s as f64 + sigma * n).round();
        y.max(Sample::MIN as f64).min(Sample::MAX as f64) as Sample
    }).collect()
}

/// Fraction of decoded bits that differ from the sent bits they line up with.
pub fn bit_errors(sent: &[bool], decoded: &[bool]) -> f64 {
    assert!(decoded.len() <= sent.len());

    let errors = sent.iter().zip(decoded.iter()).filter(|&(a, b)| a != b).count();
    errors as f64 / decoded.len() as f64
}
