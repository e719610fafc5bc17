//! Test-signal generation.
//!
//! Deterministic tones are always available. Noise generators require
//! `feature = "random-generation"` and take the random source as a parameter
//! so callers decide between a fixed seed and OS entropy.

use std::time::Duration;

use crate::utils::math::time_to_samples;
use crate::{FilterError, FilterResult, Signal};
use std::f64::consts::PI;

#[cfg(feature = "random-generation")]
use rand::{Rng, SeedableRng, rngs::StdRng};
#[cfg(feature = "random-generation")]
use rand_distr::{Distribution, Normal};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// A single sinusoidal component of a compound tone.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ToneComponent {
    /// Frequency in Hz
    pub frequency: f64,
    /// Peak amplitude
    pub amplitude: f64,
}

impl ToneComponent {
    /// Creates a new tone component.
    pub const fn new(frequency: f64, amplitude: f64) -> Self {
        Self {
            frequency,
            amplitude,
        }
    }
}

/// Generates `amplitude * sin(2 pi f t)` sampled at `t = i / sample_rate`.
///
/// # Errors
/// [`FilterError::InvalidParameter`] if the sampling rate is invalid or
/// `duration` rounds to zero samples.
pub fn sine_wave(
    frequency: f64,
    duration: Duration,
    sample_rate: f64,
    amplitude: f64,
) -> FilterResult<Signal> {
    compound_tone(
        &[ToneComponent::new(frequency, amplitude)],
        duration,
        sample_rate,
    )
}

/// Generates a sum of sinusoids sampled at `t = i / sample_rate`.
///
/// # Examples
/// ```rust
/// use signal_filtering::utils::generation::{compound_tone, ToneComponent};
/// use std::time::Duration;
///
/// let components = [
///     ToneComponent::new(5.0, 1.0),
///     ToneComponent::new(50.0, 0.5),
///     ToneComponent::new(200.0, 0.2),
/// ];
/// let signal = compound_tone(&components, Duration::from_secs(1), 1000.0).unwrap();
/// assert_eq!(signal.len(), 1000);
/// ```
pub fn compound_tone(
    components: &[ToneComponent],
    duration: Duration,
    sample_rate: f64,
) -> FilterResult<Signal> {
    if components.is_empty() {
        return Err(FilterError::parameter("at least one tone component is required"));
    }
    if let Some(comp) = components
        .iter()
        .find(|c| !(c.frequency.is_finite() && c.amplitude.is_finite()))
    {
        return Err(FilterError::parameter(format!(
            "tone component {comp:?} is not finite"
        )));
    }
    let num_samples = sample_count(duration, sample_rate)?;

    let samples = (0..num_samples)
        .map(|i| {
            let t = i as f64 / sample_rate;
            components
                .iter()
                .map(|c| c.amplitude * (2.0 * PI * c.frequency * t).sin())
                .sum()
        })
        .collect();

    Signal::from_vec(samples, sample_rate)
}

/// A [`StdRng`] seeded from `seed`, or from OS entropy when `None`.
#[cfg(feature = "random-generation")]
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Generates `len` samples of zero-mean Gaussian noise.
///
/// # Errors
/// [`FilterError::InvalidParameter`] if `std_dev` is negative or not finite.
#[cfg(feature = "random-generation")]
pub fn gaussian_noise<R: Rng + ?Sized>(
    len: usize,
    std_dev: f64,
    rng: &mut R,
) -> FilterResult<Vec<f64>> {
    check_std_dev(std_dev)?;
    let normal = Normal::new(0.0, std_dev)
        .map_err(|e| FilterError::parameter(format!("invalid noise distribution: {e}")))?;

    Ok((0..len).map(|_| normal.sample(&mut *rng)).collect())
}

/// Returns `signal` plus independent Gaussian noise with standard deviation `std_dev`.
#[cfg(feature = "random-generation")]
pub fn add_gaussian_noise<R: Rng + ?Sized>(
    signal: &Signal,
    std_dev: f64,
    rng: &mut R,
) -> FilterResult<Signal> {
    let noise = gaussian_noise(signal.len(), std_dev, rng)?;
    let noisy = signal
        .as_slice()
        .iter()
        .zip(noise)
        .map(|(x, n)| x + n)
        .collect();
    signal.with_samples(noisy)
}

#[cfg(feature = "random-generation")]
fn check_std_dev(std_dev: f64) -> FilterResult<()> {
    if !std_dev.is_finite() || std_dev < 0.0 {
        return Err(FilterError::parameter(format!(
            "noise standard deviation must be finite and non-negative (got {std_dev})"
        )));
    }
    Ok(())
}

fn sample_count(duration: Duration, sample_rate: f64) -> FilterResult<usize> {
    crate::operations::types::validate_sample_rate(sample_rate)?;
    let num_samples = time_to_samples(duration.as_secs_f64(), sample_rate);
    if num_samples == 0 {
        return Err(FilterError::parameter(format!(
            "{duration:?} at {sample_rate} Hz yields no samples"
        )));
    }
    Ok(num_samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sine_wave() {
        let signal = sine_wave(250.0, Duration::from_millis(8), 1000.0, 2.0).unwrap();
        assert_eq!(signal.len(), 8);
        let expected = [0.0, 2.0, 0.0, -2.0];
        for (got, want) in signal.as_slice().iter().zip(expected.iter().cycle()) {
            assert!((got - want).abs() < 1e-12);
        }
    }

    #[test]
    fn test_compound_tone_is_sum_of_components() {
        let components = [ToneComponent::new(5.0, 1.0), ToneComponent::new(50.0, 0.5)];
        let tone = compound_tone(&components, Duration::from_secs(1), 1000.0).unwrap();
        let a = sine_wave(5.0, Duration::from_secs(1), 1000.0, 1.0).unwrap();
        let b = sine_wave(50.0, Duration::from_secs(1), 1000.0, 0.5).unwrap();
        let sum = a.try_add(&b).unwrap();
        for (x, y) in tone.as_slice().iter().zip(sum.as_slice()) {
            assert!((x - y).abs() < 1e-12);
        }
    }

    #[test]
    fn test_generation_errors() {
        assert!(compound_tone(&[], Duration::from_secs(1), 1000.0).is_err());
        assert!(sine_wave(5.0, Duration::ZERO, 1000.0, 1.0).is_err());
        assert!(sine_wave(5.0, Duration::from_secs(1), -1.0, 1.0).is_err());
        assert!(sine_wave(f64::NAN, Duration::from_secs(1), 1000.0, 1.0).is_err());
    }

    #[cfg(feature = "random-generation")]
    #[test]
    fn test_gaussian_noise_statistics() {
        let mut rng = seeded_rng(Some(7));
        let noise = gaussian_noise(20_001, 0.5, &mut rng).unwrap();
        assert_eq!(noise.len(), 20_001);

        let mean = noise.iter().sum::<f64>() / noise.len() as f64;
        let var = noise.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / noise.len() as f64;
        assert!(mean.abs() < 0.02, "mean {mean}");
        assert!((var.sqrt() - 0.5).abs() < 0.02, "std {}", var.sqrt());
    }

    #[cfg(feature = "random-generation")]
    #[test]
    fn test_seeded_noise_is_reproducible() {
        let a = gaussian_noise(100, 1.0, &mut seeded_rng(Some(42))).unwrap();
        let b = gaussian_noise(100, 1.0, &mut seeded_rng(Some(42))).unwrap();
        let c = gaussian_noise(100, 1.0, &mut seeded_rng(Some(43))).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[cfg(feature = "random-generation")]
    #[test]
    fn test_noise_follows_normal_distribution() {
        let expected: Vec<f64> = Normal::new(0.0, 0.25)
            .unwrap()
            .sample_iter(seeded_rng(Some(11)))
            .take(16)
            .collect();
        let noise = gaussian_noise(16, 0.25, &mut seeded_rng(Some(11))).unwrap();
        assert_eq!(noise, expected);

        let mut rng = seeded_rng(Some(11));
        assert!(gaussian_noise(4, f64::INFINITY, &mut rng).is_err());
        assert!(gaussian_noise(4, f64::NAN, &mut rng).is_err());
        assert!(gaussian_noise(0, 1.0, &mut rng).unwrap().is_empty());
    }

    #[cfg(feature = "random-generation")]
    #[test]
    fn test_add_gaussian_noise() {
        let clean = sine_wave(5.0, Duration::from_secs(1), 1000.0, 1.0).unwrap();
        let mut rng = seeded_rng(Some(1));
        let noisy = add_gaussian_noise(&clean, 0.5, &mut rng).unwrap();
        assert_eq!(noisy.len(), clean.len());
        assert_eq!(noisy.sample_rate(), clean.sample_rate());
        assert_ne!(noisy.as_slice(), clean.as_slice());

        let silent = add_gaussian_noise(&clean, 0.0, &mut rng).unwrap();
        assert_eq!(silent.as_slice(), clean.as_slice());
        assert!(add_gaussian_noise(&clean, -1.0, &mut rng).is_err());
    }
}
