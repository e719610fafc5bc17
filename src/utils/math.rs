//! Level conversions and frequency/time axis helpers.
//!
//! # Examples
//!
//! ```rust
//! use signal_filtering::utils::math::{amplitude_to_db, fft_frequencies};
//!
//! let db = amplitude_to_db(0.5_f64); // -6.02 dB
//! assert!((db + 6.0206).abs() < 1e-3);
//!
//! let bins = fft_frequencies(4, 1000.0);
//! assert_eq!(bins, vec![0.0, 250.0, 500.0, 750.0]);
//! ```

use num_traits::Float;

/// Level reported for a zero (or negative) amplitude, in dB.
pub const MIN_DB: f64 = -300.0;

/// Converts linear amplitude to decibels, `20 log10(amplitude)`.
///
/// Zero maps to [`MIN_DB`] rather than negative infinity.
pub fn amplitude_to_db<F: Float>(amplitude: F) -> F {
    let floor = F::from(MIN_DB).unwrap_or_else(F::neg_infinity);
    if amplitude > F::zero() {
        let twenty = F::from(20.0).unwrap_or_else(F::one);
        (twenty * amplitude.log10()).max(floor)
    } else {
        floor
    }
}

/// Converts decibels to linear amplitude, `10^(dB / 20)`.
pub fn db_to_amplitude<F: Float>(db: F) -> F {
    let ten = F::from(10.0).unwrap_or_else(F::one);
    let twenty = F::from(20.0).unwrap_or_else(F::one);
    ten.powf(db / twenty)
}

/// Converts a power ratio to decibels, `10 log10(power)`.
pub fn power_to_db<F: Float>(power: F) -> F {
    let floor = F::from(MIN_DB).unwrap_or_else(F::neg_infinity);
    if power > F::zero() {
        let ten = F::from(10.0).unwrap_or_else(F::one);
        (ten * power.log10()).max(floor)
    } else {
        floor
    }
}

/// Bin frequencies of an `n`-point DFT: `k * sample_rate / n` for `k = 0..n`.
pub fn fft_frequencies(n: usize, sample_rate: f64) -> Vec<f64> {
    (0..n)
        .map(|k| k as f64 * sample_rate / n as f64)
        .collect()
}

/// Frequencies of a `num_points` response grid over `[0, Nyquist)`:
/// `k * sample_rate / (2 * num_points)`.
pub fn response_frequencies(num_points: usize, sample_rate: f64) -> Vec<f64> {
    (0..num_points)
        .map(|k| k as f64 * sample_rate / (2 * num_points) as f64)
        .collect()
}

/// Converts a sample count to seconds.
pub fn samples_to_time(samples: usize, sample_rate: f64) -> f64 {
    samples as f64 / sample_rate
}

/// Converts seconds to the nearest whole number of samples.
pub fn time_to_samples(time_seconds: f64, sample_rate: f64) -> usize {
    (time_seconds * sample_rate).round().max(0.0) as usize
}
