//! Frequency-domain views of filters and signals.
//!
//! [`frequency_response`] evaluates `H(e^{jw}) = B(e^{-jw}) / A(e^{-jw})` on a
//! uniform grid over `[0, pi)`, while [`spectrum`] runs a forward FFT over a
//! sample sequence. Both report their values together with the frequency in Hz
//! of each point.

use super::coefficients::FilterCoefficients;
use super::types::validate_sample_rate;
use crate::utils::math::{amplitude_to_db, fft_frequencies, response_frequencies};
use crate::{FilterError, FilterResult};
use ndarray::Array1;
use rustfft::{FftPlanner, num_complex::Complex};
use std::f64::consts::PI;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Complex values paired with the frequency (Hz) each was evaluated at.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ComplexResponse {
    frequencies: Array1<f64>,
    values: Array1<Complex<f64>>,
}

impl ComplexResponse {
    /// Pair `frequencies` with `values`; both must have the same length.
    pub fn new(frequencies: Array1<f64>, values: Array1<Complex<f64>>) -> FilterResult<Self> {
        if frequencies.len() != values.len() {
            return Err(FilterError::parameter(format!(
                "{} frequencies for {} values",
                frequencies.len(),
                values.len()
            )));
        }
        Ok(Self {
            frequencies,
            values,
        })
    }

    /// Frequency of each point in Hz.
    pub fn frequencies(&self) -> &Array1<f64> {
        &self.frequencies
    }

    /// Complex value at each point.
    pub fn values(&self) -> &Array1<Complex<f64>> {
        &self.values
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if there are no points.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// `|H|` at each point.
    pub fn magnitude(&self) -> Array1<f64> {
        self.values.mapv(|v| v.norm())
    }

    /// `20 log10 |H|` at each point, floored for zeros.
    pub fn magnitude_db(&self) -> Array1<f64> {
        self.values.mapv(|v| amplitude_to_db(v.norm()))
    }

    /// Phase angle in radians, in `(-pi, pi]`.
    pub fn phase(&self) -> Array1<f64> {
        self.values.mapv(|v| v.arg())
    }

    /// The first `len / 2 + 1` points.
    ///
    /// For the spectrum of a real sequence these are the bins from DC up to
    /// Nyquist; the rest mirror them.
    pub fn non_negative(&self) -> ComplexResponse {
        let keep = (self.len() / 2 + 1).min(self.len());
        ComplexResponse {
            frequencies: self.frequencies.iter().take(keep).copied().collect(),
            values: self.values.iter().take(keep).copied().collect(),
        }
    }

    /// Frequency and magnitude of the largest-magnitude point.
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.frequencies
            .iter()
            .zip(self.values.iter())
            .map(|(&f, v)| (f, v.norm()))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }

    /// Consume into `(frequencies, values)`.
    pub fn into_parts(self) -> (Array1<f64>, Array1<Complex<f64>>) {
        (self.frequencies, self.values)
    }
}

/// Evaluate the filter at `num_points` equally spaced frequencies.
///
/// The grid is `w_k = pi * k / num_points` for `k = 0..num_points`, so DC is
/// included and Nyquist is not. Frequencies are reported in Hz as
/// `w_k * sample_rate / (2 pi)`.
///
/// # Examples
/// ```
/// use signal_filtering::{IirFilterType, design_lowpass, frequency_response};
///
/// let coeffs = design_lowpass(IirFilterType::Butterworth, 4, 30.0, 1000.0, None).unwrap();
/// let response = frequency_response(&coeffs, 1000.0, 1024).unwrap();
/// assert_eq!(response.len(), 1024);
/// assert!((response.values()[0].norm() - 1.0).abs() < 1e-9);
/// ```
pub fn frequency_response(
    coeffs: &FilterCoefficients,
    sample_rate: f64,
    num_points: usize,
) -> FilterResult<ComplexResponse> {
    validate_sample_rate(sample_rate)?;
    if num_points == 0 {
        return Err(FilterError::parameter(
            "frequency response needs at least one point",
        ));
    }

    let frequencies = response_frequencies(num_points, sample_rate);
    let values = (0..num_points)
        .map(|k| evaluate(coeffs, PI * k as f64 / num_points as f64))
        .collect::<FilterResult<Vec<_>>>()?;

    ComplexResponse::new(Array1::from_vec(frequencies), Array1::from_vec(values))
}

/// Evaluate the filter at the given frequencies in Hz.
///
/// Frequencies may be anywhere on the real line; the response is periodic in
/// `sample_rate`.
pub fn frequency_response_at(
    coeffs: &FilterCoefficients,
    sample_rate: f64,
    frequencies_hz: &[f64],
) -> FilterResult<ComplexResponse> {
    validate_sample_rate(sample_rate)?;
    if let Some(f) = frequencies_hz.iter().find(|f| !f.is_finite()) {
        return Err(FilterError::parameter(format!(
            "frequency {f} is not finite"
        )));
    }

    let values = frequencies_hz
        .iter()
        .map(|&f| evaluate(coeffs, 2.0 * PI * f / sample_rate))
        .collect::<FilterResult<Vec<_>>>()?;

    ComplexResponse::new(
        Array1::from_vec(frequencies_hz.to_vec()),
        Array1::from_vec(values),
    )
}

/// Forward DFT of a real sequence.
///
/// Returns all `N` bins, bin `k` labelled `k * sample_rate / N`. Use
/// [`ComplexResponse::non_negative`] for the bins up to Nyquist.
///
/// # Errors
/// [`FilterError::InvalidParameter`] for an empty or non-finite sequence.
pub fn spectrum(samples: &[f64], sample_rate: f64) -> FilterResult<ComplexResponse> {
    validate_sample_rate(sample_rate)?;
    if samples.is_empty() {
        return Err(FilterError::parameter("cannot take the spectrum of an empty signal"));
    }
    if let Some(idx) = samples.iter().position(|v| !v.is_finite()) {
        return Err(FilterError::parameter(format!(
            "input sample {idx} is not finite"
        )));
    }

    let mut buffer: Vec<Complex<f64>> = samples.iter().map(|&x| Complex::new(x, 0.0)).collect();

    let mut planner = FftPlanner::new();
    let fft = planner.plan_fft_forward(buffer.len());
    fft.process(&mut buffer);

    let frequencies = fft_frequencies(samples.len(), sample_rate);
    ComplexResponse::new(Array1::from_vec(frequencies), Array1::from_vec(buffer))
}

/// Inverse DFT, keeping the real part and normalising by `N`.
pub(crate) fn inverse_spectrum(values: &[Complex<f64>]) -> Vec<f64> {
    if values.is_empty() {
        return Vec::new();
    }
    let mut buffer = values.to_vec();

    let mut planner = FftPlanner::new();
    let ifft = planner.plan_fft_inverse(buffer.len());
    ifft.process(&mut buffer);

    let len = buffer.len() as f64;
    buffer.iter().map(|c| c.re / len).collect()
}

/// `B(e^{-jw}) / A(e^{-jw})` by Horner's rule.
fn evaluate(coeffs: &FilterCoefficients, omega: f64) -> FilterResult<Complex<f64>> {
    let z_inv = Complex::from_polar(1.0, -omega);
    let horner = |poly: &[f64]| {
        poly.iter()
            .rev()
            .fold(Complex::new(0.0, 0.0), |acc, &c| acc * z_inv + c)
    };

    let value = horner(coeffs.b()) / horner(coeffs.a());
    if !(value.re.is_finite() && value.im.is_finite()) {
        return Err(FilterError::NumericalInstability(format!(
            "response is not finite at {omega} rad/sample"
        )));
    }
    Ok(value)
}
