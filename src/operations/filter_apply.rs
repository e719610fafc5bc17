//! Running designed coefficients over finite sample sequences.
//!
//! Two modes are available:
//!
//! - **Causal**: one pass of the difference equation with zero initial state.
//! - **Zero-phase**: the sequence is extended at both ends, filtered forward
//!   from steady-state initial conditions, reversed, filtered again and
//!   reversed back. The extension is trimmed so the output has the input's
//!   length and no phase shift.

use super::coefficients::FilterCoefficients;
use super::types::{FilterMode, PadType, ZeroPhaseConfig};
use crate::error::ensure_finite;
use crate::{FilterError, FilterResult};

/// Transposed direct-form II realisation of a rational filter.
///
/// Holds the coefficients padded to a common length and the delay line
/// `z[0..n-1]` between samples.
#[derive(Debug, Clone)]
pub struct LinearFilter {
    /// Feed-forward coefficients, padded to `n`
    b_coeffs: Vec<f64>,
    /// Feed-back coefficients, padded to `n`, `a[0] == 1`
    a_coeffs: Vec<f64>,
    /// Delay line, `n - 1` elements
    state: Vec<f64>,
}

impl LinearFilter {
    /// Create a filter with zero initial state.
    pub fn new(coeffs: &FilterCoefficients) -> Self {
        let n = coeffs.len();
        let mut b_coeffs = coeffs.b().to_vec();
        let mut a_coeffs = coeffs.a().to_vec();
        b_coeffs.resize(n, 0.0);
        a_coeffs.resize(n, 0.0);

        Self {
            b_coeffs,
            a_coeffs,
            state: vec![0.0; n - 1],
        }
    }

    /// Create a filter with the given delay-line contents.
    pub fn with_initial_state(coeffs: &FilterCoefficients, state: Vec<f64>) -> FilterResult<Self> {
        let mut filter = Self::new(coeffs);
        if state.len() != filter.state.len() {
            return Err(FilterError::parameter(format!(
                "initial state must have {} elements, got {}",
                filter.state.len(),
                state.len()
            )));
        }
        filter.state = state;
        Ok(filter)
    }

    /// Process a single sample through the filter.
    ///
    /// Applies the difference equation:
    /// y[n] = (b[0]*x[n] + b[1]*x[n-1] + ... + b[M]*x[n-M])
    ///        - (a[1]*y[n-1] + a[2]*y[n-2] + ... + a[N]*y[n-N])
    pub fn process_sample(&mut self, input: f64) -> f64 {
        let output = self.b_coeffs[0] * input + self.state.first().copied().unwrap_or(0.0);

        let last = self.state.len();
        for i in 0..last {
            let carried = if i + 1 < last { self.state[i + 1] } else { 0.0 };
            self.state[i] =
                self.b_coeffs[i + 1] * input + carried - self.a_coeffs[i + 1] * output;
        }

        output
    }

    /// Process a slice of samples through the filter.
    pub fn process_samples(&mut self, input: &[f64]) -> Vec<f64> {
        input.iter().map(|&x| self.process_sample(x)).collect()
    }

    /// Reset the filter's internal state.
    pub fn reset(&mut self) {
        self.state.fill(0.0);
    }

    /// Current delay-line contents.
    pub fn state(&self) -> &[f64] {
        &self.state
    }
}

/// Apply `coeffs` to `samples` in the requested mode.
///
/// The output always has the same length as the input.
///
/// # Errors
/// - [`FilterError::InsufficientSignalLength`] if a zero-phase pass needs more
///   samples than supplied for its edge extension
/// - [`FilterError::InvalidParameter`] for non-finite input samples
/// - [`FilterError::NumericalInstability`] if the output is not finite
pub fn apply(
    coeffs: &FilterCoefficients,
    samples: &[f64],
    mode: FilterMode,
) -> FilterResult<Vec<f64>> {
    match mode {
        FilterMode::Causal => lfilter(coeffs, samples),
        FilterMode::ZeroPhase(config) => filtfilt(coeffs, samples, config),
    }
}

/// Causal filtering with zero initial conditions.
pub fn lfilter(coeffs: &FilterCoefficients, samples: &[f64]) -> FilterResult<Vec<f64>> {
    check_input(samples)?;
    let output = LinearFilter::new(coeffs).process_samples(samples);
    ensure_finite(&output, "filter output")?;
    Ok(output)
}

/// Zero-phase forward-backward filtering.
///
/// The input is extended by `config.effective_pad_len(coeffs)` samples at each
/// end (by default `3 * max(len(a), len(b))`, odd extension), which must be
/// strictly less than the input length.
pub fn filtfilt(
    coeffs: &FilterCoefficients,
    samples: &[f64],
    config: ZeroPhaseConfig,
) -> FilterResult<Vec<f64>> {
    let edge = config.effective_pad_len(coeffs);
    let n = samples.len();
    if n <= edge || n == 0 {
        tracing::warn!(samples = n, pad_len = edge, "signal too short for zero-phase filtering");
        return Err(FilterError::InsufficientSignalLength {
            required: edge + 1,
            actual: n,
        });
    }
    check_input(samples)?;

    let zi = steady_state_initial_conditions(coeffs)?;
    let extended = extend_edges(samples, edge, config.pad_type);

    let x0 = extended[0];
    let mut forward = LinearFilter::with_initial_state(coeffs, scaled(&zi, x0))?
        .process_samples(&extended);
    forward.reverse();

    let y0 = forward[0];
    let mut backward =
        LinearFilter::with_initial_state(coeffs, scaled(&zi, y0))?.process_samples(&forward);
    backward.reverse();

    let output = backward[edge..edge + n].to_vec();
    ensure_finite(&output, "zero-phase output")?;

    tracing::trace!(samples = n, pad_len = edge, pad_type = ?config.pad_type, "zero-phase filtered");
    Ok(output)
}

/// Delay-line state for which a unit step input produces a constant output.
///
/// Scaling the result by the first input sample starts the filter in steady
/// state and removes the start-up transient for slowly varying inputs.
///
/// # Errors
/// [`FilterError::InvalidFilterCoefficients`] if the filter has a pole at
/// `z = 1` (`sum(a) == 0`), where no steady state exists.
pub fn steady_state_initial_conditions(coeffs: &FilterCoefficients) -> FilterResult<Vec<f64>> {
    let n = coeffs.len();
    let dc_gain = coeffs.dc_gain().ok_or_else(|| {
        FilterError::coefficients("denominator sums to zero; no steady state exists")
    })?;

    let coeff = |v: &[f64], k: usize| v.get(k).copied().unwrap_or(0.0);
    let mut zi = vec![0.0; n - 1];
    let mut acc = 0.0;
    for k in (1..n).rev() {
        acc += coeff(coeffs.b(), k) - coeff(coeffs.a(), k) * dc_gain;
        zi[k - 1] = acc;
    }
    Ok(zi)
}

/// Extend `samples` by `edge` samples at both ends.
///
/// Requires `samples.len() > edge` for the reflecting extensions.
pub fn extend_edges(samples: &[f64], edge: usize, pad_type: PadType) -> Vec<f64> {
    let n = samples.len();
    if edge == 0 || n == 0 || pad_type == PadType::None {
        return samples.to_vec();
    }
    let first = samples[0];
    let last = samples[n - 1];

    let mut extended = Vec::with_capacity(n + 2 * edge);
    match pad_type {
        PadType::Odd => {
            extended.extend((1..=edge).rev().map(|i| 2.0 * first - samples[i]));
            extended.extend_from_slice(samples);
            extended.extend((1..=edge).map(|i| 2.0 * last - samples[n - 1 - i]));
        }
        PadType::Even => {
            extended.extend((1..=edge).rev().map(|i| samples[i]));
            extended.extend_from_slice(samples);
            extended.extend((1..=edge).map(|i| samples[n - 1 - i]));
        }
        PadType::Constant => {
            extended.extend(std::iter::repeat_n(first, edge));
            extended.extend_from_slice(samples);
            extended.extend(std::iter::repeat_n(last, edge));
        }
        PadType::None => extended.extend_from_slice(samples),
    }
    extended
}

fn scaled(values: &[f64], factor: f64) -> Vec<f64> {
    values.iter().map(|v| v * factor).collect()
}

fn check_input(samples: &[f64]) -> FilterResult<()> {
    match samples.iter().position(|v| !v.is_finite()) {
        Some(idx) => Err(FilterError::parameter(format!(
            "input sample {idx} is not finite"
        ))),
        None => Ok(()),
    }
}
