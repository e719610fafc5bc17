//! IIR (Infinite Impulse Response) filter design.
//!
//! Butterworth and Chebyshev Type I low-pass and high-pass filters are built
//! from the analog prototypes in [`prototype`](super::prototype):
//!
//! 1. pre-warp the digital cutoff to an analog angular frequency,
//! 2. scale (low-pass) or invert (high-pass) the prototype,
//! 3. map every pole and zero through the bilinear transform,
//! 4. expand the roots into `b` / `a` polynomials,
//! 5. rescale `b` for unity gain in the passband.

use super::coefficients::FilterCoefficients;
use super::prototype::AnalogPrototype;
use super::types::{FilterResponse, IirFilterType, validate_cutoff, validate_sample_rate};
use crate::error::ensure_finite;
use crate::{FilterError, FilterResult};

use num_complex::Complex;
use std::f64::consts::PI;

/// Zeros, poles and gain of a transfer function, in `s` or `z`.
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroPoleGain {
    /// Zeros.
    pub zeros: Vec<Complex<f64>>,
    /// Poles.
    pub poles: Vec<Complex<f64>>,
    /// Overall gain.
    pub gain: f64,
}

impl From<&AnalogPrototype> for ZeroPoleGain {
    fn from(prototype: &AnalogPrototype) -> Self {
        Self {
            zeros: prototype.zeros.clone(),
            poles: prototype.poles.clone(),
            gain: prototype.gain,
        }
    }
}

impl ZeroPoleGain {
    /// Poles in excess of zeros.
    pub fn relative_degree(&self) -> usize {
        self.poles.len().saturating_sub(self.zeros.len())
    }
}

/// Design a low-pass IIR filter.
///
/// # Arguments
/// * `filter_type` - Analog prototype family
/// * `order` - Number of poles, at least 1
/// * `cutoff_hz` - Cutoff frequency in Hz, strictly inside `(0, sample_rate / 2)`
/// * `sample_rate` - Sampling rate in Hz
/// * `ripple_db` - Passband ripple, required for Chebyshev Type I
///
/// # Examples
/// ```
/// use signal_filtering::{IirFilterType, design_lowpass};
///
/// let coeffs = design_lowpass(IirFilterType::Butterworth, 4, 30.0, 1000.0, None).unwrap();
/// assert_eq!(coeffs.a()[0], 1.0);
/// assert_eq!(coeffs.b().len(), 5);
/// ```
pub fn design_lowpass(
    filter_type: IirFilterType,
    order: usize,
    cutoff_hz: f64,
    sample_rate: f64,
    ripple_db: Option<f64>,
) -> FilterResult<FilterCoefficients> {
    design_iir_filter(
        filter_type,
        FilterResponse::LowPass,
        order,
        cutoff_hz,
        sample_rate,
        ripple_db,
    )
}

/// Design a high-pass IIR filter.
///
/// Arguments are the same as for [`design_lowpass`]. The result has unity
/// gain at the Nyquist frequency.
pub fn design_highpass(
    filter_type: IirFilterType,
    order: usize,
    cutoff_hz: f64,
    sample_rate: f64,
    ripple_db: Option<f64>,
) -> FilterResult<FilterCoefficients> {
    design_iir_filter(
        filter_type,
        FilterResponse::HighPass,
        order,
        cutoff_hz,
        sample_rate,
        ripple_db,
    )
}

/// Design an IIR filter for a low-pass or high-pass response.
///
/// Band responses are rejected with [`FilterError::InvalidFilterSpec`]; use the
/// FIR designer for those.
pub fn design_iir_filter(
    filter_type: IirFilterType,
    response: FilterResponse,
    order: usize,
    cutoff_hz: f64,
    sample_rate: f64,
    ripple_db: Option<f64>,
) -> FilterResult<FilterCoefficients> {
    validate_sample_rate(sample_rate)?;
    let prototype = AnalogPrototype::new(filter_type, order, ripple_db)?;
    if let Err(err) = validate_cutoff(cutoff_hz, sample_rate) {
        tracing::warn!(cutoff_hz, sample_rate, "rejecting IIR design: {err}");
        return Err(err);
    }

    let warped = prewarp(cutoff_hz, sample_rate);
    let analog = match response {
        FilterResponse::LowPass => lowpass_to_lowpass(&ZeroPoleGain::from(&prototype), warped),
        FilterResponse::HighPass => lowpass_to_highpass(&ZeroPoleGain::from(&prototype), warped),
        FilterResponse::BandPass | FilterResponse::BandStop => {
            return Err(FilterError::spec(
                "IIR band-pass and band-stop designs are not supported; use the FIR designer",
            ));
        }
    };
    let digital = bilinear_zpk(&analog, sample_rate);
    let (mut b, a) = zpk_to_tf(&digital);

    // Unity passband gain: z = 1 for low-pass, z = -1 for high-pass.
    let reference = match response {
        FilterResponse::HighPass => -1.0,
        _ => 1.0,
    };
    let gain = evaluate_real(&b, reference) / evaluate_real(&a, reference);
    if !gain.is_finite() || gain.abs() < f64::EPSILON {
        return Err(FilterError::NumericalInstability(format!(
            "passband gain {gain} cannot be normalised"
        )));
    }
    b.iter_mut().for_each(|v| *v /= gain.abs());

    ensure_finite(&b, "numerator")?;
    ensure_finite(&a, "denominator")?;

    tracing::debug!(
        ?filter_type,
        ?response,
        order,
        cutoff_hz,
        sample_rate,
        warped,
        "designed IIR filter"
    );
    FilterCoefficients::new(b, a)
}

/// Pre-warp a digital cutoff to the analog angular frequency `2 fs tan(pi fc / fs)`.
pub fn prewarp(cutoff_hz: f64, sample_rate: f64) -> f64 {
    2.0 * sample_rate * (PI * cutoff_hz / sample_rate).tan()
}

/// Move the prototype cutoff from 1 rad/s to `warped` rad/s.
pub fn lowpass_to_lowpass(zpk: &ZeroPoleGain, warped: f64) -> ZeroPoleGain {
    let degree = zpk.relative_degree() as i32;
    ZeroPoleGain {
        zeros: zpk.zeros.iter().map(|z| *z * warped).collect(),
        poles: zpk.poles.iter().map(|p| *p * warped).collect(),
        gain: zpk.gain * warped.powi(degree),
    }
}

/// Turn a low-pass prototype into a high-pass with cutoff `warped` rad/s.
///
/// Each root `r` maps to `warped / r`; the zeros the prototype has at
/// infinity land at `s = 0`.
pub fn lowpass_to_highpass(zpk: &ZeroPoleGain, warped: f64) -> ZeroPoleGain {
    let degree = zpk.relative_degree();
    let mut zeros: Vec<Complex<f64>> = zpk.zeros.iter().map(|z| warped / *z).collect();
    zeros.extend(std::iter::repeat_n(Complex::new(0.0, 0.0), degree));

    let gain_ratio = product_of(zpk.zeros.iter().map(|z| -*z))
        / product_of(zpk.poles.iter().map(|p| -*p));

    ZeroPoleGain {
        zeros,
        poles: zpk.poles.iter().map(|p| warped / *p).collect(),
        gain: zpk.gain * gain_ratio.re,
    }
}

/// Map an analog zero-pole-gain system to `z` with `s = 2 fs (z - 1) / (z + 1)`.
///
/// Zeros at analog infinity become zeros at `z = -1`.
pub fn bilinear_zpk(zpk: &ZeroPoleGain, sample_rate: f64) -> ZeroPoleGain {
    let fs2 = 2.0 * sample_rate;
    let degree = zpk.relative_degree();
    let map = |r: &Complex<f64>| (fs2 + *r) / (fs2 - *r);

    let mut zeros: Vec<Complex<f64>> = zpk.zeros.iter().map(map).collect();
    zeros.extend(std::iter::repeat_n(Complex::new(-1.0, 0.0), degree));

    let gain_ratio = product_of(zpk.zeros.iter().map(|z| fs2 - *z))
        / product_of(zpk.poles.iter().map(|p| fs2 - *p));

    ZeroPoleGain {
        zeros,
        poles: zpk.poles.iter().map(map).collect(),
        gain: zpk.gain * gain_ratio.re,
    }
}

/// Expand zeros and poles into `(b, a)`; `a[0] == 1`.
pub fn zpk_to_tf(zpk: &ZeroPoleGain) -> (Vec<f64>, Vec<f64>) {
    let b = expand_roots(&zpk.zeros)
        .into_iter()
        .map(|c| c * zpk.gain)
        .collect();
    let a = expand_roots(&zpk.poles);
    (b, a)
}

/// Coefficients of `prod_k (1 - r_k z^-1)` in ascending powers of `z^-1`.
///
/// The accumulator holds `roots.len() + 1` terms; complex roots are expected
/// in conjugate pairs so the imaginary parts cancel.
fn expand_roots(roots: &[Complex<f64>]) -> Vec<f64> {
    let mut acc = vec![Complex::new(0.0, 0.0); roots.len() + 1];
    acc[0] = Complex::new(1.0, 0.0);
    for (i, root) in roots.iter().enumerate() {
        for k in (1..=i + 1).rev() {
            acc[k] = acc[k] - *root * acc[k - 1];
        }
    }
    acc.into_iter().map(|c| c.re).collect()
}

fn product_of(values: impl Iterator<Item = Complex<f64>>) -> Complex<f64> {
    values.fold(Complex::new(1.0, 0.0), |acc, v| acc * v)
}

/// Evaluate `sum_k c[k] x^-k` for real `x` (only used with `x = +-1`).
fn evaluate_real(coeffs: &[f64], x: f64) -> f64 {
    coeffs
        .iter()
        .enumerate()
        .map(|(k, c)| c * x.powi(-(k as i32)))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::spectral::frequency_response_at;
    use approx_eq::assert_approx_eq;

    const FS: f64 = 1000.0;

    #[test]
    fn test_second_order_butterworth_matches_closed_form() {
        let cutoff = 50.0;
        let coeffs = design_lowpass(IirFilterType::Butterworth, 2, cutoff, FS, None).unwrap();

        let k = (PI * cutoff / FS).tan();
        let k2 = k * k;
        let sqrt2 = 2.0_f64.sqrt();
        let norm = 1.0 + sqrt2 * k + k2;
        let b_expected = [k2 / norm, 2.0 * k2 / norm, k2 / norm];
        let a_expected = [1.0, (2.0 * k2 - 2.0) / norm, (1.0 - sqrt2 * k + k2) / norm];

        for (got, want) in coeffs.b().iter().zip(b_expected) {
            assert!((got - want).abs() < 1e-12, "b: {got} vs {want}");
        }
        for (got, want) in coeffs.a().iter().zip(a_expected) {
            assert!((got - want).abs() < 1e-12, "a: {got} vs {want}");
        }
        // butter(2, 0.1) reference values
        assert!((coeffs.b()[0] - 0.020_083_365_564_211_2).abs() < 1e-9);
        assert!((coeffs.a()[1] + 1.561_018_075_800_718).abs() < 1e-9);
        assert!((coeffs.a()[2] - 0.641_351_538_057_563_2).abs() < 1e-9);
    }

    #[test]
    fn test_second_order_butterworth_highpass_matches_closed_form() {
        let cutoff = 100.0;
        let coeffs = design_highpass(IirFilterType::Butterworth, 2, cutoff, FS, None).unwrap();

        let k = (PI * cutoff / FS).tan();
        let k2 = k * k;
        let sqrt2 = 2.0_f64.sqrt();
        let norm = 1.0 + sqrt2 * k + k2;
        let b_expected = [1.0 / norm, -2.0 / norm, 1.0 / norm];
        let a_expected = [1.0, (2.0 * k2 - 2.0) / norm, (1.0 - sqrt2 * k + k2) / norm];

        for (got, want) in coeffs.b().iter().zip(b_expected) {
            assert!((got - want).abs() < 1e-12, "b: {got} vs {want}");
        }
        for (got, want) in coeffs.a().iter().zip(a_expected) {
            assert!((got - want).abs() < 1e-12, "a: {got} vs {want}");
        }
    }

    #[test]
    fn test_leading_denominator_is_one_and_finite() {
        let nyquist = FS / 2.0;
        for filter_type in [IirFilterType::Butterworth, IirFilterType::ChebyshevI] {
            for order in 1..=8 {
                for fraction in [0.011, 0.05, 0.2, 0.5, 0.8, 0.95, 0.989] {
                    let cutoff = fraction * nyquist;
                    for response in [FilterResponse::LowPass, FilterResponse::HighPass] {
                        let coeffs =
                            design_iir_filter(filter_type, response, order, cutoff, FS, Some(1.0))
                                .unwrap();
                        assert_eq!(coeffs.a()[0], 1.0);
                        assert!(coeffs.b().len() <= order + 1);
                        assert!(coeffs.a().len() <= order + 1);
                        assert!(coeffs.b().iter().chain(coeffs.a()).all(|v| v.is_finite()));
                    }
                }
            }
        }
    }

    #[test]
    fn test_butterworth_minus_three_db_at_cutoff() {
        for order in 1..=8 {
            for cutoff in [30.0, 100.0, 250.0] {
                let coeffs =
                    design_lowpass(IirFilterType::Butterworth, order, cutoff, FS, None).unwrap();
                let response = frequency_response_at(&coeffs, FS, &[cutoff]).unwrap();
                let db = 20.0 * response.values()[0].norm().log10();
                assert!(
                    (db + 3.0103).abs() < 0.5,
                    "order {order}, cutoff {cutoff}: {db} dB"
                );

                let coeffs =
                    design_highpass(IirFilterType::Butterworth, order, cutoff, FS, None).unwrap();
                let response = frequency_response_at(&coeffs, FS, &[cutoff]).unwrap();
                let db = 20.0 * response.values()[0].norm().log10();
                assert!((db + 3.0103).abs() < 0.5, "highpass order {order}: {db} dB");
            }
        }
    }

    #[test]
    fn test_passband_gain_normalised() {
        let lp = design_lowpass(IirFilterType::ChebyshevI, 4, 30.0, FS, Some(1.0)).unwrap();
        let dc = frequency_response_at(&lp, FS, &[0.0]).unwrap();
        assert_approx_eq!(dc.values()[0].norm(), 1.0, 1e-9);

        let hp = design_highpass(IirFilterType::ChebyshevI, 4, 100.0, FS, Some(1.0)).unwrap();
        assert_approx_eq!(evaluate_real(hp.b(), -1.0) / evaluate_real(hp.a(), -1.0), 1.0, 1e-9);
        let dc = frequency_response_at(&hp, FS, &[0.0]).unwrap();
        assert!(dc.values()[0].norm() < 1e-9);
    }

    #[test]
    fn test_chebyshev_ripple_bounded() {
        let ripple_db = 1.0;
        let coeffs = design_lowpass(IirFilterType::ChebyshevI, 4, 100.0, FS, Some(ripple_db)).unwrap();
        let freqs: Vec<f64> = (0..100).map(|i| i as f64).collect();
        let response = frequency_response_at(&coeffs, FS, &freqs).unwrap();
        let db: Vec<f64> = response
            .values()
            .iter()
            .map(|h| 20.0 * h.norm().log10())
            .collect();
        let max = db.iter().cloned().fold(f64::MIN, f64::max);
        let min = db.iter().cloned().fold(f64::MAX, f64::min);
        assert!(max - min <= ripple_db + 1e-6, "ripple {} dB", max - min);
        assert!(max - min > 0.5 * ripple_db);
    }

    #[test]
    fn test_digital_poles_inside_unit_circle() {
        for order in 1..=8 {
            let prototype = AnalogPrototype::chebyshev_i(order, 0.5).unwrap();
            let analog = lowpass_to_highpass(&ZeroPoleGain::from(&prototype), prewarp(100.0, FS));
            let digital = bilinear_zpk(&analog, FS);
            assert_eq!(digital.zeros.len(), order);
            assert!(digital.poles.iter().all(|p| p.norm() < 1.0));
        }
    }

    #[test]
    fn test_expand_roots() {
        let roots = [Complex::new(0.5, 0.0), Complex::new(-0.25, 0.0)];
        let coeffs = expand_roots(&roots);
        // (1 - 0.5 z^-1)(1 + 0.25 z^-1) = 1 - 0.25 z^-1 - 0.125 z^-2
        assert_eq!(coeffs, vec![1.0, -0.25, -0.125]);

        let conj = [Complex::new(0.3, 0.4), Complex::new(0.3, -0.4)];
        let coeffs = expand_roots(&conj);
        assert!((coeffs[1] + 0.6).abs() < 1e-12);
        assert!((coeffs[2] - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_invalid_designs_rejected() {
        assert!(matches!(
            design_lowpass(IirFilterType::Butterworth, 0, 30.0, FS, None),
            Err(FilterError::InvalidFilterSpec(_))
        ));
        assert!(matches!(
            design_lowpass(IirFilterType::Butterworth, 4, 600.0, FS, None),
            Err(FilterError::InvalidFilterSpec(_))
        ));
        assert!(matches!(
            design_lowpass(IirFilterType::Butterworth, 4, 500.0, FS, None),
            Err(FilterError::InvalidFilterSpec(_))
        ));
        assert!(matches!(
            design_highpass(IirFilterType::Butterworth, 4, 0.0, FS, None),
            Err(FilterError::InvalidFilterSpec(_))
        ));
        assert!(matches!(
            design_highpass(IirFilterType::ChebyshevI, 4, 100.0, FS, None),
            Err(FilterError::InvalidFilterSpec(_))
        ));
        assert!(matches!(
            design_highpass(IirFilterType::ChebyshevI, 4, 100.0, FS, Some(-1.0)),
            Err(FilterError::InvalidFilterSpec(_))
        ));
        assert!(matches!(
            design_lowpass(IirFilterType::Butterworth, 4, 30.0, -FS, None),
            Err(FilterError::InvalidParameter(_))
        ));
        assert!(matches!(
            design_iir_filter(
                IirFilterType::Butterworth,
                FilterResponse::BandPass,
                4,
                30.0,
                FS,
                None
            ),
            Err(FilterError::InvalidFilterSpec(_))
        ));
    }
}
