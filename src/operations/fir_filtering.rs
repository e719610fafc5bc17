//! FIR (Finite Impulse Response) filter design by the window method.
//!
//! The ideal response is a sum of pass bands, each the difference of two
//! low-pass sinc kernels centred at `(M - 1) / 2`. The truncated kernel is
//! tapered by a window and scaled to unit gain at the centre of the first
//! pass band.

use super::coefficients::FilterCoefficients;
use super::types::{WindowType, validate_cutoff, validate_sample_rate};
use crate::error::ensure_finite;
use crate::{FilterError, FilterResult};

use std::f64::consts::PI;

/// Design a windowed band-pass FIR filter with a Hamming window.
///
/// `tap_count` must be odd.
///
/// # Examples
/// ```
/// use signal_filtering::design_bandpass_fir;
///
/// let coeffs = design_bandpass_fir(101, 40.0, 100.0, 1000.0).unwrap();
/// assert_eq!(coeffs.b().len(), 101);
/// assert_eq!(coeffs.a(), &[1.0]);
/// ```
pub fn design_bandpass_fir(
    tap_count: usize,
    low_hz: f64,
    high_hz: f64,
    sample_rate: f64,
) -> FilterResult<FilterCoefficients> {
    design_fir(
        tap_count,
        &[low_hz, high_hz],
        false,
        WindowType::Hamming,
        sample_rate,
    )
}

/// Design a windowed band-stop FIR filter with a Hamming window.
///
/// `tap_count` must be odd.
pub fn design_bandstop_fir(
    tap_count: usize,
    low_hz: f64,
    high_hz: f64,
    sample_rate: f64,
) -> FilterResult<FilterCoefficients> {
    design_fir(
        tap_count,
        &[low_hz, high_hz],
        true,
        WindowType::Hamming,
        sample_rate,
    )
}

/// Design a windowed low-pass FIR filter.
pub fn design_lowpass_fir(
    tap_count: usize,
    cutoff_hz: f64,
    window: WindowType,
    sample_rate: f64,
) -> FilterResult<FilterCoefficients> {
    design_fir(tap_count, &[cutoff_hz], true, window, sample_rate)
}

/// Design a windowed high-pass FIR filter; `tap_count` must be odd.
pub fn design_highpass_fir(
    tap_count: usize,
    cutoff_hz: f64,
    window: WindowType,
    sample_rate: f64,
) -> FilterResult<FilterCoefficients> {
    design_fir(tap_count, &[cutoff_hz], false, window, sample_rate)
}

/// Design a windowed-sinc FIR filter for arbitrary band edges.
///
/// # Arguments
/// * `tap_count` - Number of taps `M`
/// * `cutoffs` - Strictly increasing band edges in Hz, each inside `(0, sample_rate / 2)`
/// * `pass_zero` - Whether the first band (starting at DC) is a pass band
/// * `window` - Window tapering the ideal response
/// * `sample_rate` - Sampling rate in Hz
///
/// # Errors
/// [`FilterError::InvalidFilterSpec`] for a zero tap count, invalid edges, or
/// an even tap count when the kernel must be odd-length symmetric. That is
/// the case for every response other than low-pass: an even-length symmetric
/// kernel has a forced zero at Nyquist (high-pass, band-stop) and band-pass
/// kernels are required to have a centre tap. The tap count is never
/// adjusted silently.
pub fn design_fir(
    tap_count: usize,
    cutoffs: &[f64],
    pass_zero: bool,
    window: WindowType,
    sample_rate: f64,
) -> FilterResult<FilterCoefficients> {
    validate_sample_rate(sample_rate)?;
    if tap_count == 0 {
        return Err(FilterError::spec("FIR tap count must be at least 1"));
    }
    if cutoffs.is_empty() {
        return Err(FilterError::spec("at least one cutoff frequency is required"));
    }
    for &cutoff in cutoffs {
        validate_cutoff(cutoff, sample_rate)?;
    }
    if cutoffs.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(FilterError::spec(format!(
            "cutoff frequencies must be strictly increasing (got {cutoffs:?})"
        )));
    }

    let is_lowpass = pass_zero && cutoffs.len() == 1;
    if tap_count % 2 == 0 && !is_lowpass {
        tracing::warn!(tap_count, ?cutoffs, pass_zero, "rejecting even FIR tap count");
        return Err(FilterError::spec(format!(
            "tap count must be odd for this response (got {tap_count})"
        )));
    }

    let nyquist = sample_rate / 2.0;
    let bands = pass_bands(cutoffs.iter().map(|c| c / nyquist), pass_zero);

    let alpha = 0.5 * (tap_count - 1) as f64;
    let offsets: Vec<f64> = (0..tap_count).map(|i| i as f64 - alpha).collect();

    let mut taps = vec![0.0; tap_count];
    for &(left, right) in &bands {
        for (tap, &m) in taps.iter_mut().zip(&offsets) {
            *tap += right * sinc(right * m) - left * sinc(left * m);
        }
    }
    for (tap, w) in taps.iter_mut().zip(window.coefficients(tap_count)) {
        *tap *= w;
    }

    // Scale so the response at the centre of the first pass band is 1.
    let (left, right) = bands[0];
    let scale_frequency = if left == 0.0 {
        0.0
    } else if right == 1.0 {
        1.0
    } else {
        0.5 * (left + right)
    };
    let response: f64 = taps
        .iter()
        .zip(&offsets)
        .map(|(h, m)| h * (PI * m * scale_frequency).cos())
        .sum();
    if !response.is_finite() || response.abs() < f64::EPSILON {
        return Err(FilterError::NumericalInstability(format!(
            "FIR response {response} at the pass band centre cannot be normalised"
        )));
    }
    taps.iter_mut().for_each(|h| *h /= response);
    ensure_finite(&taps, "FIR taps")?;

    tracing::debug!(
        tap_count,
        ?cutoffs,
        pass_zero,
        ?window,
        sample_rate,
        "designed FIR filter"
    );
    FilterCoefficients::fir(taps)
}

/// Pair normalised edges (Nyquist = 1) into `(left, right)` pass bands.
fn pass_bands(edges: impl Iterator<Item = f64>, pass_zero: bool) -> Vec<(f64, f64)> {
    let mut points: Vec<f64> = Vec::new();
    if pass_zero {
        points.push(0.0);
    }
    points.extend(edges);
    // An odd number of points means the last band runs to Nyquist.
    if points.len() % 2 == 1 {
        points.push(1.0);
    }
    points.chunks(2).map(|band| (band[0], band[1])).collect()
}

/// Normalised sinc, `sin(pi x) / (pi x)`.
fn sinc(x: f64) -> f64 {
    if x == 0.0 {
        1.0
    } else {
        let px = PI * x;
        px.sin() / px
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::spectral::frequency_response_at;
    use approx_eq::assert_approx_eq;

    const FS: f64 = 1000.0;

    #[test]
    fn test_bandpass_unity_at_band_centre() {
        let coeffs = design_bandpass_fir(101, 40.0, 100.0, FS).unwrap();
        assert_eq!(coeffs.b().len(), 101);
        assert_eq!(coeffs.a(), &[1.0]);

        let centre = 70.0;
        let response = frequency_response_at(&coeffs, FS, &[centre, 0.0, 300.0]).unwrap();
        assert_approx_eq!(response.values()[0].norm(), 1.0, 1e-9);
        assert!(response.values()[1].norm() < 0.01, "DC leaks through");
        assert!(response.values()[2].norm() < 0.01, "stop band leaks through");
    }

    #[test]
    fn test_bandpass_kernel_symmetric() {
        let coeffs = design_bandpass_fir(101, 40.0, 100.0, FS).unwrap();
        let taps = coeffs.b();
        for i in 0..taps.len() / 2 {
            assert!((taps[i] - taps[taps.len() - 1 - i]).abs() < 1e-15);
        }
    }

    #[test]
    fn test_lowpass_unity_dc_gain() {
        let coeffs = design_lowpass_fir(51, 100.0, WindowType::Hamming, FS).unwrap();
        let sum: f64 = coeffs.b().iter().sum();
        assert_approx_eq!(sum, 1.0, 1e-12);

        // even tap counts are fine for low-pass
        let even = design_lowpass_fir(50, 100.0, WindowType::Hanning, FS).unwrap();
        assert_eq!(even.b().len(), 50);
        let sum: f64 = even.b().iter().sum();
        assert_approx_eq!(sum, 1.0, 1e-12);
    }

    #[test]
    fn test_highpass_unity_at_nyquist() {
        let coeffs = design_highpass_fir(51, 200.0, WindowType::Blackman, FS).unwrap();
        let nyquist_gain: f64 = coeffs
            .b()
            .iter()
            .enumerate()
            .map(|(k, h)| if k % 2 == 0 { *h } else { -*h })
            .sum::<f64>()
            .abs();
        assert_approx_eq!(nyquist_gain, 1.0, 1e-9);
        let dc: f64 = coeffs.b().iter().sum();
        assert!(dc.abs() < 0.01);
    }

    #[test]
    fn test_bandstop_passes_dc() {
        let coeffs = design_bandstop_fir(101, 40.0, 100.0, FS).unwrap();
        let response = frequency_response_at(&coeffs, FS, &[0.0, 70.0]).unwrap();
        assert_approx_eq!(response.values()[0].norm(), 1.0, 1e-9);
        assert!(response.values()[1].norm() < 0.05);
    }

    #[test]
    fn test_even_tap_count_rejected() {
        assert!(matches!(
            design_bandpass_fir(100, 40.0, 100.0, FS),
            Err(FilterError::InvalidFilterSpec(_))
        ));
        assert!(matches!(
            design_highpass_fir(50, 100.0, WindowType::Hamming, FS),
            Err(FilterError::InvalidFilterSpec(_))
        ));
        assert!(matches!(
            design_bandstop_fir(64, 40.0, 100.0, FS),
            Err(FilterError::InvalidFilterSpec(_))
        ));
    }

    #[test]
    fn test_invalid_edges_rejected() {
        assert!(design_bandpass_fir(101, 100.0, 40.0, FS).is_err());
        assert!(design_bandpass_fir(101, 40.0, 40.0, FS).is_err());
        assert!(design_bandpass_fir(101, 0.0, 100.0, FS).is_err());
        assert!(design_bandpass_fir(101, 40.0, 500.0, FS).is_err());
        assert!(design_bandpass_fir(0, 40.0, 100.0, FS).is_err());
        assert!(design_fir(11, &[], true, WindowType::Hamming, FS).is_err());
    }

    #[test]
    fn test_pass_bands() {
        assert_eq!(pass_bands([0.2].into_iter(), true), vec![(0.0, 0.2)]);
        assert_eq!(pass_bands([0.2].into_iter(), false), vec![(0.2, 1.0)]);
        assert_eq!(
            pass_bands([0.08, 0.2].into_iter(), false),
            vec![(0.08, 0.2)]
        );
        assert_eq!(
            pass_bands([0.08, 0.2].into_iter(), true),
            vec![(0.0, 0.08), (0.2, 1.0)]
        );
    }

    #[test]
    fn test_single_tap() {
        let coeffs = design_lowpass_fir(1, 100.0, WindowType::Hamming, FS).unwrap();
        assert_eq!(coeffs.b(), &[1.0]);
    }
}
