//! Supporting types and enums for filter design and application.
//!
//! This module contains the configuration types, enums, and helper structures
//! used by the design functions and the [`SignalFiltering`](super::traits::SignalFiltering)
//! trait.

use super::coefficients::FilterCoefficients;
use super::{fir_filtering, iir_filtering};
use crate::{FilterError, FilterResult};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Window functions for FIR design.
///
/// The window tapers the truncated ideal impulse response. Wider main lobes
/// trade transition sharpness for lower stop-band ripple.
#[derive(Debug, Clone, PartialEq, Copy, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum WindowType {
    /// Rectangular window (no windowing) - sharpest transition, worst ripple.
    Rectangular,
    /// Hanning window - good general-purpose window with moderate leakage.
    Hanning,
    /// Hamming window - similar to Hanning but slightly different coefficients.
    #[default]
    Hamming,
    /// Blackman window - low leakage but wider main lobe.
    Blackman,
}

impl WindowType {
    /// Generate `size` symmetric window coefficients.
    pub fn coefficients(self, size: usize) -> Vec<f64> {
        use std::f64::consts::PI;

        if size == 1 {
            return vec![1.0];
        }
        let n_max = size.saturating_sub(1) as f64;
        match self {
            WindowType::Rectangular => vec![1.0; size],
            WindowType::Hanning => (0..size)
                .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f64 / n_max).cos()))
                .collect(),
            WindowType::Hamming => (0..size)
                .map(|i| 0.54 - 0.46 * (2.0 * PI * i as f64 / n_max).cos())
                .collect(),
            WindowType::Blackman => (0..size)
                .map(|i| {
                    let n = i as f64;
                    0.42 - 0.5 * (2.0 * PI * n / n_max).cos() + 0.08 * (4.0 * PI * n / n_max).cos()
                })
                .collect(),
        }
    }
}

/// Analog prototype families available to the IIR designer.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum IirFilterType {
    /// Butterworth filter - maximally flat passband response.
    Butterworth,
    /// Chebyshev Type I - ripple in passband, sharp transition.
    ChebyshevI,
}

/// Filter response characteristics.
///
/// Defines the frequency response shape of the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum FilterResponse {
    /// Low-pass filter - allows frequencies below cutoff.
    LowPass,
    /// High-pass filter - allows frequencies above cutoff.
    HighPass,
    /// Band-pass filter - allows frequencies within a range.
    BandPass,
    /// Band-stop filter - blocks frequencies within a range.
    BandStop,
}

/// Filter family together with its family-specific parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum FilterFamily {
    /// Butterworth IIR design.
    Butterworth,
    /// Chebyshev Type I IIR design with the given passband ripple in dB.
    ChebyshevI {
        /// Passband ripple in dB, strictly positive.
        ripple_db: f64,
    },
    /// Windowed-sinc FIR design.
    Fir {
        /// Window applied to the ideal impulse response.
        window: WindowType,
    },
}

impl FilterFamily {
    /// Split into the IIR prototype type and optional ripple, if this is an IIR family.
    pub const fn iir_parts(&self) -> Option<(IirFilterType, Option<f64>)> {
        match *self {
            FilterFamily::Butterworth => Some((IirFilterType::Butterworth, None)),
            FilterFamily::ChebyshevI { ripple_db } => {
                Some((IirFilterType::ChebyshevI, Some(ripple_db)))
            }
            FilterFamily::Fir { .. } => None,
        }
    }
}

const IIR_BAND_UNSUPPORTED: &str = "band responses are only available for the FIR family";

/// A complete, not yet validated, filter specification.
///
/// `order` is the number of poles for IIR families and the tap count for FIR.
/// Frequencies are in Hz.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum FilterSpec {
    /// Low-pass with a single cutoff.
    Lowpass {
        /// Design family.
        family: FilterFamily,
        /// Order (IIR) or tap count (FIR).
        order: usize,
        /// Cutoff frequency in Hz.
        cutoff_hz: f64,
    },
    /// High-pass with a single cutoff.
    Highpass {
        /// Design family.
        family: FilterFamily,
        /// Order (IIR) or tap count (FIR).
        order: usize,
        /// Cutoff frequency in Hz.
        cutoff_hz: f64,
    },
    /// Band-pass between two edges.
    Bandpass {
        /// Design family.
        family: FilterFamily,
        /// Order (IIR) or tap count (FIR).
        order: usize,
        /// Lower band edge in Hz.
        low_hz: f64,
        /// Upper band edge in Hz.
        high_hz: f64,
    },
    /// Band-stop between two edges.
    Bandstop {
        /// Design family.
        family: FilterFamily,
        /// Order (IIR) or tap count (FIR).
        order: usize,
        /// Lower band edge in Hz.
        low_hz: f64,
        /// Upper band edge in Hz.
        high_hz: f64,
    },
}

impl FilterSpec {
    /// Butterworth low-pass specification.
    pub const fn butterworth_lowpass(order: usize, cutoff_hz: f64) -> Self {
        FilterSpec::Lowpass {
            family: FilterFamily::Butterworth,
            order,
            cutoff_hz,
        }
    }

    /// Butterworth high-pass specification.
    pub const fn butterworth_highpass(order: usize, cutoff_hz: f64) -> Self {
        FilterSpec::Highpass {
            family: FilterFamily::Butterworth,
            order,
            cutoff_hz,
        }
    }

    /// Chebyshev Type I specification for a low-pass or high-pass response.
    ///
    /// Band responses are not available for IIR families; passing one yields a
    /// specification that fails validation with
    /// [`FilterError::InvalidFilterSpec`].
    pub const fn chebyshev_i(
        response: FilterResponse,
        order: usize,
        cutoff_hz: f64,
        ripple_db: f64,
    ) -> Self {
        let family = FilterFamily::ChebyshevI { ripple_db };
        match response {
            FilterResponse::HighPass => FilterSpec::Highpass {
                family,
                order,
                cutoff_hz,
            },
            FilterResponse::LowPass => FilterSpec::Lowpass {
                family,
                order,
                cutoff_hz,
            },
            FilterResponse::BandPass => FilterSpec::Bandpass {
                family,
                order,
                low_hz: cutoff_hz,
                high_hz: cutoff_hz,
            },
            FilterResponse::BandStop => FilterSpec::Bandstop {
                family,
                order,
                low_hz: cutoff_hz,
                high_hz: cutoff_hz,
            },
        }
    }

    /// Windowed FIR band-pass specification using a Hamming window.
    pub const fn fir_bandpass(tap_count: usize, low_hz: f64, high_hz: f64) -> Self {
        FilterSpec::Bandpass {
            family: FilterFamily::Fir {
                window: WindowType::Hamming,
            },
            order: tap_count,
            low_hz,
            high_hz,
        }
    }

    /// The response shape of this specification.
    pub const fn response(&self) -> FilterResponse {
        match self {
            FilterSpec::Lowpass { .. } => FilterResponse::LowPass,
            FilterSpec::Highpass { .. } => FilterResponse::HighPass,
            FilterSpec::Bandpass { .. } => FilterResponse::BandPass,
            FilterSpec::Bandstop { .. } => FilterResponse::BandStop,
        }
    }

    /// The design family of this specification.
    pub const fn family(&self) -> FilterFamily {
        match self {
            FilterSpec::Lowpass { family, .. }
            | FilterSpec::Highpass { family, .. }
            | FilterSpec::Bandpass { family, .. }
            | FilterSpec::Bandstop { family, .. } => *family,
        }
    }

    /// Order (IIR) or tap count (FIR).
    pub const fn order(&self) -> usize {
        match self {
            FilterSpec::Lowpass { order, .. }
            | FilterSpec::Highpass { order, .. }
            | FilterSpec::Bandpass { order, .. }
            | FilterSpec::Bandstop { order, .. } => *order,
        }
    }

    /// Cutoff frequencies in Hz, in ascending order.
    pub fn cutoffs(&self) -> Vec<f64> {
        match *self {
            FilterSpec::Lowpass { cutoff_hz, .. } | FilterSpec::Highpass { cutoff_hz, .. } => {
                vec![cutoff_hz]
            }
            FilterSpec::Bandpass {
                low_hz, high_hz, ..
            }
            | FilterSpec::Bandstop {
                low_hz, high_hz, ..
            } => vec![low_hz, high_hz],
        }
    }

    /// Check the specification against a sampling rate without designing it.
    pub fn validate(&self, sample_rate: f64) -> FilterResult<()> {
        validate_sample_rate(sample_rate)?;
        if self.order() == 0 {
            return Err(FilterError::spec("filter order must be at least 1"));
        }
        if self.family().iir_parts().is_some()
            && matches!(
                self.response(),
                FilterResponse::BandPass | FilterResponse::BandStop
            )
        {
            return Err(FilterError::spec(IIR_BAND_UNSUPPORTED));
        }
        for cutoff in self.cutoffs() {
            validate_cutoff(cutoff, sample_rate)?;
        }
        if let [low, high] = self.cutoffs()[..] {
            if low >= high {
                return Err(FilterError::spec(format!(
                    "band edges must satisfy low < high (got {low} Hz and {high} Hz)"
                )));
            }
        }
        if let FilterFamily::ChebyshevI { ripple_db } = self.family() {
            validate_ripple(ripple_db)?;
        }
        Ok(())
    }

    /// Validate and design the coefficients for this specification.
    pub fn design(&self, sample_rate: f64) -> FilterResult<FilterCoefficients> {
        self.validate(sample_rate)?;
        let family = self.family();
        let order = self.order();

        match (self, family.iir_parts()) {
            (FilterSpec::Lowpass { cutoff_hz, .. }, Some((filter_type, ripple))) => {
                iir_filtering::design_lowpass(filter_type, order, *cutoff_hz, sample_rate, ripple)
            }
            (FilterSpec::Highpass { cutoff_hz, .. }, Some((filter_type, ripple))) => {
                iir_filtering::design_highpass(filter_type, order, *cutoff_hz, sample_rate, ripple)
            }
            (FilterSpec::Bandpass { .. } | FilterSpec::Bandstop { .. }, Some(_)) => {
                Err(FilterError::spec(IIR_BAND_UNSUPPORTED))
            }
            (_, None) => {
                let FilterFamily::Fir { window } = family else {
                    return Err(FilterError::spec("expected an FIR family"));
                };
                let pass_zero = matches!(
                    self.response(),
                    FilterResponse::LowPass | FilterResponse::BandStop
                );
                fir_filtering::design_fir(order, &self.cutoffs(), pass_zero, window, sample_rate)
            }
        }
    }
}

/// How the signal is extended before zero-phase filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum PadType {
    /// Point-symmetric reflection about the end samples: `2*x[0] - x[i]`.
    #[default]
    Odd,
    /// Mirror reflection excluding the end samples: `x[i]`.
    Even,
    /// Repeat the end samples.
    Constant,
    /// No extension; the edges keep their transients.
    None,
}

/// Parameters of the forward-backward filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct ZeroPhaseConfig {
    /// Extension applied at both ends.
    pub pad_type: PadType,
    /// Extension length; `None` uses `3 * max(len(a), len(b))`.
    pub pad_len: Option<usize>,
}

impl ZeroPhaseConfig {
    /// Odd extension with the default pad length.
    pub const fn new() -> Self {
        Self {
            pad_type: PadType::Odd,
            pad_len: None,
        }
    }

    /// Set the extension type.
    pub const fn with_pad_type(mut self, pad_type: PadType) -> Self {
        self.pad_type = pad_type;
        self
    }

    /// Set an explicit extension length.
    pub const fn with_pad_len(mut self, pad_len: usize) -> Self {
        self.pad_len = Some(pad_len);
        self
    }

    /// Extension length used for the given coefficients.
    pub fn effective_pad_len(&self, coeffs: &FilterCoefficients) -> usize {
        match self.pad_type {
            PadType::None => 0,
            _ => self.pad_len.unwrap_or_else(|| coeffs.default_pad_len()),
        }
    }
}

/// How coefficients are run over a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum FilterMode {
    /// Single forward pass with zero initial conditions.
    Causal,
    /// Forward-backward pass with edge extension.
    ZeroPhase(ZeroPhaseConfig),
}

impl FilterMode {
    /// Zero-phase mode with odd extension and default pad length.
    pub const fn zero_phase() -> Self {
        FilterMode::ZeroPhase(ZeroPhaseConfig::new())
    }
}

impl Default for FilterMode {
    fn default() -> Self {
        Self::zero_phase()
    }
}

pub(crate) fn validate_sample_rate(sample_rate: f64) -> FilterResult<()> {
    if !(sample_rate.is_finite() && sample_rate > 0.0) {
        return Err(FilterError::parameter(format!(
            "sample rate must be positive and finite (got {sample_rate})"
        )));
    }
    Ok(())
}

/// Relative margin kept from 0 and Nyquist so pre-warping stays finite.
pub(crate) const CUTOFF_MARGIN: f64 = 1e-9;

pub(crate) fn validate_cutoff(cutoff_hz: f64, sample_rate: f64) -> FilterResult<()> {
    let nyquist = sample_rate / 2.0;
    let margin = CUTOFF_MARGIN * nyquist;
    if !cutoff_hz.is_finite() || cutoff_hz <= margin || cutoff_hz >= nyquist - margin {
        return Err(FilterError::spec(format!(
            "cutoff frequency must lie strictly between 0 and Nyquist ({nyquist} Hz), got {cutoff_hz} Hz"
        )));
    }
    Ok(())
}

pub(crate) fn validate_ripple(ripple_db: f64) -> FilterResult<()> {
    if !(ripple_db.is_finite() && ripple_db > 0.0) {
        return Err(FilterError::spec(format!(
            "passband ripple must be a positive number of dB (got {ripple_db})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_shapes() {
        let hamming = WindowType::Hamming.coefficients(5);
        assert_eq!(hamming.len(), 5);
        assert!((hamming[0] - 0.08).abs() < 1e-12);
        assert!((hamming[2] - 1.0).abs() < 1e-12);
        assert!((hamming[4] - 0.08).abs() < 1e-12);

        let hann = WindowType::Hanning.coefficients(5);
        assert!(hann[0].abs() < 1e-12);
        assert!((hann[2] - 1.0).abs() < 1e-12);

        assert_eq!(WindowType::Rectangular.coefficients(3), vec![1.0; 3]);
        assert_eq!(WindowType::Blackman.coefficients(1), vec![1.0]);
    }

    #[test]
    fn test_filter_spec_accessors() {
        let spec = FilterSpec::butterworth_lowpass(4, 30.0);
        assert_eq!(spec.response(), FilterResponse::LowPass);
        assert_eq!(spec.family(), FilterFamily::Butterworth);
        assert_eq!(spec.order(), 4);
        assert_eq!(spec.cutoffs(), vec![30.0]);

        let spec = FilterSpec::chebyshev_i(FilterResponse::HighPass, 4, 100.0, 1.0);
        assert_eq!(spec.response(), FilterResponse::HighPass);
        assert_eq!(spec.family(), FilterFamily::ChebyshevI { ripple_db: 1.0 });

        let spec = FilterSpec::fir_bandpass(101, 40.0, 100.0);
        assert_eq!(spec.cutoffs(), vec![40.0, 100.0]);
        assert_eq!(
            spec.family(),
            FilterFamily::Fir {
                window: WindowType::Hamming
            }
        );
    }

    #[test]
    fn test_filter_spec_validation() {
        let fs = 1000.0;
        assert!(FilterSpec::butterworth_lowpass(4, 30.0).validate(fs).is_ok());
        assert!(FilterSpec::butterworth_lowpass(0, 30.0).validate(fs).is_err());
        assert!(FilterSpec::butterworth_lowpass(4, 600.0).validate(fs).is_err());
        assert!(FilterSpec::butterworth_lowpass(4, 500.0).validate(fs).is_err());
        assert!(FilterSpec::butterworth_lowpass(4, 0.0).validate(fs).is_err());
        assert!(FilterSpec::butterworth_lowpass(4, f64::NAN).validate(fs).is_err());
        assert!(FilterSpec::butterworth_lowpass(4, 30.0).validate(0.0).is_err());
        assert!(
            FilterSpec::chebyshev_i(FilterResponse::LowPass, 4, 30.0, 0.0)
                .validate(fs)
                .is_err()
        );
        assert!(FilterSpec::fir_bandpass(101, 100.0, 40.0).validate(fs).is_err());
    }

    #[test]
    fn test_filter_spec_design_dispatch() {
        let fs = 1000.0;
        let lp = FilterSpec::butterworth_lowpass(4, 30.0).design(fs).unwrap();
        assert_eq!(lp.a().len(), 5);

        let bp = FilterSpec::fir_bandpass(101, 40.0, 100.0).design(fs).unwrap();
        assert!(bp.is_fir());
        assert_eq!(bp.b().len(), 101);

        let iir_band = FilterSpec::Bandpass {
            family: FilterFamily::Butterworth,
            order: 4,
            low_hz: 40.0,
            high_hz: 100.0,
        };
        assert!(matches!(
            iir_band.design(fs),
            Err(FilterError::InvalidFilterSpec(_))
        ));
    }

    #[test]
    fn test_chebyshev_band_response_reports_unsupported() {
        for response in [FilterResponse::BandPass, FilterResponse::BandStop] {
            let spec = FilterSpec::chebyshev_i(response, 4, 100.0, 1.0);
            assert_eq!(spec.response(), response);
            match spec.validate(1000.0) {
                Err(FilterError::InvalidFilterSpec(msg)) => {
                    assert!(msg.contains("FIR family"), "unexpected message: {msg}");
                }
                other => panic!("expected InvalidFilterSpec, got {other:?}"),
            }
            assert!(matches!(
                spec.design(1000.0),
                Err(FilterError::InvalidFilterSpec(msg)) if msg.contains("FIR family")
            ));
        }
    }

    #[test]
    fn test_zero_phase_config() {
        let config = ZeroPhaseConfig::new();
        assert_eq!(config, ZeroPhaseConfig::default());
        assert_eq!(config.pad_type, PadType::Odd);

        let config = config.with_pad_type(PadType::Even).with_pad_len(7);
        assert_eq!(config.pad_len, Some(7));

        let coeffs = FilterCoefficients::new(vec![1.0, 2.0, 1.0], vec![1.0, 0.5]).unwrap();
        assert_eq!(ZeroPhaseConfig::new().effective_pad_len(&coeffs), 9);
        assert_eq!(config.effective_pad_len(&coeffs), 7);
        assert_eq!(
            ZeroPhaseConfig::new()
                .with_pad_type(PadType::None)
                .effective_pad_len(&coeffs),
            0
        );
        assert_eq!(FilterMode::default(), FilterMode::zero_phase());
    }
}
