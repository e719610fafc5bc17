//! [`SignalFiltering`] for [`Signal`].

use super::coefficients::FilterCoefficients;
use super::spectral::{self, ComplexResponse};
use super::traits::SignalFiltering;
use super::types::{FilterMode, FilterResponse, FilterSpec};
use super::filter_apply;
use crate::{FilterResult, Signal};

impl SignalFiltering for Signal {
    fn apply_filter(&self, coeffs: &FilterCoefficients, mode: FilterMode) -> FilterResult<Self> {
        let output = filter_apply::apply(coeffs, self.as_slice(), mode)?;
        self.with_samples(output)
    }

    fn apply_spec(&self, spec: &FilterSpec, mode: FilterMode) -> FilterResult<Self> {
        let coeffs = spec.design(self.sample_rate())?;
        self.apply_filter(&coeffs, mode)
    }

    fn butterworth_lowpass(&self, order: usize, cutoff_hz: f64) -> FilterResult<Self> {
        let spec = FilterSpec::butterworth_lowpass(order, cutoff_hz);
        self.apply_spec(&spec, FilterMode::zero_phase())
    }

    fn butterworth_highpass(&self, order: usize, cutoff_hz: f64) -> FilterResult<Self> {
        let spec = FilterSpec::butterworth_highpass(order, cutoff_hz);
        self.apply_spec(&spec, FilterMode::zero_phase())
    }

    fn chebyshev_i(
        &self,
        response: FilterResponse,
        order: usize,
        cutoff_hz: f64,
        ripple_db: f64,
    ) -> FilterResult<Self> {
        let spec = FilterSpec::chebyshev_i(response, order, cutoff_hz, ripple_db);
        self.apply_spec(&spec, FilterMode::zero_phase())
    }

    fn bandpass_fir(&self, tap_count: usize, low_hz: f64, high_hz: f64) -> FilterResult<Self> {
        let spec = FilterSpec::fir_bandpass(tap_count, low_hz, high_hz);
        self.apply_spec(&spec, FilterMode::zero_phase())
    }

    fn spectrum(&self) -> FilterResult<ComplexResponse> {
        spectral::spectrum(self.as_slice(), self.sample_rate())
    }
}
