//! Trait definitions for filtering operations on sampled signals.
//!
//! The free functions in [`iir_filtering`](super::iir_filtering),
//! [`fir_filtering`](super::fir_filtering), [`filter_apply`](super::filter_apply)
//! and [`spectral`](super::spectral) work on raw slices and explicit sampling
//! rates. [`SignalFiltering`] exposes the same operations as methods on a type
//! that already knows its sampling rate.

use super::coefficients::FilterCoefficients;
use super::spectral::ComplexResponse;
use super::types::{FilterMode, FilterResponse, FilterSpec};
use crate::FilterResult;

/// Design-and-apply operations for sampled signals.
///
/// Every method leaves `self` untouched and returns a new signal of the same
/// length and sampling rate. The convenience filters run zero-phase with the
/// default edge extension; use [`apply_filter`](Self::apply_filter) to choose
/// another [`FilterMode`].
pub trait SignalFiltering: Sized {
    /// Run designed coefficients over the signal.
    fn apply_filter(&self, coeffs: &FilterCoefficients, mode: FilterMode) -> FilterResult<Self>;

    /// Design `spec` at the signal's sampling rate and apply it.
    fn apply_spec(&self, spec: &FilterSpec, mode: FilterMode) -> FilterResult<Self>;

    /// Zero-phase Butterworth low-pass.
    fn butterworth_lowpass(&self, order: usize, cutoff_hz: f64) -> FilterResult<Self>;

    /// Zero-phase Butterworth high-pass.
    fn butterworth_highpass(&self, order: usize, cutoff_hz: f64) -> FilterResult<Self>;

    /// Zero-phase Chebyshev Type I low-pass or high-pass.
    ///
    /// Band responses are rejected with
    /// [`FilterError::InvalidFilterSpec`](crate::FilterError::InvalidFilterSpec).
    fn chebyshev_i(
        &self,
        response: FilterResponse,
        order: usize,
        cutoff_hz: f64,
        ripple_db: f64,
    ) -> FilterResult<Self>;

    /// Zero-phase windowed-FIR band-pass with a Hamming window.
    fn bandpass_fir(&self, tap_count: usize, low_hz: f64, high_hz: f64) -> FilterResult<Self>;

    /// Discrete spectrum of the signal, all `N` bins.
    fn spectrum(&self) -> FilterResult<ComplexResponse>;
}
