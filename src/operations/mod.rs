//! Filter design, application and spectral analysis.
//!
//! ## Module Organization
//!
//! - [`prototype`] - Normalised analog Butterworth and Chebyshev I prototypes
//! - [`iir_filtering`] - Bilinear-transform IIR design
//! - [`fir_filtering`] - Windowed-sinc FIR design
//! - [`coefficients`] - Validated `(b, a)` coefficient sets
//! - [`filter_apply`] - Causal and zero-phase application
//! - [`spectral`] - Frequency responses and DFT spectra
//! - [`traits`] / [`processing`] - Method-style access on [`Signal`](crate::Signal)
//! - [`types`] - Supporting types and enums
//!
//! ## Quick Start
//!
//! ```rust
//! use signal_filtering::{Signal, operations::*};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let samples: Vec<f64> = (0..1000)
//!     .map(|i| (2.0 * std::f64::consts::PI * 5.0 * i as f64 / 1000.0).sin())
//!     .collect();
//! let signal = Signal::from_vec(samples, 1000.0)?;
//!
//! // Design once, reuse for any number of signals
//! let coeffs = design_lowpass(IirFilterType::Butterworth, 4, 30.0, 1000.0, None)?;
//! let smoothed = signal.apply_filter(&coeffs, FilterMode::zero_phase())?;
//! assert_eq!(smoothed.len(), signal.len());
//!
//! // Inspect the filter
//! let response = frequency_response(&coeffs, 1000.0, 1024)?;
//! let db = response.magnitude_db();
//! # Ok(())
//! # }
//! ```

pub mod coefficients;
pub mod filter_apply;
pub mod fir_filtering;
pub mod iir_filtering;
pub mod processing;
pub mod prototype;
pub mod spectral;
pub mod traits;
pub mod types;

pub use coefficients::FilterCoefficients;
pub use filter_apply::{
    LinearFilter, apply, extend_edges, filtfilt, lfilter, steady_state_initial_conditions,
};
pub use fir_filtering::{
    design_bandpass_fir, design_bandstop_fir, design_fir, design_highpass_fir, design_lowpass_fir,
};
pub use iir_filtering::{design_highpass, design_iir_filter, design_lowpass};
pub use prototype::AnalogPrototype;
pub use spectral::{ComplexResponse, frequency_response, frequency_response_at, spectrum};
pub use traits::SignalFiltering;
pub use types::{
    FilterFamily, FilterMode, FilterResponse, FilterSpec, IirFilterType, PadType, WindowType,
    ZeroPhaseConfig,
};
