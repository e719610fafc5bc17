// Correctness and logic
#![warn(clippy::unit_cmp)] // Detects comparing unit types
#![warn(clippy::match_same_arms)]
// Duplicate match arms

// Performance-focused
#![warn(clippy::inefficient_to_string)] // `format!("{}", x)` vs `x.to_string()`
#![warn(clippy::map_clone)] // Cloning inside `map()` unnecessarily
#![warn(clippy::unnecessary_to_owned)] // Detects redundant `.to_owned()` or `.clone()`
#![warn(clippy::large_stack_arrays)] // Helps avoid stack overflows
#![warn(clippy::needless_collect)] // Avoids `.collect().iter()` chains

// Style and idiomatic Rust
#![warn(clippy::redundant_clone)] // Detects unnecessary `.clone()`
#![warn(clippy::identity_op)] // e.g., `x + 0`, `x * 1`
#![warn(clippy::needless_return)] // Avoids `return` at the end of functions
#![warn(clippy::manual_map)] // Use `.map()` instead of manual `match`
#![warn(clippy::unwrap_used)] // Avoids using `unwrap()`

// Maintainability
#![warn(clippy::missing_panics_doc)] // Docs for functions that might panic
#![warn(clippy::missing_const_for_fn)] // Suggests making eligible functions `const`
#![allow(clippy::too_many_arguments)]
#![deny(missing_docs)] // Documentation is a must for release

//! # signal_filtering
//!
//! Design, application and spectral analysis of digital filters for finite,
//! in-memory sample sequences.
//!
//! ## Overview
//!
//! - **IIR design**: Butterworth and Chebyshev Type I low-pass and high-pass
//!   filters from normalised analog prototypes via pre-warping and the bilinear
//!   transform.
//! - **FIR design**: windowed-sinc filters for arbitrary band edges, including
//!   band-pass and band-stop.
//! - **Application**: causal filtering or zero-phase forward-backward filtering
//!   with edge extension and steady-state initial conditions.
//! - **Analysis**: frequency responses on a uniform grid or at chosen
//!   frequencies, and FFT spectra of signals.
//!
//! Designed coefficients are immutable values; design once, then apply to any
//! number of signals.
//!
//! ## Features
//!
//! - `random-generation` (default): seeded Gaussian noise generation and the
//!   [`demo`] module (uses `rand`)
//! - `serialization` (default): serde support for signals, coefficients,
//!   responses and demo reports, plus JSON output
//! - `parallel-processing`: filter batches of signals on a rayon pool
//! - `cli`: the `filter_demo` binary (uses `clap` and `env_logger`)
//!
//! ## Error Handling
//!
//! Every fallible operation returns [`FilterResult`]:
//!
//! ```rust
//! use signal_filtering::{FilterError, FilterMode, IirFilterType, apply, design_lowpass};
//!
//! let coeffs = design_lowpass(IirFilterType::Butterworth, 3, 30.0, 1000.0, None).unwrap();
//!
//! match apply(&coeffs, &[0.0; 5], FilterMode::zero_phase()) {
//!     Ok(_) => unreachable!(),
//!     Err(FilterError::InsufficientSignalLength { required, actual }) => {
//!         assert_eq!((required, actual), (13, 5));
//!     }
//!     Err(other) => panic!("unexpected error: {other}"),
//! }
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use signal_filtering::{
//!     FilterMode, IirFilterType, apply, design_bandpass_fir, design_highpass, design_lowpass,
//!     frequency_response, spectrum,
//! };
//!
//! # fn main() -> Result<(), signal_filtering::FilterError> {
//! let fs = 1000.0;
//! let x: Vec<f64> = (0..1000)
//!     .map(|i| {
//!         let t = i as f64 / fs;
//!         (2.0 * std::f64::consts::PI * 5.0 * t).sin()
//!             + 0.5 * (2.0 * std::f64::consts::PI * 50.0 * t).sin()
//!     })
//!     .collect();
//!
//! let lowpass = design_lowpass(IirFilterType::Butterworth, 4, 30.0, fs, None)?;
//! let highpass = design_highpass(IirFilterType::ChebyshevI, 4, 100.0, fs, Some(1.0))?;
//! let bandpass = design_bandpass_fir(101, 40.0, 100.0, fs)?;
//!
//! let smooth = apply(&lowpass, &x, FilterMode::zero_phase())?;
//! assert_eq!(smooth.len(), x.len());
//!
//! let response = frequency_response(&highpass, fs, 1024)?;
//! assert_eq!(response.len(), 1024);
//!
//! let band = apply(&bandpass, &x, FilterMode::zero_phase())?;
//! let bins = spectrum(&band, fs)?.non_negative();
//! assert_eq!(bins.len(), 501);
//! # Ok(())
//! # }
//! ```

pub mod batch;
#[cfg(feature = "random-generation")]
pub mod demo;
pub mod error;
pub mod operations;
pub mod repr;
pub mod utils;

pub use batch::apply_batch;
pub use error::{FilterError, FilterResult};
pub use operations::{
    ComplexResponse, FilterCoefficients, FilterFamily, FilterMode, FilterResponse, FilterSpec,
    IirFilterType, PadType, SignalFiltering, WindowType, ZeroPhaseConfig, apply,
    design_bandpass_fir, design_highpass, design_lowpass, frequency_response,
    frequency_response_at, spectrum, steady_state_initial_conditions,
};
pub use repr::Signal;
