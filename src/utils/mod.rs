//! Utility functions supporting filter design and analysis.
//!
//! # Modules
//!
//! - [`generation`] - Test-signal generation (tones and seeded noise)
//! - [`math`] - Level conversions and frequency/time axes

pub mod generation;
pub mod math;

pub use generation::*;
pub use math::*;
