//! Normalised analog lowpass prototypes.
//!
//! Each prototype has its cutoff at 1 rad/s and unity gain at DC. The
//! bilinear mapper in [`iir_filtering`](super::iir_filtering) scales and
//! transforms these into digital filters.

use super::types::{IirFilterType, validate_ripple};
use crate::{FilterError, FilterResult};
use num_complex::Complex;
use std::f64::consts::PI;

/// Zeros, poles and gain of an analog transfer function in `s`.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalogPrototype {
    /// Finite zeros; empty for all-pole prototypes.
    pub zeros: Vec<Complex<f64>>,
    /// Poles, all in the left half-plane.
    pub poles: Vec<Complex<f64>>,
    /// Overall gain.
    pub gain: f64,
    /// Chebyshev ripple factor `epsilon`, `None` for Butterworth.
    pub ripple_factor: Option<f64>,
}

impl AnalogPrototype {
    /// Prototype for the given family; `ripple_db` is required for Chebyshev I.
    pub fn new(
        filter_type: IirFilterType,
        order: usize,
        ripple_db: Option<f64>,
    ) -> FilterResult<Self> {
        match filter_type {
            IirFilterType::Butterworth => Self::butterworth(order),
            IirFilterType::ChebyshevI => {
                let ripple_db = ripple_db.ok_or_else(|| {
                    FilterError::spec("passband ripple required for Chebyshev Type I filter")
                })?;
                Self::chebyshev_i(order, ripple_db)
            }
        }
    }

    /// Butterworth poles equally spaced on the left half of the unit circle.
    pub fn butterworth(order: usize) -> FilterResult<Self> {
        check_order(order)?;
        Ok(Self {
            zeros: Vec::new(),
            poles: butterworth_angles(order)
                .map(|theta| Complex::from_polar(1.0, theta))
                .collect(),
            gain: 1.0,
            ripple_factor: None,
        })
    }

    /// Chebyshev Type I poles on an ellipse, with the gain set for unity at DC.
    pub fn chebyshev_i(order: usize, ripple_db: f64) -> FilterResult<Self> {
        check_order(order)?;
        validate_ripple(ripple_db)?;

        let epsilon = (10f64.powf(ripple_db / 10.0) - 1.0).sqrt();
        let mu = (1.0 / epsilon).asinh() / order as f64;
        let (sinh_mu, cosh_mu) = (mu.sinh(), mu.cosh());

        let poles: Vec<Complex<f64>> = butterworth_angles(order)
            .map(|theta| Complex::new(sinh_mu * theta.cos(), cosh_mu * theta.sin()))
            .collect();
        let gain = dc_gain(&poles);

        Ok(Self {
            zeros: Vec::new(),
            poles,
            gain,
            ripple_factor: Some(epsilon),
        })
    }

    /// Number of poles.
    pub fn order(&self) -> usize {
        self.poles.len()
    }

    /// Evaluate the transfer function at the complex frequency `s`.
    pub fn response_at(&self, s: Complex<f64>) -> Complex<f64> {
        let num = self
            .zeros
            .iter()
            .fold(Complex::new(self.gain, 0.0), |acc, z| acc * (s - *z));
        let den = self
            .poles
            .iter()
            .fold(Complex::new(1.0, 0.0), |acc, p| acc * (s - *p));
        num / den
    }
}

fn check_order(order: usize) -> FilterResult<()> {
    if order == 0 {
        return Err(FilterError::spec("filter order must be at least 1"));
    }
    Ok(())
}

/// `theta_k = pi/2 + pi(2k+1)/(2n)` for `k = 0..n`.
fn butterworth_angles(order: usize) -> impl Iterator<Item = f64> {
    let n = order as f64;
    (0..order).map(move |k| PI / 2.0 + PI * (2 * k + 1) as f64 / (2.0 * n))
}

/// Gain making `|H(0)| == 1` for an all-pole prototype: `Re prod(-p)`.
fn dc_gain(poles: &[Complex<f64>]) -> f64 {
    poles
        .iter()
        .fold(Complex::new(1.0, 0.0), |acc, p| acc * (-*p))
        .re
}
