//! Rational transfer-function coefficients shared by every filter family.

use crate::{FilterError, FilterResult};

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Numerator (`b`) and denominator (`a`) coefficients of `H(z) = B(z) / A(z)`.
///
/// Construction normalises the denominator so that `a[0] == 1.0` and rejects
/// empty, degenerate, or non-finite coefficient sets. Once built the
/// coefficients are immutable and may be shared across threads and reused for
/// any number of signals.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct FilterCoefficients {
    b: Vec<f64>,
    a: Vec<f64>,
}

impl FilterCoefficients {
    /// Create coefficients from `b` and `a`, dividing both by `a[0]`.
    pub fn new(b: Vec<f64>, a: Vec<f64>) -> FilterResult<Self> {
        if b.is_empty() {
            return Err(FilterError::coefficients("numerator (b) is empty"));
        }
        let Some(&a0) = a.first() else {
            return Err(FilterError::coefficients("denominator (a) is empty"));
        };
        if a0 == 0.0 {
            return Err(FilterError::coefficients(
                "leading denominator coefficient a[0] is zero",
            ));
        }
        if let Some(pos) = b.iter().chain(a.iter()).position(|v| !v.is_finite()) {
            return Err(FilterError::coefficients(format!(
                "coefficient {pos} is not finite"
            )));
        }

        let (b, a): (Vec<f64>, Vec<f64>) = if a0 == 1.0 {
            (b, a)
        } else {
            (
                b.iter().map(|v| v / a0).collect(),
                a.iter().map(|v| v / a0).collect(),
            )
        };
        // a tiny a[0] can overflow the division
        if let Some(pos) = b.iter().chain(a.iter()).position(|v| !v.is_finite()) {
            return Err(FilterError::coefficients(format!(
                "coefficient {pos} overflows when normalised by a[0] = {a0:e}"
            )));
        }
        Ok(Self { b, a })
    }

    /// Create FIR coefficients; the denominator is exactly `[1.0]`.
    pub fn fir(taps: Vec<f64>) -> FilterResult<Self> {
        Self::new(taps, vec![1.0])
    }

    /// Numerator coefficients.
    pub fn b(&self) -> &[f64] {
        &self.b
    }

    /// Denominator coefficients, `a[0] == 1.0`.
    pub fn a(&self) -> &[f64] {
        &self.a
    }

    /// Consume into `(b, a)`.
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.b, self.a)
    }

    /// True when the filter has no feedback.
    pub fn is_fir(&self) -> bool {
        self.a.len() == 1
    }

    /// Number of delay elements, `max(len(a), len(b)) - 1`.
    pub fn order(&self) -> usize {
        self.len() - 1
    }

    /// `max(len(a), len(b))`.
    pub fn len(&self) -> usize {
        self.a.len().max(self.b.len())
    }

    /// Always false; coefficient sets are never empty.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Default zero-phase extension length, `3 * max(len(a), len(b))`.
    pub fn default_pad_len(&self) -> usize {
        3 * self.len()
    }

    /// Steady-state DC gain `sum(b) / sum(a)`, `None` if `sum(a)` vanishes.
    pub fn dc_gain(&self) -> Option<f64> {
        let den: f64 = self.a.iter().sum();
        if den.abs() < f64::EPSILON {
            None
        } else {
            Some(self.b.iter().sum::<f64>() / den)
        }
    }
}
