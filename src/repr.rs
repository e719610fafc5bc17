//! Sampled signal representation.
//!
//! A [`Signal`] pairs an `ndarray` buffer of real samples with the sampling
//! rate they were taken at. Every time-domain operation in the crate returns a
//! new `Signal` of the same length and rate instead of mutating its input.
//!
//! # Examples
//!
//! ```rust
//! use signal_filtering::Signal;
//! use ndarray::array;
//!
//! let signal = Signal::new(array![0.0, 0.5, 1.0, 0.5], 1000.0).unwrap();
//! assert_eq!(signal.len(), 4);
//! assert_eq!(signal.sample_rate(), 1000.0);
//! assert_eq!(signal.duration_seconds(), 0.004);
//! ```

use crate::operations::types::validate_sample_rate;
use crate::utils::math::samples_to_time;
use crate::{FilterError, FilterResult};
use ndarray::Array1;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// Real samples `x[0..N]` taken at a fixed rate in Hz.
///
/// The sample buffer is always contiguous and every sample is finite.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Signal {
    samples: Array1<f64>,
    sample_rate: f64,
}

impl Signal {
    /// Create a signal from an array of samples.
    ///
    /// # Errors
    /// [`FilterError::InvalidParameter`] for a non-positive or non-finite
    /// sampling rate, or any non-finite sample.
    pub fn new(samples: Array1<f64>, sample_rate: f64) -> FilterResult<Self> {
        validate_sample_rate(sample_rate)?;
        if let Some(idx) = samples.iter().position(|v| !v.is_finite()) {
            return Err(FilterError::parameter(format!(
                "sample {idx} is not finite"
            )));
        }
        let samples = if samples.is_standard_layout() {
            samples
        } else {
            samples.as_standard_layout().into_owned()
        };
        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Create a signal from a vector of samples.
    pub fn from_vec(samples: Vec<f64>, sample_rate: f64) -> FilterResult<Self> {
        Self::new(Array1::from_vec(samples), sample_rate)
    }

    /// A new signal at the same rate holding `samples`.
    pub fn with_samples(&self, samples: Vec<f64>) -> FilterResult<Self> {
        Self::from_vec(samples, self.sample_rate)
    }

    /// Sampling rate in Hz.
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Nyquist frequency, half the sampling rate.
    pub fn nyquist(&self) -> f64 {
        self.sample_rate / 2.0
    }

    /// The sample buffer.
    pub fn samples(&self) -> &Array1<f64> {
        &self.samples
    }

    /// The samples as a contiguous slice.
    pub fn as_slice(&self) -> &[f64] {
        // constructors enforce standard layout
        self.samples.as_slice().unwrap_or(&[])
    }

    /// Consume into the sample buffer.
    pub fn into_samples(self) -> Array1<f64> {
        self.samples
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// True if the signal has no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Length in seconds.
    pub fn duration_seconds(&self) -> f64 {
        samples_to_time(self.len(), self.sample_rate)
    }

    /// Time of each sample in seconds, `i / sample_rate`.
    pub fn time_axis(&self) -> Array1<f64> {
        Array1::from_iter((0..self.len()).map(|i| samples_to_time(i, self.sample_rate)))
    }

    /// Root-mean-square level; zero for an empty signal.
    pub fn rms(&self) -> f64 {
        if self.is_empty() {
            return 0.0;
        }
        (self.samples.mapv(|v| v * v).sum() / self.len() as f64).sqrt()
    }

    /// Largest absolute sample; zero for an empty signal.
    pub fn peak(&self) -> f64 {
        self.samples.iter().fold(0.0, |acc, v| acc.max(v.abs()))
    }

    /// Sample-wise sum with another signal of the same length and rate.
    pub fn try_add(&self, other: &Signal) -> FilterResult<Self> {
        if self.len() != other.len() {
            return Err(FilterError::parameter(format!(
                "cannot add signals of length {} and {}",
                self.len(),
                other.len()
            )));
        }
        if self.sample_rate != other.sample_rate {
            return Err(FilterError::parameter(format!(
                "cannot add signals sampled at {} Hz and {} Hz",
                self.sample_rate, other.sample_rate
            )));
        }
        Self::new(&self.samples + &other.samples, self.sample_rate)
    }
}
