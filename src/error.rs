//! Error types and result utilities for filter design, application and analysis.

use thiserror::Error;

/// Convenience type alias for results that may contain FilterError
pub type FilterResult<T> = Result<T, FilterError>;

/// Error types that can occur while designing, applying or analysing filters.
#[derive(Error, Debug)]
pub enum FilterError {
    /// Error that occurs when a filter specification cannot be realised.
    ///
    /// Raised at design time for a bad order, ripple, tap count, or a cutoff
    /// that does not lie strictly between 0 and the Nyquist frequency.
    #[error("Invalid filter specification: {0}")]
    InvalidFilterSpec(String),

    /// Error that occurs when coefficients describe a degenerate recurrence.
    ///
    /// This includes an empty denominator, `a[0] == 0` and non-finite values.
    #[error("Invalid filter coefficients: {0}")]
    InvalidFilterCoefficients(String),

    /// Error that occurs when a signal is too short for zero-phase edge padding.
    #[error("Insufficient signal length: need at least {required} samples, got {actual}")]
    InsufficientSignalLength {
        /// Minimum number of samples the operation needs.
        required: usize,
        /// Number of samples that were supplied.
        actual: usize,
    },

    /// Error that occurs when a computation produces NaN or infinite values.
    #[error("Numerical instability: {0}")]
    NumericalInstability(String),

    /// Error that occurs when invalid parameters are provided to an operation.
    ///
    /// This includes cases like a non-positive sample rate, zero frequency
    /// points, or empty input sequences.
    #[error("Invalid parameter error: {0}")]
    InvalidParameter(String),

    /// Error raised while persisting results to disk.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error raised while encoding results for persistence.
    #[cfg(feature = "serialization")]
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FilterError {
    /// Shorthand for [`FilterError::InvalidFilterSpec`].
    pub fn spec(msg: impl Into<String>) -> Self {
        Self::InvalidFilterSpec(msg.into())
    }

    /// Shorthand for [`FilterError::InvalidFilterCoefficients`].
    pub fn coefficients(msg: impl Into<String>) -> Self {
        Self::InvalidFilterCoefficients(msg.into())
    }

    /// Shorthand for [`FilterError::InvalidParameter`].
    pub fn parameter(msg: impl Into<String>) -> Self {
        Self::InvalidParameter(msg.into())
    }
}

/// Returns an error naming `what` if any value in `values` is NaN or infinite.
pub(crate) fn ensure_finite(values: &[f64], what: &str) -> FilterResult<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(idx) => Err(FilterError::NumericalInstability(format!(
            "{what} contains a non-finite value at index {idx}"
        ))),
        None => Ok(()),
    }
}
