//! Applying one coefficient set to many signals.
//!
//! With `feature = "parallel-processing"` the signals are filtered on the
//! rayon thread pool; otherwise they are processed in order on the calling
//! thread. Results keep the input order either way.

#[cfg(feature = "parallel-processing")]
mod parallel;

#[cfg(feature = "parallel-processing")]
pub use parallel::apply_with_threads;

use crate::operations::{FilterCoefficients, FilterMode, SignalFiltering};
use crate::{FilterResult, Signal};

/// Filter every signal with the same coefficients.
///
/// Each signal is filtered independently; the first failing signal's error
/// is returned and no partial output is produced.
pub fn apply_batch(
    coeffs: &FilterCoefficients,
    signals: &[Signal],
    mode: FilterMode,
) -> FilterResult<Vec<Signal>> {
    tracing::debug!(
        signals = signals.len(),
        parallel = cfg!(feature = "parallel-processing"),
        "applying filter batch"
    );

    #[cfg(feature = "parallel-processing")]
    {
        parallel::apply_parallel(coeffs, signals, mode)
    }
    #[cfg(not(feature = "parallel-processing"))]
    {
        apply_sequential(coeffs, signals, mode)
    }
}

/// Filter every signal in order on the calling thread.
pub fn apply_sequential(
    coeffs: &FilterCoefficients,
    signals: &[Signal],
    mode: FilterMode,
) -> FilterResult<Vec<Signal>> {
    signals
        .iter()
        .map(|signal| signal.apply_filter(coeffs, mode))
        .collect()
}
