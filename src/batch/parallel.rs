//! Rayon-backed batch filtering.

use crate::operations::{FilterCoefficients, FilterMode, SignalFiltering};
use crate::{FilterError, FilterResult, Signal};
use rayon::prelude::*;

pub(super) fn apply_parallel(
    coeffs: &FilterCoefficients,
    signals: &[Signal],
    mode: FilterMode,
) -> FilterResult<Vec<Signal>> {
    signals
        .par_iter()
        .map(|signal| signal.apply_filter(coeffs, mode))
        .collect()
}

/// Filter every signal on a dedicated pool of `thread_count` threads.
pub fn apply_with_threads(
    coeffs: &FilterCoefficients,
    signals: &[Signal],
    mode: FilterMode,
    thread_count: usize,
) -> FilterResult<Vec<Signal>> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(thread_count)
        .build()
        .map_err(|e| FilterError::parameter(format!("failed to build thread pool: {e}")))?;
    pool.install(|| apply_parallel(coeffs, signals, mode))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operations::{IirFilterType, design_highpass};

    #[test]
    fn test_dedicated_pool_matches_sequential() {
        let coeffs = design_highpass(IirFilterType::ChebyshevI, 4, 100.0, 1000.0, Some(1.0)).unwrap();
        let inputs: Vec<Signal> = (0..8)
            .map(|k| {
                let samples = (0..256).map(|i| ((i * (k + 3)) % 17) as f64 - 8.0).collect();
                Signal::from_vec(samples, 1000.0).unwrap()
            })
            .collect();
        let parallel = apply_with_threads(&coeffs, &inputs, FilterMode::zero_phase(), 2).unwrap();
        let sequential = super::super::apply_sequential(&coeffs, &inputs, FilterMode::zero_phase()).unwrap();
        assert_eq!(parallel, sequential);
    }
}
