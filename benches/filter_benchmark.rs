//! Benchmark for filter design, causal and zero-phase application, and spectra
//!
//! Runs each operation on signals of increasing length and reports
//! mean, spread, median and range in milliseconds.

use signal_filtering::{
    FilterCoefficients, FilterMode, IirFilterType, apply, design_bandpass_fir, design_highpass,
    design_lowpass, frequency_response, spectrum,
};
use std::time::Instant;

const SAMPLE_RATE: f64 = 1000.0;

/// Generate a two-tone test signal
fn generate_test_signal(duration_seconds: f64) -> Vec<f64> {
    let num_samples = (duration_seconds * SAMPLE_RATE) as usize;
    (0..num_samples)
        .map(|i| {
            let t = i as f64 / SAMPLE_RATE;
            (2.0 * std::f64::consts::PI * 5.0 * t).sin()
                + 0.5 * (2.0 * std::f64::consts::PI * 50.0 * t).sin()
        })
        .collect()
}

/// Time `op` over several runs after a short warm-up
fn time_runs<F>(label: &str, mut op: F)
where
    F: FnMut() -> bool,
{
    for _ in 0..3 {
        let _ = op();
    }

    let num_runs = 10;
    let mut times = Vec::with_capacity(num_runs);
    for _ in 0..num_runs {
        let start = Instant::now();
        let ok = op();
        let elapsed = start.elapsed();
        assert!(ok, "{label} failed");
        times.push(elapsed.as_secs_f64() * 1000.0);
    }

    times.sort_by(f64::total_cmp);
    let mean = times.iter().sum::<f64>() / times.len() as f64;
    let std = (times.iter().map(|&x| (x - mean).powi(2)).sum::<f64>() / times.len() as f64).sqrt();
    let median = times[times.len() / 2];

    println!(
        "  {label:<28} {mean:>8.3}ms ± {std:.3}ms (median: {median:.3}ms, range: {:.3}-{:.3}ms)",
        times[0],
        times[times.len() - 1]
    );
}

fn benchmark_design() {
    println!("Design");
    time_runs("butterworth lowpass, N=4", || {
        design_lowpass(IirFilterType::Butterworth, 4, 30.0, SAMPLE_RATE, None).is_ok()
    });
    time_runs("chebyshev I highpass, N=8", || {
        design_highpass(IirFilterType::ChebyshevI, 8, 100.0, SAMPLE_RATE, Some(1.0)).is_ok()
    });
    time_runs("FIR bandpass, 101 taps", || {
        design_bandpass_fir(101, 40.0, 100.0, SAMPLE_RATE).is_ok()
    });
    println!();
}

fn benchmark_apply(duration: f64, filters: &[(&str, FilterCoefficients)]) {
    let signal = generate_test_signal(duration);
    println!("Apply: {:.1}s signal, {} samples", duration, signal.len());

    for (name, coeffs) in filters {
        time_runs(&format!("{name} causal"), || {
            apply(coeffs, &signal, FilterMode::Causal).is_ok()
        });
        time_runs(&format!("{name} zero-phase"), || {
            apply(coeffs, &signal, FilterMode::zero_phase()).is_ok()
        });
    }
    time_runs("spectrum", || spectrum(&signal, SAMPLE_RATE).is_ok());
    println!();
}

fn main() {
    println!("Signal Filtering Benchmark");
    println!("==========================");
    println!();

    benchmark_design();

    let filters = [
        (
            "butterworth LP",
            design_lowpass(IirFilterType::Butterworth, 4, 30.0, SAMPLE_RATE, None),
        ),
        (
            "chebyshev I HP",
            design_highpass(IirFilterType::ChebyshevI, 4, 100.0, SAMPLE_RATE, Some(1.0)),
        ),
        ("FIR BP", design_bandpass_fir(101, 40.0, 100.0, SAMPLE_RATE)),
    ];
    let filters: Vec<(&str, FilterCoefficients)> = filters
        .into_iter()
        .map(|(name, coeffs)| (name, coeffs.expect("reference filters are valid")))
        .collect();

    println!("Frequency response");
    for (name, coeffs) in &filters {
        time_runs(&format!("{name}, 1024 points"), || {
            frequency_response(coeffs, SAMPLE_RATE, 1024).is_ok()
        });
    }
    println!();

    for duration in [1.0, 10.0, 60.0] {
        benchmark_apply(duration, &filters);
    }

    println!("Benchmark Complete!");
}
