//! Reference filtering run: a noisy three-tone signal through three filters.
//!
//! [`run_demo`] synthesises `sin(2 pi 5 t) + 0.5 sin(2 pi 50 t) + 0.2 sin(2 pi 200 t)`
//! sampled at 1 kHz for one second, adds Gaussian noise, and filters the result
//! with:
//!
//! - a 4th-order Butterworth low-pass at 30 Hz
//! - a 4th-order Chebyshev I high-pass at 100 Hz with 1 dB ripple
//! - a 101-tap Hamming-windowed FIR band-pass over 40-100 Hz
//!
//! Every stage returns immutable data; plotting and other presentation is left
//! to consumers of the [`DemoReport`], which can be written out as JSON with
//! `feature = "serialization"`.

use std::time::Duration;

use crate::operations::{
    ComplexResponse, FilterCoefficients, FilterMode, FilterResponse, FilterSpec, SignalFiltering,
    frequency_response,
};
use crate::utils::generation::{ToneComponent, add_gaussian_noise, compound_tone, seeded_rng};
use crate::{FilterError, FilterResult, Signal};
use rand::Rng;

#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};
#[cfg(feature = "serialization")]
use std::path::{Path, PathBuf};

/// Parameters of a demo run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct DemoConfig {
    /// Sampling rate in Hz
    pub sample_rate: f64,
    /// Signal length
    pub duration: Duration,
    /// Tones summed into the clean signal
    pub tones: Vec<ToneComponent>,
    /// Standard deviation of the additive Gaussian noise
    pub noise_std: f64,
    /// RNG seed; `None` draws from OS entropy
    pub seed: Option<u64>,
    /// Named filters applied to the noisy signal, in order
    pub filters: Vec<(String, FilterSpec)>,
    /// Points in each frequency response
    pub response_points: usize,
    /// How the filters are run
    pub mode: FilterMode,
}

impl DemoConfig {
    /// The reference configuration.
    pub fn new() -> Self {
        Self {
            sample_rate: 1000.0,
            duration: Duration::from_secs(1),
            tones: vec![
                ToneComponent::new(5.0, 1.0),
                ToneComponent::new(50.0, 0.5),
                ToneComponent::new(200.0, 0.2),
            ],
            noise_std: 0.5,
            seed: None,
            filters: vec![
                ("lowpass".to_string(), FilterSpec::butterworth_lowpass(4, 30.0)),
                (
                    "highpass".to_string(),
                    FilterSpec::chebyshev_i(FilterResponse::HighPass, 4, 100.0, 1.0),
                ),
                ("bandpass".to_string(), FilterSpec::fir_bandpass(101, 40.0, 100.0)),
            ],
            response_points: 1024,
            mode: FilterMode::zero_phase(),
        }
    }

    /// Set the RNG seed.
    pub const fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the noise standard deviation.
    pub const fn with_noise_std(mut self, noise_std: f64) -> Self {
        self.noise_std = noise_std;
        self
    }

    /// Set the number of frequency-response points.
    pub const fn with_response_points(mut self, response_points: usize) -> Self {
        self.response_points = response_points;
        self
    }

    /// Set the filtering mode.
    pub const fn with_mode(mut self, mode: FilterMode) -> Self {
        self.mode = mode;
        self
    }

    /// Replace the filter list.
    pub fn with_filters(mut self, filters: Vec<(String, FilterSpec)>) -> Self {
        self.filters = filters;
        self
    }

    /// Validate the configuration.
    ///
    /// Checks the signal parameters and every filter specification against
    /// the sampling rate. Filter names become file names in
    /// [`DemoReport::write_json`], so they must be unique, non-empty, made of
    /// ASCII letters, digits, `-` and `_`, and must not be `signals`.
    pub fn validate(&self) -> FilterResult<()> {
        if !(self.sample_rate.is_finite() && self.sample_rate > 0.0) {
            return Err(FilterError::parameter(format!(
                "sample rate must be positive and finite (got {})",
                self.sample_rate
            )));
        }
        if self.duration.is_zero() {
            return Err(FilterError::parameter("duration must be non-zero"));
        }
        if self.tones.is_empty() {
            return Err(FilterError::parameter("at least one tone is required"));
        }
        if !(self.noise_std.is_finite() && self.noise_std >= 0.0) {
            return Err(FilterError::parameter(format!(
                "noise standard deviation must be finite and non-negative (got {})",
                self.noise_std
            )));
        }
        if self.response_points == 0 {
            return Err(FilterError::parameter(
                "response_points must be greater than 0",
            ));
        }
        for (idx, (name, spec)) in self.filters.iter().enumerate() {
            validate_filter_name(name)?;
            if self.filters[..idx].iter().any(|(other, _)| other == name) {
                return Err(FilterError::parameter(format!(
                    "filter name '{name}' is used more than once"
                )));
            }
            spec.validate(self.sample_rate).map_err(|e| {
                FilterError::spec(format!("filter '{name}': {e}"))
            })?;
        }
        Ok(())
    }
}

const SIGNALS_ARTIFACT: &str = "signals";

fn validate_filter_name(name: &str) -> FilterResult<()> {
    if name.is_empty() {
        return Err(FilterError::parameter("filter names must not be empty"));
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(FilterError::parameter(format!(
            "filter name '{name}' may only contain ASCII letters, digits, '-' and '_'"
        )));
    }
    if name == SIGNALS_ARTIFACT {
        return Err(FilterError::parameter(format!(
            "filter name '{name}' is reserved"
        )));
    }
    Ok(())
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// One filter's coefficients, output and frequency-domain views.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct FilterOutcome {
    /// Name from the configuration
    pub name: String,
    /// Specification the filter was designed from
    pub spec: FilterSpec,
    /// Designed coefficients
    pub coefficients: FilterCoefficients,
    /// Noisy signal after filtering
    pub filtered: Signal,
    /// Frequency response over `[0, Nyquist)`
    pub response: ComplexResponse,
    /// Spectrum of the filtered signal, DC to Nyquist
    pub spectrum: ComplexResponse,
}

/// Everything a demo run produced.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct DemoReport {
    /// Configuration the run used
    pub config: DemoConfig,
    /// Sum of tones
    pub clean: Signal,
    /// Clean signal plus noise
    pub noisy: Signal,
    /// Spectrum of the noisy signal, DC to Nyquist
    pub noisy_spectrum: ComplexResponse,
    /// One entry per configured filter, in order
    pub filters: Vec<FilterOutcome>,
}

impl DemoReport {
    /// Look up a filter outcome by name.
    pub fn filter(&self, name: &str) -> Option<&FilterOutcome> {
        self.filters.iter().find(|outcome| outcome.name == name)
    }

    /// Write the report as JSON files under `dir`, creating it if absent.
    ///
    /// Produces `signals.json` (clean and noisy signals with the noisy
    /// spectrum) and one `<name>.json` per filter. Returns the written paths.
    #[cfg(feature = "serialization")]
    pub fn write_json(&self, dir: impl AsRef<Path>) -> FilterResult<Vec<PathBuf>> {
        #[derive(Serialize)]
        struct SignalsArtifact<'a> {
            config: &'a DemoConfig,
            clean: &'a Signal,
            noisy: &'a Signal,
            noisy_spectrum: &'a ComplexResponse,
        }

        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;

        let mut written = Vec::with_capacity(self.filters.len() + 1);
        let signals = SignalsArtifact {
            config: &self.config,
            clean: &self.clean,
            noisy: &self.noisy,
            noisy_spectrum: &self.noisy_spectrum,
        };
        written.push(write_artifact(dir, SIGNALS_ARTIFACT, &signals)?);
        for outcome in &self.filters {
            written.push(write_artifact(dir, &outcome.name, outcome)?);
        }

        tracing::info!(dir = %dir.display(), files = written.len(), "wrote demo results");
        Ok(written)
    }
}

#[cfg(feature = "serialization")]
fn write_artifact<T: Serialize>(dir: &Path, name: &str, value: &T) -> FilterResult<PathBuf> {
    let path = dir.join(format!("{name}.json"));
    let file = std::io::BufWriter::new(std::fs::File::create(&path)?);
    serde_json::to_writer_pretty(file, value)?;
    tracing::debug!(path = %path.display(), "wrote artifact");
    Ok(path)
}

/// Run the demo with an RNG seeded from `config.seed`.
pub fn run_demo(config: &DemoConfig) -> FilterResult<DemoReport> {
    let mut rng = seeded_rng(config.seed);
    run_demo_with_rng(config, &mut rng)
}

/// Run the demo drawing noise from `rng`.
pub fn run_demo_with_rng<R: Rng + ?Sized>(
    config: &DemoConfig,
    rng: &mut R,
) -> FilterResult<DemoReport> {
    config.validate()?;

    let clean = compound_tone(&config.tones, config.duration, config.sample_rate)?;
    let noisy = add_gaussian_noise(&clean, config.noise_std, rng)?;
    let noisy_spectrum = noisy.spectrum()?.non_negative();
    tracing::info!(
        samples = noisy.len(),
        sample_rate = config.sample_rate,
        noise_std = config.noise_std,
        "synthesised test signal"
    );

    let filters = config
        .filters
        .iter()
        .map(|(name, spec)| {
            let coefficients = spec.design(config.sample_rate)?;
            let filtered = noisy.apply_filter(&coefficients, config.mode)?;
            let response =
                frequency_response(&coefficients, config.sample_rate, config.response_points)?;
            let spectrum = filtered.spectrum()?.non_negative();

            tracing::info!(
                filter = %name,
                order = spec.order(),
                taps_b = coefficients.b().len(),
                taps_a = coefficients.a().len(),
                input_rms = noisy.rms(),
                output_rms = filtered.rms(),
                "applied filter"
            );
            Ok(FilterOutcome {
                name: name.clone(),
                spec: spec.clone(),
                coefficients,
                filtered,
                response,
                spectrum,
            })
        })
        .collect::<FilterResult<Vec<_>>>()?;

    Ok(DemoReport {
        config: config.clone(),
        clean,
        noisy,
        noisy_spectrum,
        filters,
    })
}
