//! High-level spectrum analysis
//!
//! Turns a time-domain record into a band-limited magnitude spectrum using
//! an RMS AC detector, matching how the T8 unit reports its own spectra.

use super::fft::FftEngine;
use super::windowing::preprocess_with;
use super::windows::WindowType;
use crate::error::InvalidInputError;

/// Inclusive frequency range [fmin, fmax] in Hz
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyBand {
    fmin: f64,
    fmax: f64,
}

impl FrequencyBand {
    /// Create a band, rejecting NaN bounds and fmin > fmax
    pub fn new(fmin: f64, fmax: f64) -> Result<Self, InvalidInputError> {
        if fmin.is_nan() || fmax.is_nan() || fmin > fmax {
            return Err(InvalidInputError::InvalidBand { fmin, fmax });
        }
        Ok(Self { fmin, fmax })
    }

    /// Lower bound in Hz
    pub fn fmin(&self) -> f64 {
        self.fmin
    }

    /// Upper bound in Hz
    pub fn fmax(&self) -> f64 {
        self.fmax
    }

    /// Whether `frequency` lies inside the band (both ends inclusive)
    pub fn contains(&self, frequency: f64) -> bool {
        self.fmin <= frequency && frequency <= self.fmax
    }
}

/// Magnitude spectrum with its frequency axis
///
/// `magnitudes` and `frequencies` always have the same length.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Spectrum {
    magnitudes: Vec<f64>,
    frequencies: Vec<f64>,
}

impl Spectrum {
    /// Build from (magnitude, frequency) pairs
    fn from_pairs(pairs: impl Iterator<Item = (f64, f64)>) -> Self {
        let (magnitudes, frequencies) = pairs.unzip();
        Self {
            magnitudes,
            frequencies,
        }
    }

    /// Magnitudes (RMS units of the input)
    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    /// Bin frequencies in Hz
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Number of bins
    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    /// True when no bin survived the band filter
    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// Iterate over (frequency, magnitude) pairs
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.frequencies
            .iter()
            .copied()
            .zip(self.magnitudes.iter().copied())
    }

    /// Highest bin as (frequency, magnitude); the first one wins on ties
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.iter().fold(None, |best, (f, m)| match best {
            Some((_, best_m)) if best_m >= m => best,
            _ => Some((f, m)),
        })
    }

    /// Split into (magnitudes, frequencies)
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.magnitudes, self.frequencies)
    }
}

fn validate_sample_rate(sample_rate: f64) -> Result<(), InvalidInputError> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(())
    } else {
        Err(InvalidInputError::InvalidSampleRate(sample_rate))
    }
}

/// Compute the band-limited magnitude spectrum of `samples`
///
/// # Arguments
/// * `samples` - Time-domain record, ideally already windowed and padded
/// * `sample_rate` - Sample rate in Hz
/// * `band` - Frequency range to keep
///
/// # Algorithm
/// 1. Full N-point complex FFT
/// 2. Scale every coefficient by 2·√2/N (RMS AC detector, no window gain
///    compensation)
/// 3. Take the modulus
/// 4. Map bins to frequencies (negative half for k >= ceil(N/2))
/// 5. Keep bins with fmin <= f <= fmax, in bin order
pub fn calculate_spectrum(
    samples: &[f64],
    sample_rate: f64,
    band: FrequencyBand,
) -> Result<Spectrum, InvalidInputError> {
    if samples.is_empty() {
        return Err(InvalidInputError::EmptySamples);
    }
    validate_sample_rate(sample_rate)?;

    let engine = FftEngine::new(samples.len());
    let magnitudes = engine.compute_rms_magnitude(samples);
    let frequencies = engine.frequency_axis(sample_rate);

    let spectrum = Spectrum::from_pairs(
        magnitudes
            .into_iter()
            .zip(frequencies)
            .filter(|&(_, f)| band.contains(f)),
    );

    tracing::trace!(
        fft_size = samples.len(),
        bins = spectrum.len(),
        "computed band-limited spectrum"
    );
    Ok(spectrum)
}

/// Spectrum analyzer configuration
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Sample rate in Hz
    pub sample_rate: f64,

    /// Frequency band to report
    pub band: FrequencyBand,

    /// Window applied before the FFT
    pub window_type: WindowType,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            sample_rate: 2560.0,
            band: FrequencyBand {
                fmin: 0.0,
                fmax: 1000.0,
            },
            window_type: WindowType::Hann,
        }
    }
}

/// Raw-waveform-to-spectrum pipeline
///
/// Windows, zero-pads and analyzes a record with a fixed configuration.
#[derive(Debug, Clone, Default)]
pub struct SpectrumAnalyzer {
    config: AnalyzerConfig,
}

impl SpectrumAnalyzer {
    /// Create new spectrum analyzer
    pub fn new(config: AnalyzerConfig) -> Result<Self, InvalidInputError> {
        validate_sample_rate(config.sample_rate)?;
        Ok(Self { config })
    }

    /// Analyze a raw (scaled, unwindowed) waveform
    pub fn analyze(&self, waveform: &[f64]) -> Result<Spectrum, InvalidInputError> {
        let prepared = preprocess_with(waveform, self.config.window_type)?;
        calculate_spectrum(&prepared, self.config.sample_rate, self.config.band)
    }

    /// Get current configuration
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Update configuration
    pub fn update_config(&mut self, config: AnalyzerConfig) -> Result<(), InvalidInputError> {
        validate_sample_rate(config.sample_rate)?;
        self.config = config;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn band(fmin: f64, fmax: f64) -> FrequencyBand {
        FrequencyBand::new(fmin, fmax).unwrap()
    }

    #[test]
    fn test_zeros_at_1khz() {
        let spectrum = calculate_spectrum(&[0.0; 4], 1000.0, band(0.0, 500.0)).unwrap();

        assert_eq!(spectrum.magnitudes(), &[0.0, 0.0]);
        assert_eq!(spectrum.frequencies(), &[0.0, 250.0]);
    }

    #[test]
    fn test_band_outside_all_bins() {
        let signal: Vec<f64> = (0..4096).map(|n| (n as f64 * 0.1).sin()).collect();
        let spectrum = calculate_spectrum(&signal, 44100.0, band(1e9, 2e9)).unwrap();

        assert!(spectrum.is_empty());
        assert!(spectrum.frequencies().is_empty());
    }

    #[test]
    fn test_band_is_inclusive() {
        // N=8 at 800 Hz: bins at 0, 100, 200, 300, -400, -300, -200, -100
        let spectrum = calculate_spectrum(&[1.0; 8], 800.0, band(100.0, 300.0)).unwrap();
        assert_eq!(spectrum.frequencies(), &[100.0, 200.0, 300.0]);
    }

    #[test]
    fn test_negative_band_keeps_bin_order() {
        let spectrum = calculate_spectrum(&[1.0; 8], 800.0, band(-400.0, -100.0)).unwrap();
        assert_eq!(spectrum.frequencies(), &[-400.0, -300.0, -200.0, -100.0]);
    }

    #[test]
    fn test_dc_level() {
        // DC of 1.0 over N samples: |X[0]| = N, detector reads 2√2
        let spectrum = calculate_spectrum(&[1.0; 16], 16.0, band(0.0, 0.0)).unwrap();

        assert_eq!(spectrum.len(), 1);
        assert!((spectrum.magnitudes()[0] - 2.0 * std::f64::consts::SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn test_single_sample() {
        let spectrum = calculate_spectrum(&[3.0], 100.0, band(0.0, 50.0)).unwrap();

        assert_eq!(spectrum.frequencies(), &[0.0]);
        assert!((spectrum.magnitudes()[0] - 6.0 * std::f64::consts::SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn test_deterministic() {
        let signal: Vec<f64> = (0..1000)
            .map(|n| (2.0 * PI * 50.0 * n as f64 / 1000.0).sin() + 0.3 * (n as f64).cos())
            .collect();

        let a = calculate_spectrum(&signal, 1000.0, band(0.0, 500.0)).unwrap();
        let b = calculate_spectrum(&signal, 1000.0, band(0.0, 500.0)).unwrap();

        assert_eq!(a.len(), b.len());
        for (x, y) in a.magnitudes().iter().zip(b.magnitudes().iter()) {
            assert_eq!(x.to_bits(), y.to_bits());
        }
        assert_eq!(a.frequencies(), b.frequencies());
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(
            calculate_spectrum(&[], 1000.0, band(0.0, 10.0)),
            Err(InvalidInputError::EmptySamples)
        );
        assert_eq!(
            calculate_spectrum(&[1.0], 0.0, band(0.0, 10.0)),
            Err(InvalidInputError::InvalidSampleRate(0.0))
        );
        assert!(calculate_spectrum(&[1.0], f64::NAN, band(0.0, 10.0)).is_err());
        assert_eq!(
            FrequencyBand::new(10.0, 5.0),
            Err(InvalidInputError::InvalidBand {
                fmin: 10.0,
                fmax: 5.0
            })
        );
    }

    #[test]
    fn test_analyzer_finds_tone() {
        let sample_rate = 2560.0;
        let freq_hz = 100.0;
        let signal: Vec<f64> = (0..3000)
            .map(|n| (2.0 * PI * freq_hz * n as f64 / sample_rate).sin())
            .collect();

        let analyzer = SpectrumAnalyzer::new(AnalyzerConfig {
            sample_rate,
            band: band(0.0, 1000.0),
            window_type: WindowType::Hann,
        })
        .unwrap();

        let spectrum = analyzer.analyze(&signal).unwrap();

        // 3000 samples pad to 4096: 0.625 Hz bins up to 1000 Hz
        assert_eq!(spectrum.len(), 1601);

        let (peak_freq, peak_mag) = spectrum.peak().unwrap();
        assert!((peak_freq - freq_hz).abs() < 1.0);
        assert!(peak_mag > 0.0);
        assert!(spectrum.magnitudes().iter().all(|&m| m >= 0.0));
    }

    #[test]
    fn test_update_config_rejects_bad_rate() {
        let mut analyzer = SpectrumAnalyzer::default();
        let mut config = analyzer.config().clone();
        config.sample_rate = -1.0;

        assert!(analyzer.update_config(config).is_err());
        assert_eq!(analyzer.config().sample_rate, 2560.0);
    }
}
