//! Comparison between a computed spectrum and the one reported by the T8
//!
//! The unit returns its spectra as bare magnitudes plus the band edges; the
//! frequency axis is an evenly spaced grid between them.

use super::analysis::{FrequencyBand, Spectrum};
use crate::error::InvalidInputError;

/// `count` evenly spaced values from `start` to `stop`, both inclusive
pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        stop
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}

/// Spectrum as delivered by the measurement service
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceSpectrum {
    /// Scaled magnitudes
    pub magnitudes: Vec<f64>,

    /// Frequency of the first bin in Hz
    pub fmin: f64,

    /// Frequency of the last bin in Hz
    pub fmax: f64,
}

impl ReferenceSpectrum {
    /// Frequency axis: `linspace(fmin, fmax, len)`
    pub fn frequencies(&self) -> Vec<f64> {
        linspace(self.fmin, self.fmax, self.magnitudes.len())
    }

    /// Band covered by this spectrum
    pub fn band(&self) -> Result<FrequencyBand, InvalidInputError> {
        FrequencyBand::new(self.fmin, self.fmax)
    }

    /// Highest bin as (frequency, magnitude)
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.frequencies()
            .into_iter()
            .zip(self.magnitudes.iter().copied())
            .fold(None, |best, (f, m)| match best {
                Some((_, best_m)) if best_m >= m => best,
                _ => Some((f, m)),
            })
    }
}

/// Summary of how closely two spectra agree
#[derive(Debug, Clone, PartialEq)]
pub struct SpectrumComparison {
    /// Reference bins that fell inside the computed frequency range
    pub compared_points: usize,

    /// Root-mean-square of the magnitude differences
    pub rms_difference: f64,

    /// Largest absolute magnitude difference
    pub max_difference: f64,

    /// Peak of the reference spectrum as (frequency, magnitude)
    pub reference_peak: (f64, f64),

    /// Peak of the computed spectrum as (frequency, magnitude)
    pub computed_peak: (f64, f64),
}

/// Linear interpolation of `spectrum` at `frequency`
///
/// Expects ascending frequencies; returns `None` outside their range.
fn interpolate(frequencies: &[f64], magnitudes: &[f64], frequency: f64) -> Option<f64> {
    let first = *frequencies.first()?;
    let last = *frequencies.last()?;
    if frequency < first || frequency > last {
        return None;
    }

    let upper = frequencies.partition_point(|&f| f < frequency);
    if upper == 0 {
        return Some(magnitudes[0]);
    }
    if frequencies[upper] == frequency {
        return Some(magnitudes[upper]);
    }

    let (f0, f1) = (frequencies[upper - 1], frequencies[upper]);
    let (m0, m1) = (magnitudes[upper - 1], magnitudes[upper]);
    let t = (frequency - f0) / (f1 - f0);
    Some(m0 + t * (m1 - m0))
}

/// Compare a computed spectrum against the reference reported by the unit
///
/// The computed spectrum is interpolated onto the reference frequency grid;
/// reference bins outside the computed range are skipped.
pub fn compare_spectra(
    reference: &ReferenceSpectrum,
    computed: &Spectrum,
) -> Result<SpectrumComparison, InvalidInputError> {
    let reference_peak = reference.peak().ok_or(InvalidInputError::EmptySpectrum)?;
    let computed_peak = computed.peak().ok_or(InvalidInputError::EmptySpectrum)?;

    // Transform order puts negative bins after positive ones
    let mut pairs: Vec<(f64, f64)> = computed.iter().collect();
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0));
    let (frequencies, magnitudes): (Vec<f64>, Vec<f64>) = pairs.into_iter().unzip();

    let mut compared_points = 0usize;
    let mut sum_sq = 0.0;
    let mut max_difference = 0.0f64;

    for (f, reference_mag) in reference
        .frequencies()
        .into_iter()
        .zip(reference.magnitudes.iter().copied())
    {
        let Some(computed_mag) = interpolate(&frequencies, &magnitudes, f) else {
            continue;
        };
        let diff = (computed_mag - reference_mag).abs();
        sum_sq += diff * diff;
        max_difference = max_difference.max(diff);
        compared_points += 1;
    }

    let rms_difference = if compared_points > 0 {
        (sum_sq / compared_points as f64).sqrt()
    } else {
        0.0
    };

    Ok(SpectrumComparison {
        compared_points,
        rms_difference,
        max_difference,
        reference_peak,
        computed_peak,
    })
}
