//! FFT engine for real-valued records
//!
//! Computes the full N-point complex transform (both positive and negative
//! frequency halves) so bins can be filtered by any frequency band.

use num_complex::Complex;
use rustfft::{Fft, FftPlanner};
use std::sync::Arc;

/// FFT engine for a fixed transform size
pub struct FftEngine {
    /// FFT size (number of samples)
    fft_size: usize,

    /// Forward complex FFT plan
    fft: Arc<dyn Fft<f64>>,
}

impl FftEngine {
    /// Create new FFT engine
    ///
    /// # Arguments
    /// * `fft_size` - FFT size (number of samples)
    pub fn new(fft_size: usize) -> Self {
        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(fft_size);

        Self { fft_size, fft }
    }

    /// Compute the complex spectrum X[k] for k = 0..N-1
    ///
    /// # Arguments
    /// * `signal` - Input signal (zero-padded if shorter than fft_size,
    ///   truncated if longer)
    pub fn compute_complex(&self, signal: &[f64]) -> Vec<Complex<f64>> {
        let mut buffer = vec![Complex::new(0.0, 0.0); self.fft_size];
        for (slot, &s) in buffer.iter_mut().zip(signal.iter()) {
            slot.re = s;
        }

        self.fft.process(&mut buffer);
        buffer
    }

    /// Compute FFT and return magnitude |X[k]| for all N bins
    pub fn compute_magnitude(&self, signal: &[f64]) -> Vec<f64> {
        self.compute_complex(signal).iter().map(|c| c.norm()).collect()
    }

    /// Compute FFT magnitudes scaled to an RMS-equivalent AC detector
    ///
    /// Each coefficient is multiplied by 2·√2/N before taking its modulus.
    /// The window's coherent gain is not compensated.
    pub fn compute_rms_magnitude(&self, signal: &[f64]) -> Vec<f64> {
        let scale = rms_detector_scale(self.fft_size);
        self.compute_complex(signal)
            .iter()
            .map(|c| (*c * scale).norm())
            .collect()
    }

    /// Frequency of every bin in Hz, in transform order
    pub fn frequency_axis(&self, sample_rate: f64) -> Vec<f64> {
        fft_frequencies(self.fft_size, sample_rate)
    }
}

/// Detector scale factor 2·√2/N
pub fn rms_detector_scale(n: usize) -> f64 {
    2.0 * std::f64::consts::SQRT_2 / n as f64
}

/// Bin centre frequencies for an N-point transform sampled at `sample_rate`
///
/// Bins 0..ceil(N/2) are non-negative (k·fs/N); the rest are negative
/// ((k-N)·fs/N). For even N the Nyquist bin is reported as -fs/2.
pub fn fft_frequencies(n: usize, sample_rate: f64) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }

    let len = n as f64;
    let positive = (n - 1) / 2 + 1;

    (0..n)
        .map(|k| {
            let index = if k < positive {
                k as f64
            } else {
                k as f64 - len
            };
            index * sample_rate / len
        })
        .collect()
}
